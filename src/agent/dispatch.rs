//! The tool dispatch loop.
//!
//! One turn alternates between the chat-completion service and tool
//! execution until the model answers in plain text or the round budget
//! runs out. Tool failures never abort the turn; they come back to the
//! model as result text so it can recover or report.

use crate::conversation::Conversation;
use crate::error::AgentError;
use crate::llm::ChatClient;
use crate::messages::{Message, ToolCall};
use crate::tools::{ToolError, ToolSnapshot};
use serde_json::Value;

/// Runs one turn against an already-locked conversation.
///
/// The caller has appended the user message. Each round sends the full
/// transcript, executes any requested tool calls in order, and appends
/// their results. After `max_rounds` rounds the model is asked once more
/// without tools so the turn always converges to text.
pub(crate) async fn run_turn(
    chat: &dyn ChatClient,
    conversation: &mut Conversation,
    tools: &ToolSnapshot,
    max_rounds: usize,
    agent_name: &str,
) -> Result<String, AgentError> {
    let definitions = tools.definitions();
    let offered = if definitions.is_empty() {
        None
    } else {
        Some(definitions.as_slice())
    };

    for round in 0..max_rounds {
        let response = chat
            .complete(&conversation.messages_for_llm(), offered)
            .await
            .map_err(|e| AgentError::llm(e).for_agent(agent_name))?;

        if !response.has_tool_calls() {
            conversation.append(Message::assistant(&response.content));
            return Ok(response.content);
        }

        tracing::debug!(
            agent = %agent_name,
            round,
            calls = response.tool_calls.len(),
            "Model requested tool calls"
        );
        conversation.append(Message::assistant_with_tools(
            &response.content,
            response.tool_calls.clone(),
        ));
        for call in &response.tool_calls {
            let result = execute_call(tools, call).await;
            conversation.append(Message::tool(&call.id, result));
        }
    }

    // Round budget exhausted; force a final text answer.
    tracing::warn!(agent = %agent_name, max_rounds, "Tool round budget exhausted");
    let response = chat
        .complete(&conversation.messages_for_llm(), None)
        .await
        .map_err(|e| AgentError::llm(e).for_agent(agent_name))?;
    conversation.append(Message::assistant(&response.content));
    Ok(response.content)
}

/// Executes one tool call, flattening every failure to result text.
async fn execute_call(tools: &ToolSnapshot, call: &ToolCall) -> String {
    let Some(binding) = tools.get(&call.name) else {
        tracing::warn!(tool_name = %call.name, "Model requested unknown tool");
        return ToolError::not_found(&call.name).to_string();
    };

    tracing::info!(tool_name = %call.name, "Executing tool call");
    match binding.executor.execute(call.arguments.clone()).await {
        Ok(Value::String(text)) => text,
        Ok(value) => value.to_string(),
        Err(e) => {
            tracing::warn!(tool_name = %call.name, error = %e, "Tool call failed");
            e.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatResponse, LlmError};
    use crate::messages::{MessageRole, StopReason, ToolDefinition};
    use crate::tools::{ToolBinding, ToolExecutionFuture, ToolExecutor, ToolRegistry};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct ScriptedChat {
        responses: Mutex<VecDeque<ChatResponse>>,
        calls: AtomicUsize,
    }

    impl ScriptedChat {
        fn new(responses: Vec<ChatResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChat {
        async fn complete(
            &self,
            _messages: &[Message],
            _tools: Option<&[ToolDefinition]>,
        ) -> Result<ChatResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LlmError::network("script exhausted"))
        }

        fn provider_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn text(content: &str) -> ChatResponse {
        ChatResponse {
            content: content.to_string(),
            tool_calls: vec![],
            stop_reason: StopReason::EndTurn,
        }
    }

    fn tool_request(name: &str, id: &str) -> ChatResponse {
        ChatResponse {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: serde_json::json!({"instruction": "look it up"}),
            }],
            stop_reason: StopReason::ToolUse,
        }
    }

    #[derive(Debug)]
    struct FixedTool(&'static str);

    impl ToolExecutor for FixedTool {
        fn execute(&self, _args: Value) -> ToolExecutionFuture {
            let reply = self.0;
            Box::pin(async move { Ok(Value::String(reply.to_string())) })
        }
    }

    #[derive(Debug)]
    struct FailingTool;

    impl ToolExecutor for FailingTool {
        fn execute(&self, _args: Value) -> ToolExecutionFuture {
            Box::pin(async move { Err(ToolError::execution_failed("lookup", "backend down")) })
        }
    }

    fn registry_with(name: &str, executor: Arc<dyn ToolExecutor>) -> ToolRegistry {
        let registry = ToolRegistry::new();
        registry
            .register(ToolBinding::new(
                ToolDefinition {
                    name: name.to_string(),
                    description: String::new(),
                    input_schema: serde_json::json!({"type": "object"}),
                },
                executor,
            ))
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn plain_answer_ends_the_turn() {
        let chat = ScriptedChat::new(vec![text("All done.")]);
        let mut conversation = Conversation::new("preamble");
        conversation.append(Message::user("hello"));

        let registry = ToolRegistry::new();
        let answer = run_turn(&chat, &mut conversation, &registry.snapshot(), 8, "host")
            .await
            .unwrap();

        assert_eq!(answer, "All done.");
        assert_eq!(chat.call_count(), 1);
        assert_eq!(conversation.len(), 2);
    }

    #[tokio::test]
    async fn tool_round_feeds_result_back() {
        let chat = ScriptedChat::new(vec![
            tool_request("lookup", "tc_1"),
            text("Your order shipped."),
        ]);
        let registry = registry_with("lookup", Arc::new(FixedTool("shipped yesterday")));
        let mut conversation = Conversation::new("preamble");
        conversation.append(Message::user("where is my order?"));

        let answer = run_turn(&chat, &mut conversation, &registry.snapshot(), 8, "host")
            .await
            .unwrap();

        assert_eq!(answer, "Your order shipped.");
        let turns = conversation.turns();
        // user, assistant-with-tools, tool result, assistant answer
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[2].role, MessageRole::Tool);
        assert_eq!(turns[2].content, "shipped yesterday");
        assert_eq!(turns[2].tool_call_id.as_deref(), Some("tc_1"));
    }

    #[tokio::test]
    async fn unknown_tool_becomes_result_text() {
        let chat = ScriptedChat::new(vec![tool_request("missing", "tc_1"), text("Sorry.")]);
        let registry = ToolRegistry::new();
        let mut conversation = Conversation::new("preamble");
        conversation.append(Message::user("hi"));

        run_turn(&chat, &mut conversation, &registry.snapshot(), 8, "host")
            .await
            .unwrap();

        assert!(conversation.turns()[2]
            .content
            .contains("'missing' is not registered"));
    }

    #[tokio::test]
    async fn tool_failure_becomes_result_text() {
        let chat = ScriptedChat::new(vec![tool_request("lookup", "tc_1"), text("Sorry.")]);
        let registry = registry_with("lookup", Arc::new(FailingTool));
        let mut conversation = Conversation::new("preamble");
        conversation.append(Message::user("hi"));

        let answer = run_turn(&chat, &mut conversation, &registry.snapshot(), 8, "host")
            .await
            .unwrap();

        assert_eq!(answer, "Sorry.");
        assert!(conversation.turns()[2].content.contains("backend down"));
    }

    #[tokio::test]
    async fn round_budget_forces_final_answer() {
        let chat = ScriptedChat::new(vec![
            tool_request("lookup", "tc_1"),
            tool_request("lookup", "tc_2"),
            text("Best effort answer."),
        ]);
        let registry = registry_with("lookup", Arc::new(FixedTool("partial")));
        let mut conversation = Conversation::new("preamble");
        conversation.append(Message::user("hi"));

        let answer = run_turn(&chat, &mut conversation, &registry.snapshot(), 2, "host")
            .await
            .unwrap();

        assert_eq!(answer, "Best effort answer.");
        assert_eq!(chat.call_count(), 3);
    }

    #[tokio::test]
    async fn llm_failure_surfaces_as_error() {
        let chat = ScriptedChat::new(vec![]);
        let registry = ToolRegistry::new();
        let mut conversation = Conversation::new("preamble");
        conversation.append(Message::user("hi"));

        let err = run_turn(&chat, &mut conversation, &registry.snapshot(), 8, "host")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("chat completion failed"));
    }
}
