//! OpenAI-compatible chat completions client.
//!
//! One HTTP client covers both wire dialects the crate needs: Azure OpenAI
//! deployments (deployment-scoped URL, `api-key` header) and plain
//! OpenAI-compatible endpoints (OpenAI, Ollama, vLLM, LocalAI).

use crate::llm::client::{ChatClient, ChatResponse};
use crate::llm::config::{ProviderConfig, ProviderType};
use crate::llm::error::LlmError;
use crate::messages::{Message, MessageRole, StopReason, ToolCall, ToolDefinition};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for OpenAI-compatible chat completion APIs.
#[derive(Debug, Clone)]
pub struct OpenAIChatClient {
    /// HTTP client
    client: Client,
    /// Fully resolved chat completions URL
    endpoint: String,
    /// Authentication scheme for this provider
    auth: Auth,
    /// Model name (empty for Azure, where the deployment selects it)
    model: String,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Request timeout, kept for error reporting
    timeout: Duration,
}

/// How credentials are attached to each request.
#[derive(Debug, Clone)]
enum Auth {
    /// Azure-style `api-key` header
    ApiKeyHeader(String),
    /// `Authorization: Bearer` header
    Bearer(String),
    /// No authentication (local providers)
    None,
}

/// Request body for the chat completions API.
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ApiTool>>,
}

/// A message in API wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

/// A tool definition in API wire format.
#[derive(Debug, Clone, Serialize)]
struct ApiTool {
    #[serde(rename = "type")]
    tool_type: String,
    function: ApiFunction,
}

/// A function definition in API wire format.
#[derive(Debug, Clone, Serialize)]
struct ApiFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

/// A tool call in API wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: ApiFunctionCall,
}

/// A function call in API wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiFunctionCall {
    name: String,
    arguments: String,
}

/// Non-streaming response from the API.
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

/// A choice in the response.
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionChoice {
    message: ApiMessage,
    finish_reason: Option<String>,
}

/// Error response from the API.
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

/// Error detail from the API.
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: String,
}

impl OpenAIChatClient {
    /// Creates a new client from the provider configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::invalid_config` if the Azure configuration is
    /// incomplete, or `LlmError::network` if the HTTP client cannot be
    /// created.
    pub fn new(config: &ProviderConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::network(format!("failed to create HTTP client: {e}")))?;

        let (endpoint, auth, model) = match &config.provider {
            ProviderType::Azure {
                endpoint,
                deployment,
                api_version,
            } => {
                if endpoint.is_empty() {
                    return Err(LlmError::invalid_config("endpoint", "must not be empty"));
                }
                if deployment.is_empty() {
                    return Err(LlmError::invalid_config("deployment", "must not be empty"));
                }
                let url = format!(
                    "{}/openai/deployments/{}/chat/completions?api-version={}",
                    endpoint.trim_end_matches('/'),
                    deployment,
                    api_version
                );
                (url, Auth::ApiKeyHeader(config.api_key.clone()), None)
            }
            ProviderType::OpenAI { base_url } => {
                let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
                let auth = if config.api_key.is_empty() {
                    Auth::None
                } else {
                    Auth::Bearer(config.api_key.clone())
                };
                (url, auth, Some(config.model.clone()))
            }
        };

        Ok(Self {
            client,
            endpoint,
            auth,
            model: model.unwrap_or_default(),
            max_tokens: config.max_tokens,
            timeout: config.timeout,
        })
    }

    /// Converts internal messages to API wire format.
    fn convert_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System => ApiMessage {
                    role: "system".to_string(),
                    content: Some(msg.content.clone()),
                    tool_calls: None,
                    tool_call_id: None,
                },
                MessageRole::User => ApiMessage {
                    role: "user".to_string(),
                    content: Some(msg.content.clone()),
                    tool_calls: None,
                    tool_call_id: None,
                },
                MessageRole::Assistant => {
                    let tool_calls = msg.tool_calls.as_ref().map(|tcs| {
                        tcs.iter()
                            .map(|tc| ApiToolCall {
                                id: tc.id.clone(),
                                call_type: "function".to_string(),
                                function: ApiFunctionCall {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.to_string(),
                                },
                            })
                            .collect()
                    });

                    ApiMessage {
                        role: "assistant".to_string(),
                        content: if msg.content.is_empty() {
                            None
                        } else {
                            Some(msg.content.clone())
                        },
                        tool_calls,
                        tool_call_id: None,
                    }
                }
                MessageRole::Tool => ApiMessage {
                    role: "tool".to_string(),
                    content: Some(msg.content.clone()),
                    tool_calls: None,
                    tool_call_id: msg.tool_call_id.clone(),
                },
            })
            .collect()
    }

    /// Converts tool definitions to API wire format.
    fn convert_tools(tools: &[ToolDefinition]) -> Vec<ApiTool> {
        tools
            .iter()
            .map(|t| ApiTool {
                tool_type: "function".to_string(),
                function: ApiFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.input_schema.clone(),
                },
            })
            .collect()
    }

    /// Parses the API finish reason to internal format.
    #[must_use]
    pub fn parse_stop_reason(reason: Option<&str>) -> StopReason {
        match reason {
            Some("length") => StopReason::MaxTokens,
            Some("tool_calls") => StopReason::ToolUse,
            _ => StopReason::EndTurn,
        }
    }

    /// Builds the request with the configured authentication.
    fn build_request(&self, request_body: &ChatCompletionRequest) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request_body);

        match &self.auth {
            Auth::ApiKeyHeader(key) => request = request.header("api-key", key.clone()),
            Auth::Bearer(key) => request = request.header("Authorization", format!("Bearer {key}")),
            Auth::None => {}
        }

        request
    }

    /// Parses an error response from the API.
    async fn parse_error_response(response: reqwest::Response) -> LlmError {
        let status = response.status();
        let status_code = status.as_u16();

        if status_code == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return LlmError::rate_limited(Duration::from_secs(retry_after));
        }

        let error_body = response.text().await.unwrap_or_default();

        if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
            match api_error.error.error_type.as_deref() {
                Some("authentication_error" | "invalid_api_key") => {
                    LlmError::authentication_failed(&api_error.error.message)
                }
                _ if status_code == 401 || status_code == 403 => {
                    LlmError::authentication_failed(&api_error.error.message)
                }
                _ => LlmError::api_error(status_code, api_error.error.message),
            }
        } else {
            LlmError::api_error(
                status_code,
                if error_body.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error")
                } else {
                    &error_body
                },
            )
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatCompletionRequest {
            model: if self.model.is_empty() {
                None
            } else {
                Some(self.model.clone())
            },
            messages: Self::convert_messages(messages),
            max_tokens: Some(self.max_tokens),
            tools: tools.filter(|t| !t.is_empty()).map(Self::convert_tools),
        };

        let response = self
            .build_request(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::timeout(self.timeout)
                } else {
                    LlmError::network(format!("request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::parse_error_response(response).await);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::parse_error(format!("failed to parse response: {e}")))?;

        let choice = completion
            .choices
            .first()
            .ok_or_else(|| LlmError::parse_error("response contained no choices"))?;

        let content = choice.message.content.clone().unwrap_or_default();

        let tool_calls = choice
            .message
            .tool_calls
            .as_ref()
            .map(|tcs| {
                tcs.iter()
                    .filter_map(|tc| {
                        let arguments: serde_json::Value =
                            serde_json::from_str(&tc.function.arguments).ok()?;
                        Some(ToolCall {
                            id: tc.id.clone(),
                            name: tc.function.name.clone(),
                            arguments,
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let stop_reason = Self::parse_stop_reason(choice.finish_reason.as_deref());

        Ok(ChatResponse {
            content,
            tool_calls,
            stop_reason,
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn azure_client() -> OpenAIChatClient {
        let config = ProviderConfig::azure(
            "https://r.openai.azure.com/",
            "gpt-4o",
            "2024-06-01",
            "secret",
        );
        OpenAIChatClient::new(&config).unwrap()
    }

    #[test]
    fn azure_endpoint_is_deployment_scoped() {
        let client = azure_client();
        assert_eq!(
            client.endpoint,
            "https://r.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-06-01"
        );
        assert!(matches!(client.auth, Auth::ApiKeyHeader(_)));
        // Azure selects the model via the deployment, never the body.
        assert!(client.model.is_empty());
    }

    #[test]
    fn openai_endpoint_appends_chat_completions() {
        let config = ProviderConfig::openai_compatible("http://localhost:11434/v1", "qwen2.5:7b");
        let client = OpenAIChatClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "http://localhost:11434/v1/chat/completions");
        assert!(matches!(client.auth, Auth::None));
    }

    #[test]
    fn openai_with_key_uses_bearer() {
        let config = ProviderConfig::openai_compatible("https://api.openai.com/v1", "gpt-4o")
            .with_api_key("sk-test");
        let client = OpenAIChatClient::new(&config).unwrap();
        assert!(matches!(client.auth, Auth::Bearer(_)));
    }

    #[test]
    fn empty_azure_endpoint_is_rejected() {
        let config = ProviderConfig::azure("", "gpt-4o", "2024-06-01", "key");
        let err = OpenAIChatClient::new(&config).unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn convert_tool_message_carries_call_id() {
        let messages = vec![Message::tool("tc_9", "result")];
        let api = OpenAIChatClient::convert_messages(&messages);
        assert_eq!(api[0].role, "tool");
        assert_eq!(api[0].tool_call_id, Some("tc_9".to_string()));
    }

    #[test]
    fn convert_assistant_with_tools_serializes_arguments() {
        let call = ToolCall {
            id: "tc_1".to_string(),
            name: "check_order_status".to_string(),
            arguments: serde_json::json!({"instruction": "ORD1"}),
        };
        let messages = vec![Message::assistant_with_tools("", vec![call])];
        let api = OpenAIChatClient::convert_messages(&messages);
        let tcs = api[0].tool_calls.as_ref().unwrap();
        assert_eq!(tcs[0].function.name, "check_order_status");
        assert!(tcs[0].function.arguments.contains("ORD1"));
        assert!(api[0].content.is_none());
    }

    #[test]
    fn convert_tools_wraps_function_type() {
        let tools = vec![ToolDefinition {
            name: "check_order_status".to_string(),
            description: "Checks an order".to_string(),
            input_schema: serde_json::json!({"type": "object"}),
        }];
        let api = OpenAIChatClient::convert_tools(&tools);
        assert_eq!(api[0].tool_type, "function");
        assert_eq!(api[0].function.name, "check_order_status");
    }

    #[test]
    fn parse_stop_reason_variants() {
        assert_eq!(
            OpenAIChatClient::parse_stop_reason(Some("stop")),
            StopReason::EndTurn
        );
        assert_eq!(
            OpenAIChatClient::parse_stop_reason(Some("length")),
            StopReason::MaxTokens
        );
        assert_eq!(
            OpenAIChatClient::parse_stop_reason(Some("tool_calls")),
            StopReason::ToolUse
        );
        assert_eq!(
            OpenAIChatClient::parse_stop_reason(None),
            StopReason::EndTurn
        );
    }

    #[test]
    fn client_implements_chat_client() {
        let _boxed: Box<dyn ChatClient> = Box::new(azure_client());
    }
}
