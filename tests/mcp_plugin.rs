//! End-to-end plugin tests against a mock MCP SSE server.
//!
//! The mock speaks the two-channel transport for real: a GET stream that
//! announces the POST endpoint and then carries JSON-RPC responses, and a
//! POST endpoint that accepts requests and answers over the stream.

use a2a_mesh::agent::{AgentState, WorkerAgent, WorkerAgentConfig};
use a2a_mesh::llm::{ChatClient, ChatResponse, LlmError};
use a2a_mesh::mcp::{McpConnection, McpErrorKind};
use a2a_mesh::messages::{Message, MessageRole, StopReason, ToolCall, ToolDefinition};
use a2a_mesh::types::ContextId;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

type StreamSlot = Arc<tokio::sync::Mutex<Option<mpsc::UnboundedReceiver<Value>>>>;

/// Starts a mock plugin server and returns its SSE URL.
///
/// The server advertises one tool, `get_weather`, answers calls to it, and
/// returns a JSON-RPC error for any other tool name.
async fn spawn_plugin_server() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = mpsc::unbounded_channel::<Value>();
    let slot: StreamSlot = Arc::new(tokio::sync::Mutex::new(Some(rx)));

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(handle_connection(stream, tx.clone(), slot.clone()));
        }
    });
    Ok(format!("http://{addr}/sse"))
}

async fn handle_connection(
    mut stream: TcpStream,
    tx: mpsc::UnboundedSender<Value>,
    slot: StreamSlot,
) {
    let mut received = Vec::new();
    let mut buf = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => received.extend_from_slice(&buf[..n]),
        }
    };
    let head = String::from_utf8_lossy(&received[..head_end]).to_string();

    if head.starts_with("GET") {
        serve_stream(stream, slot).await;
        return;
    }

    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    let mut body = received[head_end..].to_vec();
    while body.len() < content_length {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => body.extend_from_slice(&buf[..n]),
        }
    }

    if let Ok(request) = serde_json::from_slice::<Value>(&body) {
        if let Some(reply) = rpc_reply(&request) {
            let _ = tx.send(reply);
        }
    }
    let _ = stream
        .write_all(b"HTTP/1.1 202 Accepted\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
        .await;
}

/// Serves the SSE stream: endpoint announcement, then queued responses.
async fn serve_stream(mut stream: TcpStream, slot: StreamSlot) {
    let Some(mut rx) = slot.lock().await.take() else {
        return;
    };
    let head = b"HTTP/1.1 200 OK\r\n\
        content-type: text/event-stream\r\n\
        cache-control: no-cache\r\n\
        connection: close\r\n\r\n";
    if stream.write_all(head).await.is_err() {
        return;
    }
    if stream.write_all(b"event: endpoint\ndata: /rpc\n\n").await.is_err() {
        return;
    }
    let _ = stream.flush().await;

    while let Some(value) = rx.recv().await {
        let frame = format!("event: message\ndata: {value}\n\n");
        if stream.write_all(frame.as_bytes()).await.is_err() {
            return;
        }
        let _ = stream.flush().await;
    }
}

/// Builds the response for one JSON-RPC request; notifications get none.
fn rpc_reply(request: &Value) -> Option<Value> {
    let id = request.get("id")?.clone();
    let method = request.get("method").and_then(Value::as_str).unwrap_or("");
    let reply = match method {
        "initialize" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "serverInfo": {"name": "weather-plugin", "version": "0.1.0"}
            }
        }),
        "tools/list" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {"tools": [{
                "name": "get_weather",
                "description": "Reports current conditions for a city",
                "inputSchema": {
                    "type": "object",
                    "properties": {"city": {"type": "string"}},
                    "required": ["city"]
                }
            }]}
        }),
        "tools/call" => {
            let name = request["params"]["name"].as_str().unwrap_or("");
            if name == "get_weather" {
                let city = request["params"]["arguments"]["city"]
                    .as_str()
                    .unwrap_or("somewhere");
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": {"content": [{
                        "type": "text",
                        "text": format!("22 degrees and clear in {city}")
                    }]}
                })
            } else {
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": -32602, "message": format!("unknown tool '{name}'")}
                })
            }
        }
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": "method not found"}
        }),
    };
    Some(reply)
}

#[tokio::test]
async fn connection_lists_and_calls_plugin_tools() -> anyhow::Result<()> {
    let url = spawn_plugin_server().await?;
    let connection = McpConnection::connect(&url, Duration::from_secs(5)).await?;

    let tools = connection.list_tools().await?;
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "get_weather");
    assert!(tools[0].input_schema["properties"]["city"].is_object());

    let answer = connection
        .call_tool("get_weather", json!({"city": "Lisbon"}))
        .await?;
    assert_eq!(answer, "22 degrees and clear in Lisbon");

    connection.close();
    Ok(())
}

#[tokio::test]
async fn unknown_tool_call_is_an_rpc_error() -> anyhow::Result<()> {
    let url = spawn_plugin_server().await?;
    let connection = McpConnection::connect(&url, Duration::from_secs(5)).await?;

    let err = connection
        .call_tool("open_pod_bay_doors", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err.kind, McpErrorKind::Rpc { code: Some(-32602), .. }));
    assert!(err.to_string().contains("unknown tool"));

    connection.close();
    Ok(())
}

#[tokio::test]
async fn closed_connection_rejects_requests() -> anyhow::Result<()> {
    let url = spawn_plugin_server().await?;
    let connection = McpConnection::connect(&url, Duration::from_secs(5)).await?;

    connection.close();
    let err = connection.list_tools().await.unwrap_err();
    assert_eq!(err.kind, McpErrorKind::Closed);
    Ok(())
}

/// Chat double that replays a fixed script of responses.
#[derive(Debug)]
struct ScriptedChat {
    responses: Mutex<VecDeque<ChatResponse>>,
}

impl ScriptedChat {
    fn new(responses: Vec<ChatResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn complete(
        &self,
        _messages: &[Message],
        _tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse, LlmError> {
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

#[tokio::test]
async fn worker_collects_and_uses_plugin_tools() -> anyhow::Result<()> {
    let url = spawn_plugin_server().await?;
    let chat = ScriptedChat::new(vec![
        ChatResponse {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: "tc_1".to_string(),
                name: "get_weather".to_string(),
                arguments: json!({"city": "Lisbon"}),
            }],
            stop_reason: StopReason::ToolUse,
        },
        ChatResponse {
            content: "Clear skies in Lisbon at 22 degrees.".to_string(),
            tool_calls: vec![],
            stop_reason: StopReason::EndTurn,
        },
    ]);

    let config = WorkerAgentConfig::new("Weather Agent", "Reports current conditions.")
        .with_mcp_url(&url)
        .with_connect_timeout(Duration::from_secs(5));
    let agent = WorkerAgent::new(config, chat);

    agent.initialize().await?;
    assert_eq!(agent.state(), AgentState::Ready);
    assert_eq!(agent.tool_count(), 1);

    let ctx = ContextId::parse("session-1")?;
    let answer = agent.process("How is the weather in Lisbon?", &ctx).await?;
    assert_eq!(answer, "Clear skies in Lisbon at 22 degrees.");

    // The transcript carries the plugin call's result.
    let history = agent.history(&ctx).await.unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[2].role, MessageRole::Tool);
    assert_eq!(history[2].content, "22 degrees and clear in Lisbon");

    agent.close();
    Ok(())
}
