//! MCP plugin connection over SSE.
//!
//! The transport is two-channel: a long-lived GET stream carries
//! server-sent events, and JSON-RPC requests go out as POSTs to the
//! endpoint the server announces in its first event. Responses arrive back
//! on the event stream and are routed to waiters by request id.

use crate::mcp::error::McpError;
use crate::mcp::types::{
    CallToolResult, McpTool, SseEvent, ToolsListResult, PROTOCOL_VERSION,
};
use futures::{Stream, StreamExt};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Value>>>>;

/// A live connection to one MCP plugin server.
pub struct McpConnection {
    /// The SSE URL this connection was opened against
    url: String,
    /// The POST endpoint announced by the server
    post_url: String,
    http: reqwest::Client,
    timeout: Duration,
    next_id: AtomicU64,
    pending: PendingMap,
    reader: tokio::task::JoinHandle<()>,
    closed: AtomicBool,
}

impl McpConnection {
    /// Opens a connection and performs the initialize handshake.
    ///
    /// # Errors
    ///
    /// Returns a handshake error when the stream cannot be opened, the
    /// server never announces its POST endpoint, or initialization fails.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, McpError> {
        let http = reqwest::Client::new();
        let response = http
            .get(url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| McpError::handshake(url, e.to_string()))?;
        if !response.status().is_success() {
            return Err(McpError::handshake(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let mut events = Box::pin(sse_events(response.bytes_stream()));
        let endpoint = tokio::time::timeout(timeout, async {
            while let Some(event) = events.next().await {
                let event = event?;
                if event.event == "endpoint" {
                    return Ok(event.data);
                }
            }
            Err(McpError::handshake(url, "stream ended before endpoint event"))
        })
        .await
        .map_err(|_| McpError::timeout(timeout))??;

        let base = url::Url::parse(url)
            .map_err(|e| McpError::handshake(url, format!("invalid URL: {e}")))?;
        let post_url = base
            .join(&endpoint)
            .map_err(|e| McpError::handshake(url, format!("invalid endpoint '{endpoint}': {e}")))?
            .to_string();
        tracing::debug!(sse_url = %url, %post_url, "Plugin endpoint announced");

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let reader = tokio::spawn(route_messages(events, pending.clone()));

        let connection = Self {
            url: url.to_string(),
            post_url,
            http,
            timeout,
            next_id: AtomicU64::new(1),
            pending,
            reader,
            closed: AtomicBool::new(false),
        };
        connection.initialize().await?;
        Ok(connection)
    }

    /// Returns the SSE URL this connection was opened against.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn initialize(&self) -> Result<(), McpError> {
        self.request(
            "initialize",
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
        .await?;
        self.notify("notifications/initialized").await
    }

    /// Lists the tools the plugin server advertises.
    ///
    /// # Errors
    ///
    /// Returns transport, timeout, or protocol errors from the exchange.
    pub async fn list_tools(&self) -> Result<Vec<McpTool>, McpError> {
        let result = self.request("tools/list", json!({})).await?;
        let listed: ToolsListResult = serde_json::from_value(result)
            .map_err(|e| McpError::protocol(format!("malformed tools/list result: {e}")))?;
        Ok(listed.tools)
    }

    /// Calls one plugin tool and flattens the result to text.
    ///
    /// # Errors
    ///
    /// Returns an RPC error when the tool reports failure, or transport,
    /// timeout, or protocol errors from the exchange.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, McpError> {
        let result = self
            .request("tools/call", json!({"name": name, "arguments": arguments}))
            .await?;
        let call: CallToolResult = serde_json::from_value(result)
            .map_err(|e| McpError::protocol(format!("malformed tools/call result: {e}")))?;
        let is_error = call.is_error;
        let text = call.into_text();
        if is_error {
            return Err(McpError::rpc(None, text));
        }
        Ok(text)
    }

    /// Closes the connection. Pending requests fail with a closed error.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.reader.abort();
        self.pending
            .lock()
            .expect("pending map lock poisoned")
            .clear();
        tracing::debug!(url = %self.url, "Plugin connection closed");
    }

    /// One request/response exchange, bounded by the connection timeout.
    async fn request(&self, method: &str, params: Value) -> Result<Value, McpError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(McpError::closed());
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .expect("pending map lock poisoned")
            .insert(id, tx);

        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        let posted = self.http.post(&self.post_url).json(&body).send().await;
        match posted {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                self.forget(id);
                return Err(McpError::transport(format!(
                    "HTTP {} posting {method}",
                    response.status()
                )));
            }
            Err(e) => {
                self.forget(id);
                return Err(McpError::transport(e.to_string()));
            }
        }

        let reply = match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(value)) => value,
            Ok(Err(_)) => return Err(McpError::closed()),
            Err(_) => {
                self.forget(id);
                return Err(McpError::timeout(self.timeout));
            }
        };

        if let Some(error) = reply.get("error") {
            return Err(McpError::rpc(
                error.get("code").and_then(Value::as_i64),
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error"),
            ));
        }
        Ok(reply.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Fire-and-forget notification.
    async fn notify(&self, method: &str) -> Result<(), McpError> {
        let body = json!({"jsonrpc": "2.0", "method": method});
        self.http
            .post(&self.post_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| McpError::transport(e.to_string()))?;
        Ok(())
    }

    fn forget(&self, id: u64) {
        self.pending
            .lock()
            .expect("pending map lock poisoned")
            .remove(&id);
    }
}

impl fmt::Debug for McpConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McpConnection")
            .field("url", &self.url)
            .field("post_url", &self.post_url)
            .finish_non_exhaustive()
    }
}

impl Drop for McpConnection {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// Routes response events arriving on the stream to their waiters.
async fn route_messages<S>(mut events: S, pending: PendingMap)
where
    S: Stream<Item = Result<SseEvent, McpError>> + Unpin,
{
    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "Plugin event stream ended");
                break;
            }
        };
        if event.event != "message" {
            continue;
        }
        let value: Value = match serde_json::from_str(&event.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding non-JSON plugin event");
                continue;
            }
        };
        // Server notifications have no id and are ignored.
        let Some(id) = value.get("id").and_then(Value::as_u64) else {
            continue;
        };
        let waiter = pending
            .lock()
            .expect("pending map lock poisoned")
            .remove(&id);
        if let Some(tx) = waiter {
            let _ = tx.send(value);
        }
    }
}

/// Reassembles server-sent events from a raw byte stream.
///
/// Handles `event:` and `data:` fields, multi-line data, CRLF line endings,
/// and comment lines. An event without an explicit type defaults to
/// "message" per the SSE specification.
fn sse_events<S, B, E>(mut body: S) -> impl Stream<Item = Result<SseEvent, McpError>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    async_stream::stream! {
        let mut buffer = String::new();
        let mut event = SseEvent::default();
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(McpError::transport(e.to_string()));
                    return;
                }
            };
            buffer.push_str(&String::from_utf8_lossy(chunk.as_ref()));
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim_end_matches('\r').to_string();
                buffer.drain(..=pos);
                if line.is_empty() {
                    if !event.event.is_empty() || !event.data.is_empty() {
                        if event.event.is_empty() {
                            event.event = "message".to_string();
                        }
                        yield Ok(std::mem::take(&mut event));
                    }
                } else if let Some(rest) = line.strip_prefix("event:") {
                    event.event = rest.trim_start().to_string();
                } else if let Some(rest) = line.strip_prefix("data:") {
                    if !event.data.is_empty() {
                        event.data.push('\n');
                    }
                    event.data.push_str(rest.trim_start());
                }
                // Comment lines and unknown fields are skipped.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::convert::Infallible;

    async fn collect(chunks: Vec<&str>) -> Vec<SseEvent> {
        let items: Vec<Result<Vec<u8>, Infallible>> = chunks
            .into_iter()
            .map(|c| Ok(c.as_bytes().to_vec()))
            .collect();
        let events = sse_events(stream::iter(items));
        futures::pin_mut!(events);
        let mut out = Vec::new();
        while let Some(event) = events.next().await {
            out.push(event.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn parses_endpoint_then_message() {
        let events = collect(vec![
            "event: endpoint\ndata: /messages?session=abc\n\n",
            "event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}\n\n",
        ])
        .await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, "endpoint");
        assert_eq!(events[0].data, "/messages?session=abc");
        assert_eq!(events[1].event, "message");
    }

    #[tokio::test]
    async fn events_split_across_chunks_are_reassembled() {
        let events = collect(vec!["event: end", "point\ndata: /rpc", "\n\n"]).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "endpoint");
        assert_eq!(events[0].data, "/rpc");
    }

    #[tokio::test]
    async fn missing_event_field_defaults_to_message() {
        let events = collect(vec!["data: {\"id\":1}\n\n"]).await;
        assert_eq!(events[0].event, "message");
    }

    #[tokio::test]
    async fn multi_line_data_is_joined() {
        let events = collect(vec!["data: first\ndata: second\n\n"]).await;
        assert_eq!(events[0].data, "first\nsecond");
    }

    #[tokio::test]
    async fn crlf_lines_are_handled() {
        let events = collect(vec!["event: endpoint\r\ndata: /rpc\r\n\r\n"]).await;
        assert_eq!(events[0].event, "endpoint");
        assert_eq!(events[0].data, "/rpc");
    }

    #[tokio::test]
    async fn connect_to_unreachable_server_is_handshake_error() {
        let err = McpConnection::connect("http://127.0.0.1:1/sse", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.kind,
            crate::mcp::error::McpErrorKind::Handshake { .. }
        ));
    }
}
