// MCP server: JSON-RPC 2.0 over line-delimited stdio
//
// Each request runs on its own task so tool calls proceed concurrently.
// Responses funnel through one writer task, one JSON document per line.

use crate::protocol::*;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

const INSTRUCTIONS: &str = "Tools for reading the user's expenses recorded in ExpenseLM: \
list and search expense records, fetch one record by id, list subscription expenses, \
and summarise spending by month, category or subscription for a period.";

pub struct McpServer {
    registry: ToolRegistry,
    in_flight: Mutex<HashMap<String, AbortHandle>>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Serve MCP on this process's stdin/stdout until stdin closes.
    pub async fn start(self) -> Result<()> {
        info!(tools = self.registry.len(), "MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve MCP over any line-oriented byte stream pair.
    ///
    /// Returns once the reader is exhausted and every in-flight call has
    /// either answered or been cancelled.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let server = Arc::new(self);
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(response) = rx.recv().await {
                let line = serde_json::to_string(&response)?;
                debug!(response_len = line.len(), "Sending response");
                sink.send(line).await?;
            }
            Ok::<(), anyhow::Error>(())
        });

        let mut lines = FramedRead::new(reader, LinesCodec::new());
        while let Some(line) = lines.next().await {
            let line = line.context("Failed to read request line")?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => server.dispatch(request, &tx),
                Err(e) => {
                    error!(error = %e, "Failed to parse JSON-RPC request");
                    let response =
                        JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e.to_string()));
                    if tx.send(response).is_err() {
                        warn!("Response writer stopped");
                    }
                }
            }
        }

        info!("Input closed, waiting for in-flight calls");
        drop(tx);
        writer_task.await.context("Response writer panicked")??;
        Ok(())
    }

    fn in_flight(&self) -> MutexGuard<'_, HashMap<String, AbortHandle>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(self: &Arc<Self>, request: JsonRpcRequest, tx: &mpsc::UnboundedSender<JsonRpcResponse>) {
        if request.is_notification() {
            self.handle_notification(&request);
            return;
        }

        let key = request.id.as_ref().map(Value::to_string).unwrap_or_default();
        let server = Arc::clone(self);
        let tx = tx.clone();

        // Held across the spawn so the task cannot untrack itself before it is tracked
        let mut in_flight = self.in_flight();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let response = server.handle_request(request).await;
            server.in_flight().remove(&task_key);
            if tx.send(response).is_err() {
                warn!("Response writer stopped");
            }
        });
        in_flight.insert(key, handle.abort_handle());
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => debug!("Client initialized"),
            "notifications/cancelled" => {
                let params = request.params.clone().unwrap_or(Value::Null);
                match serde_json::from_value::<CancelledParams>(params) {
                    Ok(params) => self.cancel(&params.request_id, params.reason.as_deref()),
                    Err(e) => warn!(error = %e, "Malformed cancellation notification"),
                }
            }
            other => debug!(method = %other, "Ignoring notification"),
        }
    }

    /// Abort an in-flight request. Its response is never sent.
    fn cancel(&self, request_id: &Value, reason: Option<&str>) {
        match self.in_flight().remove(&request_id.to_string()) {
            Some(handle) => {
                handle.abort();
                info!(request_id = %request_id, reason = reason.unwrap_or("none"), "Request cancelled");
            }
            None => debug!(request_id = %request_id, "Cancellation for a finished request"),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        debug!(method = %request.method, "Handling MCP request");

        match request.method.as_str() {
            "initialize" => self.initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::from_result(
                id,
                &ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = match serde_json::from_value(params.unwrap_or(Value::Null)) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e)),
                )
            }
        };

        info!(
            client = %params.client_info.name,
            client_version = %params.client_info.version,
            protocol_version = %params.protocol_version,
            "Client connected"
        );

        let result = InitializeResult {
            protocol_version: negotiate_protocol_version(&params.protocol_version).to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "expenselm".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };
        JsonRpcResponse::from_result(id, &result)
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params.unwrap_or(Value::Null)) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                )
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            );
        };

        let arguments = if params.arguments.is_null() {
            json!({})
        } else {
            params.arguments
        };

        info!(tool = %params.name, "Executing tool");

        let result = match tool.execute(arguments).await {
            Ok(result) => result,
            Err(e) => {
                let message = format!("{:#}", e);
                error!(tool = %params.name, error = %message, "Tool execution failed");
                CallToolResult::error(message)
            }
        };
        JsonRpcResponse::from_result(id, &result)
    }
}
