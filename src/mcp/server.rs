//! MCP server implementation
//!
//! Implements the Model Context Protocol server that exposes bedtools
//! subcommands as MCP tools via stdio.

use crate::bedtools::BedtoolsRunner;
use crate::mcp::protocol::*;
use crate::mcp::tools;
use anyhow::Result;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

pub struct McpServer {
    runner: Arc<BedtoolsRunner>,
    initialized: Arc<Mutex<bool>>,
}

impl McpServer {
    pub fn new(runner: Arc<BedtoolsRunner>) -> Self {
        Self {
            runner,
            initialized: Arc::new(Mutex::new(false)),
        }
    }

    /// Run the MCP server (blocking)
    pub async fn run(&self) -> Result<()> {
        info!("MCP server starting on stdio");

        let stdin = std::io::stdin();
        let mut stdin = stdin.lock();
        let mut stdout = std::io::stdout();

        loop {
            // Read newline-delimited JSON
            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) => {
                    info!("Client closed connection");
                    return Ok(());
                }
                Ok(_) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    debug!("Received request: {}", line);

                    // Notifications get no response
                    let Some(response) = self.handle_request(line).await else {
                        continue;
                    };

                    let response_json = serde_json::to_string(&response)?;
                    stdout.write_all(response_json.as_bytes())?;
                    stdout.write_all(b"\n")?;
                    stdout.flush()?;

                    debug!("Sent response");
                }
                Err(e) => {
                    error!("Failed to read line: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    async fn handle_request(&self, content: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(content) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: Value::Null,
                    result: None,
                    error: Some(JsonRpcError {
                        code: PARSE_ERROR,
                        message: format!("Parse error: {}", e),
                        data: None,
                    }),
                });
            }
        };

        // Requests without an id are notifications
        // (e.g. notifications/initialized); consume them silently.
        let id = match request.id {
            Some(id) => id,
            None => {
                debug!("Ignoring notification: {}", request.method);
                return None;
            }
        };

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params).await,
            "tools/list" => self.handle_list_tools().await,
            "tools/call" => self.handle_call_tool(request.params).await,
            _ => Err(JsonRpcError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        };

        Some(match result {
            Ok(result) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(result),
                error: None,
            },
            Err(error) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(error),
            },
        })
    }

    async fn handle_initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let _params: InitializeParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| JsonRpcError {
                code: INVALID_PARAMS,
                message: format!("Invalid initialize params: {}", e),
                data: None,
            })?;

        *self.initialized.lock().await = true;

        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: Some(serde_json::json!({})),
            },
            server_info: ServerInfo {
                name: "bedtools-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError {
            code: INTERNAL_ERROR,
            message: format!("Failed to serialize result: {}", e),
            data: None,
        })
    }

    async fn handle_list_tools(&self) -> Result<Value, JsonRpcError> {
        let result = ListToolsResult {
            tools: tools::get_tool_definitions(),
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError {
            code: INTERNAL_ERROR,
            message: format!("Failed to serialize tools: {}", e),
            data: None,
        })
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        if !*self.initialized.lock().await {
            return Err(JsonRpcError {
                code: INVALID_REQUEST,
                message: "Server not initialized".to_string(),
                data: None,
            });
        }

        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| JsonRpcError {
                code: INVALID_PARAMS,
                message: format!("Invalid tool call params: {}", e),
                data: None,
            })?;

        let result = tools::call_tool(&params.name, params.arguments, Arc::clone(&self.runner)).await;

        serde_json::to_value(result).map_err(|e| JsonRpcError {
            code: INTERNAL_ERROR,
            message: format!("Failed to serialize tool result: {}", e),
            data: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn server() -> McpServer {
        McpServer::new(Arc::new(BedtoolsRunner::new(Settings::default())))
    }

    #[tokio::test]
    async fn test_initialize_reports_tools_capability() {
        let server = server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "bedtools-mcp");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_call_before_initialize_is_rejected() {
        let server = server();
        let response = server
            .handle_request(
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"bedtools_sort","arguments":{"input_file":"/tmp/x.bed"}}}"#,
            )
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error_response() {
        let server = server();
        let response = server.handle_request("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tools_list_without_initialize() {
        // tools/list is allowed pre-initialize; some clients probe first.
        let server = server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 3);
    }
}
