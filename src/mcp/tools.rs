//! MCP tool definitions and dispatch
//!
//! One tool per wrapped bedtools subcommand. Argument schemas mirror the
//! bedtools flags each tool forwards.

use crate::bedtools::{BedtoolsRunner, IntersectArgs, MergeArgs, SortArgs};
use crate::mcp::protocol::{CallToolResult, Tool, ToolContent};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: "bedtools_intersect".to_string(),
            description: "Find overlapping intervals between two files".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "input_file_a": {
                        "type": "string",
                        "description": "Path to first input file (BED/GFF/VCF)"
                    },
                    "input_file_b": {
                        "type": "string",
                        "description": "Path to second input file (BED/GFF/VCF)"
                    },
                    "write_a": {
                        "type": "boolean",
                        "description": "Write the original entry in A for each overlap",
                        "default": false
                    },
                    "write_b": {
                        "type": "boolean",
                        "description": "Write the original entry in B for each overlap",
                        "default": false
                    },
                    "write_overlap": {
                        "type": "boolean",
                        "description": "Write the amount of overlap between features",
                        "default": false
                    }
                },
                "required": ["input_file_a", "input_file_b"]
            }),
        },
        Tool {
            name: "bedtools_merge".to_string(),
            description: "Merge overlapping or nearby intervals".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "input_file": {
                        "type": "string",
                        "description": "Path to input BED file"
                    },
                    "distance": {
                        "type": "integer",
                        "description": "Maximum distance between features for merging",
                        "default": 0
                    }
                },
                "required": ["input_file"]
            }),
        },
        Tool {
            name: "bedtools_sort".to_string(),
            description: "Sort BED/GFF/VCF files by chromosome and position".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "input_file": {
                        "type": "string",
                        "description": "Path to input file"
                    }
                },
                "required": ["input_file"]
            }),
        },
    ]
}

/// Call a tool by name
pub async fn call_tool(
    name: &str,
    arguments: Option<Value>,
    runner: Arc<BedtoolsRunner>,
) -> CallToolResult {
    let args = arguments.unwrap_or(Value::Null);

    match name {
        "bedtools_intersect" => handle_intersect(args, runner).await,
        "bedtools_merge" => handle_merge(args, runner).await,
        "bedtools_sort" => handle_sort(args, runner).await,
        _ => error_result(format!("Unknown tool: {}", name)),
    }
}

fn error_result(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![ToolContent::Text { text }],
        is_error: Some(true),
    }
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![ToolContent::Text { text }],
        is_error: None,
    }
}

async fn handle_intersect(args: Value, runner: Arc<BedtoolsRunner>) -> CallToolResult {
    let args: IntersectArgs = match serde_json::from_value(args) {
        Ok(a) => a,
        Err(e) => return error_result(format!("Invalid arguments: {}", e)),
    };

    match runner.intersect(&args).await {
        Ok(output) => text_result(output),
        Err(e) => {
            error!("bedtools intersect error: {}", e);
            error_result(e.to_string())
        }
    }
}

async fn handle_merge(args: Value, runner: Arc<BedtoolsRunner>) -> CallToolResult {
    let args: MergeArgs = match serde_json::from_value(args) {
        Ok(a) => a,
        Err(e) => return error_result(format!("Invalid arguments: {}", e)),
    };

    match runner.merge(&args).await {
        Ok(output) => text_result(output),
        Err(e) => {
            error!("bedtools merge error: {}", e);
            error_result(e.to_string())
        }
    }
}

async fn handle_sort(args: Value, runner: Arc<BedtoolsRunner>) -> CallToolResult {
    let args: SortArgs = match serde_json::from_value(args) {
        Ok(a) => a,
        Err(e) => return error_result(format!("Invalid arguments: {}", e)),
    };

    match runner.sort(&args).await {
        Ok(output) => text_result(output),
        Err(e) => {
            error!("bedtools sort error: {}", e);
            error_result(e.to_string())
        }
    }
}
