// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! Conversions between nbmd's tool types and rmcp's MCP model types.

use std::borrow::Cow;
use std::sync::Arc;

use nbmd_tools::{ToolOutput, ToolSchema};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool as McpTool};

/// Convert a [`ToolSchema`] into an rmcp [`McpTool`] descriptor.  The
/// parameter schema passes through as `inputSchema`.
pub fn schema_to_mcp_tool(schema: ToolSchema) -> McpTool {
    let input_schema: JsonObject = value_to_object(schema.parameters);
    McpTool::new(
        Cow::Owned(schema.name),
        Cow::Owned(schema.description),
        Arc::new(input_schema),
    )
}

/// MCP requires the schema to be a JSON object; anything else is wrapped in
/// a minimal `{"type":"object"}` envelope.
fn value_to_object(v: serde_json::Value) -> JsonObject {
    use serde_json::{Map, Value};
    match v {
        Value::Object(m) => m,
        other => {
            let mut m = Map::new();
            m.insert("type".to_string(), Value::String("object".to_string()));
            m.insert("value".to_string(), other);
            m
        }
    }
}

/// Convert a [`ToolOutput`] into an rmcp [`CallToolResult`] with a single
/// text item.  `isError` mirrors [`ToolOutput::is_error`].
pub fn output_to_call_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.content)];

    if output.is_error {
        CallToolResult {
            content,
            is_error: Some(true),
            structured_content: None,
            meta: None,
        }
    } else {
        CallToolResult::success(content)
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
