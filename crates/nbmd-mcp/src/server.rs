// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! [`NbmdMcpServer`]: the rmcp [`ServerHandler`] implementation.
//!
//! Implements `tools/list` and `tools/call` over a [`ToolRegistry`] and
//! announces itself as [`SERVER_NAME`] during `initialize`.  Shutdown and
//! ping use the rmcp defaults.  No state is carried between calls.

use std::sync::Arc;

use nbmd_tools::{ToolCall, ToolRegistry};
use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    ErrorData as McpError,
};
use tracing::debug;
use uuid::Uuid;

use crate::bridge::{output_to_call_result, schema_to_mcp_tool};

/// Name reported in the `initialize` response.
pub const SERVER_NAME: &str = "notebook-convert-mcp";

const INSTRUCTIONS: &str = "Converts between Jupyter notebooks and Markdown. \
    `convert_notebook` turns a .ipynb file into a .md file with fenced python code blocks; \
    outputs are dropped. `convert_markdown` turns a .md or .markdown file back into a .ipynb \
    notebook. Both take `source_path` and `output_dir` and return a JSON status object.";

/// nbmd MCP server. Wraps a [`ToolRegistry`] and speaks the MCP protocol.
///
/// Create with [`NbmdMcpServer::new`] and then call [`rmcp::ServiceExt::serve`]
/// to start serving on a transport.
#[derive(Clone)]
pub struct NbmdMcpServer {
    registry: Arc<ToolRegistry>,
}

impl NbmdMcpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

impl ServerHandler for NbmdMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(INSTRUCTIONS.to_string()),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let registry = self.registry.clone();
        async move {
            let tools = registry
                .schemas()
                .into_iter()
                .map(schema_to_mcp_tool)
                .collect();
            Ok(ListToolsResult {
                tools,
                next_cursor: None,
                meta: None,
            })
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(|m| serde_json::Value::Object(m.into_iter().collect()))
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let call = ToolCall {
            id: Uuid::new_v4().to_string(),
            name: request.name.to_string(),
            args,
        };
        debug!(id = %call.id, tool = %call.name, "tools/call");

        let output = self.registry.execute(&call).await;
        Ok(output_to_call_result(output))
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
//
// list_tools / call_tool need a live RequestContext; they are covered by
// tests/integration.rs.
