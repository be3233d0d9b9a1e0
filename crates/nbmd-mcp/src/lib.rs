// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! `nbmd-mcp`: MCP (Model Context Protocol) server for nbmd.
//!
//! Exposes the two conversion tools to any MCP-compatible host over
//! **stdio** transport using line-delimited JSON-RPC.
//!
//! # Quick start
//!
//! ```text
//! nbmd serve
//! ```
//!
//! # MCP client configuration (`mcp.json`)
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "nbmd": {
//!       "command": "nbmd",
//!       "args": ["serve"]
//!     }
//!   }
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! MCP client
//!       │  stdin/stdout (line-delimited JSON-RPC)
//!       ▼
//! NbmdMcpServer (rmcp ServerHandler)
//!       │
//!       ▼
//! ToolRegistry  ──►  convert_notebook / convert_markdown
//! ```
//!
//! Every tool result is a JSON-encoded conversion result carried as a single
//! text content item; `isError` mirrors its `status`.

pub mod bridge;
pub mod registry;
pub mod server;

pub use registry::{build_mcp_registry, DEFAULT_TOOL_NAMES};
pub use server::{NbmdMcpServer, SERVER_NAME};

use std::sync::Arc;

use anyhow::Result;
use nbmd_tools::ToolRegistry;
use rmcp::ServiceExt;
use tracing::info;

/// Start an MCP stdio server, serving the tools in `registry` on
/// `stdin` / `stdout`.
///
/// Blocks until the client disconnects (stdin EOF) or the process is
/// terminated.
///
/// # Errors
///
/// Returns an error if the rmcp transport fails to initialize or if the
/// server encounters a fatal I/O error.
pub async fn serve_stdio(registry: Arc<ToolRegistry>) -> Result<()> {
    info!(tools = ?registry.names(), "starting MCP server on stdio");
    let server = NbmdMcpServer::new(registry);
    let running = server
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await
        .map_err(|e| anyhow::anyhow!("MCP server init error: {e}"))?;
    running
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))?;
    info!("MCP client disconnected");
    Ok(())
}
