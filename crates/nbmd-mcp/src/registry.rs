// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! Tool registry served by `nbmd serve`.

use std::collections::HashSet;

use nbmd_core::SerializeOptions;
use nbmd_tools::{ConvertMarkdownTool, ConvertNotebookTool, ToolRegistry};
use tracing::warn;

/// Every tool the server can expose, sorted.
pub const DEFAULT_TOOL_NAMES: &[&str] = &["convert_markdown", "convert_notebook"];

/// Build a [`ToolRegistry`] holding the conversion tools.
///
/// `options` controls the Markdown written by `convert_notebook`.
///
/// `allowed_names` is an optional comma-separated list of tool names to
/// include.  Pass `"all"` (or `None`) to include every tool.  Names not in
/// [`DEFAULT_TOOL_NAMES`] are ignored with a warning.
pub fn build_mcp_registry(options: SerializeOptions, allowed_names: Option<&str>) -> ToolRegistry {
    let filter: Option<HashSet<&str>> = match allowed_names.map(str::trim) {
        None | Some("all") => None,
        Some(list) => Some(list.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).collect()),
    };

    if let Some(set) = &filter {
        for name in set.iter().filter(|n| !DEFAULT_TOOL_NAMES.contains(*n)) {
            warn!(tool = %name, "ignoring unknown tool name in filter");
        }
    }

    let allow = |name: &str| -> bool {
        match &filter {
            None => true,
            Some(set) => set.contains(name),
        }
    };

    let mut reg = ToolRegistry::new();

    if allow("convert_markdown") {
        reg.register(ConvertMarkdownTool);
    }
    if allow("convert_notebook") {
        reg.register(ConvertNotebookTool::new(options));
    }

    reg
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
