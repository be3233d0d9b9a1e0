// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use async_trait::async_trait;
use nbmd_core::convert_md_to_ipynb;
use serde_json::Value;
use tracing::debug;

use crate::tool::{Tool, ToolCall, ToolOutput};

use super::{paths_schema, required_paths, run_blocking};

/// `.md` / `.markdown` → `.ipynb`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertMarkdownTool;

#[async_trait]
impl Tool for ConvertMarkdownTool {
    fn name(&self) -> &str {
        "convert_markdown"
    }

    fn description(&self) -> &str {
        "Convert a Markdown (.md) file to a Jupyter Notebook (.ipynb). \
         Code blocks become code cells, everything else becomes markdown cells."
    }

    fn parameters_schema(&self) -> Value {
        paths_schema("Full path to the .md file to convert")
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let (source, output_dir) = match required_paths(call) {
            Ok(paths) => paths,
            Err(out) => return out,
        };
        debug!(source = %source.display(), output_dir = %output_dir.display(), "convert_markdown tool");

        run_blocking(call, move || convert_md_to_ipynb(&source, &output_dir)).await
    }
}
