// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use async_trait::async_trait;
use nbmd_core::{convert_ipynb_to_md, SerializeOptions};
use serde_json::Value;
use tracing::debug;

use crate::tool::{Tool, ToolCall, ToolOutput};

use super::{paths_schema, required_paths, run_blocking};

/// `.ipynb` → `.md`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertNotebookTool {
    pub options: SerializeOptions,
}

impl ConvertNotebookTool {
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Tool for ConvertNotebookTool {
    fn name(&self) -> &str {
        "convert_notebook"
    }

    fn description(&self) -> &str {
        "Convert a Jupyter Notebook (.ipynb) file to clean Markdown (.md). \
         Code execution results are excluded."
    }

    fn parameters_schema(&self) -> Value {
        paths_schema("Full path to the .ipynb file to convert")
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let (source, output_dir) = match required_paths(call) {
            Ok(paths) => paths,
            Err(out) => return out,
        };
        debug!(source = %source.display(), output_dir = %output_dir.display(), "convert_notebook tool");

        let options = self.options;
        run_blocking(call, move || convert_ipynb_to_md(&source, &output_dir, &options)).await
    }
}
