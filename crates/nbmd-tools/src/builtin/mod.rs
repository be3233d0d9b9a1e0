// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
pub mod convert_markdown;
pub mod convert_notebook;

use std::path::PathBuf;

use nbmd_core::ConversionResult;
use serde_json::{json, Value};

use crate::tool::{ToolCall, ToolOutput};

const MISSING_ARGS: &str =
    "Error occurred during tool execution: source_path and output_dir are required arguments.";

/// Parameter schema shared by both conversion tools.
fn paths_schema(source_description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "source_path": {
                "type": "string",
                "description": source_description
            },
            "output_dir": {
                "type": "string",
                "description": "Directory to write the converted file to (created if missing)"
            }
        },
        "required": ["source_path", "output_dir"],
        "additionalProperties": false
    })
}

/// Pull `source_path` and `output_dir` out of the call.  Absent, non-string
/// and empty values are all treated as missing.
fn required_paths(call: &ToolCall) -> Result<(PathBuf, PathBuf), ToolOutput> {
    let arg = |key: &str| {
        call.args
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    };
    match (arg("source_path"), arg("output_dir")) {
        (Some(source), Some(output)) => Ok((source, output)),
        _ => Err(ToolOutput::from_result(
            &call.id,
            &ConversionResult::error(MISSING_ARGS),
        )),
    }
}

/// Run a synchronous conversion on the blocking pool.
async fn run_blocking<F>(call: &ToolCall, job: F) -> ToolOutput
where
    F: FnOnce() -> ConversionResult + Send + 'static,
{
    let result = match tokio::task::spawn_blocking(job).await {
        Ok(result) => result,
        Err(e) => ConversionResult::error(format!(
            "Error occurred during tool execution: {e}"
        )),
    };
    ToolOutput::from_result(&call.id, &result)
}
