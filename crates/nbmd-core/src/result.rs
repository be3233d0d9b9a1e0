// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

use crate::cell::CellCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Outcome of a file-level conversion.
///
/// This is also the exact payload handed back to tool callers, so optional
/// fields are left out of the JSON instead of being written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_counts: Option<CellCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cells: Option<usize>,
}

impl ConversionResult {
    pub fn success(output_path: impl Into<String>, counts: CellCounts) -> Self {
        Self {
            status: Status::Success,
            output_path: Some(output_path.into()),
            message: None,
            cell_counts: Some(counts),
            total_cells: Some(counts.total()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            output_path: None,
            message: Some(message.into()),
            cell_counts: None,
            total_cells: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// Two-space indented JSON, the form tool callers receive.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| encoding_failure(&e))
    }
}

fn encoding_failure(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({
        "status": "error",
        "message": format!("could not encode result: {err}"),
    })
    .to_string()
}
