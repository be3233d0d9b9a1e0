// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use async_trait::async_trait;
use serde_json::Value;

use nbmd_core::ConversionResult;

/// A single tool invocation requested by a client.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Opaque identifier for tracing (forwarded verbatim)
    pub id: String,
    pub name: String,
    /// Parsed JSON arguments
    pub args: Value,
}

/// The result of executing a tool.
///
/// `content` is the text handed back to the client; for the conversion tools
/// it is always a JSON-encoded [`ConversionResult`].
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub call_id: String,
    pub content: String,
    /// If true, the tool execution failed non-fatally (content explains why).
    pub is_error: bool,
}

impl ToolOutput {
    /// Encode a conversion outcome; `is_error` mirrors its status.
    pub fn from_result(call_id: impl Into<String>, result: &ConversionResult) -> Self {
        Self {
            call_id: call_id.into(),
            content: result.to_json(),
            is_error: result.is_error(),
        }
    }
}

/// Trait that every tool exposed by the server must implement.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// JSON Schema for parameters
    fn parameters_schema(&self) -> Value;
    /// Execute the tool.  Failures are reported through the output with
    /// `is_error` set, never as a panic.
    async fn execute(&self, call: &ToolCall) -> ToolOutput;
}
