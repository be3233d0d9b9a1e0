// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Serde default helper returning `true`.
///
/// `#[serde(default)]` on a `bool` falls back to `false`, so fields that are
/// on unless switched off need a named function.
fn default_true() -> bool {
    true
}

fn default_tools() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub mcp: McpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Separate adjacent markdown/raw cells with
    /// `<!-- NOTEBOOK_CELL_BOUNDARY -->` lines when writing Markdown.
    /// Turning this off yields plain Markdown, but such cells merge when the
    /// file is converted back.
    #[serde(default = "default_true")]
    pub boundary_markers: bool,
    /// Output directory used by the CLI when `--output-dir` is not given.
    /// When unset, output lands next to the source file.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            boundary_markers: true,
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpConfig {
    /// Comma-separated tool names exposed by `nbmd serve`, or `"all"`.
    #[serde(default = "default_tools")]
    pub tools: String,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            tools: default_tools(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_boundaries_and_all_tools() {
        let cfg = Config::default();
        assert!(cfg.convert.boundary_markers);
        assert!(cfg.convert.output_dir.is_none());
        assert_eq!(cfg.mcp.tools, "all");
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let cfg: Config = toml::from_str("[convert]\noutput_dir = \"out\"").unwrap();
        assert!(cfg.convert.boundary_markers);
        assert_eq!(cfg.convert.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn serializes_back_to_toml() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert!(text.contains("boundary_markers = true"), "{text}");
        assert!(text.contains("tools = \"all\""), "{text}");
    }
}
