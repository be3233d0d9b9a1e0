// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! nbformat 3 reader.
//!
//! v3 keeps its cells inside `worksheets`, names the code cell body `input`
//! and has a separate `heading` cell type.  Upgrading flattens the
//! worksheets, turns headings into `#`-prefixed markdown and keeps only what
//! the v4 path keeps: cell kinds and source text.

use serde::Deserialize;

use crate::cell::{Cell, Notebook};
use crate::error::NotebookError;

#[derive(Deserialize)]
struct V3Notebook {
    #[serde(default)]
    worksheets: Vec<Worksheet>,
}

#[derive(Deserialize)]
struct Worksheet {
    #[serde(default)]
    cells: Vec<V3Cell>,
}

#[derive(Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
enum V3Cell {
    Heading {
        #[serde(default = "default_level")]
        level: usize,
        #[serde(default)]
        source: Text,
    },
    Markdown {
        #[serde(default)]
        source: Text,
    },
    Code {
        #[serde(default)]
        input: Text,
    },
    Raw {
        #[serde(default)]
        source: Text,
    },
}

fn default_level() -> usize {
    1
}

/// Multi-line text stored either as one string or as a list of lines.
#[derive(Deserialize, Default)]
#[serde(untagged)]
enum Text {
    #[default]
    Empty,
    One(String),
    Lines(Vec<String>),
}

impl Text {
    fn joined(self) -> String {
        match self {
            Text::Empty => String::new(),
            Text::One(s) => s,
            Text::Lines(lines) => lines.concat(),
        }
    }
}

impl From<V3Cell> for Cell {
    fn from(cell: V3Cell) -> Self {
        match cell {
            V3Cell::Heading { level, source } => {
                let text = source.joined();
                let line = text.lines().collect::<Vec<_>>().join(" ");
                Cell::markdown(format!("{} {line}", "#".repeat(level.max(1))).trim_end())
            }
            V3Cell::Markdown { source } => Cell::markdown(source.joined()),
            V3Cell::Code { input } => Cell::code(input.joined()),
            V3Cell::Raw { source } => Cell::raw(source.joined()),
        }
    }
}

/// Read a v3 document, upgrading its cells to the v4 cell model.
pub(super) fn parse(json: &str) -> Result<Notebook, NotebookError> {
    let v3: V3Notebook = serde_json::from_str(json)?;
    Ok(v3
        .worksheets
        .into_iter()
        .flat_map(|w| w.cells)
        .map(Cell::from)
        .collect())
}
