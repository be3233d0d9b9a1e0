// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! Jupyter `.ipynb` codec.
//!
//! Reading goes through the `nbformat` crate, which validates the document
//! and upgrades 4.0–4.4 notebooks to 4.5.  nbformat 3 documents, which the
//! crate does not model, are read by [`v3`].  Only the cell kinds and their
//! source text are kept.
//!
//! Writing produces a minimal nbformat 4.5 document in the layout Jupyter
//! itself writes: one-space indentation, sorted keys, sources split into
//! line arrays, and a trailing newline.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cell::{Cell, Notebook};
use crate::error::NotebookError;

mod v3;

const NBFORMAT: u32 = 4;
const NBFORMAT_MINOR: u32 = 5;

/// Parse `.ipynb` JSON into a [`Notebook`].
pub fn parse_ipynb(json: &str) -> Result<Notebook, NotebookError> {
    let notebook = match nbformat::parse_notebook(json) {
        Ok(nbformat::Notebook::V4(notebook)) => notebook,
        Ok(nbformat::Notebook::Legacy(legacy)) => nbformat::upgrade_legacy_notebook(legacy)
            .map_err(|e| NotebookError::Upgrade(e.to_string()))?,
        Err(nbformat::NotebookError::UnsupportedVersion(3, _)) => return v3::parse(json),
        Err(e) => return Err(e.into()),
    };

    Ok(notebook.cells.iter().map(cell_from_v4).collect())
}

fn cell_from_v4(cell: &nbformat::v4::Cell) -> Cell {
    use nbformat::v4::Cell as V4;
    match cell {
        V4::Markdown { source, .. } => Cell::markdown(source.join("")),
        V4::Code { source, .. } => Cell::code(source.join("")),
        V4::Raw { source, .. } => Cell::raw(source.join("")),
    }
}

#[derive(Serialize)]
struct IpynbDocument {
    cells: Vec<IpynbCell>,
    metadata: Map<String, Value>,
    nbformat: u32,
    nbformat_minor: u32,
}

// Variant fields are declared in alphabetical order; the `cell_type` tag is
// written first, which is also where it sorts.
#[derive(Serialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
enum IpynbCell {
    Code {
        execution_count: Option<u32>,
        id: String,
        metadata: Map<String, Value>,
        outputs: Vec<Value>,
        source: Vec<String>,
    },
    Markdown {
        id: String,
        metadata: Map<String, Value>,
        source: Vec<String>,
    },
    Raw {
        id: String,
        metadata: Map<String, Value>,
        source: Vec<String>,
    },
}

impl From<&Cell> for IpynbCell {
    fn from(cell: &Cell) -> Self {
        let id = new_cell_id();
        let source = split_source(cell.source());
        match cell {
            Cell::Code { .. } => Self::Code {
                execution_count: None,
                id,
                metadata: Map::new(),
                outputs: Vec::new(),
                source,
            },
            Cell::Markdown(_) => Self::Markdown {
                id,
                metadata: Map::new(),
                source,
            },
            Cell::Raw(_) => Self::Raw {
                id,
                metadata: Map::new(),
                source,
            },
        }
    }
}

/// Render a [`Notebook`] as nbformat 4.5 JSON.
pub fn to_ipynb_string(notebook: &Notebook) -> Result<String, NotebookError> {
    let document = IpynbDocument {
        cells: notebook.cells.iter().map(IpynbCell::from).collect(),
        metadata: Map::new(),
        nbformat: NBFORMAT,
        nbformat_minor: NBFORMAT_MINOR,
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;
    buf.push(b'\n');

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Jupyter stores multi-line sources as a list of lines, each keeping its
/// trailing newline.
fn split_source(source: &str) -> Vec<String> {
    source.split_inclusive('\n').map(str::to_string).collect()
}

/// Eight hex digits, the shape Jupyter uses for fresh cell ids.
fn new_cell_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
