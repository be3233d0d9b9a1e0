// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! Notebook → Markdown serializer.
//!
//! Output grammar:
//!
//! ````text
//! ```python           ← every code cell, whatever its original language
//! <code>
//! ```
//!                     ← one blank line after each emitted cell
//! <markdown or raw text>
//!
//! <!-- NOTEBOOK_CELL_BOUNDARY -->   ← only between adjacent non-code cells
//! ````
//!
//! Blank cells are counted but produce nothing, and trailing blank lines are
//! trimmed from the finished document.

use tracing::debug;

use crate::cell::{Cell, CellCounts, CellKind, Notebook, BOUNDARY_MARKER, FENCE};

const FENCE_OPEN: &str = "```python";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Insert [`BOUNDARY_MARKER`] lines between adjacent non-code cells.
    pub boundary_markers: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            boundary_markers: true,
        }
    }
}

/// Markdown text plus the tally of every cell that was walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serialized {
    pub text: String,
    pub counts: CellCounts,
}

/// Serialize with default options (boundary markers on).
pub fn notebook_to_markdown(notebook: &Notebook) -> Serialized {
    notebook_to_markdown_with(notebook, &SerializeOptions::default())
}

pub fn notebook_to_markdown_with(notebook: &Notebook, options: &SerializeOptions) -> Serialized {
    let mut pieces: Vec<&str> = Vec::new();
    let mut counts = CellCounts::default();
    let mut cells = notebook.cells.iter().peekable();

    while let Some(cell) = cells.next() {
        counts.record(cell.kind());
        if cell.is_blank() {
            continue;
        }
        match cell {
            Cell::Code { source, .. } => {
                pieces.extend([FENCE_OPEN, source.as_str(), FENCE, ""]);
            }
            Cell::Markdown(text) | Cell::Raw(text) => {
                pieces.push(text);
                let next = cells.peek().map(|c| c.kind());
                if options.boundary_markers && needs_boundary(cell.kind(), next) {
                    pieces.extend(["", BOUNDARY_MARKER]);
                }
                pieces.push("");
            }
        }
    }

    while pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }

    debug!(
        cells = counts.total(),
        pieces = pieces.len(),
        "serialized notebook to markdown"
    );

    Serialized {
        text: pieces.join("\n"),
        counts,
    }
}

/// Whether `current` and the cell after it would run together as one span of
/// text without a marker.
fn needs_boundary(current: CellKind, next: Option<CellKind>) -> bool {
    matches!(
        (current, next),
        (CellKind::Markdown, Some(CellKind::Markdown))
            | (CellKind::Raw, Some(CellKind::Markdown | CellKind::Raw))
    )
}
