// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

/// Sentinel line placed between two adjacent non-code cells so that a
/// Markdown round trip keeps them apart.  Both directions must agree on it
/// byte for byte.
pub const BOUNDARY_MARKER: &str = "<!-- NOTEBOOK_CELL_BOUNDARY -->";

/// Code fence delimiter.
pub const FENCE: &str = "```";

/// Language assumed for a fenced block without a tag, and the only tag the
/// serializer ever writes.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Discriminant of a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Markdown,
    Code,
    Raw,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Code => "code",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of a notebook document.
///
/// Only the source text survives; outputs, execution counts, attachments and
/// cell metadata are dropped on the way in and never produced on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Markdown(String),
    Code {
        source: String,
        /// Tag of a fenced block in another language.  `None` means
        /// [`DEFAULT_LANGUAGE`].
        language: Option<String>,
    },
    Raw(String),
}

impl Cell {
    pub fn markdown(source: impl Into<String>) -> Self {
        Self::Markdown(source.into())
    }

    pub fn code(source: impl Into<String>) -> Self {
        Self::Code {
            source: source.into(),
            language: None,
        }
    }

    pub fn code_in(source: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Code {
            source: source.into(),
            language: Some(language.into()),
        }
    }

    pub fn raw(source: impl Into<String>) -> Self {
        Self::Raw(source.into())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Self::Markdown(_) => CellKind::Markdown,
            Self::Code { .. } => CellKind::Code,
            Self::Raw(_) => CellKind::Raw,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Markdown(s) | Self::Raw(s) => s,
            Self::Code { source, .. } => source,
        }
    }

    /// Language of a code cell (defaulting to `python`); `None` for text cells.
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::Code { language, .. } => Some(language.as_deref().unwrap_or(DEFAULT_LANGUAGE)),
            _ => None,
        }
    }

    /// Empty or whitespace-only cells are counted but never emitted.
    pub fn is_blank(&self) -> bool {
        self.source().trim().is_empty()
    }
}

/// Ordered cell sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    pub cells: Vec<Cell>,
}

impl Notebook {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn counts(&self) -> CellCounts {
        self.cells.iter().map(Cell::kind).collect()
    }
}

impl FromIterator<Cell> for Notebook {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Per-kind cell tally reported with every successful conversion.
///
/// All three keys are always present in the serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub markdown: usize,
    pub code: usize,
    pub raw: usize,
}

impl CellCounts {
    pub fn record(&mut self, kind: CellKind) {
        *self.slot(kind) += 1;
    }

    pub fn get(&self, kind: CellKind) -> usize {
        match kind {
            CellKind::Markdown => self.markdown,
            CellKind::Code => self.code,
            CellKind::Raw => self.raw,
        }
    }

    pub fn total(&self) -> usize {
        self.markdown + self.code + self.raw
    }

    fn slot(&mut self, kind: CellKind) -> &mut usize {
        match kind {
            CellKind::Markdown => &mut self.markdown,
            CellKind::Code => &mut self.code,
            CellKind::Raw => &mut self.raw,
        }
    }
}

impl FromIterator<CellKind> for CellCounts {
    fn from_iter<I: IntoIterator<Item = CellKind>>(iter: I) -> Self {
        let mut counts = Self::default();
        for kind in iter {
            counts.record(kind);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_cell_defaults_to_python() {
        assert_eq!(Cell::code("x = 1").language(), Some("python"));
        assert_eq!(Cell::code_in("fn main() {}", "rust").language(), Some("rust"));
        assert_eq!(Cell::markdown("# hi").language(), None);
    }

    #[test]
    fn whitespace_only_cell_is_blank() {
        assert!(Cell::code("   \n\t").is_blank());
        assert!(Cell::raw("").is_blank());
        assert!(!Cell::markdown(" a ").is_blank());
    }

    #[test]
    fn counts_cover_every_kind() {
        let nb = Notebook::new(vec![
            Cell::markdown("a"),
            Cell::code(""),
            Cell::code("x"),
            Cell::raw("r"),
        ]);
        let counts = nb.counts();
        assert_eq!(counts.get(CellKind::Markdown), 1);
        assert_eq!(counts.get(CellKind::Code), 2);
        assert_eq!(counts.get(CellKind::Raw), 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn counts_serialize_with_all_keys() {
        let json = serde_json::to_value(CellCounts::default()).unwrap();
        assert_eq!(json, serde_json::json!({"markdown": 0, "code": 0, "raw": 0}));
    }

    #[test]
    fn kind_display_matches_serde_name() {
        for kind in [CellKind::Markdown, CellKind::Code, CellKind::Raw] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str(), Some(kind.to_string().as_str()));
        }
    }
}
