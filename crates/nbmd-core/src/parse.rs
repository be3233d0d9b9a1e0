// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! Markdown → Notebook parser.
//!
//! The input is first split on [`BOUNDARY_MARKER`] into sections.  Each
//! section is scanned line by line for fenced code blocks; the fenced bodies
//! become code cells and the text around them becomes markdown cells.
//!
//! Fence rules:
//! - an opening fence is a line starting with ```` ``` ```` in column 0,
//!   optionally followed by a single word (the language tag);
//! - a closing fence is a line starting with ```` ``` ```` in column 0 with
//!   nothing but whitespace after it;
//! - the first closing fence after an opening one ends the block.
//!
//! A fence that is never closed does not produce a code cell: the opening
//! line and everything after it stay in the surrounding markdown text.

use std::borrow::Cow;

use tracing::debug;

use crate::cell::{Cell, CellCounts, Notebook, BOUNDARY_MARKER, DEFAULT_LANGUAGE, FENCE};

/// Cells recovered from a Markdown document, with their tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub notebook: Notebook,
    pub counts: CellCounts,
}

/// Parse Markdown text into a notebook.  Never fails and never returns an
/// empty notebook: a document without any content yields one empty code cell.
///
/// `\r\n` and lone `\r` line endings are read as `\n`.
pub fn markdown_to_notebook(text: &str) -> Parsed {
    let text = normalize_newlines(text);
    let text: &str = &text;
    let mut cells = Vec::new();
    let mut sections = 0usize;

    for section in text.split(BOUNDARY_MARKER) {
        if section.trim().is_empty() {
            continue;
        }
        sections += 1;
        parse_section(section, &mut cells);
    }

    if cells.is_empty() {
        let trimmed = text.trim();
        cells.push(if trimmed.is_empty() {
            Cell::code("")
        } else {
            Cell::markdown(trimmed)
        });
    }

    let notebook = Notebook::new(cells);
    let counts = notebook.counts();
    debug!(sections, cells = counts.total(), "parsed markdown into notebook");

    Parsed { notebook, counts }
}

enum ScanState<'a> {
    InText,
    InFence {
        /// The opening line, kept so an unterminated block can fall back to text.
        open: &'a str,
        language: Option<&'a str>,
        body: String,
    },
}

fn parse_section(section: &str, cells: &mut Vec<Cell>) {
    let mut text = String::new();
    let mut state = ScanState::InText;

    for line in section.split_inclusive('\n') {
        let bare = line.trim_end_matches('\n');
        state = match state {
            ScanState::InText => match fence_open(bare) {
                Some(language) => ScanState::InFence {
                    open: line,
                    language,
                    body: String::new(),
                },
                None => {
                    text.push_str(line);
                    ScanState::InText
                }
            },
            ScanState::InFence {
                open,
                language,
                mut body,
            } => {
                if is_fence_close(bare) {
                    flush_markdown(&mut text, cells);
                    push_code(&body, language, cells);
                    ScanState::InText
                } else {
                    body.push_str(line);
                    ScanState::InFence {
                        open,
                        language,
                        body,
                    }
                }
            }
        };
    }

    if let ScanState::InFence { open, body, .. } = state {
        debug!(fence = open.trim_end(), "unterminated code fence kept as text");
        text.push_str(open);
        text.push_str(&body);
    }
    flush_markdown(&mut text, cells);
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Recognise an opening fence.  `Some(None)` is an untagged fence,
/// `Some(Some(tag))` a tagged one, `None` not a fence at all.
fn fence_open(line: &str) -> Option<Option<&str>> {
    let tag = line.strip_prefix(FENCE)?.trim_end();
    if tag.is_empty() {
        Some(None)
    } else if tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(Some(tag))
    } else {
        None
    }
}

fn is_fence_close(line: &str) -> bool {
    line.strip_prefix(FENCE)
        .is_some_and(|rest| rest.trim().is_empty())
}

fn flush_markdown(text: &mut String, cells: &mut Vec<Cell>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        cells.push(Cell::markdown(trimmed));
    }
    text.clear();
}

fn push_code(body: &str, language: Option<&str>, cells: &mut Vec<Cell>) {
    let code = body.trim();
    if code.is_empty() {
        return;
    }
    let cell = match language {
        Some(tag) if !tag.eq_ignore_ascii_case(DEFAULT_LANGUAGE) => {
            Cell::code_in(format!("# Language: {tag}\n{code}"), tag)
        }
        _ => Cell::code(code),
    };
    cells.push(cell);
}
