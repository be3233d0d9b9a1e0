// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! `nbmd-core`: Jupyter notebook ⇄ Markdown transcoding.
//!
//! Two stateless directions share one cell model:
//!
//! - [`notebook_to_markdown`] walks the cells and emits fenced code blocks and
//!   plain text, separating adjacent text cells with [`BOUNDARY_MARKER`];
//! - [`markdown_to_notebook`] splits on those markers and scans each section
//!   for fenced blocks.
//!
//! [`convert_ipynb_to_md`] and [`convert_md_to_ipynb`] wrap both directions
//! with path validation and `.ipynb` file I/O, and always return a
//! [`ConversionResult`].

mod cell;
mod convert;
mod error;
mod markdown;
mod parse;
mod result;
pub mod ipynb;

pub use cell::{Cell, CellCounts, CellKind, Notebook, BOUNDARY_MARKER, DEFAULT_LANGUAGE, FENCE};
pub use convert::{convert_ipynb_to_md, convert_md_to_ipynb, SourceKind};
pub use error::{ConvertError, NotebookError};
pub use markdown::{notebook_to_markdown, notebook_to_markdown_with, SerializeOptions, Serialized};
pub use parse::{markdown_to_notebook, Parsed};
pub use result::{ConversionResult, Status};
