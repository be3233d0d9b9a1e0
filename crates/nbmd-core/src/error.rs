// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use thiserror::Error;

/// The `.ipynb` document could not be turned into cells (or back).
#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("{0}")]
    Format(#[from] nbformat::NotebookError),

    #[error("could not upgrade notebook to nbformat 4.5: {0}")]
    Upgrade(String),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of a file-level conversion.  Each one ends up as the `message`
/// of an error [`crate::ConversionResult`].
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Source file must be {expected}, got: {found}")]
    InvalidType {
        expected: &'static str,
        found: String,
    },

    #[error("could not read notebook '{}': {source}", .path.display())]
    Notebook {
        path: PathBuf,
        #[source]
        source: NotebookError,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
