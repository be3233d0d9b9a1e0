// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! File-level conversions.
//!
//! These are the functions tool callers use: they validate the source path,
//! create the output directory, run the transcoder and write the result.
//! Every failure is caught here and reported as an error
//! [`ConversionResult`]; nothing propagates to the caller.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::cell::CellCounts;
use crate::error::ConvertError;
use crate::ipynb::{parse_ipynb, to_ipynb_string};
use crate::markdown::{notebook_to_markdown_with, SerializeOptions};
use crate::parse::markdown_to_notebook;
use crate::result::ConversionResult;

/// The document kind a conversion reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Notebook,
    Markdown,
}

impl SourceKind {
    /// Accepted extensions, lowercase and without the dot.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Notebook => &["ipynb"],
            Self::Markdown => &["md", "markdown"],
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::Notebook => "a .ipynb file",
            Self::Markdown => "a .md or .markdown file",
        }
    }

    /// Extension of the file a conversion from this kind writes.
    pub fn target_extension(&self) -> &'static str {
        match self {
            Self::Notebook => "md",
            Self::Markdown => "ipynb",
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }
}

/// Convert a `.ipynb` file into `<output_dir>/<stem>.md`.
pub fn convert_ipynb_to_md(
    source_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &SerializeOptions,
) -> ConversionResult {
    let source = source_path.as_ref();
    match ipynb_to_md(source, output_dir.as_ref(), options) {
        Ok((output, counts)) => {
            info!(
                total = counts.total(),
                file = %output.display(),
                "conversion successful"
            );
            ConversionResult::success(output.display().to_string(), counts)
        }
        Err(e) => {
            error!(source = %source.display(), "ipynb conversion failed: {e}");
            ConversionResult::error(e.to_string())
        }
    }
}

/// Convert a `.md` / `.markdown` file into `<output_dir>/<stem>.ipynb`.
pub fn convert_md_to_ipynb(
    source_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> ConversionResult {
    let source = source_path.as_ref();
    match md_to_ipynb(source, output_dir.as_ref()) {
        Ok((output, counts)) => {
            info!(
                total = counts.total(),
                file = %output.display(),
                "conversion successful"
            );
            ConversionResult::success(output.display().to_string(), counts)
        }
        Err(e) => {
            error!(source = %source.display(), "markdown conversion failed: {e}");
            ConversionResult::error(e.to_string())
        }
    }
}

fn ipynb_to_md(
    source: &Path,
    output_dir: &Path,
    options: &SerializeOptions,
) -> Result<(PathBuf, CellCounts), ConvertError> {
    validate_source(source, SourceKind::Notebook)?;
    let output = prepare_output(source, output_dir, SourceKind::Notebook)?;
    info!(source = %display_name(source), "starting conversion to Markdown");

    let json = std::fs::read_to_string(source).map_err(|e| ConvertError::io(source, e))?;
    let notebook = parse_ipynb(&json).map_err(|e| ConvertError::Notebook {
        path: source.to_path_buf(),
        source: e,
    })?;
    let serialized = notebook_to_markdown_with(&notebook, options);

    std::fs::write(&output, serialized.text).map_err(|e| ConvertError::io(&output, e))?;
    Ok((output, serialized.counts))
}

fn md_to_ipynb(source: &Path, output_dir: &Path) -> Result<(PathBuf, CellCounts), ConvertError> {
    validate_source(source, SourceKind::Markdown)?;
    let output = prepare_output(source, output_dir, SourceKind::Markdown)?;
    info!(source = %display_name(source), "starting conversion to Jupyter Notebook");

    let text = std::fs::read_to_string(source).map_err(|e| ConvertError::io(source, e))?;
    let parsed = markdown_to_notebook(&text);
    let json = to_ipynb_string(&parsed.notebook).map_err(|e| ConvertError::Notebook {
        path: output.clone(),
        source: e,
    })?;

    std::fs::write(&output, json).map_err(|e| ConvertError::io(&output, e))?;
    Ok((output, parsed.counts))
}

fn validate_source(source: &Path, kind: SourceKind) -> Result<(), ConvertError> {
    if !source.exists() {
        return Err(ConvertError::NotFound(source.to_path_buf()));
    }
    if !kind.matches(source) {
        return Err(ConvertError::InvalidType {
            expected: kind.expected(),
            found: extension_of(source)
                .map(|ext| format!(".{ext}"))
                .unwrap_or_default(),
        });
    }
    Ok(())
}

/// Create `output_dir` if needed and name the output after the source stem.
fn prepare_output(
    source: &Path,
    output_dir: &Path,
    kind: SourceKind,
) -> Result<PathBuf, ConvertError> {
    std::fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(output_dir.join(format!("{stem}.{}", kind.target_extension())))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
