//! Merging uploaded PDF files
//!
//! Files that are not PDFs, cannot be parsed, or carry an encryption
//! dictionary are skipped and reported; the remaining files are merged in
//! batch order. Each file is staged and merged on its own first, so one
//! file the merger rejects cannot fail the whole batch.

use crate::compose::SortOrder;
use crate::upload::BatchItem;
use oxidize_pdf::operations::{merge_pdfs, MergeInput, MergeOptions, PdfMerger};
use oxidize_pdf::parser::{ParseError, PdfReader};
use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_MERGED_NAME: &str = "merged.pdf";

/// A single PDF upload
#[derive(Debug, Clone)]
pub struct UploadedPdf {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedPdf {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Accept files named `*.pdf` or declared with a PDF media type
    pub fn looks_like_pdf(&self) -> bool {
        self.filename.to_lowercase().ends_with(".pdf") || self.content_type.ends_with("pdf")
    }
}

impl BatchItem for UploadedPdf {
    fn filename(&self) -> &str {
        &self.filename
    }
}

/// Why an upload was left out of the merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotPdf,
    PasswordProtected,
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::NotPdf => write!(f, "{}: not a PDF", self.filename),
            SkipReason::PasswordProtected => {
                write!(f, "{}: password protected", self.filename)
            }
            SkipReason::Unreadable(msg) => write!(f, "{}: read error ({msg})", self.filename),
        }
    }
}

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("No files were submitted")]
    NoFiles,

    #[error("No valid pages found to merge")]
    NoValidPages { skipped: Vec<SkippedFile> },

    #[error("Failed to merge PDFs: {0}")]
    Merge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MergeError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, MergeError::NoFiles | MergeError::NoValidPages { .. })
    }
}

/// A merged document and what went into it
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub data: Vec<u8>,
    pub pages: usize,
    pub files_merged: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Merge uploads in the requested order.
///
/// Only [`SortOrder::Name`] reorders; PDF uploads carry no timestamps, so
/// the other orders keep arrival order.
pub fn merge_uploads(
    mut files: Vec<UploadedPdf>,
    order: SortOrder,
) -> Result<MergeOutcome, MergeError> {
    if files.is_empty() {
        return Err(MergeError::NoFiles);
    }
    if order == SortOrder::Name {
        order.apply(&mut files);
    }

    let workdir = TempDir::new()?;
    let mut accepted: Vec<PathBuf> = Vec::new();
    let mut skipped = Vec::new();
    let mut total_pages = 0;

    for (index, file) in files.iter().enumerate() {
        match stage(file, index, workdir.path()) {
            Ok((path, pages)) => {
                total_pages += pages;
                accepted.push(path);
            }
            Err(reason) => {
                warn!(filename = %file.filename, ?reason, "Skipping merge input");
                skipped.push(SkippedFile {
                    filename: file.filename.clone(),
                    reason,
                });
            }
        }
    }

    if accepted.is_empty() {
        return Err(MergeError::NoValidPages { skipped });
    }

    let output = workdir.path().join(DEFAULT_MERGED_NAME);
    let inputs: Vec<MergeInput> = accepted
        .iter()
        .map(|path| MergeInput::new(path.as_path()))
        .collect();
    merge_pdfs(inputs, &output, MergeOptions::default())
        .map_err(|e| MergeError::Merge(e.to_string()))?;
    let data = std::fs::read(&output)?;

    info!(
        files = accepted.len(),
        pages = total_pages,
        skipped = skipped.len(),
        "Merged PDF uploads"
    );

    Ok(MergeOutcome {
        data,
        pages: total_pages,
        files_merged: accepted.len(),
        skipped,
    })
}

/// Write one upload into the work directory and check that the merger
/// accepts it, returning the staged path and its page count.
fn stage(
    file: &UploadedPdf,
    index: usize,
    workdir: &Path,
) -> Result<(PathBuf, usize), SkipReason> {
    if !file.looks_like_pdf() {
        return Err(SkipReason::NotPdf);
    }

    let path = workdir.join(format!("{index:04}.pdf"));
    std::fs::write(&path, &file.data).map_err(|e| SkipReason::Unreadable(e.to_string()))?;

    let pages = count_pages(&path)?;
    if pages == 0 {
        return Err(SkipReason::Unreadable("no pages".to_string()));
    }

    // Merged alone first; a file the merger rejects is skipped, not fatal.
    let mut merger = PdfMerger::new(MergeOptions::default());
    merger.add_input(MergeInput::new(&path));
    merger
        .merge()
        .map_err(|e| SkipReason::Unreadable(e.to_string()))?;

    Ok((path, pages))
}

/// Encrypted files are refused even when the empty password unlocks them:
/// merged pages would lose their decrypted content.
fn count_pages(path: &Path) -> Result<usize, SkipReason> {
    let mut reader = PdfReader::open(path).map_err(|e| match e {
        ParseError::EncryptionNotSupported => SkipReason::PasswordProtected,
        other => SkipReason::Unreadable(other.to_string()),
    })?;

    if reader.is_encrypted() {
        return Err(SkipReason::PasswordProtected);
    }

    reader
        .page_count()
        .map(|count| count as usize)
        .map_err(|e| SkipReason::Unreadable(e.to_string()))
}
