//! Word/ODT to PDF conversion through a headless LibreOffice

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info};

/// Extensions LibreOffice is asked to convert
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["docx", "doc", "odt", "rtf"];

/// Default converter binary, looked up on `PATH`
pub const DEFAULT_SOFFICE: &str = "soffice";

#[derive(Error, Debug)]
pub enum OfficeError {
    #[error("Unsupported document: {filename}")]
    UnsupportedFile { filename: String },

    #[error("LibreOffice not found at {}", path.display())]
    ConverterMissing { path: PathBuf },

    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OfficeError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, OfficeError::UnsupportedFile { .. })
    }
}

/// A converted document
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    /// Stem of the uploaded filename, used to name the output
    pub stem: String,
    pub data: Vec<u8>,
}

impl ConvertedDocument {
    pub fn default_filename(&self) -> String {
        format!("{}.pdf", self.stem)
    }
}

/// Runs `soffice --convert-to pdf` on uploaded documents
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    soffice: PathBuf,
}

impl Default for OfficeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_SOFFICE)
    }
}

impl OfficeConverter {
    pub fn new(soffice: impl Into<PathBuf>) -> Self {
        Self {
            soffice: soffice.into(),
        }
    }

    /// Check the filename extension against [`SUPPORTED_EXTENSIONS`]
    pub fn is_supported(filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Convert one document. Blocks until LibreOffice exits.
    pub fn convert(&self, filename: &str, data: &[u8]) -> Result<ConvertedDocument, OfficeError> {
        let name = crate::upload::base_name(filename);
        if !Self::is_supported(name) {
            return Err(OfficeError::UnsupportedFile {
                filename: filename.to_string(),
            });
        }
        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();

        let workdir = TempDir::new()?;
        let input = workdir.path().join(name);
        let out_dir = workdir.path().join("out");
        std::fs::create_dir_all(&out_dir)?;
        std::fs::write(&input, data)?;

        debug!(soffice = %self.soffice.display(), input = %input.display(), "Running LibreOffice");
        let output = Command::new(&self.soffice)
            .args(["--headless", "--norestore", "--invisible", "--convert-to", "pdf", "--outdir"])
            .arg(&out_dir)
            .arg(&input)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => OfficeError::ConverterMissing {
                    path: self.soffice.clone(),
                },
                _ => OfficeError::Io(e),
            })?;

        let out_pdf = out_dir.join(format!("{stem}.pdf"));
        if !out_pdf.exists() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = [stderr.trim(), stdout.trim()]
                .into_iter()
                .find(|s| !s.is_empty())
                .unwrap_or("conversion failed")
                .to_string();
            return Err(OfficeError::ConversionFailed(message));
        }

        let data = std::fs::read(&out_pdf)?;
        info!(filename = %name, bytes = data.len(), "Converted document to PDF");
        Ok(ConvertedDocument { stem, data })
    }
}
