//! Uploaded files as they arrive from a request

use std::time::SystemTime;

/// Prefix every accepted image media type starts with
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

/// Common view over uploaded files, used to order a batch
pub trait BatchItem {
    /// Original filename as sent by the client
    fn filename(&self) -> &str;

    /// Modification time, when the transport exposes one
    fn modified(&self) -> Option<SystemTime> {
        None
    }
}

/// A single image upload
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Original filename
    pub filename: String,
    /// Declared media type
    pub content_type: String,
    /// Raw payload
    pub data: Vec<u8>,
    /// Modification time, if the transport surfaced one
    pub modified: Option<SystemTime>,
}

impl UploadedImage {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
            modified: None,
        }
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Whether the declared media type is an image type
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with(IMAGE_MEDIA_PREFIX)
    }

    /// Filename of the single-page document produced for this upload.
    ///
    /// The last extension is replaced with `.pdf`; directory components sent
    /// by the client are dropped.
    pub fn pdf_name(&self) -> String {
        let base = base_name(&self.filename);
        let base = if base.is_empty() { "image" } else { base };
        let stem = match base.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => base,
        };
        format!("{stem}.pdf")
    }
}

impl BatchItem for UploadedImage {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}

/// Strip any client-side directory components from a filename
pub fn base_name(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> UploadedImage {
        UploadedImage::new(name, "image/png", Vec::new())
    }

    #[test]
    fn test_pdf_name_replaces_extension() {
        assert_eq!(upload("holiday.JPG").pdf_name(), "holiday.pdf");
        assert_eq!(upload("scan.2024.png").pdf_name(), "scan.2024.pdf");
        assert_eq!(upload("noext").pdf_name(), "noext.pdf");
    }

    #[test]
    fn test_pdf_name_defaults_and_strips_directories() {
        assert_eq!(upload("").pdf_name(), "image.pdf");
        assert_eq!(upload("../../etc/a.png").pdf_name(), "a.pdf");
        assert_eq!(upload("C:\\photos\\b.jpeg").pdf_name(), "b.pdf");
    }

    #[test]
    fn test_is_image() {
        assert!(upload("a.png").is_image());
        assert!(!UploadedImage::new("a.txt", "text/plain", Vec::new()).is_image());
        assert!(!UploadedImage::new("a", "", Vec::new()).is_image());
    }

    #[test]
    fn test_modified() {
        let now = SystemTime::now();
        assert_eq!(upload("a.png").modified(), None);
        assert_eq!(upload("a.png").with_modified(now).modified(), Some(now));
    }
}
