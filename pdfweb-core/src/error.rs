use thiserror::Error;

/// Errors raised while composing a batch of images into PDF output
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("No images were submitted")]
    NoImages,

    #[error("Too many images ({count}); the limit is {max}")]
    TooManyImages { count: usize, max: usize },

    #[error("File {filename} is not an image")]
    NotAnImage { filename: String },

    #[error("Failed to read {filename}: {source}")]
    Decode {
        filename: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {filename}: {source}")]
    Encode {
        filename: String,
        #[source]
        source: image::ImageError,
    },

    #[error("PDF composition error: {0}")]
    Composition(#[from] oxidize_pdf::PdfError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComposeError {
    /// Whether the failure was caused by the submitted batch rather than the
    /// service itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ComposeError::NoImages
                | ComposeError::TooManyImages { .. }
                | ComposeError::NotAnImage { .. }
                | ComposeError::Decode { .. }
                | ComposeError::Encode { .. }
        )
    }

    /// Name of the upload that caused the failure, if any
    pub fn filename(&self) -> Option<&str> {
        match self {
            ComposeError::NotAnImage { filename }
            | ComposeError::Decode { filename, .. }
            | ComposeError::Encode { filename, .. } => Some(filename),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;
