//! # pdfweb-api
//!
//! HTTP service for the pdfweb pipeline: image batches to PDF, PDF merging
//! and office document conversion.
//!

mod api;
mod config;
mod error;
mod form;
mod i18n;


pub use api::{
    app, app_with_config, health_check, healthz, images_to_pdf, merge_pdf, word_to_pdf,
    AppState, MergeInfo,
};
pub use config::{ConfigError, ServerConfig, DEFAULT_BIND, DEFAULT_BODY_LIMIT_MB};
pub use error::{AppError, ErrorResponse, LocalizedError};
pub use form::{FilePart, UploadForm};
pub use i18n::Lang;
