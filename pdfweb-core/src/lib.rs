//! # pdfweb
//!
//! Orchestration library behind the pdfweb service: turns batches of uploaded
//! images into PDF documents, merges uploaded PDFs and converts office
//! documents to PDF through LibreOffice.
//!
//! ## Image-to-PDF pipeline
//!
//! Every image runs through the same stages:
//!
//! 1. [`normalize`] decodes the upload, applies the embedded EXIF rotation and
//!    flattens it to 8-bit RGB.
//! 2. [`recompress`] picks the JPEG bytes that get embedded in the page.
//! 3. [`layout`] computes the page size and the image placement.
//! 4. [`compose`] orders and validates the batch and builds the pages.
//! 5. [`package`] serializes the merged document or zips single-page documents.
//!
//! ```rust,no_run
//! use pdfweb::{ComposeOptions, Composer, LayoutSpec, PipelineConfig, UploadedImage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let composer = Composer::new(PipelineConfig::default());
//! let uploads = vec![UploadedImage::new(
//!     "scan.png",
//!     "image/png",
//!     std::fs::read("scan.png")?,
//! )];
//!
//! let options = ComposeOptions {
//!     layout: LayoutSpec::a4_margins(),
//!     ..ComposeOptions::default()
//! };
//!
//! let composition = composer.compose(uploads, &options)?;
//! let package = pdfweb::package(composition, "scan.pdf")?;
//! std::fs::write(&package.filename, &package.data)?;
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod layout;
pub mod merge;
pub mod normalize;
pub mod office;
pub mod package;
pub mod recompress;
pub mod upload;

pub use compose::{ComposeOptions, Composer, Composition, PagePlan, SinglePage, SortOrder};
pub use config::PipelineConfig;
pub use error::{ComposeError, Result};
pub use layout::{LayoutSpec, PageGeometry};
pub use merge::{merge_uploads, MergeError, MergeOutcome, SkipReason, SkippedFile, UploadedPdf};
pub use normalize::{NormalizedImage, Rotation};
pub use office::{ConvertedDocument, OfficeConverter, OfficeError};
pub use package::{package, Package};
pub use upload::{BatchItem, UploadedImage};
