//! Batch assembly of image pages
//!
//! The [`Composer`] validates and orders a batch of uploads, runs every image
//! through normalization, recompression and layout, and produces either one
//! merged document or one single-page document per image.
//!
//! Any failing image aborts the whole batch, in both merged and per-file
//! mode; the error names the offending file.

use crate::config::PipelineConfig;
use crate::error::{ComposeError, Result};
use crate::layout::{LayoutSpec, PageGeometry};
use crate::normalize::NormalizedImage;
use crate::recompress::encode_for_page;
use crate::upload::{BatchItem, UploadedImage};
use oxidize_pdf::{Document, Image, Page};
use std::time::SystemTime;
use tracing::{debug, info};

/// Resource name of the image drawn on each page
const PAGE_IMAGE_NAME: &str = "Im1";

/// Order in which the pages of a batch are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Case-insensitive filename order
    #[default]
    Name,
    /// Modification time, oldest first
    Mtime,
    /// Order of arrival
    AsIs,
}

impl SortOrder {
    /// Parse a form value; anything unrecognized means [`SortOrder::Name`]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mtime" => SortOrder::Mtime,
            "as_is" | "as-is" | "asis" => SortOrder::AsIs,
            _ => SortOrder::Name,
        }
    }

    /// Sort items in place. The sort is stable.
    ///
    /// Items without a modification time are stamped with the current time
    /// when ordering by [`SortOrder::Mtime`], which puts them after every
    /// dated item.
    pub fn apply<T: BatchItem>(self, items: &mut [T]) {
        match self {
            SortOrder::Name => items.sort_by_cached_key(|item| item.filename().to_lowercase()),
            SortOrder::Mtime => {
                items.sort_by_cached_key(|item| item.modified().unwrap_or_else(SystemTime::now))
            }
            SortOrder::AsIs => {}
        }
    }
}

/// Per-batch options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeOptions {
    pub order: SortOrder,
    /// One document per image instead of a single merged document
    pub per_file: bool,
    pub layout: LayoutSpec,
    /// Re-encode images that could otherwise be embedded untouched
    pub compress: bool,
}

/// A single-page document produced in per-file mode
#[derive(Debug, Clone)]
pub struct SinglePage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Result of composing a batch
pub enum Composition {
    /// All pages in one document, in batch order
    Merged(Document),
    /// One serialized document per image, in batch order
    PerFile(Vec<SinglePage>),
}

impl Composition {
    pub fn page_count(&self) -> usize {
        match self {
            Composition::Merged(doc) => doc.page_count(),
            Composition::PerFile(pages) => pages.len(),
        }
    }
}

/// Layout of one page, without building it
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub filename: String,
    pub width_px: u32,
    pub height_px: u32,
    pub geometry: PageGeometry,
}

/// Turns batches of images into PDF documents
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: PipelineConfig,
}

impl Composer {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reject batches that are empty, too large, or contain non-images.
    pub fn validate(&self, images: &[UploadedImage]) -> Result<()> {
        if images.is_empty() {
            return Err(ComposeError::NoImages);
        }
        if images.len() > self.config.max_images {
            return Err(ComposeError::TooManyImages {
                count: images.len(),
                max: self.config.max_images,
            });
        }
        if let Some(upload) = images.iter().find(|upload| !upload.is_image()) {
            return Err(ComposeError::NotAnImage {
                filename: upload.filename.clone(),
            });
        }
        Ok(())
    }

    /// Compose a batch into PDF output
    pub fn compose(
        &self,
        mut images: Vec<UploadedImage>,
        options: &ComposeOptions,
    ) -> Result<Composition> {
        self.validate(&images)?;
        options.order.apply(&mut images);

        info!(
            images = images.len(),
            per_file = options.per_file,
            full_bleed = options.layout.is_full_bleed(),
            compress = options.compress,
            "Composing image batch"
        );

        if options.per_file {
            let mut pages = Vec::with_capacity(images.len());
            for upload in &images {
                let mut doc = new_document();
                doc.add_page(self.render_page(upload, options)?);

                let mut data = Vec::new();
                doc.write(&mut data)?;
                pages.push(SinglePage {
                    filename: upload.pdf_name(),
                    data,
                });
            }
            Ok(Composition::PerFile(pages))
        } else {
            let mut doc = new_document();
            for upload in &images {
                doc.add_page(self.render_page(upload, options)?);
            }
            Ok(Composition::Merged(doc))
        }
    }

    /// Validate, order and lay out a batch without producing any document
    pub fn plan(
        &self,
        mut images: Vec<UploadedImage>,
        options: &ComposeOptions,
    ) -> Result<Vec<PagePlan>> {
        self.validate(&images)?;
        options.order.apply(&mut images);

        images
            .iter()
            .map(|upload| {
                let normalized = decode(upload)?;
                Ok(PagePlan {
                    filename: upload.filename.clone(),
                    width_px: normalized.width(),
                    height_px: normalized.height(),
                    geometry: self.geometry(&normalized, &options.layout),
                })
            })
            .collect()
    }

    /// Build the page for a single upload
    pub fn render_page(&self, upload: &UploadedImage, options: &ComposeOptions) -> Result<Page> {
        let normalized = decode(upload)?;
        let geometry = self.geometry(&normalized, &options.layout);
        let encoded = encode_for_page(&normalized, options.compress, self.config.jpeg_quality)
            .map_err(|source| ComposeError::Encode {
                filename: upload.filename.clone(),
                source,
            })?;

        debug!(
            filename = %upload.filename,
            width = normalized.width(),
            height = normalized.height(),
            rotation = ?normalized.rotation,
            reused_original = encoded.reused_original,
            bytes = encoded.data.len(),
            "Prepared page image"
        );
        drop(normalized);

        let image = Image::from_jpeg_data(encoded.data)?;
        let mut page = Page::new(geometry.page_width, geometry.page_height);
        page.add_image(PAGE_IMAGE_NAME, image);
        page.draw_image(
            PAGE_IMAGE_NAME,
            geometry.offset_x,
            geometry.offset_y,
            geometry.content_width,
            geometry.content_height,
        )?;

        Ok(page)
    }

    fn geometry(&self, image: &NormalizedImage<'_>, layout: &LayoutSpec) -> PageGeometry {
        PageGeometry::compute(image.width(), image.height(), layout, self.config.dpi)
    }
}

fn decode(upload: &UploadedImage) -> Result<NormalizedImage<'_>> {
    NormalizedImage::decode(&upload.data).map_err(|source| ComposeError::Decode {
        filename: upload.filename.clone(),
        source,
    })
}

fn new_document() -> Document {
    let mut doc = Document::new();
    doc.set_creator("pdfweb");
    doc.set_producer(concat!("pdfweb ", env!("CARGO_PKG_VERSION")));
    doc
}
