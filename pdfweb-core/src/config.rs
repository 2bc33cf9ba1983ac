//! Pipeline configuration
//!
//! All tunables of the composition pipeline live in [`PipelineConfig`], which
//! is handed to the [`Composer`](crate::Composer) at construction time.

use crate::layout::LayoutSpec;

/// Largest batch accepted by default
pub const DEFAULT_MAX_IMAGES: usize = 300;

/// JPEG quality used whenever an image has to be re-encoded
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Pixel density assumed for full-bleed pages (1 px = 1 pt)
pub const DEFAULT_DPI: f64 = 72.0;

/// A4 width in millimetres
pub const A4_WIDTH_MM: f64 = 210.0;

/// A4 height in millimetres
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Margin applied on every side of fixed-size pages
pub const DEFAULT_MARGIN_MM: f64 = 8.0;

/// Configuration shared by every batch a [`Composer`](crate::Composer) handles
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Maximum number of images in a single batch
    pub max_images: usize,
    /// JPEG quality (1-100) for re-encoded images
    pub jpeg_quality: u8,
    /// Pixel density used to size full-bleed pages
    pub dpi: f64,
    /// Width of fixed-size pages in millimetres
    pub page_width_mm: f64,
    /// Height of fixed-size pages in millimetres
    pub page_height_mm: f64,
    /// Margin of fixed-size pages in millimetres
    pub margin_mm: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_images: DEFAULT_MAX_IMAGES,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            dpi: DEFAULT_DPI,
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: DEFAULT_MARGIN_MM,
        }
    }
}

impl PipelineConfig {
    /// Set the maximum batch size
    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    /// Set the JPEG quality, clamped to 1..=100
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the pixel density for full-bleed pages
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        if dpi.is_finite() && dpi > 0.0 {
            self.dpi = dpi;
        }
        self
    }

    /// Set the fixed page size in millimetres
    pub fn with_page_size(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.page_width_mm = width_mm;
        self.page_height_mm = height_mm;
        self
    }

    /// Set the fixed page margin in millimetres
    pub fn with_margin(mut self, margin_mm: f64) -> Self {
        self.margin_mm = margin_mm.max(0.0);
        self
    }

    /// The fixed-page layout described by this configuration
    pub fn fixed_page(&self) -> LayoutSpec {
        LayoutSpec::FixedPage {
            width_mm: self.page_width_mm,
            height_mm: self.page_height_mm,
            margin_mm: self.margin_mm,
        }
    }
}
