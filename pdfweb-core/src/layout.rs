//! Page layout for image pages
//!
//! Geometry is expressed in PDF points (1/72 inch) with the origin at the
//! lower-left corner of the page.

use crate::config::{A4_HEIGHT_MM, A4_WIDTH_MM, DEFAULT_MARGIN_MM};

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// How an image is placed on its page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LayoutSpec {
    /// Page size follows the image, no margin
    #[default]
    FullBleed,
    /// Fixed physical page size with a uniform margin; the image is scaled to
    /// fit inside the margin box and centered
    FixedPage {
        width_mm: f64,
        height_mm: f64,
        margin_mm: f64,
    },
}

impl LayoutSpec {
    /// A4 portrait with the default 8 mm margin
    pub fn a4_margins() -> Self {
        LayoutSpec::FixedPage {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            margin_mm: DEFAULT_MARGIN_MM,
        }
    }

    pub fn is_full_bleed(&self) -> bool {
        matches!(self, LayoutSpec::FullBleed)
    }
}

/// Page size and image placement for a single page, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub content_width: f64,
    pub content_height: f64,
}

impl PageGeometry {
    /// Compute the geometry of an image page.
    ///
    /// `width_px` and `height_px` must be positive; `dpi` only affects
    /// full-bleed pages.
    pub fn compute(width_px: u32, height_px: u32, layout: &LayoutSpec, dpi: f64) -> Self {
        debug_assert!(width_px > 0 && height_px > 0);

        match *layout {
            LayoutSpec::FullBleed => {
                let scale = POINTS_PER_INCH / dpi;
                let width = f64::from(width_px) * scale;
                let height = f64::from(height_px) * scale;
                Self {
                    page_width: width,
                    page_height: height,
                    offset_x: 0.0,
                    offset_y: 0.0,
                    content_width: width,
                    content_height: height,
                }
            }
            LayoutSpec::FixedPage {
                width_mm,
                height_mm,
                margin_mm,
            } => {
                let page_width = mm_to_pt(width_mm).max(0.0);
                let page_height = mm_to_pt(height_mm).max(0.0);
                let margin = mm_to_pt(margin_mm).clamp(0.0, page_width.min(page_height) / 2.0);
                let box_width = page_width - 2.0 * margin;
                let box_height = page_height - 2.0 * margin;

                let (content_width, content_height) = fit_inside(
                    f64::from(width_px),
                    f64::from(height_px),
                    box_width,
                    box_height,
                );

                Self {
                    page_width,
                    page_height,
                    offset_x: (page_width - content_width) / 2.0,
                    offset_y: (page_height - content_height) / 2.0,
                    content_width,
                    content_height,
                }
            }
        }
    }
}

/// Largest size with the image's aspect ratio that fits the box
fn fit_inside(width: f64, height: f64, box_width: f64, box_height: f64) -> (f64, f64) {
    if box_width <= 0.0 || box_height <= 0.0 {
        return (0.0, 0.0);
    }

    let image_aspect = width / height;
    let box_aspect = box_width / box_height;

    if image_aspect > box_aspect {
        (box_width, box_width / image_aspect)
    } else {
        (box_height * image_aspect, box_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < EPSILON);
        assert!((mm_to_pt(210.0) - 595.275_590_551).abs() < 1e-6);
    }

    #[test]
    fn test_full_bleed_matches_image() {
        let geometry = PageGeometry::compute(1000, 2000, &LayoutSpec::FullBleed, 72.0);
        assert_eq!(geometry.page_width, 1000.0);
        assert_eq!(geometry.page_height, 2000.0);
        assert_eq!(geometry.offset_x, 0.0);
        assert_eq!(geometry.offset_y, 0.0);
        assert_eq!(geometry.content_width, 1000.0);
        assert_eq!(geometry.content_height, 2000.0);
    }

    #[test]
    fn test_full_bleed_honours_dpi() {
        let geometry = PageGeometry::compute(300, 600, &LayoutSpec::FullBleed, 300.0);
        assert!((geometry.page_width - 72.0).abs() < EPSILON);
        assert!((geometry.page_height - 144.0).abs() < EPSILON);
    }

    #[test]
    fn test_wide_image_is_width_limited() {
        let geometry = PageGeometry::compute(4000, 1000, &LayoutSpec::a4_margins(), 72.0);
        let margin = mm_to_pt(8.0);
        let box_width = mm_to_pt(210.0) - 2.0 * margin;

        assert!((geometry.content_width - box_width).abs() < EPSILON);
        assert!((geometry.content_height - box_width / 4.0).abs() < EPSILON);
        assert!((geometry.offset_x - margin).abs() < EPSILON);
        assert!(geometry.offset_y > margin);
    }

    #[test]
    fn test_tall_image_is_height_limited() {
        let geometry = PageGeometry::compute(500, 5000, &LayoutSpec::a4_margins(), 72.0);
        let margin = mm_to_pt(8.0);
        let box_height = mm_to_pt(297.0) - 2.0 * margin;

        assert!((geometry.content_height - box_height).abs() < EPSILON);
        assert!((geometry.content_width - box_height / 10.0).abs() < EPSILON);
        assert!((geometry.offset_y - margin).abs() < EPSILON);
    }

    #[test]
    fn test_content_is_centered() {
        let geometry = PageGeometry::compute(800, 600, &LayoutSpec::a4_margins(), 72.0);
        let right = geometry.page_width - geometry.offset_x - geometry.content_width;
        let top = geometry.page_height - geometry.offset_y - geometry.content_height;
        assert!((right - geometry.offset_x).abs() < EPSILON);
        assert!((top - geometry.offset_y).abs() < EPSILON);
    }

    #[test]
    fn test_oversized_margin_never_goes_negative() {
        let layout = LayoutSpec::FixedPage {
            width_mm: 50.0,
            height_mm: 80.0,
            margin_mm: 40.0,
        };
        let geometry = PageGeometry::compute(100, 100, &layout, 72.0);
        assert_eq!(geometry.content_width, 0.0);
        assert_eq!(geometry.content_height, 0.0);
        assert!(geometry.offset_x >= 0.0);
        assert!(geometry.offset_y >= 0.0);
    }
}
