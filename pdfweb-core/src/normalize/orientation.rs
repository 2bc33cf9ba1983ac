//! EXIF orientation correction
//!
//! Only the pure rotations (EXIF codes 3, 6 and 8) are corrected; mirrored
//! orientations and unknown codes leave the image untouched.

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder};
use tracing::debug;

/// Clockwise rotation that brings an image upright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    fn from_orientation(orientation: Orientation) -> Option<Self> {
        match orientation {
            Orientation::Rotate90 => Some(Rotation::Clockwise90),
            Orientation::Rotate180 => Some(Rotation::Clockwise180),
            Orientation::Rotate270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }
}

/// Read the corrective rotation from a decoder's metadata.
///
/// Unreadable metadata is treated as "no rotation".
pub fn read_orientation<D: ImageDecoder>(decoder: &mut D) -> Option<Rotation> {
    match decoder.orientation() {
        Ok(orientation) => Rotation::from_orientation(orientation),
        Err(e) => {
            debug!("Ignoring unreadable orientation metadata: {e}");
            None
        }
    }
}

/// Apply a rotation; `None` returns the image unchanged
pub fn apply_rotation(image: DynamicImage, rotation: Option<Rotation>) -> DynamicImage {
    match rotation {
        Some(Rotation::Clockwise90) => image.rotate90(),
        Some(Rotation::Clockwise180) => image.rotate180(),
        Some(Rotation::Clockwise270) => image.rotate270(),
        None => image,
    }
}
