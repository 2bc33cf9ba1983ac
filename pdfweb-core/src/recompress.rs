//! Choice of the JPEG bytes embedded in each page
//!
//! Pages embed images as DCT (JPEG) streams, so everything that is not
//! already a plain RGB JPEG is re-encoded. The `compress` flag only decides
//! what happens to images that could be embedded untouched.

use crate::normalize::NormalizedImage;
use image::error::{EncodingError, ImageFormatHint, LimitError, LimitErrorKind};
use image::{ImageError, ImageFormat, ImageResult, RgbImage};
use jpeg_encoder::{ColorType, Encoder};

/// Bytes ready to be embedded, and where they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    /// `true` when the upload's own bytes are used
    pub reused_original: bool,
}

/// Pick the JPEG bytes for a page.
///
/// - Embeddable JPEG without `compress`: original bytes.
/// - Embeddable JPEG with `compress`: re-encoded at `quality`, unless that
///   comes out larger than the original.
/// - Anything else: re-encoded at `quality`.
pub fn encode_for_page(
    image: &NormalizedImage<'_>,
    compress: bool,
    quality: u8,
) -> ImageResult<EncodedImage> {
    if !image.embeddable_as_is() {
        return Ok(EncodedImage {
            data: encode_jpeg(&image.pixels, quality)?,
            reused_original: false,
        });
    }

    if compress {
        let reencoded = encode_jpeg(&image.pixels, quality)?;
        if reencoded.len() < image.original.len() {
            return Ok(EncodedImage {
                data: reencoded,
                reused_original: false,
            });
        }
    }

    Ok(EncodedImage {
        data: image.original.to_vec(),
        reused_original: true,
    })
}

/// Encode RGB pixels as a progressive JPEG with optimized Huffman tables
pub fn encode_jpeg(pixels: &RgbImage, quality: u8) -> ImageResult<Vec<u8>> {
    let (width, height) = pixels.dimensions();
    let (Ok(width), Ok(height)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        )));
    };

    let mut data = Vec::new();
    let mut encoder = Encoder::new(&mut data, quality);
    encoder.set_progressive(true);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(pixels.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e| {
            ImageError::Encoding(EncodingError::new(
                ImageFormatHint::Exact(ImageFormat::Jpeg),
                e,
            ))
        })?;

    Ok(data)
}
