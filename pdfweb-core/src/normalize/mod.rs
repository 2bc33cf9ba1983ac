//! Decoding and normalization of uploaded images
//!
//! Every image leaving this module is upright and 8-bit RGB, whatever its
//! source format, orientation tag or color mode.

use image::{
    DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat, ImageReader, ImageResult, RgbImage,
};
use std::io::Cursor;

pub mod color;
pub mod orientation;

pub use color::to_rgb;
pub use orientation::{apply_rotation, read_orientation, Rotation};

/// A decoded, upright, RGB image together with what was learned about its source
#[derive(Debug)]
pub struct NormalizedImage<'a> {
    /// Upright RGB pixels
    pub pixels: RgbImage,
    /// Correction that was applied, if any
    pub rotation: Option<Rotation>,
    /// Color layout of the encoded source
    pub source_color: ExtendedColorType,
    /// Container format of the source, when recognized
    pub format: Option<ImageFormat>,
    /// The bytes the image was decoded from
    pub original: &'a [u8],
}

impl<'a> NormalizedImage<'a> {
    /// Decode `data`, apply its orientation tag and convert it to RGB
    pub fn decode(data: &'a [u8]) -> ImageResult<Self> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader.format();

        let mut decoder = reader.into_decoder()?;
        let rotation = read_orientation(&mut decoder);
        let source_color = decoder.original_color_type();
        let image = DynamicImage::from_decoder(decoder)?;

        Ok(Self {
            pixels: to_rgb(apply_rotation(image, rotation)),
            rotation,
            source_color,
            format,
            original: data,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Whether the source bytes can be embedded in a page without
    /// re-encoding: a three-channel JPEG that needed no rotation.
    pub fn embeddable_as_is(&self) -> bool {
        self.format == Some(ImageFormat::Jpeg)
            && self.source_color == ExtendedColorType::Rgb8
            && self.rotation.is_none()
    }
}
