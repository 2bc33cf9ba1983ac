//! Conversion of every decodable pixel format to 8-bit RGB

use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

/// Convert an image to 8-bit RGB.
///
/// Images with an alpha channel are composited onto white; grayscale is
/// replicated into three channels; RGB8 is returned as is.
pub fn to_rgb(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other if other.color().has_alpha() => flatten_on_white(&other.to_rgba8()),
        other => other.to_rgb8(),
    }
}

fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (src, dst) in rgba.pixels().zip(rgb.pixels_mut()) {
        let alpha = u16::from(src[3]);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        *dst = Rgb([blend(src[0]), blend(src[1]), blend(src[2])]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, ImageBuffer, LumaA, Luma, Rgba};

    fn channels(rgb: RgbImage) -> u8 {
        DynamicImage::ImageRgb8(rgb).color().channel_count()
    }

    #[test]
    fn test_every_mode_yields_three_channels() {
        let images = vec![
            DynamicImage::ImageLuma8(GrayImage::new(4, 4)),
            DynamicImage::ImageLumaA8(GrayAlphaImage::new(4, 4)),
            DynamicImage::ImageRgb8(RgbImage::new(4, 4)),
            DynamicImage::ImageRgba8(RgbaImage::new(4, 4)),
            DynamicImage::ImageLuma16(ImageBuffer::new(4, 4)),
            DynamicImage::ImageRgba16(ImageBuffer::new(4, 4)),
            DynamicImage::ImageRgb32F(ImageBuffer::new(4, 4)),
        ];

        for image in images {
            let color = image.color();
            let rgb = to_rgb(image);
            assert_eq!(rgb.dimensions(), (4, 4), "{color:?}");
            assert_eq!(channels(rgb), 3, "{color:?}");
        }
    }

    #[test]
    fn test_grayscale_is_replicated() {
        let gray = GrayImage::from_pixel(2, 2, Luma([77]));
        let rgb = to_rgb(DynamicImage::ImageLuma8(gray));
        assert!(rgb.pixels().all(|p| *p == Rgb([77, 77, 77])));
    }

    #[test]
    fn test_transparent_pixels_become_white() {
        let mut rgba = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let rgb = to_rgb(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_half_transparent_gray_alpha_is_blended() {
        let img = GrayAlphaImage::from_pixel(1, 1, LumaA([0, 128]));
        let rgb = to_rgb(DynamicImage::ImageLumaA8(img));
        let value = rgb.get_pixel(0, 0)[0];
        assert!((126..=128).contains(&value), "got {value}");
    }

    #[test]
    fn test_rgb_passes_through_unchanged() {
        let original = RgbImage::from_fn(3, 3, |x, y| Rgb([x as u8, y as u8, 9]));
        let rgb = to_rgb(DynamicImage::ImageRgb8(original.clone()));
        assert_eq!(rgb, original);
    }
}
