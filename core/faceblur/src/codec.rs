use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageEncoder, RgbImage, RgbaImage};

use crate::error::FaceBlurError;
use crate::OutputFormat;

/// Decode input bytes into a `DynamicImage`.
pub(crate) fn decode_image(input: &[u8]) -> Result<DynamicImage, FaceBlurError> {
    let image =
        image::load_from_memory(input).map_err(|e| FaceBlurError::DecodeError(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(FaceBlurError::ZeroDimensions);
    }
    Ok(image)
}

/// Flatten alpha channel by compositing onto a white background.
pub(crate) fn flatten_alpha(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        // Composite over white (255, 255, 255)
        let out_r = (r as f32 * alpha + 255.0 * inv_alpha).round() as u8;
        let out_g = (g as f32 * alpha + 255.0 * inv_alpha).round() as u8;
        let out_b = (b as f32 * alpha + 255.0 * inv_alpha).round() as u8;
        rgb.put_pixel(x, y, image::Rgb([out_r, out_g, out_b]));
    }

    rgb
}

/// Encode a rendered image in the requested format.
///
/// `quality` (0.0–1.0) only affects JPEG; PNG and WebP are lossless. JPEG has
/// no alpha channel, so transparent pixels are flattened onto white first.
pub(crate) fn encode_image(
    image: &RgbaImage,
    format: &OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, FaceBlurError> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(FaceBlurError::InvalidQuality(quality));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(FaceBlurError::ZeroDimensions);
    }

    let mut buffer = Vec::new();
    let (width, height) = image.dimensions();

    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(image.as_raw(), width, height, image::ExtendedColorType::Rgba8)
                .map_err(|e| FaceBlurError::EncodeError(e.to_string()))?;
        }
        OutputFormat::Webp => {
            // The pure-Rust image-webp encoder is lossless only.
            WebPEncoder::new_lossless(&mut buffer)
                .write_image(image.as_raw(), width, height, image::ExtendedColorType::Rgba8)
                .map_err(|e| FaceBlurError::EncodeError(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let rgb = flatten_alpha(image);
            let quality_percent = ((quality * 100.0).round() as u8).max(1);
            JpegEncoder::new_with_quality(&mut buffer, quality_percent)
                .write_image(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
                .map_err(|e| FaceBlurError::EncodeError(e.to_string()))?;
        }
    }

    Ok(buffer)
}
