use image::{Rgba, RgbaImage};

use crate::error::FaceBlurError;

/// Block size used when the caller does not pick one.
pub const DEFAULT_PIXEL_SCALE: u32 = 12;

/// Pixelate the whole image with `scale` × `scale` blocks.
///
/// Blocks are anchored at the top-left corner; blocks on the right and bottom
/// edges are truncated to the image. Every pixel in a block becomes the
/// rounded per-channel mean of that block, alpha included.
pub fn pixelate(image: &RgbaImage, scale: u32) -> Result<RgbaImage, FaceBlurError> {
    if scale == 0 {
        return Err(FaceBlurError::InvalidPixelScale);
    }

    if scale == 1 {
        return Ok(image.clone());
    }

    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);

    for block_y in (0..height).step_by(scale as usize) {
        let y_end = (block_y + scale).min(height);
        for block_x in (0..width).step_by(scale as usize) {
            let x_end = (block_x + scale).min(width);

            let mut sums = [0u64; 4];
            for y in block_y..y_end {
                for x in block_x..x_end {
                    let pixel = image.get_pixel(x, y);
                    for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                        *sum += channel as u64;
                    }
                }
            }

            let count = ((x_end - block_x) * (y_end - block_y)) as u64;
            // Integer round-half-up of sum / count.
            let mean = sums.map(|sum| ((sum + count / 2) / count) as u8);

            for y in block_y..y_end {
                for x in block_x..x_end {
                    output.put_pixel(x, y, Rgba(mean));
                }
            }
        }
    }

    Ok(output)
}
