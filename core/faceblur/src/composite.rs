use image::RgbaImage;

use crate::error::FaceBlurError;
use crate::geometry::Rect;

/// Paint `filtered` over `base` inside the union of `active_rects`.
///
/// Rectangles are in the images' own pixel space (top-left origin). A pixel
/// belongs to the union when its center lies inside any rectangle; parts of
/// rectangles outside the image are ignored. With no rectangles the result
/// is a copy of `base`.
pub fn composite(
    base: &RgbaImage,
    filtered: &RgbaImage,
    active_rects: &[Rect],
) -> Result<RgbaImage, FaceBlurError> {
    if base.dimensions() != filtered.dimensions() {
        return Err(FaceBlurError::DimensionMismatch {
            base: base.dimensions(),
            filtered: filtered.dimensions(),
        });
    }

    let mut output = base.clone();
    if active_rects.is_empty() {
        return Ok(output);
    }

    let (width, height) = base.dimensions();
    let clip = union_mask(active_rects, width, height);

    for (index, inside) in clip.iter().enumerate() {
        if *inside {
            let x = (index % width as usize) as u32;
            let y = (index / width as usize) as u32;
            output.put_pixel(x, y, *filtered.get_pixel(x, y));
        }
    }

    Ok(output)
}

/// Row-major coverage mask for the union of `rects`.
fn union_mask(rects: &[Rect], width: u32, height: u32) -> Vec<bool> {
    let mut mask = vec![false; width as usize * height as usize];
    for rect in rects.iter().filter(|rect| !rect.is_empty()) {
        let Some((x0, y0, x1, y1)) = rect.pixel_span(width, height) else {
            continue;
        };
        for y in y0..y1 {
            let row = y as usize * width as usize;
            mask[row + x0 as usize..row + x1 as usize].fill(true);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const BASE: Rgba<u8> = Rgba([10, 20, 30, 255]);
    const FILTERED: Rgba<u8> = Rgba([200, 150, 100, 255]);

    fn pair(width: u32, height: u32) -> (RgbaImage, RgbaImage) {
        (
            RgbaImage::from_pixel(width, height, BASE),
            RgbaImage::from_pixel(width, height, FILTERED),
        )
    }

    #[test]
    fn empty_set_returns_base() {
        let (base, filtered) = pair(16, 9);
        let out = composite(&base, &filtered, &[]).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn single_rect_masks_exactly() {
        let (base, filtered) = pair(20, 20);
        let rect = Rect::new(4.0, 6.0, 8.0, 5.0);
        let out = composite(&base, &filtered, &[rect]).unwrap();

        for (x, y, pixel) in out.enumerate_pixels() {
            let inside = (4..12).contains(&x) && (6..11).contains(&y);
            let expected = if inside { FILTERED } else { BASE };
            assert_eq!(*pixel, expected, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn union_of_overlapping_rects() {
        let (base, filtered) = pair(10, 10);
        let rects = [Rect::new(0.0, 0.0, 4.0, 4.0), Rect::new(2.0, 2.0, 4.0, 4.0)];
        let out = composite(&base, &filtered, &rects).unwrap();

        assert_eq!(*out.get_pixel(0, 0), FILTERED);
        assert_eq!(*out.get_pixel(3, 3), FILTERED);
        assert_eq!(*out.get_pixel(5, 5), FILTERED);
        assert_eq!(*out.get_pixel(5, 0), BASE);
        assert_eq!(*out.get_pixel(0, 5), BASE);
        assert_eq!(*out.get_pixel(6, 6), BASE);
    }

    #[test]
    fn rect_past_the_edge_is_clipped() {
        let (base, filtered) = pair(8, 8);
        let out = composite(&base, &filtered, &[Rect::new(6.0, -3.0, 10.0, 5.0)]).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(*out.get_pixel(7, 0), FILTERED);
        assert_eq!(*out.get_pixel(6, 1), FILTERED);
        assert_eq!(*out.get_pixel(5, 1), BASE);
        assert_eq!(*out.get_pixel(7, 2), BASE);
    }

    #[test]
    fn degenerate_rect_changes_nothing() {
        let (base, filtered) = pair(8, 8);
        let out = composite(&base, &filtered, &[Rect::new(2.0, 2.0, 0.0, 0.0)]).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn mismatched_dimensions_fail() {
        let base = RgbaImage::from_pixel(8, 8, BASE);
        let filtered = RgbaImage::from_pixel(8, 9, FILTERED);
        let err = composite(&base, &filtered, &[]).unwrap_err();
        assert!(matches!(
            err,
            FaceBlurError::DimensionMismatch {
                base: (8, 8),
                filtered: (8, 9)
            }
        ));
    }
}
