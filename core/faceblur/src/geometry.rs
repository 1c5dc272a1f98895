/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position (pixels).
    pub x: f64,
    /// Vertical position (pixels, downward).
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width (pixels).
    pub width: f64,
    /// Height (pixels).
    pub height: f64,
}

impl Size {
    /// Create a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle in pixel space, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner (pixels).
    pub x: f64,
    /// Y coordinate of the top-left corner (pixels).
    pub y: f64,
    /// Width (pixels).
    pub width: f64,
    /// Height (pixels).
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `point` lies inside. Min edges are inclusive, max edges exclusive,
    /// so adjacent rectangles never both claim a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Integer pixel span `(x0, y0, x1, y1)` covered by this rectangle inside a
    /// `width` × `height` raster, using pixel-center sampling. `x1`/`y1` are
    /// exclusive. Returns `None` when no pixel center falls inside.
    pub(crate) fn pixel_span(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        // Pixel `p` is covered when p + 0.5 is in [min, max).
        let clamp = |v: f64, limit: u32| -> u32 { v.max(0.0).min(limit as f64) as u32 };
        let x0 = clamp((self.x - 0.5).ceil(), width);
        let y0 = clamp((self.y - 0.5).ceil(), height);
        let x1 = clamp((self.max_x() - 0.5).ceil(), width);
        let y1 = clamp((self.max_y() - 0.5).ceil(), height);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }
}

/// A face box as fractions of the source image, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedBox {
    /// Left edge as a fraction of image width.
    pub x: f64,
    /// Bottom edge as a fraction of image height, measured upward.
    pub y: f64,
    /// Width as a fraction of image width.
    pub width: f64,
    /// Height as a fraction of image height.
    pub height: f64,
}

impl NormalizedBox {
    /// Create a normalized box.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a top-left-origin pixel box, as most detectors emit it, into a
    /// normalized bottom-left-origin box for an image of the given size.
    ///
    /// Returns a zero box for a zero-area image.
    pub fn from_pixel_bounds(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        if image_width == 0 || image_height == 0 {
            return Self::default();
        }
        let (iw, ih) = (image_width as f64, image_height as f64);
        Self {
            x: x / iw,
            y: 1.0 - (y + height) / ih,
            width: width / iw,
            height: height / ih,
        }
    }
}

/// The visible sub-rectangle of a container that the image is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayFrame {
    /// Top-left corner inside the container (pixels).
    pub origin: Point,
    /// Drawn image size (pixels).
    pub size: Size,
}

impl DisplayFrame {
    /// Create a display frame.
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// A frame covering a whole `width` × `height` image at the origin.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            origin: Point::default(),
            size: Size::new(width as f64, height as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(14.9, 14.9)));
        assert!(!rect.contains(Point::new(15.0, 12.0)));
        assert!(!rect.contains(Point::new(12.0, 15.0)));
        assert!(!rect.contains(Point::new(9.9, 12.0)));
    }

    #[test]
    fn pixel_span_uses_pixel_centers() {
        let rect = Rect::new(2.0, 3.0, 4.0, 2.0);
        assert_eq!(rect.pixel_span(100, 100), Some((2, 3, 6, 5)));

        // Edge at 2.6 excludes pixel 2 (center 2.5), includes pixel 3.
        let rect = Rect::new(2.6, 0.0, 1.0, 1.0);
        assert_eq!(rect.pixel_span(100, 100), Some((3, 0, 4, 1)));
    }

    #[test]
    fn pixel_span_clips_to_raster() {
        let rect = Rect::new(-10.0, -10.0, 30.0, 30.0);
        assert_eq!(rect.pixel_span(8, 6), Some((0, 0, 8, 6)));
    }

    #[test]
    fn is_empty_for_zero_or_negative_sides() {
        assert!(Rect::new(3.0, 3.0, 0.0, 5.0).is_empty());
        assert!(Rect::new(3.0, 3.0, 5.0, -1.0).is_empty());
        assert!(!Rect::new(3.0, 3.0, 0.5, 0.5).is_empty());
    }

    #[test]
    fn pixel_span_outside_raster_is_none() {
        assert_eq!(Rect::new(50.0, 50.0, 5.0, 5.0).pixel_span(10, 10), None);
        assert_eq!(Rect::new(1.0, 1.0, 0.0, 4.0).pixel_span(10, 10), None);
        assert_eq!(Rect::new(1.0, 1.0, 0.2, 0.2).pixel_span(10, 10), None);
    }

    #[test]
    fn from_pixel_bounds_flips_vertical_axis() {
        // 20x10 box at the very top of a 100x100 image.
        let nb = NormalizedBox::from_pixel_bounds(30.0, 0.0, 20.0, 10.0, 100, 100);
        assert!((nb.x - 0.3).abs() < 1e-12);
        assert!((nb.y - 0.9).abs() < 1e-12);
        assert!((nb.width - 0.2).abs() < 1e-12);
        assert!((nb.height - 0.1).abs() < 1e-12);
    }

    #[test]
    fn from_pixel_bounds_zero_image() {
        let nb = NormalizedBox::from_pixel_bounds(1.0, 1.0, 1.0, 1.0, 0, 10);
        assert_eq!(nb, NormalizedBox::default());
    }
}
