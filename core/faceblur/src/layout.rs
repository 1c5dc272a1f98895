use crate::geometry::{DisplayFrame, NormalizedBox, Point, Rect, Size};
use crate::regions::FaceRegion;

/// Position one normalized, bottom-left-origin box inside `frame`.
///
/// No clamping: a malformed box may land outside the frame.
pub fn map_box(nb: &NormalizedBox, frame: &DisplayFrame) -> Rect {
    let width = nb.width * frame.size.width;
    let height = nb.height * frame.size.height;
    let x = nb.x * frame.size.width + frame.origin.x;
    let y = (1.0 - nb.y) * frame.size.height - height + frame.origin.y;
    Rect::new(x, y, width, height)
}

/// Map every region into `frame`, one rectangle per region, same order.
pub fn map_faces(regions: &[FaceRegion], frame: DisplayFrame) -> Vec<Rect> {
    regions
        .iter()
        .map(|region| map_box(&region.normalized_box, &frame))
        .collect()
}

/// Rectangles of the active regions in the image's own pixel space,
/// in region order. This is the clip set the compositor consumes.
pub fn image_rects(regions: &[FaceRegion], width: u32, height: u32) -> Vec<Rect> {
    let frame = DisplayFrame::full(width, height);
    regions
        .iter()
        .filter(|region| region.active)
        .map(|region| map_box(&region.normalized_box, &frame))
        .collect()
}

/// Aspect-fit `image` inside `container`: scale uniformly until one axis
/// fills the container and center the result, leaving letterbox margins on
/// the other axis.
///
/// A zero-area image or container yields a zero-size frame centered in the
/// container.
pub fn aspect_fit(image: Size, container: Size) -> DisplayFrame {
    if image.is_empty() || container.is_empty() {
        let center = Point::new(
            container.width.max(0.0) / 2.0,
            container.height.max(0.0) / 2.0,
        );
        return DisplayFrame::new(center, Size::default());
    }

    let scale = (container.width / image.width).min(container.height / image.height);
    let size = Size::new(image.width * scale, image.height * scale);
    let origin = Point::new(
        (container.width - size.width) / 2.0,
        (container.height - size.height) / 2.0,
    );
    DisplayFrame::new(origin, size)
}

/// Index of the rectangle under `point`. Overlapping rectangles resolve to
/// the last one, which is drawn on top.
pub fn hit_test(rects: &[Rect], point: Point) -> Option<usize> {
    rects.iter().rposition(|rect| rect.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(boxes: &[(f64, f64, f64, f64)]) -> Vec<FaceRegion> {
        boxes
            .iter()
            .map(|&(x, y, w, h)| FaceRegion::new(NormalizedBox::new(x, y, w, h)))
            .collect()
    }

    fn assert_rect_eq(actual: Rect, expected: (f64, f64, f64, f64)) {
        let (x, y, w, h) = expected;
        assert!(
            (actual.x - x).abs() < 1e-9
                && (actual.y - y).abs() < 1e-9
                && (actual.width - w).abs() < 1e-9
                && (actual.height - h).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn two_faces_in_square_frame() {
        let faces = regions(&[(0.1, 0.1, 0.2, 0.2), (0.5, 0.5, 0.3, 0.3)]);
        let frame = DisplayFrame::full(1000, 1000);
        let rects = map_faces(&faces, frame);

        assert_eq!(rects.len(), 2);
        assert_rect_eq(rects[0], (100.0, 700.0, 200.0, 200.0));
        assert_rect_eq(rects[1], (500.0, 200.0, 300.0, 300.0));
    }

    #[test]
    fn empty_regions_map_to_nothing() {
        assert!(map_faces(&[], DisplayFrame::full(640, 480)).is_empty());
    }

    #[test]
    fn zero_size_frame_collapses_to_origin() {
        let faces = regions(&[(0.2, 0.3, 0.4, 0.5)]);
        let frame = DisplayFrame::new(Point::new(12.0, 34.0), Size::default());
        let rects = map_faces(&faces, frame);
        assert_rect_eq(rects[0], (12.0, 34.0, 0.0, 0.0));
    }

    #[test]
    fn doubling_frame_doubles_rects() {
        let faces = regions(&[(0.1, 0.2, 0.3, 0.4), (0.6, 0.0, 0.25, 0.5)]);
        let small = map_faces(&faces, DisplayFrame::full(300, 200));
        let large = map_faces(&faces, DisplayFrame::full(600, 400));

        for (s, l) in small.iter().zip(&large) {
            assert_rect_eq(*l, (s.x * 2.0, s.y * 2.0, s.width * 2.0, s.height * 2.0));
        }
    }

    #[test]
    fn bottom_anchored_box_touches_frame_bottom() {
        let faces = regions(&[(0.25, 0.0, 0.5, 0.3)]);
        let frame = DisplayFrame::new(Point::new(0.0, 40.0), Size::new(200.0, 100.0));
        let rect = map_faces(&faces, frame)[0];
        assert!((rect.max_y() - 140.0).abs() < 1e-9);
    }

    #[test]
    fn frame_origin_offsets_both_axes() {
        let faces = regions(&[(0.0, 0.5, 0.5, 0.5)]);
        let frame = DisplayFrame::new(Point::new(30.0, 50.0), Size::new(100.0, 100.0));
        assert_rect_eq(map_faces(&faces, frame)[0], (30.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn malformed_boxes_are_not_clamped() {
        let faces = regions(&[(0.9, -0.2, 0.5, 0.5)]);
        let rect = map_faces(&faces, DisplayFrame::full(100, 100))[0];
        assert_rect_eq(rect, (90.0, 70.0, 50.0, 50.0));
    }

    #[test]
    fn image_rects_keeps_only_active_in_order() {
        let mut faces = regions(&[
            (0.0, 0.0, 0.1, 0.1),
            (0.5, 0.5, 0.2, 0.2),
            (0.2, 0.7, 0.1, 0.1),
        ]);
        faces[0].active = true;
        faces[2].active = true;

        let rects = image_rects(&faces, 200, 100);
        assert_eq!(rects.len(), 2);
        assert_rect_eq(rects[0], (0.0, 90.0, 20.0, 10.0));
        assert_rect_eq(rects[1], (40.0, 20.0, 20.0, 10.0));
    }

    #[test]
    fn image_rects_uses_x_for_horizontal_origin() {
        let mut faces = regions(&[(0.6, 0.1, 0.2, 0.2)]);
        faces[0].active = true;
        let rect = image_rects(&faces, 100, 100)[0];
        assert!((rect.x - 60.0).abs() < 1e-9);
    }

    #[test]
    fn aspect_fit_letterboxes_wide_image() {
        // 400x200 into 300x300: scale 0.75 → 300x150, 75px bars top and bottom.
        let frame = aspect_fit(Size::new(400.0, 200.0), Size::new(300.0, 300.0));
        assert_eq!(frame.size, Size::new(300.0, 150.0));
        assert_eq!(frame.origin, Point::new(0.0, 75.0));
    }

    #[test]
    fn aspect_fit_pillarboxes_tall_image() {
        let frame = aspect_fit(Size::new(100.0, 200.0), Size::new(400.0, 200.0));
        assert_eq!(frame.size, Size::new(100.0, 200.0));
        assert_eq!(frame.origin, Point::new(150.0, 0.0));
    }

    #[test]
    fn aspect_fit_degenerate_inputs() {
        let frame = aspect_fit(Size::new(0.0, 100.0), Size::new(300.0, 200.0));
        assert_eq!(frame.size, Size::default());
        assert_eq!(frame.origin, Point::new(150.0, 100.0));

        let frame = aspect_fit(Size::new(100.0, 100.0), Size::default());
        assert_eq!(frame, DisplayFrame::default());
    }

    #[test]
    fn hit_test_finds_containing_rect() {
        let rects = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 20.0, 10.0, 10.0),
        ];
        assert_eq!(hit_test(&rects, Point::new(25.0, 25.0)), Some(1));
        assert_eq!(hit_test(&rects, Point::new(5.0, 5.0)), Some(0));
        assert_eq!(hit_test(&rects, Point::new(15.0, 15.0)), None);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(10.0, 10.0, 10.0, 10.0),
        ];
        assert_eq!(hit_test(&rects, Point::new(15.0, 15.0)), Some(1));
    }
}
