//! Face pixelation for photos: detect faces, let the user pick which ones to
//! hide, and render the photo with the picked faces pixelated.
//!
//! # Example
//!
//! ```no_run
//! use faceblur::{FaceBlurSession, OutputFormat, Point, Size};
//!
//! let raw_bytes = std::fs::read("photo.jpg").unwrap();
//! let mut session = FaceBlurSession::new().pixel_scale(12);
//! session.import(&raw_bytes).unwrap();
//!
//! // Lay the faces out in a 390x844 view and hide whatever was tapped.
//! session.set_container(Size::new(390.0, 844.0));
//! session.tap(Point::new(120.0, 300.0));
//!
//! let png = session.render_encoded(&OutputFormat::Png, 1.0).unwrap();
//! println!("Rendered: {:?} bytes", png.map(|bytes| bytes.len()));
//! ```
#![warn(missing_docs)]

mod codec;
mod composite;
mod error;
/// Face detection traits.
pub mod face_detector;
/// Points, sizes, rectangles, and normalized face boxes.
///
/// Pixel-space types use a top-left origin with y growing downward.
/// [`NormalizedBox`] is the exception: fractions of the image with a
/// bottom-left origin, the way detection APIs report faces.
pub mod geometry;
/// Mapping normalized face boxes to display and image coordinates.
pub mod layout;
mod pixelate;
mod regions;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;

use image::RgbaImage;

/// Masked compositing of a filtered image over its base.
pub use composite::composite;
/// Error type returned by faceblur operations.
pub use error::FaceBlurError;
/// Face detection trait.
pub use face_detector::FaceDetector;
pub use geometry::{DisplayFrame, NormalizedBox, Point, Rect, Size};
pub use layout::{aspect_fit, hit_test, image_rects, map_faces};
/// Block pixelation filter and its default block size.
pub use pixelate::{pixelate, DEFAULT_PIXEL_SCALE};
/// Per-face toggle state.
pub use regions::{FaceRegion, FaceRegions};
#[cfg(feature = "rustface")]
/// Built-in detector that loads a SeetaFace model.
pub use rustface_backend::RustfaceDetector;

/// Output image format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless PNG, alpha preserved.
    #[default]
    Png,

    /// JPEG encoding; alpha is flattened onto white.
    Jpeg,

    /// Lossless WebP.
    Webp,
}

/// One photo being edited: the imported image, its detected faces, where
/// they sit on screen, and which of them are pixelated.
///
/// Importing a new image replaces the face set and clears every toggle.
/// Operations that need an image are no-ops until one has been imported.
pub struct FaceBlurSession {
    pixel_scale: u32,
    /// When `None`, imports produce no faces unless regions are supplied
    /// through [`FaceBlurSession::set_regions`].
    detector: Option<Box<dyn FaceDetector>>,
    image: Option<RgbaImage>,
    regions: FaceRegions,
    container: Option<Size>,
}

impl Default for FaceBlurSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceBlurSession {
    /// Create an empty session with the default pixel scale and no detector.
    pub fn new() -> Self {
        Self {
            pixel_scale: DEFAULT_PIXEL_SCALE,
            detector: None,
            image: None,
            regions: FaceRegions::default(),
            container: None,
        }
    }

    /// Set the pixelation block size in pixels (default: 12).
    pub fn pixel_scale(mut self, scale: u32) -> Self {
        self.pixel_scale = scale;
        self
    }

    /// Provide the face detector run on every import.
    ///
    /// ```no_run
    /// use faceblur::{FaceBlurError, FaceBlurSession, FaceDetector, NormalizedBox};
    /// use image::GrayImage;
    ///
    /// struct MyDetector;
    /// impl FaceDetector for MyDetector {
    ///     fn detect(&self, gray: &GrayImage) -> Result<Vec<NormalizedBox>, FaceBlurError> {
    ///         // Your detection logic here
    ///         Ok(vec![])
    ///     }
    /// }
    ///
    /// let session = FaceBlurSession::new().face_detector(Box::new(MyDetector));
    /// ```
    pub fn face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Decode `input` (JPEG, PNG, or WebP), make it the current image, and run
    /// face detection. Returns the number of faces found.
    pub fn import(&mut self, input: &[u8]) -> Result<usize, FaceBlurError> {
        let decoded = codec::decode_image(input)?;
        self.import_image(decoded.to_rgba8())
    }

    /// Make an already decoded image the current image and run face detection.
    /// Returns the number of faces found.
    ///
    /// A detector failure is logged and treated as zero faces; the import
    /// itself still succeeds.
    pub fn import_image(&mut self, image: RgbaImage) -> Result<usize, FaceBlurError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(FaceBlurError::ZeroDimensions);
        }

        let boxes = match &self.detector {
            Some(detector) => {
                let gray = image::imageops::grayscale(&image);
                match detector.detect(&gray) {
                    Ok(boxes) => boxes,
                    Err(e) => {
                        tracing::warn!("face detection failed: {e}");
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            faces = boxes.len(),
            "imported image"
        );

        self.image = Some(image);
        self.regions = FaceRegions::from_boxes(boxes);
        Ok(self.regions.len())
    }

    /// Replace the face set with the result of an external detection pass.
    /// Every face starts inactive. Returns the number of faces, or 0 when no
    /// image is loaded.
    pub fn set_regions(&mut self, boxes: Vec<NormalizedBox>) -> usize {
        if self.image.is_none() {
            tracing::debug!("set_regions ignored: no image loaded");
            return 0;
        }
        self.regions = FaceRegions::from_boxes(boxes);
        self.regions.len()
    }

    /// The current image, if one was imported.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// The current faces and their toggle state.
    pub fn regions(&self) -> &FaceRegions {
        &self.regions
    }

    /// Record the size of the view the image is shown in (call again after
    /// rotation or any resize) and return the faces laid out in it.
    pub fn set_container(&mut self, container: Size) -> Vec<Rect> {
        self.container = Some(container);
        self.face_rects()
    }

    /// Where the image is drawn inside the container, honoring aspect-fit
    /// letterboxing. `None` until both an image and a container are known.
    pub fn display_frame(&self) -> Option<DisplayFrame> {
        let image = self.image.as_ref()?;
        let container = self.container?;
        let image_size = Size::new(image.width() as f64, image.height() as f64);
        Some(aspect_fit(image_size, container))
    }

    /// On-screen rectangles of the current faces, in face order.
    pub fn face_rects(&self) -> Vec<Rect> {
        match self.display_frame() {
            Some(frame) => map_faces(self.regions.as_slice(), frame),
            None => Vec::new(),
        }
    }

    /// Flip one face between pixelated and clear. Returns its new state, or
    /// `None` when no image is loaded.
    pub fn toggle(&mut self, index: usize) -> Result<Option<bool>, FaceBlurError> {
        if self.image.is_none() {
            tracing::debug!(index, "toggle ignored: no image loaded");
            return Ok(None);
        }
        self.regions.toggle(index).map(Some)
    }

    /// Toggle the face under a tap at `point` (container coordinates).
    /// Returns the index of the toggled face, or `None` for a miss.
    pub fn tap(&mut self, point: Point) -> Option<usize> {
        if self.image.is_none() {
            tracing::debug!("tap ignored: no image loaded");
            return None;
        }
        let index = hit_test(&self.face_rects(), point)?;
        self.regions.toggle(index).ok()?;
        Some(index)
    }

    /// Render the current image with every active face pixelated.
    /// `Ok(None)` when no image is loaded.
    pub fn render(&self) -> Result<Option<RgbaImage>, FaceBlurError> {
        let Some(base) = self.image.as_ref() else {
            tracing::debug!("render skipped: no image loaded");
            return Ok(None);
        };

        let (width, height) = base.dimensions();
        let active = image_rects(self.regions.as_slice(), width, height);
        if active.is_empty() {
            return Ok(Some(base.clone()));
        }

        // Fails with InvalidPixelScale for a zero scale.
        let filtered = pixelate(base, self.pixel_scale)?;
        composite(base, &filtered, &active).map(Some)
    }

    /// Render and encode in one step. `quality` (0.0–1.0) applies to JPEG.
    pub fn render_encoded(
        &self,
        format: &OutputFormat,
        quality: f32,
    ) -> Result<Option<Vec<u8>>, FaceBlurError> {
        match self.render()? {
            Some(rendered) => codec::encode_image(&rendered, format, quality).map(Some),
            None => Ok(None),
        }
    }
}
