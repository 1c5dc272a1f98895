use image::GrayImage;

use crate::error::FaceBlurError;
use crate::geometry::NormalizedBox;

/// Pluggable face detection backend.
///
/// Implement this trait to provide a custom face detector (ONNX, dlib, etc.)
/// and pass it to [`crate::FaceBlurSession::face_detector`].
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a grayscale image.
    ///
    /// Returns the faces in a stable order as normalized, bottom-left-origin
    /// boxes (see [`NormalizedBox::from_pixel_bounds`]). Failures should be
    /// reported as [`FaceBlurError::DetectionFailure`].
    fn detect(&self, gray: &GrayImage) -> Result<Vec<NormalizedBox>, FaceBlurError>;
}
