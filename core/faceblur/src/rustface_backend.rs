use std::io::Read;
use std::path::Path;

use image::GrayImage;

use crate::error::FaceBlurError;
use crate::face_detector::FaceDetector;
use crate::geometry::NormalizedBox;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The SeetaFace frontal model (`seeta_fd_frontal_v1.0.bin`) is not bundled;
/// load it from a file or any reader.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace model from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FaceBlurError> {
        let model =
            rustface::read_model(reader).map_err(|e| FaceBlurError::ModelLoad(e.to_string()))?;
        Ok(Self { model })
    }

    /// Load a SeetaFace model from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FaceBlurError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| FaceBlurError::ModelLoad(format!("{}: {e}", path.display())))?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &GrayImage) -> Result<Vec<NormalizedBox>, FaceBlurError> {
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Err(FaceBlurError::DetectionFailure(
                "image dimensions are zero".to_string(),
            ));
        }

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray.as_raw(), width, height));
        tracing::debug!(count = faces.len(), width, height, "rustface detection finished");

        let scored = faces.iter().map(|face| {
            let bbox = face.bbox();
            ScoredBounds {
                score: face.score(),
                x: bbox.x() as f64,
                y: bbox.y() as f64,
                width: bbox.width() as f64,
                height: bbox.height() as f64,
            }
        });
        Ok(normalize_by_score(scored, width, height))
    }
}

/// A detector hit in top-left pixel coordinates.
#[derive(Debug, Clone, Copy)]
struct ScoredBounds {
    score: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Strongest hit first, converted to normalized bottom-left boxes.
fn normalize_by_score(
    faces: impl IntoIterator<Item = ScoredBounds>,
    width: u32,
    height: u32,
) -> Vec<NormalizedBox> {
    let mut faces: Vec<ScoredBounds> = faces.into_iter().collect();
    faces.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    faces
        .iter()
        .map(|f| NormalizedBox::from_pixel_bounds(f.x, f.y, f.width, f.height, width, height))
        .collect()
}
