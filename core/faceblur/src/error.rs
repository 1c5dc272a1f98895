use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceBlurError {
    #[error("face detection failed: {0}")]
    DetectionFailure(String),

    #[error("image dimensions differ: base is {base:?}, filtered is {filtered:?}")]
    DimensionMismatch {
        base: (u32, u32),
        filtered: (u32, u32),
    },

    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("pixel scale must be > 0")]
    InvalidPixelScale,

    #[error("quality must be between 0.0 and 1.0, got {0}")]
    InvalidQuality(f32),

    #[error("face index {index} out of range for {len} detected faces")]
    RegionOutOfRange { index: usize, len: usize },

    #[error("failed to load face detection model: {0}")]
    ModelLoad(String),
}
