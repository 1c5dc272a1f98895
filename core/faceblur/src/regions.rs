use crate::error::FaceBlurError;
use crate::geometry::NormalizedBox;

/// One detected face and whether it should be pixelated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRegion {
    /// Face box as reported by the detector (normalized, bottom-left origin).
    pub normalized_box: NormalizedBox,
    /// Whether the face is pixelated in the rendered output.
    pub active: bool,
}

impl FaceRegion {
    /// A new, inactive region.
    pub fn new(normalized_box: NormalizedBox) -> Self {
        Self {
            normalized_box,
            active: false,
        }
    }
}

/// The faces found by one detection pass.
///
/// Length and order are fixed at construction; only the per-face `active`
/// flag changes, and only through [`FaceRegions::toggle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceRegions {
    regions: Vec<FaceRegion>,
}

impl FaceRegions {
    /// Build an all-inactive region set from detector output.
    pub fn from_boxes(boxes: impl IntoIterator<Item = NormalizedBox>) -> Self {
        Self {
            regions: boxes.into_iter().map(FaceRegion::new).collect(),
        }
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when no faces were detected.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All regions in detection order.
    pub fn as_slice(&self) -> &[FaceRegion] {
        &self.regions
    }

    /// Region at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&FaceRegion> {
        self.regions.get(index)
    }

    /// Flip the `active` flag of one face and return its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, FaceBlurError> {
        let len = self.regions.len();
        let region = self
            .regions
            .get_mut(index)
            .ok_or(FaceBlurError::RegionOutOfRange { index, len })?;
        region.active = !region.active;
        Ok(region.active)
    }

    /// Number of active faces.
    pub fn active_count(&self) -> usize {
        self.regions.iter().filter(|r| r.active).count()
    }
}
