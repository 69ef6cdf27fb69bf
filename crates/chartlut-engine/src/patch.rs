//! Patch sets: the engine's input unit.
//!
//! A [`PatchSet`] is an ordered sequence of extracted patch colors with
//! a parallel sequence of per-patch quality scores (coefficient of
//! variation; 0 means perfectly uniform). Ordering is load-bearing:
//! index `i` in the reference set corresponds to index `i` in the
//! camera set, and every interpolation strategy relies on that pairing.

use crate::{EngineError, EngineResult};
use chartlut_math::Vec3;

/// An ordered set of patch colors with parallel quality scores.
///
/// The constructor enforces `colors.len() == quality.len()`; the fields
/// stay private so the invariant cannot be broken afterwards.
///
/// `skipped` carries the extraction layer's count of non-color grid
/// positions (markers, fiducials). The engine records it without
/// interpreting it.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchSet {
    colors: Vec<Vec3>,
    quality: Vec<f32>,
    skipped: usize,
}

impl PatchSet {
    /// Creates a patch set from parallel color and quality sequences.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidData`] when the sequences differ in
    /// length.
    pub fn new(colors: Vec<Vec3>, quality: Vec<f32>, skipped: usize) -> EngineResult<Self> {
        if colors.len() != quality.len() {
            return Err(EngineError::InvalidData(format!(
                "{} colors but {} quality scores",
                colors.len(),
                quality.len()
            )));
        }
        Ok(Self {
            colors,
            quality,
            skipped,
        })
    }

    /// Creates a patch set with all quality scores at 0 (assumed
    /// perfectly uniform patches).
    pub fn from_colors(colors: Vec<Vec3>) -> Self {
        let quality = vec![0.0; colors.len()];
        Self {
            colors,
            quality,
            skipped: 0,
        }
    }

    /// Number of patches.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the set holds no patches.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The patch colors, in extraction order.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Per-patch quality scores (CV), parallel to [`colors`](Self::colors).
    pub fn quality(&self) -> &[f32] {
        &self.quality
    }

    /// Count of grid positions the extraction layer skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Mean quality score, or 0 for an empty set.
    pub fn mean_quality(&self) -> f32 {
        if self.quality.is_empty() {
            return 0.0;
        }
        self.quality.iter().sum::<f32>() / self.quality.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_invariant() {
        let err = PatchSet::new(vec![Vec3::ZERO, Vec3::ONE], vec![0.0], 0);
        assert!(matches!(err, Err(EngineError::InvalidData(_))));
    }

    #[test]
    fn test_from_colors_zero_quality() {
        let set = PatchSet::from_colors(vec![Vec3::splat(0.2), Vec3::splat(0.8)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.quality(), &[0.0, 0.0]);
        assert_eq!(set.mean_quality(), 0.0);
    }

    #[test]
    fn test_skipped_is_carried() {
        let set = PatchSet::new(vec![Vec3::ZERO], vec![0.1], 4).unwrap();
        assert_eq!(set.skipped(), 4);
    }
}
