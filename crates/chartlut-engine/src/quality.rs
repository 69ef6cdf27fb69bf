//! Robust per-patch color and quality estimation.
//!
//! A physical chart patch is sampled as many pixels; glare, dust and
//! demosaic fringing leave outliers in that sample cloud. This module
//! condenses one patch's pixel samples into a single representative
//! color plus a coefficient-of-variation quality score, rejecting
//! outliers by distance from the luminance median (MAD filter) before
//! aggregating. When the filter would leave fewer than the configured
//! minimum of samples, all samples are used instead.

use crate::{EngineConfig, EngineResult, PatchSet};
use chartlut_color::luminance;
use chartlut_math::{stats, Vec3};

/// Condenses a patch's pixel samples into (representative color, CV).
///
/// Outliers are rejected on the luminance axis; the surviving samples
/// are averaged per channel and their luminance CV becomes the quality
/// score (0 = perfectly uniform patch).
///
/// # Errors
///
/// [`StatsError::EmptyInput`](chartlut_math::StatsError) when `samples`
/// is empty.
///
/// # Example
///
/// ```rust
/// use chartlut_math::Vec3;
/// use chartlut_engine::{quality, EngineConfig};
///
/// let samples = vec![Vec3::splat(0.5); 8];
/// let (color, cv) = quality::robust_patch_color(&samples, &EngineConfig::default()).unwrap();
/// assert_eq!(color, Vec3::splat(0.5));
/// assert_eq!(cv, 0.0);
/// ```
pub fn robust_patch_color(
    samples: &[Vec3],
    config: &EngineConfig,
) -> EngineResult<(Vec3, f32)> {
    let lums: Vec<f32> = samples.iter().map(|&c| luminance(c)).collect();
    let kept = stats::reject_outliers(&lums, config.outlier_sigma, config.min_outlier_samples)?;

    let mut acc = Vec3::ZERO;
    for &i in &kept {
        acc = acc + samples[i];
    }
    let color = acc / kept.len() as f32;

    let kept_lums: Vec<f32> = kept.iter().map(|&i| lums[i]).collect();
    let cv = stats::cv(&kept_lums)?;

    Ok((color, cv))
}

/// Builds a [`PatchSet`] from per-patch pixel sample clouds.
///
/// `skipped` is the extraction layer's count of non-color grid
/// positions, recorded on the resulting set.
///
/// # Errors
///
/// Fails if any individual patch has no samples.
pub fn patch_set_from_samples(
    patches: &[Vec<Vec3>],
    skipped: usize,
    config: &EngineConfig,
) -> EngineResult<PatchSet> {
    let mut colors = Vec::with_capacity(patches.len());
    let mut scores = Vec::with_capacity(patches.len());
    for samples in patches {
        let (color, cv) = robust_patch_color(samples, config)?;
        colors.push(color);
        scores.push(cv);
    }
    PatchSet::new(colors, scores, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_uniform_patch_cv_zero() {
        let samples = vec![Vec3::splat(0.3); 10];
        let (color, cv) = robust_patch_color(&samples, &EngineConfig::default()).unwrap();
        assert_eq!(color, Vec3::splat(0.3));
        assert_eq!(cv, 0.0);
    }

    #[test]
    fn test_glare_outlier_rejected() {
        let mut samples = vec![Vec3::splat(0.4); 12];
        samples.push(Vec3::ONE); // specular spike
        let (color, _) = robust_patch_color(&samples, &EngineConfig::default()).unwrap();
        assert_abs_diff_eq!(color.x, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(color.y, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(color.z, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_tiny_patch_uses_all_samples() {
        // Two disagreeing samples: below min_outlier_samples the
        // filter falls back to all of them.
        let samples = vec![Vec3::splat(0.2), Vec3::splat(0.6)];
        let (color, cv) = robust_patch_color(&samples, &EngineConfig::default()).unwrap();
        assert_abs_diff_eq!(color.x, 0.4, epsilon = 1e-6);
        assert!(cv > 0.0);
    }

    #[test]
    fn test_empty_patch_errors() {
        let err = robust_patch_color(&[], &EngineConfig::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_patch_set_from_samples() {
        let patches = vec![
            vec![Vec3::splat(0.1); 5],
            vec![Vec3::splat(0.9); 5],
        ];
        let set = patch_set_from_samples(&patches, 2, &EngineConfig::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped(), 2);
        assert_eq!(set.quality(), &[0.0, 0.0]);
    }
}
