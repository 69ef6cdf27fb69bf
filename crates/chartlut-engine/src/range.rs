//! Luminance range analysis and mapping.
//!
//! Two captures of the same chart rarely share a dynamic range: the
//! camera render may crush shadows, lift blacks or clip highlights.
//! This module measures each patch set's luminance distribution
//! ([`analyze`]) and derives the affine remapping between two
//! distributions ([`map_ranges`]) that the range-aware interpolation
//! strategy consumes.
//!
//! Robust bounds use the 5th/95th percentile rather than raw min/max so
//! a single outlier patch cannot stretch the measured range.

use crate::{EngineConfig, EngineResult};
use chartlut_color::luminance;
use chartlut_math::{stats, Vec3};
use serde::Serialize;

/// Luminance distribution statistics for one patch set.
///
/// Computed once per set per generation run; immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RangeStats {
    /// Raw minimum luminance.
    pub min: f32,
    /// Raw maximum luminance.
    pub max: f32,
    /// Mean luminance.
    pub mean: f32,
    /// Median luminance.
    pub median: f32,
    /// Population standard deviation of luminance.
    pub std: f32,
    /// 5th percentile (robust lower bound).
    pub robust_min: f32,
    /// 95th percentile (robust upper bound).
    pub robust_max: f32,
    /// Robust span: `robust_max - robust_min`.
    pub range: f32,
    /// Michelson contrast over the robust bounds.
    pub contrast: f32,
    /// Ratio of robust bounds, floor-guarded against black.
    pub dynamic_range: f32,
    /// Per-patch luminances in extraction order.
    pub luminances: Vec<f32>,
    /// Distribution quality score in [0, 1].
    pub quality_score: f32,
}

/// How to fit the affine luminance remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RangeMappingMode {
    /// Affine fit through the robust (P5/P95) endpoints. The mode the
    /// interpolator consumes.
    #[default]
    Linear,
    /// Affine fit through the raw min/max endpoints.
    Stretch,
    /// Robust-span scale with offsets aligned at the robust midpoints.
    Midpoint,
    /// First-two-moment matching: stddev ratio and mean offset.
    Histogram,
}

impl std::str::FromStr for RangeMappingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "stretch" => Ok(Self::Stretch),
            "midpoint" => Ok(Self::Midpoint),
            "histogram" => Ok(Self::Histogram),
            other => Err(format!("unknown range mapping mode: {other:?}")),
        }
    }
}

/// Affine luminance remapping between two patch sets.
///
/// `mapped = luminance * scale + offset` takes a reference-chart
/// luminance into the camera capture's luminance range.
#[derive(Debug, Clone, Serialize)]
pub struct RangeMapping {
    /// Ratio of camera span to reference span.
    pub scale: f32,
    /// Affine shift.
    pub offset: f32,
    /// How well the two distributions agree, in [0, 1].
    pub compatibility_score: f32,
    /// Reference-set luminances, in extraction order.
    pub ref_luminances: Vec<f32>,
    /// Camera-set luminances, in extraction order.
    pub cam_luminances: Vec<f32>,
}

impl RangeMapping {
    /// Applies the affine map to a luminance value.
    #[inline]
    pub fn map(&self, lum: f32) -> f32 {
        lum * self.scale + self.offset
    }
}

/// Computes luminance distribution statistics for a patch set.
///
/// # Errors
///
/// [`StatsError::EmptyInput`](chartlut_math::StatsError) when `colors`
/// is empty.
///
/// # Example
///
/// ```rust
/// use chartlut_math::Vec3;
/// use chartlut_engine::{range, EngineConfig};
///
/// let grays: Vec<Vec3> = (0..=10).map(|i| Vec3::splat(i as f32 / 10.0)).collect();
/// let stats = range::analyze(&grays, &EngineConfig::default()).unwrap();
/// assert!(stats.range > 0.8);
/// assert!((stats.robust_min - 0.05).abs() < 1e-6);
/// ```
pub fn analyze(colors: &[Vec3], config: &EngineConfig) -> EngineResult<RangeStats> {
    let luminances: Vec<f32> = colors.iter().map(|&c| luminance(c)).collect();

    let mut sorted = luminances.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let mean = stats::mean(&luminances)?;
    let median = stats::median(&luminances)?;
    let std = stats::stddev(&luminances)?;
    let robust_min = stats::percentile(&sorted, 5.0)?;
    let robust_max = stats::percentile(&sorted, 95.0)?;
    let range = robust_max - robust_min;

    let contrast_denom = robust_max + robust_min;
    let contrast = if contrast_denom > 0.0 {
        range / contrast_denom
    } else {
        0.0
    };
    let dynamic_range = robust_max / robust_min.max(config.min_luminance);

    let quality_score = quality_score(&luminances, mean, range, config);

    Ok(RangeStats {
        min,
        max,
        mean,
        median,
        std,
        robust_min,
        robust_max,
        range,
        contrast,
        dynamic_range,
        luminances,
        quality_score,
    })
}

/// Scores how well a luminance distribution suits calibration.
///
/// Starts at 1.0 and deducts for: limited range utilization (-0.3
/// below the usable span, -0.15 between usable and full), off-center
/// mean (-0.2), shadow/highlight clipping (-0.3), and a lumpy
/// histogram (-0.2). Floored at 0.
fn quality_score(luminances: &[f32], mean: f32, span: f32, config: &EngineConfig) -> f32 {
    let mut score = 1.0_f32;

    if span <= config.good_span {
        score -= 0.3;
    } else if span <= config.full_span {
        score -= 0.15;
    }

    if mean < config.center_low || mean > config.center_high {
        score -= 0.2;
    }

    let n = luminances.len() as f32;
    let clipped = luminances
        .iter()
        .filter(|&&l| l < config.clip_low || l > config.clip_high)
        .count() as f32;
    if clipped / n > config.clip_fraction {
        score -= 0.3;
    }

    if histogram_stddev(luminances, config.histogram_bins) > config.uniformity_reference {
        score -= 0.2;
    }

    score.max(0.0)
}

/// Standard deviation of the normalized bin fractions of a luminance
/// histogram. A perfectly uniform distribution scores 0.
fn histogram_stddev(luminances: &[f32], bins: usize) -> f32 {
    let mut counts = vec![0usize; bins];
    for &l in luminances {
        let bin = ((l.clamp(0.0, 1.0) * bins as f32) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    let n = luminances.len() as f32;
    let fractions: Vec<f32> = counts.iter().map(|&c| c as f32 / n).collect();
    // Non-empty by construction: bins >= 1.
    stats::stddev(&fractions).unwrap_or(0.0)
}

/// Derives the affine luminance remapping between two distributions.
///
/// The linear mode fits through the robust endpoints:
/// `scale = cam_span / max(ref_span, min_span)` and
/// `offset = cam_robust_min - ref_robust_min * scale`. The other modes
/// are alternate affine fits over the same statistics.
///
/// Mapping a distribution onto itself yields `scale ≈ 1`, `offset ≈ 0`
/// and a compatibility score of exactly 1.0.
pub fn map_ranges(
    reference: &RangeStats,
    camera: &RangeStats,
    mode: RangeMappingMode,
    config: &EngineConfig,
) -> RangeMapping {
    let ref_span = reference.range;
    let cam_span = camera.range;

    let (scale, offset) = match mode {
        RangeMappingMode::Linear => {
            let scale = cam_span / ref_span.max(config.min_span);
            (scale, camera.robust_min - reference.robust_min * scale)
        }
        RangeMappingMode::Stretch => {
            let scale = (camera.max - camera.min) / (reference.max - reference.min).max(config.min_span);
            (scale, camera.min - reference.min * scale)
        }
        RangeMappingMode::Midpoint => {
            let scale = cam_span / ref_span.max(config.min_span);
            let ref_mid = (reference.robust_min + reference.robust_max) / 2.0;
            let cam_mid = (camera.robust_min + camera.robust_max) / 2.0;
            (scale, cam_mid - ref_mid * scale)
        }
        RangeMappingMode::Histogram => {
            let scale = camera.std / reference.std.max(config.min_span);
            (scale, camera.mean - reference.mean * scale)
        }
    };

    RangeMapping {
        scale,
        offset,
        compatibility_score: compatibility_score(reference, camera, config),
        ref_luminances: reference.luminances.clone(),
        cam_luminances: camera.luminances.clone(),
    }
}

/// Scores how compatible two luminance distributions are.
///
/// Deducts 0.4 when the span ratio leaves [0.5, 2.0], 0.3 when the
/// mean luminances differ by more than 0.3, and 0.3 when the skewness
/// (third standardized moment) differs by more than 1.0. Floored at 0;
/// identical distributions score exactly 1.0.
pub fn compatibility_score(
    reference: &RangeStats,
    camera: &RangeStats,
    config: &EngineConfig,
) -> f32 {
    let mut score = 1.0_f32;

    let ratio = camera.range / reference.range.max(config.min_span);
    if ratio < config.span_ratio_low || ratio > config.span_ratio_high {
        score -= 0.4;
    }

    if (camera.mean - reference.mean).abs() > config.max_mean_difference {
        score -= 0.3;
    }

    let ref_skew = stats::skewness(&reference.luminances).unwrap_or(0.0);
    let cam_skew = stats::skewness(&camera.luminances).unwrap_or(0.0);
    if (cam_skew - ref_skew).abs() > config.max_skew_difference {
        score -= 0.3;
    }

    score.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gray_ramp(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::splat(i as f32 / (n - 1) as f32)).collect()
    }

    #[test]
    fn test_analyze_ramp() {
        let config = EngineConfig::default();
        let s = analyze(&gray_ramp(21), &config).unwrap();
        assert_eq!(s.min, 0.0);
        assert_abs_diff_eq!(s.max, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(s.mean, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(s.median, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(s.robust_min, 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(s.robust_max, 0.95, epsilon = 1e-6);
        assert_eq!(s.luminances.len(), 21);
    }

    #[test]
    fn test_robust_bounds_resist_outlier() {
        // 20 mid-gray patches plus one white outlier: the raw max
        // moves, the robust max barely does.
        let mut colors = vec![Vec3::splat(0.5); 20];
        colors.push(Vec3::ONE);
        let s = analyze(&colors, &EngineConfig::default()).unwrap();
        assert_abs_diff_eq!(s.max, 1.0, epsilon = 1e-6);
        assert!(s.robust_max < 0.6, "robust_max = {}", s.robust_max);
    }

    #[test]
    fn test_quality_full_ramp_is_high() {
        // Full span, centered, uniform histogram. The ramp endpoints
        // sit exactly at 0 and 1, so the clipping check fires (2/21 is
        // above the 5% tolerance) and costs 0.3; nothing else deducts.
        let s = analyze(&gray_ramp(21), &EngineConfig::default()).unwrap();
        assert_abs_diff_eq!(s.quality_score, 0.7, epsilon = 1e-6);
    }

    #[test]
    fn test_quality_narrow_range_deducted() {
        let colors: Vec<Vec3> = (0..20).map(|i| Vec3::splat(0.45 + i as f32 * 0.005)).collect();
        let s = analyze(&colors, &EngineConfig::default()).unwrap();
        // Narrow span (-0.3) and concentrated histogram (-0.2).
        assert!(s.quality_score <= 0.5, "score = {}", s.quality_score);
    }

    #[test]
    fn test_quality_clipped_shadows_deducted() {
        // Interior ramp (0.1..0.9): nothing clips.
        let interior: Vec<Vec3> = (1..=9).map(|i| Vec3::splat(i as f32 / 10.0)).collect();
        let clean = analyze(&interior, &EngineConfig::default()).unwrap();

        let mut colors = interior.clone();
        colors.extend(vec![Vec3::splat(0.005); 5]); // crushed blacks
        let clipped = analyze(&colors, &EngineConfig::default()).unwrap();
        assert!(clipped.quality_score < clean.quality_score);
    }

    #[test]
    fn test_map_ranges_self_is_identity() {
        let config = EngineConfig::default();
        let s = analyze(&gray_ramp(21), &config).unwrap();
        let m = map_ranges(&s, &s, RangeMappingMode::Linear, &config);
        assert_abs_diff_eq!(m.scale, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(m.offset, 0.0, epsilon = 1e-5);
        assert_eq!(m.compatibility_score, 1.0);
    }

    #[test]
    fn test_map_ranges_compressed_camera() {
        let config = EngineConfig::default();
        let reference = analyze(&gray_ramp(21), &config).unwrap();
        // Camera compresses everything into [0.25, 0.75].
        let cam_colors: Vec<Vec3> = (0..21)
            .map(|i| Vec3::splat(0.25 + 0.5 * i as f32 / 20.0))
            .collect();
        let camera = analyze(&cam_colors, &config).unwrap();
        let m = map_ranges(&reference, &camera, RangeMappingMode::Linear, &config);
        assert_abs_diff_eq!(m.scale, 0.5, epsilon = 1e-3);
        // Reference 0 should land near camera black point.
        assert_abs_diff_eq!(m.map(0.05), 0.275, epsilon = 1e-3);
    }

    #[test]
    fn test_compatibility_detects_span_mismatch() {
        let config = EngineConfig::default();
        let wide = analyze(&gray_ramp(21), &config).unwrap();
        let narrow_colors: Vec<Vec3> = (0..21).map(|i| Vec3::splat(0.4 + 0.1 * i as f32 / 20.0)).collect();
        let narrow = analyze(&narrow_colors, &config).unwrap();
        let score = compatibility_score(&wide, &narrow, &config);
        assert!(score < 1.0);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("linear".parse::<RangeMappingMode>().unwrap(), RangeMappingMode::Linear);
        assert_eq!("histogram".parse::<RangeMappingMode>().unwrap(), RangeMappingMode::Histogram);
        assert!("gamma".parse::<RangeMappingMode>().is_err());
    }

    #[test]
    fn test_midpoint_mode_aligns_centers() {
        let config = EngineConfig::default();
        let reference = analyze(&gray_ramp(21), &config).unwrap();
        let lifted: Vec<Vec3> = (0..21).map(|i| Vec3::splat(0.2 + 0.8 * i as f32 / 20.0)).collect();
        let camera = analyze(&lifted, &config).unwrap();
        let m = map_ranges(&reference, &camera, RangeMappingMode::Midpoint, &config);
        let ref_mid = (reference.robust_min + reference.robust_max) / 2.0;
        let cam_mid = (camera.robust_min + camera.robust_max) / 2.0;
        assert_abs_diff_eq!(m.map(ref_mid), cam_mid, epsilon = 1e-5);
    }
}
