//! Engine configuration.
//!
//! All tunables live in one immutable value handed to each component,
//! never in ambient global state. [`EngineConfig::default`] reproduces
//! the reference behavior; tests and callers may override individual
//! fields with struct-update syntax.

/// Tunable thresholds and weights for the calibration engine.
///
/// # Example
///
/// ```rust
/// use chartlut_engine::EngineConfig;
///
/// let config = EngineConfig {
///     neighbor_count: 6,
///     ..EngineConfig::default()
/// };
/// assert_eq!(config.exact_hit_weight, 1e6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Neighbors consulted per interpolation query (k).
    pub neighbor_count: usize,
    /// Weight assigned to a zero-distance neighbor (an exact hit).
    pub exact_hit_weight: f32,
    /// Multiplier on the luminance term of the range-aware metric
    /// (color distance is weighted 1.0).
    pub luminance_metric_weight: f32,
    /// Luminances below this are treated as black; guards the
    /// range-aware gain division and the dynamic-range ratio.
    pub min_luminance: f32,
    /// Smallest span allowed as a scale denominator when mapping one
    /// luminance range onto another.
    pub min_span: f32,
    /// MAD multiplier for per-patch outlier rejection.
    pub outlier_sigma: f32,
    /// Minimum samples that must survive outlier rejection; below
    /// this, all samples are used.
    pub min_outlier_samples: usize,
    /// Bins in the luminance histogram used for uniformity scoring.
    pub histogram_bins: usize,

    // Range-quality thresholds (see `range::analyze`).
    /// Robust span above this counts as usable range.
    pub good_span: f32,
    /// Robust span above this counts as full range.
    pub full_span: f32,
    /// Acceptable window for mean luminance, low edge.
    pub center_low: f32,
    /// Acceptable window for mean luminance, high edge.
    pub center_high: f32,
    /// Luminance below this counts as shadow clipping.
    pub clip_low: f32,
    /// Luminance above this counts as highlight clipping.
    pub clip_high: f32,
    /// Fraction of clipped samples tolerated before deduction.
    pub clip_fraction: f32,
    /// Histogram std-dev reference for the uniformity deduction.
    pub uniformity_reference: f32,

    // Range-compatibility thresholds (see `range::map_ranges`).
    /// Acceptable span ratio window, low edge.
    pub span_ratio_low: f32,
    /// Acceptable span ratio window, high edge.
    pub span_ratio_high: f32,
    /// Largest tolerated mean-luminance difference.
    pub max_mean_difference: f32,
    /// Largest tolerated skewness difference.
    pub max_skew_difference: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 4,
            exact_hit_weight: 1e6,
            luminance_metric_weight: 2.0,
            min_luminance: 0.001,
            min_span: 0.001,
            outlier_sigma: 2.5,
            min_outlier_samples: 3,
            histogram_bins: 10,
            good_span: 0.3,
            full_span: 0.8,
            center_low: 0.2,
            center_high: 0.8,
            clip_low: 0.02,
            clip_high: 0.98,
            clip_fraction: 0.05,
            uniformity_reference: 0.1,
            span_ratio_low: 0.5,
            span_ratio_high: 2.0,
            max_mean_difference: 0.3,
            max_skew_difference: 1.0,
        }
    }
}
