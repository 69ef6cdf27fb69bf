//! Robust statistics over sample slices.
//!
//! The calibration engine scores patch quality and luminance
//! distributions with estimators that tolerate outliers: median and MAD
//! instead of mean and stddev where a single bad sample must not move
//! the result, and percentile bounds instead of raw min/max.
//!
//! Empty input is a contract violation and reported as
//! [`StatsError::EmptyInput`], never silently mapped to zero. The one
//! deliberate zero-convention is [`cv`] over a zero-mean sequence.
//!
//! # Usage
//!
//! ```rust
//! use chartlut_math::stats;
//!
//! let samples = [0.4, 0.5, 0.45, 0.48, 9.0]; // one outlier
//! let med = stats::median(&samples).unwrap();
//! let spread = stats::mad(&samples, Some(med)).unwrap();
//! assert!(med < 1.0); // the 9.0 sample does not drag the estimate
//! ```

use crate::{StatsError, StatsResult};

/// Consistency factor relating MAD to the standard deviation of a
/// normal distribution.
const MAD_SCALE: f32 = 1.4826;

/// Arithmetic mean.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `values` is empty.
pub fn mean(values: &[f32]) -> StatsResult<f32> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput("mean"));
    }
    Ok(values.iter().sum::<f32>() / values.len() as f32)
}

/// Median of a sequence.
///
/// Sorts a copy; the input order is preserved. For an even count the
/// two middle values are averaged.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `values` is empty.
pub fn median(values: &[f32]) -> StatsResult<f32> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput("median"));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Ok(sorted[n / 2])
    }
}

/// Median absolute deviation from the median.
///
/// Pass a precomputed median via `center` to avoid sorting twice.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `values` is empty.
pub fn mad(values: &[f32], center: Option<f32>) -> StatsResult<f32> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput("mad"));
    }
    let med = match center {
        Some(m) => m,
        None => median(values)?,
    };
    let deviations: Vec<f32> = values.iter().map(|v| (v - med).abs()).collect();
    median(&deviations)
}

/// Population standard deviation.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `values` is empty.
pub fn stddev(values: &[f32]) -> StatsResult<f32> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / values.len() as f32;
    Ok(var.sqrt())
}

/// Coefficient of variation: stddev / mean.
///
/// Returns 0 when the mean is 0 (by convention, not a division fault).
/// A constant sequence therefore scores 0: perfectly uniform.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `values` is empty.
pub fn cv(values: &[f32]) -> StatsResult<f32> {
    let m = mean(values)?;
    if m == 0.0 {
        return Ok(0.0);
    }
    Ok(stddev(values)? / m)
}

/// Skewness: the third standardized moment.
///
/// Returns 0 for (near-)constant sequences where the standard
/// deviation vanishes.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `values` is empty.
pub fn skewness(values: &[f32]) -> StatsResult<f32> {
    let m = mean(values)?;
    let sd = stddev(values)?;
    if sd < 1e-9 {
        return Ok(0.0);
    }
    let n = values.len() as f32;
    let third = values.iter().map(|v| (v - m).powi(3)).sum::<f32>() / n;
    Ok(third / sd.powi(3))
}

/// Percentile of a pre-sorted ascending slice.
///
/// `p` is in percent and clamped to [0, 100]. Values between ranks are
/// linearly interpolated.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `sorted` is empty.
///
/// # Example
///
/// ```rust
/// use chartlut_math::stats;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(stats::percentile(&sorted, 50.0).unwrap(), 3.0);
/// assert_eq!(stats::percentile(&sorted, 100.0).unwrap(), 5.0);
/// ```
pub fn percentile(sorted: &[f32], p: f32) -> StatsResult<f32> {
    if sorted.is_empty() {
        return Err(StatsError::EmptyInput("percentile"));
    }
    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Ok(sorted[lo]);
    }
    let frac = rank - lo as f32;
    Ok(sorted[lo] * (1.0 - frac) + sorted[hi] * frac)
}

/// MAD-based outlier rejection.
///
/// Returns the indices of samples whose distance from the median stays
/// within `sigma` scaled deviations (`MAD * 1.4826`). When fewer than
/// `min_samples` survive the filter, all indices are returned instead:
/// a tiny or degenerate sample set is used as-is rather than rejected
/// down to nothing.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when `values` is empty.
pub fn reject_outliers(
    values: &[f32],
    sigma: f32,
    min_samples: usize,
) -> StatsResult<Vec<usize>> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput("reject_outliers"));
    }
    let med = median(values)?;
    let spread = mad(values, Some(med))? * MAD_SCALE;

    let kept: Vec<usize> = if spread <= 0.0 {
        // Degenerate spread: keep exact matches only, the fallback
        // below handles the rest.
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| (**v - med).abs() == 0.0)
            .map(|(i, _)| i)
            .collect()
    } else {
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| (**v - med).abs() <= sigma * spread)
            .map(|(i, _)| i)
            .collect()
    };

    if kept.len() < min_samples {
        return Ok((0..values.len()).collect());
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
        assert_eq!(median(&[7.0]).unwrap(), 7.0);
    }

    #[test]
    fn test_empty_inputs_error() {
        assert_eq!(median(&[]), Err(StatsError::EmptyInput("median")));
        assert_eq!(mad(&[], None), Err(StatsError::EmptyInput("mad")));
        assert_eq!(stddev(&[]), Err(StatsError::EmptyInput("mean")));
        assert_eq!(cv(&[]), Err(StatsError::EmptyInput("mean")));
        assert_eq!(percentile(&[], 50.0), Err(StatsError::EmptyInput("percentile")));
    }

    #[test]
    fn test_mad_robust_to_outlier() {
        let values = [0.4, 0.5, 0.45, 0.48, 9.0];
        let m = mad(&values, None).unwrap();
        assert!(m < 0.1, "mad = {}", m);
    }

    #[test]
    fn test_cv_constant_is_zero() {
        assert_eq!(cv(&[0.7, 0.7, 0.7, 0.7]).unwrap(), 0.0);
        assert_eq!(cv(&[0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cv_scale_invariant() {
        let a = cv(&[1.0, 2.0, 3.0]).unwrap();
        let b = cv(&[10.0, 20.0, 30.0]).unwrap();
        assert_relative_eq!(a, b, epsilon = 1e-6);
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [0.0, 1.0];
        assert_relative_eq!(percentile(&sorted, 25.0).unwrap(), 0.25);
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&sorted, 5.0).unwrap(), 1.2);
        assert_relative_eq!(percentile(&sorted, 95.0).unwrap(), 4.8);
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        assert_relative_eq!(skewness(&[1.0, 2.0, 3.0]).unwrap(), 0.0, epsilon = 1e-5);
        assert_eq!(skewness(&[2.0, 2.0, 2.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_reject_outliers_drops_spike() {
        let values = [0.5, 0.52, 0.48, 0.51, 0.49, 5.0];
        let kept = reject_outliers(&values, 2.5, 3).unwrap();
        assert_eq!(kept, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reject_outliers_fallback_to_all() {
        // MAD collapses to 0, so only exact-median samples survive the
        // filter; that leaves 2 < min_samples and everything is kept.
        let values = [1.0, 1.0, 5.0];
        let kept = reject_outliers(&values, 2.5, 3).unwrap();
        assert_eq!(kept, vec![0, 1, 2]);
    }
}
