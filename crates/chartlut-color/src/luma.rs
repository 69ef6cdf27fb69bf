//! BT.709 luminance.

use chartlut_math::Vec3;

/// BT.709 luma weights.
const LUMA_WEIGHTS: Vec3 = Vec3::new(0.2126, 0.7152, 0.0722);

/// Luminance of an RGB color: `0.2126*R + 0.7152*G + 0.0722*B`.
///
/// Applied to the display-referred values as handed in, without
/// linearization. All of the range analysis and the range-aware
/// interpolation metric operate on this quantity.
///
/// # Example
///
/// ```rust
/// use chartlut_math::Vec3;
/// use chartlut_color::luminance;
///
/// assert_eq!(luminance(Vec3::ZERO), 0.0);
/// assert!((luminance(Vec3::ONE) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn luminance(rgb: Vec3) -> f32 {
    rgb.dot(LUMA_WEIGHTS)
}
