//! Linear-RGB ↔ CIE XYZ conversion (sRGB primaries, D65 white).
//!
//! The matrices are the standard sRGB derivation at `f64` precision so
//! that forward and inverse cancel well below the engine's round-trip
//! tolerance.

use crate::transfer;
use chartlut_math::{Mat3, Vec3};

/// sRGB (linear) to XYZ, D65.
pub const RGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4123907992659595, 0.35758433938387796, 0.18048078840183429],
    [0.21263900587151036, 0.7151686787677559, 0.07219231536073371],
    [0.01933081871559185, 0.11919477979462599, 0.9505321522496607],
]);

/// XYZ to sRGB (linear), D65.
pub const XYZ_TO_RGB: Mat3 = Mat3::from_rows([
    [3.2409699419045213, -1.5373831775700935, -0.4986107602930033],
    [-0.9692436362808798, 1.8759675015077206, 0.04155505740717561],
    [0.05563007969699361, -0.20397695888897652, 1.0569715142428786],
]);

/// Converts a display-referred sRGB color to CIE XYZ.
///
/// Linearizes each channel with the sRGB transfer curve, then applies
/// the D65 primaries matrix. The input is not required to be
/// pre-clamped.
///
/// # Example
///
/// ```rust
/// use chartlut_math::Vec3;
/// use chartlut_color::xyz::rgb_to_xyz;
///
/// let white = rgb_to_xyz(Vec3::ONE);
/// assert!((white.y - 1.0).abs() < 1e-4);
/// ```
pub fn rgb_to_xyz(rgb: Vec3) -> Vec3 {
    let linear = [
        transfer::srgb_to_linear_f64(rgb.x as f64),
        transfer::srgb_to_linear_f64(rgb.y as f64),
        transfer::srgb_to_linear_f64(rgb.z as f64),
    ];
    let out = RGB_TO_XYZ.mul_array(linear);
    Vec3::new(out[0] as f32, out[1] as f32, out[2] as f32)
}

/// Converts CIE XYZ back to display-referred sRGB.
///
/// Every output channel is clamped to [0, 1]: out-of-gamut colors are
/// clipped, not rejected.
pub fn xyz_to_rgb(xyz: Vec3) -> Vec3 {
    let linear = XYZ_TO_RGB.mul_array([xyz.x as f64, xyz.y as f64, xyz.z as f64]);
    Vec3::new(
        transfer::linear_to_srgb_f64(linear[0]) as f32,
        transfer::linear_to_srgb_f64(linear[1]) as f32,
        transfer::linear_to_srgb_f64(linear[2]) as f32,
    )
    .clamp01()
}
