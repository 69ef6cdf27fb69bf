//! CIE L*a*b* conversion.
//!
//! Lab is the perceptually-motivated space used by the Perceptual
//! interpolation strategy: Euclidean distances in Lab approximate
//! visual color difference far better than distances in gamma-encoded
//! RGB.
//!
//! Conventions: L in [0, 100]; a and b unbounded but practically
//! within about [-128, 128]. Stored in [`Vec3`] as x=L, y=a, z=b.
//! D65 reference white.

use crate::xyz;
use chartlut_math::Vec3;

// D65 reference white.
const XN: f64 = 0.95047;
const YN: f64 = 1.0;
const ZN: f64 = 1.08883;

// CIE 6/29 breakpoint.
const DELTA: f64 = 6.0 / 29.0;

fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    if f > DELTA {
        f * f * f
    } else {
        3.0 * DELTA * DELTA * (f - 4.0 / 29.0)
    }
}

/// Converts CIE XYZ to Lab.
pub fn xyz_to_lab(v: Vec3) -> Vec3 {
    let fx = lab_f(v.x as f64 / XN);
    let fy = lab_f(v.y as f64 / YN);
    let fz = lab_f(v.z as f64 / ZN);
    Vec3::new(
        (116.0 * fy - 16.0) as f32,
        (500.0 * (fx - fy)) as f32,
        (200.0 * (fy - fz)) as f32,
    )
}

/// Converts Lab back to CIE XYZ.
pub fn lab_to_xyz(lab: Vec3) -> Vec3 {
    let fy = (lab.x as f64 + 16.0) / 116.0;
    let fx = fy + lab.y as f64 / 500.0;
    let fz = fy - lab.z as f64 / 200.0;
    Vec3::new(
        (XN * lab_f_inv(fx)) as f32,
        (YN * lab_f_inv(fy)) as f32,
        (ZN * lab_f_inv(fz)) as f32,
    )
}

/// Converts a display-referred sRGB color to Lab.
///
/// # Example
///
/// ```rust
/// use chartlut_math::Vec3;
/// use chartlut_color::lab::rgb_to_lab;
///
/// let white = rgb_to_lab(Vec3::ONE);
/// assert!((white.x - 100.0).abs() < 0.1); // L* of white is 100
/// ```
pub fn rgb_to_lab(rgb: Vec3) -> Vec3 {
    xyz_to_lab(xyz::rgb_to_xyz(rgb))
}

/// Converts Lab back to display-referred sRGB.
///
/// Output channels are clamped to [0, 1] (gamut clip).
pub fn lab_to_rgb(lab: Vec3) -> Vec3 {
    xyz::xyz_to_rgb(lab_to_xyz(lab))
}
