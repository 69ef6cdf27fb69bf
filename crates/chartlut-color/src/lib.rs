//! # chartlut-color
//!
//! Color space conversions for chart calibration.
//!
//! All functions are pure and stateless: safe to call concurrently
//! without synchronization. The conversion chain is
//!
//! ```text
//! sRGB <-> linear RGB <-> CIE XYZ (D65) <-> CIE Lab
//! ```
//!
//! # Modules
//!
//! - [`transfer`] - sRGB piecewise transfer functions
//! - [`xyz`] - linear-RGB↔XYZ with the standard D65 matrices
//! - [`lab`] - XYZ↔Lab and the RGB↔Lab compositions
//! - [`luma`] - BT.709 luminance
//!
//! # Clamping policy
//!
//! Inputs are not required to be pre-clamped. Conversions *back to*
//! RGB ([`xyz::xyz_to_rgb`], [`lab::lab_to_rgb`]) clamp every channel
//! to [0, 1]: out-of-gamut colors are clipped, not rejected. This is a
//! deliberate, lossy policy the LUT pipeline depends on.
//!
//! # Usage
//!
//! ```rust
//! use chartlut_math::Vec3;
//! use chartlut_color::lab;
//!
//! let rgb = Vec3::new(0.8, 0.2, 0.4);
//! let l = lab::rgb_to_lab(rgb);
//! let back = lab::lab_to_rgb(l);
//! assert!((rgb.x - back.x).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lab;
pub mod luma;
pub mod transfer;
pub mod xyz;

pub use luma::luminance;
