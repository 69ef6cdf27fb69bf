//! # chartlut-math
//!
//! Math primitives for color-chart calibration.
//!
//! This crate provides the numeric foundation used by the calibration
//! engine:
//!
//! - [`Vec3`] - 3D vectors for RGB/XYZ/Lab triplets
//! - [`Mat3`] - 3x3 matrices for linear color transforms
//! - [`stats`] - robust statistics (median, MAD, CV, percentiles,
//!   outlier rejection)
//!
//! # Design
//!
//! All matrix operations assume **row-major** storage and **column
//! vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Statistics functions take plain `&[f32]` slices and report empty
//! input as a typed error rather than silently returning zero.
//!
//! # Usage
//!
//! ```rust
//! use chartlut_math::{Vec3, stats};
//!
//! let a = Vec3::new(0.2, 0.4, 0.6);
//! let b = Vec3::new(0.3, 0.4, 0.5);
//! let d = a.distance(b);
//!
//! let med = stats::median(&[0.1, 0.9, 0.4]).unwrap();
//! assert!((med - 0.4).abs() < 1e-6);
//! ```
//!
//! # Used By
//!
//! - `chartlut-color` - color space conversions
//! - `chartlut-engine` - range analysis and interpolation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
mod vec3;
mod error;
pub mod stats;

pub use mat3::Mat3;
pub use vec3::Vec3;
pub use error::{StatsError, StatsResult};
