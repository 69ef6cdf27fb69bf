//! # chartlut-engine
//!
//! The color calibration engine: turns a pair of extracted color-chart
//! patch sets (reference chart vs. camera capture) into a 3D LUT that
//! maps camera-rendered colors back to reference colors.
//!
//! # Pipeline
//!
//! ```text
//! patch extraction (external)
//!   -> PatchSet (reference), PatchSet (camera)
//!   -> range::analyze / range::map_ranges        (range-aware only)
//!   -> builder::build(strategy, ..., size)
//!   -> Lut3D                                     (size^3 entries)
//!   -> cube::write_3d                            (.cube serialization)
//! ```
//!
//! # Modules
//!
//! - [`PatchSet`] - parallel colors + quality scores
//! - [`quality`] - robust per-patch color and CV estimation
//! - [`range`] - luminance distribution analysis and range mapping
//! - [`interp`] - the four interpolation strategies
//! - [`lut3d`] - the LUT container
//! - [`builder`] - lattice traversal / orchestration
//! - [`cube`] - `.cube` text serialization
//!
//! # Contracts
//!
//! The engine is stateless between calls. Structural violations (bad
//! strategy name, mismatched set lengths, lattice size below 2, missing
//! range data) abort with a typed [`EngineError`] before any lattice
//! work; individual malformed patch colors are recovered by neutral-gray
//! substitution and a warning, never by aborting the build.
//!
//! # Usage
//!
//! ```rust
//! use chartlut_math::Vec3;
//! use chartlut_engine::{builder, EngineConfig, PatchSet, Strategy};
//!
//! let reference = PatchSet::from_colors(vec![
//!     Vec3::ZERO, Vec3::splat(0.5), Vec3::ONE,
//! ]);
//! let camera = reference.clone();
//!
//! let config = EngineConfig::default();
//! let lut = builder::build(Strategy::Standard, &reference, &camera, 17, None, &config).unwrap();
//! assert_eq!(lut.entry_count(), 17 * 17 * 17);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod patch;

pub mod builder;
pub mod cube;
pub mod interp;
pub mod lut3d;
pub mod quality;
pub mod range;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use interp::{Interpolator, Strategy};
pub use lut3d::Lut3D;
pub use patch::PatchSet;
pub use range::{RangeMapping, RangeMappingMode, RangeStats};
