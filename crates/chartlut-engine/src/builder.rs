//! LUT generation: lattice traversal and orchestration.
//!
//! [`build`] is the engine's entry point. It validates the request,
//! sanitizes the patch data, constructs an [`Interpolator`] and
//! evaluates it at every node of the regular `size^3` lattice. Nodes
//! are independent, so the traversal is data-parallel; each node's
//! result lands at its own lattice index and no ordering or locking
//! discipline is needed.

use crate::{
    EngineConfig, EngineError, EngineResult, Interpolator, Lut3D, PatchSet, RangeMapping,
    Strategy,
};
use chartlut_math::Vec3;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Neutral gray substituted for malformed patch colors.
const FALLBACK_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// Builds a 3D LUT mapping camera-rendered colors back to reference
/// colors.
///
/// Lattice node `(r, g, b)` holds the interpolated camera rendering of
/// input color `(r, g, b) / (size - 1)`; entries come back in R-major
/// order, exactly `size^3` of them, every channel in [0, 1].
///
/// # Errors
///
/// Checked in order, before any lattice work:
///
/// - [`EngineError::MissingRangeData`] - range-aware strategy without
///   a mapping (raised before the patch sets are touched)
/// - [`EngineError::InsufficientSamples`] - empty or mismatched sets
/// - [`EngineError::InvalidSize`] - lattice size below 2
///
/// Individual malformed patch colors (non-finite, outside the unit
/// cube) do **not** fail the build: they are replaced by neutral gray
/// and logged.
///
/// # Example
///
/// ```rust
/// use chartlut_math::Vec3;
/// use chartlut_engine::{builder, EngineConfig, PatchSet, Strategy};
///
/// let patches = PatchSet::from_colors(vec![Vec3::ZERO, Vec3::splat(0.5), Vec3::ONE]);
/// let lut = builder::build(
///     Strategy::Standard, &patches, &patches, 2, None, &EngineConfig::default(),
/// ).unwrap();
/// assert_eq!(lut.data.len(), 8);
/// ```
pub fn build(
    strategy: Strategy,
    reference: &PatchSet,
    camera: &PatchSet,
    size: usize,
    mapping: Option<&RangeMapping>,
    config: &EngineConfig,
) -> EngineResult<Lut3D> {
    if strategy.requires_range_mapping() && mapping.is_none() {
        return Err(EngineError::MissingRangeData);
    }
    if reference.is_empty() || reference.len() != camera.len() {
        return Err(EngineError::InsufficientSamples {
            reference: reference.len(),
            camera: camera.len(),
        });
    }
    if size < 2 {
        return Err(EngineError::InvalidSize(size));
    }

    debug!(
        strategy = %strategy,
        size,
        patches = reference.len(),
        skipped = reference.skipped(),
        "building LUT"
    );

    let ref_colors = sanitize(reference.colors(), "reference");
    let cam_colors = sanitize(camera.colors(), "camera");
    let interp = Interpolator::new(strategy, ref_colors, cam_colors, mapping, config)?;

    let step = 1.0 / (size - 1) as f32;
    let total = size * size * size;
    let data: Vec<[f32; 3]> = (0..total)
        .into_par_iter()
        .map(|idx| {
            let r = idx % size;
            let g = (idx / size) % size;
            let b = idx / (size * size);
            let input = Vec3::new(r as f32 * step, g as f32 * step, b as f32 * step);
            interp.sample(input).to_array()
        })
        .collect();

    Ok(Lut3D { data, size })
}

/// Replaces non-finite or out-of-range patch colors with neutral gray.
///
/// Per-sample recovery: a corrupt extraction sample must not abort a
/// whole generation run.
fn sanitize(colors: &[Vec3], which: &str) -> Vec<Vec3> {
    colors
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if c.is_finite() && c.in_unit_cube() {
                c
            } else {
                warn!(set = which, index = i, color = ?c, "substituting neutral gray for invalid patch color");
                FALLBACK_COLOR
            }
        })
        .collect()
}
