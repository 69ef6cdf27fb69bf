//! Scattered-data interpolation over patch correspondences.
//!
//! Given N (reference color -> camera color) pairs, an
//! [`Interpolator`] estimates the camera rendering of *any* input
//! color by weighting the camera colors of the input's nearest
//! reference neighbors. Four strategies share that contract:
//!
//! - [`Strategy::Standard`] - inverse-square-distance weighting in RGB
//! - [`Strategy::RangeAware`] - luminance-corrected neighbor metric
//!   plus per-neighbor gain, driven by a [`RangeMapping`]
//! - [`Strategy::Tetrahedral`] - normalized inverse-total-distance
//!   weights, a simplified barycentric approximation (not a true
//!   4-simplex solve)
//! - [`Strategy::Perceptual`] - Standard's search and weighting, run
//!   in CIE Lab
//!
//! Neighbor selection is an exact k-nearest linear scan; any spatial
//! index swapped in later must preserve exact selection for output
//! parity.

use crate::{EngineConfig, EngineError, EngineResult, RangeMapping};
use chartlut_color::{lab, luminance};
use chartlut_math::Vec3;

/// Interpolation strategy selector.
///
/// Parsed from the wire names used by the front end:
/// `standard`, `rangeAware`, `tetrahedral`, `perceptual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Inverse-square-distance weighting of the k nearest reference
    /// colors in RGB.
    Standard,
    /// Standard with a luminance-aware metric and per-neighbor gain
    /// correction; requires a [`RangeMapping`].
    RangeAware,
    /// Simplified barycentric weighting over the k nearest neighbors.
    Tetrahedral,
    /// Standard, computed in CIE Lab.
    Perceptual,
}

impl Strategy {
    /// Whether this strategy needs a [`RangeMapping`] to operate.
    #[inline]
    pub fn requires_range_mapping(self) -> bool {
        matches!(self, Self::RangeAware)
    }

    /// The wire name of this strategy.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::RangeAware => "rangeAware",
            Self::Tetrahedral => "tetrahedral",
            Self::Perceptual => "perceptual",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s {
            "standard" => Ok(Self::Standard),
            "rangeAware" => Ok(Self::RangeAware),
            "tetrahedral" => Ok(Self::Tetrahedral),
            "perceptual" => Ok(Self::Perceptual),
            other => Err(EngineError::UnknownStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-strategy state resolved at construction, so sampling never has
/// to re-check prerequisites.
#[derive(Debug)]
enum Mode {
    Standard,
    RangeAware {
        scale: f32,
        offset: f32,
        cam_lums: Vec<f32>,
    },
    Tetrahedral,
    Perceptual {
        ref_lab: Vec<Vec3>,
        cam_lab: Vec<Vec3>,
    },
}

/// A sampling estimator over a fixed set of correspondence pairs.
///
/// Construction validates the strategy's prerequisites and
/// precomputes whatever the strategy needs (camera luminances, Lab
/// mirrors). [`sample`](Self::sample) is then pure and lock-free;
/// the builder calls it from many threads at once.
#[derive(Debug)]
pub struct Interpolator {
    reference: Vec<Vec3>,
    camera: Vec<Vec3>,
    mode: Mode,
    config: EngineConfig,
}

impl Interpolator {
    /// Builds an estimator from sanitized correspondence pairs.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingRangeData`] when the range-aware
    ///   strategy is selected without a mapping. Checked before the
    ///   patch data is touched.
    /// - [`EngineError::InsufficientSamples`] when the sets are empty
    ///   or differ in length.
    pub fn new(
        strategy: Strategy,
        reference: Vec<Vec3>,
        camera: Vec<Vec3>,
        mapping: Option<&RangeMapping>,
        config: &EngineConfig,
    ) -> EngineResult<Self> {
        if strategy.requires_range_mapping() && mapping.is_none() {
            return Err(EngineError::MissingRangeData);
        }
        if reference.is_empty() || reference.len() != camera.len() {
            return Err(EngineError::InsufficientSamples {
                reference: reference.len(),
                camera: camera.len(),
            });
        }

        let mode = match strategy {
            Strategy::Standard => Mode::Standard,
            Strategy::Tetrahedral => Mode::Tetrahedral,
            Strategy::RangeAware => {
                // Presence verified above.
                let m = mapping.ok_or(EngineError::MissingRangeData)?;
                Mode::RangeAware {
                    scale: m.scale,
                    offset: m.offset,
                    cam_lums: camera.iter().map(|&c| luminance(c)).collect(),
                }
            }
            Strategy::Perceptual => Mode::Perceptual {
                ref_lab: reference.iter().map(|&c| lab::rgb_to_lab(c)).collect(),
                cam_lab: camera.iter().map(|&c| lab::rgb_to_lab(c)).collect(),
            },
        };

        Ok(Self {
            reference,
            camera,
            mode,
            config: *config,
        })
    }

    /// Number of correspondence pairs.
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    /// True when no pairs are held (unreachable via [`new`](Self::new)).
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Estimates the camera rendering of `input`.
    ///
    /// Every channel of the result lies in [0, 1].
    pub fn sample(&self, input: Vec3) -> Vec3 {
        match &self.mode {
            Mode::Standard => self.sample_standard(input),
            Mode::Tetrahedral => self.sample_tetrahedral(input),
            Mode::RangeAware {
                scale,
                offset,
                cam_lums,
            } => self.sample_range_aware(input, *scale, *offset, cam_lums),
            Mode::Perceptual { ref_lab, cam_lab } => {
                self.sample_perceptual(input, ref_lab, cam_lab)
            }
        }
    }

    fn sample_standard(&self, input: Vec3) -> Vec3 {
        let neighbors = k_nearest(self.reference.len(), self.config.neighbor_count, |i| {
            input.distance(self.reference[i])
        });
        let mut acc = Vec3::ZERO;
        let mut total = 0.0;
        for &(i, d) in &neighbors {
            let w = self.weight(d);
            acc = acc + self.camera[i] * w;
            total += w;
        }
        (acc / total).clamp01()
    }

    fn sample_range_aware(
        &self,
        input: Vec3,
        scale: f32,
        offset: f32,
        cam_lums: &[f32],
    ) -> Vec3 {
        let target = luminance(input) * scale + offset;
        let lum_weight = self.config.luminance_metric_weight;
        let neighbors = k_nearest(self.reference.len(), self.config.neighbor_count, |i| {
            input.distance(self.reference[i]) + (target - cam_lums[i]).abs() * lum_weight
        });

        let mut acc = Vec3::ZERO;
        let mut total = 0.0;
        for &(i, d) in &neighbors {
            let w = self.weight(d);
            let mut candidate = self.camera[i];
            // Multiplicative gain toward the target luminance; skipped
            // near black where the ratio blows up.
            if cam_lums[i] >= self.config.min_luminance {
                candidate = candidate * (target / cam_lums[i]);
            }
            acc = acc + candidate * w;
            total += w;
        }
        (acc / total).clamp01()
    }

    fn sample_tetrahedral(&self, input: Vec3) -> Vec3 {
        let neighbors = k_nearest(self.reference.len(), self.config.neighbor_count, |i| {
            input.distance(self.reference[i])
        });
        let total: f32 = neighbors.iter().map(|&(_, d)| d).sum();
        if total < 1e-9 {
            // Every neighbor coincides with the input; average them.
            let mut acc = Vec3::ZERO;
            for &(i, _) in &neighbors {
                acc = acc + self.camera[i];
            }
            return (acc / neighbors.len() as f32).clamp01();
        }

        // Normalized inverse-total-distance weights: a simplified
        // barycentric approximation, not an exact simplex solve.
        let mut acc = Vec3::ZERO;
        let mut weight_sum = 0.0;
        for &(i, d) in &neighbors {
            let w = (total - d) / (total * 3.0);
            acc = acc + self.camera[i] * w;
            weight_sum += w;
        }
        if weight_sum <= 0.0 {
            // Single correspondence: its weight cancels to zero above.
            return self.camera[neighbors[0].0].clamp01();
        }
        (acc / weight_sum).clamp01()
    }

    fn sample_perceptual(&self, input: Vec3, ref_lab: &[Vec3], cam_lab: &[Vec3]) -> Vec3 {
        let input_lab = lab::rgb_to_lab(input);
        let neighbors = k_nearest(ref_lab.len(), self.config.neighbor_count, |i| {
            input_lab.distance(ref_lab[i])
        });
        let mut acc = Vec3::ZERO;
        let mut total = 0.0;
        for &(i, d) in &neighbors {
            let w = self.weight(d);
            acc = acc + cam_lab[i] * w;
            total += w;
        }
        lab::lab_to_rgb(acc / total)
    }

    /// Inverse-square-distance weight with the exact-hit override.
    #[inline]
    fn weight(&self, distance: f32) -> f32 {
        if distance == 0.0 {
            self.config.exact_hit_weight
        } else {
            1.0 / (distance * distance)
        }
    }
}

/// Exact k-nearest selection by linear scan.
///
/// Returns up to `k` `(index, distance)` pairs sorted by ascending
/// distance. The scan is O(n) per query; the lattice traversal calls
/// this once per node, which is the engine's dominant cost.
fn k_nearest<F: Fn(usize) -> f32>(n: usize, k: usize, metric: F) -> Vec<(usize, f32)> {
    let k = k.min(n);
    let mut best: Vec<(usize, f32)> = Vec::with_capacity(k + 1);
    for i in 0..n {
        let d = metric(i);
        let pos = best.partition_point(|&(_, bd)| bd <= d);
        if pos < k {
            best.insert(pos, (i, d));
            best.truncate(k);
        }
    }
    best
}
