//! 3-dimensional lookup table.
//!
//! The generation result: a cube of RGB output values indexed by input
//! RGB. Standard sizes are 17, 33 or 65 per axis, but the engine
//! accepts any size of at least 2.
//!
//! # Structure
//!
//! - `size^3` entries, each an RGB output triplet
//! - Stored in R-major order: R varies fastest, then G, then B
//!   (the `.cube` file convention)
//! - Lattice node `(r, g, b)` represents the input color
//!   `(r, g, b) / (size - 1)`

use crate::{EngineError, EngineResult};
use chartlut_math::Vec3;

/// A 3D lookup table in R-major lattice order.
///
/// # Example
///
/// ```rust
/// use chartlut_engine::Lut3D;
///
/// let lut = Lut3D::identity(17);
/// let out = lut.apply([0.5, 0.3, 0.8]);
/// assert!((out[0] - 0.5).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// LUT entries, flattened as index = r + size*g + size^2*b.
    pub data: Vec<[f32; 3]>,
    /// Lattice size per axis.
    pub size: usize,
}

impl Lut3D {
    /// Creates an identity (pass-through) LUT.
    pub fn identity(size: usize) -> Self {
        let n = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push([r as f32 / n, g as f32 / n, b as f32 / n]);
                }
            }
        }
        Self { data, size }
    }

    /// Creates a LUT from raw data in R-major order.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSize`] when `size < 2`;
    /// [`EngineError::InvalidData`] when `data.len() != size^3`.
    pub fn from_data(data: Vec<[f32; 3]>, size: usize) -> EngineResult<Self> {
        if size < 2 {
            return Err(EngineError::InvalidSize(size));
        }
        let expected = size * size * size;
        if data.len() != expected {
            return Err(EngineError::InvalidData(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Total number of entries (`size^3`).
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Flat index of lattice position (r, g, b).
    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + self.size * g + self.size * self.size * b
    }

    /// Entry at lattice position (r, g, b).
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[self.index(r, g, b)]
    }

    /// Applies the LUT to an RGB value with trilinear interpolation.
    ///
    /// Used for verification and preview; generation itself never
    /// reads back through the LUT.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let n = (self.size - 1) as f32;
        let r = rgb[0].clamp(0.0, 1.0) * n;
        let g = rgb[1].clamp(0.0, 1.0) * n;
        let b = rgb[2].clamp(0.0, 1.0) * n;

        let ri = (r.floor() as usize).min(self.size - 2);
        let gi = (g.floor() as usize).min(self.size - 2);
        let bi = (b.floor() as usize).min(self.size - 2);

        let rf = r - ri as f32;
        let gf = g - gi as f32;
        let bf = b - bi as f32;

        let mut out = [0.0f32; 3];
        for (c, o) in out.iter_mut().enumerate() {
            let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
            let c00 = lerp(self.get(ri, gi, bi)[c], self.get(ri + 1, gi, bi)[c], rf);
            let c10 = lerp(self.get(ri, gi + 1, bi)[c], self.get(ri + 1, gi + 1, bi)[c], rf);
            let c01 = lerp(self.get(ri, gi, bi + 1)[c], self.get(ri + 1, gi, bi + 1)[c], rf);
            let c11 = lerp(
                self.get(ri, gi + 1, bi + 1)[c],
                self.get(ri + 1, gi + 1, bi + 1)[c],
                rf,
            );
            *o = lerp(lerp(c00, c10, gf), lerp(c01, c11, gf), bf);
        }
        out
    }

    /// Largest per-channel deviation from the identity transform.
    ///
    /// A quick signal of how strong a correction the LUT encodes.
    pub fn max_identity_deviation(&self) -> f32 {
        let n = (self.size - 1) as f32;
        let mut worst = 0.0f32;
        for b in 0..self.size {
            for g in 0..self.size {
                for r in 0..self.size {
                    let node = Vec3::new(r as f32 / n, g as f32 / n, b as f32 / n);
                    let d = Vec3::from_array(self.get(r, g, b)) - node;
                    worst = worst.max(d.x.abs().max(d.y.abs()).max(d.z.abs()));
                }
            }
        }
        worst
    }
}
