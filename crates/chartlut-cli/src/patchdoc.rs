//! JSON patch-set documents.
//!
//! The extraction front end hands patch data over as a small JSON
//! document:
//!
//! ```json
//! {
//!   "colors": [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5], [1.0, 1.0, 1.0]],
//!   "quality": [0.01, 0.02, 0.01],
//!   "skipped": 2
//! }
//! ```
//!
//! `quality` and `skipped` are optional; missing quality scores default
//! to 0 (assumed uniform patches).

use anyhow::{Context, Result};
use chartlut_engine::PatchSet;
use chartlut_math::Vec3;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct PatchDocument {
    colors: Vec<[f32; 3]>,
    #[serde(default)]
    quality: Option<Vec<f32>>,
    #[serde(default)]
    skipped: usize,
}

impl PatchDocument {
    /// Loads a patch document from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading patch document {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing patch document {}", path.display()))
    }

    /// Converts the document into an engine [`PatchSet`].
    pub fn into_patch_set(self) -> Result<PatchSet> {
        let colors: Vec<Vec3> = self.colors.into_iter().map(Vec3::from_array).collect();
        let quality = self
            .quality
            .unwrap_or_else(|| vec![0.0; colors.len()]);
        PatchSet::new(colors, quality, self.skipped).context("building patch set")
    }
}

/// Loads a patch document and converts it in one step.
pub fn load_patch_set<P: AsRef<Path>>(path: P) -> Result<PatchSet> {
    PatchDocument::load(path)?.into_patch_set()
}
