//! Adobe/Resolve `.cube` LUT serialization.
//!
//! The `.cube` format is a simple text format widely supported by
//! DaVinci Resolve, Adobe applications and camera vendors:
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! 0.000000 0.000000 0.000000
//! ...
//! 1.000000 1.000000 1.000000
//! ```
//!
//! Data lines follow the R-major lattice order [`Lut3D`] already
//! stores, so serialization is a straight dump. Only writing is
//! provided; this system emits LUTs, it never consumes them.

use crate::{EngineResult, Lut3D};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a 3D LUT in `.cube` format.
///
/// # Example
///
/// ```rust
/// use chartlut_engine::{cube, Lut3D};
///
/// let lut = Lut3D::identity(2);
/// let mut out = Vec::new();
/// cube::write_3d(&mut out, &lut, Some("identity")).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("TITLE \"identity\"\n"));
/// ```
pub fn write_3d<W: Write>(w: &mut W, lut: &Lut3D, title: Option<&str>) -> EngineResult<()> {
    if let Some(title) = title {
        writeln!(w, "TITLE \"{}\"", title)?;
    }
    writeln!(w, "LUT_3D_SIZE {}", lut.size)?;
    for rgb in &lut.data {
        writeln!(w, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
    }
    Ok(())
}

/// Writes a 3D LUT to a `.cube` file.
pub fn write_3d_to_path<P: AsRef<Path>>(
    path: P,
    lut: &Lut3D,
    title: Option<&str>,
) -> EngineResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_3d(&mut writer, lut, title)?;
    writer.flush()?;
    Ok(())
}
