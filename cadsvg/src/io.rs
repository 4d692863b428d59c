//! SVG file output. Not part of the core render pipeline (§1), kept as a
//! thin convenience wrapper around the documented output convention (§6):
//! `{directory}/{part.name}.svg`, UTF-8.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

pub fn write_svg(directory: &Path, part_name: &str, svg_text: &str) -> Result<()> {
    let path = directory.join(format!("{}.svg", part_name));
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(svg_text.as_bytes())?;
    Ok(())
}
