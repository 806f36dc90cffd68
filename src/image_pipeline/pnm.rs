//! PNM container module
//!
//! Binary `P5`/`P6` raster decoding and encoding, plus the in-memory
//! [`RasterImage`] every other stage works on.

mod reader;
mod writer;
mod pnm_reader;
mod pnm_writer;
pub mod types;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{GainError, Result};

pub use reader::ImageReader;
pub use writer::ImageWriter;
pub use pnm_reader::PnmReader;
pub use pnm_writer::PnmWriter;
pub use types::{ChannelSource, ImageType, RasterImage};

/// Reads the file at `path` and decodes it with `reader`.
pub fn read_with<R: ImageReader + ?Sized>(reader: &R, path: &Path) -> Result<RasterImage> {
    let data = std::fs::read(path).map_err(|e| {
        GainError::InputReadError(format!("{}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), bytes = data.len(), "Read image file");
    reader.read_image(&data)
}

/// Encodes `image` with `writer` into a new file at `path`.
pub fn write_with<W: ImageWriter + ?Sized>(writer: &W, path: &Path, image: &RasterImage) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        GainError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    let mut output = BufWriter::new(file);
    writer.write_image(image, &mut output)?;
    output.flush().map_err(|e| {
        GainError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), "Wrote image file");
    Ok(())
}

/// Reads and decodes a PNM file from disk.
pub fn decode<P: AsRef<Path>>(path: P, channel_source: ChannelSource) -> Result<RasterImage> {
    read_with(&PnmReader::new(channel_source), path.as_ref())
}

/// Encodes `image` as a PNM file at `path`.
pub fn encode<P: AsRef<Path>>(path: P, image: &RasterImage) -> Result<()> {
    write_with(&PnmWriter, path.as_ref(), image)
}
