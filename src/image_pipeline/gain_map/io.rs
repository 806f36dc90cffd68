//! Headerless gain map files: exactly `width * height` bytes.

use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{GainError, Result};
use crate::image_pipeline::gain_map::types::GainMap;

impl GainMap {
    /// Reads a raw gain map. The file carries no dimensions, so they are
    /// supplied by the caller and the file size must match them exactly.
    pub fn decode<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            GainError::InputReadError(format!("{}: {}", path.display(), e))
        })?;

        let expected = (width as u64).saturating_mul(height as u64);
        if data.len() as u64 != expected {
            return Err(GainError::GainFileSize {
                path: path.display().to_string(),
                actual: data.len() as u64,
                expected,
            });
        }

        debug!(path = %path.display(), "Read {}x{} gain map", width, height);
        Self::from_data(width, height, data)
    }

    /// Writes the raw byte buffer verbatim.
    pub fn encode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.data()).map_err(|e| {
            GainError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Wrote {}x{} gain map", self.width(), self.height());
        Ok(())
    }
}
