use std::io::Write;
use tracing::{debug, warn};
use crate::image_pipeline::common::constants::PNM_MAX_SAMPLE;
use crate::image_pipeline::common::error::{GainError, Result};
use crate::image_pipeline::pnm::types::RasterImage;
use crate::image_pipeline::pnm::writer::ImageWriter;

/// Writes `P5`/`P6` files. Output is always one byte per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct PnmWriter;

impl ImageWriter for PnmWriter {
    fn write_image(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding PNM image: {}x{}", image.width(), image.height());

        if image.is_released() {
            return Err(GainError::InvalidDimensions(image.width(), image.height()));
        }
        if !image.is_8bit() {
            warn!(
                "Image has max-sample {}, writing the first {} bytes as 8-bit samples",
                image.max_sample(),
                image.pixel_count() * image.channels()
            );
        }

        let header = format!(
            "{} {} {} {}\n",
            image.image_type().marker(),
            image.width(),
            image.height(),
            PNM_MAX_SAMPLE
        );
        let payload_len = image.pixel_count() * image.channels();

        output
            .write_all(header.as_bytes())
            .and_then(|_| output.write_all(&image.data()[..payload_len]))
            .map_err(|e| GainError::OutputWriteError(e.to_string()))?;

        debug!("PNM encoding complete");
        Ok(())
    }
}
