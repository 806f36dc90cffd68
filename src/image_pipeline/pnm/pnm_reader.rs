//! Binary PNM (`P5`/`P6`) decoder.
//!
//! The header is a two character marker followed by width, height and the
//! max-sample value as decimal text. Whitespace and `#` comment lines may appear
//! between any of the fields. Exactly one byte separates the max-sample field
//! from the raw payload.

use tracing::{debug, warn};

use crate::image_pipeline::common::constants::PNM_MAX_SAMPLE;
use crate::image_pipeline::common::error::{GainError, Result};
use crate::image_pipeline::pnm::reader::ImageReader;
use crate::image_pipeline::pnm::types::{ChannelSource, ImageType, RasterImage};

/// Decoder for 8-bit binary PNM files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PnmReader {
    channel_source: ChannelSource,
}

impl PnmReader {
    pub fn new(channel_source: ChannelSource) -> Self {
        Self { channel_source }
    }
}

/// Byte cursor over the textual part of the header.
struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skips whitespace and whole `#` comment lines.
    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn read_marker(&mut self) -> Result<ImageType> {
        let marker = self
            .data
            .get(..2)
            .ok_or_else(|| GainError::FormatError("file too short for a PNM marker".to_string()))?;
        let image_type = ImageType::from_marker(marker).ok_or_else(|| {
            GainError::FormatError(format!(
                "invalid marker {:?} (must be 'P5' or 'P6')",
                String::from_utf8_lossy(marker)
            ))
        })?;
        self.pos = 2;
        Ok(image_type)
    }

    fn read_uint(&mut self, field: &str) -> Result<u32> {
        self.skip_separators();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| GainError::FormatError(format!("invalid {} field", field)))
    }

    /// Consumes the single terminator byte and returns everything after it.
    fn into_payload(mut self) -> Result<&'a [u8]> {
        if self.peek().is_none() {
            return Err(GainError::FormatError("missing header terminator".to_string()));
        }
        self.pos += 1;
        Ok(&self.data[self.pos..])
    }
}

impl ImageReader for PnmReader {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding PNM image, {} bytes", data.len());

        let mut cursor = HeaderCursor::new(data);
        let marker_type = cursor.read_marker()?;
        let width = cursor.read_uint("width")? as usize;
        let height = cursor.read_uint("height")? as usize;
        let max_sample = cursor.read_uint("max-sample")?;

        if max_sample != PNM_MAX_SAMPLE {
            return Err(GainError::FormatError(format!(
                "max-sample must be {} (8-bit components), found {}",
                PNM_MAX_SAMPLE, max_sample
            )));
        }
        if width == 0 || height == 0 {
            return Err(GainError::InvalidDimensions(width, height));
        }

        let payload = cursor.into_payload()?;
        let pixel_count = width
            .checked_mul(height)
            .ok_or(GainError::InvalidDimensions(width, height))?;

        let image_type = match self.channel_source {
            ChannelSource::Marker => marker_type,
            ChannelSource::PayloadSize => {
                let inferred = if payload.len() / pixel_count == 1 {
                    ImageType::Grayscale
                } else {
                    ImageType::Color
                };
                if inferred != marker_type {
                    warn!(
                        "Marker says {:?} but payload size implies {:?}, using {:?}",
                        marker_type, inferred, inferred
                    );
                }
                inferred
            }
        };

        let expected = pixel_count * image_type.channels();
        if payload.len() < expected {
            return Err(GainError::FormatError(format!(
                "payload has {} bytes, {}x{} {:?} image needs {}",
                payload.len(),
                width,
                height,
                image_type,
                expected
            )));
        }

        debug!("Decoded image: {}x{} {:?}", width, height, image_type);

        RasterImage::from_data(width, height, image_type, max_sample, payload[..expected].to_vec())
    }
}
