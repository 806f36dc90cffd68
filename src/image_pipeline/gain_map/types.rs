//! Gain map types

use crate::image_pipeline::common::buffer::{alloc_zeroed, checked_len};
use crate::image_pipeline::common::constants::{GAIN_BYTE_FULL_SCALE, PNM_MAX_SAMPLE};
use crate::image_pipeline::common::error::{GainError, Result};
use crate::image_pipeline::pnm::types::{ImageType, RasterImage};

/// Single-channel byte raster of quantized, offset-encoded gains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainMap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GainMap {
    /// Allocates a zero-filled map.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GainError::InvalidDimensions(width, height));
        }
        let len = checked_len(width, height, 1, 1)?;
        Ok(Self {
            width,
            height,
            data: alloc_zeroed(len)?,
        })
    }

    pub fn from_data(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GainError::InvalidDimensions(width, height));
        }
        if data.len() != checked_len(width, height, 1, 1)? {
            return Err(GainError::FormatError(format!(
                "gain map buffer holds {} bytes, {}x{} needs {}",
                data.len(),
                width,
                height,
                width * height
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Decoded multiplicative factor of pixel `index`.
    #[inline]
    pub fn gain_at(&self, index: usize, offset_raw: u8, scale: f64) -> f64 {
        decode_gain(self.data[index], offset_raw, scale)
    }

    /// The map as an 8-bit grayscale image, for inspection.
    pub fn visualization(&self) -> Result<RasterImage> {
        RasterImage::from_data(
            self.width,
            self.height,
            ImageType::Grayscale,
            PNM_MAX_SAMPLE,
            self.data.clone(),
        )
    }
}

#[inline]
pub fn decode_gain(byte: u8, offset_raw: u8, scale: f64) -> f64 {
    (byte as f64 + offset_raw as f64) * scale / GAIN_BYTE_FULL_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_decoding() {
        let map = GainMap::from_data(2, 1, vec![0, 255]).unwrap();
        assert_eq!(map.gain_at(0, 0, 2.0), 0.0);
        assert_eq!(map.gain_at(1, 0, 2.0), 2.0);
        assert_eq!(map.gain_at(0, 255, 1.0), 1.0);
    }

    #[test]
    fn test_from_data_length_checked() {
        let err = GainMap::from_data(2, 2, vec![0; 3]).unwrap_err();
        assert!(matches!(err, GainError::FormatError(_)));
        assert!(!err.is_size_mismatch());
    }

    #[test]
    fn test_visualization_is_grayscale_copy() {
        let map = GainMap::from_data(2, 1, vec![3, 4]).unwrap();
        let vis = map.visualization().unwrap();
        assert_eq!(vis.image_type(), ImageType::Grayscale);
        assert_eq!(vis.data(), map.data());
    }
}
