//! Luma extraction
//!
//! Two deliberately separate paths exist. [`get_luma`] / [`set_luma`] honour the
//! image depth and byte order and are used by normalisation. [`extract_8bit_luma`]
//! always reads the buffer as 8-bit samples and feeds statistics and gain
//! derivation, whose outputs depend on that 8-bit view.

use crate::image_pipeline::common::constants::{LUMA_B, LUMA_G, LUMA_R};
use crate::image_pipeline::pnm::types::{ImageType, RasterImage};

/// Byte order of 16-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// Lower address holds the high byte.
    #[default]
    Big,
    /// Lower address holds the low byte.
    Little,
}

impl Endianness {
    fn read(self, bytes: &[u8]) -> u16 {
        let pair = [bytes[0], bytes[1]];
        match self {
            Endianness::Big => u16::from_be_bytes(pair),
            Endianness::Little => u16::from_le_bytes(pair),
        }
    }

    fn write(self, bytes: &mut [u8], value: u16) {
        let pair = match self {
            Endianness::Big => value.to_be_bytes(),
            Endianness::Little => value.to_le_bytes(),
        };
        bytes[..2].copy_from_slice(&pair);
    }
}

#[inline]
fn weighted(r: f64, g: f64, b: f64) -> f64 {
    (r * LUMA_R + g * LUMA_G + b * LUMA_B).round()
}

/// Luma of three 8-bit samples.
#[inline]
pub fn luma_rgb8(r: u8, g: u8, b: u8) -> u8 {
    weighted(r as f64, g as f64, b as f64) as u8
}

/// Luma of the pixel starting at byte `offset`, respecting depth and byte order.
pub fn get_luma(image: &RasterImage, offset: usize, endianness: Endianness) -> u16 {
    let data = image.data();
    match (image.is_8bit(), image.image_type()) {
        (true, ImageType::Grayscale) => data[offset] as u16,
        (true, ImageType::Color) => {
            luma_rgb8(data[offset], data[offset + 1], data[offset + 2]) as u16
        }
        (false, ImageType::Grayscale) => endianness.read(&data[offset..]),
        (false, ImageType::Color) => {
            let r = endianness.read(&data[offset..]) as f64;
            let g = endianness.read(&data[offset + 2..]) as f64;
            let b = endianness.read(&data[offset + 4..]) as f64;
            weighted(r, g, b) as u16
        }
    }
}

/// Writes `value` into every channel of the pixel at byte `offset`.
///
/// For color images this broadcasts a single intensity, so it is not the
/// inverse of [`get_luma`].
pub fn set_luma(image: &mut RasterImage, offset: usize, value: u16, endianness: Endianness) {
    let channels = image.channels();
    let eight_bit = image.is_8bit();
    let data = image.data_mut();
    if eight_bit {
        data[offset..offset + channels].fill(value as u8);
    } else {
        for sample in data[offset..offset + channels * 2].chunks_exact_mut(2) {
            endianness.write(sample, value);
        }
    }
}

/// 8-bit luma of pixel `index`, reading the buffer with a one-byte-per-sample
/// layout regardless of `max_sample`.
pub fn extract_8bit_luma(image: &RasterImage, index: usize) -> u8 {
    let data = image.data();
    match image.image_type() {
        ImageType::Grayscale => data[index],
        ImageType::Color => {
            let offset = index * 3;
            luma_rgb8(data[offset], data[offset + 1], data[offset + 2])
        }
    }
}
