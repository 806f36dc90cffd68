//! Fixed quantization and range constants.

/// Fixed-point factor of the gain scale: `scale_raw = round(scale * GAIN_SCALE_RAW)`.
pub const GAIN_SCALE_RAW: f64 = 16384.0;
pub const GAIN_SCALE_MIN: f64 = 1.0 / GAIN_SCALE_RAW;
pub const GAIN_SCALE_MAX: f64 = 262140.0 / GAIN_SCALE_RAW;

pub const GAIN_OFFSET_MIN: u8 = 0;
pub const GAIN_OFFSET_MAX: u8 = 255;

/// Full-scale value of an 8-bit gain map byte.
pub const GAIN_BYTE_FULL_SCALE: f64 = 255.0;

pub const SAT_8BIT: u16 = 255;
pub const SAT_16BIT: u16 = 65535;

/// Only 8-bit containers are accepted when decoding PNM files.
pub const PNM_MAX_SAMPLE: u32 = 255;

/// Beyond this max/min luma ratio the correction range is limited.
pub const MAX_CORRECTION_RATIO: u8 = 10;

pub const LUMA_R: f64 = 0.299;
pub const LUMA_G: f64 = 0.587;
pub const LUMA_B: f64 = 0.114;

/// Saturation value for a given max-sample value.
pub fn saturation_for(max_sample: u32) -> u16 {
    if max_sample <= SAT_8BIT as u32 {
        SAT_8BIT
    } else {
        SAT_16BIT
    }
}
