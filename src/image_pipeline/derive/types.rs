//! Gain derivation configuration and result types

use crate::image_pipeline::common::constants::{
    GAIN_BYTE_FULL_SCALE, GAIN_OFFSET_MAX, GAIN_OFFSET_MIN, GAIN_SCALE_MAX, GAIN_SCALE_MIN,
    GAIN_SCALE_RAW,
};
use crate::image_pipeline::common::error::{GainError, Result};
use crate::image_pipeline::luma::Endianness;
use crate::image_pipeline::pnm::types::ChannelSource;

/// Configuration for gain map generation
#[derive(Debug, Clone)]
pub struct GainConfig {
    /// Gain offset in raw units, `None` to pick it automatically
    pub offset: Option<u32>,
    /// Gain scale, `None` to pick it automatically
    pub scale: Option<f64>,
    /// Byte order used when normalizing 16-bit debug images
    pub endianness: Endianness,
    /// How the PNM decoder determines the channel count
    pub channel_source: ChannelSource,
    /// Whether to write the `_norm` / `_vis` inspection images
    pub write_debug_images: bool,
}

impl Default for GainConfig {
    fn default() -> Self {
        Self {
            offset: None,
            scale: None,
            endianness: Endianness::Big,
            channel_source: ChannelSource::PayloadSize,
            write_debug_images: true,
        }
    }
}

impl GainConfig {
    pub fn builder() -> GainConfigBuilder {
        GainConfigBuilder::default()
    }

    /// Rejects user-supplied values outside the encodable range.
    pub fn validate(&self) -> Result<()> {
        if let Some(offset) = self.offset {
            if offset > GAIN_OFFSET_MAX as u32 {
                return Err(GainError::ConfigRange(format!(
                    "gain offset {} outside {}..={}",
                    offset, GAIN_OFFSET_MIN, GAIN_OFFSET_MAX
                )));
            }
        }
        if let Some(scale) = self.scale {
            if !(GAIN_SCALE_MIN..=GAIN_SCALE_MAX).contains(&scale) {
                return Err(GainError::ConfigRange(format!(
                    "gain scale {} outside {:.6}..={:.6}",
                    scale, GAIN_SCALE_MIN, GAIN_SCALE_MAX
                )));
            }
        }
        Ok(())
    }

    /// The user offset as a byte, once validated.
    pub fn offset_byte(&self) -> Result<Option<u8>> {
        self.offset
            .map(|offset| {
                u8::try_from(offset)
                    .map_err(|_| GainError::ConfigRange(format!("gain offset {} is not a byte", offset)))
            })
            .transpose()
    }
}

/// Builder for GainConfig
#[derive(Default)]
pub struct GainConfigBuilder {
    offset: Option<Option<u32>>,
    scale: Option<Option<f64>>,
    endianness: Option<Endianness>,
    channel_source: Option<ChannelSource>,
    write_debug_images: Option<bool>,
}

impl GainConfigBuilder {
    pub fn offset(mut self, offset: Option<u32>) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn scale(mut self, scale: Option<f64>) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = Some(endianness);
        self
    }

    pub fn channel_source(mut self, source: ChannelSource) -> Self {
        self.channel_source = Some(source);
        self
    }

    pub fn write_debug_images(mut self, enable: bool) -> Self {
        self.write_debug_images = Some(enable);
        self
    }

    pub fn build(self) -> GainConfig {
        let default = GainConfig::default();
        GainConfig {
            offset: self.offset.unwrap_or(default.offset),
            scale: self.scale.unwrap_or(default.scale),
            endianness: self.endianness.unwrap_or(default.endianness),
            channel_source: self.channel_source.unwrap_or(default.channel_source),
            write_debug_images: self.write_debug_images.unwrap_or(default.write_debug_images),
        }
    }
}

/// Parameters chosen for one reference image.
///
/// `reported_scale` is what gets logged and used to decode the map.
/// `effective_multiplier` is what the per-pixel fill uses; the two differ when
/// the brightest pixel would otherwise be amplified above unity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainDerivation {
    /// Sanitized reference minimum luma
    pub min: u16,
    /// Sanitized reference maximum luma
    pub max: u16,
    pub offset_raw: u8,
    pub reported_scale: f64,
    pub effective_multiplier: f64,
    /// The reference exceeded the 10x ratio and the correction range was limited
    pub range_limited: bool,
}

impl GainDerivation {
    /// Fixed-point representation of the reported scale.
    pub fn scale_raw(&self) -> u32 {
        (self.reported_scale * GAIN_SCALE_RAW).round() as u32
    }

    fn offset_fraction(&self) -> f64 {
        self.offset_raw as f64 / GAIN_BYTE_FULL_SCALE
    }

    /// Offset re-expressed in gain map units, used when applying the map
    /// produced by this derivation.
    pub fn apply_offset(&self) -> u8 {
        (self.offset_raw as f64 / self.reported_scale).clamp(0.0, 255.0) as u8
    }

    fn raw_gain(&self, reference: f64) -> f64 {
        let offset = self.offset_fraction();
        ((offset + self.effective_multiplier) * self.min as f64 - offset * reference) / reference
    }

    /// Unquantized gain (excluding the offset term) for a reference luma.
    pub fn gain_for(&self, ref_val: u8) -> f64 {
        self.raw_gain(ref_val as f64)
    }

    /// Gain map byte for an unquantized gain.
    pub fn quantize(&self, gain_val: f64) -> u8 {
        (GAIN_BYTE_FULL_SCALE * (gain_val / self.reported_scale))
            .round()
            .clamp(0.0, 255.0) as u8
    }

    /// Total gain at the sanitized min and max luma, offset included.
    pub fn gain_range(&self) -> (f64, f64) {
        let offset = self.offset_fraction();
        (
            self.raw_gain(self.min as f64) + offset,
            self.raw_gain(self.max as f64) + offset,
        )
    }
}
