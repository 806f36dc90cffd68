use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::common::constants::{
    GAIN_BYTE_FULL_SCALE, MAX_CORRECTION_RATIO, SAT_8BIT,
};
use crate::image_pipeline::common::error::{GainError, Result};
use crate::image_pipeline::derive::types::{GainConfig, GainDerivation};
use crate::image_pipeline::gain_map::GainMap;
use crate::image_pipeline::luma::extract_8bit_luma;
use crate::image_pipeline::pnm::types::RasterImage;
use crate::image_pipeline::stats::{ImageStatistics, compute_stats};

impl GainDerivation {
    /// Chooses offset and scale for a reference with the given statistics.
    ///
    /// The darkest level gets unity gain and every brighter pixel is pulled
    /// down to it.
    pub fn plan(stats: &ImageStatistics, config: &GainConfig) -> Result<Self> {
        config.validate()?;
        let user_offset = config.offset_byte()?;

        let mut min = stats.min.max(1) as u16;
        let mut max = stats.max as u16;
        if max <= min {
            max = min + 1;
        }

        let mut range_limited = false;
        if max / min > MAX_CORRECTION_RATIO as u16 {
            warn!("Input image too non-uniform, limiting correction to {}x", MAX_CORRECTION_RATIO);
            max = SAT_8BIT;
            min = max / MAX_CORRECTION_RATIO as u16;
            range_limited = true;
        }

        let ratio = max as f64 / min as f64;

        // 1 <= min < max <= 256 and max / min <= 10 keep the automatic scale
        // inside the representable range; a user scale was validated above.
        let reported_scale = match (config.scale, user_offset) {
            (Some(scale), _) => scale,
            (None, None) => ratio - 1.0,
            (None, Some(offset)) => ratio - offset as f64 / GAIN_BYTE_FULL_SCALE,
        };

        let offset_raw = match user_offset {
            Some(offset) => offset,
            None => {
                let temp = ratio - 1.0;
                if temp > reported_scale {
                    (GAIN_BYTE_FULL_SCALE * reported_scale / temp).round() as u8
                } else if temp + 1.0 <= reported_scale {
                    0
                } else {
                    (GAIN_BYTE_FULL_SCALE * (temp + 1.0 - reported_scale)).round() as u8
                }
            }
        };

        // Never amplify the brightest pixel above unity.
        let mut effective_multiplier = reported_scale;
        let max_value_gain = reported_scale * (min as f64 / max as f64);
        if max_value_gain > 1.0 {
            effective_multiplier = ratio;
            warn!(
                "max value gain: {:.6} corrected multiplier: {:.6} corrected gain: {:.6}",
                max_value_gain,
                effective_multiplier,
                effective_multiplier * (min as f64 / max as f64)
            );
        }

        let derivation = Self {
            min,
            max,
            offset_raw,
            reported_scale,
            effective_multiplier,
            range_limited,
        };
        info!(
            "Gain Map scale: {:.6}x (raw={}) offset: {} ({:.6}) -> scaled: {}",
            derivation.reported_scale,
            derivation.scale_raw(),
            derivation.offset_raw,
            derivation.offset_raw as f64 / GAIN_BYTE_FULL_SCALE,
            derivation.apply_offset()
        );
        let (gain_min, gain_max) = derivation.gain_range();
        debug!("gain: min={:.6}x max={:.6}x", gain_min, gain_max);

        Ok(derivation)
    }

    /// Fills a gain map for `reference` using these parameters.
    ///
    /// A reference pixel with zero luma has no defined gain and is an error.
    pub fn fill(&self, reference: &RasterImage) -> Result<GainMap> {
        let width = reference.width();
        let mut gain = GainMap::new(width, reference.height())?;

        for (index, byte) in gain.data_mut().iter_mut().enumerate() {
            let ref_val = extract_8bit_luma(reference, index);
            if ref_val == 0 {
                return Err(GainError::ZeroLuma { x: index % width, y: index / width });
            }
            *byte = self.quantize(self.gain_for(ref_val));
        }

        Ok(gain)
    }
}

/// Computes statistics of `reference`, plans the parameters and fills the map.
#[instrument(skip_all, fields(width = reference.width(), height = reference.height()))]
pub fn derive_gain_map(reference: &RasterImage, config: &GainConfig) -> Result<(GainMap, GainDerivation)> {
    let stats = compute_stats(reference);
    info!("Input img: {}", stats);
    let derivation = GainDerivation::plan(&stats, config)?;
    let gain = derivation.fill(reference)?;
    Ok((gain, derivation))
}
