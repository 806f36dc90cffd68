//! Whole-image luma statistics over the 8-bit luma view.

use std::fmt;

use tracing::debug;

use crate::image_pipeline::luma::extract_8bit_luma;
use crate::image_pipeline::pnm::types::RasterImage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStatistics {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    /// Population standard deviation.
    pub stddev: f64,
}

impl ImageStatistics {
    /// `max / min` as a real number; infinite when `min == 0`.
    pub fn ratio(&self) -> f64 {
        self.max as f64 / self.min as f64
    }
}

impl fmt::Display for ImageStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min={} max={} ratio={:.6} avg={:.6} stddev={:.6}",
            self.min,
            self.max,
            self.ratio(),
            self.mean,
            self.stddev
        )
    }
}

/// Two passes: min/max/mean, then variance around the mean.
pub fn compute_stats(image: &RasterImage) -> ImageStatistics {
    let count = image.pixel_count();
    if count == 0 {
        return ImageStatistics { min: 0, max: 0, mean: 0.0, stddev: 0.0 };
    }

    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum = 0u64;
    for index in 0..count {
        let value = extract_8bit_luma(image, index);
        min = min.min(value);
        max = max.max(value);
        sum += value as u64;
    }
    let mean = sum as f64 / count as f64;

    let variance = (0..count)
        .map(|index| {
            let delta = extract_8bit_luma(image, index) as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / count as f64;

    let stats = ImageStatistics { min, max, mean, stddev: variance.sqrt() };
    debug!("Computed statistics: {}", stats);
    stats
}
