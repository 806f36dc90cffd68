//! Gain map application.

use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{GainError, Result};
use crate::image_pipeline::gain_map::types::{GainMap, decode_gain};
use crate::image_pipeline::pnm::types::RasterImage;

impl GainMap {
    /// Multiplies every sample of `image` by the decoded gain of its pixel.
    ///
    /// Samples saturate at 255 and are rounded to nearest. Only 8-bit images
    /// are supported.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn apply(&self, offset_raw: u8, scale: f64, image: &RasterImage) -> Result<RasterImage> {
        if image.width() != self.width() || image.height() != self.height() {
            return Err(GainError::SizeMismatch {
                what: "input image",
                expected_width: self.width(),
                expected_height: self.height(),
                actual_width: image.width(),
                actual_height: image.height(),
            });
        }
        if !image.is_8bit() {
            return Err(GainError::UnsupportedFormat(format!(
                "gain can only be applied to 8-bit images, max-sample is {}",
                image.max_sample()
            )));
        }

        debug!("Applying gain map with offset {} scale {:.6}", offset_raw, scale);

        let channels = image.channels();
        let mut output = image.alloc_like()?;
        let pixels_in = image.data().chunks_exact(channels);
        let pixels_out = output.data_mut().chunks_exact_mut(channels);

        for ((gain_byte, src), dst) in self.data().iter().zip(pixels_in).zip(pixels_out) {
            let gain = decode_gain(*gain_byte, offset_raw, scale);
            for (s, d) in src.iter().zip(dst.iter_mut()) {
                *d = (*s as f64 * gain).min(255.0).round() as u8;
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::pnm::types::ImageType;

    #[test]
    fn test_apply_grayscale() {
        let map = GainMap::from_data(3, 1, vec![255, 128, 0]).unwrap();
        let image = RasterImage::from_data(3, 1, ImageType::Grayscale, 255, vec![100, 100, 100]).unwrap();
        let output = map.apply(0, 2.0, &image).unwrap();
        // gains: 2.0, 1.0039, 0.0
        assert_eq!(output.data(), &[200, 100, 0]);
    }

    #[test]
    fn test_apply_saturates() {
        let map = GainMap::from_data(1, 1, vec![255]).unwrap();
        let image = RasterImage::from_data(1, 1, ImageType::Grayscale, 255, vec![200]).unwrap();
        let output = map.apply(0, 4.0, &image).unwrap();
        assert_eq!(output.data(), &[255]);
    }

    #[test]
    fn test_apply_color_scales_each_channel() {
        let map = GainMap::from_data(1, 1, vec![0]).unwrap();
        let image = RasterImage::from_data(1, 1, ImageType::Color, 255, vec![10, 20, 30]).unwrap();
        // (0 + 255) * 2 / 255 = 2
        let output = map.apply(255, 2.0, &image).unwrap();
        assert_eq!(output.image_type(), ImageType::Color);
        assert_eq!(output.data(), &[20, 40, 60]);
    }

    #[test]
    fn test_apply_dimension_mismatch() {
        let map = GainMap::new(2, 2).unwrap();
        let image = RasterImage::new(3, 2, ImageType::Grayscale, 255).unwrap();
        let err = map.apply(0, 1.0, &image).unwrap_err();
        assert!(matches!(err, GainError::SizeMismatch { actual_width: 3, .. }));
        assert!(err.is_size_mismatch());
    }

    #[test]
    fn test_apply_rejects_16bit() {
        let map = GainMap::new(1, 1).unwrap();
        let image = RasterImage::new(1, 1, ImageType::Grayscale, 65535).unwrap();
        assert!(matches!(map.apply(0, 1.0, &image), Err(GainError::UnsupportedFormat(_))));
    }
}
