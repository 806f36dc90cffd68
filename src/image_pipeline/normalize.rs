//! Min/max stretch of the luma channel for visual inspection.

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::luma::{Endianness, get_luma, set_luma};
use crate::image_pipeline::pnm::types::RasterImage;

/// Maps the darkest luma to 0 and the brightest to the saturation value.
///
/// Returns a new image of the same geometry and depth. Stretched values are
/// truncated. When every pixel has the same luma the output stays all zero.
pub fn normalize(image: &RasterImage, endianness: Endianness) -> Result<RasterImage> {
    let sat = image.saturation();
    let count = image.pixel_count();

    let mut min_val = sat;
    let mut max_val = 0u16;
    for index in 0..count {
        let value = get_luma(image, image.pixel_offset(index), endianness);
        min_val = min_val.min(value);
        max_val = max_val.max(value);
    }

    if min_val >= sat {
        min_val = sat - 1;
    }
    if max_val == 0 {
        max_val = 1;
    }

    let mut output = image.alloc_like()?;
    if min_val == max_val {
        debug!("Flat image (luma {}), normalized output left empty", min_val);
        return Ok(output);
    }

    let scale = sat as f64 / (max_val - min_val) as f64;
    debug!("Normalize min:{} max:{} scale:{:.6}", min_val, max_val, scale);

    for index in 0..count {
        let offset = image.pixel_offset(index);
        let value = get_luma(image, offset, endianness);
        let stretched = ((value as f64 - min_val as f64) * scale).clamp(0.0, sat as f64);
        set_luma(&mut output, offset, stretched as u16, endianness);
    }

    Ok(output)
}
