use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::pnm::types::RasterImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage>;
}
