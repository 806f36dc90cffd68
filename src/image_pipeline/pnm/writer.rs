use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::pnm::types::RasterImage;

pub trait ImageWriter {
    fn write_image(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()>;
}
