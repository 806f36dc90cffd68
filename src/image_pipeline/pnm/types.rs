//! Raster image types

use crate::image_pipeline::common::buffer::{alloc_zeroed, checked_len};
use crate::image_pipeline::common::constants::{SAT_8BIT, saturation_for};
use crate::image_pipeline::common::error::{GainError, Result};

/// Pixel arrangement of a raster, one or three interleaved channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    /// Single channel, `P5`
    Grayscale,
    /// Interleaved R,G,B, `P6`
    Color,
}

impl ImageType {
    pub fn channels(self) -> usize {
        match self {
            ImageType::Grayscale => 1,
            ImageType::Color => 3,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            ImageType::Grayscale => "P5",
            ImageType::Color => "P6",
        }
    }

    pub fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"P5" => Some(ImageType::Grayscale),
            b"P6" => Some(ImageType::Color),
            _ => None,
        }
    }
}

/// Where the decoder takes the channel count from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelSource {
    /// Legacy compatibility: payload bytes divided by pixel count. A 16-bit
    /// grayscale payload is indistinguishable from 8-bit two-channel data, so
    /// this is lossy for anything that is not 8-bit.
    #[default]
    PayloadSize,
    /// Trust the `P5`/`P6` marker.
    Marker,
}

/// An owned raster. `data.len() == width * height * channels * bytes_per_sample`
/// holds for every live image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    image_type: ImageType,
    /// Largest sample value; above 255 samples take two bytes.
    max_sample: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Allocates a zero-filled image.
    pub fn new(width: usize, height: usize, image_type: ImageType, max_sample: u32) -> Result<Self> {
        let len = Self::expected_len(width, height, image_type, max_sample)?;
        Ok(Self {
            width,
            height,
            image_type,
            max_sample,
            data: alloc_zeroed(len)?,
        })
    }

    /// Wraps an existing buffer, checking it against the dimensions.
    pub fn from_data(
        width: usize,
        height: usize,
        image_type: ImageType,
        max_sample: u32,
        data: Vec<u8>,
    ) -> Result<Self> {
        let len = Self::expected_len(width, height, image_type, max_sample)?;
        if data.len() != len {
            return Err(GainError::FormatError(format!(
                "buffer holds {} bytes, {}x{} {:?} image needs {}",
                data.len(),
                width,
                height,
                image_type,
                len
            )));
        }
        Ok(Self {
            width,
            height,
            image_type,
            max_sample,
            data,
        })
    }

    /// An empty image with the same geometry and sample layout.
    pub fn alloc_like(&self) -> Result<Self> {
        Self::new(self.width, self.height, self.image_type, self.max_sample)
    }

    fn expected_len(width: usize, height: usize, image_type: ImageType, max_sample: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(GainError::InvalidDimensions(width, height));
        }
        checked_len(width, height, image_type.channels(), bytes_per_sample(max_sample))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn channels(&self) -> usize {
        self.image_type.channels()
    }

    pub fn max_sample(&self) -> u32 {
        self.max_sample
    }

    pub fn bytes_per_sample(&self) -> usize {
        bytes_per_sample(self.max_sample)
    }

    pub fn is_8bit(&self) -> bool {
        self.max_sample <= SAT_8BIT as u32
    }

    /// 255 or 65535 depending on depth.
    pub fn saturation(&self) -> u16 {
        saturation_for(self.max_sample)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Byte offset of pixel `index` (row-major) in the backing buffer.
    pub fn pixel_offset(&self, index: usize) -> usize {
        index * self.channels() * self.bytes_per_sample()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Frees the buffer and zeroes the geometry. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;
    }

    pub fn is_released(&self) -> bool {
        self.data.is_empty()
    }
}

pub fn bytes_per_sample(max_sample: u32) -> usize {
    if max_sample <= SAT_8BIT as u32 { 1 } else { 2 }
}
