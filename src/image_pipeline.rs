//! Gain map pipeline module
//!
//! Flat-field correction for sensor images: a reference exposure of a uniform
//! scene is turned into a per-pixel gain map that can then be applied to other
//! images of the same resolution.

pub mod common;
pub mod conversions;
pub mod derive;
pub mod gain_map;
pub mod luma;
pub mod normalize;
pub mod pnm;
pub mod stats;

pub use common::{
    GainError,
    Result,
};

pub use pnm::{
    ChannelSource,
    ImageReader,
    ImageType,
    ImageWriter,
    PnmReader,
    PnmWriter,
    RasterImage,
};

pub use luma::Endianness;
pub use stats::{ImageStatistics, compute_stats};
pub use normalize::normalize;
pub use gain_map::GainMap;

pub use derive::{
    GainConfig,
    GainConfigBuilder,
    GainDerivation,
    derive_gain_map,
};

pub use conversions::{
    GainMapPipeline,
    PipelineReport,
};
