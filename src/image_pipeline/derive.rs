//! Gain derivation module
//!
//! Turns reference-image statistics into a scale/offset pair and fills a
//! [`GainMap`](crate::image_pipeline::gain_map::GainMap) that flattens the
//! reference towards its darkest level.

mod algorithm;
pub mod types;

pub use algorithm::derive_gain_map;
pub use types::{GainConfig, GainConfigBuilder, GainDerivation};
