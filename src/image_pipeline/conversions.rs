//! Pipeline conversions module
//!
//! Orchestrates reading the reference, deriving and writing the gain map, the
//! inspection images, and correcting images with an existing map.

mod gain_pipeline;
mod timing;


pub use gain_pipeline::{GainMapPipeline, PipelineReport, artifact_path};
pub use timing::{PipelineTimings, StepTiming, Timer};
