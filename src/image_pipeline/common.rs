//! Common utilities module
//!
//! Shared error type, fixed quantization constants and buffer allocation used
//! across the gain pipeline.

pub mod buffer;
pub mod constants;
pub mod error;

pub use buffer::alloc_zeroed;
pub use error::{GainError, Result};
