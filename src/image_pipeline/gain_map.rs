//! Gain map module
//!
//! A gain map stores one quantized correction byte per pixel. Together with a
//! shared offset byte and a real-valued scale it decodes to the multiplicative
//! factor `(byte + offset) * scale / 255`.

mod apply;
mod io;
pub mod types;

pub use types::GainMap;
