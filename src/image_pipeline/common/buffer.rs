use crate::image_pipeline::common::error::{GainError, Result};

/// Allocates a zero-filled buffer, reporting failure instead of aborting.
pub fn alloc_zeroed(len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| GainError::AllocationError(len))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// `width * height * channels * bytes_per_sample` without overflow.
pub fn checked_len(width: usize, height: usize, channels: usize, bytes_per_sample: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .and_then(|n| n.checked_mul(bytes_per_sample))
        .ok_or(GainError::InvalidDimensions(width, height))
}
