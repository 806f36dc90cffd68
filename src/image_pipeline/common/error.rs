use thiserror::Error;

#[derive(Error, Debug)]
pub enum GainError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),
    
    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),
    
    #[error("Invalid image format: {0}")]
    FormatError(String),
    
    #[error("Size mismatch: {what} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    SizeMismatch {
        what: &'static str,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Gain map file {path} has {actual} bytes, expected {expected}")]
    GainFileSize {
        path: String,
        actual: u64,
        expected: u64,
    },
    
    #[error("Could not allocate {0} bytes")]
    AllocationError(usize),
    
    #[error("Configuration out of range: {0}")]
    ConfigRange(String),
    
    #[error("Reference pixel ({x}, {y}) has zero luma, gain is undefined")]
    ZeroLuma { x: usize, y: usize },
    
    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),
    
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GainError {
    /// True for both flavours of dimension disagreement (image vs map, file vs map).
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, GainError::SizeMismatch { .. } | GainError::GainFileSize { .. })
    }
}

pub type Result<T> = std::result::Result<T, GainError>;
