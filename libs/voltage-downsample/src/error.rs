//! Error types for voltage-downsample

use thiserror::Error;

/// Downsampling errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownsampleError {
    #[error("Mismatched input lengths: {timestamps} timestamps vs {values} values")]
    MismatchedLength { timestamps: usize, values: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DownsampleError {
    pub fn mismatched_length(timestamps: usize, values: usize) -> Self {
        Self::MismatchedLength { timestamps, values }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DownsampleError>;
