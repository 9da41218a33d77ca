//! Error types for the Triq equalizer

use thiserror::Error;

/// Core error type
///
/// Only the non-real-time setup surface returns errors; the processing
/// path has no recoverable-error concept.
#[derive(Error, Debug)]
pub enum EqError {
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    #[error("Invalid block size: {0}")]
    InvalidBlockSize(usize),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
}

/// Result type alias
pub type EqResult<T> = Result<T, EqError>;
