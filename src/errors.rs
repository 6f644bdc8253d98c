//! Centralized error handling for imgstat
//!
//! The numeric core never fails: empty input and single samples are defined
//! results, not errors. The variants below cover the surfaces around it: the
//! statistics filter, thread pool configuration and the command line input.

use std::fmt;

/// Main error type for imgstat operations
#[derive(Debug)]
pub enum ImgStatError {
    /// Statistics were read before a reduction run completed
    ResultNotReady,

    /// The filter was updated without an input array
    MissingInput,

    /// A partitioning request that cannot be honored
    InvalidPartition { message: String },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// I/O operation errors
    IoError(std::io::Error),

    /// An array shape that is not a list of dimension lengths
    InvalidShape { shape: String, message: String },

    /// A token in the sample input could not be parsed as the requested type
    ParseError { line: usize, token: String },

    /// JSON report serialization errors
    JsonError(serde_json::Error),
}

impl fmt::Display for ImgStatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImgStatError::ResultNotReady => {
                write!(f, "Statistics requested before a reduction run completed")
            }
            ImgStatError::MissingInput => write!(f, "No input array has been set"),
            ImgStatError::InvalidPartition { message } => {
                write!(f, "Invalid partition specification: {}", message)
            }
            ImgStatError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            ImgStatError::ArrayError(e) => write!(f, "Array error: {}", e),
            ImgStatError::IoError(e) => write!(f, "I/O error: {}", e),
            ImgStatError::InvalidShape { shape, message } => {
                write!(f, "Invalid shape '{}': {}", shape, message)
            }
            ImgStatError::ParseError { line, token } => {
                write!(f, "Cannot parse '{}' as a sample on line {}", token, line)
            }
            ImgStatError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ImgStatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImgStatError::ArrayError(e) => Some(e),
            ImgStatError::IoError(e) => Some(e),
            ImgStatError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImgStatError {
    fn from(error: std::io::Error) -> Self {
        ImgStatError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for ImgStatError {
    fn from(error: ndarray::ShapeError) -> Self {
        ImgStatError::ArrayError(error)
    }
}

impl From<serde_json::Error> for ImgStatError {
    fn from(error: serde_json::Error) -> Self {
        ImgStatError::JsonError(error)
    }
}

impl From<rayon::ThreadPoolBuildError> for ImgStatError {
    fn from(error: rayon::ThreadPoolBuildError) -> Self {
        ImgStatError::ThreadPoolError(error.to_string())
    }
}

/// Result type alias for imgstat operations
pub type Result<T> = std::result::Result<T, ImgStatError>;
