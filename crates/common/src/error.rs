//! Error types shared across sensorwin crates.

/// Top-level error type for sensorwin operations.
#[derive(Debug, thiserror::Error)]
pub enum SensorwinError {
    /// Relative index past the end of a ring buffer.
    #[error("Index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// A sample or hook result with the wrong number of components.
    #[error("Shape mismatch: expected {expected} components, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Unrecognized filter algorithm name.
    #[error("Invalid filter algorithm: {name:?} (expected \"ewma\", \"sma\", or \"passthrough\")")]
    InvalidFilterAlgorithm { name: String },

    /// Zero capacity or zero dimension at construction.
    #[error("Invalid series geometry: capacity {capacity}, dimension {dimension}")]
    InvalidGeometry { capacity: usize, dimension: usize },

    #[error("Stream error: {message}")]
    Stream { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SensorwinError.
pub type SensorwinResult<T> = Result<T, SensorwinError>;

impl SensorwinError {
    pub fn index_out_of_range(index: usize, capacity: usize) -> Self {
        Self::IndexOutOfRange { index, capacity }
    }

    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    pub fn invalid_filter(name: impl Into<String>) -> Self {
        Self::InvalidFilterAlgorithm { name: name.into() }
    }

    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
