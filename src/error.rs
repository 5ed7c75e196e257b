//! Error types for the swatch_match library

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for swatch_match operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error types for color sampling, comparison and record handling
#[derive(Error, Debug)]
pub enum MatchError {
    /// Non-finite or out-of-domain numeric input
    #[error("Invalid input: {parameter} ({reason})")]
    InvalidInput { parameter: String, reason: String },

    /// Sampling request covering zero pixels
    #[error("Empty region: {width}x{height} contains no pixels")]
    EmptyRegion { width: u32, height: u32 },

    /// Selection smaller than the configured minimum
    #[error("Selection too small: {width}x{height} (minimum {min_width}x{min_height})")]
    SelectionTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    /// Selection extends past the image bounds
    #[error("Selection {x},{y} {width}x{height} exceeds image bounds {image_width}x{image_height}")]
    SelectionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Comparison requested before both references and the sample were set
    #[error("Comparison incomplete: {missing} not set")]
    IncompleteComparison { missing: String },

    /// No record stored under the given id
    #[error("Comparison record not found: {id}")]
    RecordNotFound { id: Uuid },

    /// Record storage failed
    #[error("Storage error: {message}")]
    StorageError {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl MatchError {
    /// Create an invalid input error
    pub fn invalid_input(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a storage error with context
    pub fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageError {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Check if this error can be fixed by the user retrying with different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MatchError::EmptyRegion { .. }
                | MatchError::SelectionTooSmall { .. }
                | MatchError::SelectionOutOfBounds { .. }
                | MatchError::IncompleteComparison { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            MatchError::EmptyRegion { .. } | MatchError::SelectionTooSmall { .. } => {
                "Selection too small. Drag a larger area over the color.".to_string()
            }
            MatchError::SelectionOutOfBounds { .. } => {
                "Selection extends outside the captured image. Please select again.".to_string()
            }
            MatchError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            MatchError::IncompleteComparison { missing } => {
                format!("Please capture the {} before comparing.", missing)
            }
            MatchError::RecordNotFound { .. } => {
                "That comparison no longer exists.".to_string()
            }
            MatchError::StorageError { .. } => {
                "Could not access saved comparisons.".to_string()
            }
            _ => "Color comparison failed. Please try again.".to_string(),
        }
    }
}
