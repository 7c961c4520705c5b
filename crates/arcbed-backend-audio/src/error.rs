//! Error types for the audio backend.

use arcbed_spec::{BackendError, SpecError};
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while composing or rendering a bed.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The config failed to load, validate, or resolve a note or chord.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::Spec(_) => "AUDIO_001",
            AudioError::InvalidSampleRate { .. } => "AUDIO_002",
            AudioError::InvalidDuration { .. } => "AUDIO_003",
            AudioError::InvalidParameter { .. } => "AUDIO_004",
            AudioError::Io(_) => "AUDIO_005",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AudioError::Spec(inner) => inner.category(),
            _ => "audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = AudioError::invalid_param("wet", "must be between 0 and 1");
        assert!(err.to_string().contains("wet"));
        assert!(err.to_string().contains("between 0 and 1"));
        assert_eq!(err.code(), "AUDIO_004");
    }

    #[test]
    fn test_spec_errors_keep_their_category() {
        let err = AudioError::from(SpecError::UnknownChord {
            name: "Dm".to_string(),
        });
        assert_eq!(err.category(), "spec");
        assert!(err.to_string().contains("Dm"));
    }
}
