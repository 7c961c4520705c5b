//! Error types for config validation and processing.

use thiserror::Error;

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Error codes reported by config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Timing errors (E001-E009)
    /// E001: Sample rate is not one of the supported rates
    UnsupportedSampleRate,
    /// E002: Duration is not positive and finite
    InvalidDuration,
    /// E003: Tempo sections are empty, unordered, or do not start at zero
    InvalidTempoMap,
    /// E004: Pad envelope stages are empty, unordered, or do not start at zero
    InvalidEnvelopeStages,

    // Arrangement errors (E010-E019)
    /// E010: Chord catalog or progression is empty
    EmptyProgression,
    /// E011: Progression or melody map references an unknown chord
    UnknownChord,
    /// E012: Duplicate chord name in the catalog
    DuplicateChord,

    // Curve errors (E020-E029)
    /// E020: Curve has no breakpoints
    EmptyCurve,
    /// E021: Curve breakpoint times are not strictly increasing
    UnorderedCurve,
    /// E022: Curve value outside its permitted range
    CurveOutOfRange,
    /// E023: Gain automation curve decreases
    DecreasingGain,

    // Voice and processing errors (E030-E039)
    /// E030: Voice parameter out of range
    InvalidVoiceParam,
    /// E031: Reverb parameter out of range
    InvalidReverbParam,
    /// E032: Mastering parameter out of range
    InvalidMasterParam,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedSampleRate => "E001",
            ErrorCode::InvalidDuration => "E002",
            ErrorCode::InvalidTempoMap => "E003",
            ErrorCode::InvalidEnvelopeStages => "E004",
            ErrorCode::EmptyProgression => "E010",
            ErrorCode::UnknownChord => "E011",
            ErrorCode::DuplicateChord => "E012",
            ErrorCode::EmptyCurve => "E020",
            ErrorCode::UnorderedCurve => "E021",
            ErrorCode::CurveOutOfRange => "E022",
            ErrorCode::DecreasingGain => "E023",
            ErrorCode::InvalidVoiceParam => "E030",
            ErrorCode::InvalidReverbParam => "E031",
            ErrorCode::InvalidMasterParam => "E032",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single validation error with its location in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Dotted path of the offending field (e.g. `layers.pad`).
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while parsing, loading, or validating configuration.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A note name could not be resolved to a pitch.
    #[error("invalid note name: '{name}'")]
    InvalidNote {
        /// The rejected note name.
        name: String,
    },

    /// A chord name is not present in the catalog.
    #[error("unknown chord: '{name}'")]
    UnknownChord {
        /// The missing chord name.
        name: String,
    },

    /// A preset name is not recognized.
    #[error("unknown preset: '{name}' (expected one of: {expected})")]
    UnknownPreset {
        /// The rejected preset name.
        name: String,
        /// Comma-separated list of known presets.
        expected: String,
    },

    /// Config validation failed.
    #[error("config validation failed with {} error(s): {}", .0.len(), first_message(.0))]
    ValidationFailed(Vec<ValidationError>),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn first_message(errors: &[ValidationError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

impl SpecError {
    /// Creates an invalid note error.
    pub fn invalid_note(name: impl Into<String>) -> Self {
        Self::InvalidNote { name: name.into() }
    }
}

/// Common interface for errors raised by rendering backends.
///
/// Gives every backend error a stable code and a category so the CLI can
/// report failures uniformly.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "AUDIO_001". These codes are stable and
    /// can be matched programmatically.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

impl BackendError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::InvalidNote { .. } => "SPEC_001",
            SpecError::UnknownChord { .. } => "SPEC_002",
            SpecError::UnknownPreset { .. } => "SPEC_003",
            SpecError::ValidationFailed(_) => "SPEC_004",
            SpecError::JsonParse(_) => "SPEC_005",
            SpecError::Io(_) => "SPEC_006",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}
