//! JSON output types for machine-readable CLI output.
//!
//! Every command with a `--json` flag prints exactly one of these objects to
//! stdout. Logs go to stderr, so stdout stays parseable.

use arcbed_backend_audio::{ArcSnapshot, AudioError, ChordWindow, GenerateResult};
use arcbed_spec::{BackendError, SpecError};
use serde::Serialize;

use crate::export::ExportReport;
use crate::input::ConfigSource;

/// Error codes for CLI operations.
pub mod error_codes {
    /// Config file could not be read or parsed, or preset is unknown
    pub const CONFIG_LOAD: &str = "CLI_001";
    /// Writing or copying the asset failed
    pub const EXPORT: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g. "CLI_001", "E020", "AUDIO_004")
    pub code: String,
    pub message: String,
    /// Config path of the offending field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

/// Expands a spec error into one JSON error per underlying problem.
pub fn spec_errors_to_json(err: &SpecError) -> Vec<JsonError> {
    match err {
        SpecError::ValidationFailed(errors) => errors
            .iter()
            .map(|e| JsonError {
                code: e.code.to_string(),
                message: e.message.clone(),
                path: e.path.clone(),
            })
            .collect(),
        other => vec![JsonError::new(error_codes::CONFIG_LOAD, other.to_string())],
    }
}

/// Converts a backend error, unwrapping config errors.
pub fn audio_error_to_json(err: &AudioError) -> Vec<JsonError> {
    match err {
        AudioError::Spec(inner) => spec_errors_to_json(inner),
        other => vec![JsonError::new(other.code(), other.to_string())],
    }
}

/// Output of `arcbed render --json`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderOutput {
    pub success: bool,
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// Key facts of a successful render.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderSummary {
    pub config_hash: String,
    pub pcm_hash: String,
    pub sample_rate: u32,
    pub num_samples: usize,
    pub duration_seconds: f64,
    pub chords: usize,
    pub events: usize,
    pub peak_before_normalize: f64,
}

impl From<&GenerateResult> for RenderSummary {
    fn from(result: &GenerateResult) -> Self {
        Self {
            config_hash: result.config_hash.clone(),
            pcm_hash: result.wav.pcm_hash.clone(),
            sample_rate: result.wav.sample_rate,
            num_samples: result.wav.num_samples,
            duration_seconds: result.wav.duration_seconds(),
            chords: result.chord_count(),
            events: result.event_count(),
            peak_before_normalize: result.peak_before_normalize(),
        }
    }
}

/// Output of `arcbed validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// Output of `arcbed arc --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ArcOutput {
    pub success: bool,
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<ArcSnapshot>,
    /// Chord schedule, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chords: Option<Vec<ChordWindow>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// One entry of `arcbed presets --json`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PresetInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub default: bool,
}

/// Prints a value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
