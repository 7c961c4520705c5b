//! arcbed Spec Types
//!
//! This crate holds the declarative side of arcbed: everything needed to
//! describe a procedurally composed music bed without rendering it.
//!
//! # Overview
//!
//! - [`note`] - Note names and the pitch resolver
//! - [`chord`] - The chord catalog, progression, and melody map
//! - [`curve`] - Piecewise-linear automation curves
//! - [`config`] - The [`ArcConfig`] value that drives a render, plus validation
//! - [`preset`] - Built-in arcs
//! - [`hash`] - Canonical config hashing
//!
//! # Example
//!
//! ```
//! use arcbed_spec::{Preset, resolve_frequency};
//!
//! let config = Preset::Intouch.config();
//! config.validate().unwrap();
//! assert_eq!(config.tempo_at(0.0).bpm, 90.0);
//! assert_eq!(resolve_frequency("A4").unwrap(), 440.0);
//! ```

pub mod chord;
pub mod config;
pub mod curve;
pub mod error;
pub mod hash;
pub mod note;
pub mod preset;

pub use chord::{default_catalog, default_melody, default_progression, Chord};
pub use config::{
    seconds_to_samples, validate_config, ArcConfig, ArpVoice, BassVoice, CombTap, LayerCurves,
    MasterParams, MelodyVoice, PadEnvelopeStage, PadVoice, ReverbParams, TempoSection,
    ValidationResult, Voices, MAX_DURATION, MAX_LAYER_GAIN, SUPPORTED_SAMPLE_RATES,
};
pub use curve::{lerp, Breakpoint, Curve};
pub use error::{BackendError, ErrorCode, SpecError, SpecResult, ValidationError};
pub use hash::canonical_config_hash;
pub use note::{midi_to_frequency, resolve_frequency, Accidental, Letter, Note};
pub use preset::Preset;
