//! arcbed Audio Backend
//!
//! Renders an [`ArcConfig`](arcbed_spec::ArcConfig) into a mono 16-bit WAV
//! music bed.
//!
//! # Pipeline
//!
//! 1. [`compose`] - walk the chord progression and schedule voice events
//! 2. [`synthesis`] - render each event as an enveloped additive tone
//! 3. [`track`] - overlap-add every tone into one float buffer
//! 4. [`effects::reverb`] - comb/allpass reverb
//! 5. [`master`] - gain automation, normalization, fades
//! 6. [`wav`] - trim to the target length and encode
//!
//! # Determinism
//!
//! Nothing in the pipeline is random. The same config produces byte-identical
//! output on the same platform, and [`WavResult::pcm_hash`] identifies it.
//!
//! # Example
//!
//! ```no_run
//! use arcbed_backend_audio::generate;
//! use arcbed_spec::Preset;
//!
//! let result = generate(&Preset::Intouch.config()).unwrap();
//! std::fs::write("music.wav", &result.wav.wav_data).unwrap();
//! println!("PCM hash: {}", result.wav.pcm_hash);
//! ```

pub mod compose;
pub mod effects;
pub mod envelope;
pub mod error;
pub mod generate;
pub mod master;
pub mod synthesis;
pub mod track;
pub mod wav;

pub use compose::{
    compose, plan, snapshot_at, ArcSnapshot, ChordWindow, CompositionReport, VoiceEvent,
};
pub use envelope::EnvelopeShape;
pub use error::{AudioError, AudioResult};
pub use generate::{generate, render, GenerateResult, RenderedBed};
pub use master::MasterReport;
pub use synthesis::{render_tone, Timbre};
pub use track::TrackBuffer;
pub use wav::WavResult;
