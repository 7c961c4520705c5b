//! Tone generators.
//!
//! Every voice in a bed is additive: a handful of harmonics of the note's
//! fundamental, scaled so the raw waveform stays within [-1, 1], then shaped
//! by an [`EnvelopeShape`].
//!
//! - [`Timbre::Pad`] - warm, five partials plus a detuned unison layer
//! - [`Timbre::Bright`] - six partials, used for arpeggios and melody
//! - [`Timbre::Bass`] - three partials

pub mod harmonics;

pub use harmonics::{HarmonicSynth, Partial, Unison};

use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopeShape;

/// Common trait for tone sources.
pub trait Synthesizer {
    /// Generates `num_samples` samples in range [-1.0, 1.0].
    fn synthesize(&self, num_samples: usize, sample_rate: f64) -> Vec<f64>;
}

/// Pad partials.
pub const PAD_HARMONICS: &[Partial] = &[(1, 1.0), (2, 0.35), (3, 0.15), (4, 0.06), (5, 0.02)];

/// Arpeggio and melody partials.
pub const BRIGHT_HARMONICS: &[Partial] = &[
    (1, 1.0),
    (2, 0.6),
    (3, 0.35),
    (4, 0.18),
    (5, 0.08),
    (6, 0.03),
];

/// Bass partials.
pub const BASS_HARMONICS: &[Partial] = &[(1, 1.0), (2, 0.4), (3, 0.12)];

/// Detuned layer mixed under each pad partial.
pub const PAD_UNISON: Unison = Unison {
    ratio: 1.003,
    mix: 0.18,
};

/// Tone colour of a voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timbre {
    Pad,
    Bright,
    Bass,
}

impl Timbre {
    /// Partial table for this timbre.
    pub fn harmonics(self) -> &'static [Partial] {
        match self {
            Timbre::Pad => PAD_HARMONICS,
            Timbre::Bright => BRIGHT_HARMONICS,
            Timbre::Bass => BASS_HARMONICS,
        }
    }

    /// Synthesizer for `frequency`.
    pub fn synth(self, frequency: f64) -> HarmonicSynth {
        let synth = HarmonicSynth::new(frequency, self.harmonics());
        match self {
            Timbre::Pad => synth.with_unison(PAD_UNISON),
            Timbre::Bright | Timbre::Bass => synth,
        }
    }
}

/// Renders one enveloped tone.
pub fn render_tone(
    timbre: Timbre,
    frequency: f64,
    num_samples: usize,
    envelope: &EnvelopeShape,
    sample_rate: f64,
) -> Vec<f64> {
    let mut tone = timbre.synth(frequency).synthesize(num_samples, sample_rate);
    let env = envelope.render(num_samples, sample_rate);
    for (sample, gain) in tone.iter_mut().zip(env) {
        *sample *= gain;
    }
    tone
}
