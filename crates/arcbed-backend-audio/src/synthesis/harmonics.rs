//! Additive synthesis over a fixed harmonic table.

use std::f64::consts::PI;

use super::Synthesizer;

/// A partial: harmonic number and relative amplitude.
pub type Partial = (u32, f64);

/// Slightly detuned copy of every partial, mixed under the original.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unison {
    /// Frequency ratio of the copy (1.003 = +5.2 cents).
    pub ratio: f64,
    /// Amplitude of the copy relative to the partial.
    pub mix: f64,
}

/// Additive synthesizer summing harmonic partials of a base frequency.
///
/// Output is divided by the summed partial amplitudes (scaled up by the
/// unison mix when present), which bounds every sample to [-1, 1].
#[derive(Debug, Clone)]
pub struct HarmonicSynth {
    /// Base frequency in Hz.
    pub base_freq: f64,
    /// Partials to sum.
    pub partials: &'static [Partial],
    /// Optional detuned layer.
    pub unison: Option<Unison>,
}

impl HarmonicSynth {
    /// Creates a synthesizer without a unison layer.
    pub fn new(base_freq: f64, partials: &'static [Partial]) -> Self {
        Self {
            base_freq,
            partials,
            unison: None,
        }
    }

    /// Adds a detuned unison layer.
    pub fn with_unison(mut self, unison: Unison) -> Self {
        self.unison = Some(unison);
        self
    }

    /// Divisor that maps the partial sum into [-1, 1].
    pub fn normalization(&self) -> f64 {
        let total: f64 = self.partials.iter().map(|&(_, amp)| amp).sum();
        let layer = self.unison.map_or(1.0, |u| 1.0 + u.mix);
        layer * total
    }
}

impl Synthesizer for HarmonicSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f64) -> Vec<f64> {
        let mut output = vec![0.0; num_samples];
        let norm = self.normalization();
        if norm <= 0.0 {
            return output;
        }

        for &(harmonic, amp) in self.partials {
            let freq = self.base_freq * harmonic as f64;
            add_sine(&mut output, freq, amp, sample_rate);
            if let Some(unison) = self.unison {
                add_sine(&mut output, freq * unison.ratio, amp * unison.mix, sample_rate);
            }
        }

        for sample in output.iter_mut() {
            *sample /= norm;
        }
        output
    }
}

/// Adds `amp * sin(2 pi f i / sr)` to every sample.
fn add_sine(output: &mut [f64], freq: f64, amp: f64, sample_rate: f64) {
    let omega = 2.0 * PI * freq / sample_rate;
    for (i, sample) in output.iter_mut().enumerate() {
        *sample += amp * (omega * i as f64).sin();
    }
}
