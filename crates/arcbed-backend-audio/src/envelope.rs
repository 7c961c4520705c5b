//! Amplitude envelopes for rendered tones.
//!
//! Two shapes cover every voice in a bed:
//!
//! - [`EnvelopeShape::Linear`] - linear rise, sustain at 1.0, linear fall
//!   (pads and bass)
//! - [`EnvelopeShape::Pluck`] - linear rise, then an exponential decay that
//!   reaches `e^-5` on the last sample (arpeggios and melody)
//!
//! Stage lengths are computed in whole samples by truncation. The attack is
//! clamped to the note first, the release is then clamped to what remains,
//! so an envelope never overruns its note.

use serde::{Deserialize, Serialize};

/// Decay exponent reached at the end of a pluck.
pub const PLUCK_DECAY: f64 = 5.0;

/// Tone envelope shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum EnvelopeShape {
    /// Linear attack, flat sustain, linear release.
    Linear {
        /// Attack time in seconds.
        attack: f64,
        /// Release time in seconds.
        release: f64,
    },
    /// Linear attack followed by exponential decay over the rest of the note.
    Pluck {
        /// Attack time in seconds.
        attack: f64,
    },
}

impl EnvelopeShape {
    /// Renders the envelope for a note of `num_samples` samples.
    pub fn render(&self, num_samples: usize, sample_rate: f64) -> Vec<f64> {
        match *self {
            EnvelopeShape::Linear { attack, release } => {
                linear_envelope(num_samples, attack, release, sample_rate)
            }
            EnvelopeShape::Pluck { attack } => pluck_envelope(num_samples, attack, sample_rate),
        }
    }
}

/// `n` evenly spaced values from `start` to `end`, both endpoints included.
///
/// `n == 1` yields `[start]`, `n == 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Whole samples covered by `seconds`, truncated toward zero.
///
/// Negative and NaN inputs yield zero.
pub fn samples_for(seconds: f64, sample_rate: f64) -> usize {
    (seconds * sample_rate).max(0.0) as usize
}

/// Linear attack / sustain / release envelope.
pub fn linear_envelope(num_samples: usize, attack: f64, release: f64, sample_rate: f64) -> Vec<f64> {
    let mut env = vec![1.0; num_samples];

    let a = samples_for(attack, sample_rate).min(num_samples);
    let r = samples_for(release, sample_rate).min(num_samples - a);

    env[..a].copy_from_slice(&linspace(0.0, 1.0, a));
    if r > 0 {
        env[num_samples - r..].copy_from_slice(&linspace(1.0, 0.0, r));
    }

    env
}

/// Linear attack followed by `exp(-x)` for `x` running from 0 to [`PLUCK_DECAY`].
pub fn pluck_envelope(num_samples: usize, attack: f64, sample_rate: f64) -> Vec<f64> {
    let a = samples_for(attack, sample_rate).min(num_samples);

    let mut env = linspace(0.0, 1.0, a);
    env.extend(
        linspace(0.0, PLUCK_DECAY, num_samples - a)
            .into_iter()
            .map(|x| (-x).exp()),
    );

    env
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 44100.0;

    #[test]
    fn test_linspace_includes_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(1.0, 0.0, 3), vec![1.0, 0.5, 0.0]);
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_linear_envelope_shape() {
        let env = linear_envelope(44100, 0.5, 0.25, SR);
        assert_eq!(env.len(), 44100);
        assert_eq!(env[0], 0.0);
        assert_eq!(env[22049], 1.0);
        assert_eq!(env[30000], 1.0);
        assert_eq!(env[44100 - 11025], 1.0);
        assert_eq!(env[44099], 0.0);

        // Rising through the attack, falling through the release.
        assert!(env[..22050].windows(2).all(|w| w[1] >= w[0]));
        assert!(env[44100 - 11025..].windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_linear_envelope_clamps_attack_first() {
        // Attack longer than the note takes every sample, leaving no release.
        let env = linear_envelope(100, 1.0, 1.0, SR);
        assert_eq!(env.len(), 100);
        assert_eq!(env[0], 0.0);
        assert_eq!(env[99], 1.0);

        // Release is trimmed to what the attack leaves.
        let env = linear_envelope(4410, 0.06, 0.5, SR);
        assert_eq!(env.len(), 4410);
        assert_eq!(env[0], 0.0);
        assert_eq!(env[4409], 0.0);
        let peak = env.iter().cloned().fold(0.0, f64::max);
        assert_eq!(peak, 1.0);
    }

    #[test]
    fn test_linear_envelope_zero_stages_is_flat() {
        let env = linear_envelope(64, 0.0, 0.0, SR);
        assert!(env.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_pluck_envelope_shape() {
        let env = pluck_envelope(22050, 0.01, SR);
        assert_eq!(env.len(), 22050);
        assert_eq!(env[0], 0.0);
        // First decay sample is exp(0).
        assert_eq!(env[441], 1.0);
        assert!(env[441..].windows(2).all(|w| w[1] < w[0]));
        let last = env[22049];
        assert!((last - (-PLUCK_DECAY).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_pluck_shorter_than_attack() {
        let env = pluck_envelope(100, 0.01, SR);
        assert_eq!(env.len(), 100);
        assert_eq!(env[99], 1.0);
    }

    #[test]
    fn test_envelopes_stay_in_unit_range() {
        let shapes = [
            EnvelopeShape::Linear {
                attack: 0.5,
                release: 1.0,
            },
            EnvelopeShape::Linear {
                attack: 0.06,
                release: 0.5,
            },
            EnvelopeShape::Pluck { attack: 0.008 },
            EnvelopeShape::Pluck { attack: 0.02 },
        ];
        for shape in shapes {
            for n in [0, 1, 2, 37, 1000, 50_000] {
                let env = shape.render(n, SR);
                assert_eq!(env.len(), n);
                assert!(env.iter().all(|&v| (0.0..=1.0).contains(&v)), "{:?}", shape);
            }
        }
    }

    #[test]
    fn test_envelope_shape_serde_tags() {
        let json = serde_json::to_string(&EnvelopeShape::Pluck { attack: 0.01 }).unwrap();
        assert_eq!(json, r#"{"shape":"pluck","attack":0.01}"#);
    }
}
