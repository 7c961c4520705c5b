//! Comb/allpass reverb.
//!
//! Four feedback combs run in parallel over the dry signal, their sum is
//! peak-normalized, and a single allpass-style pass diffuses the result.
//! Each filter feeds back its own output in place, so the tails compound
//! rather than echo once.

use arcbed_spec::{CombTap, ReverbParams};

use crate::envelope::samples_for;
use crate::error::{AudioError, AudioResult};

/// Floor for the comb-sum peak used as a normalization divisor.
const MIN_PEAK: f64 = 1e-9;

/// Feedback comb filter.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CombFilter {
    delay: usize,
    feedback: f64,
}

impl CombFilter {
    fn new(tap: &CombTap, sample_rate: f64) -> Self {
        Self {
            delay: samples_for(tap.delay_ms / 1000.0, sample_rate),
            feedback: tap.feedback,
        }
    }

    /// Returns a filtered copy: `y[i] = x[i] + y[i - d] * feedback`.
    fn process(&self, input: &[f64]) -> Vec<f64> {
        let mut output = input.to_vec();
        for i in self.delay..output.len() {
            output[i] += output[i - self.delay] * self.feedback;
        }
        output
    }
}

/// Single-coefficient diffuser applied in place.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AllpassFilter {
    delay: usize,
    coefficient: f64,
}

impl AllpassFilter {
    fn process(&self, buffer: &mut [f64]) {
        for i in self.delay..buffer.len() {
            buffer[i] += self.coefficient * buffer[i - self.delay];
        }
    }
}

/// Renders the fully wet signal, normalized to unit peak before diffusion.
pub fn wet_signal(dry: &[f64], params: &ReverbParams, sample_rate: f64) -> Vec<f64> {
    let mut wet = vec![0.0; dry.len()];
    for tap in &params.combs {
        let comb = CombFilter::new(tap, sample_rate).process(dry);
        for (acc, s) in wet.iter_mut().zip(comb) {
            *acc += s;
        }
    }

    let peak = wet.iter().map(|s| s.abs()).fold(0.0_f64, f64::max);
    let scale = peak.max(MIN_PEAK);
    for s in wet.iter_mut() {
        *s /= scale;
    }

    AllpassFilter {
        delay: samples_for(params.allpass_ms / 1000.0, sample_rate),
        coefficient: params.allpass_coefficient,
    }
    .process(&mut wet);

    wet
}

/// Applies reverb in place: `dry * (1 - wet) + reverb * wet`.
///
/// With `wet == 0` the buffer is left untouched.
pub fn apply(samples: &mut [f64], params: &ReverbParams, sample_rate: f64) -> AudioResult<()> {
    let wet = params.wet;
    if !(0.0..=1.0).contains(&wet) {
        return Err(AudioError::invalid_param(
            "reverb.wet",
            format!("must be 0.0-1.0, got {}", wet),
        ));
    }
    if let Some(tap) = params
        .combs
        .iter()
        .find(|c| !(c.feedback > 0.0 && c.feedback < 1.0))
    {
        return Err(AudioError::invalid_param(
            "reverb.combs.feedback",
            format!("must be in (0, 1), got {}", tap.feedback),
        ));
    }
    if wet == 0.0 {
        return Ok(());
    }

    let reverb = wet_signal(samples, params, sample_rate);
    for (s, r) in samples.iter_mut().zip(reverb) {
        *s = *s * (1.0 - wet) + r * wet;
    }

    tracing::debug!(wet, combs = params.combs.len(), "applied reverb");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 44100.0;

    fn impulse(len: usize) -> Vec<f64> {
        let mut buf = vec![0.0; len];
        buf[0] = 1.0;
        buf
    }

    fn params(wet: f64) -> ReverbParams {
        ReverbParams {
            wet,
            ..ReverbParams::default()
        }
    }

    #[test]
    fn test_comb_feedback_compounds() {
        let comb = CombFilter {
            delay: 2,
            feedback: 0.5,
        };
        let out = comb.process(&impulse(7));
        assert_eq!(out, vec![1.0, 0.0, 0.5, 0.0, 0.25, 0.0, 0.125]);
    }

    #[test]
    fn test_allpass_in_place() {
        let mut buf = impulse(5);
        AllpassFilter {
            delay: 1,
            coefficient: -0.5,
        }
        .process(&mut buf);
        assert_eq!(buf, vec![1.0, -0.5, 0.25, -0.125, 0.0625]);
    }

    #[test]
    fn test_comb_delays_from_milliseconds() {
        let delays: Vec<usize> = ReverbParams::default()
            .combs
            .iter()
            .map(|tap| CombFilter::new(tap, SR).delay)
            .collect();
        assert_eq!(delays, vec![1309, 1636, 1812, 1927]);
    }

    #[test]
    fn test_zero_wet_is_identity() {
        let dry: Vec<f64> = (0..5000).map(|i| ((i as f64) * 0.01).sin() * 0.7).collect();
        let mut processed = dry.clone();
        apply(&mut processed, &params(0.0), SR).unwrap();
        assert_eq!(processed, dry);
    }

    #[test]
    fn test_full_wet_replaces_dry() {
        let dry = impulse(4000);
        let mut processed = dry.clone();
        apply(&mut processed, &params(1.0), SR).unwrap();
        assert_eq!(processed, wet_signal(&dry, &params(1.0), SR));
    }

    #[test]
    fn test_wet_signal_tail_follows_comb_delays() {
        let wet = wet_signal(&impulse(4000), &params(0.32), SR);
        // Four combs pass the impulse at i = 0 with unit gain; normalized to 1.
        assert!((wet[0] - 1.0).abs() < 1e-12);
        assert_eq!(wet[1], 0.0);
        // First echo of the shortest comb.
        assert!(wet[1309] > 0.0);
        assert!(wet[1308].abs() < 1e-12);
    }

    #[test]
    fn test_silent_input_stays_silent() {
        let mut buf = vec![0.0; 3000];
        apply(&mut buf, &params(0.5), SR).unwrap();
        assert!(buf.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_rejects_out_of_range_wet() {
        let mut buf = impulse(10);
        assert!(apply(&mut buf, &params(1.2), SR).is_err());
        assert!(apply(&mut buf, &params(-0.1), SR).is_err());
    }

    #[test]
    fn test_rejects_unstable_feedback() {
        let mut p = params(0.3);
        p.combs[2].feedback = 1.0;
        let mut buf = impulse(10);
        let err = apply(&mut buf, &p, SR).unwrap_err();
        assert!(err.to_string().contains("feedback"));
    }
}
