//! Mastering: gain automation, peak normalization, and edge fades.
//!
//! Stages run in that order over the whole generation buffer. Fades come
//! last so the first and last samples land on zero after normalization.

use arcbed_spec::{Curve, MasterParams};
use serde::Serialize;

use crate::envelope::{linspace, samples_for};

/// Summary of the mastering pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MasterReport {
    /// Peak absolute sample after gain automation, before normalization.
    pub peak_before_normalize: f64,
    /// Linear gain applied by normalization (1.0 when the input was silent).
    pub normalize_gain: f64,
    pub fade_in_samples: usize,
    pub fade_out_samples: usize,
}

/// Multiplies each sample by the gain curve evaluated at its time `i / sr`.
pub fn apply_gain_curve(samples: &mut [f64], curve: &Curve, sample_rate: f64) {
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample *= curve.value_at(i as f64 / sample_rate);
    }
}

/// Peak absolute sample value.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, |a, b| a.max(b))
}

/// Scales audio so its peak equals `ceiling`.
///
/// Silent input is left unchanged. Returns the applied gain.
pub fn normalize_to_ceiling(samples: &mut [f64], ceiling: f64) -> f64 {
    let current_peak = peak(samples);

    if current_peak > 0.0 {
        let gain = ceiling / current_peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
        gain
    } else {
        1.0
    }
}

/// Applies linear fades to the head and tail, clamped to the buffer length.
///
/// Returns the fade-in and fade-out lengths in samples.
pub fn apply_fades(
    samples: &mut [f64],
    fade_in: f64,
    fade_out: f64,
    sample_rate: f64,
) -> (usize, usize) {
    let len = samples.len();
    let n_in = samples_for(fade_in, sample_rate).min(len);
    let n_out = samples_for(fade_out, sample_rate).min(len);

    for (s, g) in samples[..n_in].iter_mut().zip(linspace(0.0, 1.0, n_in)) {
        *s *= g;
    }
    for (s, g) in samples[len - n_out..]
        .iter_mut()
        .zip(linspace(1.0, 0.0, n_out))
    {
        *s *= g;
    }

    (n_in, n_out)
}

/// Runs the full mastering chain in place.
pub fn master(samples: &mut [f64], params: &MasterParams, sample_rate: f64) -> MasterReport {
    apply_gain_curve(samples, &params.gain_curve, sample_rate);
    let peak_before_normalize = peak(samples);
    let normalize_gain = normalize_to_ceiling(samples, params.ceiling);
    let (fade_in_samples, fade_out_samples) =
        apply_fades(samples, params.fade_in, params.fade_out, sample_rate);

    tracing::debug!(
        peak = peak_before_normalize,
        gain = normalize_gain,
        "mastered track"
    );

    MasterReport {
        peak_before_normalize,
        normalize_gain,
        fade_in_samples,
        fade_out_samples,
    }
}
