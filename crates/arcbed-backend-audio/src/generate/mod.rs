//! Render pipeline: validate, compose, reverb, master, trim, encode.


use arcbed_spec::{canonical_config_hash, ArcConfig};

use crate::compose::{compose, CompositionReport};
use crate::effects::reverb;
use crate::error::AudioResult;
use crate::master::{master, MasterReport};
use crate::wav::WavResult;

/// A mastered bed at full generation length, before trimming.
#[derive(Debug, Clone)]
pub struct RenderedBed {
    /// Mastered float samples, `generation_samples()` long.
    pub samples: Vec<f64>,
    pub composition: CompositionReport,
    pub mastering: MasterReport,
}

/// Result of audio generation.
#[derive(Debug)]
pub struct GenerateResult {
    /// WAV file trimmed to the target duration.
    pub wav: WavResult,
    /// Canonical hash of the config that produced this bed.
    pub config_hash: String,
    pub composition: CompositionReport,
    pub mastering: MasterReport,
}

impl GenerateResult {
    /// Number of chords placed on the timeline.
    pub fn chord_count(&self) -> usize {
        self.composition.chords.len()
    }

    /// Number of tones rendered.
    pub fn event_count(&self) -> usize {
        self.composition.event_count()
    }

    /// Peak of the automated mix before normalization.
    pub fn peak_before_normalize(&self) -> f64 {
        self.mastering.peak_before_normalize
    }
}

/// Validates the config and renders the mastered float buffer.
///
/// Mastering runs over the full generation length, so the fade-out sits at
/// the end of the overhang rather than at the target duration.
pub fn render(config: &ArcConfig) -> AudioResult<RenderedBed> {
    config.validate()?;

    let sample_rate = config.sample_rate as f64;
    let (track, composition) = compose(config)?;
    let mut samples = track.into_samples();

    reverb::apply(&mut samples, &config.reverb, sample_rate)?;
    let mastering = master(&mut samples, &config.master, sample_rate);

    Ok(RenderedBed {
        samples,
        composition,
        mastering,
    })
}

/// Renders a config into a WAV file of exactly `target_samples()` samples.
pub fn generate(config: &ArcConfig) -> AudioResult<GenerateResult> {
    let config_hash = canonical_config_hash(config)?;
    let RenderedBed {
        mut samples,
        composition,
        mastering,
    } = render(config)?;

    trim_to(&mut samples, config.target_samples());
    let wav = WavResult::from_mono(&samples, config.sample_rate);

    tracing::info!(
        chords = composition.chords.len(),
        samples = wav.num_samples,
        pcm_hash = %wav.pcm_hash,
        "generated bed"
    );

    Ok(GenerateResult {
        wav,
        config_hash,
        composition,
        mastering,
    })
}

/// Truncates to `len` samples, zero-padding if the buffer is shorter.
pub fn trim_to(samples: &mut Vec<f64>, len: usize) {
    samples.resize(len, 0.0);
}
