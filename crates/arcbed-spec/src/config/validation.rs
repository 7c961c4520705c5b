//! Config validation.
//!
//! Validation collects every problem it finds instead of stopping at the
//! first, so a hand-edited config can be fixed in one pass.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::{ArcConfig, ArpVoice, MelodyVoice};
use crate::curve::Curve;
use crate::error::{ErrorCode, ValidationError};

/// Sample rates the renderer accepts.
pub const SUPPORTED_SAMPLE_RATES: [u32; 3] = [22050, 44100, 48000];

/// Longest generation (target plus overhang) in seconds.
pub const MAX_DURATION: f64 = 600.0;

/// Upper bound for every layer volume curve.
pub const MAX_LAYER_GAIN: f64 = 1.0;

/// Outcome of validating a config.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Every error found.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// True when no errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, code: ErrorCode, message: impl Into<String>, path: impl Into<String>) {
        self.errors
            .push(ValidationError::with_path(code, message, path));
    }
}

/// Validates a config and returns every error found.
pub fn validate_config(config: &ArcConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_timing(config, &mut result);
    validate_arrangement(config, &mut result);
    validate_layers(config, &mut result);
    validate_voices(config, &mut result);
    validate_reverb(config, &mut result);
    validate_master(config, &mut result);

    result
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// True if a delay in milliseconds truncates to at least one sample.
///
/// An unusable sample rate is reported on its own, so it passes here.
fn spans_a_sample(delay_ms: f64, sample_rate: f64) -> bool {
    sample_rate <= 0.0 || (delay_ms / 1000.0 * sample_rate).floor() >= 1.0
}

fn strictly_increasing(mut values: impl Iterator<Item = f64>) -> bool {
    let Some(mut prev) = values.next() else {
        return true;
    };
    for value in values {
        if value.partial_cmp(&prev) != Some(Ordering::Greater) {
            return false;
        }
        prev = value;
    }
    true
}

fn validate_timing(config: &ArcConfig, result: &mut ValidationResult) {
    if !SUPPORTED_SAMPLE_RATES.contains(&config.sample_rate) {
        result.push(
            ErrorCode::UnsupportedSampleRate,
            format!(
                "sample rate {} is not one of {:?}",
                config.sample_rate, SUPPORTED_SAMPLE_RATES
            ),
            "sample_rate",
        );
    }
    if !is_positive(config.target_duration) {
        result.push(
            ErrorCode::InvalidDuration,
            format!("must be positive, got {}", config.target_duration),
            "target_duration",
        );
    }
    if !is_non_negative(config.overhang) {
        result.push(
            ErrorCode::InvalidDuration,
            format!("must be non-negative, got {}", config.overhang),
            "overhang",
        );
    }
    let generation = config.target_duration + config.overhang;
    if generation.is_finite() && generation > MAX_DURATION {
        result.push(
            ErrorCode::InvalidDuration,
            format!(
                "target plus overhang is {}s, above the {}s limit",
                generation, MAX_DURATION
            ),
            "target_duration",
        );
    }
    if !is_positive(config.min_chord_duration) {
        result.push(
            ErrorCode::InvalidDuration,
            format!("must be positive, got {}", config.min_chord_duration),
            "min_chord_duration",
        );
    }

    match config.tempo.first() {
        None => result.push(ErrorCode::InvalidTempoMap, "no tempo sections", "tempo"),
        Some(first) if first.start != 0.0 => result.push(
            ErrorCode::InvalidTempoMap,
            format!("first section must start at 0, got {}", first.start),
            "tempo[0].start",
        ),
        Some(_) => {}
    }
    for (i, section) in config.tempo.iter().enumerate() {
        if !is_positive(section.bpm) {
            result.push(
                ErrorCode::InvalidTempoMap,
                format!("bpm must be positive, got {}", section.bpm),
                format!("tempo[{}].bpm", i),
            );
        }
        if section.chord_beats == 0 {
            result.push(
                ErrorCode::InvalidTempoMap,
                "chord_beats must be at least 1",
                format!("tempo[{}].chord_beats", i),
            );
        }
    }
    if !strictly_increasing(config.tempo.iter().map(|s| s.start)) {
        result.push(
            ErrorCode::InvalidTempoMap,
            "section starts must be strictly increasing",
            "tempo",
        );
    }
}

fn validate_arrangement(config: &ArcConfig, result: &mut ValidationResult) {
    if config.chords.is_empty() {
        result.push(ErrorCode::EmptyProgression, "chord catalog is empty", "chords");
    }
    if config.progression.is_empty() {
        result.push(ErrorCode::EmptyProgression, "progression is empty", "progression");
    }

    let mut seen = BTreeSet::new();
    for (i, chord) in config.chords.iter().enumerate() {
        if !seen.insert(chord.name.as_str()) {
            result.push(
                ErrorCode::DuplicateChord,
                format!("chord '{}' is defined more than once", chord.name),
                format!("chords[{}].name", i),
            );
        }
    }

    for (i, name) in config.progression.iter().enumerate() {
        if !seen.contains(name.as_str()) {
            result.push(
                ErrorCode::UnknownChord,
                format!("chord '{}' is not in the catalog", name),
                format!("progression[{}]", i),
            );
        }
    }
    for name in config.melody.keys() {
        if !seen.contains(name.as_str()) {
            result.push(
                ErrorCode::UnknownChord,
                format!("chord '{}' is not in the catalog", name),
                format!("melody.{}", name),
            );
        }
    }
}

fn validate_curve(
    curve: &Curve,
    path: &str,
    min: f64,
    max: f64,
    result: &mut ValidationResult,
) {
    let points = curve.points();
    if points.is_empty() {
        result.push(ErrorCode::EmptyCurve, "curve has no breakpoints", path);
        return;
    }
    for (i, &(t, v)) in points.iter().enumerate() {
        if !t.is_finite() || !v.is_finite() {
            result.push(
                ErrorCode::CurveOutOfRange,
                "breakpoint is not finite",
                format!("{}[{}]", path, i),
            );
        } else if !(min..=max).contains(&v) {
            result.push(
                ErrorCode::CurveOutOfRange,
                format!("value {} outside [{}, {}]", v, min, max),
                format!("{}[{}]", path, i),
            );
        }
    }
    if !strictly_increasing(points.iter().map(|&(t, _)| t)) {
        result.push(
            ErrorCode::UnorderedCurve,
            "breakpoint times must be strictly increasing",
            path,
        );
    }
}

fn validate_layers(config: &ArcConfig, result: &mut ValidationResult) {
    for (name, curve) in config.layers.named() {
        validate_curve(curve, &format!("layers.{}", name), 0.0, MAX_LAYER_GAIN, result);
    }
}

fn validate_arp(voice: &ArpVoice, path: &str, result: &mut ValidationResult) {
    let checks = [
        ("step_beats", is_positive(voice.step_beats)),
        ("note_fraction", is_positive(voice.note_fraction)),
        ("max_note", is_positive(voice.max_note)),
        ("attack", is_non_negative(voice.attack)),
        ("threshold", is_non_negative(voice.threshold)),
    ];
    push_voice_checks(&checks, path, result);
}

fn validate_melody(voice: &MelodyVoice, result: &mut ValidationResult) {
    let checks = [
        ("spacing_beats", is_positive(voice.spacing_beats)),
        ("note_beats", is_positive(voice.note_beats)),
        ("max_note", is_positive(voice.max_note)),
        ("attack", is_non_negative(voice.attack)),
        ("threshold", is_non_negative(voice.threshold)),
    ];
    push_voice_checks(&checks, "voices.melody", result);
}

fn push_voice_checks(checks: &[(&str, bool)], path: &str, result: &mut ValidationResult) {
    for (field, ok) in checks {
        if !ok {
            result.push(
                ErrorCode::InvalidVoiceParam,
                format!("{} is out of range", field),
                format!("{}.{}", path, field),
            );
        }
    }
}

fn validate_voices(config: &ArcConfig, result: &mut ValidationResult) {
    let pad = &config.voices.pad;
    push_voice_checks(
        &[
            ("gain", is_non_negative(pad.gain)),
            ("threshold", is_non_negative(pad.threshold)),
        ],
        "voices.pad",
        result,
    );
    match pad.envelopes.first() {
        None => result.push(
            ErrorCode::InvalidEnvelopeStages,
            "no pad envelope stages",
            "voices.pad.envelopes",
        ),
        Some(first) if first.start != 0.0 => result.push(
            ErrorCode::InvalidEnvelopeStages,
            format!("first stage must start at 0, got {}", first.start),
            "voices.pad.envelopes[0].start",
        ),
        Some(_) => {}
    }
    for (i, stage) in pad.envelopes.iter().enumerate() {
        if !is_non_negative(stage.attack) || !is_non_negative(stage.release) {
            result.push(
                ErrorCode::InvalidEnvelopeStages,
                "attack and release must be non-negative",
                format!("voices.pad.envelopes[{}]", i),
            );
        }
    }
    if !strictly_increasing(pad.envelopes.iter().map(|s| s.start)) {
        result.push(
            ErrorCode::InvalidEnvelopeStages,
            "stage starts must be strictly increasing",
            "voices.pad.envelopes",
        );
    }

    let bass = &config.voices.bass;
    push_voice_checks(
        &[
            ("gain", is_non_negative(bass.gain)),
            ("threshold", is_non_negative(bass.threshold)),
            ("attack", is_non_negative(bass.attack)),
            ("release", is_non_negative(bass.release)),
        ],
        "voices.bass",
        result,
    );

    validate_arp(&config.voices.quarter_arp, "voices.quarter_arp", result);
    validate_arp(&config.voices.eighth_arp, "voices.eighth_arp", result);
    validate_melody(&config.voices.melody, result);
}

fn validate_reverb(config: &ArcConfig, result: &mut ValidationResult) {
    let reverb = &config.reverb;
    if !(0.0..=1.0).contains(&reverb.wet) {
        result.push(
            ErrorCode::InvalidReverbParam,
            format!("must be 0.0-1.0, got {}", reverb.wet),
            "reverb.wet",
        );
    }
    let sample_rate = f64::from(config.sample_rate);
    for (i, comb) in reverb.combs.iter().enumerate() {
        if !is_positive(comb.delay_ms) {
            result.push(
                ErrorCode::InvalidReverbParam,
                format!("delay must be positive, got {}", comb.delay_ms),
                format!("reverb.combs[{}].delay_ms", i),
            );
        } else if !spans_a_sample(comb.delay_ms, sample_rate) {
            result.push(
                ErrorCode::InvalidReverbParam,
                format!(
                    "delay {}ms is shorter than one sample at {} Hz",
                    comb.delay_ms, config.sample_rate
                ),
                format!("reverb.combs[{}].delay_ms", i),
            );
        }
        if !(comb.feedback > 0.0 && comb.feedback < 1.0) {
            result.push(
                ErrorCode::InvalidReverbParam,
                format!("feedback must be in (0, 1), got {}", comb.feedback),
                format!("reverb.combs[{}].feedback", i),
            );
        }
    }
    if !is_positive(reverb.allpass_ms) {
        result.push(
            ErrorCode::InvalidReverbParam,
            format!("must be positive, got {}", reverb.allpass_ms),
            "reverb.allpass_ms",
        );
    } else if !spans_a_sample(reverb.allpass_ms, sample_rate) {
        result.push(
            ErrorCode::InvalidReverbParam,
            format!(
                "delay {}ms is shorter than one sample at {} Hz",
                reverb.allpass_ms, config.sample_rate
            ),
            "reverb.allpass_ms",
        );
    }
    let allpass_stable = reverb.allpass_coefficient.abs() < 1.0;
    if !allpass_stable {
        result.push(
            ErrorCode::InvalidReverbParam,
            format!(
                "magnitude must be below 1, got {}",
                reverb.allpass_coefficient
            ),
            "reverb.allpass_coefficient",
        );
    }
}

fn validate_master(config: &ArcConfig, result: &mut ValidationResult) {
    let master = &config.master;
    validate_curve(
        &master.gain_curve,
        "master.gain_curve",
        0.0,
        f64::MAX,
        result,
    );
    if !master.gain_curve.is_non_decreasing() {
        result.push(
            ErrorCode::DecreasingGain,
            "gain automation must not decrease",
            "master.gain_curve",
        );
    }
    if !(master.ceiling > 0.0 && master.ceiling <= 1.0) {
        result.push(
            ErrorCode::InvalidMasterParam,
            format!("must be in (0, 1], got {}", master.ceiling),
            "master.ceiling",
        );
    }
    if !is_non_negative(master.fade_in) {
        result.push(
            ErrorCode::InvalidMasterParam,
            format!("must be non-negative, got {}", master.fade_in),
            "master.fade_in",
        );
    }
    if !is_non_negative(master.fade_out) {
        result.push(
            ErrorCode::InvalidMasterParam,
            format!("must be non-negative, got {}", master.fade_out),
            "master.fade_out",
        );
    }
}
