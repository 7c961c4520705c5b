//! Arc configuration.
//!
//! An [`ArcConfig`] is the single structured value that drives a render:
//! timing, section tempo map, per-layer volume curves, voice parameters,
//! reverb and mastering settings, and the chord catalog with its
//! progression. Presets in [`crate::preset`] build complete configs; users
//! can also load one from JSON.

mod validation;


use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::curve::Curve;
use crate::error::{SpecError, SpecResult};
use crate::note::Note;

pub use validation::{
    validate_config, ValidationResult, MAX_DURATION, MAX_LAYER_GAIN, SUPPORTED_SAMPLE_RATES,
};

fn default_overhang() -> f64 {
    3.0
}

fn default_min_chord_duration() -> f64 {
    0.05
}

/// Complete description of one rendered piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArcConfig {
    /// Sample rate in Hz (22050, 44100, or 48000).
    pub sample_rate: u32,
    /// Length of the delivered asset in seconds.
    pub target_duration: f64,
    /// Extra seconds rendered past the target and trimmed on export.
    #[serde(default = "default_overhang")]
    pub overhang: f64,
    /// Chords shorter than this end composition early.
    #[serde(default = "default_min_chord_duration")]
    pub min_chord_duration: f64,
    /// Chord catalog.
    pub chords: Vec<Chord>,
    /// Chord names in the order they cycle.
    pub progression: Vec<String>,
    /// High melody pair per chord name. Unmapped chords use their top arpeggio note.
    #[serde(default)]
    pub melody: BTreeMap<String, [Note; 2]>,
    /// Tempo sections; the last section whose start is <= t is active.
    pub tempo: Vec<TempoSection>,
    /// Volume multiplier curve per layer.
    pub layers: LayerCurves,
    /// Per-layer synthesis parameters.
    pub voices: Voices,
    /// Reverb settings.
    pub reverb: ReverbParams,
    /// Mastering settings.
    pub master: MasterParams,
}

/// One tempo region of the arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TempoSection {
    /// Section start in seconds.
    pub start: f64,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Chord length in beats.
    pub chord_beats: u32,
}

impl TempoSection {
    /// Beat length in seconds.
    pub fn beat(&self) -> f64 {
        60.0 / self.bpm
    }
}

/// Volume curves for every layer, as functions of absolute time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerCurves {
    pub pad: Curve,
    pub bass: Curve,
    pub quarter_arp: Curve,
    pub eighth_arp: Curve,
    pub melody: Curve,
}

impl LayerCurves {
    /// Layer curves with their config names.
    pub fn named(&self) -> [(&'static str, &Curve); 5] {
        [
            ("pad", &self.pad),
            ("bass", &self.bass),
            ("quarter_arp", &self.quarter_arp),
            ("eighth_arp", &self.eighth_arp),
            ("melody", &self.melody),
        ]
    }
}

/// Synthesis parameters per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Voices {
    pub pad: PadVoice,
    pub bass: BassVoice,
    pub quarter_arp: ArpVoice,
    pub eighth_arp: ArpVoice,
    pub melody: MelodyVoice,
}

/// Sustained pad chords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PadVoice {
    /// Fixed gain applied to every pad note.
    pub gain: f64,
    /// Layer volume at or below this is silent.
    pub threshold: f64,
    /// Envelope stages; the last stage whose start is <= t is active.
    pub envelopes: Vec<PadEnvelopeStage>,
}

/// Pad envelope times from `start` onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PadEnvelopeStage {
    pub start: f64,
    /// Attack in seconds.
    pub attack: f64,
    /// Release in seconds.
    pub release: f64,
}

/// One bass note per chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BassVoice {
    pub gain: f64,
    pub threshold: f64,
    pub attack: f64,
    pub release: f64,
}

/// Plucked arpeggio stepping through the chord's pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArpVoice {
    /// Step interval in beats (1.0 = quarter notes, 0.5 = eighths).
    pub step_beats: f64,
    /// Note length as a fraction of the step.
    pub note_fraction: f64,
    /// Upper bound on note length in seconds.
    pub max_note: f64,
    /// Attack in seconds.
    pub attack: f64,
    pub threshold: f64,
}

/// High plucked melody, two notes per chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MelodyVoice {
    /// Beats between melody notes.
    pub spacing_beats: f64,
    /// Note length in beats.
    pub note_beats: f64,
    /// Upper bound on note length in seconds.
    pub max_note: f64,
    pub attack: f64,
    pub threshold: f64,
}

/// One feedback comb in the reverb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombTap {
    /// Delay in milliseconds.
    pub delay_ms: f64,
    /// Feedback coefficient, 0 < feedback < 1.
    pub feedback: f64,
}

/// Comb + all-pass reverb settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReverbParams {
    /// Wet/dry mix (0.0-1.0).
    pub wet: f64,
    pub combs: Vec<CombTap>,
    /// All-pass smoothing delay in milliseconds.
    pub allpass_ms: f64,
    /// All-pass feedback coefficient.
    pub allpass_coefficient: f64,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            wet: 0.32,
            combs: vec![
                CombTap {
                    delay_ms: 29.7,
                    feedback: 0.805,
                },
                CombTap {
                    delay_ms: 37.1,
                    feedback: 0.827,
                },
                CombTap {
                    delay_ms: 41.1,
                    feedback: 0.783,
                },
                CombTap {
                    delay_ms: 43.7,
                    feedback: 0.764,
                },
            ],
            allpass_ms: 5.0,
            allpass_coefficient: -0.7,
        }
    }
}

/// Mastering chain settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MasterParams {
    /// Overall gain over absolute time.
    pub gain_curve: Curve,
    /// Peak level after normalization.
    pub ceiling: f64,
    /// Fade-in length in seconds.
    pub fade_in: f64,
    /// Fade-out length in seconds.
    pub fade_out: f64,
}

impl ArcConfig {
    /// Parses a config from JSON. Does not validate.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file. Does not validate.
    pub fn from_path(path: impl AsRef<Path>) -> SpecResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_pretty(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts to a JSON value.
    pub fn to_value(&self) -> SpecResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Validates the config, failing on the collected errors.
    pub fn validate(&self) -> SpecResult<()> {
        let result = validate_config(self);
        if result.is_ok() {
            Ok(())
        } else {
            Err(SpecError::ValidationFailed(result.errors))
        }
    }

    /// Seconds actually rendered: target plus overhang.
    pub fn generation_duration(&self) -> f64 {
        self.target_duration + self.overhang
    }

    /// Track buffer length in samples.
    pub fn generation_samples(&self) -> usize {
        seconds_to_samples(self.generation_duration(), self.sample_rate)
    }

    /// Delivered asset length in samples.
    pub fn target_samples(&self) -> usize {
        seconds_to_samples(self.target_duration, self.sample_rate)
    }

    /// Active tempo section at time `t`.
    ///
    /// Times before the first section fall into the first section.
    pub fn tempo_at(&self, t: f64) -> &TempoSection {
        last_started(&self.tempo, t, |s| s.start).unwrap_or(&FALLBACK_TEMPO)
    }

    /// Beat length in seconds at time `t`.
    pub fn beat_at(&self, t: f64) -> f64 {
        self.tempo_at(t).beat()
    }

    /// Chord length in beats at time `t`.
    pub fn chord_beats_at(&self, t: f64) -> u32 {
        self.tempo_at(t).chord_beats
    }

    /// Active pad envelope stage at time `t`.
    pub fn pad_envelope_at(&self, t: f64) -> &PadEnvelopeStage {
        last_started(&self.voices.pad.envelopes, t, |s| s.start).unwrap_or(&FALLBACK_PAD_ENVELOPE)
    }

    /// Looks up a chord by name.
    pub fn chord(&self, name: &str) -> SpecResult<&Chord> {
        self.chords
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SpecError::UnknownChord {
                name: name.to_string(),
            })
    }

    /// Chord at position `index` of the progression, wrapping around.
    pub fn progression_chord(&self, index: usize) -> SpecResult<&Chord> {
        if self.progression.is_empty() {
            return Err(SpecError::UnknownChord {
                name: String::new(),
            });
        }
        self.chord(&self.progression[index % self.progression.len()])
    }

    /// Melody notes for `chord`, falling back to its top arpeggio note.
    pub fn melody_notes<'a>(&'a self, chord: &'a Chord) -> &'a [Note] {
        match self.melody.get(&chord.name) {
            Some(pair) => pair.as_slice(),
            None => std::slice::from_ref(chord.top_arp_note()),
        }
    }
}

const FALLBACK_TEMPO: TempoSection = TempoSection {
    start: 0.0,
    bpm: 90.0,
    chord_beats: 8,
};

const FALLBACK_PAD_ENVELOPE: PadEnvelopeStage = PadEnvelopeStage {
    start: 0.0,
    attack: 0.5,
    release: 1.0,
};

/// Returns the last item whose start is <= t, or the first item if t precedes all.
fn last_started<T>(items: &[T], t: f64, start: impl Fn(&T) -> f64) -> Option<&T> {
    items
        .iter()
        .rev()
        .find(|item| start(item) <= t)
        .or_else(|| items.first())
}

/// Converts seconds to a sample count, rounding to the nearest sample.
pub fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    let n = (seconds * sample_rate as f64).round();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}
