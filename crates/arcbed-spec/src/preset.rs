//! Named arc presets.
//!
//! Every preset shares one arrangement shape: an ambient pad intro, a
//! crossfade into a quarter-note arpeggio, eighth notes taking over, a tempo
//! lift with a growing high melody, and finally the pads returning short and
//! quiet under the arpeggio. Presets differ only in where those marks fall,
//! the tempo of each section, and how steeply the melody and master gain
//! grow.

use std::fmt;
use std::str::FromStr;

use crate::chord::{default_catalog, default_melody, default_progression};
use crate::config::{
    ArcConfig, ArpVoice, BassVoice, LayerCurves, MasterParams, MelodyVoice, PadEnvelopeStage,
    PadVoice, ReverbParams, TempoSection, Voices,
};
use crate::curve::Curve;
use crate::error::SpecError;

/// Crossfade window used when the pads and bass come back in.
const RETURN_FADE: f64 = 0.25;

/// Seconds the eighth-note arpeggio takes to replace the quarter notes.
const EIGHTH_CROSSFADE: f64 = 3.0;

/// Extra seconds the bass lingers past the pad fade-out.
const BASS_LINGER: f64 = 3.0;

/// A built-in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// Final arc: 26/30/35/40/45 s marks, BPM 90/97/106.
    #[default]
    Intouch,
    /// Earlier iteration with a shorter intro: 20/24/30/36/42 s, BPM 88/96/104.
    IntouchEarly,
    /// Flatter revision: 24/28/34/40/48 s, BPM 90/95/100, melody full by 70 s.
    IntouchSteady,
}

impl Preset {
    /// All presets, default first.
    pub const ALL: [Preset; 3] = [Preset::Intouch, Preset::IntouchEarly, Preset::IntouchSteady];

    /// Preset name as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Intouch => "intouch",
            Preset::IntouchEarly => "intouch-early",
            Preset::IntouchSteady => "intouch-steady",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Preset::Intouch => "ambient intro, arpeggio build, energetic finish (default)",
            Preset::IntouchEarly => "shorter intro, earlier build, gentler gain lift",
            Preset::IntouchSteady => "slower tempo lift, melody peaks early, flatter gain",
        }
    }

    /// Looks up a preset by name.
    pub fn from_name(name: &str) -> Result<Self, SpecError> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| SpecError::UnknownPreset {
                name: name.to_string(),
                expected: Self::ALL.map(Preset::name).join(", "),
            })
    }

    /// Builds the full config for this preset.
    pub fn config(self) -> ArcConfig {
        match self {
            Preset::Intouch => build(&ArcShape {
                ab_start: 26.0,
                ab_end: 30.0,
                eighth: 35.0,
                tempo_lift: 40.0,
                pads_back: 45.0,
                bpm: [90.0, 97.0, 106.0],
                melody_peak: (85.0, 0.17),
                gain_marks: [1.35, 1.55],
                pad_return: 0.42,
                pad_return_envelope: (0.18, 0.40),
                wet: 0.32,
            }),
            Preset::IntouchEarly => build(&ArcShape {
                ab_start: 20.0,
                ab_end: 24.0,
                eighth: 30.0,
                tempo_lift: 36.0,
                pads_back: 42.0,
                bpm: [88.0, 96.0, 104.0],
                melody_peak: (85.0, 0.15),
                gain_marks: [1.3, 1.5],
                pad_return: 0.38,
                pad_return_envelope: (0.2, 0.45),
                wet: 0.3,
            }),
            Preset::IntouchSteady => build(&ArcShape {
                ab_start: 24.0,
                ab_end: 28.0,
                eighth: 34.0,
                tempo_lift: 40.0,
                pads_back: 48.0,
                bpm: [90.0, 95.0, 100.0],
                melody_peak: (70.0, 0.17),
                gain_marks: [1.25, 1.45],
                pad_return: 0.42,
                pad_return_envelope: (0.18, 0.40),
                wet: 0.28,
            }),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_name(s)
    }
}

impl Default for ArcConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

/// Timeline marks and levels that distinguish one preset from another.
struct ArcShape {
    /// Pads begin fading, quarter arpeggio begins entering.
    ab_start: f64,
    /// Pads gone, quarter arpeggio fully in, tempo moves to `bpm[1]`.
    ab_end: f64,
    /// Eighth-note arpeggio fades in over the quarter notes.
    eighth: f64,
    /// Tempo moves to `bpm[2]`, melody starts growing.
    tempo_lift: f64,
    /// Pads and bass return with a shorter envelope.
    pads_back: f64,
    bpm: [f64; 3],
    /// Time and level at which the melody stops growing.
    melody_peak: (f64, f64),
    /// Master gain at `tempo_lift` and at the end of the piece.
    gain_marks: [f64; 2],
    pad_return: f64,
    pad_return_envelope: (f64, f64),
    wet: f64,
}

const TARGET_DURATION: f64 = 85.0;

fn build(shape: &ArcShape) -> ArcConfig {
    let back = shape.pads_back;
    let quarter_out = shape.eighth + EIGHTH_CROSSFADE;

    let layers = LayerCurves {
        pad: Curve::new(vec![
            (shape.ab_start, 1.0),
            (shape.ab_end, 0.0),
            (back, 0.0),
            (back + RETURN_FADE, shape.pad_return),
        ]),
        bass: Curve::new(vec![
            (shape.ab_start, 1.0),
            (shape.ab_end + BASS_LINGER, 0.0),
            (back, 0.0),
            (back + RETURN_FADE, shape.pad_return),
        ]),
        quarter_arp: Curve::new(vec![
            (shape.ab_start, 0.0),
            (shape.ab_end, 0.22),
            (shape.eighth, 0.22),
            (quarter_out, 0.0),
        ]),
        eighth_arp: Curve::new(vec![(shape.eighth, 0.0), (quarter_out, 0.24)]),
        melody: Curve::new(vec![(shape.tempo_lift, 0.0), shape.melody_peak]),
    };

    let voices = Voices {
        pad: PadVoice {
            gain: 0.28,
            threshold: 0.01,
            envelopes: vec![
                PadEnvelopeStage {
                    start: 0.0,
                    attack: 0.5,
                    release: 1.0,
                },
                PadEnvelopeStage {
                    start: back,
                    attack: shape.pad_return_envelope.0,
                    release: shape.pad_return_envelope.1,
                },
            ],
        },
        bass: BassVoice {
            gain: 0.14,
            threshold: 0.01,
            attack: 0.06,
            release: 0.5,
        },
        quarter_arp: ArpVoice {
            step_beats: 1.0,
            note_fraction: 0.82,
            max_note: 0.5,
            attack: 0.01,
            threshold: 0.01,
        },
        eighth_arp: ArpVoice {
            step_beats: 0.5,
            note_fraction: 0.75,
            max_note: 0.28,
            attack: 0.008,
            threshold: 0.01,
        },
        melody: MelodyVoice {
            spacing_beats: 2.0,
            note_beats: 1.5,
            max_note: 0.9,
            attack: 0.02,
            threshold: 0.005,
        },
    };

    ArcConfig {
        sample_rate: 44100,
        target_duration: TARGET_DURATION,
        overhang: 3.0,
        min_chord_duration: 0.05,
        chords: default_catalog(),
        progression: default_progression(),
        melody: default_melody(),
        tempo: vec![
            TempoSection {
                start: 0.0,
                bpm: shape.bpm[0],
                chord_beats: 8,
            },
            TempoSection {
                start: shape.ab_end,
                bpm: shape.bpm[1],
                chord_beats: 4,
            },
            TempoSection {
                start: shape.tempo_lift,
                bpm: shape.bpm[2],
                chord_beats: 4,
            },
        ],
        layers,
        voices,
        reverb: ReverbParams {
            wet: shape.wet,
            ..ReverbParams::default()
        },
        master: MasterParams {
            gain_curve: Curve::new(vec![
                (shape.ab_start, 1.0),
                (shape.tempo_lift, shape.gain_marks[0]),
                (TARGET_DURATION, shape.gain_marks[1]),
            ]),
            ceiling: 0.88,
            fade_in: 4.0,
            fade_out: 5.0,
        },
    }
}
