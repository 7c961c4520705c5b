//! Point-in-time view of the arc.

use arcbed_spec::{ArcConfig, LayerCurves};
use serde::Serialize;

/// Volume of every layer at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerVolumes {
    pub pad: f64,
    pub bass: f64,
    pub quarter_arp: f64,
    pub eighth_arp: f64,
    pub melody: f64,
}

impl LayerVolumes {
    /// Evaluates every layer curve at `t`.
    pub fn at(layers: &LayerCurves, t: f64) -> Self {
        Self {
            pad: layers.pad.value_at(t),
            bass: layers.bass.value_at(t),
            quarter_arp: layers.quarter_arp.value_at(t),
            eighth_arp: layers.eighth_arp.value_at(t),
            melody: layers.melody.value_at(t),
        }
    }
}

/// Tempo, envelope, and layer state at time `t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSnapshot {
    pub time: f64,
    pub bpm: f64,
    /// Beat length in seconds.
    pub beat: f64,
    pub chord_beats: u32,
    pub pad_attack: f64,
    pub pad_release: f64,
    pub volumes: LayerVolumes,
    /// Master gain applied at this time during mastering.
    pub master_gain: f64,
}

/// Samples the arc at absolute time `t`.
pub fn snapshot_at(config: &ArcConfig, t: f64) -> ArcSnapshot {
    let tempo = config.tempo_at(t);
    let pad_env = config.pad_envelope_at(t);
    ArcSnapshot {
        time: t,
        bpm: tempo.bpm,
        beat: tempo.beat(),
        chord_beats: tempo.chord_beats,
        pad_attack: pad_env.attack,
        pad_release: pad_env.release,
        volumes: LayerVolumes::at(&config.layers, t),
        master_gain: config.master.gain_curve.value_at(t),
    }
}

/// Snapshots every `step` seconds from 0 through the generation length.
pub fn timeline(config: &ArcConfig, step: f64) -> Vec<ArcSnapshot> {
    if step.is_nan() || step <= 0.0 {
        return Vec::new();
    }
    let end = config.generation_duration();
    let count = (end / step).floor() as usize;
    (0..=count)
        .map(|i| snapshot_at(config, i as f64 * step))
        .collect()
}
