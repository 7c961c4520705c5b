//! Timeline composer.
//!
//! Walks the chord progression from t = 0 until the generation length,
//! sizing each chord by the tempo section it starts in and voicing it with
//! the layer volumes and pad envelope sampled at the chord's midpoint. Each
//! chord yields a list of [`VoiceEvent`]s; [`compose`] renders them into a
//! [`TrackBuffer`].
//!
//! Layers are gated: a layer whose volume at the midpoint is at or below its
//! voice threshold contributes nothing to that chord.

mod snapshot;


pub use snapshot::{snapshot_at, timeline, ArcSnapshot, LayerVolumes};

use arcbed_spec::{ArcConfig, ArpVoice, Chord, Note};
use serde::Serialize;

use crate::envelope::{samples_for, EnvelopeShape};
use crate::error::{AudioError, AudioResult};
use crate::synthesis::{render_tone, Timbre};
use crate::track::TrackBuffer;

/// Arrangement layer a voice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Pad,
    Bass,
    QuarterArp,
    EighthArp,
    Melody,
}

impl Layer {
    /// All layers in mix order.
    pub const ALL: [Layer; 5] = [
        Layer::Pad,
        Layer::Bass,
        Layer::QuarterArp,
        Layer::EighthArp,
        Layer::Melody,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Pad => "pad",
            Layer::Bass => "bass",
            Layer::QuarterArp => "quarter_arp",
            Layer::EighthArp => "eighth_arp",
            Layer::Melody => "melody",
        }
    }
}

/// One scheduled tone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceEvent {
    pub layer: Layer,
    pub timbre: Timbre,
    pub note: Note,
    /// Frequency in Hz.
    pub frequency: f64,
    /// Start time in seconds.
    pub start: f64,
    pub num_samples: usize,
    pub envelope: EnvelopeShape,
    /// Linear gain applied to the enveloped tone.
    pub volume: f64,
}

impl VoiceEvent {
    fn new(
        layer: Layer,
        timbre: Timbre,
        note: Note,
        start: f64,
        num_samples: usize,
        envelope: EnvelopeShape,
        volume: f64,
    ) -> Self {
        Self {
            layer,
            timbre,
            note,
            frequency: note.frequency(),
            start,
            num_samples,
            envelope,
            volume,
        }
    }

    /// Renders the event as gain-scaled samples.
    pub fn render(&self, sample_rate: f64) -> Vec<f64> {
        let mut tone = render_tone(
            self.timbre,
            self.frequency,
            self.num_samples,
            &self.envelope,
            sample_rate,
        );
        for sample in tone.iter_mut() {
            *sample *= self.volume;
        }
        tone
    }
}

/// A chord placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordWindow {
    /// Position in the rendered sequence (not in the progression).
    pub index: usize,
    pub chord: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Arc state at the chord's midpoint.
    pub snapshot: ArcSnapshot,
    /// Events this chord emitted.
    #[serde(skip)]
    pub events: Vec<VoiceEvent>,
}

impl ChordWindow {
    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Number of events per layer, in [`Layer::ALL`] order.
    pub fn layer_counts(&self) -> [usize; 5] {
        Layer::ALL.map(|layer| self.events.iter().filter(|e| e.layer == layer).count())
    }
}

/// The full schedule of a composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionReport {
    pub chords: Vec<ChordWindow>,
    /// Generation length in seconds.
    pub duration: f64,
    pub num_samples: usize,
}

impl CompositionReport {
    /// Every scheduled event in timeline order.
    pub fn events(&self) -> impl Iterator<Item = &VoiceEvent> {
        self.chords.iter().flat_map(|c| c.events.iter())
    }

    pub fn event_count(&self) -> usize {
        self.chords.iter().map(|c| c.events.len()).sum()
    }
}

/// Schedules every chord and voice event without rendering audio.
pub fn plan(config: &ArcConfig) -> AudioResult<CompositionReport> {
    check_timing(config)?;

    let generation = config.generation_duration();
    let mut chords = Vec::new();
    let mut t = 0.0;
    let mut index = 0;

    while t < generation {
        let chord = config.progression_chord(index)?;
        let tempo = config.tempo_at(t);
        let beat = tempo.beat();
        let duration = (beat * tempo.chord_beats as f64).min(generation - t);
        if duration < config.min_chord_duration {
            break;
        }

        let snapshot = snapshot_at(config, t + duration / 2.0);
        let window = Window {
            start: t,
            duration,
            beat,
            generation,
        };
        let events = chord_events(config, chord, &window, &snapshot);

        tracing::debug!(
            index,
            chord = %chord.name,
            start = t,
            duration,
            events = events.len(),
            "scheduled chord"
        );

        chords.push(ChordWindow {
            index,
            chord: chord.name.clone(),
            start: t,
            duration,
            snapshot,
            events,
        });

        t += duration;
        index += 1;
    }

    Ok(CompositionReport {
        chords,
        duration: generation,
        num_samples: config.generation_samples(),
    })
}

/// Schedules the composition and renders it into a track buffer.
pub fn compose(config: &ArcConfig) -> AudioResult<(TrackBuffer, CompositionReport)> {
    let report = plan(config)?;
    let mut track = TrackBuffer::new(report.num_samples, config.sample_rate as f64);
    render_events(&mut track, report.events());

    tracing::info!(
        chords = report.chords.len(),
        events = report.event_count(),
        samples = track.len(),
        "composed track"
    );

    Ok((track, report))
}

/// Mixes rendered events into `track` at their start times.
pub fn render_events<'a>(track: &mut TrackBuffer, events: impl IntoIterator<Item = &'a VoiceEvent>) {
    let sample_rate = track.sample_rate();
    for event in events {
        let samples = event.render(sample_rate);
        track.mix(event.start, &samples);
    }
}

fn check_timing(config: &ArcConfig) -> AudioResult<()> {
    if config.sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate {
            rate: config.sample_rate,
        });
    }
    let generation = config.generation_duration();
    if !generation.is_finite() || generation <= 0.0 {
        return Err(AudioError::InvalidDuration {
            duration: generation,
        });
    }
    if config.min_chord_duration.is_nan() || config.min_chord_duration <= 0.0 {
        return Err(AudioError::invalid_param(
            "min_chord_duration",
            "must be positive",
        ));
    }
    Ok(())
}

/// Timing of the chord being voiced.
struct Window {
    start: f64,
    duration: f64,
    /// Beat length at the chord start.
    beat: f64,
    /// Events starting at or after this time are dropped.
    generation: f64,
}

fn chord_events(
    config: &ArcConfig,
    chord: &Chord,
    window: &Window,
    snapshot: &ArcSnapshot,
) -> Vec<VoiceEvent> {
    let sr = config.sample_rate as f64;
    let voices = &config.voices;
    let volumes = &snapshot.volumes;
    let chord_samples = samples_for(window.duration, sr);
    let mut events = Vec::new();

    if volumes.pad > voices.pad.threshold {
        let envelope = EnvelopeShape::Linear {
            attack: snapshot.pad_attack,
            release: snapshot.pad_release,
        };
        let volume = voices.pad.gain * volumes.pad;
        events.extend(chord.pad.iter().map(|&note| {
            VoiceEvent::new(
                Layer::Pad,
                Timbre::Pad,
                note,
                window.start,
                chord_samples,
                envelope,
                volume,
            )
        }));
    }

    if volumes.bass > voices.bass.threshold {
        events.push(VoiceEvent::new(
            Layer::Bass,
            Timbre::Bass,
            chord.bass,
            window.start,
            chord_samples,
            EnvelopeShape::Linear {
                attack: voices.bass.attack,
                release: voices.bass.release,
            },
            voices.bass.gain * volumes.bass,
        ));
    }

    arp_events(
        &mut events,
        Layer::QuarterArp,
        &voices.quarter_arp,
        volumes.quarter_arp,
        chord,
        window,
        sr,
    );
    arp_events(
        &mut events,
        Layer::EighthArp,
        &voices.eighth_arp,
        volumes.eighth_arp,
        chord,
        window,
        sr,
    );

    let melody = &voices.melody;
    if volumes.melody > melody.threshold {
        let spacing = window.beat * melody.spacing_beats;
        let num_samples =
            samples_for(window.beat * melody.note_beats, sr).min(samples_for(melody.max_note, sr));
        for (i, &note) in config.melody_notes(chord).iter().enumerate() {
            let start = window.start + i as f64 * spacing;
            if start >= window.generation {
                break;
            }
            events.push(VoiceEvent::new(
                Layer::Melody,
                Timbre::Bright,
                note,
                start,
                num_samples,
                EnvelopeShape::Pluck {
                    attack: melody.attack,
                },
                volumes.melody,
            ));
        }
    }

    events
}

fn arp_events(
    events: &mut Vec<VoiceEvent>,
    layer: Layer,
    voice: &ArpVoice,
    volume: f64,
    chord: &Chord,
    window: &Window,
    sr: f64,
) {
    let step = window.beat * voice.step_beats;
    if volume <= voice.threshold || step.is_nan() || step <= 0.0 {
        return;
    }
    let count = (window.duration / step).floor() as usize;
    let num_samples =
        samples_for(step * voice.note_fraction, sr).min(samples_for(voice.max_note, sr));

    for i in 0..count {
        let start = window.start + i as f64 * step;
        if start >= window.generation {
            break;
        }
        events.push(VoiceEvent::new(
            layer,
            Timbre::Bright,
            chord.arp_note(i),
            start,
            num_samples,
            EnvelopeShape::Pluck {
                attack: voice.attack,
            },
            volume,
        ));
    }
}
