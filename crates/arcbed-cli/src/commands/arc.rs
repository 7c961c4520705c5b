//! Arc command implementation
//!
//! Prints the tempo, envelope, and layer-volume arc of a config over time,
//! optionally with the chord schedule the composer would render.

use std::process::ExitCode;

use anyhow::Result;
use arcbed_backend_audio::compose::{plan, timeline, ArcSnapshot, ChordWindow};
use arcbed_backend_audio::AudioError;
use colored::Colorize;

use super::json_output::{audio_error_to_json, print_json, spec_errors_to_json, ArcOutput};
use super::render::print_spec_error;
use super::{config_failure, generation_failure};
use crate::input::{load_config, ConfigSource, LoadResult};

/// Run the arc command
///
/// # Arguments
/// * `step` - Seconds between timeline rows
/// * `chords` - Also print the chord schedule
///
/// # Returns
/// Exit code: 0 on success, 1 if the config is invalid
pub fn run(
    preset: Option<&str>,
    config_path: Option<&str>,
    step: f64,
    chords: bool,
    json_output: bool,
) -> Result<ExitCode> {
    if step.is_nan() || step <= 0.0 {
        anyhow::bail!("step must be positive, got {}", step);
    }

    let loaded = load_config(preset, config_path).and_then(|loaded| {
        loaded.config.validate()?;
        Ok(loaded)
    });
    let LoadResult { config, source, .. } = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            if json_output {
                let source = match config_path {
                    Some(path) => ConfigSource::File(path.into()),
                    None => ConfigSource::Preset(preset.unwrap_or_default().to_string()),
                };
                print_json(&ArcOutput {
                    success: false,
                    source,
                    timeline: Vec::new(),
                    chords: None,
                    errors: spec_errors_to_json(&e),
                })?;
            } else {
                print_spec_error(&e);
            }
            return Ok(config_failure());
        }
    };

    let snapshots = timeline(&config, step);
    let schedule = if chords {
        match plan(&config) {
            Ok(report) => Some(report.chords),
            Err(e) => return report_plan_error(source, &e, json_output),
        }
    } else {
        None
    };

    if json_output {
        print_json(&ArcOutput {
            success: true,
            source,
            timeline: snapshots,
            chords: schedule,
            errors: Vec::new(),
        })?;
    } else {
        println!("{} {}", "Arc:".cyan().bold(), source);
        print_timeline(&snapshots);
        if let Some(windows) = &schedule {
            print_chords(windows);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report_plan_error(source: ConfigSource, err: &AudioError, json_output: bool) -> Result<ExitCode> {
    if json_output {
        print_json(&ArcOutput {
            success: false,
            source,
            timeline: Vec::new(),
            chords: None,
            errors: audio_error_to_json(err),
        })?;
    } else {
        println!("\n{} {}", "FAILED".red().bold(), err);
    }
    Ok(generation_failure())
}

fn print_timeline(snapshots: &[ArcSnapshot]) {
    println!(
        "\n{}",
        format!(
            "{:>7} {:>6} {:>5} {:>11} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            "time", "bpm", "beats", "pad a/r", "pad", "bass", "q-arp", "e-arp", "mel", "gain"
        )
        .dimmed()
    );
    for s in snapshots {
        let v = &s.volumes;
        println!(
            "{:>6.1}s {:>6.1} {:>5} {:>5.2}/{:<5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2}",
            s.time,
            s.bpm,
            s.chord_beats,
            s.pad_attack,
            s.pad_release,
            v.pad,
            v.bass,
            v.quarter_arp,
            v.eighth_arp,
            v.melody,
            s.master_gain
        );
    }
}

fn print_chords(windows: &[ChordWindow]) {
    println!("\n{} {} chords", "Schedule:".cyan().bold(), windows.len());
    for w in windows {
        let [pad, bass, quarter, eighth, melody] = w.layer_counts();
        println!(
            "  {:>3} {:<3} {:>6.2}s +{:<5.2} pad {} bass {} q-arp {:>2} e-arp {:>2} mel {}",
            w.index, w.chord, w.start, w.duration, pad, bass, quarter, eighth, melody
        );
    }
}
