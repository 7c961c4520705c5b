//! Render command implementation
//!
//! Renders a preset or config file and exports the WAV asset.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use arcbed_backend_audio::{generate, AudioError, GenerateResult};
use arcbed_spec::{ArcConfig, SpecError};
use colored::Colorize;

use super::json_output::{
    audio_error_to_json, error_codes, print_json, spec_errors_to_json, JsonError, RenderOutput,
    RenderSummary,
};
use super::{config_failure, generation_failure};
use crate::export::{export, ExportPaths};
use crate::input::{load_config, ConfigSource, LoadResult};

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 if the config is invalid, 2 if rendering or
/// export failed
pub fn run(
    preset: Option<&str>,
    config_path: Option<&str>,
    paths: &ExportPaths,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(preset, config_path, paths)
    } else {
        run_human(preset, config_path, paths)
    }
}

fn run_human(
    preset: Option<&str>,
    config_path: Option<&str>,
    paths: &ExportPaths,
) -> Result<ExitCode> {
    let start = Instant::now();

    let LoadResult { config, source, .. } = match load_config(preset, config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            print_spec_error(&e);
            return Ok(config_failure());
        }
    };

    println!("{} {}", "Rendering:".cyan().bold(), source);
    log_sections(&config);

    let result = match generate(&config) {
        Ok(result) => result,
        Err(AudioError::Spec(e)) => {
            print_spec_error(&e);
            return Ok(config_failure());
        }
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            return Ok(generation_failure());
        }
    };

    let report = match export(&result.wav, paths) {
        Ok(report) => report,
        Err(e) => {
            println!("\n{} {:#}", "FAILED".red().bold(), e);
            return Ok(generation_failure());
        }
    };

    print_summary(&result);
    for file in report.files() {
        println!("  {} {}", "->".green(), file.display());
    }

    println!(
        "\n{} Rendered {:.1}s bed ({}ms)",
        "SUCCESS".green().bold(),
        result.wav.duration_seconds(),
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(
    preset: Option<&str>,
    config_path: Option<&str>,
    paths: &ExportPaths,
) -> Result<ExitCode> {
    let fallback_source = || match config_path {
        Some(path) => ConfigSource::File(path.into()),
        None => ConfigSource::Preset(preset.unwrap_or_default().to_string()),
    };
    let failure = |source: ConfigSource, errors: Vec<JsonError>| RenderOutput {
        success: false,
        source,
        result: None,
        export: None,
        errors,
    };

    let LoadResult { config, source, .. } = match load_config(preset, config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            print_json(&failure(fallback_source(), spec_errors_to_json(&e)))?;
            return Ok(config_failure());
        }
    };

    log_sections(&config);

    let result = match generate(&config) {
        Ok(result) => result,
        Err(e) => {
            let code = match e {
                AudioError::Spec(_) => config_failure(),
                _ => generation_failure(),
            };
            print_json(&failure(source, audio_error_to_json(&e)))?;
            return Ok(code);
        }
    };

    let report = match export(&result.wav, paths) {
        Ok(report) => report,
        Err(e) => {
            let error = JsonError::new(error_codes::EXPORT, format!("{:#}", e));
            print_json(&failure(source, vec![error]))?;
            return Ok(generation_failure());
        }
    };

    print_json(&RenderOutput {
        success: true,
        source,
        result: Some(RenderSummary::from(&result)),
        export: Some(report),
        errors: Vec::new(),
    })?;
    Ok(ExitCode::SUCCESS)
}

/// Logs the tempo map and pad envelope stages so a render's arc is visible.
fn log_sections(config: &ArcConfig) {
    for section in &config.tempo {
        tracing::info!(
            start = section.start,
            bpm = section.bpm,
            chord_beats = section.chord_beats,
            "tempo section"
        );
    }
    for stage in &config.voices.pad.envelopes {
        tracing::info!(
            start = stage.start,
            attack = stage.attack,
            release = stage.release,
            "pad envelope"
        );
    }
}

fn print_summary(result: &GenerateResult) {
    println!("{} {}", "Config hash:".dimmed(), result.config_hash);
    println!("{} {}", "PCM hash:".dimmed(), result.wav.pcm_hash);
    println!(
        "{} {} chords, {} events",
        "Composed:".dimmed(),
        result.chord_count(),
        result.event_count()
    );
    println!(
        "{} {:.3} -> {:.2}",
        "Peak:".dimmed(),
        result.peak_before_normalize(),
        result.peak_before_normalize() * result.mastering.normalize_gain
    );
}

pub(crate) fn print_spec_error(err: &SpecError) {
    match err {
        SpecError::ValidationFailed(errors) => {
            println!("\n{} {} error(s)", "FAILED".red().bold(), errors.len());
            for error in errors {
                println!("  {} {}", "x".red(), error);
            }
        }
        other => println!("\n{} {}", "FAILED".red().bold(), other),
    }
}
