//! Validate command implementation
//!
//! Checks a preset or config file without rendering it.

use std::process::ExitCode;

use anyhow::Result;
use arcbed_spec::canonical_config_hash;
use colored::Colorize;

use super::config_failure;
use super::json_output::{print_json, spec_errors_to_json, ValidateOutput};
use super::render::print_spec_error;
use crate::input::{load_config, ConfigSource, LoadResult};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(preset: Option<&str>, config_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(preset, config_path)
    } else {
        run_human(preset, config_path)
    }
}

fn run_human(preset: Option<&str>, config_path: Option<&str>) -> Result<ExitCode> {
    let LoadResult {
        config,
        source,
        source_hash,
    } = match load_config(preset, config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            print_spec_error(&e);
            return Ok(config_failure());
        }
    };

    println!("{} {}", "Validating:".cyan().bold(), source);
    if let Some(hash) = &source_hash {
        println!("{} {}", "Source hash:".dimmed(), &hash[..16]);
    }

    if let Err(e) = config.validate() {
        print_spec_error(&e);
        return Ok(config_failure());
    }

    let config_hash = canonical_config_hash(&config)?;
    println!("{} {}", "Config hash:".dimmed(), config_hash);
    println!(
        "{} {} chords, {:.1}s target",
        "Arc:".dimmed(),
        config.progression.len(),
        config.target_duration
    );
    println!("\n{} Config is valid", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

fn run_json(preset: Option<&str>, config_path: Option<&str>) -> Result<ExitCode> {
    let loaded = load_config(preset, config_path);
    let (source, outcome) = match loaded {
        Ok(LoadResult { config, source, .. }) => {
            let outcome = config
                .validate()
                .and_then(|()| canonical_config_hash(&config));
            (source, outcome)
        }
        Err(e) => {
            let source = match config_path {
                Some(path) => ConfigSource::File(path.into()),
                None => ConfigSource::Preset(preset.unwrap_or_default().to_string()),
            };
            (source, Err(e))
        }
    };

    let (output, code) = match outcome {
        Ok(hash) => (
            ValidateOutput {
                success: true,
                source,
                config_hash: Some(hash),
                errors: Vec::new(),
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            ValidateOutput {
                success: false,
                source,
                config_hash: None,
                errors: spec_errors_to_json(&e),
            },
            config_failure(),
        ),
    };
    print_json(&output)?;
    Ok(code)
}
