//! Config command implementation
//!
//! Dumps a preset as a JSON config file, as a starting point for edits.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use arcbed_spec::Preset;
use colored::Colorize;

/// Run the config command
///
/// # Arguments
/// * `preset` - Preset name to dump
/// * `output` - File to write; stdout when `None`
pub fn run(preset: &str, output: Option<&str>) -> Result<ExitCode> {
    let preset: Preset = preset.parse()?;
    let json = preset.config().to_json_pretty()?;

    match output {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Wrote preset {} to {}",
                "SUCCESS".green().bold(),
                preset,
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}
