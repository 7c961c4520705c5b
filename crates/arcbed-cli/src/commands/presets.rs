//! Presets command implementation

use std::process::ExitCode;

use anyhow::Result;
use arcbed_spec::Preset;
use colored::Colorize;

use super::json_output::{print_json, PresetInfo};

/// Lists the built-in presets.
pub fn infos() -> Vec<PresetInfo> {
    Preset::ALL
        .into_iter()
        .map(|preset| PresetInfo {
            name: preset.name(),
            description: preset.description(),
            default: preset == Preset::default(),
        })
        .collect()
}

/// Run the presets command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let presets = infos();
    if json_output {
        print_json(&presets)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Presets:".cyan().bold());
    for info in &presets {
        let marker = if info.default { "*" } else { " " };
        println!(
            "  {} {:<16} {}",
            marker.green(),
            info.name,
            info.description.dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_default() {
        let presets = infos();
        assert_eq!(presets.len(), Preset::ALL.len());
        let defaults: Vec<_> = presets.iter().filter(|p| p.default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, "intouch");
    }
}
