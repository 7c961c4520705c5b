//! arcbed CLI - render procedural music beds
//!
//! This binary renders, validates, and inspects arc configs and writes the
//! resulting WAV assets.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use arcbed_cli::commands;
use arcbed_cli::export::ExportPaths;
use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    // Logs go to stderr so `--json` output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            preset,
            config,
            out_dir,
            preview_dir,
            no_preview,
            name,
            json,
        } => {
            let mut paths = ExportPaths::new(out_dir, name);
            if !no_preview {
                paths = paths.with_preview(preview_dir);
            }
            commands::render::run(preset.as_deref(), config.as_deref(), &paths, json)
        }
        Commands::Validate {
            preset,
            config,
            json,
        } => commands::validate::run(preset.as_deref(), config.as_deref(), json),
        Commands::Arc {
            preset,
            config,
            step,
            chords,
            json,
        } => commands::arc::run(preset.as_deref(), config.as_deref(), step, chords, json),
        Commands::Presets { json } => commands::presets::run(json),
        Commands::Config { preset, output } => commands::config::run(&preset, output.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(commands::EXIT_CONFIG)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render_defaults() {
        let cli = Cli::try_parse_from(["arcbed", "render"]).unwrap();
        match cli.command {
            Commands::Render {
                preset,
                config,
                out_dir,
                preview_dir,
                no_preview,
                name,
                json,
            } => {
                assert!(preset.is_none());
                assert!(config.is_none());
                assert_eq!(out_dir, "audio");
                assert_eq!(preview_dir, "public/audio");
                assert!(!no_preview);
                assert_eq!(name, "music");
                assert!(!json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_render_with_preset() {
        let cli = Cli::try_parse_from([
            "arcbed",
            "render",
            "--preset",
            "intouch-early",
            "--out-dir",
            "build",
            "--no-preview",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                preset,
                out_dir,
                no_preview,
                json,
                ..
            } => {
                assert_eq!(preset.as_deref(), Some("intouch-early"));
                assert_eq!(out_dir, "build");
                assert!(no_preview);
                assert!(json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_rejects_preset_with_config() {
        let result = Cli::try_parse_from([
            "arcbed",
            "validate",
            "--preset",
            "intouch",
            "--config",
            "arc.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_arc_step() {
        let cli = Cli::try_parse_from(["arcbed", "arc", "--step", "2.5", "--chords"]).unwrap();
        match cli.command {
            Commands::Arc { step, chords, .. } => {
                assert_eq!(step, 2.5);
                assert!(chords);
            }
            _ => panic!("expected arc command"),
        }
    }

    #[test]
    fn test_cli_parses_config_defaults() {
        let cli = Cli::try_parse_from(["arcbed", "config"]).unwrap();
        match cli.command {
            Commands::Config { preset, output } => {
                assert_eq!(preset, "intouch");
                assert!(output.is_none());
            }
            _ => panic!("expected config command"),
        }
    }

    #[test]
    fn test_cli_parses_presets_json() {
        let cli = Cli::try_parse_from(["arcbed", "presets", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Presets { json: true }));
    }
}
