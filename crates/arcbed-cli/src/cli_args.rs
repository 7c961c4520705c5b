//! CLI argument definitions for the arcbed command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// arcbed - procedural background music renderer
#[derive(Parser)]
#[command(name = "arcbed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a preset or config file to a WAV asset
    Render {
        /// Built-in preset name (default: intouch)
        #[arg(short, long, conflicts_with = "config")]
        preset: Option<String>,

        /// Path to a JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Directory for the primary asset
        #[arg(short, long, default_value = "audio")]
        out_dir: String,

        /// Directory the asset is copied to for the web preview
        #[arg(long, default_value = "public/audio")]
        preview_dir: String,

        /// Skip the preview copy
        #[arg(long)]
        no_preview: bool,

        /// File stem of the asset
        #[arg(short, long, default_value = "music")]
        name: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a preset or config file without rendering
    Validate {
        /// Built-in preset name (default: intouch)
        #[arg(short, long, conflicts_with = "config")]
        preset: Option<String>,

        /// Path to a JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the tempo and layer arc over time
    Arc {
        /// Built-in preset name (default: intouch)
        #[arg(short, long, conflicts_with = "config")]
        preset: Option<String>,

        /// Path to a JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Seconds between rows
        #[arg(long, default_value_t = 5.0)]
        step: f64,

        /// Also print the chord schedule
        #[arg(long)]
        chords: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List built-in presets
    Presets {
        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Dump a preset as a JSON config
    Config {
        /// Preset to dump
        #[arg(short, long, default_value = "intouch")]
        preset: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}
