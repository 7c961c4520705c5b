//! CLI command implementations.

pub mod arc;
pub mod config;
pub mod json_output;
pub mod presets;
pub mod render;
pub mod validate;

use std::process::ExitCode;

/// Exit code for config load and validation failures.
pub const EXIT_CONFIG: u8 = 1;

/// Exit code for generation and export failures.
pub const EXIT_GENERATION: u8 = 2;

pub(crate) fn config_failure() -> ExitCode {
    ExitCode::from(EXIT_CONFIG)
}

pub(crate) fn generation_failure() -> ExitCode {
    ExitCode::from(EXIT_GENERATION)
}
