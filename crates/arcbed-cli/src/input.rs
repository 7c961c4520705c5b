//! Resolving the arc config a command operates on.
//!
//! A command takes either a built-in preset name or a path to a JSON config.
//! With neither, the default preset is used.

use std::fmt;
use std::path::{Path, PathBuf};

use arcbed_spec::{ArcConfig, Preset, SpecResult};
use serde::Serialize;

/// Where a config came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ConfigSource {
    /// A built-in preset.
    Preset(String),
    /// A JSON file.
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Preset(name) => write!(f, "preset {}", name),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A loaded, not yet validated config.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub config: ArcConfig,
    pub source: ConfigSource,
    /// BLAKE3 hash of the file content, for file sources.
    pub source_hash: Option<String>,
}

/// Loads a preset by name or a config file by path.
pub fn load_config(preset: Option<&str>, config_path: Option<&str>) -> SpecResult<LoadResult> {
    match (preset, config_path) {
        (_, Some(path)) => load_file(Path::new(path)),
        (Some(name), None) => load_preset(name.parse()?),
        (None, None) => load_preset(Preset::default()),
    }
}

fn load_preset(preset: Preset) -> SpecResult<LoadResult> {
    Ok(LoadResult {
        config: preset.config(),
        source: ConfigSource::Preset(preset.name().to_string()),
        source_hash: None,
    })
}

fn load_file(path: &Path) -> SpecResult<LoadResult> {
    let content = std::fs::read_to_string(path)?;
    let config = ArcConfig::from_json(&content)?;
    Ok(LoadResult {
        config,
        source: ConfigSource::File(path.to_path_buf()),
        source_hash: Some(blake3::hash(content.as_bytes()).to_hex().to_string()),
    })
}
