//! End-to-end tests for the CLI commands.

use std::path::Path;
use std::process::ExitCode;

use arcbed_cli::commands::{self, EXIT_CONFIG};
use arcbed_cli::export::ExportPaths;
use arcbed_spec::{Curve, Preset};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Writes a five-second arc config into `dir` and returns its path.
fn write_short_config(dir: &Path) -> String {
    let mut config = Preset::Intouch.config();
    config.target_duration = 5.0;
    config.overhang = 1.0;
    config.master.fade_in = 1.0;
    config.master.fade_out = 1.0;
    config.master.gain_curve = Curve::new(vec![(0.0, 1.0), (6.0, 1.2)]);

    let path = dir.join("short.json");
    std::fs::write(&path, config.to_json_pretty().unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_render_writes_primary_and_preview() {
    let tmp = TempDir::new().unwrap();
    let config = write_short_config(tmp.path());
    let paths = ExportPaths::new(tmp.path().join("audio"), "music")
        .with_preview(tmp.path().join("public/audio"));

    let code = commands::render::run(None, Some(&config), &paths, true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let primary = std::fs::read(paths.primary()).unwrap();
    let preview = std::fs::read(paths.preview().unwrap()).unwrap();
    assert_eq!(primary, preview);
    assert_eq!(primary.len(), 44 + 2 * 5 * 44100);

    let reader = hound::WavReader::open(paths.primary()).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.duration(), 5 * 44100);
}

#[test]
fn test_render_without_preview_writes_one_file() {
    let tmp = TempDir::new().unwrap();
    let config = write_short_config(tmp.path());
    let paths = ExportPaths::new(tmp.path().join("out"), "bed");

    let code = commands::render::run(None, Some(&config), &paths, false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(tmp.path().join("out/bed.wav").exists());
    assert!(!tmp.path().join("public").exists());
}

#[test]
fn test_render_invalid_config_exits_with_config_code() {
    let tmp = TempDir::new().unwrap();
    let mut config = Preset::Intouch.config();
    config.master.ceiling = 2.0;
    let path = tmp.path().join("bad.json");
    std::fs::write(&path, config.to_json_pretty().unwrap()).unwrap();
    let paths = ExportPaths::new(tmp.path().join("audio"), "music");

    let code = commands::render::run(None, path.to_str(), &paths, true).unwrap();
    assert_eq!(code, ExitCode::from(EXIT_CONFIG));
    assert!(!paths.primary().exists());
}

#[test]
fn test_render_unknown_preset_exits_with_config_code() {
    let tmp = TempDir::new().unwrap();
    let paths = ExportPaths::new(tmp.path(), "music");
    let code = commands::render::run(Some("nope"), None, &paths, false).unwrap();
    assert_eq!(code, ExitCode::from(EXIT_CONFIG));
}

#[test]
fn test_render_bad_stem_exits_with_generation_code() {
    let tmp = TempDir::new().unwrap();
    let config = write_short_config(tmp.path());
    let paths = ExportPaths::new(tmp.path(), "../escape");
    let code = commands::render::run(None, Some(&config), &paths, true).unwrap();
    assert_eq!(code, ExitCode::from(commands::EXIT_GENERATION));
}

#[test]
fn test_validate_presets_and_files() {
    let tmp = TempDir::new().unwrap();
    let config = write_short_config(tmp.path());
    for preset in Preset::ALL {
        let code = commands::validate::run(Some(preset.name()), None, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
    assert_eq!(
        commands::validate::run(None, Some(&config), false).unwrap(),
        ExitCode::SUCCESS
    );
}

#[test]
fn test_validate_rejects_malformed_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let code = commands::validate::run(None, path.to_str(), true).unwrap();
    assert_eq!(code, ExitCode::from(EXIT_CONFIG));
}

#[test]
fn test_arc_rejects_non_positive_step() {
    assert!(commands::arc::run(None, None, 0.0, false, true).is_err());
    assert!(commands::arc::run(None, None, f64::NAN, false, false).is_err());
}

#[test]
fn test_arc_prints_for_default_preset() {
    let code = commands::arc::run(None, None, 10.0, true, true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_config_dump_roundtrips() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("configs/early.json");
    let code = commands::config::run("intouch-early", out.to_str()).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let loaded = arcbed_spec::ArcConfig::from_path(&out).unwrap();
    assert_eq!(loaded, Preset::IntouchEarly.config());
}

#[test]
fn test_config_unknown_preset_is_error() {
    assert!(commands::config::run("nope", None).is_err());
}
