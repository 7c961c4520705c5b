//! Writing the rendered asset and its preview copy.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arcbed_backend_audio::wav::compute_pcm_hash;
use arcbed_backend_audio::WavResult;
use serde::Serialize;

/// Destination of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub out_dir: PathBuf,
    /// Second directory that receives an identical copy.
    pub preview_dir: Option<PathBuf>,
    /// File name without extension.
    pub stem: String,
}

impl ExportPaths {
    pub fn new(out_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            preview_dir: None,
            stem: stem.into(),
        }
    }

    pub fn with_preview(mut self, preview_dir: impl Into<PathBuf>) -> Self {
        self.preview_dir = Some(preview_dir.into());
        self
    }

    fn file_name(&self) -> String {
        format!("{}.wav", self.stem)
    }

    /// Path of the primary asset.
    pub fn primary(&self) -> PathBuf {
        self.out_dir.join(self.file_name())
    }

    /// Path of the preview copy, if any.
    pub fn preview(&self) -> Option<PathBuf> {
        self.preview_dir.as_ref().map(|dir| dir.join(self.file_name()))
    }
}

/// Files written by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub primary: PathBuf,
    pub preview: Option<PathBuf>,
    pub bytes: usize,
}

impl ExportReport {
    /// Every written path, primary first.
    pub fn files(&self) -> Vec<&Path> {
        std::iter::once(self.primary.as_path())
            .chain(self.preview.as_deref())
            .collect()
    }
}

/// Writes `wav` to the primary path and copies it to the preview directory.
///
/// The preview copy is read back and its PCM hash checked against `wav`.
pub fn export(wav: &WavResult, paths: &ExportPaths) -> Result<ExportReport> {
    check_stem(&paths.stem)?;

    let primary = paths.primary();
    wav.write_to(&primary)
        .with_context(|| format!("Failed to write {}", primary.display()))?;
    tracing::info!(path = %primary.display(), bytes = wav.wav_data.len(), "wrote asset");

    let preview = match paths.preview() {
        Some(preview) => {
            copy_preview(&primary, &preview, &wav.pcm_hash)?;
            Some(preview)
        }
        None => None,
    };

    Ok(ExportReport {
        primary,
        preview,
        bytes: wav.wav_data.len(),
    })
}

fn check_stem(stem: &str) -> Result<()> {
    if stem.is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        bail!("invalid asset name '{}': must be a plain file stem", stem);
    }
    Ok(())
}

fn copy_preview(primary: &Path, preview: &Path, pcm_hash: &str) -> Result<()> {
    if let Some(dir) = preview.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    fs::copy(primary, preview).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            primary.display(),
            preview.display()
        )
    })?;

    let copied = fs::read(preview)
        .with_context(|| format!("Failed to read back {}", preview.display()))?;
    if compute_pcm_hash(&copied).as_deref() != Some(pcm_hash) {
        bail!("preview copy {} does not match the rendered asset", preview.display());
    }

    tracing::info!(path = %preview.display(), "copied preview");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav() -> WavResult {
        WavResult::from_mono(&[0.0, 0.25, -0.25, 0.5], 44100)
    }

    #[test]
    fn test_export_writes_primary_and_preview() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths::new(dir.path().join("audio"), "music")
            .with_preview(dir.path().join("public/audio"));
        let wav = wav();

        let report = export(&wav, &paths).unwrap();
        assert_eq!(report.primary, dir.path().join("audio/music.wav"));
        assert_eq!(report.preview, Some(dir.path().join("public/audio/music.wav")));
        assert_eq!(report.bytes, wav.wav_data.len());
        assert_eq!(report.files().len(), 2);

        assert_eq!(fs::read(&report.primary).unwrap(), wav.wav_data);
        assert_eq!(fs::read(report.preview.unwrap()).unwrap(), wav.wav_data);
    }

    #[test]
    fn test_export_without_preview() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths::new(dir.path(), "bed");
        let report = export(&wav(), &paths).unwrap();
        assert!(report.preview.is_none());
        assert_eq!(report.files(), vec![dir.path().join("bed.wav").as_path()]);
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths::new(dir.path(), "music");
        fs::write(paths.primary(), b"stale").unwrap();
        export(&wav(), &paths).unwrap();
        assert_eq!(fs::read(paths.primary()).unwrap(), wav().wav_data);
    }

    #[test]
    fn test_rejects_path_like_stems() {
        let dir = tempfile::tempdir().unwrap();
        for stem in ["", "a/b", "..", "x\\y"] {
            let paths = ExportPaths::new(dir.path(), stem);
            assert!(export(&wav(), &paths).is_err(), "{:?}", stem);
        }
    }
}
