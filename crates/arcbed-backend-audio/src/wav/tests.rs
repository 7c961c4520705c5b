//! Tests for the WAV writer module.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::format::WavFormat;
use super::pcm::{compute_pcm_hash, find_data_chunk};
use super::result::WavResult;
use super::writer::{samples_to_pcm16, write_wav, write_wav_to_vec, WAV_HEADER_LEN};

fn pcm_values(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

// =========================================================================
// Format
// =========================================================================

#[test]
fn test_mono_format_rates() {
    let format = WavFormat::mono(44100);
    assert_eq!(format.channels, 1);
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.block_align(), 2);
    assert_eq!(format.byte_rate(), 88200);
    assert_eq!(WavFormat::mono(48000).byte_rate(), 96000);
}

// =========================================================================
// Quantization
// =========================================================================

#[test]
fn test_pcm16_scaling_and_rounding() {
    let pcm = samples_to_pcm16(&[0.0, 0.5, -0.5, 1.0, -1.0, 0.0001, 0.9999]);
    assert_eq!(
        pcm_values(&pcm),
        vec![0, 16384, -16384, 32767, -32767, 3, 32764]
    );
}

#[test]
fn test_pcm16_within_one_lsb_of_truncation() {
    let samples: Vec<f64> = (0..=2000).map(|i| i as f64 / 1000.0 - 1.0).collect();
    let rounded = pcm_values(&samples_to_pcm16(&samples));
    for (&sample, &value) in samples.iter().zip(&rounded) {
        let truncated = (sample * 32767.0) as i16;
        assert!(
            (i32::from(value) - i32::from(truncated)).abs() <= 1,
            "{} -> {} vs {}",
            sample,
            value,
            truncated
        );
    }
    // 0.6 LSB rounds up where truncation drops it.
    assert_eq!(pcm_values(&samples_to_pcm16(&[0.6 / 32767.0])), vec![1]);
}

#[test]
fn test_pcm16_clips_out_of_range() {
    let pcm = samples_to_pcm16(&[1.5, f64::MAX, -2.0, f64::MIN]);
    assert_eq!(pcm_values(&pcm), vec![32767, 32767, -32767, -32767]);
}

#[test]
fn test_pcm16_empty() {
    assert!(samples_to_pcm16(&[]).is_empty());
}

// =========================================================================
// Header
// =========================================================================

#[test]
fn test_header_layout() {
    let pcm = samples_to_pcm16(&[0.25; 10]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm);

    assert_eq!(wav.len(), WAV_HEADER_LEN + 20);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 36 + 20);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
    assert_eq!(
        u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
        44100
    );
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 20);
}

#[test]
fn test_write_wav_matches_vec() {
    let pcm = samples_to_pcm16(&[0.1, -0.2, 0.3]);
    let format = WavFormat::mono(22050);
    let mut cursor = Cursor::new(Vec::new());
    write_wav(&mut cursor, &format, &pcm).unwrap();
    assert_eq!(cursor.into_inner(), write_wav_to_vec(&format, &pcm));
}

#[test]
fn test_hound_reads_back_samples() {
    let samples = [0.0, 0.5, -0.5, 0.88, -0.88];
    let result = WavResult::from_mono(&samples, 44100);

    let mut reader = hound::WavReader::new(Cursor::new(result.wav_data.clone())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, pcm_values(&samples_to_pcm16(&samples)));
}

// =========================================================================
// PCM chunk and hash
// =========================================================================

#[test]
fn test_find_data_chunk() {
    let pcm = samples_to_pcm16(&[0.5, -0.5]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm);
    assert_eq!(find_data_chunk(&wav), Some(pcm.as_slice()));
}

#[test]
fn test_find_data_chunk_skips_other_chunks() {
    let pcm = samples_to_pcm16(&[0.5]);
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    // Odd-sized chunk with a pad byte.
    wav.extend_from_slice(b"LIST");
    wav.extend_from_slice(&3u32.to_le_bytes());
    wav.extend_from_slice(&[1, 2, 3, 0]);
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&2u32.to_le_bytes());
    wav.extend_from_slice(&pcm);
    assert_eq!(find_data_chunk(&wav), Some(pcm.as_slice()));
}

#[test]
fn test_find_data_chunk_rejects_garbage() {
    assert_eq!(find_data_chunk(b""), None);
    assert_eq!(find_data_chunk(b"RIFF\0\0\0\0JUNK"), None);

    let mut truncated = write_wav_to_vec(&WavFormat::mono(44100), &[0, 0, 0, 0]);
    truncated.truncate(WAV_HEADER_LEN + 2);
    assert_eq!(find_data_chunk(&truncated), None);
}

#[test]
fn test_result_hash_matches_file_hash() {
    let samples: Vec<f64> = (0..441).map(|i| (i as f64 * 0.05).sin() * 0.5).collect();
    let result = WavResult::from_mono(&samples, 44100);
    assert_eq!(result.num_samples, 441);
    assert_eq!(result.pcm_hash.len(), 64);
    assert_eq!(compute_pcm_hash(&result.wav_data), Some(result.pcm_hash.clone()));
    assert!((result.duration_seconds() - 0.01).abs() < 1e-12);
}

#[test]
fn test_identical_samples_identical_bytes() {
    let samples = vec![0.3; 100];
    let a = WavResult::from_mono(&samples, 44100);
    let b = WavResult::from_mono(&samples, 44100);
    assert_eq!(a, b);

    let c = WavResult::from_mono(&[0.31; 100], 44100);
    assert_ne!(a.pcm_hash, c.pcm_hash);
}

#[test]
fn test_write_to_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/music.wav");
    let result = WavResult::from_mono(&[0.1, 0.2], 44100);
    result.write_to(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), result.wav_data);
}
