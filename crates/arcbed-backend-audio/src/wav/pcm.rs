//! Locating and hashing the PCM payload of a WAV file.

/// Returns the `data` chunk payload of a RIFF/WAVE buffer.
pub fn find_data_chunk(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while let Some(header) = wav_data.get(pos..pos + 8) {
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        let body = pos + 8;
        if &header[0..4] == b"data" {
            return wav_data.get(body..body.checked_add(size)?);
        }
        // Chunks are padded to an even length.
        pos = body.checked_add(size + size % 2)?;
    }

    None
}

/// BLAKE3 hash of a WAV file's PCM payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    find_data_chunk(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
