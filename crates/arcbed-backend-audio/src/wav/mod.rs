//! Deterministic mono WAV writer.
//!
//! Files are 16-bit PCM with a bare RIFF header: no timestamps, no LIST
//! chunk, nothing that varies between runs. The BLAKE3 hash of the PCM data
//! identifies a render independently of the container.

mod format;
mod pcm;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, find_data_chunk};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_wav, write_wav_to_vec, WAV_HEADER_LEN};
