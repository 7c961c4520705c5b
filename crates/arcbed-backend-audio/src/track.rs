//! The mono float track that every voice is mixed into.

use crate::envelope::samples_for;

/// Fixed-length mono buffer with additive, boundary-clipped mixing.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackBuffer {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl TrackBuffer {
    /// Creates a silent buffer of `num_samples` samples.
    pub fn new(num_samples: usize, sample_rate: f64) -> Self {
        Self {
            samples: vec![0.0; num_samples],
            sample_rate,
        }
    }

    /// Sample index of time `t`, truncated.
    pub fn seconds_to_sample(&self, t: f64) -> usize {
        samples_for(t, self.sample_rate)
    }

    /// Adds `segment` into the buffer starting at time `t`.
    ///
    /// Portions that fall past the end of the buffer are dropped. Returns the
    /// number of samples actually mixed.
    pub fn mix(&mut self, t: f64, segment: &[f64]) -> usize {
        let start = self.seconds_to_sample(t);
        self.mix_at(start, segment)
    }

    /// Adds `segment` into the buffer starting at sample `start`.
    pub fn mix_at(&mut self, start: usize, segment: &[f64]) -> usize {
        let end = start.saturating_add(segment.len()).min(self.samples.len());
        if end <= start {
            return 0;
        }
        for (dst, src) in self.samples[start..end].iter_mut().zip(segment) {
            *dst += *src;
        }
        end - start
    }

    /// Buffer length in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The mixed samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consumes the buffer, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}
