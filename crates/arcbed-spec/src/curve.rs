//! Piecewise-linear automation curves over absolute time.

use serde::{Deserialize, Serialize};

/// A `(time_seconds, value)` breakpoint.
pub type Breakpoint = (f64, f64);

/// Piecewise-linear curve defined by breakpoints.
///
/// Before the first breakpoint the curve holds the first value, after the
/// last it holds the last value. Between breakpoints it interpolates
/// linearly. A valid curve has strictly increasing breakpoint times, so it
/// is continuous everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    points: Vec<Breakpoint>,
}

impl Curve {
    /// Creates a curve from breakpoints.
    pub fn new(points: Vec<Breakpoint>) -> Self {
        Self { points }
    }

    /// A curve that is `value` everywhere.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![(0.0, value)])
    }

    /// Breakpoints in order.
    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Evaluates the curve at time `t`.
    ///
    /// An empty curve evaluates to 0.0.
    pub fn value_at(&self, t: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        // First breakpoint strictly after t; t > first.0 so idx >= 1.
        let idx = self.points.partition_point(|&(pt, _)| pt <= t);
        let (t0, v0) = self.points[idx - 1];
        let (t1, v1) = self.points[idx];
        lerp(v0, v1, t0, t1, t)
    }

    /// True if no segment of the curve decreases.
    pub fn is_non_decreasing(&self) -> bool {
        self.points.windows(2).all(|w| w[1].1 >= w[0].1)
    }
}

/// Interpolates from `v0` to `v1` as `t` goes from `t0` to `t1`, clamped to the segment.
pub fn lerp(v0: f64, v1: f64, t0: f64, t1: f64, t: f64) -> f64 {
    if t1 <= t0 {
        return if t < t1 { v0 } else { v1 };
    }
    v0 + (v1 - v0) * ((t - t0) / (t1 - t0)).clamp(0.0, 1.0)
}
