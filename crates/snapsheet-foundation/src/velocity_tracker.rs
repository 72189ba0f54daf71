//! Impulse-based velocity estimate for a single axis.
//!
//! Used where the recogniser's own velocity cannot be trusted, e.g. when a
//! gesture is cancelled. Positions are recorded against engine time, so the
//! estimate is reproducible under a scripted clock.

use crate::gesture_constants::{ASSUME_STOPPED_MS, VELOCITY_HORIZON_MS};

const HISTORY_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: f32,
    position: f32,
}

/// Ring buffer of recent `(time, position)` pairs.
///
/// The estimate treats each segment between samples as a kick that adds
/// kinetic energy to a unit mass, so short jitters at the end of a drag do
/// not dominate the result the way a last-two-samples difference would.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    head: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            head: 0,
        }
    }

    /// Record an absolute position at `time_ms`.
    pub fn add_position(&mut self, time_ms: f32, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.samples[self.head] = Some(Sample { time_ms, position });
    }

    /// Velocity in units/s, or 0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.head] else {
            return 0.0;
        };

        // Walk backwards from the newest sample, stopping at the horizon or
        // at a gap that means the pointer had come to rest.
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut ages = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut cursor = self.head;
        let mut later_time = newest.time_ms;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (later_time - sample.time_ms).abs();
            if age > VELOCITY_HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            positions[count] = sample.position;
            ages[count] = -age;
            later_time = sample.time_ms;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &ages[..count]) * 1000.0
    }

    /// [`velocity`](Self::velocity) clamped to `±max`. Non-finite results
    /// collapse to 0.
    pub fn velocity_with_max(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if !velocity.is_finite() {
            log::debug!("discarding non-finite velocity {velocity}");
            return 0.0;
        }
        velocity.clamp(-max, max)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.head = 0;
    }
}

/// `positions[0]`/`times[0]` is the newest sample; times are non-positive ages.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let dt = times[i - 1] - times[i];
        if dt == 0.0 {
            continue;
        }
        let segment = (positions[i - 1] - positions[i]) / dt;
        let previous = energy_to_velocity(work);
        work += (segment - previous) * segment.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
