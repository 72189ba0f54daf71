//! Frame clock that turns host frame timestamps into tick deltas.
//!
//! Hosts call [`FrameClock::tick`] once per rendered frame with a monotonic
//! timestamp in nanoseconds. The clock remembers the previous frame and hands
//! back the elapsed time in milliseconds, capped so that a stalled frame (app
//! backgrounded, debugger pause) does not make the physics jump.

/// Largest delta handed to the motors in a single tick, in milliseconds.
pub const MAX_FRAME_DELTA_MILLIS: f32 = 64.0;

/// Nominal frame duration used by synthetic hosts (~60 FPS).
pub const FRAME_NANOS_60HZ: u64 = 16_666_667;

/// One tick of the frame clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Timestamp of the frame that produced this tick.
    pub frame_time_nanos: u64,
    /// Time since the previous frame in milliseconds, capped at the clock's maximum.
    pub delta_millis: f32,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame_nanos: Option<u64>,
    max_delta_millis: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame_nanos: None,
            max_delta_millis: MAX_FRAME_DELTA_MILLIS,
        }
    }

    /// Override the delta cap. Non-positive values fall back to the default.
    pub fn with_max_delta_millis(mut self, max_delta_millis: f32) -> Self {
        self.max_delta_millis = if max_delta_millis > 0.0 {
            max_delta_millis
        } else {
            MAX_FRAME_DELTA_MILLIS
        };
        self
    }

    /// Advance the clock to `frame_time_nanos`.
    ///
    /// The first tick after construction or [`reset`](Self::reset) reports a
    /// zero delta. Timestamps that go backwards are treated as a zero delta
    /// and become the new reference.
    pub fn tick(&mut self, frame_time_nanos: u64) -> FrameTick {
        let delta_nanos = match self.last_frame_nanos {
            Some(last) => frame_time_nanos.saturating_sub(last),
            None => 0,
        };
        if let Some(last) = self.last_frame_nanos {
            if frame_time_nanos < last {
                log::trace!("frame time went backwards: {frame_time_nanos} < {last}");
            }
        }
        self.last_frame_nanos = Some(frame_time_nanos);

        let delta_millis = (delta_nanos as f64 / 1_000_000.0) as f32;
        FrameTick {
            frame_time_nanos,
            delta_millis: delta_millis.min(self.max_delta_millis),
        }
    }

    /// Timestamp of the last frame seen, if any.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.last_frame_nanos
    }

    /// Forget the previous frame so the next tick starts from zero.
    pub fn reset(&mut self) {
        self.last_frame_nanos = None;
    }
}
