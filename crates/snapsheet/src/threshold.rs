//! Open/close lifecycle notifications.
//!
//! The committed offset is observed as a fraction of the most closed snap
//! point: `0` is fully open, `1` fully closed. Four one-shot flags make each
//! notification fire once per crossing. Crossing an edge re-arms the opposite
//! notification.

use smallvec::SmallVec;

/// Default distance from either end at which notifications fire.
pub const DEFAULT_CALLBACK_THRESHOLD: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetEvent {
    /// Left the closed end toward open.
    OpenStart,
    /// Reached the open end.
    OpenEnd,
    /// Left the open end toward closed.
    CloseStart,
    /// Reached the closed end.
    CloseEnd,
}

/// Which notifications have fired since they were last re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdFlags {
    pub open_started: bool,
    pub open_ended: bool,
    pub close_started: bool,
    pub close_ended: bool,
}

impl Default for ThresholdFlags {
    fn default() -> Self {
        Self {
            open_started: false,
            open_ended: false,
            close_started: true,
            close_ended: false,
        }
    }
}

pub type ThresholdEvents = SmallVec<[SheetEvent; 4]>;

#[derive(Debug, Clone)]
pub struct ThresholdEmitter {
    threshold: f32,
    flags: ThresholdFlags,
}

impl ThresholdEmitter {
    /// Emitter primed for a sheet resting at `initial_fraction`.
    ///
    /// Priming runs the crossing rules once and discards the events, so a
    /// sheet that starts open does not announce that it opened.
    ///
    /// A threshold of 0 (or below) means "unset" and selects
    /// [`DEFAULT_CALLBACK_THRESHOLD`]; at 0 the open and close edges would
    /// coincide.
    pub fn new(threshold: f32, initial_fraction: Option<f32>) -> Self {
        let threshold = if threshold > 0.0 {
            threshold
        } else {
            DEFAULT_CALLBACK_THRESHOLD
        };
        let mut emitter = Self {
            threshold,
            flags: ThresholdFlags::default(),
        };
        if let Some(fraction) = initial_fraction {
            emitter.evaluate(fraction);
        }
        emitter
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn flags(&self) -> ThresholdFlags {
        self.flags
    }

    /// Apply the crossing rules to `fraction` and return what fired, in order.
    pub fn evaluate(&mut self, fraction: f32) -> ThresholdEvents {
        let t = self.threshold;
        let flags = &mut self.flags;
        let mut events = ThresholdEvents::new();
        if !fraction.is_finite() {
            return events;
        }

        if fraction <= 1.0 - t && !flags.open_started {
            flags.open_started = true;
            flags.close_ended = false;
            events.push(SheetEvent::OpenStart);
        }
        if fraction <= t && !flags.open_ended {
            flags.open_ended = true;
            flags.close_started = false;
            events.push(SheetEvent::OpenEnd);
        }
        if fraction >= t && !flags.close_started {
            flags.close_started = true;
            flags.open_ended = false;
            events.push(SheetEvent::CloseStart);
        }
        if fraction >= 1.0 - t && !flags.close_ended {
            flags.close_ended = true;
            flags.open_started = false;
            flags.open_ended = false;
            events.push(SheetEvent::CloseEnd);
        }
        events
    }
}
