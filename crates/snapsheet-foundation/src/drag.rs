//! Drag accumulator: turn per-gesture cumulative translation into an
//! absolute offset that survives gesture restarts.
//!
//! Recognisers reset their translation to zero on every `Began`. The
//! accumulator remembers the previous sample and only ever adds the
//! difference, so the absolute offset carries over from one gesture to the
//! next.
//!
//! ```
//! use snapsheet_foundation::DragAccumulator;
//!
//! let mut drag = DragAccumulator::new();
//! drag.begin();
//! drag.update(30.0);
//! drag.update(50.0);
//! assert_eq!(drag.offset(), 50.0);
//!
//! // New gesture: translation restarts from zero but the offset does not.
//! drag.begin();
//! assert_eq!(drag.update(-20.0), -20.0);
//! assert_eq!(drag.offset(), 30.0);
//! ```

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragAccumulator {
    previous: f32,
    offset: f32,
}

impl DragAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new gesture began; its translation starts from zero.
    pub fn begin(&mut self) {
        self.previous = 0.0;
    }

    /// Feed the gesture's cumulative translation and return the delta since
    /// the previous sample. Non-finite translations are dropped and yield 0.
    pub fn update(&mut self, translation: f32) -> f32 {
        if !translation.is_finite() {
            log::trace!("dropping non-finite drag translation {translation}");
            return 0.0;
        }
        let delta = translation - self.previous;
        self.offset += delta;
        self.previous = translation;
        delta
    }

    /// Absolute offset accumulated over all gestures.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Re-seed the absolute offset, e.g. with the position a stopped motor
    /// left behind, so the next gesture continues from there.
    pub fn rebase(&mut self, offset: f32) {
        self.offset = offset;
    }
}
