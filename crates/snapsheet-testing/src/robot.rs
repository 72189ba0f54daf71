//! Robot-style driver for sheet tests.
//!
//! The robot owns a [`SheetEngine`], feeds it gesture samples the way a
//! recogniser would (one sample per frame) and records every threshold
//! event.
//!
//! ```
//! use snapsheet::SheetConfig;
//! use snapsheet_testing::SheetRobot;
//!
//! let config = SheetConfig::default()
//!     .with_offsets(&[0.0, 300.0, 600.0])
//!     .with_initial_snap(1);
//! let mut robot = SheetRobot::new(config).unwrap();
//!
//! robot.drag_master(250.0, 0.0);
//! robot.wait_for_idle();
//! assert_eq!(robot.offset(), 600.0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use snapsheet::{Phase, SheetConfig, SheetEngine, SheetError, SheetEvent, SheetFrame};
use snapsheet_foundation::{GestureInput, GestureSample, GestureState};

/// Frame length used unless overridden.
pub const DEFAULT_FRAME_MILLIS: f32 = 16.0;

/// Number of intermediate ACTIVE samples a scripted drag emits.
pub const DRAG_STEPS: usize = 5;

/// Frames `wait_for_idle` runs before giving up.
pub const MAX_IDLE_FRAMES: usize = 2_000;

pub struct SheetRobot {
    engine: SheetEngine,
    events: Rc<RefCell<Vec<SheetEvent>>>,
    frame_millis: f32,
    master_translation: f32,
    inner_translation: f32,
}

impl SheetRobot {
    pub fn new(config: SheetConfig) -> Result<Self, SheetError> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let engine = SheetEngine::new(config)?.with_sink(Rc::clone(&events));
        Ok(Self {
            engine,
            events,
            frame_millis: DEFAULT_FRAME_MILLIS,
            master_translation: 0.0,
            inner_translation: 0.0,
        })
    }

    pub fn with_frame_millis(mut self, frame_millis: f32) -> Self {
        self.frame_millis = frame_millis;
        self
    }

    pub fn engine(&self) -> &SheetEngine {
        &self.engine
    }

    pub fn offset(&self) -> f32 {
        self.engine.offset()
    }

    pub fn content_offset(&self) -> f32 {
        self.engine.content_offset()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Run one frame with `inputs`.
    pub fn frame(&mut self, inputs: &[GestureInput]) -> SheetFrame {
        self.engine.advance(self.frame_millis, inputs)
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame(&[]);
        }
    }

    /// Run frames until the engine is idle. Returns how many were needed.
    ///
    /// Panics if the engine does not settle within [`MAX_IDLE_FRAMES`].
    pub fn wait_for_idle(&mut self) -> usize {
        let mut count = 0;
        while self.engine.phase() != Phase::Idle {
            assert!(
                count < MAX_IDLE_FRAMES,
                "sheet did not settle within {MAX_IDLE_FRAMES} frames: {:?}",
                self.engine
            );
            self.frame(&[]);
            count += 1;
        }
        log::debug!("sheet settled at {} after {count} frames", self.engine.offset());
        count
    }

    /// Press, move by `translation` in [`DRAG_STEPS`] frames and release the
    /// header with `velocity`.
    pub fn drag_master(&mut self, translation: f32, velocity: f32) {
        self.press_master();
        self.move_master_by(translation);
        self.release_master(velocity);
    }

    pub fn press_master(&mut self) {
        self.master_translation = 0.0;
        self.frame(&[GestureInput::Master(GestureSample::began())]);
    }

    /// Continue the header drag by `distance` over [`DRAG_STEPS`] frames.
    pub fn move_master_by(&mut self, distance: f32) {
        let start = self.master_translation;
        for step in 1..=DRAG_STEPS {
            let translation = start + distance * step as f32 / DRAG_STEPS as f32;
            self.move_master_to(translation);
        }
    }

    /// One ACTIVE sample at cumulative `translation`.
    pub fn move_master_to(&mut self, translation: f32) {
        let velocity = (translation - self.master_translation) * 1_000.0 / self.frame_millis;
        self.master_translation = translation;
        self.frame(&[GestureInput::Master(GestureSample::active(
            translation,
            velocity,
        ))]);
    }

    pub fn release_master(&mut self, velocity: f32) -> SheetFrame {
        self.frame(&[GestureInput::Master(GestureSample::end(
            self.master_translation,
            velocity,
        ))])
    }

    pub fn cancel_master(&mut self) -> SheetFrame {
        self.frame(&[GestureInput::Master(GestureSample::cancelled(
            self.master_translation,
        ))])
    }

    /// Content counterpart of [`drag_master`](Self::drag_master).
    pub fn drag_inner(&mut self, translation: f32, velocity: f32) {
        self.press_inner();
        self.move_inner_by(translation);
        self.release_inner(velocity);
    }

    pub fn press_inner(&mut self) {
        self.inner_translation = 0.0;
        self.frame(&[GestureInput::Inner(GestureSample::began())]);
    }

    pub fn move_inner_by(&mut self, distance: f32) {
        let start = self.inner_translation;
        for step in 1..=DRAG_STEPS {
            let translation = start + distance * step as f32 / DRAG_STEPS as f32;
            self.move_inner_to(translation);
        }
    }

    pub fn move_inner_to(&mut self, translation: f32) {
        let velocity = (translation - self.inner_translation) * 1_000.0 / self.frame_millis;
        self.inner_translation = translation;
        self.frame(&[GestureInput::Inner(GestureSample::active(
            translation,
            velocity,
        ))]);
    }

    pub fn release_inner(&mut self, velocity: f32) -> SheetFrame {
        self.frame(&[GestureInput::Inner(GestureSample::end(
            self.inner_translation,
            velocity,
        ))])
    }

    pub fn cancel_inner(&mut self) -> SheetFrame {
        self.frame(&[GestureInput::Inner(GestureSample::cancelled(
            self.inner_translation,
        ))])
    }

    /// Tap down on the content.
    pub fn tap_content(&mut self) -> SheetFrame {
        self.frame(&[GestureInput::ContentTap(GestureState::Began)])
    }

    pub fn snap_to(&mut self, raw_index: usize) -> Result<(), SheetError> {
        self.engine.snap_to(raw_index)
    }

    /// Report measured sizes as the render layer would.
    pub fn set_layout(&mut self, header_height: f32, content_height: f32) {
        let layout = self.engine.layout_handle();
        layout.set_header_height(header_height);
        layout.set_content_height(content_height);
    }

    /// Every event delivered so far.
    pub fn events(&self) -> Vec<SheetEvent> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events.
    pub fn take_events(&mut self) -> Vec<SheetEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}
