//! The sheet engine.
//!
//! [`SheetEngine`] owns every piece of mutable sheet state and is advanced
//! once per frame by the host. Each call to [`SheetEngine::advance`] runs the
//! same fixed pipeline:
//!
//! 1. snapshot the measured layout,
//! 2. apply header (master) gesture samples,
//! 3. apply content (inner) gesture samples and taps,
//! 4. step whichever motor is running,
//! 5. clamp the raw sheet position and commit the offset,
//! 6. evaluate threshold crossings against the committed offset,
//! 7. deliver queued events to the sink.
//!
//! Nothing outside this pipeline writes the committed offset, so events
//! always observe the value the render layer will draw.

use log::{debug, error, trace};
use snapsheet_animation::{DecayMotor, Motor, SpringMotor};
use snapsheet_core::{DeferredQueue, EventSink, FrameClock, NullSink, MAX_FRAME_DELTA_MILLIS};
use snapsheet_foundation::{
    DragAccumulator, GestureInput, GestureSample, GestureState, VelocityTracker1D,
    MAX_RELEASE_VELOCITY,
};

use crate::config::SheetConfig;
use crate::error::SheetError;
use crate::layout::{LayoutHandle, MeasuredLayout};
use crate::overscroll::{ContentBounds, SheetBounds};
use crate::phase::Phase;
use crate::snap_points::{SnapPointSpec, SnapPoints};
use crate::threshold::{SheetEvent, ThresholdEmitter, ThresholdEvents, ThresholdFlags};

/// Distance under which the sheet counts as sitting on the top snap point.
const TOP_EPSILON: f32 = 1e-3;

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetFrame {
    /// Committed sheet offset.
    pub offset: f32,
    pub content_offset: f32,
    /// `offset / outer`, 0 when there is nowhere to close to.
    pub progress: f32,
    pub phase: Phase,
    /// Threshold notifications raised by this tick, in firing order.
    pub events: ThresholdEvents,
}

type Callback = Box<dyn FnMut()>;

/// Closure-per-notification sink.
#[derive(Default)]
pub struct SheetCallbacks {
    on_open_start: Option<Callback>,
    on_open_end: Option<Callback>,
    on_close_start: Option<Callback>,
    on_close_end: Option<Callback>,
}

impl SheetCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_open_start = Some(Box::new(f));
        self
    }

    pub fn on_open_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_open_end = Some(Box::new(f));
        self
    }

    pub fn on_close_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close_start = Some(Box::new(f));
        self
    }

    pub fn on_close_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close_end = Some(Box::new(f));
        self
    }
}

impl EventSink<SheetEvent> for SheetCallbacks {
    fn deliver(&mut self, event: SheetEvent) {
        let callback = match event {
            SheetEvent::OpenStart => self.on_open_start.as_mut(),
            SheetEvent::OpenEnd => self.on_open_end.as_mut(),
            SheetEvent::CloseStart => self.on_close_start.as_mut(),
            SheetEvent::CloseEnd => self.on_close_end.as_mut(),
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl std::fmt::Debug for SheetCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetCallbacks")
            .field("on_open_start", &self.on_open_start.is_some())
            .field("on_open_end", &self.on_open_end.is_some())
            .field("on_close_start", &self.on_close_start.is_some())
            .field("on_close_end", &self.on_close_end.is_some())
            .finish()
    }
}

/// Interactive bottom-sheet positioning engine.
///
/// Offsets grow downward from the most open snap point (`0`). The sheet
/// position integrated by drags and springs is kept *raw*; the committed
/// offset is that raw position after overdrag resistance and the optional
/// bottom clamp.
pub struct SheetEngine {
    config: SheetConfig,
    snap_points: SnapPoints,
    toss: f32,
    layout: LayoutHandle,
    content_bounds: ContentBounds,
    phase: Phase,
    raw: f32,
    offset: f32,
    content_offset: f32,
    master_drag: DragAccumulator,
    inner_drag: DragAccumulator,
    tracker: VelocityTracker1D,
    spring: SpringMotor,
    decay: DecayMotor,
    /// Sorted index the spring is heading for.
    spring_target: Option<usize>,
    /// Sorted index requested through `snap_to` during a drag.
    manual_target: Option<usize>,
    thresholds: ThresholdEmitter,
    queue: DeferredQueue<SheetEvent>,
    sink: Box<dyn EventSink<SheetEvent>>,
    clock: FrameClock,
    time_ms: f32,
}

impl SheetEngine {
    /// Build an engine resting on `config.initial_snap`.
    pub fn new(config: SheetConfig) -> Result<Self, SheetError> {
        config.validate()?;
        let snap_points = SnapPoints::resolve(&config.snap_points, config.screen_height)?;
        let initial = snap_points.sorted_index(config.initial_snap).ok_or(
            SheetError::InitialSnapOutOfRange {
                index: config.initial_snap,
                len: snap_points.len(),
            },
        )?;
        let raw = snap_points.offsets()[initial];
        let bounds = sheet_bounds(&config, &snap_points);
        let offset = bounds.apply(raw);
        let thresholds =
            ThresholdEmitter::new(config.callback_threshold, fraction(offset, snap_points.outer()));

        debug!(
            "sheet created with {} snap points {:?}, resting at {offset}",
            snap_points.len(),
            snap_points.offsets()
        );

        Ok(Self {
            toss: config.spring.toss(),
            spring: SpringMotor::new(config.spring_config()),
            decay: DecayMotor::new(config.decay),
            config,
            snap_points,
            layout: LayoutHandle::new(),
            content_bounds: ContentBounds::default(),
            phase: Phase::Idle,
            raw,
            offset,
            content_offset: 0.0,
            master_drag: DragAccumulator::new(),
            inner_drag: DragAccumulator::new(),
            tracker: VelocityTracker1D::new(),
            spring_target: None,
            manual_target: None,
            thresholds,
            queue: DeferredQueue::new(),
            sink: Box::new(NullSink),
            clock: FrameClock::new(),
            time_ms: 0.0,
        })
    }

    /// Deliver threshold notifications to `sink`.
    pub fn with_sink(mut self, sink: impl EventSink<SheetEvent> + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink(&mut self, sink: impl EventSink<SheetEvent> + 'static) {
        self.sink = Box::new(sink);
    }

    /// Share an existing layout handle instead of the engine's own.
    pub fn with_layout(mut self, layout: LayoutHandle) -> Self {
        self.layout = layout;
        self
    }

    /// Handle the render layer writes measured sizes into.
    pub fn layout_handle(&self) -> LayoutHandle {
        self.layout.clone()
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn snap_points(&self) -> &SnapPoints {
        &self.snap_points
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Committed sheet offset: 0 fully open, growing toward closed.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Content scroll position: 0 at the origin, negative when scrolled up.
    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    /// Committed offset as a fraction of the most closed snap point.
    pub fn progress(&self) -> f32 {
        fraction(self.offset, self.snap_points.outer()).unwrap_or(0.0)
    }

    /// Translation to apply to the header.
    pub fn header_position(&self) -> f32 {
        self.offset
    }

    /// How far the content has been scrolled, as a positive distance.
    pub fn content_position(&self) -> f32 {
        -self.content_offset
    }

    /// Top edge of the sheet in screen coordinates.
    pub fn sheet_top(&self) -> f32 {
        self.config.screen_height - self.snap_points.extent() + self.offset
    }

    /// Caller index of the snap point the sheet rests on, if it is at rest.
    pub fn current_snap(&self) -> Option<usize> {
        if self.phase.is_springing() || self.phase.is_dragging() {
            return None;
        }
        self.snap_points
            .index_at(self.raw)
            .and_then(|sorted| self.snap_points.raw_index(sorted))
    }

    pub fn threshold_flags(&self) -> ThresholdFlags {
        self.thresholds.flags()
    }

    /// Advance using a host frame timestamp.
    pub fn on_frame(&mut self, frame_time_nanos: u64, inputs: &[GestureInput]) -> SheetFrame {
        let tick = self.clock.tick(frame_time_nanos);
        self.advance(tick.delta_millis, inputs)
    }

    /// Run one tick of `dt_millis` with the gesture samples received since
    /// the previous tick.
    pub fn advance(&mut self, dt_millis: f32, inputs: &[GestureInput]) -> SheetFrame {
        let dt = if dt_millis.is_finite() {
            dt_millis.clamp(0.0, MAX_FRAME_DELTA_MILLIS)
        } else {
            0.0
        };
        self.time_ms += dt;

        let layout: MeasuredLayout = self.layout.snapshot();
        self.content_bounds = layout.content_bounds();
        self.content_offset = self.content_bounds.clamp(self.content_offset);

        for input in inputs {
            if let GestureInput::Master(sample) = input {
                self.handle_master(*sample);
            }
        }
        for input in inputs {
            match input {
                GestureInput::Inner(sample) => self.handle_inner(*sample),
                GestureInput::ContentTap(state) => self.handle_tap(*state),
                GestureInput::Master(_) => {}
            }
        }

        self.step_motors(dt);

        let committed = sheet_bounds(&self.config, &self.snap_points).apply(self.raw);
        let moved = committed != self.offset;
        self.offset = committed;

        let mut events = ThresholdEvents::new();
        if moved {
            if let Some(fraction) = fraction(self.offset, self.snap_points.outer()) {
                events = self.thresholds.evaluate(fraction);
            }
        }
        for event in &events {
            debug!("sheet {event:?} at offset {:.1}", self.offset);
            self.queue.push(*event);
        }
        self.queue.flush_into(self.sink.as_mut());

        trace!(
            "tick dt={dt:.1}ms phase={:?} raw={:.2} offset={:.2} content={:.2}",
            self.phase,
            self.raw,
            self.offset,
            self.content_offset
        );

        SheetFrame {
            offset: self.offset,
            content_offset: self.content_offset,
            progress: self.progress(),
            phase: self.phase,
            events,
        }
    }

    /// Spring to the snap point with caller index `raw_index`.
    ///
    /// Silently ignored when manual or imperative snapping is disabled.
    /// During a drag the request is remembered and wins at release. A spring
    /// already in flight is retargeted without losing its momentum.
    pub fn snap_to(&mut self, raw_index: usize) -> Result<(), SheetError> {
        if !self.config.snap_requests_enabled() {
            debug!("snap_to({raw_index}) ignored: manual snapping disabled");
            return Ok(());
        }
        let index =
            self.snap_points
                .sorted_index(raw_index)
                .ok_or(SheetError::SnapIndexOutOfRange {
                    index: raw_index,
                    len: self.snap_points.len(),
                })?;

        if self.phase.is_dragging() {
            debug!("snap_to({raw_index}) deferred until release");
            self.manual_target = Some(index);
            return Ok(());
        }

        let target = self.snap_points.offsets()[index];
        debug!("snap_to({raw_index}) -> offset {target}");
        self.decay.stop();
        if self.spring.is_running() {
            self.spring.retarget(target);
        } else {
            self.spring.start(self.raw, 0.0, target);
        }
        self.spring_target = Some(index);
        self.transition(Phase::ManuallySnapping);
        Ok(())
    }

    /// Replace the snap points, keeping the sheet's place.
    pub fn set_snap_points(
        &mut self,
        points: impl IntoIterator<Item = SnapPointSpec>,
    ) -> Result<(), SheetError> {
        let mut config = self.config.clone().with_snap_points(points);
        if !config.snap_points.is_empty() {
            config.initial_snap = config.initial_snap.min(config.snap_points.len() - 1);
        }
        self.reconfigure(config)
    }

    /// Apply a new configuration.
    ///
    /// Snap point changes are absorbed without jumps: a running spring is
    /// retargeted to the same sorted index, a sheet resting on a point moves
    /// to that point's new offset, and a sheet parked in between keeps its
    /// proportional position. A drag in progress keeps following the finger.
    pub fn reconfigure(&mut self, config: SheetConfig) -> Result<(), SheetError> {
        config.validate()?;
        let snap_points = SnapPoints::resolve(&config.snap_points, config.screen_height)?;

        self.spring.set_config(config.spring_config());
        self.decay.set_config(config.decay);
        self.toss = config.spring.toss();
        if snap_points != self.snap_points {
            self.apply_snap_points(snap_points);
        }
        if config.callback_threshold != self.config.callback_threshold {
            self.thresholds = ThresholdEmitter::new(
                config.callback_threshold,
                fraction(self.offset, self.snap_points.outer()),
            );
        }
        self.config = config;
        Ok(())
    }

    fn apply_snap_points(&mut self, snap_points: SnapPoints) {
        let last = snap_points.len() - 1;
        let old_outer = self.snap_points.outer();

        if self.phase.is_springing() {
            if let Some(index) = self.spring_target {
                let index = index.min(last);
                self.spring.retarget(snap_points.offsets()[index]);
                self.spring_target = Some(index);
            }
        } else if !self.phase.is_dragging() {
            if let Some(index) = self.snap_points.index_at(self.raw) {
                self.raw = snap_points.offsets()[index.min(last)];
            } else if old_outer != 0.0 {
                self.raw *= snap_points.outer() / old_outer;
            }
        }
        self.manual_target = self.manual_target.map(|index| index.min(last));

        debug!(
            "snap points changed {:?} -> {:?}",
            self.snap_points.offsets(),
            snap_points.offsets()
        );
        self.snap_points = snap_points;
    }

    fn handle_master(&mut self, sample: GestureSample) {
        if !self.config.master_gestures_enabled() {
            trace!("header gesture ignored: disabled");
            return;
        }
        self.drive_sheet(sample);
    }

    fn handle_inner(&mut self, sample: GestureSample) {
        if !self.config.content_gestures_enabled() {
            trace!("content gesture ignored: disabled");
            return;
        }
        if !self.config.enabled_inner_scrolling {
            self.drive_sheet(sample);
            return;
        }

        match sample.state {
            GestureState::Began => self.begin_inner_drag(),
            GestureState::Active => {
                if !self.inner_dragging() {
                    // Recognisers occasionally skip BEGAN.
                    self.begin_inner_drag();
                    if !self.inner_dragging() {
                        return;
                    }
                }
                let delta = self.inner_drag.update(sample.translation);
                self.tracker
                    .add_position(self.time_ms, self.inner_drag.offset());
                self.split_inner_delta(delta);
            }
            GestureState::End => {
                if !self.inner_dragging() {
                    return;
                }
                let delta = self.inner_drag.update(sample.translation);
                self.split_inner_delta(delta);
                self.release_inner(release_velocity(sample.velocity));
            }
            GestureState::Cancelled => {
                if !self.inner_dragging() {
                    return;
                }
                let velocity = self.tracker.velocity_with_max(MAX_RELEASE_VELOCITY);
                self.release_inner(velocity);
            }
        }
    }

    fn handle_tap(&mut self, state: GestureState) {
        if !self.config.content_taps_enabled() {
            return;
        }
        if state == GestureState::Began && self.phase == Phase::InnerDecaying {
            debug!("content tap stops scrolling at {:.1}", self.content_offset);
            self.decay.stop();
            self.transition(Phase::Idle);
        }
    }

    /// Header drags, and content drags when inner scrolling is off.
    fn drive_sheet(&mut self, sample: GestureSample) {
        match sample.state {
            GestureState::Began => self.begin_master_drag(),
            GestureState::Active => {
                if self.phase != Phase::MasterDragging {
                    debug!("header drag without BEGAN; starting one");
                    self.begin_master_drag();
                }
                self.master_drag.update(sample.translation);
                self.raw = self.master_drag.offset();
                self.tracker.add_position(self.time_ms, self.raw);
            }
            GestureState::End => {
                if self.phase != Phase::MasterDragging {
                    trace!("header END outside a drag ignored");
                    return;
                }
                self.master_drag.update(sample.translation);
                self.raw = self.master_drag.offset();
                self.settle_sheet(release_velocity(sample.velocity), false);
            }
            GestureState::Cancelled => {
                if self.phase != Phase::MasterDragging {
                    return;
                }
                let velocity = self.tracker.velocity_with_max(MAX_RELEASE_VELOCITY);
                self.settle_sheet(velocity, false);
            }
        }
    }

    fn begin_master_drag(&mut self) {
        self.stop_motors();
        self.manual_target = None;
        self.master_drag.rebase(self.raw);
        self.master_drag.begin();
        self.tracker.reset();
        self.tracker.add_position(self.time_ms, self.raw);
        self.transition(Phase::MasterDragging);
    }

    fn begin_inner_drag(&mut self) {
        let next = Phase::InnerDragging { coupled: false };
        if !self.phase.allows(next) {
            debug!("content drag ignored while {:?}", self.phase);
            return;
        }
        self.stop_motors();
        self.inner_drag.rebase(self.content_offset);
        self.inner_drag.begin();
        self.tracker.reset();
        self.tracker.add_position(self.time_ms, self.inner_drag.offset());
        self.transition(next);
    }

    fn inner_dragging(&self) -> bool {
        matches!(self.phase, Phase::InnerDragging { .. })
    }

    /// Share a content drag delta between the sheet and the content.
    ///
    /// Upward movement first raises a partially open sheet to the top and
    /// then scrolls the content. Downward movement first scrolls the content
    /// back to its origin and then pulls the sheet down.
    fn split_inner_delta(&mut self, delta: f32) {
        let top = self.snap_points.top();
        let before = self.raw;
        let mut remaining = delta;

        if remaining < 0.0 {
            let room = (self.raw - top).max(0.0);
            let sheet = remaining.max(-room);
            self.raw += sheet;
            remaining -= sheet;
            self.content_offset = self.content_bounds.clamp(self.content_offset + remaining);
        } else if remaining > 0.0 {
            if self.raw < top {
                let sheet = remaining.min(top - self.raw);
                self.raw += sheet;
                remaining -= sheet;
            }
            let content = remaining.min((-self.content_offset).max(0.0));
            self.content_offset += content;
            self.raw += remaining - content;
        }

        if self.raw != before && self.phase == (Phase::InnerDragging { coupled: false }) {
            self.transition(Phase::InnerDragging { coupled: true });
        }
    }

    fn release_inner(&mut self, velocity: f32) {
        let top = self.snap_points.top();
        if self.manual_target.is_some() || (self.raw - top).abs() > TOP_EPSILON {
            // The sheet was moved by the content; the spring takes over and
            // the content does not coast.
            self.settle_sheet(velocity, true);
            return;
        }
        self.raw = top;

        if velocity.abs() < self.decay.config().velocity_threshold
            || self.content_bounds.pinned(self.content_offset, velocity)
        {
            self.transition(Phase::Idle);
        } else {
            debug!(
                "content released at {:.1} with {velocity:.1}/s",
                self.content_offset
            );
            self.decay.start(self.content_offset, velocity);
            self.transition(Phase::InnerDecaying);
        }
    }

    /// Release the sheet onto the pending manual target or the projected
    /// snap point.
    fn settle_sheet(&mut self, velocity: f32, handoff: bool) {
        let (index, next) = match self.manual_target.take() {
            Some(index) => (index, Phase::ManuallySnapping),
            None => (
                self.snap_points
                    .resolve_destination(self.raw, velocity, self.toss),
                Phase::MasterSpringing { handoff },
            ),
        };
        let target = self.snap_points.offsets()[index];
        debug!(
            "sheet released at {:.1} with {velocity:.1}/s -> offset {target}",
            self.raw
        );
        self.decay.stop();
        self.spring.start(self.raw, velocity, target);
        self.spring_target = Some(index);
        self.transition(next);
    }

    fn stop_motors(&mut self) {
        self.spring.stop();
        self.decay.stop();
        self.spring_target = None;
    }

    fn step_motors(&mut self, dt: f32) {
        if self.phase.is_springing() {
            let state = self.spring.step(dt);
            self.raw = state.position;
            if state.finished {
                self.spring_target = None;
                self.transition(Phase::Idle);
            }
        } else if self.phase == Phase::InnerDecaying {
            let state = self.decay.step(dt);
            let clamped = self.content_bounds.clamp(state.position);
            self.content_offset = clamped;
            if clamped != state.position {
                debug!("content scroll hit its bound at {clamped:.1}");
                self.decay.stop();
                self.transition(Phase::Idle);
            } else if state.finished {
                self.transition(Phase::Idle);
            }
        }
    }

    fn transition(&mut self, next: Phase) {
        let allowed = self.phase.allows(next);
        debug_assert!(
            allowed,
            "illegal sheet transition {:?} -> {next:?}",
            self.phase
        );
        if !allowed {
            error!("illegal sheet transition {:?} -> {next:?}", self.phase);
        }
        if self.phase != next {
            debug!("sheet {:?} -> {next:?}", self.phase);
        }
        self.phase = next;
    }
}

impl std::fmt::Debug for SheetEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetEngine")
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .field("content_offset", &self.content_offset)
            .field("snap_points", &self.snap_points.offsets())
            .finish_non_exhaustive()
    }
}

fn sheet_bounds(config: &SheetConfig, snap_points: &SnapPoints) -> SheetBounds {
    SheetBounds {
        top: snap_points.top(),
        outer: snap_points.outer(),
        resistance: config.overdrag_resistance_factor,
        bottom_clamp: config.enabled_bottom_clamp,
    }
}

fn fraction(offset: f32, outer: f32) -> Option<f32> {
    (outer != 0.0).then(|| offset / outer)
}

fn release_velocity(velocity: f32) -> f32 {
    if velocity.is_finite() {
        velocity.clamp(-MAX_RELEASE_VELOCITY, MAX_RELEASE_VELOCITY)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
