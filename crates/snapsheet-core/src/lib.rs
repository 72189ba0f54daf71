//! Core runtime plumbing for Snapsheet: frame timing and deferred event delivery.

pub mod dispatch;
pub mod frame_clock;

pub use dispatch::{DeferredQueue, EventSink, NullSink};
pub use frame_clock::{FrameClock, FrameTick, FRAME_NANOS_60HZ, MAX_FRAME_DELTA_MILLIS};
