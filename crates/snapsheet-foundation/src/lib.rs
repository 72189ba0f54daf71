//! Gesture plumbing shared by Snapsheet components.

pub mod drag;
pub mod gesture;
pub mod gesture_constants;
pub mod velocity_tracker;

pub use drag::DragAccumulator;
pub use gesture::{GestureInput, GestureSample, GestureState};
pub use gesture_constants::{ASSUME_STOPPED_MS, MAX_RELEASE_VELOCITY, VELOCITY_HORIZON_MS};
pub use velocity_tracker::VelocityTracker1D;
