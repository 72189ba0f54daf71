//! Interactive bottom-sheet positioning engine.
//!
//! A [`SheetEngine`] merges a header drag, a content drag and programmatic
//! snap requests into one committed sheet offset, a content scroll offset and
//! open/close notifications. The host calls [`SheetEngine::advance`] (or
//! [`SheetEngine::on_frame`]) once per frame with the gesture samples it
//! collected; rendering, layout and gesture recognition stay outside.
//!
//! ```
//! use snapsheet::{GestureInput, GestureSample, SheetConfig, SheetEngine};
//!
//! let config = SheetConfig::default()
//!     .with_offsets(&[0.0, 300.0, 600.0])
//!     .with_initial_snap(1);
//! let mut sheet = SheetEngine::new(config)?;
//! assert_eq!(sheet.offset(), 300.0);
//!
//! sheet.advance(16.0, &[GestureInput::Master(GestureSample::began())]);
//! let frame = sheet.advance(16.0, &[GestureInput::Master(GestureSample::active(40.0, 0.0))]);
//! assert_eq!(frame.offset, 340.0);
//! # Ok::<(), snapsheet::SheetError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod overscroll;
pub mod phase;
pub mod snap_points;
pub mod threshold;

pub use config::{SheetConfig, SpringOverrides, DEFAULT_TOSS};
pub use engine::{SheetCallbacks, SheetEngine, SheetFrame};
pub use error::SheetError;
pub use layout::{LayoutHandle, MeasuredLayout};
pub use overscroll::{ContentBounds, SheetBounds};
pub use phase::Phase;
pub use snap_points::{SnapPointSpec, SnapPoints};
pub use threshold::{
    SheetEvent, ThresholdEmitter, ThresholdEvents, ThresholdFlags, DEFAULT_CALLBACK_THRESHOLD,
};

pub use snapsheet_animation::{DecayConfig, SpringConfig};
pub use snapsheet_core::{EventSink, NullSink};
pub use snapsheet_foundation::{GestureInput, GestureSample, GestureState};
