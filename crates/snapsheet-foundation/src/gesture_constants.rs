//! Shared gesture constants.
//!
//! Values are in layout units and milliseconds.

/// Largest release velocity (units/s) the engine accepts from a recogniser
/// or from its own tracker. Faster samples are clamped.
pub const MAX_RELEASE_VELOCITY: f32 = 8_000.0;

/// Only samples this recent take part in a velocity estimate.
pub const VELOCITY_HORIZON_MS: f32 = 100.0;

/// A gap this long between two samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: f32 = 40.0;
