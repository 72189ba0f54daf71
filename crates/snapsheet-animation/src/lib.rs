//! Physics motors for Snapsheet.
//!
//! Provides a spring motor that pulls a scalar toward a target and a decay
//! motor that lets a scalar coast to a stop. Both advance one tick at a time
//! under the control of the host's frame loop.

pub mod decay;
pub mod motor;
pub mod spring;

pub use decay::{DecayConfig, DecayMotor};
pub use motor::{Motor, MotorState};
pub use spring::{SpringConfig, SpringMotor};
