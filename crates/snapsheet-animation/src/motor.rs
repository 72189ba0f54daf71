//! State shared by the physics motors.

/// Snapshot of a motor after its latest step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotorState {
    /// Whether the motor reached rest on its latest step.
    pub finished: bool,
    /// Velocity in units per second.
    pub velocity: f32,
    /// Current position in layout units.
    pub position: f32,
    /// Milliseconds simulated since the motor was (re)started.
    pub elapsed: f32,
}

impl MotorState {
    pub fn at(position: f32, velocity: f32) -> Self {
        Self {
            finished: false,
            velocity,
            position,
            elapsed: 0.0,
        }
    }
}

/// A per-tick simulator driving one scalar.
///
/// Motors only move while running. Once a step reports `finished` the motor
/// stops itself and keeps returning its resting state until restarted.
pub trait Motor {
    /// Advance by `dt_millis` and return the new state.
    fn step(&mut self, dt_millis: f32) -> MotorState;

    /// Latest state without advancing.
    fn state(&self) -> MotorState;

    fn is_running(&self) -> bool;

    /// Halt in place. The last position stays readable through [`Motor::state`].
    fn stop(&mut self);
}
