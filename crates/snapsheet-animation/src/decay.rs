//! Decay motor for free-scrolling content.
//!
//! Velocity is multiplied by `deceleration` once per elapsed millisecond,
//! which integrates to a closed form over any tick length:
//!
//! ```text
//! kv = d^dt
//! kx = d (1 - kv) / (1 - d)
//! position += (v / 1000) * kx
//! velocity  = v * kv
//! ```

use crate::motor::{Motor, MotorState};

/// Decay parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayConfig {
    /// Per-millisecond velocity multiplier, strictly between 0 and 1.
    pub deceleration: f32,
    /// Speed (units/s) under which the motor stops.
    pub velocity_threshold: f32,
}

impl DecayConfig {
    pub const DEFAULT_DECELERATION: f32 = 0.998;
    pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 5.0;

    pub fn with_deceleration(mut self, deceleration: f32) -> Self {
        self.deceleration = deceleration;
        self
    }

    /// Whether the parameters describe a motor that eventually stops.
    pub fn is_valid(&self) -> bool {
        self.deceleration > 0.0
            && self.deceleration < 1.0
            && self.velocity_threshold.is_finite()
            && self.velocity_threshold >= 0.0
    }

    /// Where a body released at `position` with `velocity` comes to rest.
    pub fn projected_position(&self, position: f32, velocity: f32) -> f32 {
        let d = self.deceleration;
        position + (velocity / 1000.0) * d / (1.0 - d)
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            deceleration: Self::DEFAULT_DECELERATION,
            velocity_threshold: Self::DEFAULT_VELOCITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecayMotor {
    config: DecayConfig,
    state: MotorState,
    running: bool,
}

impl DecayMotor {
    pub fn new(config: DecayConfig) -> Self {
        Self {
            config,
            state: MotorState::default(),
            running: false,
        }
    }

    pub fn config(&self) -> DecayConfig {
        self.config
    }

    pub fn set_config(&mut self, config: DecayConfig) {
        self.config = config;
    }

    /// Launch from `position` with `velocity` (units/s).
    pub fn start(&mut self, position: f32, velocity: f32) {
        self.state = MotorState::at(position, velocity);
        self.running = true;
    }
}

impl Motor for DecayMotor {
    fn step(&mut self, dt_millis: f32) -> MotorState {
        if !self.running {
            return self.state;
        }

        let dt = dt_millis.max(0.0);
        let d = self.config.deceleration;
        let kv = d.powf(dt);
        let kx = d * (1.0 - kv) / (1.0 - d);
        let v0 = self.state.velocity / 1000.0;

        let position = self.state.position + v0 * kx;
        let velocity = v0 * kv * 1000.0;
        let finished = velocity.abs() < self.config.velocity_threshold;
        if finished {
            self.running = false;
        }

        self.state = MotorState {
            finished,
            velocity,
            position,
            elapsed: self.state.elapsed + dt,
        };
        self.state
    }

    fn state(&self) -> MotorState {
        self.state
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
