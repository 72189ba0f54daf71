//! Spring motor: a damped harmonic oscillator pulled toward a target.
//!
//! Each [`SpringMotor::step`] solves the oscillator analytically over the
//! tick instead of integrating, so the result does not depend on how the host
//! slices time. Under-damped springs (`ζ < 1`) use the oscillating solution;
//! critically and over-damped springs share the critically damped one.

use crate::motor::{Motor, MotorState};
use snapsheet_core::MAX_FRAME_DELTA_MILLIS;

/// Spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Damping coefficient `c`.
    pub damping: f32,
    /// Mass `m`. Must be positive.
    pub mass: f32,
    /// Stiffness `k`. Zero turns the spring into a free-moving body.
    pub stiffness: f32,
    /// Finish as soon as the position crosses the target.
    pub overshoot_clamping: bool,
    /// Speed (units/s) under which the spring may come to rest.
    pub rest_speed_threshold: f32,
    /// Distance from the target under which the spring may come to rest.
    pub rest_displacement_threshold: f32,
}

impl SpringConfig {
    /// Tuned sheet spring: quick, slightly under-damped, no overshoot clamping.
    pub fn snappy() -> Self {
        Self {
            damping: 30.0,
            mass: 1.0,
            stiffness: 300.0,
            overshoot_clamping: false,
            rest_speed_threshold: 50.0,
            rest_displacement_threshold: 0.99,
        }
    }

    /// Critically damped spring for the given stiffness and mass.
    pub fn critically_damped(stiffness: f32, mass: f32) -> Self {
        Self {
            damping: 2.0 * (stiffness * mass).sqrt(),
            mass,
            stiffness,
            ..Self::snappy()
        }
    }

    /// Damping ratio `ζ = c / (2√(km))`.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

#[derive(Debug, Clone)]
pub struct SpringMotor {
    config: SpringConfig,
    state: MotorState,
    target: f32,
    running: bool,
}

impl SpringMotor {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            state: MotorState::default(),
            target: 0.0,
            running: false,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Start a fresh run from `position` with `velocity` toward `target`.
    pub fn start(&mut self, position: f32, velocity: f32, target: f32) {
        self.state = MotorState::at(position, velocity);
        self.target = target;
        self.running = true;
    }

    /// Point the spring at a new target without losing momentum.
    ///
    /// A running spring keeps its current position and velocity. A stopped or
    /// finished spring restarts from wherever it last was.
    pub fn retarget(&mut self, target: f32) {
        log::trace!(
            "spring retarget {} -> {target} at {:.2}",
            self.target,
            self.state.position
        );
        if !self.running {
            self.state.elapsed = 0.0;
        }
        self.state.finished = false;
        self.target = target;
        self.running = true;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    fn solve(&self, dt_millis: f32) -> (f32, f32) {
        let SpringConfig {
            damping: c,
            mass: m,
            stiffness: k,
            ..
        } = self.config;
        let target = self.target;
        let x0 = target - self.state.position;
        let v0 = -self.state.velocity;
        let t = dt_millis / 1000.0;

        let zeta = c / (2.0 * (k * m).sqrt());
        let omega0 = (k / m).sqrt();

        if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let (sin1, cos1) = (omega1 * t).sin_cos();
            let envelope = (-zeta * omega0 * t).exp();
            let frag = envelope * (sin1 * ((v0 + zeta * omega0 * x0) / omega1) + x0 * cos1);
            let position = target - frag;
            let velocity = zeta * omega0 * frag
                - envelope * (cos1 * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin1);
            (position, velocity)
        } else {
            let envelope = (-omega0 * t).exp();
            let position = target - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        }
    }
}

impl Default for SpringMotor {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

impl Motor for SpringMotor {
    fn step(&mut self, dt_millis: f32) -> MotorState {
        if !self.running {
            return self.state;
        }

        let dt = dt_millis.clamp(0.0, MAX_FRAME_DELTA_MILLIS);
        let previous = self.state.position;
        let (mut position, mut velocity) = self.solve(dt);

        let config = self.config;
        let target = self.target;
        let overshooting = config.overshoot_clamping
            && config.stiffness != 0.0
            && if previous < target {
                position > target
            } else {
                position < target
            };
        let slow_enough = velocity.abs() < config.rest_speed_threshold;
        let close_enough = config.stiffness == 0.0
            || (target - position).abs() < config.rest_displacement_threshold;

        let finished = overshooting || (slow_enough && close_enough);
        if finished {
            if config.stiffness != 0.0 {
                position = target;
                velocity = 0.0;
            }
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

#[cfg(test)]
#[path = "tests/spring_tests.rs"]
mod tests;
