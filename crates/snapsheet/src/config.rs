//! Sheet configuration.

use snapsheet_animation::{DecayConfig, SpringConfig};

use crate::error::SheetError;
use crate::snap_points::SnapPointSpec;
use crate::threshold::DEFAULT_CALLBACK_THRESHOLD;

/// How far ahead a release is projected per unit of velocity.
pub const DEFAULT_TOSS: f32 = 20.0;

/// Partial spring tuning layered over [`SpringConfig::snappy`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringOverrides {
    pub damping: Option<f32>,
    pub mass: Option<f32>,
    pub stiffness: Option<f32>,
    pub overshoot_clamping: Option<bool>,
    pub rest_speed_threshold: Option<f32>,
    pub rest_displacement_threshold: Option<f32>,
    pub toss: Option<f32>,
}

impl SpringOverrides {
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = Some(damping);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = Some(clamp);
        self
    }

    pub fn with_rest_thresholds(mut self, speed: f32, displacement: f32) -> Self {
        self.rest_speed_threshold = Some(speed);
        self.rest_displacement_threshold = Some(displacement);
        self
    }

    pub fn with_toss(mut self, toss: f32) -> Self {
        self.toss = Some(toss);
        self
    }

    /// Spring parameters with the overrides applied to `base`.
    pub fn apply(&self, base: SpringConfig) -> SpringConfig {
        SpringConfig {
            damping: self.damping.unwrap_or(base.damping),
            mass: self.mass.unwrap_or(base.mass),
            stiffness: self.stiffness.unwrap_or(base.stiffness),
            overshoot_clamping: self.overshoot_clamping.unwrap_or(base.overshoot_clamping),
            rest_speed_threshold: self.rest_speed_threshold.unwrap_or(base.rest_speed_threshold),
            rest_displacement_threshold: self
                .rest_displacement_threshold
                .unwrap_or(base.rest_displacement_threshold),
        }
    }

    pub fn toss(&self) -> f32 {
        self.toss.unwrap_or(DEFAULT_TOSS)
    }
}

/// Everything a [`SheetEngine`](crate::SheetEngine) is built from.
///
/// ```
/// use snapsheet::{SheetConfig, SnapPointSpec, SpringOverrides};
///
/// let config = SheetConfig::default()
///     .with_snap_points([SnapPointSpec::Percent(90.0), SnapPointSpec::Offset(120.0)])
///     .with_screen_height(800.0)
///     .with_initial_snap(1)
///     .with_spring(SpringOverrides::default().with_toss(10.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub snap_points: Vec<SnapPointSpec>,
    /// Caller index of the snap point the sheet starts on.
    pub initial_snap: usize,
    /// Used to resolve percentage snap points.
    pub screen_height: f32,
    pub enabled_gesture_interaction: bool,
    pub enabled_header_gesture_interaction: bool,
    pub enabled_content_gesture_interaction: bool,
    pub enabled_content_tap_interaction: bool,
    pub enabled_inner_scrolling: bool,
    pub enabled_manual_snapping: bool,
    pub enabled_imperative_snapping: bool,
    pub enabled_bottom_clamp: bool,
    pub overdrag_resistance_factor: f32,
    pub spring: SpringOverrides,
    pub decay: DecayConfig,
    pub callback_threshold: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            snap_points: Vec::new(),
            initial_snap: 0,
            screen_height: 0.0,
            enabled_gesture_interaction: true,
            enabled_header_gesture_interaction: true,
            enabled_content_gesture_interaction: true,
            enabled_content_tap_interaction: true,
            enabled_inner_scrolling: true,
            enabled_manual_snapping: true,
            enabled_imperative_snapping: true,
            enabled_bottom_clamp: false,
            overdrag_resistance_factor: 0.0,
            spring: SpringOverrides::default(),
            decay: DecayConfig::default(),
            callback_threshold: DEFAULT_CALLBACK_THRESHOLD,
        }
    }
}

impl SheetConfig {
    pub fn with_snap_points(mut self, points: impl IntoIterator<Item = SnapPointSpec>) -> Self {
        self.snap_points = points.into_iter().collect();
        self
    }

    /// Snap points given as plain offsets from the bottom of the screen.
    pub fn with_offsets(self, offsets: &[f32]) -> Self {
        self.with_snap_points(offsets.iter().copied().map(SnapPointSpec::Offset))
    }

    pub fn with_initial_snap(mut self, index: usize) -> Self {
        self.initial_snap = index;
        self
    }

    pub fn with_screen_height(mut self, height: f32) -> Self {
        self.screen_height = height;
        self
    }

    /// Master switch for every gesture.
    pub fn with_gesture_interaction(mut self, enabled: bool) -> Self {
        self.enabled_gesture_interaction = enabled;
        self
    }

    pub fn with_header_gesture_interaction(mut self, enabled: bool) -> Self {
        self.enabled_header_gesture_interaction = enabled;
        self
    }

    pub fn with_content_gesture_interaction(mut self, enabled: bool) -> Self {
        self.enabled_content_gesture_interaction = enabled;
        self
    }

    pub fn with_content_tap_interaction(mut self, enabled: bool) -> Self {
        self.enabled_content_tap_interaction = enabled;
        self
    }

    /// When disabled, content drags move the whole sheet like header drags.
    pub fn with_inner_scrolling(mut self, enabled: bool) -> Self {
        self.enabled_inner_scrolling = enabled;
        self
    }

    pub fn with_manual_snapping(mut self, enabled: bool) -> Self {
        self.enabled_manual_snapping = enabled;
        self
    }

    pub fn with_imperative_snapping(mut self, enabled: bool) -> Self {
        self.enabled_imperative_snapping = enabled;
        self
    }

    pub fn with_bottom_clamp(mut self, enabled: bool) -> Self {
        self.enabled_bottom_clamp = enabled;
        self
    }

    pub fn with_overdrag_resistance(mut self, factor: f32) -> Self {
        self.overdrag_resistance_factor = factor;
        self
    }

    pub fn with_spring(mut self, spring: SpringOverrides) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_decay(mut self, decay: DecayConfig) -> Self {
        self.decay = decay;
        self
    }

    /// Fraction of the travel treated as "at an edge". 0 selects
    /// [`DEFAULT_CALLBACK_THRESHOLD`]; values must stay below 0.5.
    pub fn with_callback_threshold(mut self, threshold: f32) -> Self {
        self.callback_threshold = threshold;
        self
    }

    pub fn spring_config(&self) -> SpringConfig {
        self.spring.apply(SpringConfig::snappy())
    }

    pub fn master_gestures_enabled(&self) -> bool {
        self.enabled_gesture_interaction && self.enabled_header_gesture_interaction
    }

    pub fn content_gestures_enabled(&self) -> bool {
        self.enabled_gesture_interaction && self.enabled_content_gesture_interaction
    }

    pub fn content_taps_enabled(&self) -> bool {
        self.content_gestures_enabled() && self.enabled_content_tap_interaction
    }

    pub fn snap_requests_enabled(&self) -> bool {
        self.enabled_manual_snapping && self.enabled_imperative_snapping
    }

    /// Check numeric ranges. Snap point values themselves are checked when
    /// they are resolved.
    pub fn validate(&self) -> Result<(), SheetError> {
        if self.snap_points.is_empty() {
            return Err(SheetError::EmptySnapPoints);
        }
        if self.initial_snap >= self.snap_points.len() {
            return Err(SheetError::InitialSnapOutOfRange {
                index: self.initial_snap,
                len: self.snap_points.len(),
            });
        }
        if !self.screen_height.is_finite() || self.screen_height < 0.0 {
            return Err(invalid("screen_height", "must be finite and non-negative"));
        }
        if !self.overdrag_resistance_factor.is_finite() || self.overdrag_resistance_factor < 0.0 {
            return Err(invalid(
                "overdrag_resistance_factor",
                "must be finite and non-negative",
            ));
        }
        if !(0.0..0.5).contains(&self.callback_threshold) {
            return Err(invalid("callback_threshold", "must be within [0, 0.5)"));
        }

        let spring = self.spring_config();
        if !(spring.mass.is_finite() && spring.mass > 0.0) {
            return Err(invalid("spring.mass", "must be positive"));
        }
        if !(spring.stiffness.is_finite() && spring.stiffness > 0.0) {
            return Err(invalid("spring.stiffness", "must be positive"));
        }
        if !(spring.damping.is_finite() && spring.damping >= 0.0) {
            return Err(invalid("spring.damping", "must be non-negative"));
        }
        if spring.rest_speed_threshold < 0.0 || spring.rest_displacement_threshold < 0.0 {
            return Err(invalid("spring.rest thresholds", "must be non-negative"));
        }
        if !self.spring.toss().is_finite() {
            return Err(invalid("spring.toss", "must be finite"));
        }
        if !self.decay.is_valid() {
            return Err(invalid("decay.deceleration", "must be within (0, 1)"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> SheetError {
    SheetError::InvalidConfig { field, reason }
}
