//! Gesture phases and samples as delivered by the host's recognisers.

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureState {
    Began,
    Active,
    End,
    Cancelled,
}

impl GestureState {
    /// `End` or `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, GestureState::End | GestureState::Cancelled)
    }
}

/// One event from a drag recogniser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Cumulative displacement since the gesture began. Positive is downward.
    pub translation: f32,
    /// Instantaneous velocity in units per second.
    pub velocity: f32,
    pub state: GestureState,
}

impl GestureSample {
    pub fn new(state: GestureState, translation: f32, velocity: f32) -> Self {
        Self {
            translation,
            velocity,
            state,
        }
    }

    pub fn began() -> Self {
        Self::new(GestureState::Began, 0.0, 0.0)
    }

    pub fn active(translation: f32, velocity: f32) -> Self {
        Self::new(GestureState::Active, translation, velocity)
    }

    pub fn end(translation: f32, velocity: f32) -> Self {
        Self::new(GestureState::End, translation, velocity)
    }

    /// Cancellation carries no trustworthy velocity.
    pub fn cancelled(translation: f32) -> Self {
        Self::new(GestureState::Cancelled, translation, 0.0)
    }
}

/// Routed gesture event.
///
/// The master stream comes from the header/handle, the inner stream from the
/// scrollable content area. Taps on the content only report their phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    Master(GestureSample),
    Inner(GestureSample),
    ContentTap(GestureState),
}

impl GestureInput {
    pub fn is_master(&self) -> bool {
        matches!(self, GestureInput::Master(_))
    }
}
