//! Overdrag resistance and hard limits for the sheet and its content.

/// Commit-time limits applied to the raw sheet position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetBounds {
    /// Most open snap offset.
    pub top: f32,
    /// Most closed snap offset.
    pub outer: f32,
    /// 0 pins the sheet at `top`; larger values let it stretch past.
    pub resistance: f32,
    /// Never let the sheet go below `outer`.
    pub bottom_clamp: bool,
}

impl SheetBounds {
    /// Map a raw sheet position to the committed offset.
    ///
    /// Past the top the sheet follows `(top - √(1 + top - raw)) * resistance`
    /// but never moves further than the raw position itself, so the stretch
    /// always lags the finger.
    pub fn apply(&self, raw: f32) -> f32 {
        if raw > self.top {
            if self.bottom_clamp && raw > self.outer {
                self.outer
            } else {
                raw
            }
        } else {
            let stretched = (self.top - (1.0 + (self.top - raw)).sqrt()) * self.resistance;
            stretched.max(raw)
        }
    }
}

/// Scroll range of the inner content.
///
/// `0` is the content origin; scrolling up goes negative. A lower bound of
/// `None` means the content has not been measured yet and scrolls freely.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentBounds {
    pub min: Option<f32>,
}

impl ContentBounds {
    pub fn from_layout(header_height: f32, content_height: f32) -> Self {
        let min = (content_height > 0.0).then(|| -(content_height + header_height));
        Self { min }
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        let offset = offset.min(0.0);
        match self.min {
            Some(min) => offset.max(min),
            None => offset,
        }
    }

    /// Whether content at `offset` moving with `velocity` is pushing into
    /// one of its ends.
    pub fn pinned(&self, offset: f32, velocity: f32) -> bool {
        (offset >= 0.0 && velocity > 0.0)
            || self.min.is_some_and(|min| offset <= min && velocity < 0.0)
    }
}
