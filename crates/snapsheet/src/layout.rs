//! Measured header and content sizes, written by the render layer.

use std::cell::Cell;
use std::rc::Rc;

use crate::overscroll::ContentBounds;

/// Sizes reported by the render layer. Zero means not measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasuredLayout {
    pub header_height: f32,
    /// Height of the content that does not fit the open sheet.
    pub content_height: f32,
}

impl MeasuredLayout {
    pub fn content_bounds(&self) -> ContentBounds {
        ContentBounds::from_layout(self.header_height, self.content_height)
    }
}

/// Shared writer for [`MeasuredLayout`].
///
/// The render layer keeps a clone and calls the setters from its layout
/// callbacks. The engine snapshots the value at the start of every tick, so a
/// write becomes visible on the next tick at the latest.
#[derive(Debug, Clone, Default)]
pub struct LayoutHandle {
    inner: Rc<Cell<MeasuredLayout>>,
}

impl LayoutHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_header_height(&self, height: f32) {
        let mut layout = self.inner.get();
        layout.header_height = sanitize(height);
        self.inner.set(layout);
    }

    pub fn set_content_height(&self, height: f32) {
        let mut layout = self.inner.get();
        layout.content_height = sanitize(height);
        self.inner.set(layout);
    }

    pub fn snapshot(&self) -> MeasuredLayout {
        self.inner.get()
    }
}

// Bogus measurements read as "not measured".
fn sanitize(height: f32) -> f32 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}
