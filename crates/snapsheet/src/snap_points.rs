//! Snap point resolution.
//!
//! Callers list snap points as distances from the bottom of the screen in any
//! order. The engine works with *offsets* measured downward from the most
//! open point: the largest raw value becomes offset `0` and every other point
//! becomes `max - value`. An index map translates the caller's indices into
//! the sorted order.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::SheetError;

type Points<T> = SmallVec<[T; 4]>;

/// A snap point as the caller writes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPointSpec {
    /// Layout units from the bottom of the screen.
    Offset(f32),
    /// Percentage of the screen height, from the bottom.
    Percent(f32),
}

impl SnapPointSpec {
    /// Distance from the bottom of the screen in layout units.
    pub fn resolve(self, screen_height: f32) -> Result<f32, SheetError> {
        let value = match self {
            SnapPointSpec::Offset(value) => value,
            SnapPointSpec::Percent(percent) => {
                if !(screen_height.is_finite() && screen_height > 0.0) {
                    return Err(SheetError::InvalidSnapPoint {
                        value: self.to_string(),
                    });
                }
                percent * screen_height / 100.0
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SheetError::InvalidSnapPoint {
                value: self.to_string(),
            })
        }
    }
}

impl From<f32> for SnapPointSpec {
    fn from(value: f32) -> Self {
        SnapPointSpec::Offset(value)
    }
}

impl fmt::Display for SnapPointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapPointSpec::Offset(value) => write!(f, "{value}"),
            SnapPointSpec::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}

impl FromStr for SnapPointSpec {
    type Err = SheetError;

    /// `"120"` is an offset, `"40%"` a percentage of the screen height.
    /// Anything else is rejected.
    ///
    /// Bare numeric strings are not percentages here: hosts porting
    /// configurations where every string meant a share of the screen must
    /// append `%`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SheetError::InvalidSnapPoint {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let spec = match trimmed.strip_suffix('%') {
            Some(percent) => SnapPointSpec::Percent(percent.trim().parse().map_err(|_| invalid())?),
            None => SnapPointSpec::Offset(trimmed.parse().map_err(|_| invalid())?),
        };
        match spec {
            SnapPointSpec::Offset(v) | SnapPointSpec::Percent(v) if v.is_finite() => Ok(spec),
            _ => Err(invalid()),
        }
    }
}

/// Resolved, normalised snap points.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    offsets: Points<f32>,
    midpoints: Points<f32>,
    /// Caller index -> sorted index.
    index_map: Points<usize>,
    extent: f32,
}

impl SnapPoints {
    pub fn resolve(specs: &[SnapPointSpec], screen_height: f32) -> Result<Self, SheetError> {
        if specs.is_empty() {
            return Err(SheetError::EmptySnapPoints);
        }

        let mut raw: Points<(f32, usize)> = Points::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            raw.push((spec.resolve(screen_height)?, index));
        }
        // Stable sort keeps caller order for equal values.
        raw.sort_by(|(a, _), (b, _)| b.total_cmp(a));

        let extent = raw[0].0;
        let offsets: Points<f32> = raw.iter().map(|(value, _)| extent - value).collect();
        let midpoints = offsets
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect();
        let mut index_map: Points<usize> = smallvec::smallvec![0; specs.len()];
        for (sorted, (_, caller)) in raw.iter().enumerate() {
            index_map[*caller] = sorted;
        }

        Ok(Self {
            offsets,
            midpoints,
            index_map,
            extent,
        })
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Sorted index for a caller-supplied index.
    pub fn sorted_index(&self, raw_index: usize) -> Option<usize> {
        self.index_map.get(raw_index).copied()
    }

    /// Caller index for a sorted index.
    pub fn raw_index(&self, sorted_index: usize) -> Option<usize> {
        self.index_map.iter().position(|sorted| *sorted == sorted_index)
    }

    /// Offset of a sorted index.
    pub fn offset(&self, sorted_index: usize) -> Option<f32> {
        self.offsets.get(sorted_index).copied()
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn midpoints(&self) -> &[f32] {
        &self.midpoints
    }

    /// Most open point, always 0.
    pub fn top(&self) -> f32 {
        self.offsets[0]
    }

    /// Most closed point.
    pub fn outer(&self) -> f32 {
        self.offsets[self.offsets.len() - 1]
    }

    /// Height of the fully open sheet: the largest raw snap value.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Pick the snap point a release at `offset` with `velocity` should
    /// settle on.
    ///
    /// The release is projected to `offset + toss * velocity`. Walking the
    /// points from the top, the first one whose midpoint with its successor
    /// lies beyond the projection wins; otherwise the last point does.
    pub fn resolve_destination(&self, offset: f32, velocity: f32, toss: f32) -> usize {
        let destination = offset + toss * velocity;
        self.midpoints
            .iter()
            .position(|midpoint| destination < *midpoint)
            .unwrap_or(self.offsets.len() - 1)
    }

    /// Sorted index whose offset is exactly `offset`, if any.
    pub fn index_at(&self, offset: f32) -> Option<usize> {
        self.offsets.iter().position(|point| *point == offset)
    }
}

#[cfg(test)]
#[path = "tests/snap_points_tests.rs"]
mod tests;
