//! Normalized frame geometry shared by every control.

/*
Coordinate Space
================

All positions live in the tracker's normalized image space:

    (0,0) ───────────────→ x (1,0)
      │
      │     ┌────────┐
      │     │  zone  │
      │     └────────┘
      ↓
      y (0,1)

y grows DOWNWARD. "Up" on screen means a smaller y, which is why the knob
subtracts the new y from the old one to get a positive delta when the hand
rises.

Angles are measured with atan2(dy, dx) from a zone's center. Because y points
down, a positive angle delta is a clockwise turn as the user sees it.


Wrap Correction
---------------

atan2 returns values in (-π, π]. The branch cut sits on the negative x axis:

              -π/2
               │
     ±π ───────┼─────── 0
               │
              +π/2

A hand moving from 170° to -170° has turned 20°, but the raw difference is
-340°. Any raw difference of two atan2 outputs lies in (-2π, 2π), so a single
±2π correction folds it back into (-π, π].
*/

use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in normalized `[0,1]×[0,1]` frame space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of `self` as seen from `origin`, in (-π, π].
    #[inline]
    pub fn angle_from(self, origin: Point) -> f32 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }
}

/// Why a zone rectangle was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ZoneError {
    #[error("zone bounds must be finite")]
    NonFinite,
    #[error("zone bounds must lie within [0, 1]")]
    OutOfFrame,
    #[error("zone is inverted or empty (left {left}, right {right}, top {top}, bottom {bottom})")]
    Degenerate {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    },
}

/// Axis-aligned rectangle in normalized frame space.
///
/// Containment is inclusive on every edge.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Zone {
    /// Build a zone from its `(x1, y1, x2, y2)` corners. Not validated; call
    /// [`Zone::validate`] once at startup for user-supplied layouts.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// True if `point` lies inside the closed rectangle.
    ///
    /// NaN coordinates compare false against every bound, so a non-finite
    /// point is never contained.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn validate(&self) -> Result<(), ZoneError> {
        let bounds = [self.left, self.top, self.right, self.bottom];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(ZoneError::NonFinite);
        }
        if bounds.iter().any(|b| !(0.0..=1.0).contains(b)) {
            return Err(ZoneError::OutOfFrame);
        }
        if self.left >= self.right || self.top >= self.bottom {
            return Err(ZoneError::Degenerate {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
            });
        }
        Ok(())
    }
}

/// Fold the difference of two `atan2` angles into (-π, π].
#[inline]
pub fn wrap_angle(delta: f32) -> f32 {
    if delta > PI {
        delta - TAU
    } else if delta <= -PI {
        delta + TAU
    } else {
        delta
    }
}

/// Clamp to the unit interval. NaN maps to 0.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
