//! Per-hand observations handed over by the landmark tracker.
//!
//! The tracker itself (camera, model inference) lives outside this crate. It
//! produces 21 normalized landmarks per hand plus a handedness label;
//! [`PinchDetector`] reduces those to the pinch flag and pinch position the
//! controls actually consume.

use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Landmarks reported per hand.
pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

/// Thumb-to-index distance below which a hand counts as pinching.
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.05;

pub type Landmarks = [Point; LANDMARK_COUNT];

/// Which hand the tracker saw. Also selects the deck side it drives.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub const BOTH: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    /// The opposite label, for trackers fed a mirrored camera image.
    pub fn mirrored(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

/// Fixed left/right pair. The set of sides is closed, so this stands in for
/// any handedness-keyed map.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SidePair<T> {
    pub left: T,
    pub right: T,
}

impl<T> SidePair<T> {
    pub const fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: Handedness) -> &T {
        match side {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Handedness) -> &mut T {
        match side {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SidePair<U> {
        SidePair {
            left: f(self.left),
            right: f(self.right),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handedness, &T)> {
        [(Handedness::Left, &self.left), (Handedness::Right, &self.right)].into_iter()
    }
}

impl<T> Index<Handedness> for SidePair<T> {
    type Output = T;

    fn index(&self, side: Handedness) -> &T {
        self.get(side)
    }
}

impl<T> IndexMut<Handedness> for SidePair<T> {
    fn index_mut(&mut self, side: Handedness) -> &mut T {
        self.get_mut(side)
    }
}

/// One tracked hand in one frame. Read-only input to the controls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandObservation {
    pub handedness: Handedness,
    pub is_pinching: bool,
    /// Midpoint of thumb and index tips.
    pub pinch: Point,
    /// Full landmark set; the controls only look at `pinch`.
    pub landmarks: Landmarks,
}

impl HandObservation {
    /// Observation with no landmark detail, pinch active at `(x, y)`.
    pub fn pinching(handedness: Handedness, x: f32, y: f32) -> Self {
        Self {
            handedness,
            is_pinching: true,
            pinch: Point::new(x, y),
            landmarks: [Point::new(x, y); LANDMARK_COUNT],
        }
    }

    /// Observation with no landmark detail, hand open at `(x, y)`.
    pub fn open(handedness: Handedness, x: f32, y: f32) -> Self {
        Self {
            is_pinching: false,
            ..Self::pinching(handedness, x, y)
        }
    }

    /// Pinch position, but only while the pinch is held.
    #[inline]
    pub fn active_pinch(&self) -> Option<Point> {
        self.is_pinching.then_some(self.pinch)
    }
}

/// Reduces raw tracker landmarks to a [`HandObservation`].
#[derive(Debug, Clone, Copy)]
pub struct PinchDetector {
    /// Thumb-to-index distance that counts as a pinch (exclusive).
    pub threshold: f32,
    /// Flip the tracker's handedness label. Webcam previews are mirrored, so
    /// the model's "Left" is the performer's right hand.
    pub mirrored: bool,
}

impl PinchDetector {
    pub fn new(threshold: f32, mirrored: bool) -> Self {
        Self {
            threshold,
            mirrored,
        }
    }

    pub fn observe(&self, label: Handedness, landmarks: Landmarks) -> HandObservation {
        let thumb = landmarks[THUMB_TIP];
        let index = landmarks[INDEX_TIP];

        HandObservation {
            handedness: if self.mirrored { label.mirrored() } else { label },
            is_pinching: thumb.distance(index) < self.threshold,
            pinch: thumb.midpoint(index),
            landmarks,
        }
    }
}

impl Default for PinchDetector {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_THRESHOLD, true)
    }
}
