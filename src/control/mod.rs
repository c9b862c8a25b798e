//! Gesture controls: the per-deck wheel and knob state machines and the bank
//! that drives them once per frame.
//!
//! These types never allocate or block inside `update`, so they can sit in the
//! same loop that pulls frames off the tracker.

/*
Grab / Release
==============

Every control runs the same two-state machine:

    ┌──────────┐  pinch held inside zone   ┌─────────┐
    │ Released │ ────────────────────────→ │ Grabbed │ ──┐ pinch held
    └──────────┘                           └─────────┘ ←─┘ inside zone
         ↑                                      │
         │   no hand / pinch let go / left zone │
         └──────────────────────────────────────┘

Entering Grabbed stores a reference (angle for the wheel, y for the knob).
Later frames measure against that reference and then overwrite it. Leaving
Grabbed throws the reference away, so a re-grab always starts with delta 0
no matter where the hand comes back.
*/

/// Wheel that accumulates wrap-corrected rotation.
pub mod rotary;
/// Knob that moves a clamped [0, 1] value with vertical motion.
pub mod linear;
/// Per-frame hand assignment and snapshot.
pub mod bank;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{geometry::Point, geometry::Zone, hand::HandObservation};

pub use bank::{AssignmentPolicy, ControlBank, ControlName, ControlSnapshot};
pub use linear::LinearControl;
pub use rotary::RotaryControl;

/// What one control reports for one frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlResult {
    /// The control was grabbed this frame.
    pub is_active: bool,
    /// Cumulative rotation (wheel) or settled position in [0, 1] (knob).
    pub value: f32,
    /// Change applied this frame, already scaled by sensitivity.
    pub delta: f32,
}

/// Grab state of a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrabState {
    #[default]
    Released,
    Grabbed,
}

impl GrabState {
    pub fn is_grabbed(self) -> bool {
        matches!(self, GrabState::Grabbed)
    }
}

/// Pinch position that grabs `zone` this frame, if any.
///
/// Absent hand, open hand, and a pinch outside the zone all come back as
/// `None`; callers treat that uniformly as a release.
#[inline]
pub(crate) fn grab_point(zone: &Zone, observation: Option<&HandObservation>) -> Option<Point> {
    observation
        .and_then(HandObservation::active_pinch)
        .filter(|pinch| zone.contains(*pinch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Handedness;

    #[test]
    fn grab_point_needs_pinch_inside_zone() {
        let zone = Zone::new(0.38, 0.35, 0.48, 0.75);

        let inside = HandObservation::pinching(Handedness::Left, 0.43, 0.5);
        let open = HandObservation::open(Handedness::Left, 0.43, 0.5);
        let outside = HandObservation::pinching(Handedness::Left, 0.9, 0.5);

        assert_eq!(grab_point(&zone, Some(&inside)), Some(Point::new(0.43, 0.5)));
        assert_eq!(grab_point(&zone, Some(&open)), None);
        assert_eq!(grab_point(&zone, Some(&outside)), None);
        assert_eq!(grab_point(&zone, None), None);
    }
}
