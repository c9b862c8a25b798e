//! Keyboard-driven stand-ins for the two tracked hands.

use pinch_deck::{
    geometry::Point,
    hand::{Landmarks, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP},
    Handedness,
};

/// Thumb/index gap for a held pinch and for an open hand. They straddle the
/// default pinch threshold so the detector sees a real decision.
const PINCHED_GAP: f32 = 0.01;
const OPEN_GAP: f32 = 0.09;

/// Cursor step per key press.
pub const STEP: f32 = 0.01;
/// Orbit step per key press, degrees.
pub const ORBIT_STEP: f32 = 6.0;

pub struct SimHand {
    pub side: Handedness,
    pub position: Point,
    pub pinching: bool,
    pub visible: bool,
}

impl SimHand {
    pub fn new(side: Handedness, position: Point) -> Self {
        Self {
            side,
            position,
            pinching: false,
            visible: true,
        }
    }

    pub fn nudge(&mut self, dx: f32, dy: f32) {
        self.position.x = (self.position.x + dx).clamp(0.0, 1.0);
        self.position.y = (self.position.y + dy).clamp(0.0, 1.0);
    }

    /// Rotate the cursor around `center`, keeping its current radius.
    pub fn orbit(&mut self, center: Point, degrees: f32) {
        let radius = self.position.distance(center).max(STEP);
        let angle = self.position.angle_from(center) + degrees.to_radians();
        let (sin, cos) = angle.sin_cos();
        self.position = Point::new(center.x + radius * cos, center.y + radius * sin);
    }

    /// Fake tracker output: every landmark at the cursor, thumb and index
    /// tips split around it by the pinch gap.
    pub fn landmarks(&self) -> Landmarks {
        let gap = if self.pinching { PINCHED_GAP } else { OPEN_GAP };
        let mut landmarks = [self.position; LANDMARK_COUNT];
        landmarks[THUMB_TIP] = Point::new(self.position.x - gap * 0.5, self.position.y);
        landmarks[INDEX_TIP] = Point::new(self.position.x + gap * 0.5, self.position.y);
        landmarks
    }
}
