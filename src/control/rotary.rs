use tracing::{debug, warn};

use super::{grab_point, ControlResult, GrabState};
use crate::{
    geometry::{wrap_angle, Point, Zone},
    hand::HandObservation,
    DEFAULT_ROTATION_SENSITIVITY,
};

/// Deck wheel: turns pinch motion around the zone center into rotation.
///
/// `cumulative_rotation` is unbounded and only moves by wrap-corrected,
/// sensitivity-scaled deltas. It survives releases and is cleared only by
/// [`RotaryControl::reset`].
#[derive(Debug, Clone)]
pub struct RotaryControl {
    // Fixed at construction
    zone: Zone,
    center: Point,
    sensitivity: f32,

    // Per-frame state
    state: GrabState,
    last_angle: Option<f32>, // None whenever released
    cumulative_rotation: f32,
}

impl RotaryControl {
    /// A non-finite sensitivity falls back to the crate default.
    pub fn new(zone: Zone, sensitivity: f32) -> Self {
        let sensitivity = if sensitivity.is_finite() {
            sensitivity
        } else {
            warn!(sensitivity, "non-finite wheel sensitivity, using default");
            DEFAULT_ROTATION_SENSITIVITY
        };
        Self {
            zone,
            center: zone.center(),
            sensitivity,
            state: GrabState::Released,
            last_angle: None,
            cumulative_rotation: 0.0,
        }
    }

    /// Advance one frame with this side's hand (or `None` if no hand was
    /// assigned).
    pub fn update(&mut self, observation: Option<&HandObservation>) -> ControlResult {
        let Some(pinch) = grab_point(&self.zone, observation) else {
            self.release();
            return self.result(0.0);
        };

        if !self.state.is_grabbed() {
            debug!(x = pinch.x, y = pinch.y, "wheel grabbed");
            self.state = GrabState::Grabbed;
        }

        // Exactly at the center atan2(0, 0) is 0; zone sizing keeps hands off it.
        let current = pinch.angle_from(self.center);
        let delta = match self.last_angle {
            Some(last) => wrap_angle(current - last) * self.sensitivity,
            None => 0.0,
        };
        let delta = if delta.is_finite() { delta } else { 0.0 };
        self.cumulative_rotation += delta;
        self.last_angle = Some(current);

        self.result(delta)
    }

    /// Back to released with the accumulator cleared.
    pub fn reset(&mut self) {
        self.state = GrabState::Released;
        self.last_angle = None;
        self.cumulative_rotation = 0.0;
    }

    fn release(&mut self) {
        if self.state.is_grabbed() {
            debug!(rotation = self.cumulative_rotation, "wheel released");
        }
        self.state = GrabState::Released;
        self.last_angle = None;
    }

    fn result(&self, delta: f32) -> ControlResult {
        ControlResult {
            is_active: self.state.is_grabbed(),
            value: self.cumulative_rotation,
            delta,
        }
    }

    pub fn is_grabbed(&self) -> bool {
        self.state.is_grabbed()
    }

    pub fn cumulative_rotation(&self) -> f32 {
        self.cumulative_rotation
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }
}
