use tracing::{debug, warn};

use super::{grab_point, ControlResult, GrabState};
use crate::{
    geometry::{clamp_unit, Zone},
    hand::HandObservation,
    DEFAULT_KNOB_VALUE, DEFAULT_LINEAR_SENSITIVITY,
};

/// Volume knob: vertical pinch motion moves a value clamped to [0, 1].
///
/// The value is sticky. It is reported every frame, grabbed or not, and a
/// release leaves it where the hand let go.
#[derive(Debug, Clone)]
pub struct LinearControl {
    zone: Zone,
    sensitivity: f32,
    default_value: f32,

    state: GrabState,
    last_y: Option<f32>,
    value: f32, // always in [0, 1]
}

impl LinearControl {
    /// A NaN default or a non-finite sensitivity falls back to the crate
    /// defaults; other out-of-range defaults are clamped.
    pub fn new(zone: Zone, sensitivity: f32, default_value: f32) -> Self {
        let sensitivity = if sensitivity.is_finite() {
            sensitivity
        } else {
            warn!(sensitivity, "non-finite knob sensitivity, using default");
            DEFAULT_LINEAR_SENSITIVITY
        };
        let default_value = if default_value.is_nan() {
            warn!(fallback = DEFAULT_KNOB_VALUE, "NaN knob default, using default");
            DEFAULT_KNOB_VALUE
        } else {
            clamp_unit(default_value)
        };
        Self {
            zone,
            sensitivity,
            default_value,
            state: GrabState::Released,
            last_y: None,
            value: default_value,
        }
    }

    /// Advance one frame with this side's hand (or `None`).
    pub fn update(&mut self, observation: Option<&HandObservation>) -> ControlResult {
        let Some(pinch) = grab_point(&self.zone, observation) else {
            self.release();
            return self.result(0.0);
        };

        if !self.state.is_grabbed() {
            debug!(y = pinch.y, value = self.value, "knob grabbed");
            self.state = GrabState::Grabbed;
        }

        // y grows downward: last - current is positive when the hand rises
        let delta = match self.last_y {
            Some(last) => (last - pinch.y) * self.sensitivity,
            None => 0.0,
        };
        let delta = if delta.is_finite() { delta } else { 0.0 };
        if delta != 0.0 {
            self.value = clamp_unit(self.value + delta);
        }
        self.last_y = Some(pinch.y);

        debug_assert!((0.0..=1.0).contains(&self.value));
        self.result(delta)
    }

    /// Back to released. The value is the knob's position, not transient
    /// state, so it is left alone; see [`LinearControl::restore_default`].
    pub fn reset(&mut self) {
        self.state = GrabState::Released;
        self.last_y = None;
    }

    /// Put the value back to the configured starting point.
    pub fn restore_default(&mut self) {
        self.value = self.default_value;
    }

    fn release(&mut self) {
        if self.state.is_grabbed() {
            debug!(value = self.value, "knob released");
        }
        self.state = GrabState::Released;
        self.last_y = None;
    }

    fn result(&self, delta: f32) -> ControlResult {
        ControlResult {
            is_active: self.state.is_grabbed(),
            value: self.value,
            delta,
        }
    }

    pub fn is_grabbed(&self) -> bool {
        self.state.is_grabbed()
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Handedness;

    const KNOB_LEFT: Zone = Zone::new(0.38, 0.35, 0.48, 0.75);

    fn pinch_at(y: f32) -> HandObservation {
        HandObservation::pinching(Handedness::Left, 0.43, y)
    }

    #[test]
    fn moving_up_raises_value() {
        let mut knob = LinearControl::new(KNOB_LEFT, 1.5, 0.7);

        let first = knob.update(Some(&pinch_at(0.60)));
        assert!(first.is_active);
        assert_eq!(first.delta, 0.0);
        assert_eq!(first.value, 0.7);

        let second = knob.update(Some(&pinch_at(0.50)));
        assert!((second.delta - 0.15).abs() < 1e-5);
        assert!((second.value - 0.85).abs() < 1e-5);
    }

    #[test]
    fn moving_down_lowers_value() {
        let mut knob = LinearControl::new(KNOB_LEFT, 1.0, 0.5);
        knob.update(Some(&pinch_at(0.40)));
        let result = knob.update(Some(&pinch_at(0.60)));

        assert!((result.delta + 0.2).abs() < 1e-5);
        assert!((result.value - 0.3).abs() < 1e-5);
    }

    #[test]
    fn value_clamps_at_both_ends() {
        let mut knob = LinearControl::new(KNOB_LEFT, 10.0, 0.7);
        knob.update(Some(&pinch_at(0.74)));
        let top = knob.update(Some(&pinch_at(0.36)));
        assert_eq!(top.value, 1.0);

        let bottom = knob.update(Some(&pinch_at(0.74)));
        assert_eq!(bottom.value, 0.0);
    }

    #[test]
    fn value_is_sticky_while_released() {
        let mut knob = LinearControl::new(KNOB_LEFT, 1.5, 0.7);
        knob.update(Some(&pinch_at(0.60)));
        knob.update(Some(&pinch_at(0.50)));
        let settled = knob.value();

        for _ in 0..5 {
            let result = knob.update(None);
            assert!(!result.is_active);
            assert_eq!(result.delta, 0.0);
            assert_eq!(result.value, settled);
        }
    }

    #[test]
    fn regrab_starts_from_fresh_reference() {
        let mut knob = LinearControl::new(KNOB_LEFT, 1.5, 0.5);
        knob.update(Some(&pinch_at(0.70)));
        knob.update(None);

        let regrab = knob.update(Some(&pinch_at(0.40)));
        assert_eq!(regrab.delta, 0.0);
        assert_eq!(regrab.value, 0.5);
    }

    #[test]
    fn out_of_range_default_is_clamped() {
        assert_eq!(LinearControl::new(KNOB_LEFT, 1.0, 1.4).value(), 1.0);
        assert_eq!(LinearControl::new(KNOB_LEFT, 1.0, -0.2).value(), 0.0);
    }

    #[test]
    fn non_finite_construction_falls_back_to_defaults() {
        let knob = LinearControl::new(KNOB_LEFT, 1.5, f32::NAN);
        assert_eq!(knob.value(), DEFAULT_KNOB_VALUE);

        let mut knob = LinearControl::new(KNOB_LEFT, f32::INFINITY, 0.7);
        assert_eq!(knob.sensitivity(), DEFAULT_LINEAR_SENSITIVITY);
        knob.update(Some(&pinch_at(0.60)));
        let held = knob.update(Some(&pinch_at(0.60)));
        assert_eq!(held.delta, 0.0);
        assert_eq!(held.value, 0.7);
    }

    #[test]
    fn huge_sensitivity_still_lands_in_range() {
        let mut knob = LinearControl::new(KNOB_LEFT, f32::MAX, 0.5);
        knob.update(Some(&pinch_at(0.60)));
        let up = knob.update(Some(&pinch_at(0.40)));
        assert_eq!(up.value, 1.0);

        // Zero motion times a huge factor is still zero
        let held = knob.update(Some(&pinch_at(0.40)));
        assert_eq!(held.delta, 0.0);
        assert_eq!(held.value, 1.0);
    }

    #[test]
    fn reset_keeps_value_restore_default_does_not() {
        let mut knob = LinearControl::new(KNOB_LEFT, 1.0, 0.5);
        knob.update(Some(&pinch_at(0.60)));
        knob.update(Some(&pinch_at(0.50)));

        knob.reset();
        assert!(!knob.is_grabbed());
        assert!((knob.value() - 0.6).abs() < 1e-5);

        knob.restore_default();
        assert_eq!(knob.value(), 0.5);
    }
}
