use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{ControlResult, LinearControl, RotaryControl};
use crate::{
    config::{ConfigError, ControlConfig},
    hand::{HandObservation, Handedness, SidePair},
};

/// How to pick a side's hand when the tracker reports two hands with the
/// same handedness label in one frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentPolicy {
    /// Later observations overwrite earlier ones.
    #[default]
    LastWins,
    /// The first observation for a side is kept.
    FirstWins,
    /// A side reported more than once gets no hand this frame.
    DropAmbiguous,
    /// Keep the hand whose pinch is nearest to the center of one of the
    /// side's zones.
    NearestZone,
}

/// Fixed control names, in snapshot order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlName {
    DeckLeft,
    DeckRight,
    KnobLeft,
    KnobRight,
}

impl ControlName {
    /// Update and snapshot order.
    pub const ALL: [ControlName; 4] = [
        ControlName::DeckLeft,
        ControlName::DeckRight,
        ControlName::KnobLeft,
        ControlName::KnobRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ControlName::DeckLeft => "deck_left",
            ControlName::DeckRight => "deck_right",
            ControlName::KnobLeft => "knob_left",
            ControlName::KnobRight => "knob_right",
        }
    }

    pub fn side(self) -> Handedness {
        match self {
            ControlName::DeckLeft | ControlName::KnobLeft => Handedness::Left,
            ControlName::DeckRight | ControlName::KnobRight => Handedness::Right,
        }
    }

    pub fn deck(side: Handedness) -> Self {
        match side {
            Handedness::Left => ControlName::DeckLeft,
            Handedness::Right => ControlName::DeckRight,
        }
    }

    pub fn knob(side: Handedness) -> Self {
        match side {
            Handedness::Left => ControlName::KnobLeft,
            Handedness::Right => ControlName::KnobRight,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Every control's result for one frame. Fixed size and `Copy`, so it can be
/// handed to the renderer or across a ring buffer without allocating.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlSnapshot {
    results: [ControlResult; 4],
}

impl ControlSnapshot {
    pub fn get(&self, name: ControlName) -> &ControlResult {
        &self.results[name.index()]
    }

    /// Results in fixed order: left deck, right deck, left knob, right knob.
    pub fn iter(&self) -> impl Iterator<Item = (ControlName, ControlResult)> + '_ {
        ControlName::ALL
            .into_iter()
            .map(|name| (name, self.results[name.index()]))
    }

    pub fn any_active(&self) -> bool {
        self.results.iter().any(|r| r.is_active)
    }
}

impl Index<ControlName> for ControlSnapshot {
    type Output = ControlResult;

    fn index(&self, name: ControlName) -> &ControlResult {
        self.get(name)
    }
}

/// One wheel and one knob per side, driven once per frame.
#[derive(Debug, Clone)]
pub struct ControlBank {
    decks: SidePair<RotaryControl>,
    knobs: SidePair<LinearControl>,
    policy: AssignmentPolicy,
    frame: u64,
}

impl ControlBank {
    /// Build a bank from a validated control layout.
    pub fn new(config: &ControlConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(policy = ?config.assignment, "control bank ready");
        Ok(Self::from_config_unchecked(config))
    }

    fn from_config_unchecked(config: &ControlConfig) -> Self {
        let decks = config
            .decks
            .map(|zone| RotaryControl::new(zone, config.rotation_sensitivity));
        let knobs = SidePair::new(
            LinearControl::new(
                config.knobs.left,
                config.linear_sensitivity,
                config.knob_defaults.left,
            ),
            LinearControl::new(
                config.knobs.right,
                config.linear_sensitivity,
                config.knob_defaults.right,
            ),
        );

        Self {
            decks,
            knobs,
            policy: config.assignment,
            frame: 0,
        }
    }

    /// Process one frame of tracked hands.
    ///
    /// Controls update in [`ControlName::ALL`] order and each sees only its
    /// side's hand.
    pub fn update(&mut self, observations: &[HandObservation]) -> ControlSnapshot {
        let hands = self.assign(observations);
        self.frame += 1;
        trace!(
            frame = self.frame,
            hands = observations.len(),
            left = hands.left.is_some(),
            right = hands.right.is_some(),
            "bank update"
        );

        let mut snapshot = ControlSnapshot::default();
        for name in ControlName::ALL {
            let hand = hands[name.side()];
            snapshot.results[name.index()] = match name {
                ControlName::DeckLeft | ControlName::DeckRight => {
                    self.decks[name.side()].update(hand)
                }
                ControlName::KnobLeft | ControlName::KnobRight => {
                    self.knobs[name.side()].update(hand)
                }
            };
        }
        snapshot
    }

    /// Pick at most one observation per side according to the policy.
    fn assign<'a>(&self, observations: &'a [HandObservation]) -> SidePair<Option<&'a HandObservation>> {
        let mut picked: SidePair<Option<&HandObservation>> = SidePair::new(None, None);
        let mut seen = SidePair::new(0usize, 0usize);

        for obs in observations {
            let side = obs.handedness;
            seen[side] += 1;
            let slot = &mut picked[side];
            *slot = match (*slot, self.policy) {
                (None, _) => Some(obs),
                (Some(_), AssignmentPolicy::LastWins) => Some(obs),
                (Some(kept), AssignmentPolicy::FirstWins | AssignmentPolicy::DropAmbiguous) => {
                    Some(kept)
                }
                (Some(kept), AssignmentPolicy::NearestZone) => {
                    if self.zone_rank(obs) < self.zone_rank(kept) {
                        Some(obs)
                    } else {
                        Some(kept)
                    }
                }
            };
        }

        for side in Handedness::BOTH {
            if seen[side] > 1 {
                debug!(
                    side = side.as_str(),
                    count = seen[side],
                    policy = ?self.policy,
                    "ambiguous hand assignment"
                );
                if self.policy == AssignmentPolicy::DropAmbiguous {
                    picked[side] = None;
                }
            }
        }

        picked
    }

    /// Ordering key for `NearestZone`: pinching hands first, then by distance.
    fn zone_rank(&self, obs: &HandObservation) -> (bool, f32) {
        (!obs.is_pinching, self.zone_distance(obs))
    }

    /// Distance from a hand's pinch to the nearest zone center on its side.
    /// Non-finite pinches sort last.
    fn zone_distance(&self, obs: &HandObservation) -> f32 {
        let side = obs.handedness;
        let deck = obs.pinch.distance(self.decks[side].center());
        let knob = obs.pinch.distance(self.knobs[side].zone().center());
        let nearest = deck.min(knob);
        if nearest.is_finite() {
            nearest
        } else {
            f32::INFINITY
        }
    }

    /// Release everything and clear wheel accumulation. Knob values stay.
    pub fn reset_all(&mut self) {
        for side in Handedness::BOTH {
            self.decks[side].reset();
            self.knobs[side].reset();
        }
        info!(frame = self.frame, "controls reset");
    }

    /// Put both knobs back to their configured starting values.
    pub fn restore_knob_defaults(&mut self) {
        for side in Handedness::BOTH {
            self.knobs[side].restore_default();
        }
    }

    pub fn deck(&self, side: Handedness) -> &RotaryControl {
        &self.decks[side]
    }

    pub fn knob(&self, side: Handedness) -> &LinearControl {
        &self.knobs[side]
    }

    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    /// Frames processed since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for ControlBank {
    fn default() -> Self {
        Self::from_config_unchecked(&ControlConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_with(policy: AssignmentPolicy) -> ControlBank {
        let config = ControlConfig {
            assignment: policy,
            ..ControlConfig::default()
        };
        ControlBank::new(&config).expect("default layout is valid")
    }

    #[test]
    fn snapshot_order_is_fixed() {
        let mut bank = ControlBank::default();
        let names: Vec<_> = bank.update(&[]).iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["deck_left", "deck_right", "knob_left", "knob_right"]);
    }

    #[test]
    fn each_hand_drives_only_its_side() {
        let mut bank = ControlBank::default();
        let left = HandObservation::pinching(Handedness::Left, 0.43, 0.5);
        let right = HandObservation::pinching(Handedness::Right, 0.8, 0.5);

        let snapshot = bank.update(&[left, right]);

        assert!(!snapshot[ControlName::DeckLeft].is_active);
        assert!(snapshot[ControlName::DeckRight].is_active);
        assert!(snapshot[ControlName::KnobLeft].is_active);
        assert!(!snapshot[ControlName::KnobRight].is_active);
    }

    #[test]
    fn right_hand_in_left_zone_does_nothing() {
        let mut bank = ControlBank::default();
        let hand = HandObservation::pinching(Handedness::Right, 0.43, 0.5);

        assert!(!bank.update(&[hand]).any_active());
    }

    #[test]
    fn last_wins_keeps_later_observation() {
        let mut bank = bank_with(AssignmentPolicy::LastWins);
        let in_knob = HandObservation::pinching(Handedness::Left, 0.43, 0.5);
        let nowhere = HandObservation::pinching(Handedness::Left, 0.5, 0.1);

        let snapshot = bank.update(&[in_knob, nowhere]);
        assert!(!snapshot[ControlName::KnobLeft].is_active);

        let snapshot = bank.update(&[nowhere, in_knob]);
        assert!(snapshot[ControlName::KnobLeft].is_active);
    }

    #[test]
    fn first_wins_keeps_earlier_observation() {
        let mut bank = bank_with(AssignmentPolicy::FirstWins);
        let in_knob = HandObservation::pinching(Handedness::Left, 0.43, 0.5);
        let nowhere = HandObservation::pinching(Handedness::Left, 0.5, 0.1);

        assert!(bank.update(&[in_knob, nowhere])[ControlName::KnobLeft].is_active);
        assert!(!bank.update(&[nowhere, in_knob])[ControlName::KnobLeft].is_active);
    }

    #[test]
    fn drop_ambiguous_ignores_duplicated_side() {
        let mut bank = bank_with(AssignmentPolicy::DropAmbiguous);
        let a = HandObservation::pinching(Handedness::Left, 0.43, 0.5);
        let b = HandObservation::pinching(Handedness::Left, 0.2, 0.5);
        let right = HandObservation::pinching(Handedness::Right, 0.57, 0.5);

        let snapshot = bank.update(&[a, b, right]);
        assert!(!snapshot[ControlName::KnobLeft].is_active);
        assert!(!snapshot[ControlName::DeckLeft].is_active);
        assert!(snapshot[ControlName::KnobRight].is_active);
    }

    #[test]
    fn nearest_zone_prefers_hand_closest_to_a_control() {
        let mut bank = bank_with(AssignmentPolicy::NearestZone);
        let knob_center = bank.knob(Handedness::Left).zone().center();
        let near = HandObservation::pinching(Handedness::Left, knob_center.x, knob_center.y);
        let far = HandObservation::pinching(Handedness::Left, 0.5, 0.05);

        assert!(bank.update(&[near, far])[ControlName::KnobLeft].is_active);
        assert!(bank.update(&[far, near])[ControlName::KnobLeft].is_active);
    }

    #[test]
    fn nearest_zone_ranks_pinching_hand_over_closer_open_hand() {
        let mut bank = bank_with(AssignmentPolicy::NearestZone);
        let knob_center = bank.knob(Handedness::Left).zone().center();
        let open = HandObservation::open(Handedness::Left, knob_center.x, knob_center.y);
        let pinching =
            HandObservation::pinching(Handedness::Left, knob_center.x, knob_center.y + 0.05);

        assert!(bank.update(&[open, pinching])[ControlName::KnobLeft].is_active);
        assert!(bank.update(&[pinching, open])[ControlName::KnobLeft].is_active);
    }

    #[test]
    fn reset_all_clears_wheels_keeps_knobs() {
        let mut bank = ControlBank::default();
        let c = bank.deck(Handedness::Left).center();
        bank.update(&[HandObservation::pinching(Handedness::Left, c.x + 0.1, c.y)]);
        bank.update(&[HandObservation::pinching(Handedness::Left, c.x, c.y + 0.1)]);
        assert!(bank.deck(Handedness::Left).cumulative_rotation() != 0.0);

        bank.update(&[HandObservation::pinching(Handedness::Right, 0.57, 0.6)]);
        bank.update(&[HandObservation::pinching(Handedness::Right, 0.57, 0.5)]);
        let knob = bank.knob(Handedness::Right).value();

        bank.reset_all();

        assert_eq!(bank.deck(Handedness::Left).cumulative_rotation(), 0.0);
        assert!(!bank.knob(Handedness::Right).is_grabbed());
        assert_eq!(bank.knob(Handedness::Right).value(), knob);

        bank.restore_knob_defaults();
        assert_eq!(bank.knob(Handedness::Right).value(), 0.7);
    }

    #[test]
    fn frame_counter_advances_per_update() {
        let mut bank = ControlBank::default();
        bank.update(&[]);
        bank.update(&[]);
        assert_eq!(bank.frame(), 2);
    }
}
