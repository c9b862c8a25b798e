//! # pinch_deck
//!
//! Frame-synchronous mapping from tracked hand pinches to DJ controls.
//!
//! Each frame the caller hands a [`ControlBank`] the hands seen by the
//! tracker. The bank assigns at most one hand per side, drives a rotary
//! "wheel" and a linear "knob" for each deck, and returns a fixed-order
//! [`ControlSnapshot`]. A [`DeckMapper`](mixer::DeckMapper) then turns the
//! snapshot into tempo and volume messages for the mixing engine.
//!
//! ```
//! use pinch_deck::{ControlBank, ControlName, Handedness, HandObservation};
//!
//! let mut bank = ControlBank::default();
//! let hand = HandObservation::pinching(Handedness::Left, 0.43, 0.60);
//! let snapshot = bank.update(&[hand]);
//! assert!(snapshot[ControlName::KnobLeft].is_active);
//! ```

pub mod config;
pub mod control; // Wheel/knob state machines and the per-frame bank
pub mod geometry;
pub mod hand; // Tracker-facing observation types
pub mod mixer; // Snapshot -> deck tempo/volume

pub use config::{ConfigError, ControlConfig, Settings};
pub use control::{
    AssignmentPolicy, ControlBank, ControlName, ControlResult, ControlSnapshot, LinearControl,
    RotaryControl,
};
pub use geometry::{Point, Zone};
pub use hand::{HandObservation, Handedness, SidePair};

/// Wheel delta multiplier used by the stock control layout.
pub const DEFAULT_ROTATION_SENSITIVITY: f32 = 2.0;
/// Knob delta multiplier used by the stock control layout.
pub const DEFAULT_LINEAR_SENSITIVITY: f32 = 1.5;
/// Starting knob (volume) value.
pub const DEFAULT_KNOB_VALUE: f32 = 0.7;
