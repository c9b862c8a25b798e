//! Startup configuration: the zone table, sensitivities and mixer ranges.
//!
//! Everything here is validated once before the first frame. Per-frame code
//! assumes a valid layout and never re-checks it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    control::AssignmentPolicy,
    geometry::{Zone, ZoneError},
    hand::{SidePair, DEFAULT_PINCH_THRESHOLD},
    mixer::MixerConfig,
    DEFAULT_KNOB_VALUE, DEFAULT_LINEAR_SENSITIVITY, DEFAULT_ROTATION_SENSITIVITY,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("zone `{name}` is invalid: {source}")]
    Zone {
        name: &'static str,
        #[source]
        source: ZoneError,
    },
    #[error("{name} sensitivity must be finite and positive, got {value}")]
    Sensitivity { name: &'static str, value: f32 },
    #[error("default value for `{name}` must lie within [0, 1], got {value}")]
    KnobDefault { name: &'static str, value: f32 },
    #[error("tempo range must satisfy 0 < min <= max, got {min}..{max}")]
    TempoRange { min: f32, max: f32 },
    #[error("tempo scale must be finite and positive, got {0}")]
    TempoScale(f32),
    #[error("pinch threshold must be finite and positive, got {0}")]
    PinchThreshold(f32),
    #[cfg(feature = "serde")]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Zone table and gesture tuning for the four controls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    pub decks: SidePair<Zone>,
    pub knobs: SidePair<Zone>,
    /// Wheel radians per radian of hand rotation.
    pub rotation_sensitivity: f32,
    /// Knob units per unit of normalized vertical travel.
    pub linear_sensitivity: f32,
    pub knob_defaults: SidePair<f32>,
    pub assignment: AssignmentPolicy,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            decks: SidePair::new(
                Zone::new(0.02, 0.25, 0.35, 0.85),
                Zone::new(0.65, 0.25, 0.98, 0.85),
            ),
            knobs: SidePair::new(
                Zone::new(0.38, 0.35, 0.48, 0.75),
                Zone::new(0.52, 0.35, 0.62, 0.75),
            ),
            rotation_sensitivity: DEFAULT_ROTATION_SENSITIVITY,
            linear_sensitivity: DEFAULT_LINEAR_SENSITIVITY,
            knob_defaults: SidePair::new(DEFAULT_KNOB_VALUE, DEFAULT_KNOB_VALUE),
            assignment: AssignmentPolicy::default(),
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zones = [
            ("deck_left", self.decks.left),
            ("deck_right", self.decks.right),
            ("knob_left", self.knobs.left),
            ("knob_right", self.knobs.right),
        ];
        for (name, zone) in zones {
            zone.validate()
                .map_err(|source| ConfigError::Zone { name, source })?;
        }

        check_positive("rotation", self.rotation_sensitivity)?;
        check_positive("linear", self.linear_sensitivity)?;

        for (name, value) in [
            ("knob_left", self.knob_defaults.left),
            ("knob_right", self.knob_defaults.right),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::KnobDefault { name, value });
            }
        }
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Sensitivity { name, value })
    }
}

/// Everything the simulator (or a host application) needs at startup.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub controls: ControlConfig,
    pub mixer: MixerConfig,
    /// Thumb-to-index distance that counts as a pinch.
    pub pinch_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            controls: ControlConfig::default(),
            mixer: MixerConfig::default(),
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls.validate()?;
        self.mixer.validate()?;
        if !(self.pinch_threshold.is_finite() && self.pinch_threshold > 0.0) {
            return Err(ConfigError::PinchThreshold(self.pinch_threshold));
        }
        Ok(())
    }

    /// Parse and validate settings from TOML. Missing keys keep their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }
}
