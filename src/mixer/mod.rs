//! Deck parameters derived from control snapshots.
//!
//! The wheels nudge each deck's tempo; the knobs set its volume directly.
//! Changes go out as [`MixerMessage`]s so the mixing engine can run on its own
//! thread behind a wait-free ring buffer.

pub mod message;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    config::ConfigError,
    control::{ControlName, ControlSnapshot},
    hand::{Handedness, SidePair},
    DEFAULT_KNOB_VALUE,
};

pub use message::{MessageReceiver, MessageSender, MixerMessage};

/// Tempo handling for the decks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixerConfig {
    /// Slowest playback rate (1.0 = original speed).
    pub min_tempo: f32,
    /// Fastest playback rate.
    pub max_tempo: f32,
    /// Tempo change per unit of wheel delta.
    pub tempo_scale: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            min_tempo: 0.5,
            max_tempo: 1.5,
            tempo_scale: 0.1,
        }
    }
}

impl MixerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_tempo, self.max_tempo);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::TempoRange { min, max });
        }
        if !(self.tempo_scale.is_finite() && self.tempo_scale > 0.0) {
            return Err(ConfigError::TempoScale(self.tempo_scale));
        }
        Ok(())
    }

    fn clamp_tempo(&self, tempo: f32) -> f32 {
        tempo.clamp(self.min_tempo, self.max_tempo)
    }
}

/// Playback parameters for one deck.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckParams {
    pub tempo: f32,
    pub volume: f32,
}

impl Default for DeckParams {
    fn default() -> Self {
        Self {
            tempo: 1.0,
            volume: DEFAULT_KNOB_VALUE,
        }
    }
}

/// Turns [`ControlSnapshot`]s into deck tempo/volume and publishes changes.
#[derive(Debug, Clone)]
pub struct DeckMapper {
    config: MixerConfig,
    decks: SidePair<DeckParams>,
    // Last values actually delivered; None forces the next publish.
    published_tempo: SidePair<Option<f32>>,
    published_volume: SidePair<Option<f32>>,
    dropped: u64,
}

impl DeckMapper {
    pub fn new(config: MixerConfig) -> Self {
        Self {
            config,
            decks: SidePair::default(),
            published_tempo: SidePair::new(Some(1.0), Some(1.0)),
            published_volume: SidePair::new(None, None),
            dropped: 0,
        }
    }

    /// Apply one frame. Never blocks; a full queue drops the message and a
    /// later frame resends whatever the engine has not seen yet.
    pub fn apply<S: MessageSender>(&mut self, snapshot: &ControlSnapshot, tx: &mut S) {
        for side in Handedness::BOTH {
            let wheel = snapshot[ControlName::deck(side)];
            if wheel.is_active && wheel.delta != 0.0 {
                let deck = &mut self.decks[side];
                deck.tempo = self
                    .config
                    .clamp_tempo(deck.tempo + wheel.delta * self.config.tempo_scale);
            }
            let tempo = self.decks[side].tempo;
            if self.published_tempo[side] != Some(tempo) {
                let msg = MixerMessage::SetTempo { deck: side, tempo };
                if self.send(tx, msg) {
                    self.published_tempo[side] = Some(tempo);
                }
            }

            let volume = snapshot[ControlName::knob(side)].value;
            self.decks[side].volume = volume;
            if self.published_volume[side] != Some(volume) {
                let msg = MixerMessage::SetVolume { deck: side, volume };
                if self.send(tx, msg) {
                    self.published_volume[side] = Some(volume);
                }
            }
        }
    }

    fn send<S: MessageSender>(&mut self, tx: &mut S, msg: MixerMessage) -> bool {
        match tx.push(msg) {
            Ok(()) => true,
            Err(msg) => {
                self.dropped += 1;
                warn!(?msg, dropped = self.dropped, "mixer queue full, message dropped");
                false
            }
        }
    }

    /// Tempos back to 1.0 and volumes re-published on the next frame.
    pub fn reset(&mut self) {
        for side in Handedness::BOTH {
            self.decks[side].tempo = 1.0;
            self.published_volume[side] = None;
        }
    }

    pub fn deck(&self, side: Handedness) -> DeckParams {
        self.decks[side]
    }

    /// Messages lost to a full queue since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for DeckMapper {
    fn default() -> Self {
        Self::new(MixerConfig::default())
    }
}
