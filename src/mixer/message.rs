#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

use crate::hand::Handedness;

/// Parameter change for the mixing engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MixerMessage {
    SetTempo { deck: Handedness, tempo: f32 },
    SetVolume { deck: Handedness, volume: f32 },
}

impl MixerMessage {
    pub fn deck(&self) -> Handedness {
        match *self {
            MixerMessage::SetTempo { deck, .. } | MixerMessage::SetVolume { deck, .. } => deck,
        }
    }
}

/// Non-blocking outlet for [`MixerMessage`]s. A full queue hands the message
/// back instead of waiting.
pub trait MessageSender {
    fn push(&mut self, msg: MixerMessage) -> Result<(), MixerMessage>;
}

/// Mixing-engine side of the queue.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<MixerMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageSender for Producer<MixerMessage> {
    fn push(&mut self, msg: MixerMessage) -> Result<(), MixerMessage> {
        Producer::push(self, msg).map_err(|err| match err {
            rtrb::PushError::Full(msg) => msg,
        })
    }
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<MixerMessage> {
    fn pop(&mut self) -> Option<MixerMessage> {
        Consumer::pop(self).ok()
    }
}

/// Collects messages into a `Vec`. Handy for offline use and tests.
impl MessageSender for Vec<MixerMessage> {
    fn push(&mut self, msg: MixerMessage) -> Result<(), MixerMessage> {
        Vec::push(self, msg);
        Ok(())
    }
}
