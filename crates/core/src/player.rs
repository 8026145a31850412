//! Shared player state and the actions that mutate it.
//!
//! The player has two states, playing and paused, switched only by the
//! `play` and `pause` actions. `seek` moves the position without touching
//! the playing flag.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::CoreError;
use crate::types::EpochMillis;

/// Track metadata shown by both clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub cover_url: String,
    pub duration_ms: u64,
}

impl Song {
    /// Fixed track every new room starts with.
    pub fn placeholder() -> Self {
        Self {
            title: "Midnight City".into(),
            artist: "M83".into(),
            cover_url: "https://placeholder.com/cover.jpg".into(),
            duration_ms: 243_000,
        }
    }
}

/// Playback state of a room, serialized as the `playerState` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub is_playing: bool,
    /// Playback position in milliseconds, kept as the number the client sent.
    pub position_ms: Number,
    pub current_song: Song,
    /// Display name of the user behind the last successful action.
    pub last_action_source: String,
    pub updated_at: EpochMillis,
}

impl PlayerState {
    /// Paused at position 0 on the placeholder track.
    pub fn new(now: EpochMillis) -> Self {
        Self {
            is_playing: false,
            position_ms: Number::from(0u64),
            current_song: Song::placeholder(),
            last_action_source: String::new(),
            updated_at: now,
        }
    }

    /// Apply an already validated action on behalf of `source`.
    pub fn apply(&mut self, action: PlayerAction, source: &str, now: EpochMillis) {
        match action {
            PlayerAction::Play => self.is_playing = true,
            PlayerAction::Pause => self.is_playing = false,
            PlayerAction::Seek { position_ms } => self.position_ms = position_ms,
        }
        self.last_action_source = source.to_string();
        self.updated_at = now;
    }
}

/// A validated player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Play,
    Pause,
    Seek { position_ms: Number },
}

impl PlayerAction {
    /// Parse the `action` name and, for `seek`, the raw `positionMs` value.
    ///
    /// The position must be a JSON number that is non-negative. It is stored
    /// unchanged, fractions included.
    pub fn parse(action: &str, position_ms: Option<&Value>) -> Result<Self, CoreError> {
        match action {
            "play" => Ok(PlayerAction::Play),
            "pause" => Ok(PlayerAction::Pause),
            "seek" => parse_position(position_ms)
                .map(|position_ms| PlayerAction::Seek { position_ms })
                .ok_or_else(|| {
                    CoreError::Validation(
                        "Valid non-negative positionMs is required for seek action".into(),
                    )
                }),
            _ => Err(CoreError::Validation("Unsupported action".into())),
        }
    }
}

fn parse_position(value: Option<&Value>) -> Option<Number> {
    let Value::Number(number) = value? else {
        return None;
    };
    let ms = number.as_f64()?;
    (ms.is_finite() && ms >= 0.0).then(|| number.clone())
}
