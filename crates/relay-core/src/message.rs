//! Platform-neutral inbound messages.

use std::fmt;

use relay_games::{PlayerId, RoomId};

/// Chat platform a message arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Telegram,
    Discord,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Telegram => f.write_str("telegram"),
            Platform::Discord => f.write_str("discord"),
        }
    }
}

/// A chat message after translation at the adapter boundary.
///
/// `room` and `actor` use the adapter's identity scheme; the only
/// requirement is that the same user always maps to the same `PlayerId`,
/// whether they send a message or get mentioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Source platform.
    pub platform: Platform,
    /// Chat or channel the message was posted in.
    pub room: RoomId,
    /// Author.
    pub actor: PlayerId,
    /// Raw message text.
    pub text: String,
    /// Users mentioned by the message, in order of appearance.
    pub mentions: Vec<PlayerId>,
}

impl InboundMessage {
    /// Creates a message without mentions.
    pub fn new(
        platform: Platform,
        room: impl Into<RoomId>,
        actor: impl Into<PlayerId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            room: room.into(),
            actor: actor.into(),
            text: text.into(),
            mentions: Vec::new(),
        }
    }

    /// Adds a mentioned user.
    pub fn with_mention(mut self, player: impl Into<PlayerId>) -> Self {
        self.mentions.push(player.into());
        self
    }

    /// First mentioned user other than the author.
    ///
    /// Falls back to the author when they only mentioned themselves, so the
    /// engine can reject the self-match.
    pub fn opponent(&self) -> Option<&PlayerId> {
        self.mentions
            .iter()
            .find(|p| **p != self.actor)
            .or_else(|| self.mentions.first())
    }
}
