//! Mapping Telegram users to player ids.
//!
//! The Bot API cannot resolve an `@username` mention to a numeric user id,
//! so players are identified by lower-cased `@username` whenever they have
//! one and by numeric id otherwise. Senders and mentions go through the
//! same mapping so turn checks compare like with like.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use relay_core::PlayerNames;
use relay_games::PlayerId;
use teloxide::types::{Message, MessageEntityKind, User};

/// Player id for a username/id pair.
pub fn player_id(username: Option<&str>, user_id: u64) -> PlayerId {
    match username.filter(|u| !u.is_empty()) {
        Some(name) => PlayerId::new(format!("@{}", name.trim_start_matches('@').to_lowercase())),
        None => PlayerId::new(user_id.to_string()),
    }
}

/// Player id for a Telegram user.
pub fn user_player_id(user: &User) -> PlayerId {
    player_id(user.username.as_deref(), user.id.0)
}

/// Player id for the text of an `@mention` entity.
pub fn mention_player_id(mention: &str) -> Option<PlayerId> {
    let name = mention.trim().trim_start_matches('@');
    if name.is_empty() {
        return None;
    }
    Some(player_id(Some(name), 0))
}

/// Users a message points at: `@mentions`, text mentions of users without
/// a username, then the author of the replied-to message.
pub fn mentioned_players(msg: &Message) -> Vec<PlayerId> {
    let mut players = Vec::new();

    if let Some(entities) = msg.parse_entities() {
        for entity in entities {
            let player = match entity.kind() {
                MessageEntityKind::Mention => mention_player_id(entity.text()),
                MessageEntityKind::TextMention { user } => Some(user_player_id(user)),
                _ => None,
            };
            if let Some(p) = player {
                players.push(p);
            }
        }
    }

    if let Some(author) = msg.reply_to_message().and_then(|m| m.from.as_ref()) {
        if !author.is_bot {
            players.push(user_player_id(author));
        }
    }

    players
}

/// Names kept before the oldest entries are forgotten.
pub const DEFAULT_NAME_CAPACITY: usize = 10_000;

#[derive(Debug, Default)]
struct Names {
    by_player: HashMap<PlayerId, String>,
    order: VecDeque<PlayerId>,
}

/// Display names learned from incoming messages.
///
/// Players without a username are stored by numeric id; the book lets the
/// bot show their first name instead. Holds at most `capacity` names and
/// forgets the least recently added first.
#[derive(Debug)]
pub struct NameBook {
    capacity: usize,
    names: RwLock<Names>,
}

impl Default for NameBook {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_NAME_CAPACITY)
    }
}

impl NameBook {
    /// Creates an empty book with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty book holding at most `capacity` names.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            names: RwLock::new(Names::default()),
        }
    }

    /// Records a user's display name.
    pub fn remember(&self, user: &User) {
        if user.username.is_some() {
            return;
        }
        let player = user_player_id(user);
        let Ok(mut names) = self.names.write() else {
            return;
        };

        if names.by_player.insert(player.clone(), user.first_name.clone()).is_none() {
            names.order.push_back(player);
        }
        while names.order.len() > self.capacity {
            if let Some(oldest) = names.order.pop_front() {
                names.by_player.remove(&oldest);
            }
        }
    }

    /// Number of names held.
    pub fn len(&self) -> usize {
        self.names.read().map(|n| n.by_player.len()).unwrap_or(0)
    }

    /// Returns true if no name is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlayerNames for NameBook {
    fn mention(&self, player: &PlayerId) -> String {
        if player.as_str().starts_with('@') {
            return player.to_string();
        }
        self.names
            .read()
            .ok()
            .and_then(|names| names.by_player.get(player).cloned())
            .unwrap_or_else(|| player.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_preferred_and_lowercased() {
        assert_eq!(player_id(Some("Alice"), 7), PlayerId::from("@alice"));
        assert_eq!(player_id(None, 7), PlayerId::from("7"));
        assert_eq!(player_id(Some(""), 7), PlayerId::from("7"));
    }

    #[test]
    fn test_mention_matches_sender_mapping() {
        assert_eq!(mention_player_id("@BoB"), Some(player_id(Some("bob"), 99)));
        assert_eq!(mention_player_id("@"), None);
    }

    fn user(id: u64, first_name: &str, username: Option<&str>) -> User {
        let mut json = serde_json::json!({
            "id": id,
            "is_bot": false,
            "first_name": first_name,
        });
        if let Some(name) = username {
            json["username"] = serde_json::Value::String(name.to_string());
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_name_book() {
        let book = NameBook::new();
        book.remember(&user(42, "Carol", None));
        book.remember(&user(44, "Dave", Some("dave")));

        assert_eq!(book.mention(&PlayerId::from("42")), "Carol");
        assert_eq!(book.mention(&PlayerId::from("43")), "43");
        assert_eq!(book.mention(&PlayerId::from("@dave")), "@dave");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_name_book_forgets_oldest_beyond_capacity() {
        let book = NameBook::with_capacity(2);
        book.remember(&user(1, "One", None));
        book.remember(&user(2, "Two", None));
        book.remember(&user(1, "Uno", None));
        book.remember(&user(3, "Three", None));

        assert_eq!(book.len(), 2);
        assert_eq!(book.mention(&PlayerId::from("1")), "1");
        assert_eq!(book.mention(&PlayerId::from("2")), "Two");
        assert_eq!(book.mention(&PlayerId::from("3")), "Three");
    }
}
