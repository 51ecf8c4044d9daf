//! Telegram message translation into relay commands.

use relay_core::command::{self, GameCommand, RelayCommand};
use relay_core::Settings;
use relay_games::{GameKind, PlayerId};
use relay_telegram::TelegramState;
use teloxide::types::Message;

fn message(from_id: u64, username: Option<&str>, text: &str, entities: serde_json::Value) -> Message {
    let mut from = serde_json::json!({
        "id": from_id,
        "is_bot": false,
        "first_name": "Tester",
    });
    if let Some(name) = username {
        from["username"] = serde_json::Value::String(name.to_string());
    }

    serde_json::from_value(serde_json::json!({
        "message_id": 1,
        "date": 1_700_000_000,
        "chat": { "id": -100, "type": "group", "title": "games" },
        "from": from,
        "text": text,
        "entities": entities,
    }))
    .unwrap()
}

#[test]
fn test_mention_becomes_opponent() {
    let state = TelegramState::new(Settings::default());
    let msg = message(
        7,
        Some("Alice"),
        "!game ttt @Bob",
        serde_json::json!([{ "type": "mention", "offset": 10, "length": 4 }]),
    );

    let inbound = state.inbound(&msg).unwrap();
    assert_eq!(inbound.room.as_str(), "-100");
    assert_eq!(inbound.actor, PlayerId::from("@alice"));
    assert_eq!(inbound.mentions, vec![PlayerId::from("@bob")]);
    assert_eq!(inbound.opponent(), Some(&PlayerId::from("@bob")));

    let cmd = command::parse(&inbound.text, state.settings()).unwrap();
    assert_eq!(cmd, RelayCommand::Game(GameCommand::Start(GameKind::TicTacToe)));

    let RelayCommand::Game(game_cmd) = cmd else {
        unreachable!()
    };
    let replies = state.games().handle(&inbound, game_cmd);
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("Player 2 (⭕): @bob"));
}

#[test]
fn test_users_without_username_use_numeric_id() {
    let state = TelegramState::new(Settings::default());
    let msg = message(12345, None, "!game play 5", serde_json::json!([]));

    let inbound = state.inbound(&msg).unwrap();
    assert_eq!(inbound.actor, PlayerId::from("12345"));
    assert!(inbound.mentions.is_empty());
}
