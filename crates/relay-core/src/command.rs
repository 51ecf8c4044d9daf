//! Message text to command parsing.

use std::sync::LazyLock;

use regex::Regex;
use relay_games::GameKind;

use crate::config::Settings;
use crate::self_destruct::SelfDestructRequest;

/// A `!game` sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    /// `!game ttt @user` / `!game c4 @user`; the opponent comes from the
    /// message's mentions.
    Start(GameKind),
    /// `!game play <n>` with the raw move token.
    Play(String),
    /// `!game status`: show the room's board.
    Status,
    /// `!game end`.
    End,
    /// `!game`, `!game help` or an unknown sub-command.
    Help,
}

/// Anything the relay reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    Game(GameCommand),
    SelfDestruct(SelfDestructRequest),
    /// `!sd` with arguments that do not parse.
    SelfDestructUsage,
    Help,
}

/// Game names accepted after the prefix; group 1 is Tic-Tac-Toe, group 2 Connect Four.
static GAME_KIND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:(ttt|tictactoe|tic-tac-toe)|(c4|connect4|connectfour|connect-four))$")
        .expect("Invalid game kind regex")
});

fn parse_game_kind(word: &str) -> Option<GameKind> {
    let caps = GAME_KIND_REGEX.captures(word)?;
    if caps.get(1).is_some() {
        Some(GameKind::TicTacToe)
    } else {
        Some(GameKind::ConnectFour)
    }
}

/// Strips `prefix` when it is the whole first word of `text`.
fn strip_command<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = &text[prefix.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Parses message text. Returns `None` for text the relay ignores.
pub fn parse(text: &str, settings: &Settings) -> Option<RelayCommand> {
    let text = text.trim();

    if let Some(args) = strip_command(text, &settings.game_prefix) {
        return Some(RelayCommand::Game(parse_game(args)));
    }

    if let Some(args) = strip_command(text, &settings.self_destruct_prefix) {
        return Some(match SelfDestructRequest::parse(args) {
            Some(req) => RelayCommand::SelfDestruct(req),
            None => RelayCommand::SelfDestructUsage,
        });
    }

    if strip_command(text, &settings.help_prefix).is_some() {
        return Some(RelayCommand::Help);
    }

    None
}

fn parse_game(args: &str) -> GameCommand {
    let mut words = args.split_whitespace();
    let Some(sub) = words.next() else {
        return GameCommand::Help;
    };

    if let Some(kind) = parse_game_kind(sub) {
        return GameCommand::Start(kind);
    }

    match sub.to_ascii_lowercase().as_str() {
        "play" | "move" => GameCommand::Play(words.next().unwrap_or_default().to_string()),
        "status" | "board" => GameCommand::Status,
        "end" | "quit" | "stop" => GameCommand::End,
        _ => GameCommand::Help,
    }
}
