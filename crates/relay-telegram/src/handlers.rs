//! Command and message handlers for the Telegram bot.

use std::sync::Arc;

use relay_core::command::{self, RelayCommand};
use relay_core::self_destruct::{self, SelfDestructRequest};
use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::state::TelegramState;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and get help")]
    Start,

    #[command(description = "Show help message")]
    Help,
}

/// Overview of the `!` commands.
pub fn help_text(state: &TelegramState) -> String {
    let settings = state.settings();
    format!(
        "{}\n\n💣 Self-destructing messages:\n• {} <seconds 1-{}> <message>",
        state.games().presenter().help(),
        settings.self_destruct_prefix,
        self_destruct::MAX_SECONDS,
    )
}

/// Handle a slash command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<TelegramState>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(
                msg.chat.id,
                format!("Welcome to the relay bot! 🎮\n\n{}", help_text(&state)),
            )
            .await?;
            info!(
                chat_id = %msg.chat.id,
                user = ?msg.from.as_ref().map(|u| &u.username),
                "User started bot"
            );
        }
        Command::Help => {
            let text = format!("{}\n\n{}", Command::descriptions(), help_text(&state));
            bot.send_message(msg.chat.id, text).await?;
        }
    }
    Ok(())
}

/// Handle a plain text message; only `!` commands get a reply.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    state: Arc<TelegramState>,
) -> ResponseResult<()> {
    let Some(inbound) = state.inbound(&msg) else {
        return Ok(());
    };
    let Some(cmd) = command::parse(&inbound.text, state.settings()) else {
        return Ok(());
    };

    debug!(chat_id = %msg.chat.id, actor = %inbound.actor, command = ?cmd, "relay command");

    match cmd {
        RelayCommand::Game(game_cmd) => {
            for reply in state.games().handle(&inbound, game_cmd) {
                bot.send_message(msg.chat.id, reply).await?;
            }
        }
        RelayCommand::SelfDestruct(request) => {
            start_self_destruct(bot, msg.chat.id, msg.id, request).await?;
        }
        RelayCommand::SelfDestructUsage => {
            bot.send_message(
                msg.chat.id,
                self_destruct::usage(&state.settings().self_destruct_prefix),
            )
            .await?;
        }
        RelayCommand::Help => {
            bot.send_message(msg.chat.id, help_text(&state)).await?;
        }
    }

    Ok(())
}

/// Post the countdown message and spawn the task that edits and deletes it.
async fn start_self_destruct(
    bot: Bot,
    chat_id: ChatId,
    command_id: MessageId,
    request: SelfDestructRequest,
) -> ResponseResult<()> {
    let sent = bot
        .send_message(chat_id, request.countdown_text(request.seconds))
        .await?;

    // Deleting the command only works with admin rights in groups.
    if let Err(e) = bot.delete_message(chat_id, command_id).await {
        debug!(chat_id = %chat_id, error = %e, "could not delete self-destruct command");
    }

    info!(chat_id = %chat_id, seconds = request.seconds, "self-destruct armed");
    tokio::spawn(run_countdown(bot, chat_id, sent.id, request));
    Ok(())
}

async fn run_countdown(bot: Bot, chat_id: ChatId, message_id: MessageId, request: SelfDestructRequest) {
    for remaining in request.ticks() {
        tokio::time::sleep(request.tick_interval()).await;

        if remaining == 0 {
            match bot.delete_message(chat_id, message_id).await {
                Ok(_) => debug!(chat_id = %chat_id, "self-destruct message deleted"),
                Err(e) => warn!(chat_id = %chat_id, error = %e, "failed to delete self-destruct message"),
            }
            return;
        }

        if let Err(e) = bot
            .edit_message_text(chat_id, message_id, request.countdown_text(remaining))
            .await
        {
            // Deleted by someone else, or the chat went away.
            warn!(chat_id = %chat_id, error = %e, "stopping self-destruct countdown");
            return;
        }
    }
}
