//! Gateway event handler for the Discord bot.

use std::sync::Arc;

use relay_core::command::{self, RelayCommand};
use relay_core::self_destruct::{self, SelfDestructRequest};
use serenity::all::{ChannelId, Context, EditMessage, EventHandler, Http, Message, MessageId, Ready};
use serenity::async_trait;
use tracing::{debug, info, warn};

use crate::state::{inbound, DiscordState};

/// Routes `!` commands from guild channels and DMs.
pub struct Handler {
    state: Arc<DiscordState>,
}

impl Handler {
    pub fn new(state: Arc<DiscordState>) -> Self {
        Self { state }
    }

    fn help_text(&self) -> String {
        format!(
            "{}\n\n💣 Self-destructing messages:\n• {} <seconds 1-{}> <message>",
            self.state.games().presenter().help(),
            self.state.settings().self_destruct_prefix,
            self_destruct::MAX_SECONDS,
        )
    }

    async fn say(&self, ctx: &Context, channel_id: ChannelId, text: String) {
        if let Err(e) = channel_id.say(&ctx.http, text).await {
            warn!(channel_id = %channel_id, error = %e, "failed to send reply");
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Discord bot connected");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let mentions: Vec<u64> = msg
            .mentions
            .iter()
            .filter(|u| !u.bot)
            .map(|u| u.id.get())
            .collect();
        let inbound = inbound(msg.channel_id.get(), msg.author.id.get(), &msg.content, &mentions);

        let Some(cmd) = command::parse(&inbound.text, self.state.settings()) else {
            return;
        };

        debug!(channel_id = %msg.channel_id, actor = %inbound.actor, command = ?cmd, "relay command");

        match cmd {
            RelayCommand::Game(game_cmd) => {
                for reply in self.state.games().handle(&inbound, game_cmd) {
                    self.say(&ctx, msg.channel_id, reply).await;
                }
            }
            RelayCommand::SelfDestruct(request) => {
                start_self_destruct(&ctx, &msg, request).await;
            }
            RelayCommand::SelfDestructUsage => {
                let usage = self_destruct::usage(&self.state.settings().self_destruct_prefix);
                self.say(&ctx, msg.channel_id, usage).await;
            }
            RelayCommand::Help => {
                self.say(&ctx, msg.channel_id, self.help_text()).await;
            }
        }
    }
}

/// Post the countdown message and spawn the task that edits and deletes it.
async fn start_self_destruct(ctx: &Context, msg: &Message, request: SelfDestructRequest) {
    let sent = match msg
        .channel_id
        .say(&ctx.http, request.countdown_text(request.seconds))
        .await
    {
        Ok(sent) => sent,
        Err(e) => {
            warn!(channel_id = %msg.channel_id, error = %e, "failed to post self-destruct message");
            return;
        }
    };

    // Needs Manage Messages in guild channels.
    if let Err(e) = msg.delete(&ctx.http).await {
        debug!(channel_id = %msg.channel_id, error = %e, "could not delete self-destruct command");
    }

    info!(channel_id = %msg.channel_id, seconds = request.seconds, "self-destruct armed");
    tokio::spawn(run_countdown(Arc::clone(&ctx.http), msg.channel_id, sent.id, request));
}

async fn run_countdown(
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: MessageId,
    request: SelfDestructRequest,
) {
    for remaining in request.ticks() {
        tokio::time::sleep(request.tick_interval()).await;

        if remaining == 0 {
            match channel_id.delete_message(&http, message_id).await {
                Ok(()) => debug!(channel_id = %channel_id, "self-destruct message deleted"),
                Err(e) => warn!(channel_id = %channel_id, error = %e, "failed to delete self-destruct message"),
            }
            return;
        }

        let edit = EditMessage::new().content(request.countdown_text(remaining));
        if let Err(e) = channel_id.edit_message(&http, message_id, edit).await {
            warn!(channel_id = %channel_id, error = %e, "stopping self-destruct countdown");
            return;
        }
    }
}
