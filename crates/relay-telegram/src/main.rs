//! Relay Telegram bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p relay-telegram
//! ```

use clap::Parser;
use relay_core::config;
use relay_telegram::TelegramBot;
use tracing_subscriber::EnvFilter;

/// Relay Telegram Bot - games and self-destructing messages
#[derive(Parser, Debug)]
#[command(name = "relay-telegram")]
#[command(about = "Telegram side of the chat relay")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = config::load_env();

    let filter = match args.verbose {
        0 => "relay_telegram=info,relay_core=info,relay_games=info,teloxide=warn",
        1 => "relay_telegram=debug,relay_core=debug,relay_games=debug,teloxide=info",
        2 => "relay_telegram=trace,relay_core=trace,relay_games=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    for path in &loaded {
        tracing::debug!(path = %path.display(), "environment file loaded");
    }
    if let Err(e) = config::ensure_dirs() {
        tracing::warn!(error = %e, "Failed to create relay directories");
    }

    let mut bot = TelegramBot::from_env()?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n[robot] Relay Telegram Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\n   Press Ctrl+C to stop\n");

    bot.start_polling().await?;

    Ok(())
}
