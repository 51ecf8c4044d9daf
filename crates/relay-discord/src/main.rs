//! Relay Discord bot binary.

use clap::Parser;
use relay_core::config;
use relay_discord::DiscordBot;
use tracing_subscriber::EnvFilter;

/// Relay Discord Bot - games and self-destructing messages
#[derive(Parser, Debug)]
#[command(name = "relay-discord")]
#[command(about = "Discord side of the chat relay")]
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
        0 => "relay_discord=info,relay_core=info,relay_games=info,serenity=warn",
        1 => "relay_discord=debug,relay_core=debug,relay_games=debug,serenity=info",
        2 => "relay_discord=trace,relay_core=trace,relay_games=trace,serenity=debug",
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

    let bot = DiscordBot::from_env()?;

    println!("\n[robot] Relay Discord Bot");
    println!("   Press Ctrl+C to stop\n");

    bot.run().await?;

    Ok(())
}
