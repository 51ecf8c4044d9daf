//! Self-deleting messages.
//!
//! The adapter posts the countdown text, edits it once per second with the
//! values from `ticks()`, and deletes it when the countdown reaches zero.

use std::time::Duration;

/// Longest countdown accepted, in seconds.
pub const MAX_SECONDS: u64 = 60;

/// Usage hint shown for malformed requests.
pub fn usage(prefix: &str) -> String {
    format!("❌ Format: {} <seconds 1-{}> <message>", prefix, MAX_SECONDS)
}

/// A validated `!sd <seconds> <text>` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfDestructRequest {
    /// Countdown length, 1..=60.
    pub seconds: u64,
    /// Message body.
    pub text: String,
}

impl SelfDestructRequest {
    /// Parses the arguments after the prefix.
    ///
    /// Returns `None` unless the first word is a count in 1..=60 followed by
    /// a non-empty message.
    pub fn parse(args: &str) -> Option<Self> {
        let args = args.trim_start();
        let (count, text) = args.split_once(char::is_whitespace)?;
        let seconds = count.parse::<u64>().ok().filter(|s| (1..=MAX_SECONDS).contains(s))?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            seconds,
            text: text.to_string(),
        })
    }

    /// Message body with the remaining-time footer.
    pub fn countdown_text(&self, remaining: u64) -> String {
        format!(
            "{}\n\n💣 Self-destructing in {} second{}",
            self.text,
            remaining,
            if remaining == 1 { "" } else { "s" }
        )
    }

    /// Remaining seconds to show after each one-second tick, ending at zero.
    ///
    /// The initial value (`seconds`) is shown when the message is posted.
    pub fn ticks(&self) -> impl Iterator<Item = u64> {
        (0..self.seconds).rev()
    }

    /// Delay between edits.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let req = SelfDestructRequest::parse(" 5 secret plans ").unwrap();
        assert_eq!(req.seconds, 5);
        assert_eq!(req.text, "secret plans");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(SelfDestructRequest::parse("0 hi").is_none());
        assert!(SelfDestructRequest::parse("61 hi").is_none());
        assert!(SelfDestructRequest::parse("abc hi").is_none());
        assert!(SelfDestructRequest::parse("10").is_none());
        assert!(SelfDestructRequest::parse("10   ").is_none());
        assert!(SelfDestructRequest::parse("").is_none());
    }

    #[test]
    fn test_countdown_text_pluralizes() {
        let req = SelfDestructRequest::parse("2 bye").unwrap();
        assert_eq!(req.countdown_text(2), "bye\n\n💣 Self-destructing in 2 seconds");
        assert_eq!(req.countdown_text(1), "bye\n\n💣 Self-destructing in 1 second");
    }

    #[test]
    fn test_ticks_count_down_to_zero() {
        let req = SelfDestructRequest::parse("3 bye").unwrap();
        assert_eq!(req.ticks().collect::<Vec<_>>(), vec![2, 1, 0]);
    }

    #[test]
    fn test_usage_mentions_prefix() {
        assert_eq!(usage("!sd"), "❌ Format: !sd <seconds 1-60> <message>");
    }
}
