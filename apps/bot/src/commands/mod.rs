//! Inbound command parsing and dispatch

mod router;

pub use router::Router;

/// One parsed inbound message
///
/// Slash commands carry their arguments; the bare words `next`,
/// `previous`, `back` and `download` are navigation keywords (matched
/// case-insensitively); everything else is free text interpreted by the
/// router against the actor's current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    FlipCoin,
    Weather {
        city: Option<String>,
        country_code: Option<String>,
    },
    StartChat,
    StopChat,
    Connect {
        token: String,
    },
    Balaboba {
        text: Option<String>,
    },
    Playlists,
    Cancel,
    Next,
    Previous,
    Back,
    Download,
    Text(String),
}

impl Command {
    /// Parse one inbound message
    ///
    /// Unknown slash commands fall through to `Text` so the router can
    /// echo them rather than erroring.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Some(rest) = input.strip_prefix('/') {
            let mut parts = rest.split_whitespace();
            let name = parts.next().unwrap_or_default();
            let args: Vec<&str> = parts.collect();
            return match name {
                "start" => Command::Start,
                "help" => Command::Help,
                "flip_coin" => Command::FlipCoin,
                "weather" => Command::Weather {
                    city: args.first().map(|s| s.to_string()),
                    country_code: args.get(1).map(|s| s.to_string()),
                },
                "chat" => Command::StartChat,
                "stop_chat" => Command::StopChat,
                "connect" => Command::Connect {
                    token: args.first().copied().unwrap_or_default().to_string(),
                },
                "balaboba" => Command::Balaboba {
                    text: if args.is_empty() {
                        None
                    } else {
                        Some(args.join(" "))
                    },
                },
                "playlists" => Command::Playlists,
                "cancel" => Command::Cancel,
                _ => Command::Text(input.to_string()),
            };
        }

        match input.to_lowercase().as_str() {
            "next" => Command::Next,
            "previous" => Command::Previous,
            "back" => Command::Back,
            "download" => Command::Download,
            _ => Command::Text(input.to_string()),
        }
    }
}
