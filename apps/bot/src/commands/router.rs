//! Command router
//!
//! Maps parsed commands plus the actor's current mode onto session
//! operations and renders plain-text replies. The router never returns
//! an error to the transport: every failure becomes a friendly reply and
//! a log line.

use std::sync::Arc;

use dashmap::DashSet;
use rand::seq::SliceRandom;
use reprezzent_assistant_client::AssistantClient;
use tracing::{error, info, instrument};

use crate::browser::{BrowseMode, BrowserSession, Frame};
use crate::error::BotError;
use crate::render;
use crate::services::{BalabobaClient, WeatherClient};
use crate::sessions::{ActorId, SessionRegistry};

use super::Command;

const HELP_TEXT: &str = "\
Commands:
/start - start experience
/flip_coin - flip a coin
/weather <city> [country] - current weather
/balaboba <text> - continue your text with generated nonsense
/chat - start an assistant dialog
/stop_chat - stop the assistant dialog
/connect <token> - bind your music catalog token
/playlists - browse your playlists
/cancel - cancel any browsing or dialog
/help - this list

While browsing, send a title to open it, and use the words
next / previous / back / download.";

const COIN_SIDES: &[&str] = &["eagle", "tails"];

/// Routes inbound messages to the right component per actor
pub struct Router {
    sessions: SessionRegistry,
    assistant: Option<AssistantClient>,
    weather: Option<WeatherClient>,
    balaboba: Option<BalabobaClient>,
    chatting: DashSet<ActorId>,
}

impl Router {
    pub fn new(
        sessions: SessionRegistry,
        assistant: Option<AssistantClient>,
        weather: Option<WeatherClient>,
        balaboba: Option<BalabobaClient>,
    ) -> Self {
        Self {
            sessions,
            assistant,
            weather,
            balaboba,
            chatting: DashSet::new(),
        }
    }

    /// The session registry backing this router
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Handle one inbound message and produce the reply text
    ///
    /// Never fails; remote errors are logged and turned into short
    /// user-facing messages.
    #[instrument(skip(self, input))]
    pub async fn dispatch(&self, actor: ActorId, input: &str) -> String {
        match Command::parse(input) {
            Command::Start => "Hello there! I am reprezzent bot".to_string(),
            Command::Help => HELP_TEXT.to_string(),
            Command::FlipCoin => {
                let side = COIN_SIDES
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or("eagle");
                format!("I guess it is: {}", side)
            }
            Command::Weather { city, country_code } => {
                self.handle_weather(city, country_code).await
            }
            Command::StartChat => self.handle_start_chat(actor),
            Command::StopChat => self.handle_stop_chat(actor),
            Command::Connect { token } => self.handle_connect(actor, &token),
            Command::Balaboba { text } => self.handle_balaboba(text).await,
            Command::Playlists => self.handle_playlists(actor).await,
            Command::Cancel => self.handle_cancel(actor),
            Command::Next => self.handle_next(actor).await,
            Command::Previous => self.handle_previous(actor).await,
            Command::Back => self.handle_back(actor).await,
            Command::Download => self.handle_download(actor).await,
            Command::Text(text) => self.handle_text(actor, &text).await,
        }
    }

    fn session(&self, actor: ActorId) -> Result<Arc<BrowserSession>, BotError> {
        self.sessions.get(actor).ok_or(BotError::NotConnected)
    }

    async fn handle_weather(
        &self,
        city: Option<String>,
        country_code: Option<String>,
    ) -> String {
        let Some(weather) = &self.weather else {
            return "Weather is not configured on this bot.".to_string();
        };
        let Some(city) = city else {
            return "Usage: /weather <city> [country code]".to_string();
        };
        match weather.current_weather(&city, country_code.as_deref()).await {
            Ok(report) => report.render(),
            Err(e) => {
                error!(error = %e, city, "weather lookup failed");
                BotError::Weather(e).user_message()
            }
        }
    }

    async fn handle_balaboba(&self, text: Option<String>) -> String {
        let Some(balaboba) = &self.balaboba else {
            return "Text generation is not configured on this bot.".to_string();
        };
        let Some(text) = text else {
            return "Usage: /balaboba <text>".to_string();
        };
        match balaboba.generate(&text).await {
            Ok(generated) => format!("Generated trash:\n{}{}", text, generated.trim_end()),
            Err(e) => {
                error!(error = %e, "text generation failed");
                BotError::Balaboba(e).user_message()
            }
        }
    }

    fn handle_start_chat(&self, actor: ActorId) -> String {
        if self.assistant.is_none() {
            return "The assistant is not configured on this bot.".to_string();
        }
        self.chatting.insert(actor);
        "Assistant dialog activated. Send /stop_chat to end it.".to_string()
    }

    fn handle_stop_chat(&self, actor: ActorId) -> String {
        if self.chatting.remove(&actor).is_some() {
            "Assistant dialog deactivated.".to_string()
        } else {
            "No assistant dialog is active.".to_string()
        }
    }

    fn handle_connect(&self, actor: ActorId, token: &str) -> String {
        if token.is_empty() {
            return "Usage: /connect <catalog token>".to_string();
        }
        match self.sessions.bind(actor, token) {
            Ok(_) => "Connected to the music catalog. Try /playlists.".to_string(),
            Err(e) => {
                error!(error = %e, actor, "failed to bind catalog session");
                BotError::Catalog(e).user_message()
            }
        }
    }

    async fn handle_playlists(&self, actor: ActorId) -> String {
        let session = match self.session(actor) {
            Ok(session) => session,
            Err(e) => return e.user_message(),
        };
        match session.open_playlists().await {
            Ok(Some(page)) if !page.is_empty() => {
                format!(
                    "Here is a list of your playlists:\n{}",
                    render::render_page(&page, session.page_number())
                )
            }
            Ok(Some(_)) => "You have no playlists yet.".to_string(),
            Ok(None) => "Browsing was cancelled.".to_string(),
            Err(e) => {
                error!(error = %e, actor, "failed to fetch playlists");
                BotError::Catalog(e).user_message()
            }
        }
    }

    fn handle_cancel(&self, actor: ActorId) -> String {
        self.chatting.remove(&actor);
        if let Some(session) = self.sessions.get(actor) {
            session.cancel();
        }
        info!(actor, "cancelled all state");
        "Cancelled.".to_string()
    }

    async fn handle_next(&self, actor: ActorId) -> String {
        let session = match self.session(actor) {
            Ok(session) => session,
            Err(e) => return e.user_message(),
        };
        match session.page_forward().await {
            Ok(Some(page)) => render::render_page(&page, session.page_number()),
            Ok(None) if !session.is_browsing() => {
                "Nothing is open. Try /playlists first.".to_string()
            }
            Ok(None) => "Already at the last page.".to_string(),
            Err(e) => {
                error!(error = %e, actor, "page forward failed");
                BotError::Catalog(e).user_message()
            }
        }
    }

    async fn handle_previous(&self, actor: ActorId) -> String {
        let session = match self.session(actor) {
            Ok(session) => session,
            Err(e) => return e.user_message(),
        };
        match session.page_back().await {
            Ok(Some(page)) => render::render_page(&page, session.page_number()),
            Ok(None) if !session.is_browsing() => {
                "Nothing is open. Try /playlists first.".to_string()
            }
            Ok(None) => "Already at the first page.".to_string(),
            Err(e) => {
                error!(error = %e, actor, "page back failed");
                BotError::Catalog(e).user_message()
            }
        }
    }

    async fn handle_back(&self, actor: ActorId) -> String {
        let session = match self.session(actor) {
            Ok(session) => session,
            Err(e) => return e.user_message(),
        };
        match session.back() {
            None => "Nothing to go back to.".to_string(),
            Some(Frame::Track(track)) => render::render_track_detail(&track),
            Some(_) => match session.current_page().await {
                Ok(Some(page)) => render::render_page(&page, session.page_number()),
                Ok(None) => "Nothing to show here.".to_string(),
                Err(e) => {
                    error!(error = %e, actor, "page render failed");
                    BotError::Catalog(e).user_message()
                }
            },
        }
    }

    async fn handle_download(&self, actor: ActorId) -> String {
        let session = match self.session(actor) {
            Ok(session) => session,
            Err(e) => return e.user_message(),
        };
        match session.download_current().await {
            Ok(handles) if handles.is_empty() => {
                "Nothing to download here. Open a playlist or a track first.".to_string()
            }
            Ok(handles) => {
                let fetched = handles.iter().filter(|h| h.freshly_fetched).count();
                format!(
                    "Saved {} file(s) ({} newly fetched).",
                    handles.len(),
                    fetched
                )
            }
            Err(e) => {
                error!(error = %e, actor, "download failed");
                BotError::Catalog(e).user_message()
            }
        }
    }

    async fn handle_text(&self, actor: ActorId, text: &str) -> String {
        if self.chatting.contains(&actor) {
            return self.handle_chat_message(actor, text).await;
        }

        let Some(session) = self.sessions.get(actor) else {
            return Self::no_such_command(text);
        };

        match session.mode() {
            BrowseMode::BrowsingPlaylists => match session.open_playlist_by_title(text) {
                Some(playlist) => format!(
                    "Opened playlist {} ({} tracks). Send next to list its tracks, download to save them.",
                    playlist.title, playlist.track_count
                ),
                None => format!("No playlist named '{}' on this page.", text),
            },
            BrowseMode::ViewingPlaylist => match session.open_track_by_title(text).await {
                Ok(Some(track)) => render::render_track_detail(&track),
                Ok(None) => format!("No track named '{}' on this page.", text),
                Err(e) => {
                    error!(error = %e, actor, "track lookup failed");
                    BotError::Catalog(e).user_message()
                }
            },
            BrowseMode::Idle | BrowseMode::ViewingTrack => Self::no_such_command(text),
        }
    }

    fn no_such_command(text: &str) -> String {
        format!("There is no such command: {}", text)
    }

    async fn handle_chat_message(&self, actor: ActorId, text: &str) -> String {
        let Some(assistant) = &self.assistant else {
            return "The assistant is not configured on this bot.".to_string();
        };
        match assistant.complete(text).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, actor, "assistant completion failed");
                BotError::Assistant(e).user_message()
            }
        }
    }
}
