//! Music browsing navigator
//!
//! A stack-based, paginated navigation state machine. Each stack entry is
//! a [`Frame`] (the actor's playlists, one playlist, a track list, or one
//! track); a single [`PageCursor`] applies to whatever frame is current.
//! The [`Navigator`] is pure and never suspends; the per-actor
//! [`BrowserSession`] couples it with the catalog client for the
//! operations that need remote data.

mod frame;
mod navigator;
mod session;

pub use frame::{BrowseMode, Frame, Titled};
pub use navigator::{find_by_title, Navigator, PageCursor};
pub use session::{BrowserSession, PageItems};
