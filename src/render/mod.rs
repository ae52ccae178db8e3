//! The rendered-browser capability consumed by the crawl pipeline.
//!
//! The pipeline never talks to a browser engine directly. It goes through
//! two small traits:
//!
//! - [`RenderSession`]: one live browser session that can spawn isolated
//!   tabs and must be closed when the crawl ends.
//! - [`RenderTab`]: one isolated navigation context, used to load exactly
//!   one page and capture its rendered document.
//!
//! The production implementation is [`chrome::ChromeSession`], backed by
//! chromiumoxide over the Chrome DevTools Protocol. Tests substitute
//! in-memory fakes.
//!
//! # Ownership
//!
//! A tab is exclusively owned by the operation that opened it and must be
//! disposed by that same operation before it returns, on every exit path.
//! [`RenderTab::dispose`] consumes the tab so a disposed tab cannot be
//! reused. A session is owned by the crawl orchestrator for the run's
//! duration; [`RenderSession::close`] is idempotent.

pub mod chrome;

#[cfg(test)]
pub mod fake;

use std::time::Duration;

use crate::errors::Result;

pub use chrome::ChromeSession;

/// One live browser session capable of spawning isolated tabs.
pub trait RenderSession {
    /// The tab type this session produces.
    type Tab: RenderTab;

    /// Open a new isolated tab with the session's request identity applied.
    async fn new_tab(&self) -> Result<Self::Tab>;

    /// Release the underlying browser resource. Idempotent; safe to call on
    /// an already-closed session.
    async fn close(&mut self);
}

/// One isolated navigation context within a session.
pub trait RenderTab {
    /// Drive the tab to `url` and wait until network activity has settled,
    /// bounded by `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

    /// The URL the tab currently reports, if any. Used to resolve relative
    /// links against the page that published them.
    async fn current_url(&self) -> Option<String>;

    /// Capture the rendered document.
    async fn html(&self) -> Result<String>;

    /// Close the tab. Never fails; close errors are logged and swallowed so
    /// disposal is safe on every exit path.
    async fn dispose(self);
}
