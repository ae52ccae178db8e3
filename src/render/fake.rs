//! In-memory render surfaces for pipeline tests.
//!
//! `FakeSession` serves canned HTML keyed by URL, injects navigation and
//! tab-creation failures on demand, and counts tab and session lifecycle
//! events so tests can assert the disposal discipline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{CrawlError, Result};
use crate::render::{RenderSession, RenderTab};

#[derive(Default)]
pub struct FakeState {
    /// URL to rendered-HTML mapping.
    pub pages: HashMap<String, String>,
    /// URLs whose navigation fails.
    pub failing_urls: Vec<String>,
    /// Refuse all tab creation when set.
    pub refuse_tabs: bool,
    pub tabs_opened: AtomicUsize,
    pub tabs_disposed: AtomicUsize,
    pub session_closes: AtomicUsize,
}

pub struct FakeSession {
    pub state: Arc<FakeState>,
}

impl FakeSession {
    pub fn new(state: FakeState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }
}

impl RenderSession for FakeSession {
    type Tab = FakeTab;

    async fn new_tab(&self) -> Result<FakeTab> {
        if self.state.refuse_tabs {
            return Err(CrawlError::Resource("tab refused".to_string()));
        }
        self.state.tabs_opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeTab {
            state: self.state.clone(),
            current: Mutex::new(None),
        })
    }

    async fn close(&mut self) {
        self.state.session_closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeTab {
    state: Arc<FakeState>,
    current: Mutex<Option<String>>,
}

impl RenderTab for FakeTab {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<()> {
        if self.state.failing_urls.iter().any(|u| u == url) {
            return Err(CrawlError::Navigation {
                url: url.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        if !self.state.pages.contains_key(url) {
            return Err(CrawlError::Navigation {
                url: url.to_string(),
                reason: "no such page".to_string(),
            });
        }
        *self.current.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Option<String> {
        self.current.lock().unwrap().clone()
    }

    async fn html(&self) -> Result<String> {
        let current = self
            .current
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CrawlError::Extraction("no page loaded".to_string()))?;
        Ok(self.state.pages.get(&current).cloned().unwrap_or_default())
    }

    async fn dispose(self) {
        self.state.tabs_disposed.fetch_add(1, Ordering::SeqCst);
    }
}
