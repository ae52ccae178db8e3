//! chromiumoxide-backed browser session.
//!
//! Launches a local Chrome/Chromium over the DevTools Protocol, drains its
//! event stream on a background task, and hands out isolated pages as
//! [`ChromeTab`]s. Each tab gets the configured user agent applied before
//! its first navigation.
//!
//! Navigation waits for network quiescence in three steps, all bounded by
//! the caller's timeout: the navigation command itself, a document-ready
//! poll inside the page, and a short settle delay for late-loading
//! requests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BrowserSettings;
use crate::errors::{CrawlError, Result};
use crate::render::{RenderSession, RenderTab};

/// Well-known Chrome/Chromium install locations.
const CHROME_PATHS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

/// JavaScript that resolves once the document has finished parsing.
const PAGE_READY_SCRIPT: &str = r#"
    new Promise((resolve) => {
        if (document.readyState === 'complete' || document.readyState === 'interactive') {
            resolve(document.readyState);
        } else {
            document.addEventListener('DOMContentLoaded', () => resolve(document.readyState));
            setTimeout(() => resolve('timeout'), 10000);
        }
    })
"#;

/// Settle delay after document ready, for stragglers like XHR-rendered text.
const QUIESCENT_SETTLE: Duration = Duration::from_millis(500);

/// A live Chrome session.
///
/// Owns the browser process and the task draining its CDP event stream.
/// [`RenderSession::close`] is idempotent; the internal browser handle is
/// taken on first close.
pub struct ChromeSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
    user_agent: String,
}

impl ChromeSession {
    /// Launch a browser process and connect to it.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::Initialization`] when no executable can be
    /// found or the browser fails to start.
    pub async fn launch(settings: &BrowserSettings, user_agent: &str) -> Result<Self> {
        let executable = match &settings.chrome_executable {
            Some(path) => path.clone(),
            None => find_chrome()?,
        };
        info!(
            chrome = %executable.display(),
            headless = settings.headless,
            "launching browser session"
        );

        let mut builder = BrowserConfig::builder().chrome_executable(executable);
        if !settings.headless {
            builder = builder.with_head();
        }
        builder = builder
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-background-networking")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--disable-gpu");
        for arg in &settings.chrome_args {
            builder = builder.arg(arg);
        }
        let config = builder.build().map_err(CrawlError::Initialization)?;

        let (browser, mut cdp_events) = Browser::launch(config)
            .await
            .map_err(|e| CrawlError::Initialization(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = cdp_events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser: Some(browser),
            handler: Some(handler),
            user_agent: user_agent.to_string(),
        })
    }
}

impl RenderSession for ChromeSession {
    type Tab = ChromeTab;

    async fn new_tab(&self) -> Result<ChromeTab> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| CrawlError::Resource("session is closed".to_string()))?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CrawlError::Resource(e.to_string()))?;

        // Identity must be in place before the first real navigation.
        page.execute(SetUserAgentOverrideParams::new(self.user_agent.clone()))
            .await
            .map_err(|e| CrawlError::Resource(e.to_string()))?;

        Ok(ChromeTab { page })
    }

    async fn close(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!(error = %e, "browser did not close cleanly");
            }
            if let Err(e) = browser.wait().await {
                debug!(error = %e, "browser process already gone");
            }
            info!("browser session closed");
        }
        if let Some(handle) = self.handler.take() {
            handle.abort();
        }
    }
}

/// One isolated Chrome page.
pub struct ChromeTab {
    page: Page,
}

impl RenderTab for ChromeTab {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        debug!(%url, "navigating");
        let params = NavigateParams::builder()
            .url(url)
            .build()
            .map_err(|reason| CrawlError::Navigation {
                url: url.to_string(),
                reason,
            })?;

        tokio::time::timeout(timeout, self.page.execute(params))
            .await
            .map_err(|_| CrawlError::Navigation {
                url: url.to_string(),
                reason: format!("timed out after {}s", timeout.as_secs()),
            })?
            .map_err(|e| CrawlError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        wait_for_quiescence(&self.page, timeout).await;
        Ok(())
    }

    async fn current_url(&self) -> Option<String> {
        match self.page.url().await {
            Ok(url) => url.map(|u| u.to_string()),
            Err(e) => {
                debug!(error = %e, "could not read current URL");
                None
            }
        }
    }

    async fn html(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| CrawlError::Extraction(format!("failed to capture rendered document: {e}")))
    }

    async fn dispose(self) {
        if let Err(e) = self.page.close().await {
            debug!(error = %e, "tab close failed");
        }
    }
}

/// Wait until the page looks quiet: document ready plus a settle delay.
///
/// Ready-state failures are tolerated; a page that never reports ready
/// still gets captured with whatever rendered in time.
async fn wait_for_quiescence(page: &Page, timeout: Duration) {
    match tokio::time::timeout(timeout, page.evaluate(PAGE_READY_SCRIPT.to_string())).await {
        Ok(Ok(result)) => {
            let state: String = result
                .into_value()
                .unwrap_or_else(|_| "unknown".to_string());
            debug!(%state, "document ready");
        }
        Ok(Err(e)) => debug!(error = %e, "ready-state check failed"),
        Err(_) => warn!("timed out waiting for document ready state"),
    }
    tokio::time::sleep(QUIESCENT_SETTLE).await;
}

/// Locate a Chrome/Chromium executable.
fn find_chrome() -> Result<PathBuf> {
    for path in CHROME_PATHS {
        let candidate = Path::new(path);
        if candidate.exists() {
            info!(chrome = %path, "found Chrome");
            return Ok(candidate.to_path_buf());
        }
    }

    for name in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
    ] {
        if let Ok(output) = std::process::Command::new("which").arg(name).output() {
            if output.status.success() {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    info!(chrome = %found, "found Chrome in PATH");
                    return Ok(PathBuf::from(found));
                }
            }
        }
    }

    Err(CrawlError::Initialization(
        "no Chrome or Chromium executable found; install one or set browser.chrome_executable"
            .to_string(),
    ))
}
