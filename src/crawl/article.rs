//! Single-article fetching.
//!
//! Each article gets its own tab: opened here, navigated with the page-load
//! timeout, and disposed before this module returns, whether the fetch
//! succeeded or not. Any failure along the way is wrapped in
//! [`CrawlError::ArticleFetch`] so the topic pipeline can log it and skip
//! the item without aborting the crawl.

use std::time::Duration;

use tracing::{instrument, warn};

use crate::crawl::listing;
use crate::errors::{CrawlError, Result};
use crate::render::{RenderSession, RenderTab};

/// Fetch one article and return its extracted text.
///
/// The text is the concatenation of all fragments matching
/// `content_selector`, in document order, joined by newlines. An article
/// whose selector matches nothing yields an empty string rather than an
/// error.
///
/// # Errors
///
/// Returns [`CrawlError::ArticleFetch`] wrapping the underlying navigation
/// or extraction failure.
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn fetch_article<S: RenderSession>(
    session: &S,
    url: &str,
    content_selector: &str,
    timeout: Duration,
) -> Result<String> {
    let tab = session
        .new_tab()
        .await
        .map_err(|e| CrawlError::article(url, e))?;

    // The tab is disposed on every exit path; only then is the outcome
    // inspected.
    let outcome = fetch_rendered_content(&tab, url, content_selector, timeout).await;
    tab.dispose().await;

    outcome.map_err(|e| CrawlError::article(url, e))
}

async fn fetch_rendered_content<T: RenderTab>(
    tab: &T,
    url: &str,
    content_selector: &str,
    timeout: Duration,
) -> Result<String> {
    tab.navigate(url, timeout).await?;
    let html = tab.html().await?;
    let fragments = listing::extract_fragments(&html, content_selector)?;
    if fragments.is_empty() {
        warn!(%url, "article content selector matched nothing");
    }
    Ok(fragments.join("\n"))
}
