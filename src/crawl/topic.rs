//! Per-topic crawl pipeline.
//!
//! For one topic this module renders the listing page, extracts its
//! headline/link pairs, then walks the articles strictly in listing order.
//! Article failures are logged and skipped; the pacing delay elapses after
//! every article, the last one included, so consecutive fetches against the
//! site are always separated by at least the configured interval.
//!
//! A failure while loading or extracting the listing itself is fatal for
//! the topic and propagates as [`CrawlError::TopicFetch`].

use tokio::time::sleep;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::CrawlConfig;
use crate::crawl::{article, listing};
use crate::errors::{CrawlError, Result};
use crate::models::NewsItem;
use crate::render::{RenderSession, RenderTab};
use crate::utils::truncate_for_log;

/// Crawl one topic and return its successfully fetched articles.
///
/// # Errors
///
/// Returns [`CrawlError::TopicFetch`] when the listing page cannot be
/// loaded or its structure does not match the configured selectors.
/// Individual article failures never surface here; those items are simply
/// absent from the result.
#[instrument(level = "info", skip_all, fields(%topic))]
pub async fn crawl_topic<S: RenderSession>(
    session: &S,
    topic: &str,
    config: &CrawlConfig,
) -> Result<Vec<NewsItem>> {
    let listing_url = config.topic_url(topic);
    info!(url = %listing_url, "crawling topic listing");

    let tab = session
        .new_tab()
        .await
        .map_err(|e| CrawlError::topic(topic, e))?;
    let extracted = load_listing(&tab, &listing_url, config).await;
    let reported_url = tab.current_url().await;
    tab.dispose().await;

    let discovered = extracted.map_err(|e| CrawlError::topic(topic, e))?;
    info!(count = discovered.len(), "discovered listing items");

    // Relative article links resolve against the page that published them,
    // which may differ from the configured base after redirects.
    let resolve_base = reported_url
        .and_then(|u| Url::parse(&u).ok())
        .or_else(|| Url::parse(&listing_url).ok());

    let total = discovered.len();
    let mut collected = Vec::new();
    for item in discovered {
        match resolve_detail_url(resolve_base.as_ref(), &item.detail_url) {
            Some(article_url) => {
                match article::fetch_article(
                    session,
                    &article_url,
                    &config.selectors.article_content,
                    config.pacing.page_load_timeout(),
                )
                .await
                {
                    Ok(content) => {
                        info!(
                            title = %item.title,
                            url = %article_url,
                            bytes = content.len(),
                            "fetched article"
                        );
                        debug!(preview = %truncate_for_log(&content, 200), "article content");
                        collected.push(NewsItem {
                            title: item.title,
                            detail_url: article_url,
                            content: Some(content),
                        });
                    }
                    Err(e) => {
                        error!(title = %item.title, url = %article_url, error = %e, "skipping article");
                    }
                }
            }
            None => {
                error!(title = %item.title, href = %item.detail_url, "could not resolve article link; skipping");
            }
        }
        sleep(config.pacing.between_articles()).await;
    }

    info!(fetched = collected.len(), discovered = total, "topic complete");
    Ok(collected)
}

async fn load_listing<T: RenderTab>(
    tab: &T,
    listing_url: &str,
    config: &CrawlConfig,
) -> Result<Vec<NewsItem>> {
    tab.navigate(listing_url, config.pacing.page_load_timeout())
        .await?;
    let html = tab.html().await?;
    listing::extract_listing(
        &html,
        &config.selectors.listing_item,
        &config.selectors.item_link,
    )
}

fn resolve_detail_url(base: Option<&Url>, href: &str) -> Option<String> {
    match base {
        Some(base) => base.join(href).ok().map(|u| u.to_string()),
        None => Url::parse(href).ok().map(|u| u.to_string()),
    }
}
