//! Data models for discovered articles and the aggregated crawl result.
//!
//! This module defines the core data structures used throughout the crawler:
//! - [`NewsItem`]: one article discovered on a topic listing page
//! - [`TopicNews`]: the ordered articles collected for one topic
//! - [`CrawlReport`]: the full run result emitted as JSON
//!
//! A [`NewsItem`] starts life with only a title and a link, as extracted from
//! the listing page. The topic pipeline attaches `content` after the article
//! page has been fetched and its text extracted; items whose fetch fails are
//! dropped rather than kept as partial records.

use serde::{Deserialize, Serialize};

/// One article discovered on a topic listing page.
///
/// # Fields
///
/// * `title` - The headline text, trimmed, never empty
/// * `detail_url` - The article link; relative as extracted, absolute once
///   the topic pipeline has resolved it against the listing page's URL
/// * `content` - The article's text, present only after a successful fetch
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsItem {
    /// The headline shown on the listing page.
    pub title: String,
    /// The link target for the full article.
    pub detail_url: String,
    /// The extracted article text, populated by the topic pipeline.
    pub content: Option<String>,
}

impl NewsItem {
    /// Create an item as extracted from a listing page, with no content yet.
    pub fn new(title: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail_url: detail_url.into(),
            content: None,
        }
    }
}

/// The ordered articles collected for a single topic.
///
/// One entry exists per configured topic, in configuration order, even when
/// the topic produced no articles.
#[derive(Debug, Deserialize, Serialize)]
pub struct TopicNews {
    /// The topic identifier from the configuration.
    pub topic: String,
    /// Successfully fetched articles, in listing order.
    pub items: Vec<NewsItem>,
}

/// The full result of one crawl run.
///
/// Serialized to JSON on stdout at the end of a run. The date and time
/// stamps record when the run finished locally.
#[derive(Debug, Deserialize, Serialize)]
pub struct CrawlReport {
    /// The run date in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time the report was produced.
    pub local_time: String,
    /// Per-topic results, in configuration order.
    pub topics: Vec<TopicNews>,
}
