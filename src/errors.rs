//! Error types for the crawl pipeline.
//!
//! The taxonomy mirrors how failures propagate through a run:
//!
//! - [`CrawlError::Initialization`] and [`CrawlError::Resource`] come from the
//!   browser session itself and are fatal to whichever scope requested the
//!   resource.
//! - [`CrawlError::Navigation`] and [`CrawlError::Extraction`] describe a
//!   single page load or DOM query going wrong.
//! - [`CrawlError::ArticleFetch`] wraps any failure while fetching one
//!   article; the topic pipeline absorbs it, logs it, and skips the item.
//! - [`CrawlError::TopicFetch`] wraps a failure while loading or extracting a
//!   topic listing; it is never absorbed and aborts the remaining crawl.

use thiserror::Error;

/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Main error type for crawl operations.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to start browser session: {0}")]
    Initialization(String),

    #[error("failed to open tab: {0}")]
    Resource(String),

    #[error("navigation failed for {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("article fetch failed for {url}")]
    ArticleFetch {
        url: String,
        #[source]
        source: Box<CrawlError>,
    },

    #[error("topic '{topic}' failed")]
    TopicFetch {
        topic: String,
        #[source]
        source: Box<CrawlError>,
    },
}

impl CrawlError {
    /// Wrap a failure that occurred while fetching a single article.
    pub fn article(url: &str, source: CrawlError) -> Self {
        CrawlError::ArticleFetch {
            url: url.to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap a failure that occurred while loading a topic listing.
    pub fn topic(topic: &str, source: CrawlError) -> Self {
        CrawlError::TopicFetch {
            topic: topic.to_string(),
            source: Box::new(source),
        }
    }
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_article_fetch_wraps_cause() {
        let cause = CrawlError::Navigation {
            url: "https://news.test/a/1".to_string(),
            reason: "timed out".to_string(),
        };
        let err = CrawlError::article("https://news.test/a/1", cause);

        assert!(err.to_string().contains("https://news.test/a/1"));
        let source = err.source().expect("wrapped cause");
        assert!(source.to_string().contains("timed out"));
    }

    #[test]
    fn test_topic_fetch_wraps_extraction() {
        let err = CrawlError::topic(
            "world",
            CrawlError::Extraction("invalid news item structure".to_string()),
        );

        assert!(err.to_string().contains("world"));
        assert!(matches!(
            err,
            CrawlError::TopicFetch { ref source, .. }
                if matches!(**source, CrawlError::Extraction(_))
        ));
    }
}
