//! Crawl configuration loaded from a YAML file.
//!
//! The configuration is constructed once at startup and never reloaded. It
//! names the topics to crawl, the site's base URL, the request identity
//! string, the three CSS selectors that drive extraction, and the pacing
//! parameters that throttle article fetches.
//!
//! # Example
//!
//! ```yaml
//! topics:
//!   - world
//!   - technology
//! base_url: https://news.example.com/topics
//! user_agent: "rendered_news/0.1 (+https://example.com/about)"
//! selectors:
//!   listing_item: ".topic-list .teaser"
//!   item_link: "h2 a"
//!   article_content: ".article-body p"
//! pacing:
//!   between_articles_ms: 1000
//!   page_load_timeout_secs: 30
//! browser:
//!   headless: true
//! ```
//!
//! Selectors are opaque configuration values; nothing in the pipeline
//! assumes a particular DOM structure beyond what they express, so an
//! alternate site layout only needs a different config file.

use std::path::PathBuf;
use std::time::Duration;

use scraper::Selector;
use serde::Deserialize;
use url::Url;

use crate::errors::ConfigError;

/// Top-level crawl configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Topic identifiers, crawled in this order.
    pub topics: Vec<String>,
    /// Absolute URL prefix for topic listing pages. A topic's listing URL is
    /// `{base_url}/{topic}`.
    pub base_url: String,
    /// Identity string sent with every request the browser issues.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// The CSS selectors that drive listing and article extraction.
    pub selectors: Selectors,
    /// Request pacing parameters.
    #[serde(default)]
    pub pacing: Pacing,
    /// Browser engine settings.
    #[serde(default)]
    pub browser: BrowserSettings,
}

/// The three selector expressions that drive extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct Selectors {
    /// Matches one listing entry on a topic page.
    pub listing_item: String,
    /// Matches the title/link element nested inside a listing entry.
    pub item_link: String,
    /// Matches the content fragments of an article page.
    pub article_content: String,
}

/// Pacing parameters for sequential article traversal.
#[derive(Debug, Clone, Deserialize)]
pub struct Pacing {
    /// Delay between consecutive article fetches, in milliseconds.
    #[serde(default = "default_between_articles_ms")]
    pub between_articles_ms: u64,
    /// Upper bound on a single page load, in seconds.
    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,
}

impl Pacing {
    /// The inter-article delay as a [`Duration`].
    pub fn between_articles(&self) -> Duration {
        Duration::from_millis(self.between_articles_ms)
    }

    /// The page-load timeout as a [`Duration`].
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            between_articles_ms: default_between_articles_ms(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
        }
    }
}

/// Browser engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// Run in headless mode (default: true).
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Explicit path to a Chrome/Chromium executable. When unset, well-known
    /// install locations and `PATH` are searched.
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,
    /// Additional Chrome arguments.
    #[serde(default)]
    pub chrome_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            chrome_executable: None,
            chrome_args: Vec::new(),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "rendered_news/{} (Mozilla/5.0 compatible)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_between_articles_ms() -> u64 {
    1000
}

fn default_page_load_timeout_secs() -> u64 {
    30
}

fn default_headless() -> bool {
    true
}

impl CrawlConfig {
    /// Load and validate a configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: CrawlConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde alone cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.topics.is_empty() {
            return Err(ConfigError::Validation(
                "at least one topic is required".to_string(),
            ));
        }
        if self.topics.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "topic identifiers must be non-empty".to_string(),
            ));
        }

        let base = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Validation(format!("base_url is not a valid URL: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "base_url must be http or https, got '{}'",
                base.scheme()
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent must be non-empty".to_string(),
            ));
        }

        for (name, selector) in [
            ("selectors.listing_item", &self.selectors.listing_item),
            ("selectors.item_link", &self.selectors.item_link),
            ("selectors.article_content", &self.selectors.article_content),
        ] {
            Selector::parse(selector)
                .map_err(|e| ConfigError::Validation(format!("{name} is not a valid selector: {e}")))?;
        }

        Ok(())
    }

    /// The listing URL for one topic.
    pub fn topic_url(&self, topic: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), topic)
    }
}
