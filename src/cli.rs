//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl with the default config file
/// rendered_news
///
/// # Explicit config, pretty-printed report
/// rendered_news -c sites/example.yaml --pretty
///
/// # Watch the browser while debugging selectors
/// rendered_news --headful
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML crawl configuration file
    #[arg(short, long, default_value = "news_topics.yaml")]
    pub config: String,

    /// Pretty-print the JSON report on stdout
    #[arg(long)]
    pub pretty: bool,

    /// Run the browser with a visible window (selector debugging)
    #[arg(long, env = "RENDERED_NEWS_HEADFUL")]
    pub headful: bool,
}
