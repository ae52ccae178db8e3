//! # Rendered News
//!
//! A topic-driven news crawler for sites that only render their content in
//! a real browser. It visits each configured topic's listing page in a
//! headless Chrome session, extracts headline/link pairs, then fetches each
//! linked article's text, pacing requests so the site is never hammered.
//!
//! ## Usage
//!
//! ```sh
//! rendered_news -c news_topics.yaml --pretty
//! ```
//!
//! ## Architecture
//!
//! The run follows a pipeline:
//! 1. **Session**: launch one headless browser for the whole run
//! 2. **Listing**: render each topic page and extract its headline links
//! 3. **Articles**: fetch each article in its own tab, sequentially, with a
//!    configured delay between fetches; failed articles are skipped
//! 4. **Report**: emit the topic-keyed result as JSON on stdout

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod crawl;
mod errors;
mod models;
mod render;
mod utils;

use cli::Cli;
use config::CrawlConfig;
use models::CrawlReport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("rendered_news starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, args.pretty, args.headful, "Parsed CLI arguments");

    // Load configuration once; it is never reloaded during a run.
    let mut config = CrawlConfig::load(&args.config)?;
    if args.headful {
        config.browser.headless = false;
    }
    info!(
        config_path = %args.config,
        topics = config.topics.len(),
        base_url = %config.base_url,
        "Loaded configuration"
    );

    // ---- Crawl ----
    let topics = match crawl::run_crawl(&config).await {
        Ok(topics) => topics,
        Err(e) => {
            error!(error = %e, "crawl failed");
            return Err(e.into());
        }
    };

    // ---- Report ----
    let report = CrawlReport {
        local_date: Local::now().date_naive().to_string(),
        local_time: Local::now().time().to_string(),
        topics,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        topics = report.topics.len(),
        articles = report.topics.iter().map(|t| t.items.len()).sum::<usize>(),
        "Execution complete"
    );

    Ok(())
}
