//! Crawl orchestration and session lifecycle.
//!
//! The orchestrator owns the browser session for the whole run: it launches
//! the session before the first topic, drives each topic strictly in
//! configuration order, and closes the session on every outcome. A topic
//! failure is logged, the session is closed, and the error is re-raised;
//! later topics are not attempted.

use tracing::{error, info};

use crate::config::CrawlConfig;
use crate::crawl::topic;
use crate::errors::Result;
use crate::models::TopicNews;
use crate::render::{ChromeSession, RenderSession};

/// Run a full crawl against a freshly launched browser session.
///
/// # Errors
///
/// Returns [`crate::errors::CrawlError::Initialization`] when the browser
/// cannot start (no topic is attempted in that case), or the first
/// unabsorbed topic failure.
pub async fn run_crawl(config: &CrawlConfig) -> Result<Vec<TopicNews>> {
    let session = ChromeSession::launch(&config.browser, &config.user_agent).await?;
    crawl_with_session(session, config).await
}

/// Drive all configured topics over `session`, closing it on every outcome.
pub async fn crawl_with_session<S: RenderSession>(
    mut session: S,
    config: &CrawlConfig,
) -> Result<Vec<TopicNews>> {
    let outcome = crawl_topics(&session, config).await;
    if let Err(ref e) = outcome {
        error!(error = %e, "crawl aborted; closing browser session");
    }
    session.close().await;
    outcome
}

async fn crawl_topics<S: RenderSession>(
    session: &S,
    config: &CrawlConfig,
) -> Result<Vec<TopicNews>> {
    let mut results = Vec::with_capacity(config.topics.len());
    for name in &config.topics {
        let items = topic::crawl_topic(session, name, config).await?;
        results.push(TopicNews {
            topic: name.clone(),
            items,
        });
    }

    info!(
        topics = results.len(),
        articles = results.iter().map(|t| t.items.len()).sum::<usize>(),
        "crawl complete"
    );
    Ok(results)
}
