//! Listing and content extraction over captured HTML.
//!
//! Both extractors are pure functions over a rendered document, driven
//! entirely by the configured selectors. Listing extraction is strict: a
//! single listing entry with a missing link target or empty title aborts
//! the whole extraction, because the listing step runs once per topic and a
//! structurally broken listing usually means the selectors no longer match
//! the site.
//!
//! Content extraction is lenient by contrast: a selector that matches
//! nothing yields an empty sequence, not an error.

use scraper::{Html, Selector};
use tracing::debug;

use crate::errors::{CrawlError, Result};
use crate::models::NewsItem;

/// Extract ordered `(title, link)` pairs from a topic listing page.
///
/// Queries all elements matching `item_selector` in document order and, for
/// each, locates the nested element matching `link_selector`. That element
/// must carry an `href` and non-empty visible text.
///
/// # Errors
///
/// Returns [`CrawlError::Extraction`] when a selector fails to parse or any
/// matched item lacks a resolvable link or title text.
pub fn extract_listing(
    html: &str,
    item_selector: &str,
    link_selector: &str,
) -> Result<Vec<NewsItem>> {
    let item_sel = parse_selector(item_selector)?;
    let link_sel = parse_selector(link_selector)?;

    let document = Html::parse_document(html);
    let mut items = Vec::new();
    for element in document.select(&item_sel) {
        let link = element
            .select(&link_sel)
            .next()
            .ok_or_else(invalid_item_structure)?;

        let title = link.text().collect::<Vec<_>>().join(" ").trim().to_string();
        let href = link.value().attr("href").unwrap_or("").trim();
        if title.is_empty() || href.is_empty() {
            return Err(invalid_item_structure());
        }

        items.push(NewsItem::new(title, href));
    }

    debug!(count = items.len(), "extracted listing items");
    Ok(items)
}

/// Extract the text of all fragments matching `selector`, in document order.
///
/// An empty result is not an error; it means the selector matched nothing
/// on this page.
pub fn extract_fragments(html: &str, selector: &str) -> Result<Vec<String>> {
    let sel = parse_selector(selector)?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&sel)
        .map(|element| element.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .collect())
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| CrawlError::Extraction(format!("invalid selector '{selector}': {e}")))
}

fn invalid_item_structure() -> CrawlError {
    CrawlError::Extraction("invalid news item structure".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <ul class="topic-list">
            <li class="teaser"><h2><a href="/articles/1">First story</a></h2></li>
            <li class="teaser"><h2><a href="/articles/2">  Second story  </a></h2></li>
            <li class="teaser"><h2><a href="https://other.test/3">Third story</a></h2></li>
          </ul>
        </body></html>
    "#;

    #[test]
    fn test_extract_listing_preserves_document_order() {
        let items = extract_listing(LISTING, ".teaser", "h2 a").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "First story");
        assert_eq!(items[0].detail_url, "/articles/1");
        assert_eq!(items[1].title, "Second story");
        assert_eq!(items[2].detail_url, "https://other.test/3");
        assert!(items.iter().all(|item| item.content.is_none()));
    }

    #[test]
    fn test_extract_listing_trims_title_whitespace() {
        let items = extract_listing(LISTING, ".teaser", "h2 a").unwrap();
        assert_eq!(items[1].title, "Second story");
    }

    #[test]
    fn test_extract_listing_is_idempotent() {
        let first = extract_listing(LISTING, ".teaser", "h2 a").unwrap();
        let second = extract_listing(LISTING, ".teaser", "h2 a").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_listing_empty_page_yields_empty() {
        let items = extract_listing("<html><body></body></html>", ".teaser", "h2 a").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_missing_href_aborts_extraction() {
        let html = r#"
            <li class="teaser"><h2><a href="/articles/1">Good</a></h2></li>
            <li class="teaser"><h2><a>No link target</a></h2></li>
        "#;
        let err = extract_listing(html, ".teaser", "h2 a").unwrap_err();
        assert!(matches!(err, CrawlError::Extraction(_)));
        assert!(err.to_string().contains("invalid news item structure"));
    }

    #[test]
    fn test_empty_title_aborts_extraction() {
        let html = r#"<li class="teaser"><h2><a href="/articles/1">   </a></h2></li>"#;
        let err = extract_listing(html, ".teaser", "h2 a").unwrap_err();
        assert!(matches!(err, CrawlError::Extraction(_)));
    }

    #[test]
    fn test_item_without_link_element_aborts_extraction() {
        let html = r#"<li class="teaser"><h2>No anchor at all</h2></li>"#;
        let err = extract_listing(html, ".teaser", "h2 a").unwrap_err();
        assert!(matches!(err, CrawlError::Extraction(_)));
    }

    #[test]
    fn test_extract_fragments_in_document_order() {
        let html = r#"
            <article class="article-body">
              <p>First paragraph.</p>
              <p>Second paragraph.</p>
            </article>
        "#;
        let fragments = extract_fragments(html, ".article-body p").unwrap();
        assert_eq!(fragments, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_extract_fragments_no_match_is_empty() {
        let fragments = extract_fragments("<html><body></body></html>", ".article-body p").unwrap();
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_invalid_selector_is_extraction_error() {
        let err = extract_fragments("<html></html>", "..[").unwrap_err();
        assert!(matches!(err, CrawlError::Extraction(_)));
    }
}
