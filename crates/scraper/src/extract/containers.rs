//! Container location: finding the repeated blocks that represent
//! individual event listings in a parsed page.

use scraper::{ElementRef, Html, Selector};

/// Site-specific selectors, most specific first.
const PRIORITY_SELECTORS: &[&str] = &["article.c-post", ".c-post", r#"article[class*="c-post"]"#];

/// Generic fallbacks shared by most listing layouts.
const FALLBACK_SELECTORS: &[&str] = &[
    ".event-item",
    ".event-card",
    r#"[class*="event"]"#,
    "article",
    r#"div[class*="post"]"#,
];

/// Keywords that mark a block as event-like when no selector matches.
const CONTENT_KEYWORDS: &[&str] = &["vitamin", "shibuya", "trance", "house", "techno", "party"];

/// Upper bound on containers accepted by the content heuristic.
const CONTENT_SCAN_CAP: usize = 20;

/// Locate event containers in a parsed listing page.
///
/// Tries the ordered selector chains and returns the first non-empty match
/// set; as a last resort keeps block elements whose text mentions a domain
/// keyword. An empty result means "no more pages", never an error.
pub fn locate_containers(doc: &Html) -> Vec<ElementRef<'_>> {
    for selector_str in PRIORITY_SELECTORS.iter().chain(FALLBACK_SELECTORS) {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        let containers: Vec<ElementRef<'_>> = doc.select(&selector).collect();
        if !containers.is_empty() {
            tracing::debug!(
                "found {} event containers with selector: {}",
                containers.len(),
                selector_str
            );
            return containers;
        }
    }

    let blocks = Selector::parse("article, div[class]").expect("invalid selector");
    let containers: Vec<ElementRef<'_>> = doc
        .select(&blocks)
        .filter(|element| {
            let text = element.text().collect::<Vec<_>>().join(" ").to_lowercase();
            CONTENT_KEYWORDS.iter().any(|keyword| text.contains(keyword))
        })
        .take(CONTENT_SCAN_CAP)
        .collect();

    if containers.is_empty() {
        tracing::warn!("no event containers found");
    } else {
        tracing::debug!("found {} containers based on content", containers.len());
    }

    containers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_selector_wins() {
        let html = r#"
            <html><body>
                <article class="c-post"><h3>Vitamin</h3></article>
                <article class="c-post"><h3>Full Moon</h3></article>
                <div class="event-card">ignored fallback</div>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        assert_eq!(locate_containers(&doc).len(), 2);
    }

    #[test]
    fn test_fallback_selector_used_when_no_priority_match() {
        let html = r#"
            <html><body>
                <div class="event-card">One</div>
                <div class="event-card">Two</div>
                <div class="event-card">Three</div>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        assert_eq!(locate_containers(&doc).len(), 3);
    }

    #[test]
    fn test_content_heuristic_as_last_resort() {
        let html = r#"
            <html><body>
                <div class="box">Psychedelic trance all night</div>
                <div class="box">Nothing to see</div>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        let containers = locate_containers(&doc);
        assert_eq!(containers.len(), 1);
        assert!(containers[0]
            .text()
            .collect::<String>()
            .contains("trance"));
    }

    #[test]
    fn test_empty_page_signals_stop() {
        let html = "<html><body><p>404 not found</p></body></html>";
        let doc = Html::parse_document(html);
        assert!(locate_containers(&doc).is_empty());
    }
}
