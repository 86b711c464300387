use scraper::{Html, Selector};

/// Anchors that lead from a search result to its product page
pub const PRODUCT_LINK_SELECTOR: &str = r#"a[class="a-link-normal s-no-hover s-underline-text s-underline-link-text s-link-style a-text-normal"]"#;

/// Parses a listing page and returns the `href` of every product anchor, in
/// document order. Anchors without an `href` are skipped.
pub fn parse_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);

    let Ok(link_selector) = Selector::parse(PRODUCT_LINK_SELECTOR) else {
        return Vec::new();
    };
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("Listing parser found {} product links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
