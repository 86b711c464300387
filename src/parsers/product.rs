//! Field extractors for a product detail page.
//!
//! Each extractor returns `None` when the structure it looks for is absent.
//! Defaults are filled in once, by [`extract_record`].

use crate::parsers::selectors::{SelectorChain, Strategy, TextRead};
use crate::results::ProductRecord;
use crate::utils::{non_blank, strip_trailing_period};
use scraper::Html;

/// Value used when the availability block is missing
pub const AVAILABILITY_FALLBACK: &str = "Not Available";

pub const TITLE: SelectorChain = SelectorChain::new("title", TITLE_STRATEGIES);
pub const PRICE: SelectorChain = SelectorChain::new("price", PRICE_STRATEGIES);
pub const RATING: SelectorChain = SelectorChain::new("rating", RATING_STRATEGIES);
pub const REVIEW_COUNT: SelectorChain = SelectorChain::new("reviews", REVIEW_COUNT_STRATEGIES);
pub const AVAILABILITY: SelectorChain =
    SelectorChain::new("availability", AVAILABILITY_STRATEGIES);

const TITLE_STRATEGIES: &[Strategy] = &[Strategy::new(
    "product title",
    "span#productTitle",
    TextRead::AllText,
)];

const PRICE_STRATEGIES: &[Strategy] = &[
    Strategy::new("whole price", "span.a-price-whole", TextRead::AllText),
    Strategy::new(
        "deal price",
        r#"span[class="a-price a-text-price"]"#,
        TextRead::AllText,
    ),
];

// The icon lookup only matches a 4.5-star class exactly; other ratings come
// from the generic rating text.
const RATING_STRATEGIES: &[Strategy] = &[
    Strategy::new(
        "star icon",
        r#"i[class="a-icon a-icon-star a-star-4-5"]"#,
        TextRead::SingleString,
    ),
    Strategy::new("rating text", "span.a-icon-alt", TextRead::SingleString),
];

const REVIEW_COUNT_STRATEGIES: &[Strategy] = &[Strategy::new(
    "review count",
    "span#acrCustomerReviewText",
    TextRead::SingleString,
)];

// Only the first availability block is searched for its span.
const AVAILABILITY_STRATEGIES: &[Strategy] = &[Strategy::within(
    "availability span",
    "div#availability",
    "span",
    TextRead::SingleString,
)];

pub fn extract_title(doc: &Html) -> Option<String> {
    TITLE.first_match(doc).and_then(|t| non_blank(&t))
}

/// Trailing periods are stripped; surrounding whitespace is kept as found.
pub fn extract_price(doc: &Html) -> Option<String> {
    PRICE.first_match(doc).map(|p| strip_trailing_period(&p))
}

pub fn extract_rating(doc: &Html) -> Option<String> {
    RATING.first_match(doc).map(|r| r.trim().to_string())
}

pub fn extract_review_count(doc: &Html) -> Option<String> {
    REVIEW_COUNT.first_match(doc).map(|r| r.trim().to_string())
}

pub fn extract_availability(doc: &Html) -> Option<String> {
    AVAILABILITY.first_match(doc).map(|a| a.trim().to_string())
}

/// Runs every extractor and fills in the fallback for anything missing.
pub fn extract_record(doc: &Html) -> ProductRecord {
    ProductRecord {
        title: extract_title(doc).unwrap_or_default(),
        price: extract_price(doc).unwrap_or_default(),
        rating: extract_rating(doc).unwrap_or_default(),
        reviews: extract_review_count(doc).unwrap_or_default(),
        availability: extract_availability(doc)
            .unwrap_or_else(|| AVAILABILITY_FALLBACK.to_string()),
    }
}

/// Parses a detail page body and extracts its record.
pub fn parse(html: &str) -> ProductRecord {
    let doc = Html::parse_document(html);
    let record = extract_record(&doc);
    ::log::debug!("Extracted record: {:?}", record);
    record
}
