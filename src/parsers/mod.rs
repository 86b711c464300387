//! HTML parsing for listing and detail pages.

pub mod listing;
pub mod product;
pub mod selectors;

#[cfg(test)]
mod tests;

pub use listing::parse_links;
pub use product::{
    extract_availability, extract_price, extract_rating, extract_record, extract_review_count,
    extract_title,
};
pub use selectors::{SelectorChain, Strategy, TextRead};
