//! Page extraction rules for the UFC athlete roster.

pub mod detail;
pub mod document;
pub mod listing;
pub mod normalize;

pub use detail::extract_athlete;
pub use listing::{parse_listing, ListingEntry, ListingPage};
