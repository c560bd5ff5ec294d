//! Typed errors for the crawl and extraction pipeline.

use thiserror::Error;
use url::Url;

/// Errors raised while turning a rendered page into records.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Labels and values of a paired section came back in different counts
    #[error("{section}: found {labels} labels but {values} values")]
    StructuralMismatch {
        section: &'static str,
        labels: usize,
        values: usize,
    },

    /// A group held fewer text nodes than its layout requires
    #[error("{section}: expected {expected} text nodes, found {found}")]
    MissingText {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    /// Text that a rule expects to be numeric did not parse
    #[error("malformed number for '{field}': {value:?}")]
    MalformedNumber { field: String, value: String },

    /// Percentage outside of [0, 100]
    #[error("percentage for '{field}' out of range: {value}")]
    OutOfRange { field: String, value: f64 },
}

/// Errors raised by the pagination walker.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: Url,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to extract {url}: {source}")]
    Extract {
        url: Url,
        #[source]
        source: ExtractError,
    },

    /// The record receiver went away before the walk finished
    #[error("record sink closed")]
    SinkClosed,
}
