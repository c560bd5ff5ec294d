pub mod browser;
pub mod http;
pub mod traits;
pub mod types;
pub mod ufc;
pub mod walker;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;
pub use traits::{PageFetcher, RenderedPage};
pub use types::{FetcherKind, ScoutConfig};
pub use walker::{CrawlSummary, PaginationWalker};
