//! Two-phase crawler for the UFC athlete roster: walk the paginated listing,
//! then visit every active athlete's profile and flatten its statistics into
//! one record.

pub mod error;
pub mod models;
pub mod scrapers;

pub use error::{CrawlError, ExtractError};
pub use models::{AthleteRecord, PartialAthlete, StatValue};
