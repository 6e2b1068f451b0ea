/// Movie metadata provider abstraction
///
/// The metadata fetcher talks to its data source only through this trait so
/// the HTTP client can be swapped for a mock in tests.
use crate::{error::AppResult, models::MetadataRecord};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie metadata sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up year, director, actors, plot and poster for a title
    ///
    /// Errors cover transport failures and non-2xx responses. A title the
    /// source does not know is not an error; it yields default fields.
    async fn fetch_metadata(&self, title: &str) -> AppResult<MetadataRecord>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
