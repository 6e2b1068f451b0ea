pub mod cache;
pub mod dataset;
pub mod sessions;

pub use cache::{Cache, CacheKey, MetadataCache};
pub use dataset::{Dataset, DatasetError, DatasetStore};
pub use sessions::SessionStore;
