pub mod fuzzy;
pub mod metadata;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod title_search;

pub use fuzzy::{FuzzyFilter, FuzzyMatch};
pub use metadata::MetadataService;
pub use providers::{MetadataProvider, OmdbProvider};
pub use similarity::SimilarityEngine;
