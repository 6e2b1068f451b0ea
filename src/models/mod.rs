mod category;
mod movie;
mod selection;

pub use category::Category;
pub use movie::{MetadataRecord, MovieCard, MovieRecord, MovieView, OmdbMovie};
pub use selection::{SelectionRequest, SelectionResponse, SelectionState};
