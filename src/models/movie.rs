use reqwest::Url;
use serde::{Deserialize, Serialize};

const NOT_AVAILABLE: &str = "N/A";
const SEARCH_URL: &str = "https://www.google.com/search";

/// A title and its row in the category's feature matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub row: usize,
}

/// Display metadata for a title
///
/// Every field is `None` when the lookup failed; a successful lookup fills the
/// text fields with `"N/A"` when the API left them out, and leaves `poster`
/// empty when no poster is known.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataRecord {
    pub year: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub poster: Option<String>,
}

impl MetadataRecord {
    /// Marker returned when the metadata API could not be reached
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// True unless this is the failure marker
    pub fn is_available(&self) -> bool {
        *self != Self::unavailable()
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response body from the OMDb API
///
/// OMDb answers unknown titles with `200 OK` and `{"Response":"False"}`,
/// so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl OmdbMovie {
    /// Whether OMDb reported that it has no such title
    pub fn is_negative(&self) -> bool {
        self.response.as_deref() == Some("False")
    }
}

impl From<OmdbMovie> for MetadataRecord {
    fn from(movie: OmdbMovie) -> Self {
        let text = |value: Option<String>| Some(value.unwrap_or_else(|| NOT_AVAILABLE.to_string()));

        MetadataRecord {
            year: text(movie.year),
            director: text(movie.director),
            actors: text(movie.actors),
            plot: text(movie.plot),
            poster: movie
                .poster
                .filter(|url| !url.trim().is_empty() && url != NOT_AVAILABLE),
        }
    }
}

// ============================================================================
// Display Types
// ============================================================================

/// A title ready for display: metadata plus a web-search link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub search_url: String,
    pub metadata: MetadataRecord,
}

impl MovieCard {
    pub fn new(title: impl Into<String>, metadata: MetadataRecord) -> Self {
        let title = title.into();
        let search_url = Url::parse_with_params(SEARCH_URL, &[("q", title.as_str())])
            .map(String::from)
            .unwrap_or_else(|_| SEARCH_URL.to_string());

        Self {
            title,
            search_url,
            metadata,
        }
    }
}

/// Detail panel for a selected title with its similar titles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieView {
    pub movie: MovieCard,
    pub recommendations: Vec<MovieCard>,
    /// Non-fatal problems the UI should surface
    pub warnings: Vec<String>,
}
