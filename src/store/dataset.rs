use ndarray::{Array2, ArrayView1};
use serde::Deserialize;
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::models::{Category, MovieRecord};

/// Reasons the persisted artifacts cannot be served
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed title table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed feature matrix {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{category} dataset is empty")]
    Empty { category: Category },

    #[error("{category} feature matrix row {row} has {found} columns, expected {expected}")]
    Ragged {
        category: Category,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid feature matrix shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("{category} has {titles} titles but {rows} feature rows")]
    Misaligned {
        category: Category,
        titles: usize,
        rows: usize,
    },
}

#[derive(Debug, Deserialize)]
struct TitleRow {
    #[serde(rename = "Title")]
    title: String,
}

/// Title table and its row-aligned feature matrix for one category
///
/// Immutable after construction. Lookups are case-insensitive and resolve
/// duplicate titles to the first row in table order.
#[derive(Debug)]
pub struct Dataset {
    category: Category,
    titles: Vec<MovieRecord>,
    features: Array2<f64>,
}

impl Dataset {
    /// Pairs a title list with its feature matrix, rejecting misaligned data
    pub fn new(
        category: Category,
        titles: Vec<String>,
        features: Array2<f64>,
    ) -> Result<Self, DatasetError> {
        if titles.is_empty() {
            return Err(DatasetError::Empty { category });
        }

        if titles.len() != features.nrows() {
            return Err(DatasetError::Misaligned {
                category,
                titles: titles.len(),
                rows: features.nrows(),
            });
        }

        let duplicates = count_duplicate_titles(&titles);
        if duplicates > 0 {
            tracing::warn!(
                category = %category,
                duplicates,
                "Duplicate titles in table; lookups resolve to the first row"
            );
        }

        let titles = titles
            .into_iter()
            .enumerate()
            .map(|(row, title)| MovieRecord { title, row })
            .collect();

        Ok(Self {
            category,
            titles,
            features,
        })
    }

    /// Builds a dataset from in-memory rows, e.g. fixtures or decoded JSON
    pub fn from_rows(
        category: Category,
        titles: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, DatasetError> {
        let features = rows_to_matrix(category, rows)?;
        Self::new(category, titles, features)
    }

    /// Loads the category's artifacts from `dir`
    pub fn load(category: Category, dir: &Path) -> Result<Self, DatasetError> {
        let titles = read_titles(&dir.join(category.titles_file()))?;
        let rows = read_matrix(&dir.join(category.features_file()))?;
        Self::from_rows(category, titles, rows)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    /// Feature vector of a row
    pub fn vector(&self, row: usize) -> ArrayView1<'_, f64> {
        self.features.row(row)
    }

    /// Title stored at `row`
    pub fn title(&self, row: usize) -> Option<&str> {
        self.titles.get(row).map(|record| record.title.as_str())
    }

    /// All titles in table order
    pub fn title_list(&self) -> Vec<String> {
        self.titles.iter().map(|record| record.title.clone()).collect()
    }

    /// First record whose title equals `title` ignoring case
    pub fn position(&self, title: &str) -> Option<&MovieRecord> {
        let needle = title.to_lowercase();
        self.titles
            .iter()
            .find(|record| record.title.to_lowercase() == needle)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }
}

fn count_duplicate_titles(titles: &[String]) -> usize {
    let mut seen = HashSet::new();
    titles
        .iter()
        .filter(|title| !seen.insert(title.to_lowercase()))
        .count()
}

fn rows_to_matrix(category: Category, rows: Vec<Vec<f64>>) -> Result<Array2<f64>, DatasetError> {
    let nrows = rows.len();
    let ncols = rows.first().map(Vec::len).unwrap_or(0);

    let mut flat = Vec::with_capacity(nrows * ncols);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != ncols {
            return Err(DatasetError::Ragged {
                category,
                row,
                expected: ncols,
                found: values.len(),
            });
        }
        flat.extend(values);
    }

    Ok(Array2::from_shape_vec((nrows, ncols), flat)?)
}

fn read_titles(path: &Path) -> Result<Vec<String>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    csv::Reader::from_reader(BufReader::new(file))
        .deserialize::<TitleRow>()
        .map(|row| {
            row.map(|r| r.title).map_err(|source| DatasetError::Csv {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

fn read_matrix(path: &Path) -> Result<Vec<Vec<f64>>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read-only datasets for every category, loaded once at startup
#[derive(Debug, Clone)]
pub struct DatasetStore {
    datasets: HashMap<Category, Arc<Dataset>>,
}

impl DatasetStore {
    /// Loads all three categories; any failure is fatal to startup
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        let mut datasets = HashMap::new();

        for category in Category::ALL {
            let dataset = Dataset::load(category, dir)?;
            tracing::info!(
                category = %category,
                titles = dataset.len(),
                dimensions = dataset.features().ncols(),
                "Loaded dataset"
            );
            datasets.insert(category, Arc::new(dataset));
        }

        Ok(Self { datasets })
    }

    /// Builds a store from already-constructed datasets
    pub fn from_datasets(datasets: impl IntoIterator<Item = Dataset>) -> Self {
        Self {
            datasets: datasets
                .into_iter()
                .map(|dataset| (dataset.category(), Arc::new(dataset)))
                .collect(),
        }
    }

    pub fn get(&self, category: Category) -> Option<Arc<Dataset>> {
        self.datasets.get(&category).cloned()
    }
}
