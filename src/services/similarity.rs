use ndarray::{Array2, ArrayView1};
use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    store::Dataset,
};

/// Neighbors requested per query: the title itself plus five suggestions
pub const DEFAULT_NEIGHBORS: usize = 6;

/// A row of the feature matrix and its distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

fn euclidean_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// The `k` rows closest to `query` under Euclidean distance, nearest first
///
/// Equal distances keep row order, so the result is deterministic.
pub fn kneighbors(features: &Array2<f64>, query: ArrayView1<'_, f64>, k: usize) -> Vec<Neighbor> {
    let mut neighbors: Vec<Neighbor> = features
        .rows()
        .into_iter()
        .enumerate()
        .map(|(row, vector)| Neighbor {
            row,
            distance: euclidean_distance(vector, query),
        })
        .collect();

    neighbors.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    neighbors.truncate(k);
    neighbors
}

/// Nearest-neighbor recommender over a category's feature matrix
#[derive(Debug, Clone, Copy)]
pub struct SimilarityEngine {
    neighbors: usize,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBORS)
    }
}

impl SimilarityEngine {
    pub fn new(neighbors: usize) -> Self {
        Self { neighbors }
    }

    /// Titles most similar to `title`, nearest first
    ///
    /// The title is matched case-insensitively; when several rows share it the
    /// first one in table order is used. The matched row never appears in the
    /// result. Returns [`AppError::NotFound`] when no row matches.
    pub fn recommend(&self, title: &str, dataset: &Dataset) -> AppResult<Vec<String>> {
        let record = dataset.position(title).ok_or_else(|| {
            AppError::NotFound(format!(
                "{} is not in the {} catalog",
                title,
                dataset.category()
            ))
        })?;

        let recommendations: Vec<String> =
            kneighbors(dataset.features(), dataset.vector(record.row), self.neighbors)
                .into_iter()
                .filter(|neighbor| neighbor.row != record.row)
                .take(self.neighbors.saturating_sub(1))
                .filter_map(|neighbor| dataset.title(neighbor.row).map(str::to_string))
                .collect();

        tracing::info!(
            title = %record.title,
            category = %dataset.category(),
            results = recommendations.len(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}
