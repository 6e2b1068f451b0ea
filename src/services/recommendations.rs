use crate::{
    models::{Category, MovieCard, MovieView},
    services::{metadata::MetadataService, similarity::SimilarityEngine},
    store::Dataset,
};

pub const DETAILS_UNAVAILABLE: &str = "Movie details not available.";
pub const MOVIE_NOT_FOUND: &str = "Movie not found in the database.";

/// Builds the detail panel for `title` with its similar titles
///
/// Every problem along the way is downgraded to a warning: missing metadata
/// leaves the card's fields empty, an unknown title yields no
/// recommendations. Recommended titles keep nearest-first order.
pub async fn movie_view(
    dataset: &Dataset,
    engine: &SimilarityEngine,
    metadata: &MetadataService,
    title: &str,
) -> MovieView {
    let mut warnings = Vec::new();

    let details = metadata.fetch(title).await;
    if !details.is_available() {
        warnings.push(DETAILS_UNAVAILABLE.to_string());
    }

    let similar = match engine.recommend(title, dataset) {
        Ok(titles) => titles,
        Err(e) => {
            tracing::warn!(error = %e, title = %title, "Recommendation lookup failed");
            warnings.push(MOVIE_NOT_FOUND.to_string());
            Vec::new()
        }
    };

    let records = metadata.fetch_many(&similar).await;
    let recommendations: Vec<MovieCard> = similar
        .into_iter()
        .zip(records)
        .map(|(title, record)| {
            if !record.is_available() {
                warnings.push(format!("Metadata not available for {}.", title));
            }
            MovieCard::new(title, record)
        })
        .collect();

    MovieView {
        movie: MovieCard::new(title, details),
        recommendations,
        warnings,
    }
}

/// Cards for the category's top-rated strip, in fixed order
pub async fn top_rated(category: Category, metadata: &MetadataService) -> Vec<MovieCard> {
    let titles: Vec<String> = category
        .top_rated()
        .iter()
        .map(|title| title.to_string())
        .collect();

    let records = metadata.fetch_many(&titles).await;

    titles
        .into_iter()
        .zip(records)
        .map(|(title, record)| MovieCard::new(title, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::MetadataRecord,
        services::providers::MockMetadataProvider,
        store::Cache,
    };
    use std::sync::Arc;

    fn dataset() -> Dataset {
        let titles = [
            "The Dark Knight",
            "Batman Begins",
            "Inception",
            "Interstellar",
            "Avengers",
            "X-Men",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let rows = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![1.0, 1.0],
            vec![2.0, 1.0],
            vec![5.0, 5.0],
            vec![6.0, 5.0],
        ];
        Dataset::from_rows(Category::International, titles, rows).unwrap()
    }

    fn metadata_with(mock: MockMetadataProvider) -> MetadataService {
        MetadataService::new(Arc::new(mock), Cache::new(32), false)
    }

    fn found(title: &str) -> MetadataRecord {
        MetadataRecord {
            year: Some("2000".to_string()),
            director: Some("N/A".to_string()),
            actors: Some("N/A".to_string()),
            plot: Some(format!("About {}", title)),
            poster: Some(format!("https://img.example/{}.jpg", title.len())),
        }
    }

    #[tokio::test]
    async fn test_movie_view_orders_recommendations() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .returning(|title| Ok(found(title)));

        let view = movie_view(
            &dataset(),
            &SimilarityEngine::default(),
            &metadata_with(mock),
            "The Dark Knight",
        )
        .await;

        assert!(view.warnings.is_empty());
        assert_eq!(view.movie.title, "The Dark Knight");
        let titles: Vec<&str> = view.recommendations.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Batman Begins", "Inception", "Interstellar", "Avengers", "X-Men"]
        );
    }

    #[tokio::test]
    async fn test_movie_view_partial_metadata_failure() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata().returning(|title| match title {
            "Inception" => Err(AppError::ExternalApi("503".to_string())),
            other => Ok(found(other)),
        });
        mock.expect_name().return_const("mock");

        let view = movie_view(
            &dataset(),
            &SimilarityEngine::default(),
            &metadata_with(mock),
            "The Dark Knight",
        )
        .await;

        assert_eq!(view.recommendations.len(), 5);
        assert!(!view.recommendations[1].metadata.is_available());
        assert!(view.recommendations[0].metadata.is_available());
        assert_eq!(view.warnings, vec!["Metadata not available for Inception."]);
    }

    #[tokio::test]
    async fn test_movie_view_unknown_title() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .returning(|_| Err(AppError::ExternalApi("404".to_string())));
        mock.expect_name().return_const("mock");

        let view = movie_view(
            &dataset(),
            &SimilarityEngine::default(),
            &metadata_with(mock),
            "Tenet",
        )
        .await;

        assert!(view.recommendations.is_empty());
        assert_eq!(view.warnings, vec![DETAILS_UNAVAILABLE, MOVIE_NOT_FOUND]);
    }

    #[tokio::test]
    async fn test_top_rated_keeps_fixed_order() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .times(5)
            .returning(|title| Ok(found(title)));

        let cards = top_rated(Category::Indian, &metadata_with(mock)).await;
        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Jersey", "3 Idiots", "Dangal", "Pink", "Mahanati"]);
    }
}
