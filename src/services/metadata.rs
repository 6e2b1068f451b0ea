use std::sync::Arc;

use crate::{
    models::MetadataRecord,
    services::providers::MetadataProvider,
    store::{CacheKey, MetadataCache},
};

/// Metadata fetcher with a bounded per-title cache
///
/// Lookups never fail: provider errors are logged and turned into
/// [`MetadataRecord::unavailable`] so one bad title cannot abort a page.
#[derive(Clone)]
pub struct MetadataService {
    provider: Arc<dyn MetadataProvider>,
    cache: MetadataCache,
    cache_failures: bool,
}

impl MetadataService {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        cache: MetadataCache,
        cache_failures: bool,
    ) -> Self {
        Self {
            provider,
            cache,
            cache_failures,
        }
    }

    /// Metadata for `title`, served from cache when possible
    pub async fn fetch(&self, title: &str) -> MetadataRecord {
        let key = CacheKey::Metadata(title.to_string());

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(title = %title, "Metadata cache hit");
            return cached;
        }

        match self.provider.fetch_metadata(title).await {
            Ok(record) => {
                self.cache.put(key, record.clone()).await;
                record
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    title = %title,
                    provider = self.provider.name(),
                    "Metadata unavailable"
                );
                let record = MetadataRecord::unavailable();
                if self.cache_failures {
                    self.cache.put(key, record.clone()).await;
                }
                record
            }
        }
    }

    /// Fetches several titles in parallel, preserving input order
    ///
    /// A failed lookup only affects its own slot.
    pub async fn fetch_many(&self, titles: &[String]) -> Vec<MetadataRecord> {
        let mut tasks = Vec::with_capacity(titles.len());

        for title in titles {
            let service = self.clone();
            let title = title.clone();
            tasks.push(tokio::spawn(async move { service.fetch(&title).await }));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(record) => results.push(record),
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    results.push(MetadataRecord::unavailable());
                }
            }
        }

        let failed = results.iter().filter(|r| !r.is_available()).count();
        if failed > 0 {
            tracing::warn!(
                success_count = results.len() - failed,
                error_count = failed,
                "Partial metadata fetch failure"
            );
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        services::providers::MockMetadataProvider,
        store::Cache,
    };
    use mockall::predicate::eq;

    fn record(year: &str) -> MetadataRecord {
        MetadataRecord {
            year: Some(year.to_string()),
            director: Some("N/A".to_string()),
            actors: Some("N/A".to_string()),
            plot: Some("N/A".to_string()),
            poster: None,
        }
    }

    fn service(
        mock: MockMetadataProvider,
        capacity: usize,
        cache_failures: bool,
    ) -> MetadataService {
        MetadataService::new(Arc::new(mock), Cache::new(capacity), cache_failures)
    }

    #[tokio::test]
    async fn test_second_fetch_hits_cache() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .with(eq("Inception"))
            .times(1)
            .returning(|_| Ok(record("2010")));

        let service = service(mock, 8, false);

        assert_eq!(service.fetch("Inception").await, record("2010"));
        assert_eq!(service.fetch("Inception").await, record("2010"));
    }

    #[tokio::test]
    async fn test_cache_key_is_exact_title() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .times(2)
            .returning(|_| Ok(record("2010")));

        let service = service(mock, 8, false);

        service.fetch("Inception").await;
        service.fetch("inception").await;
    }

    #[tokio::test]
    async fn test_failure_returns_unavailable() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .returning(|_| Err(AppError::ExternalApi("404 Not Found".to_string())));
        mock.expect_name().return_const("mock");

        let service = service(mock, 8, false);
        let result = service.fetch("Missing").await;

        assert_eq!(result, MetadataRecord::unavailable());
        assert!(!result.is_available());
    }

    #[tokio::test]
    async fn test_failures_not_cached_by_default() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .times(2)
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));
        mock.expect_name().return_const("mock");

        let service = service(mock, 8, false);
        service.fetch("Missing").await;
        service.fetch("Missing").await;
    }

    #[tokio::test]
    async fn test_failures_cached_when_enabled() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .times(1)
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));
        mock.expect_name().return_const("mock");

        let service = service(mock, 8, true);
        assert!(!service.fetch("Missing").await.is_available());
        assert!(!service.fetch("Missing").await.is_available());
    }

    #[tokio::test]
    async fn test_cache_is_bounded() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .with(eq("A"))
            .times(2)
            .returning(|_| Ok(record("1")));
        mock.expect_fetch_metadata()
            .with(eq("B"))
            .times(1)
            .returning(|_| Ok(record("2")));

        let service = service(mock, 1, false);

        service.fetch("A").await;
        service.fetch("B").await; // evicts "A"
        service.fetch("A").await;
    }

    #[tokio::test]
    async fn test_fetch_many_preserves_order_with_partial_failure() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch_metadata()
            .returning(|title| match title {
                "Broken" => Err(AppError::ExternalApi("500".to_string())),
                other => Ok(record(other)),
            });
        mock.expect_name().return_const("mock");

        let service = service(mock, 8, false);
        let titles = vec!["1999".to_string(), "Broken".to_string(), "2001".to_string()];

        let results = service.fetch_many(&titles).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], record("1999"));
        assert!(!results[1].is_available());
        assert_eq!(results[2], record("2001"));
    }
}
