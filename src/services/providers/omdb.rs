/// OMDb API provider
///
/// Single endpoint: `GET {api_url}?apikey={key}&t={title}` returns one movie
/// object with PascalCase fields (`Year`, `Director`, `Actors`, `Plot`,
/// `Poster`).
use crate::{
    error::{AppError, AppResult},
    models::{MetadataRecord, OmdbMovie},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn fetch_metadata(&self, title: &str) -> AppResult<MetadataRecord> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw OMDb API response");

        let movie: OmdbMovie = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        if movie.is_negative() {
            tracing::debug!(
                title = %title,
                error = movie.error.as_deref().unwrap_or_default(),
                "OMDb has no entry for title"
            );
        }

        tracing::info!(title = %title, provider = "omdb", "Metadata fetched");

        Ok(MetadataRecord::from(movie))
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
