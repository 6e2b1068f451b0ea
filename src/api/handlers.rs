use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::session::SessionId,
    models::{
        Category, MetadataRecord, MovieCard, MovieView, SelectionRequest, SelectionResponse,
    },
    services::{recommendations, title_search},
};

use super::AppState;

pub const SELECTION_REQUIRED: &str = "Please select a movie before recommending.";
pub const SELECTION_NOT_FOUND: &str = "The selected movie is not found in the database.";

// Request/Response types

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Category,
    pub label: &'static str,
    pub top_rated: Vec<&'static str>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category,
            label: category.label(),
            top_rated: category.top_rated().to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct MetadataQuery {
    pub t: String,
}

#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub title: String,
    pub available: bool,
    pub metadata: MetadataRecord,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Category selector options
pub async fn get_categories() -> Json<Vec<CategoryResponse>> {
    Json(Category::ALL.into_iter().map(CategoryResponse::from).collect())
}

/// Title selector options, fuzzy-filtered when `q` is not blank
pub async fn get_titles(
    State(state): State<AppState>,
    Path(category): Path<Category>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<Vec<String>>> {
    let dataset = state.dataset(category)?;
    let titles = title_search::search_titles(&dataset, &state.filter, &query.q);

    tracing::info!(
        category = %category,
        term = %query.q,
        results = titles.len(),
        "Title search completed"
    );

    Ok(Json(titles))
}

/// Posters and links for the category's top-rated strip
pub async fn get_top_rated(
    State(state): State<AppState>,
    Path(category): Path<Category>,
) -> Json<Vec<MovieCard>> {
    Json(recommendations::top_rated(category, &state.metadata).await)
}

/// Details and similar titles for one movie, without touching the session
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(category): Path<Category>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<MovieView>> {
    let dataset = state.dataset(category)?;
    let view =
        recommendations::movie_view(&dataset, &state.engine, &state.metadata, &query.title).await;
    Ok(Json(view))
}

/// Metadata for a single title
pub async fn get_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> AppResult<Json<MetadataResponse>> {
    if query.t.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    let metadata = state.metadata.fetch(&query.t).await;
    Ok(Json(MetadataResponse {
        title: query.t,
        available: metadata.is_available(),
        metadata,
    }))
}

/// Detail panel for the session's current selection, if any
pub async fn get_selection(
    State(state): State<AppState>,
    session: SessionId,
) -> AppResult<Json<Option<MovieView>>> {
    let Some(selection) = state.sessions.current(&session).await else {
        return Ok(Json(None));
    };

    let dataset = state.dataset(selection.category)?;
    let view =
        recommendations::movie_view(&dataset, &state.engine, &state.metadata, &selection.title)
            .await;
    Ok(Json(Some(view)))
}

/// "Recommend" action: select a title for this session
pub async fn put_selection(
    State(state): State<AppState>,
    session: SessionId,
    Json(request): Json<SelectionRequest>,
) -> AppResult<Json<SelectionResponse>> {
    let title = request
        .title
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| AppError::MissingSelection(SELECTION_REQUIRED.to_string()))?;

    let dataset = state.dataset(request.category)?;
    if !dataset.contains(&title) {
        tracing::warn!(
            session_id = %session,
            category = %request.category,
            title = %title,
            "Selected title not in catalog"
        );
        state.sessions.clear(&session).await;
        return Ok(Json(SelectionResponse {
            selection: None,
            warnings: vec![SELECTION_NOT_FOUND.to_string()],
        }));
    }

    let selection = state
        .sessions
        .select(session, request.category, title)
        .await;

    tracing::info!(
        session_id = %session,
        category = %selection.category,
        title = %selection.title,
        "Selection updated"
    );

    Ok(Json(SelectionResponse {
        selection: Some(selection),
        warnings: Vec::new(),
    }))
}

/// "Clear" action
pub async fn delete_selection(
    State(state): State<AppState>,
    session: SessionId,
) -> StatusCode {
    state.sessions.clear(&session).await;
    StatusCode::NO_CONTENT
}
