use serde::{Deserialize, Serialize};

use super::Category;

/// The title a session has chosen for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionState {
    pub category: Category,
    pub title: String,
}

/// "Recommend" action from the sidebar or a top-rated quick-select button
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    pub category: Category,
    #[serde(default)]
    pub title: Option<String>,
}

/// Outcome of a selection change
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionResponse {
    pub selection: Option<SelectionState>,
    pub warnings: Vec<String>,
}
