use crate::{
    middleware::session::SessionId,
    models::{Category, SelectionState},
};

use super::cache::Cache;

/// Current selection of every active browser session
///
/// Bounded: the least recently touched session is forgotten once the
/// capacity is reached.
#[derive(Clone)]
pub struct SessionStore {
    selections: Cache<SessionId, SelectionState>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            selections: Cache::new(capacity),
        }
    }

    /// Replaces the session's selection
    pub async fn select(
        &self,
        session: SessionId,
        category: Category,
        title: String,
    ) -> SelectionState {
        let state = SelectionState { category, title };
        self.selections.put(session, state.clone()).await;
        state
    }

    pub async fn clear(&self, session: &SessionId) {
        self.selections.remove(session).await;
    }

    pub async fn current(&self, session: &SessionId) -> Option<SelectionState> {
        self.selections.get(session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_replaces_previous() {
        let store = SessionStore::new(8);
        let session = SessionId::new();

        store.select(session, Category::Tamil, "Billa".to_string()).await;
        store.select(session, Category::Tamil, "Sivaji".to_string()).await;

        let current = store.current(&session).await.unwrap();
        assert_eq!(current.title, "Sivaji");
    }

    #[tokio::test]
    async fn test_clear() {
        let store = SessionStore::new(8);
        let session = SessionId::new();

        store.select(session, Category::Indian, "Pink".to_string()).await;
        store.clear(&session).await;

        assert_eq!(store.current(&session).await, None);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(8);
        let first = SessionId::new();
        let second = SessionId::new();

        store.select(first, Category::Indian, "Dangal".to_string()).await;

        assert_eq!(store.current(&second).await, None);
        assert!(store.current(&first).await.is_some());
    }
}
