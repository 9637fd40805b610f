//! Persistence boundary for actions and their activity log.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use agora_core::error::AgoraError;

use crate::types::{Action, ActionActivity, ActionFilters, SortOptions};

/// Storage abstraction for the action engine.
///
/// Implementations must keep activities append-only: activities are only
/// ever added, or removed wholesale when their owning action is deleted.
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Insert or replace an action by id, returning the stored value.
    async fn save_action(&self, action: Action) -> Result<Action, AgoraError>;

    async fn find_action(&self, id: Uuid) -> Result<Option<Action>, AgoraError>;

    /// Remove an action and all of its activities. Removing an id that is
    /// not present is not an error.
    async fn delete_action(&self, id: Uuid) -> Result<(), AgoraError>;

    /// Filtered, sorted, paginated listing. The second element is the
    /// total match count before pagination.
    async fn query_actions(
        &self,
        filters: &ActionFilters,
        sort: &SortOptions,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Action>, usize), AgoraError>;

    async fn append_activity(&self, activity: ActionActivity) -> Result<(), AgoraError>;

    /// Activities for one action, newest first, up to `limit`.
    async fn list_activities(
        &self,
        action_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ActionActivity>, AgoraError>;
}

/// In-memory store backed by mutex-guarded vectors.
///
/// Suitable for tests and single-process embedding.
#[derive(Default)]
pub struct MemoryActionStore {
    actions: Mutex<Vec<Action>>,
    activities: Mutex<Vec<ActionActivity>>,
}

impl MemoryActionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(what: &str) -> AgoraError {
    AgoraError::Storage(format!("{what} lock poisoned"))
}

#[async_trait]
impl ActionStore for MemoryActionStore {
    async fn save_action(&self, action: Action) -> Result<Action, AgoraError> {
        let mut actions = self.actions.lock().map_err(|_| poisoned("actions"))?;
        match actions.iter_mut().find(|a| a.id == action.id) {
            Some(existing) => *existing = action.clone(),
            None => actions.push(action.clone()),
        }
        Ok(action)
    }

    async fn find_action(&self, id: Uuid) -> Result<Option<Action>, AgoraError> {
        let actions = self.actions.lock().map_err(|_| poisoned("actions"))?;
        Ok(actions.iter().find(|a| a.id == id).cloned())
    }

    async fn delete_action(&self, id: Uuid) -> Result<(), AgoraError> {
        let mut actions = self.actions.lock().map_err(|_| poisoned("actions"))?;
        actions.retain(|a| a.id != id);
        let mut activities = self.activities.lock().map_err(|_| poisoned("activities"))?;
        activities.retain(|a| a.action_id != id);
        Ok(())
    }

    async fn query_actions(
        &self,
        filters: &ActionFilters,
        sort: &SortOptions,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Action>, usize), AgoraError> {
        let actions = self.actions.lock().map_err(|_| poisoned("actions"))?;
        let mut matched: Vec<Action> = actions
            .iter()
            .filter(|a| filters.matches(a))
            .cloned()
            .collect();
        matched.sort_by(|a, b| sort.compare(a, b));
        let total = matched.len();
        let page = matched.into_iter().skip(offset).take(limit).collect();
        Ok((page, total))
    }

    async fn append_activity(&self, activity: ActionActivity) -> Result<(), AgoraError> {
        let mut activities = self.activities.lock().map_err(|_| poisoned("activities"))?;
        activities.push(activity);
        Ok(())
    }

    async fn list_activities(
        &self,
        action_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ActionActivity>, AgoraError> {
        let activities = self.activities.lock().map_err(|_| poisoned("activities"))?;
        // Insertion order breaks ties within the same second, newest first.
        let mut indexed: Vec<(usize, &ActionActivity)> = activities
            .iter()
            .enumerate()
            .filter(|(_, a)| a.action_id == action_id)
            .collect();
        indexed.sort_by(|(ia, a), (ib, b)| {
            b.created_at.cmp(&a.created_at).then_with(|| ib.cmp(ia))
        });
        Ok(indexed
            .into_iter()
            .take(limit)
            .map(|(_, a)| a.clone())
            .collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
