//! Read-side views over the action collection.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use agora_core::error::AgoraError;

use crate::types::{
    Action, ActionFilters, ActionPage, ActionStats, ActionStatus, SortDirection, SortField,
    SortOptions, SourceType,
};
use crate::store::ActionStore;

/// Filtered, sorted, paginated reads plus aggregate statistics.
/// Never mutates the store.
pub struct QueryEngine {
    store: Arc<dyn ActionStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn ActionStore>) -> Self {
        Self { store }
    }

    /// One page of the filtered collection in the requested order.
    pub async fn list(
        &self,
        filters: &ActionFilters,
        sort: &SortOptions,
        limit: usize,
        offset: usize,
    ) -> Result<ActionPage, AgoraError> {
        let (items, total) = self.store.query_actions(filters, sort, limit, offset).await?;
        Ok(ActionPage { items, total })
    }

    /// Aggregate counts over everything matching `filters`.
    pub async fn stats(&self, filters: &ActionFilters) -> Result<ActionStats, AgoraError> {
        let (actions, total) = self
            .store
            .query_actions(filters, &SortOptions::default(), usize::MAX, 0)
            .await?;

        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_impact_level: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_priority: BTreeMap<String, usize> = BTreeMap::new();
        let mut done = 0usize;

        for action in &actions {
            *by_type.entry(action.action_type.to_string()).or_default() += 1;
            *by_status.entry(action.status.to_string()).or_default() += 1;
            *by_impact_level
                .entry(action.impact_level.to_string())
                .or_default() += 1;
            *by_priority.entry(action.priority.to_string()).or_default() += 1;
            if matches!(
                action.status,
                ActionStatus::Completed | ActionStatus::ImpactAssessed
            ) {
                done += 1;
            }
        }

        let completion_rate = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64 * 100.0
        };

        Ok(ActionStats {
            total,
            by_type,
            by_status,
            by_impact_level,
            by_priority,
            completion_rate,
        })
    }

    /// Actions tied to one source context, newest first.
    ///
    /// Private actions are hidden unless `include_private` is set.
    pub async fn by_source(
        &self,
        source_type: SourceType,
        source_id: &str,
        include_private: bool,
    ) -> Result<Vec<Action>, AgoraError> {
        let filters = ActionFilters {
            source_type: Some(vec![source_type]),
            source_id: Some(source_id.to_string()),
            is_public: if include_private { None } else { Some(true) },
            ..Default::default()
        };
        let sort = SortOptions {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        };
        let (items, _) = self.store.query_actions(&filters, &sort, usize::MAX, 0).await?;
        Ok(items)
    }

    /// Actions a user is involved in, assigned or created, most recently
    /// touched first. Actions matching both roles appear once.
    pub async fn for_user(
        &self,
        user_id: &str,
        include_assigned: bool,
        include_created: bool,
    ) -> Result<Vec<Action>, AgoraError> {
        let sort = SortOptions {
            field: SortField::UpdatedAt,
            direction: SortDirection::Desc,
        };

        let mut merged: Vec<Action> = Vec::new();
        let mut seen: HashSet<uuid::Uuid> = HashSet::new();

        if include_assigned {
            let filters = ActionFilters {
                assigned_to: Some(user_id.to_string()),
                ..Default::default()
            };
            let (items, _) = self.store.query_actions(&filters, &sort, usize::MAX, 0).await?;
            for action in items {
                if seen.insert(action.id) {
                    merged.push(action);
                }
            }
        }

        if include_created {
            let filters = ActionFilters {
                created_by: Some(user_id.to_string()),
                ..Default::default()
            };
            let (items, _) = self.store.query_actions(&filters, &sort, usize::MAX, 0).await?;
            for action in items {
                if seen.insert(action.id) {
                    merged.push(action);
                }
            }
        }

        merged.sort_by(|a, b| sort.compare(a, b));
        Ok(merged)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryActionStore;
    use crate::types::{
        ActionType, DetectionMethod, ImpactLevel, OwnershipType, Priority,
    };
    use agora_core::types::Timestamp;
    use uuid::Uuid;

    fn action(title: &str, created_at: i64) -> Action {
        Action {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "A community task with details".to_string(),
            created_at: Timestamp(created_at),
            updated_at: Timestamp(created_at),
            action_type: ActionType::Task,
            impact_level: ImpactLevel::Individual,
            source_type: SourceType::Chat,
            status: ActionStatus::Proposed,
            priority: Priority::Medium,
            created_by: "u1".to_string(),
            assigned_to: vec![],
            volunteers: vec![],
            ownership_type: OwnershipType::SelfAssigned,
            is_public: false,
            promoted_from_private: false,
            source_id: None,
            source_message_id: None,
            detection_method: DetectionMethod::Manual,
            is_confirmed: false,
            due_date: None,
            estimated_effort: None,
            required_skills: vec![],
            tags: vec![],
            focus_room_id: None,
        }
    }

    async fn engine_with(actions: Vec<Action>) -> QueryEngine {
        let store = Arc::new(MemoryActionStore::new());
        for a in actions {
            store.save_action(a).await.unwrap();
        }
        QueryEngine::new(store)
    }

    #[tokio::test]
    async fn test_list_default_order_is_created_at_desc() {
        let engine = engine_with(vec![
            action("Old", 100),
            action("New", 300),
            action("Middle", 200),
        ])
        .await;

        let page = engine
            .list(&ActionFilters::default(), &SortOptions::default(), 10, 0)
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        let titles: Vec<&str> = page.items.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Middle", "Old"]);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let engine = engine_with((0..7).map(|i| action(&format!("A{i}"), i)).collect()).await;

        let sort = SortOptions {
            field: SortField::CreatedAt,
            direction: SortDirection::Asc,
        };
        let page = engine
            .list(&ActionFilters::default(), &sort, 3, 5)
            .await
            .unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "A5");
    }

    #[tokio::test]
    async fn test_stats_on_empty_filter_is_zero() {
        let engine = engine_with(vec![]).await;
        let stats = engine.stats(&ActionFilters::default()).await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert!(stats.by_type.is_empty());
    }

    #[tokio::test]
    async fn test_stats_counts_and_completion_rate() {
        let mut done = action("Done", 100);
        done.status = ActionStatus::Completed;
        let mut assessed = action("Assessed", 200);
        assessed.source_type = SourceType::Community;
        assessed.status = ActionStatus::ImpactAssessed;
        assessed.action_type = ActionType::Initiative;
        let open = action("Open", 300);
        let other_open = action("Also open", 400);

        let engine = engine_with(vec![done, assessed, open, other_open]).await;
        let stats = engine.stats(&ActionFilters::default()).await.unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_type.get("task"), Some(&3));
        assert_eq!(stats.by_type.get("initiative"), Some(&1));
        assert_eq!(stats.by_status.get("proposed"), Some(&2));
        assert_eq!(stats.by_status.get("completed"), Some(&1));
        assert_eq!(stats.by_priority.get("medium"), Some(&4));
        // 2 of 4 are completed or impact-assessed
        assert!((stats.completion_rate - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_stats_respects_filters() {
        let mut done = action("Done", 100);
        done.status = ActionStatus::Completed;
        done.tags = vec!["garden".to_string()];
        let open = action("Open", 200);

        let engine = engine_with(vec![done, open]).await;
        let filters = ActionFilters {
            tags: Some(vec!["garden".to_string()]),
            ..Default::default()
        };
        let stats = engine.stats(&filters).await.unwrap();
        assert_eq!(stats.total, 1);
        assert!((stats.completion_rate - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_by_source_hides_private_by_default() {
        let mut public = action("Public", 200);
        public.source_id = Some("club-7".to_string());
        public.source_type = SourceType::Club;
        public.is_public = true;
        let mut private = action("Private", 100);
        private.source_id = Some("club-7".to_string());
        private.source_type = SourceType::Club;
        let mut elsewhere = action("Elsewhere", 300);
        elsewhere.source_id = Some("club-9".to_string());
        elsewhere.source_type = SourceType::Club;
        elsewhere.is_public = true;

        let engine = engine_with(vec![public.clone(), private.clone(), elsewhere]).await;

        let visible = engine
            .by_source(SourceType::Club, "club-7", false)
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, public.id);

        let all = engine
            .by_source(SourceType::Club, "club-7", true)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        // newest first
        assert_eq!(all[0].id, public.id);
        assert_eq!(all[1].id, private.id);
    }

    #[tokio::test]
    async fn test_for_user_unions_without_duplicates() {
        let mut created = action("Created by me", 100);
        created.created_by = "me".to_string();
        created.updated_at = Timestamp(100);
        let mut assigned = action("Assigned to me", 200);
        assigned.assigned_to = vec!["me".to_string()];
        assigned.updated_at = Timestamp(300);
        let mut both = action("Created and assigned", 300);
        both.created_by = "me".to_string();
        both.assigned_to = vec!["me".to_string()];
        both.updated_at = Timestamp(200);
        let unrelated = action("Unrelated", 400);

        let engine = engine_with(vec![created, assigned.clone(), both.clone(), unrelated]).await;

        let mine = engine.for_user("me", true, true).await.unwrap();
        assert_eq!(mine.len(), 3);
        // ordered by updated_at desc
        assert_eq!(mine[0].id, assigned.id);
        assert_eq!(mine[1].id, both.id);
    }

    #[tokio::test]
    async fn test_for_user_role_toggles() {
        let mut created = action("Created by me", 100);
        created.created_by = "me".to_string();
        let mut assigned = action("Assigned to me", 200);
        assigned.assigned_to = vec!["me".to_string()];

        let engine = engine_with(vec![created.clone(), assigned.clone()]).await;

        let only_created = engine.for_user("me", false, true).await.unwrap();
        assert_eq!(only_created.len(), 1);
        assert_eq!(only_created[0].id, created.id);

        let only_assigned = engine.for_user("me", true, false).await.unwrap();
        assert_eq!(only_assigned.len(), 1);
        assert_eq!(only_assigned[0].id, assigned.id);

        let neither = engine.for_user("me", false, false).await.unwrap();
        assert!(neither.is_empty());
    }
}
