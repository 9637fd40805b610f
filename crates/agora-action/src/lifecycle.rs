//! Action lifecycle: creation, updates, promotion, deletion.
//!
//! All validation happens before any write, so a validation error leaves
//! the store untouched. Every state change is mirrored into the activity
//! log owned by the action.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use agora_core::config::ActionsConfig;
use agora_core::types::Timestamp;

use crate::error::ActionError;
use crate::store::ActionStore;
use crate::types::{
    Action, ActionActivity, ActionDraft, ActionPatch, ActionStatus, ActivityType, Priority,
};
use crate::workflow;

/// Orchestrates validated writes against the store.
pub struct ActionLifecycle {
    store: Arc<dyn ActionStore>,
    config: ActionsConfig,
}

fn parse_field<T>(field: &'static str, value: &str) -> Result<T, ActionError>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|_| ActionError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn require(field: &'static str, value: &str) -> Result<String, ActionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ActionError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

impl ActionLifecycle {
    pub fn new(store: Arc<dyn ActionStore>, config: ActionsConfig) -> Self {
        Self { store, config }
    }

    /// Validate a draft and persist it as a new action.
    ///
    /// The status defaults to the workflow's starting status when absent.
    /// A `created` activity is recorded; if that write fails the action is
    /// removed again so the two never diverge.
    pub async fn create(&self, draft: ActionDraft) -> Result<Action, ActionError> {
        let title = require("title", &draft.title)?;
        let description = require("description", &draft.description)?;
        let created_by = require("created_by", &draft.created_by)?;

        let action_type = parse_field("action_type", &draft.action_type)?;
        let impact_level = parse_field("impact_level", &draft.impact_level)?;
        let source_type = parse_field("source_type", &draft.source_type)?;
        let ownership_type = parse_field("ownership_type", &draft.ownership_type)?;
        let detection_method = parse_field("detection_method", &draft.detection_method)?;

        let status = match &draft.status {
            Some(s) => {
                let status: ActionStatus = parse_field("status", s)?;
                if !workflow::is_valid_status(source_type, status) {
                    return Err(ActionError::InvalidStatus {
                        source_type,
                        status,
                    });
                }
                status
            }
            None => workflow::default_status(source_type),
        };

        let priority = match &draft.priority {
            Some(p) => parse_field("priority", p)?,
            None => Priority::default(),
        };

        let now = Timestamp::now();
        let action = Action {
            id: Uuid::new_v4(),
            title,
            description,
            created_at: now,
            updated_at: now,
            action_type,
            impact_level,
            source_type,
            status,
            priority,
            created_by: created_by.clone(),
            assigned_to: draft.assigned_to,
            volunteers: draft.volunteers,
            ownership_type,
            is_public: draft.is_public,
            promoted_from_private: false,
            source_id: draft.source_id,
            source_message_id: draft.source_message_id,
            detection_method,
            is_confirmed: draft.is_confirmed,
            due_date: draft.due_date,
            estimated_effort: draft.estimated_effort,
            required_skills: draft.required_skills,
            tags: draft.tags,
            focus_room_id: draft.focus_room_id,
        };

        let action = self.store.save_action(action).await?;

        let activity = ActionActivity {
            id: Uuid::new_v4(),
            action_id: action.id,
            user_id: created_by,
            activity_type: ActivityType::Created,
            description: format!("Action \"{}\" was created", action.title),
            metadata: Some(json!({
                "initialStatus": action.status.to_string(),
                "detectionMethod": action.detection_method.to_string(),
            })),
            created_at: now,
        };
        if let Err(e) = self.store.append_activity(activity).await {
            // Roll the action back so a half-created record never survives
            let _ = self.store.delete_action(action.id).await;
            return Err(e.into());
        }

        info!(
            action_id = %action.id,
            source_type = %action.source_type,
            status = %action.status,
            "Action created"
        );
        Ok(action)
    }

    /// Apply a partial update.
    ///
    /// Status changes must stay within the source type's workflow; when
    /// transition enforcement is on they must also follow an edge of the
    /// transition graph. Records `status_changed` and `assigned` activities
    /// as appropriate.
    pub async fn update(
        &self,
        id: Uuid,
        patch: ActionPatch,
        actor: &str,
    ) -> Result<Action, ActionError> {
        let current = self
            .store
            .find_action(id)
            .await?
            .ok_or(ActionError::NotFound(id))?;

        let new_action_type = match &patch.action_type {
            Some(s) => Some(parse_field("action_type", s)?),
            None => None,
        };
        let new_impact_level = match &patch.impact_level {
            Some(s) => Some(parse_field("impact_level", s)?),
            None => None,
        };
        let new_ownership_type = match &patch.ownership_type {
            Some(s) => Some(parse_field("ownership_type", s)?),
            None => None,
        };
        let new_priority = match &patch.priority {
            Some(s) => Some(parse_field("priority", s)?),
            None => None,
        };
        let new_status = match &patch.status {
            Some(s) => {
                let status: ActionStatus = parse_field("status", s)?;
                if !workflow::is_valid_status(current.source_type, status) {
                    return Err(ActionError::InvalidStatus {
                        source_type: current.source_type,
                        status,
                    });
                }
                if self.config.enforce_transitions
                    && !workflow::is_legal_transition(current.source_type, current.status, status)
                {
                    return Err(ActionError::InvalidTransition {
                        source_type: current.source_type,
                        from: current.status,
                        to: status,
                    });
                }
                Some(status)
            }
            None => None,
        };

        let previous_status = current.status;
        let previous_assignees = current.assigned_to.clone();

        let mut updated = current;
        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(action_type) = new_action_type {
            updated.action_type = action_type;
        }
        if let Some(impact_level) = new_impact_level {
            updated.impact_level = impact_level;
        }
        if let Some(status) = new_status {
            updated.status = status;
        }
        if let Some(priority) = new_priority {
            updated.priority = priority;
        }
        if let Some(ownership_type) = new_ownership_type {
            updated.ownership_type = ownership_type;
        }
        if let Some(assigned_to) = patch.assigned_to {
            updated.assigned_to = assigned_to;
        }
        if let Some(volunteers) = patch.volunteers {
            updated.volunteers = volunteers;
        }
        if let Some(is_public) = patch.is_public {
            updated.is_public = is_public;
        }
        if let Some(is_confirmed) = patch.is_confirmed {
            updated.is_confirmed = is_confirmed;
        }
        if let Some(due_date) = patch.due_date {
            updated.due_date = Some(due_date);
        }
        if let Some(estimated_effort) = patch.estimated_effort {
            updated.estimated_effort = Some(estimated_effort);
        }
        if let Some(required_skills) = patch.required_skills {
            updated.required_skills = required_skills;
        }
        if let Some(tags) = patch.tags {
            updated.tags = tags;
        }
        if let Some(focus_room_id) = patch.focus_room_id {
            updated.focus_room_id = Some(focus_room_id);
        }
        updated.updated_at = Timestamp::now();

        let updated = self.store.save_action(updated).await?;

        if updated.status != previous_status {
            self.store
                .append_activity(ActionActivity {
                    id: Uuid::new_v4(),
                    action_id: updated.id,
                    user_id: actor.to_string(),
                    activity_type: ActivityType::StatusChanged,
                    description: format!(
                        "Status changed from \"{}\" to \"{}\"",
                        previous_status, updated.status
                    ),
                    metadata: Some(json!({
                        "previousStatus": previous_status.to_string(),
                        "newStatus": updated.status.to_string(),
                    })),
                    created_at: updated.updated_at,
                })
                .await?;
            info!(
                action_id = %updated.id,
                from = %previous_status,
                to = %updated.status,
                "Action status changed"
            );
        }

        let previous_set: HashSet<&String> = previous_assignees.iter().collect();
        let new_set: HashSet<&String> = updated.assigned_to.iter().collect();
        if previous_set != new_set {
            self.store
                .append_activity(ActionActivity {
                    id: Uuid::new_v4(),
                    action_id: updated.id,
                    user_id: actor.to_string(),
                    activity_type: ActivityType::Assigned,
                    description: "Assignment updated".to_string(),
                    metadata: Some(json!({
                        "previousAssignees": previous_assignees,
                        "newAssignees": updated.assigned_to,
                    })),
                    created_at: updated.updated_at,
                })
                .await?;
        }

        Ok(updated)
    }

    /// Make a private action publicly visible.
    ///
    /// Safe to call on an already-public action; each call records a
    /// promotion activity.
    pub async fn promote_to_public(&self, id: Uuid, actor: &str) -> Result<Action, ActionError> {
        let mut action = self
            .store
            .find_action(id)
            .await?
            .ok_or(ActionError::NotFound(id))?;

        action.is_public = true;
        action.promoted_from_private = true;
        action.updated_at = Timestamp::now();
        let action = self.store.save_action(action).await?;

        self.store
            .append_activity(ActionActivity {
                id: Uuid::new_v4(),
                action_id: action.id,
                user_id: actor.to_string(),
                activity_type: ActivityType::StatusChanged,
                description: "Action promoted to public visibility".to_string(),
                metadata: Some(json!({
                    "promotionType": "private_to_public",
                })),
                created_at: action.updated_at,
            })
            .await?;

        info!(action_id = %action.id, "Action promoted to public");
        Ok(action)
    }

    /// Delete an action and its entire activity log.
    pub async fn delete(&self, id: Uuid) -> Result<(), ActionError> {
        if self.store.find_action(id).await?.is_none() {
            return Err(ActionError::NotFound(id));
        }
        self.store.delete_action(id).await?;
        info!(action_id = %id, "Action deleted");
        Ok(())
    }

    /// Activity log for an action, newest first.
    pub async fn activities(
        &self,
        id: Uuid,
        limit: usize,
    ) -> Result<Vec<ActionActivity>, ActionError> {
        if self.store.find_action(id).await?.is_none() {
            return Err(ActionError::NotFound(id));
        }
        Ok(self.store.list_activities(id, limit).await?)
    }
}

// =============================================================================
// Tests
// =============================================================================
