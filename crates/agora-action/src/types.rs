//! Core types and value objects for the action engine.
//!
//! Defines actions, audit activities, and their supporting enumerations,
//! plus the filter/sort/page shapes used by the query side.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use agora_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// What kind of work an action represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Task,
    Event,
    Initiative,
    Proposal,
    ResourceNeeded,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Task => write!(f, "task"),
            ActionType::Event => write!(f, "event"),
            ActionType::Initiative => write!(f, "initiative"),
            ActionType::Proposal => write!(f, "proposal"),
            ActionType::ResourceNeeded => write!(f, "resource_needed"),
        }
    }
}

impl std::str::FromStr for ActionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task" => Ok(ActionType::Task),
            "event" => Ok(ActionType::Event),
            "initiative" => Ok(ActionType::Initiative),
            "proposal" => Ok(ActionType::Proposal),
            "resource_needed" => Ok(ActionType::ResourceNeeded),
            _ => Err(format!("Unknown action type: {}", s)),
        }
    }
}

/// Breadth of the change an action aims at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Individual,
    Local,
    Community,
    Systemic,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactLevel::Individual => write!(f, "individual"),
            ImpactLevel::Local => write!(f, "local"),
            ImpactLevel::Community => write!(f, "community"),
            ImpactLevel::Systemic => write!(f, "systemic"),
        }
    }
}

impl std::str::FromStr for ImpactLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(ImpactLevel::Individual),
            "local" => Ok(ImpactLevel::Local),
            "community" => Ok(ImpactLevel::Community),
            "systemic" => Ok(ImpactLevel::Systemic),
            _ => Err(format!("Unknown impact level: {}", s)),
        }
    }
}

/// The kind of place an action originated from.
///
/// Determines which status workflow governs the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Chat,
    FocusRoom,
    Club,
    Community,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Chat => write!(f, "chat"),
            SourceType::FocusRoom => write!(f, "focus_room"),
            SourceType::Club => write!(f, "club"),
            SourceType::Community => write!(f, "community"),
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(SourceType::Chat),
            "focus_room" => Ok(SourceType::FocusRoom),
            "club" => Ok(SourceType::Club),
            "community" => Ok(SourceType::Community),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

/// Lifecycle status of an action.
///
/// This is the union of all workflow statuses; which members are valid for a
/// given action depends on its `SourceType` (see the `workflow` module).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Proposed,
    Planning,
    Review,
    Discussion,
    Voting,
    Approved,
    Active,
    InProgress,
    Completed,
    Archived,
    ImpactAssessed,
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Proposed => write!(f, "proposed"),
            ActionStatus::Planning => write!(f, "planning"),
            ActionStatus::Review => write!(f, "review"),
            ActionStatus::Discussion => write!(f, "discussion"),
            ActionStatus::Voting => write!(f, "voting"),
            ActionStatus::Approved => write!(f, "approved"),
            ActionStatus::Active => write!(f, "active"),
            ActionStatus::InProgress => write!(f, "in_progress"),
            ActionStatus::Completed => write!(f, "completed"),
            ActionStatus::Archived => write!(f, "archived"),
            ActionStatus::ImpactAssessed => write!(f, "impact_assessed"),
        }
    }
}

impl std::str::FromStr for ActionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposed" => Ok(ActionStatus::Proposed),
            "planning" => Ok(ActionStatus::Planning),
            "review" => Ok(ActionStatus::Review),
            "discussion" => Ok(ActionStatus::Discussion),
            "voting" => Ok(ActionStatus::Voting),
            "approved" => Ok(ActionStatus::Approved),
            "active" => Ok(ActionStatus::Active),
            "in_progress" => Ok(ActionStatus::InProgress),
            "completed" => Ok(ActionStatus::Completed),
            "archived" => Ok(ActionStatus::Archived),
            "impact_assessed" => Ok(ActionStatus::ImpactAssessed),
            _ => Err(format!("Unknown action status: {}", s)),
        }
    }
}

/// Urgency of an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Numeric rank used for sorting: low < medium < high < urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Urgent => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// How responsibility for an action is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipType {
    SelfAssigned,
    LeaderAssigned,
    CommunityDriven,
}

impl fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnershipType::SelfAssigned => write!(f, "self_assigned"),
            OwnershipType::LeaderAssigned => write!(f, "leader_assigned"),
            OwnershipType::CommunityDriven => write!(f, "community_driven"),
        }
    }
}

impl std::str::FromStr for OwnershipType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self_assigned" => Ok(OwnershipType::SelfAssigned),
            "leader_assigned" => Ok(OwnershipType::LeaderAssigned),
            "community_driven" => Ok(OwnershipType::CommunityDriven),
            _ => Err(format!("Unknown ownership type: {}", s)),
        }
    }
}

/// How an action entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Auto,
    Manual,
    Hybrid,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Auto => write!(f, "auto"),
            DetectionMethod::Manual => write!(f, "manual"),
            DetectionMethod::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for DetectionMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(DetectionMethod::Auto),
            "manual" => Ok(DetectionMethod::Manual),
            "hybrid" => Ok(DetectionMethod::Hybrid),
            _ => Err(format!("Unknown detection method: {}", s)),
        }
    }
}

/// Kind of event recorded in an action's audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Created,
    Assigned,
    StatusChanged,
    Commented,
    Completed,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Created => write!(f, "created"),
            ActivityType::Assigned => write!(f, "assigned"),
            ActivityType::StatusChanged => write!(f, "status_changed"),
            ActivityType::Commented => write!(f, "commented"),
            ActivityType::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for ActivityType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(ActivityType::Created),
            "assigned" => Ok(ActivityType::Assigned),
            "status_changed" => Ok(ActivityType::StatusChanged),
            "commented" => Ok(ActivityType::Commented),
            "completed" => Ok(ActivityType::Completed),
            _ => Err(format!("Unknown activity type: {}", s)),
        }
    }
}

// =============================================================================
// Domain Structs
// =============================================================================

/// A trackable unit of community work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    pub action_type: ActionType,
    pub impact_level: ImpactLevel,
    pub source_type: SourceType,

    pub status: ActionStatus,
    pub priority: Priority,

    pub created_by: String,
    pub assigned_to: Vec<String>,
    pub volunteers: Vec<String>,
    pub ownership_type: OwnershipType,

    pub is_public: bool,
    pub promoted_from_private: bool,

    pub source_id: Option<String>,
    pub source_message_id: Option<String>,

    pub detection_method: DetectionMethod,
    pub is_confirmed: bool,

    pub due_date: Option<Timestamp>,
    pub estimated_effort: Option<String>,
    pub required_skills: Vec<String>,
    pub tags: Vec<String>,

    pub focus_room_id: Option<String>,
}

/// An immutable, append-only audit record owned by one action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionActivity {
    pub id: Uuid,
    pub action_id: Uuid,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// Input for creating an action.
///
/// Enumerated fields arrive as wire-level strings and are validated against
/// their closed sets by the lifecycle before anything is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionDraft {
    pub title: String,
    pub description: String,
    pub action_type: String,
    pub impact_level: String,
    pub source_type: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub created_by: String,
    pub assigned_to: Vec<String>,
    pub volunteers: Vec<String>,
    pub ownership_type: String,
    pub is_public: bool,
    pub source_id: Option<String>,
    pub source_message_id: Option<String>,
    pub detection_method: String,
    pub is_confirmed: bool,
    pub due_date: Option<Timestamp>,
    pub estimated_effort: Option<String>,
    pub required_skills: Vec<String>,
    pub tags: Vec<String>,
    pub focus_room_id: Option<String>,
}

/// Partial update for an action. Absent fields are left unchanged.
///
/// `id`, `created_at`, `created_by`, `detection_method`, and `source_type`
/// are immutable and deliberately not representable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub action_type: Option<String>,
    pub impact_level: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub ownership_type: Option<String>,
    pub assigned_to: Option<Vec<String>>,
    pub volunteers: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub is_confirmed: Option<bool>,
    pub due_date: Option<Timestamp>,
    pub estimated_effort: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub focus_room_id: Option<String>,
}

/// A candidate action proposed by the detector. Never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub confidence: f32,
    pub suggested_title: String,
    pub suggested_description: String,
    pub suggested_type: ActionType,
    pub suggested_impact_level: ImpactLevel,
    pub due_date: Option<Timestamp>,
    pub estimated_effort: Option<String>,
    pub required_skills: Vec<String>,
    pub tags: Vec<String>,
}

// =============================================================================
// Query shapes
// =============================================================================

/// Inclusive due-date window; either bound may be open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DueDateRange {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Filters over the action collection. All present filters are AND-combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionFilters {
    pub action_type: Option<Vec<ActionType>>,
    pub impact_level: Option<Vec<ImpactLevel>>,
    pub source_type: Option<Vec<SourceType>>,
    pub status: Option<Vec<ActionStatus>>,
    pub priority: Option<Vec<Priority>>,
    pub is_public: Option<bool>,
    /// Match actions whose `assigned_to` contains this user id.
    pub assigned_to: Option<String>,
    /// Match actions created by this user id.
    pub created_by: Option<String>,
    pub source_id: Option<String>,
    pub due_date: Option<DueDateRange>,
    /// Match actions whose tag set intersects this set.
    pub tags: Option<Vec<String>>,
    /// Case-insensitive substring match against title or description.
    pub search: Option<String>,
}

impl ActionFilters {
    /// Whether the given action satisfies every present filter.
    pub fn matches(&self, action: &Action) -> bool {
        if let Some(types) = &self.action_type {
            if !types.contains(&action.action_type) {
                return false;
            }
        }
        if let Some(levels) = &self.impact_level {
            if !levels.contains(&action.impact_level) {
                return false;
            }
        }
        if let Some(sources) = &self.source_type {
            if !sources.contains(&action.source_type) {
                return false;
            }
        }
        if let Some(statuses) = &self.status {
            if !statuses.contains(&action.status) {
                return false;
            }
        }
        if let Some(priorities) = &self.priority {
            if !priorities.contains(&action.priority) {
                return false;
            }
        }
        if let Some(is_public) = self.is_public {
            if action.is_public != is_public {
                return false;
            }
        }
        if let Some(user) = &self.assigned_to {
            if !action.assigned_to.iter().any(|u| u == user) {
                return false;
            }
        }
        if let Some(user) = &self.created_by {
            if &action.created_by != user {
                return false;
            }
        }
        if let Some(source_id) = &self.source_id {
            if action.source_id.as_deref() != Some(source_id.as_str()) {
                return false;
            }
        }
        if let Some(range) = &self.due_date {
            match action.due_date {
                Some(due) => {
                    if let Some(from) = range.from {
                        if due < from {
                            return false;
                        }
                    }
                    if let Some(to) = range.to {
                        if due > to {
                            return false;
                        }
                    }
                }
                // A due-date window only matches actions that have one
                None => return false,
            }
        }
        if let Some(tags) = &self.tags {
            if !tags.iter().any(|t| action.tags.contains(t)) {
                return false;
            }
        }
        if let Some(query) = &self.search {
            let q = query.to_lowercase();
            if !action.title.to_lowercase().contains(&q)
                && !action.description.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        true
    }
}

/// Sortable fields for action listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    DueDate,
    Priority,
    Title,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort specification. Defaults to `created_at desc`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOptions {
    /// Total order over actions for this sort; ties broken by id so that
    /// identical queries always return identical orderings.
    pub fn compare(&self, a: &Action, b: &Action) -> Ordering {
        let ord = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            // Actions without a due date sort before dated ones ascending
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortField::Title => a.title.cmp(&b.title),
        };
        let ord = match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        ord.then_with(|| a.id.cmp(&b.id))
    }
}

/// One page of a filtered listing. `total` counts all matches before
/// pagination so callers can compute "has more".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPage {
    pub items: Vec<Action>,
    pub total: usize,
}

/// Aggregate statistics over a filtered slice of the action collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionStats {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub by_impact_level: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    /// Percentage of actions in a completed or impact-assessed status.
    /// 0.0 when the filtered slice is empty.
    pub completion_rate: f64,
}

// =============================================================================
// Tests
// =============================================================================
