//! Action engine for Agora.
//!
//! Tracks units of community work through per-source-type status
//! workflows, detects candidate actions in conversation text, and
//! serves filtered views and statistics over the collection.

pub mod detect;
pub mod error;
pub mod lifecycle;
pub mod query;
pub mod store;
pub mod types;
pub mod workflow;

pub use detect::ActionDetector;
pub use error::ActionError;
pub use lifecycle::ActionLifecycle;
pub use query::QueryEngine;
pub use store::{ActionStore, MemoryActionStore};
pub use types::{
    Action, ActionActivity, ActionDraft, ActionFilters, ActionPage, ActionPatch, ActionStats,
    ActionStatus, ActionType, ActivityType, DetectionMethod, DetectionResult, DueDateRange,
    ImpactLevel, OwnershipType, Priority, SortDirection, SortField, SortOptions, SourceType,
};
