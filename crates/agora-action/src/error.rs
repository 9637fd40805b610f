//! Error types for the action engine.

use agora_core::error::AgoraError;
use uuid::Uuid;

use crate::types::{ActionStatus, SourceType};

/// Errors from lifecycle, detection, and query operations.
///
/// Validation variants are raised before any write is attempted, so a
/// validation failure guarantees zero side effects.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Status {status} is not valid for source type {source_type}")]
    InvalidStatus {
        source_type: SourceType,
        status: ActionStatus,
    },

    #[error("Invalid status transition for {source_type}: {from} -> {to}")]
    InvalidTransition {
        source_type: SourceType,
        from: ActionStatus,
        to: ActionStatus,
    },

    #[error("Text must be between {min} and {max} characters, got {len}")]
    TextLength { len: usize, min: usize, max: usize },

    #[error("Action not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] AgoraError),
}
