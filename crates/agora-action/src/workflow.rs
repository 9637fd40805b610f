//! Status workflows per source context.
//!
//! Each source type carries its own status vocabulary and transition
//! graph. Chat actions move through a minimal three-state flow, while
//! community actions go through discussion, voting, and impact
//! assessment. The tables here are the single authority for which
//! statuses exist, which transitions are reachable, and which states
//! are terminal.

use crate::types::{ActionStatus, SourceType};

/// Statuses valid for a source type, in workflow order.
pub fn statuses(source: SourceType) -> &'static [ActionStatus] {
    use ActionStatus::*;
    match source {
        SourceType::Chat => &[Proposed, Active, Completed],
        SourceType::FocusRoom => &[Proposed, Planning, Active, InProgress, Completed],
        SourceType::Club => &[Proposed, Review, Approved, Active, Completed, Archived],
        SourceType::Community => &[
            Proposed,
            Discussion,
            Voting,
            Approved,
            Active,
            Completed,
            ImpactAssessed,
        ],
    }
}

/// The status a new action starts in when none is supplied.
/// Every workflow currently starts at `proposed`.
pub fn default_status(_source: SourceType) -> ActionStatus {
    ActionStatus::Proposed
}

/// Statuses directly reachable from `from` under the source's workflow.
///
/// Returns an empty slice for statuses outside the workflow or with no
/// outgoing edges.
pub fn allowed_transitions(source: SourceType, from: ActionStatus) -> &'static [ActionStatus] {
    use ActionStatus::*;
    match (source, from) {
        (SourceType::Chat, Proposed) => &[Active, Completed],
        (SourceType::Chat, Active) => &[Completed],

        (SourceType::FocusRoom, Proposed) => &[Planning, Active],
        (SourceType::FocusRoom, Planning) => &[Active, Proposed],
        (SourceType::FocusRoom, Active) => &[InProgress, Completed],
        (SourceType::FocusRoom, InProgress) => &[Completed, Active],

        (SourceType::Club, Proposed) => &[Review, Approved],
        (SourceType::Club, Review) => &[Approved, Proposed],
        (SourceType::Club, Approved) => &[Active],
        (SourceType::Club, Active) => &[Completed],
        (SourceType::Club, Completed) => &[Archived],

        (SourceType::Community, Proposed) => &[Discussion],
        (SourceType::Community, Discussion) => &[Voting, Proposed],
        (SourceType::Community, Voting) => &[Approved, Discussion],
        (SourceType::Community, Approved) => &[Active],
        (SourceType::Community, Active) => &[Completed],
        (SourceType::Community, Completed) => &[ImpactAssessed],

        _ => &[],
    }
}

/// Whether `status` belongs to the source type's workflow at all.
pub fn is_valid_status(source: SourceType, status: ActionStatus) -> bool {
    statuses(source).contains(&status)
}

/// Whether a transition is legal. Self-transitions are always legal so
/// that non-status updates can resubmit the current status unchanged.
pub fn is_legal_transition(source: SourceType, from: ActionStatus, to: ActionStatus) -> bool {
    from == to || allowed_transitions(source, from).contains(&to)
}

/// Whether `status` is terminal for the source type.
///
/// Community `completed` is not terminal: it still awaits impact
/// assessment.
pub fn is_terminal(source: SourceType, status: ActionStatus) -> bool {
    use ActionStatus::*;
    match source {
        SourceType::Chat | SourceType::FocusRoom => status == Completed,
        SourceType::Club => matches!(status, Completed | Archived),
        SourceType::Community => status == ImpactAssessed,
    }
}

/// Display metadata for rendering a status in a given workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMeta {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Label, color, and icon for a status within a source type's workflow.
///
/// Returns `None` when the status is not part of that workflow.
pub fn status_meta(source: SourceType, status: ActionStatus) -> Option<StatusMeta> {
    use ActionStatus::*;
    let meta = match (source, status) {
        (SourceType::Chat, Proposed) => StatusMeta {
            label: "Proposed",
            color: "blue",
            icon: "💡",
        },
        (SourceType::Chat, Active) => StatusMeta {
            label: "Active",
            color: "green",
            icon: "🎯",
        },
        (SourceType::Chat, Completed) => StatusMeta {
            label: "Completed",
            color: "gray",
            icon: "✅",
        },

        (SourceType::FocusRoom, Proposed) => StatusMeta {
            label: "Proposed",
            color: "blue",
            icon: "💡",
        },
        (SourceType::FocusRoom, Planning) => StatusMeta {
            label: "Planning",
            color: "yellow",
            icon: "📋",
        },
        (SourceType::FocusRoom, Active) => StatusMeta {
            label: "Active",
            color: "green",
            icon: "🎯",
        },
        (SourceType::FocusRoom, InProgress) => StatusMeta {
            label: "In Progress",
            color: "orange",
            icon: "⚡",
        },
        (SourceType::FocusRoom, Completed) => StatusMeta {
            label: "Completed",
            color: "gray",
            icon: "✅",
        },

        (SourceType::Club, Proposed) => StatusMeta {
            label: "Proposed",
            color: "blue",
            icon: "💡",
        },
        (SourceType::Club, Review) => StatusMeta {
            label: "Under Review",
            color: "purple",
            icon: "👀",
        },
        (SourceType::Club, Approved) => StatusMeta {
            label: "Approved",
            color: "green",
            icon: "👍",
        },
        (SourceType::Club, Active) => StatusMeta {
            label: "Active",
            color: "orange",
            icon: "🎯",
        },
        (SourceType::Club, Completed) => StatusMeta {
            label: "Completed",
            color: "gray",
            icon: "✅",
        },
        (SourceType::Club, Archived) => StatusMeta {
            label: "Archived",
            color: "gray",
            icon: "📦",
        },

        (SourceType::Community, Proposed) => StatusMeta {
            label: "Proposed",
            color: "blue",
            icon: "💡",
        },
        (SourceType::Community, Discussion) => StatusMeta {
            label: "Discussion",
            color: "yellow",
            icon: "💬",
        },
        (SourceType::Community, Voting) => StatusMeta {
            label: "Voting",
            color: "purple",
            icon: "🗳️",
        },
        (SourceType::Community, Approved) => StatusMeta {
            label: "Approved",
            color: "green",
            icon: "👍",
        },
        (SourceType::Community, Active) => StatusMeta {
            label: "Active",
            color: "orange",
            icon: "🎯",
        },
        (SourceType::Community, Completed) => StatusMeta {
            label: "Completed",
            color: "gray",
            icon: "✅",
        },
        (SourceType::Community, ImpactAssessed) => StatusMeta {
            label: "Impact Assessed",
            color: "teal",
            icon: "📊",
        },

        _ => return None,
    };
    Some(meta)
}
