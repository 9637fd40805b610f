//! Heuristic action detection from conversation text.
//!
//! Produces candidate actions for a human (or pipeline) to review and
//! optionally submit through the lifecycle. Never persists anything.

mod due_date;
mod patterns;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::ActionError;
use crate::types::{DetectionResult, ImpactLevel, SourceType};

pub use patterns::{ActionPattern, PatternHit, PatternSet};

const MIN_TEXT_LEN: usize = 10;
const MAX_TEXT_LEN: usize = 5000;
const TITLE_LEN: usize = 50;

fn numeric_effort_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d+)\s+(hour|hours|day|days|week|weeks)\b")
            .expect("Invalid numeric effort regex")
    })
}

fn difficulty_effort_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(quick|fast|simple|complex|difficult)\b")
            .expect("Invalid difficulty regex")
    })
}

/// Scans free-form text for candidate actions.
pub struct ActionDetector {
    patterns: PatternSet,
    min_confidence: Option<f32>,
}

impl Default for ActionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionDetector {
    pub fn new() -> Self {
        Self {
            patterns: PatternSet::new(),
            min_confidence: None,
        }
    }

    /// Drop candidates scoring below `floor`.
    pub fn with_min_confidence(floor: f32) -> Self {
        Self {
            patterns: PatternSet::new(),
            min_confidence: Some(floor),
        }
    }

    /// Detect candidate actions in `text` originating from the given source.
    ///
    /// Validates text length (10-5000 characters inclusive) and the source
    /// type before scanning. Results come back in text scan order, pattern
    /// order as tiebreak, and are never persisted.
    pub fn detect(
        &self,
        text: &str,
        source_type: &str,
        source_id: &str,
        user_id: &str,
    ) -> Result<Vec<DetectionResult>, ActionError> {
        self.detect_at(text, source_type, source_id, user_id, Utc::now().date_naive())
    }

    fn detect_at(
        &self,
        text: &str,
        source_type: &str,
        source_id: &str,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<DetectionResult>, ActionError> {
        if source_id.trim().is_empty() {
            return Err(ActionError::MissingField("source_id"));
        }
        if user_id.trim().is_empty() {
            return Err(ActionError::MissingField("user_id"));
        }

        let len = text.chars().count();
        if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len) {
            return Err(ActionError::TextLength {
                len,
                min: MIN_TEXT_LEN,
                max: MAX_TEXT_LEN,
            });
        }

        SourceType::from_str(source_type).map_err(|_| ActionError::InvalidValue {
            field: "source_type",
            value: source_type.to_string(),
        })?;

        // Context is shared by every candidate: the whole text, not just
        // the matched span, drives impact, effort, and due date.
        let impact_level = infer_impact(text);
        let estimated_effort = extract_effort(text);
        let due = due_date::resolve(text, today);

        let results: Vec<DetectionResult> = self
            .patterns
            .scan(text)
            .into_iter()
            .filter(|hit| match self.min_confidence {
                Some(floor) => hit.confidence >= floor,
                None => true,
            })
            .map(|hit| DetectionResult {
                confidence: hit.confidence,
                suggested_title: truncate_title(&hit.span),
                suggested_description: hit.span,
                suggested_type: hit.action_type,
                suggested_impact_level: impact_level,
                due_date: due,
                estimated_effort: estimated_effort.clone(),
                required_skills: Vec::new(),
                tags: Vec::new(),
            })
            .collect();

        debug!(
            source_type,
            candidates = results.len(),
            "Scanned text for action candidates"
        );
        Ok(results)
    }
}

fn truncate_title(span: &str) -> String {
    if span.chars().count() > TITLE_LEN {
        let cut: String = span.chars().take(TITLE_LEN).collect();
        format!("{cut}...")
    } else {
        span.to_string()
    }
}

/// Keyword-presence impact inference; individual is the fallback.
fn infer_impact(text: &str) -> ImpactLevel {
    let lower = text.to_lowercase();
    if lower.contains("community") || lower.contains("everyone") || lower.contains("all") {
        ImpactLevel::Community
    } else if lower.contains("neighborhood") || lower.contains("local") {
        ImpactLevel::Local
    } else if lower.contains("system") || lower.contains("policy") || lower.contains("government") {
        ImpactLevel::Systemic
    } else {
        ImpactLevel::Individual
    }
}

/// Numeric durations win over subjective difficulty words.
fn extract_effort(text: &str) -> Option<String> {
    if let Some(m) = numeric_effort_re().find(text) {
        return Some(m.as_str().to_string());
    }
    difficulty_effort_re()
        .find(text)
        .map(|m| m.as_str().to_string())
}

// =============================================================================
// Tests
// =============================================================================
