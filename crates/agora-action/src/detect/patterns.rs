//! Regex-based action pattern matching.
//!
//! Phrase patterns are compiled once and scanned against conversation
//! text. Each pattern carries the action type it suggests and a base
//! confidence. This is intentionally simple keyword matching, not NLP.

use regex::Regex;

use crate::types::ActionType;

/// A single compiled phrase pattern linked to an action type.
pub struct ActionPattern {
    pub regex: Regex,
    pub action_type: ActionType,
    pub base_confidence: f32,
}

/// One raw pattern hit: the captured span plus where it occurred.
#[derive(Debug, Clone)]
pub struct PatternHit {
    pub action_type: ActionType,
    pub confidence: f32,
    /// Trimmed content of the capture group.
    pub span: String,
    /// Byte offset of the match in the scanned text.
    pub start: usize,
    /// Position of the pattern in the ordered pattern list.
    pub pattern_index: usize,
}

/// Collection of all action patterns, compiled once and reused.
pub struct PatternSet {
    patterns: Vec<ActionPattern>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSet {
    pub fn new() -> Self {
        let defs: Vec<(&str, ActionType, f32)> = vec![
            (
                r"(?i)(?:need to|should|must|let's|we should)\s+([^.!?]+)",
                ActionType::Task,
                0.7,
            ),
            (
                r"(?i)(?:meeting|event|gathering|workshop)\s+([^.!?]+)",
                ActionType::Event,
                0.8,
            ),
            (
                r"(?i)(?:propose|suggest|idea)\s+([^.!?]+)",
                ActionType::Proposal,
                0.6,
            ),
            (
                r"(?i)(?:need help|looking for|seeking)\s+([^.!?]+)",
                ActionType::ResourceNeeded,
                0.8,
            ),
        ];

        let patterns = defs
            .into_iter()
            .map(|(pat, action_type, base_confidence)| ActionPattern {
                regex: Regex::new(pat).expect("Invalid action pattern"),
                action_type,
                base_confidence,
            })
            .collect();

        Self { patterns }
    }

    /// Scan text against every pattern.
    ///
    /// Captures under 10 characters after trimming are dropped as noise.
    /// Hits are ordered by position in the text, then by pattern order.
    pub fn scan(&self, text: &str) -> Vec<PatternHit> {
        let mut hits = Vec::new();

        for (pattern_index, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                let Some(group) = caps.get(1) else { continue };
                let span = group.as_str().trim();
                if span.chars().count() <= 10 {
                    continue;
                }
                hits.push(PatternHit {
                    action_type: pattern.action_type,
                    confidence: pattern.base_confidence,
                    span: span.to_string(),
                    start: whole.start(),
                    pattern_index,
                });
            }
        }

        hits.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.pattern_index.cmp(&b.pattern_index))
        });
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ps() -> PatternSet {
        PatternSet::new()
    }

    #[test]
    fn test_need_to_detects_task() {
        let hits = ps().scan("We need to organize the spring street cleanup.");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].action_type, ActionType::Task);
        assert!((hits[0].confidence - 0.7).abs() < f32::EPSILON);
        assert_eq!(hits[0].span, "organize the spring street cleanup");
    }

    #[test]
    fn test_meeting_detects_event() {
        let hits = ps().scan("There is a meeting about the playground renovation.");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].action_type, ActionType::Event);
        assert!((hits[0].confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_suggest_detects_proposal() {
        let hits = ps().scan("I suggest starting a monthly repair cafe.");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].action_type, ActionType::Proposal);
        assert!((hits[0].confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_looking_for_detects_resource_needed() {
        let hits = ps().scan("We are looking for volunteers with carpentry skills.");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].action_type, ActionType::ResourceNeeded);
    }

    #[test]
    fn test_short_capture_is_dropped() {
        // "go home" trimmed is well under the noise threshold
        let hits = ps().scan("I should go home");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_capture_stops_at_sentence_end() {
        let hits = ps().scan("We must repaint the community hall. The paint is peeling.");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span, "repaint the community hall");
    }

    #[test]
    fn test_case_insensitive() {
        let hits = ps().scan("WE SHOULD PLANT TREES ALONG THE AVENUE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].action_type, ActionType::Task);
    }

    #[test]
    fn test_hits_ordered_by_position() {
        let hits = ps().scan(
            "I propose building a book exchange box! Also we need to find someone to host the workshop planning session.",
        );
        assert!(hits.len() >= 2);
        for w in hits.windows(2) {
            assert!(w[0].start <= w[1].start);
        }
        assert_eq!(hits[0].action_type, ActionType::Proposal);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(ps().scan("").is_empty());
    }
}
