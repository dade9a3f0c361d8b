use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::DomainError;

pub const THINK_OPEN: &str = "<think>";
pub const THINK_CLOSE: &str = "</think>";

/// A model reply split into its reasoning span and the final answer.
///
/// Always derived from a stored message, never stored itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmented {
    reasoning: Option<String>,
    answer: String,
}

impl Segmented {
    pub fn new(reasoning: Option<String>, answer: impl Into<String>) -> Self {
        Self {
            reasoning,
            answer: answer.into(),
        }
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// True when there is a non-empty reasoning span worth showing.
    pub fn has_reasoning(&self) -> bool {
        self.reasoning.as_deref().is_some_and(|r| !r.is_empty())
    }

    pub fn into_parts(self) -> (Option<String>, String) {
        (self.reasoning, self.answer)
    }
}

/// Split a raw reply on the first `<think>` and the first `</think>`.
///
/// When either marker is missing the raw text comes back untouched as the
/// answer. When both exist their offsets are used as found, even if the
/// closing marker precedes the opening one; an inverted span yields an empty
/// reasoning string rather than a panic.
pub fn segment(raw: &str) -> Segmented {
    let (open, close) = match (raw.find(THINK_OPEN), raw.find(THINK_CLOSE)) {
        (Some(open), Some(close)) => (open, close),
        _ => return Segmented::new(None, raw),
    };

    let reasoning_start = open + THINK_OPEN.len();
    let reasoning = raw.get(reasoning_start..close).unwrap_or("").trim();

    let mut answer = String::with_capacity(raw.len());
    answer.push_str(&raw[..open]);
    answer.push_str(&raw[close + THINK_CLOSE.len()..]);

    Segmented::new(Some(reasoning.to_string()), answer.trim())
}

/// Like [`segment`], but rejects replies whose closing marker starts before
/// the opening marker ends.
pub fn segment_checked(raw: &str) -> Result<Segmented, DomainError> {
    if let (Some(open), Some(close)) = (raw.find(THINK_OPEN), raw.find(THINK_CLOSE)) {
        if close < open + THINK_OPEN.len() {
            return Err(DomainError::invalid_input(format!(
                "closing marker at byte {} precedes opening marker at byte {}",
                close, open
            )));
        }
    }
    Ok(segment(raw))
}

/// How replies are split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    /// Use marker offsets as found, inverted or not.
    #[default]
    Lenient,
    /// Show replies with inverted markers unsplit.
    Strict,
}

impl SegmentMode {
    pub fn apply(&self, raw: &str) -> Segmented {
        match self {
            SegmentMode::Lenient => segment(raw),
            SegmentMode::Strict => segment_checked(raw).unwrap_or_else(|e| {
                warn!("Showing reply unsplit: {}", e);
                Segmented::new(None, raw)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        let seg = segment("A<think>B</think>C");
        assert_eq!(seg.reasoning(), Some("B"));
        assert_eq!(seg.answer(), "AC");
    }

    #[test]
    fn test_reasoning_and_answer_are_trimmed() {
        let seg = segment("<think>  B  </think>");
        assert_eq!(seg.reasoning(), Some("B"));
        assert_eq!(seg.answer(), "");
    }

    #[test]
    fn test_answer_trimmed_as_a_whole() {
        let seg = segment("  intro <think>\nplan\n</think>\n\nThe answer is 4.  ");
        assert_eq!(seg.reasoning(), Some("plan"));
        assert_eq!(seg.answer(), "intro \n\nThe answer is 4.");
    }

    #[test]
    fn test_missing_marker_returns_raw_untouched() {
        for raw in [
            "  plain reply  ",
            "<think> never closed ",
            " only closes </think> ",
            "",
        ] {
            let seg = segment(raw);
            assert_eq!(seg.reasoning(), None);
            assert_eq!(seg.answer(), raw);
        }
    }

    #[test]
    fn test_only_first_markers_are_used() {
        let seg = segment("<think>X<think>Y</think>Z");
        assert_eq!(seg.reasoning(), Some("X<think>Y"));
        assert_eq!(seg.answer(), "Z");

        let seg = segment("<think>a</think>b<think>c</think>d");
        assert_eq!(seg.reasoning(), Some("a"));
        assert_eq!(seg.answer(), "b<think>c</think>d");
    }

    #[test]
    fn test_inverted_markers_regression_baseline() {
        let seg = segment("</think>A<think>B");
        assert_eq!(seg.reasoning(), Some(""));
        assert!(!seg.has_reasoning());
        assert_eq!(seg.answer(), "</think>AA<think>B");
    }

    #[test]
    fn test_empty_reasoning_is_not_shown() {
        let seg = segment("<think></think>Hello");
        assert_eq!(seg.reasoning(), Some(""));
        assert!(!seg.has_reasoning());
        assert_eq!(seg.answer(), "Hello");
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        let seg = segment("héllo <think>ünïcode 🤔</think> wörld");
        assert_eq!(seg.reasoning(), Some("ünïcode 🤔"));
        assert_eq!(seg.answer(), "héllo  wörld");
    }

    #[test]
    fn test_segment_is_idempotent() {
        let raw = "pre <think> why </think> post";
        assert_eq!(segment(raw), segment(raw));
    }

    #[test]
    fn test_checked_rejects_inverted_markers() {
        let err = segment_checked("</think>A<think>B").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_strict_mode_shows_inverted_reply_unsplit() {
        let raw = "</think>A<think>B";
        let seg = SegmentMode::Strict.apply(raw);
        assert_eq!(seg.reasoning(), None);
        assert_eq!(seg.answer(), raw);

        assert_eq!(SegmentMode::Lenient.apply(raw), segment(raw));
        assert_eq!(
            SegmentMode::Strict.apply("A<think>B</think>C"),
            segment("A<think>B</think>C")
        );
    }

    #[test]
    fn test_checked_matches_lenient_when_well_formed() {
        for raw in ["A<think>B</think>C", "no markers", "<think>open only"] {
            assert_eq!(segment_checked(raw).unwrap(), segment(raw));
        }
    }
}
