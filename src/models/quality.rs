//! Maps an observed answer to a 0-5 recall quality grade.
//!
//! Response latency stands in for recall confidence: a fast correct answer
//! is a strong recall, a slow one an effortful recall.

use serde::{Deserialize, Serialize};

/// Correct answers faster than this are graded 5.
pub const FAST_RECALL_MS: u64 = 2000;
/// Correct answers faster than this (and not fast) are graded 4.
pub const SLOW_RECALL_MS: u64 = 5000;

/// Grades a single answer. Total over its domain.
pub fn estimate_quality(was_correct: bool, response_latency_ms: u64) -> u8 {
    if !was_correct {
        return 0;
    }
    match response_latency_ms {
        ms if ms < FAST_RECALL_MS => 5,
        ms if ms < SLOW_RECALL_MS => 4,
        _ => 3,
    }
}

/// Compares a typed answer with the expected translation.
///
/// The given answer is trimmed, then both sides are compared case-insensitively.
pub fn answer_matches(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.to_lowercase()
}

/// Outcome of showing one card to the user. Never persisted on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub was_correct: bool,
    pub response_latency_ms: u64,
}

impl ReviewOutcome {
    pub fn new(was_correct: bool, response_latency_ms: u64) -> Self {
        Self {
            was_correct,
            response_latency_ms,
        }
    }

    pub fn from_typed_answer(given: &str, expected: &str, response_latency_ms: u64) -> Self {
        Self::new(answer_matches(given, expected), response_latency_ms)
    }

    pub fn quality(&self) -> u8 {
        estimate_quality(self.was_correct, self.response_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_is_always_zero() {
        assert_eq!(estimate_quality(false, 0), 0);
        assert_eq!(estimate_quality(false, 1500), 0);
        assert_eq!(estimate_quality(false, u64::MAX), 0);
    }

    #[test]
    fn test_latency_boundaries() {
        assert_eq!(estimate_quality(true, 0), 5);
        assert_eq!(estimate_quality(true, 1999), 5);
        assert_eq!(estimate_quality(true, 2000), 4);
        assert_eq!(estimate_quality(true, 4999), 4);
        assert_eq!(estimate_quality(true, 5000), 3);
        assert_eq!(estimate_quality(true, u64::MAX), 3);
    }

    #[test]
    fn test_typed_answer_ignores_case_and_whitespace() {
        assert!(answer_matches("  Hello ", "hello"));
        assert!(answer_matches("MERCI", "Merci"));
        assert!(!answer_matches("bonjour", "hello"));
    }

    #[test]
    fn test_outcome_quality() {
        let outcome = ReviewOutcome::from_typed_answer("thank you", "Thank you", 3000);
        assert!(outcome.was_correct);
        assert_eq!(outcome.quality(), 4);
    }
}
