//! A French term with its translation and scheduling state.
use super::quality::ReviewOutcome;
use super::review_data::DEFAULT_EASINESS;
use super::{CardReview, ReviewData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIFFICULTY: &str = "B2";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub french_text: String,
    pub translation: String,
    #[serde(default)]
    pub context_sentence: String,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub source: String,
    pub review: ReviewData,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

impl Flashcard {
    pub fn new(id: i64, french_text: &str, translation: &str, now: DateTime<Utc>) -> Self {
        Self::with_easiness(id, french_text, translation, DEFAULT_EASINESS, now)
    }

    pub fn with_easiness(
        id: i64,
        french_text: &str,
        translation: &str,
        easiness_factor: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            french_text: french_text.to_string(),
            translation: translation.to_string(),
            context_sentence: String::new(),
            difficulty_level: default_difficulty(),
            topic: String::new(),
            source: String::new(),
            review: ReviewData::new_card(easiness_factor, now),
            last_reviewed: None,
        }
    }

    /// Grades the outcome, reschedules the card and returns the log entry.
    pub fn record_review(&mut self, outcome: ReviewOutcome, now: DateTime<Utc>) -> CardReview {
        let quality = outcome.quality();
        self.review = self.review.apply(quality, now);
        self.last_reviewed = Some(now);

        CardReview {
            flashcard_id: self.id,
            quality,
            response_time_ms: outcome.response_latency_ms,
            was_correct: outcome.was_correct,
            reviewed_at: now,
        }
    }
}

/// Cards due at `now`, most overdue first, at most `limit` of them.
pub fn due_cards(cards: &[Flashcard], now: DateTime<Utc>, limit: usize) -> Vec<&Flashcard> {
    let mut due: Vec<&Flashcard> = cards.iter().filter(|c| c.review.is_due(now)).collect();
    due.sort_by_key(|c| c.review.next_review);
    due.truncate(limit);
    due
}
