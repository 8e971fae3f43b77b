//! Study session over the cards that are due.
//!
//! Each card is graded and rescheduled once, on its first showing. Cards that
//! fail come back in later rounds as practice until they are answered well;
//! practice answers neither reschedule the card nor count towards the tally.

use super::quality::ReviewOutcome;
use super::sm2::PASSING_QUALITY;
use super::{CardReview, Flashcard, SessionSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    /// Flip the card and self-report.
    Study,
    /// Type the translation.
    Test,
}

/// What happened to the card that was just answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answered {
    /// First showing: the card was rescheduled and this entry belongs in the log.
    Graded(CardReview),
    /// Retry round: nothing to persist.
    Practiced { flashcard_id: i64, quality: u8 },
}

impl Answered {
    pub fn quality(&self) -> u8 {
        match self {
            Answered::Graded(review) => review.quality,
            Answered::Practiced { quality, .. } => *quality,
        }
    }

    pub fn into_review(self) -> Option<CardReview> {
        match self {
            Answered::Graded(review) => Some(review),
            Answered::Practiced { .. } => None,
        }
    }
}

pub struct LearningSession {
    pub mode: StudyMode,
    pub started_at: DateTime<Utc>,
    pub round_number: usize,
    cards: Vec<Flashcard>,
    current_round_cards: Vec<usize>,
    failed_cards: Vec<usize>,
    current_index: usize,
    cards_reviewed: u32,
    cards_correct: u32,
}

impl LearningSession {
    pub fn new(mode: StudyMode, cards: Vec<Flashcard>, started_at: DateTime<Utc>) -> Self {
        let indices: Vec<usize> = (0..cards.len()).collect();
        tracing::debug!(?mode, cards = cards.len(), "starting learning session");

        Self {
            mode,
            started_at,
            round_number: 1,
            cards,
            current_round_cards: indices,
            failed_cards: Vec::new(),
            current_index: 0,
            cards_reviewed: 0,
            cards_correct: 0,
        }
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.cards.get(idx))
    }

    /// Answers the current card and moves on.
    ///
    /// Returns `None` once the session is complete.
    pub fn answer(&mut self, outcome: ReviewOutcome, now: DateTime<Utc>) -> Option<Answered> {
        let idx = *self.current_round_cards.get(self.current_index)?;
        let card = self.cards.get_mut(idx)?;

        let answered = if self.round_number == 1 {
            let review = card.record_review(outcome, now);
            self.cards_reviewed += 1;
            if outcome.was_correct {
                self.cards_correct += 1;
            }
            tracing::debug!(
                flashcard_id = review.flashcard_id,
                quality = review.quality,
                next_review = %card.review.next_review,
                "card reviewed"
            );
            Answered::Graded(review)
        } else {
            Answered::Practiced {
                flashcard_id: card.id,
                quality: outcome.quality(),
            }
        };

        if answered.quality() < PASSING_QUALITY {
            self.failed_cards.push(idx);
        }

        self.current_index += 1;
        if self.current_index >= self.current_round_cards.len() {
            self.start_next_round();
        }
        Some(answered)
    }

    /// Test mode: checks the typed answer against the current card's translation.
    pub fn answer_typed(
        &mut self,
        given: &str,
        response_latency_ms: u64,
        now: DateTime<Utc>,
    ) -> Option<Answered> {
        let expected = self.current_card()?.translation.clone();
        let outcome = ReviewOutcome::from_typed_answer(given, &expected, response_latency_ms);
        self.answer(outcome, now)
    }

    /// Starts a round with the cards that failed, or ends the session.
    fn start_next_round(&mut self) {
        self.current_index = 0;
        if self.failed_cards.is_empty() {
            self.current_round_cards.clear();
            tracing::debug!(rounds = self.round_number, "learning session complete");
            return;
        }
        self.current_round_cards = std::mem::take(&mut self.failed_cards);
        self.round_number += 1;
    }

    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.current_index
    }

    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Practice): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }

    pub fn finish(&self, ended_at: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            mode: self.mode,
            started_at: self.started_at,
            ended_at,
            cards_reviewed: self.cards_reviewed,
            cards_correct: self.cards_correct,
            duration_seconds: (ended_at - self.started_at).num_seconds().max(0) as u64,
        }
    }

    /// Hands the rescheduled cards back to the caller for storage.
    pub fn into_cards(self) -> Vec<Flashcard> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 19, 0, 0).unwrap()
    }

    fn cards() -> Vec<Flashcard> {
        vec![
            Flashcard::new(1, "chat", "cat", now()),
            Flashcard::new(2, "chien", "dog", now()),
            Flashcard::new(3, "oiseau", "bird", now()),
        ]
    }

    #[test]
    fn test_single_round_when_all_pass() {
        let mut session = LearningSession::new(StudyMode::Study, cards(), now());
        assert_eq!(session.phase_message(), "Round 1: 3 cards");

        for _ in 0..3 {
            let answered = session.answer(ReviewOutcome::new(true, 1000), now());
            assert!(matches!(answered, Some(Answered::Graded(_))));
        }

        assert!(session.is_completed());
        assert!(session.current_card().is_none());
        assert!(session.answer(ReviewOutcome::new(true, 1000), now()).is_none());
    }

    #[test]
    fn test_failed_cards_are_retried_as_practice() {
        let mut session = LearningSession::new(StudyMode::Study, cards(), now());

        session.answer(ReviewOutcome::new(true, 1000), now());
        session.answer(ReviewOutcome::new(false, 1000), now());
        session.answer(ReviewOutcome::new(true, 6000), now());

        assert!(!session.is_completed());
        assert_eq!(session.round_number, 2);
        assert_eq!(session.total_count(), 1);
        assert_eq!(session.current_card().map(|c| c.id), Some(2));
        assert_eq!(session.phase_message(), "Round 2 (Practice): 1 cards to retry");

        let answered = session.answer(ReviewOutcome::new(true, 1000), now() + Duration::minutes(1));
        assert_eq!(
            answered,
            Some(Answered::Practiced {
                flashcard_id: 2,
                quality: 5
            })
        );
        assert!(session.is_completed());

        let summary = session.finish(now() + Duration::minutes(5));
        assert_eq!(summary.cards_reviewed, 3);
        assert_eq!(summary.cards_correct, 2);
        assert_eq!(summary.duration_seconds, 300);
    }

    #[test]
    fn test_retried_card_keeps_first_grading() {
        let mut session = LearningSession::new(StudyMode::Study, cards(), now());
        session.answer(ReviewOutcome::new(true, 1000), now());
        session.answer(ReviewOutcome::new(false, 1000), now());
        session.answer(ReviewOutcome::new(true, 1000), now());

        // Fails again in practice, then passes.
        session.answer(ReviewOutcome::new(false, 1000), now());
        assert_eq!(session.round_number, 3);
        session.answer(ReviewOutcome::new(true, 1000), now());
        assert!(session.is_completed());

        let dog = session.into_cards().remove(1);
        assert_eq!(dog.review.easiness_factor, 2.5);
        assert_eq!(dog.review.repetitions, 0);
        assert_eq!(dog.review.interval_days, 1);
        assert_eq!(dog.review.next_review, now() + Duration::days(1));
    }

    #[test]
    fn test_typed_answers() {
        let mut session = LearningSession::new(StudyMode::Test, cards(), now());

        let review = session.answer_typed(" CAT ", 1500, now()).and_then(Answered::into_review).unwrap();
        assert!(review.was_correct);
        assert_eq!(review.quality, 5);

        let review = session.answer_typed("wolf", 1500, now()).and_then(Answered::into_review).unwrap();
        assert!(!review.was_correct);
        assert_eq!(review.quality, 0);
        assert_eq!(session.remaining_count(), 1);
    }

    #[test]
    fn test_into_cards_returns_rescheduled_cards() {
        let mut session = LearningSession::new(StudyMode::Study, cards(), now());
        session.answer(ReviewOutcome::new(true, 1000), now());

        let cards = session.into_cards();
        assert_eq!(cards[0].review.repetitions, 1);
        assert_eq!(cards[1].review.repetitions, 0);
        assert_eq!(cards[0].last_reviewed, Some(now()));
    }

    #[test]
    fn test_empty_session_is_complete() {
        let session = LearningSession::new(StudyMode::Study, Vec::new(), now());
        assert!(session.is_completed());
        assert_eq!(session.finish(now()).retention_rate(), 0.0);
    }
}
