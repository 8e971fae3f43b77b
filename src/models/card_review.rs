//! Log entry written for every answered card.
use super::ReviewData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReview {
    pub flashcard_id: i64,
    pub quality: u8,
    pub response_time_ms: u64,
    pub was_correct: bool,
    pub reviewed_at: DateTime<Utc>,
}

/// Rebuilds a card's schedule by running its logged reviews in order.
pub fn replay(initial: ReviewData, reviews: &[CardReview]) -> ReviewData {
    let state = reviews
        .iter()
        .fold(initial, |state, review| state.apply(review.quality, review.reviewed_at));
    tracing::debug!(
        reviews = reviews.len(),
        repetitions = state.repetitions,
        interval_days = state.interval_days,
        "replayed review log"
    );
    state
}
