//! Per-session and running study statistics.
use super::learning_session::StudyMode;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: StudyMode,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub cards_reviewed: u32,
    pub cards_correct: u32,
    pub duration_seconds: u64,
}

impl SessionSummary {
    /// Share of answers that were correct, 0 when nothing was reviewed.
    pub fn retention_rate(&self) -> f64 {
        if self.cards_reviewed == 0 {
            0.0
        } else {
            self.cards_correct as f64 / self.cards_reviewed as f64
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_reviews: u64,
    pub retention_rate: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: Option<NaiveDate>,
}

impl ProgressStats {
    /// Folds a finished session studied on `today` into the running totals.
    ///
    /// Retention is averaged with the session's rate rather than weighted by
    /// review count.
    pub fn absorb(&mut self, session: &SessionSummary, today: NaiveDate) {
        self.total_reviews += session.cards_reviewed as u64;
        self.retention_rate = (self.retention_rate + session.retention_rate()) / 2.0;

        self.current_streak = match self.last_study_date {
            Some(last) if last == today => self.current_streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.current_streak + 1,
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_study_date = Some(today);
    }
}
