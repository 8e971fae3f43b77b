//! Per-card scheduling state owned and persisted by the caller.
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conventional easiness for a card that has never been reviewed.
pub const DEFAULT_EASINESS: f64 = 2.5;
/// Easiness never drops below this.
pub const MIN_EASINESS: f64 = 1.3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewData {
    pub easiness_factor: f64,
    pub interval_days: u32,
    pub repetitions: u32,
    pub next_review: DateTime<Utc>,
}

impl ReviewData {
    /// State of a card before its first review: due immediately.
    pub fn new_card(easiness_factor: f64, now: DateTime<Utc>) -> Self {
        Self {
            easiness_factor,
            interval_days: 0,
            repetitions: 0,
            next_review: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    /// Rejects states the scheduler is not meant to receive.
    pub fn validate(&self) -> Result<()> {
        if !self.easiness_factor.is_finite() {
            return Err(Error::InvalidState(format!(
                "easiness factor must be finite, got {}",
                self.easiness_factor
            )));
        }
        if self.easiness_factor < MIN_EASINESS {
            return Err(Error::InvalidState(format!(
                "easiness factor {} is below the {MIN_EASINESS} floor",
                self.easiness_factor
            )));
        }
        Ok(())
    }
}
