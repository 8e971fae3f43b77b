//! SM-2 (SuperMemo 2) variant used to schedule flashcard reviews.
//!
//! - Quality grades 0-2 fail: repetitions reset, the card comes back tomorrow
//! - Quality grades 3-5 pass: intervals step 1 → 3 → 7 days, then grow by the EF
//! - The easiness factor (EF) moves with the grade on a pass and is floored at 1.3
//! - Nothing is capped from above; a card recalled well forever keeps growing

use super::ReviewData;
use super::review_data::MIN_EASINESS;
use chrono::{DateTime, Days, Utc};

/// Lowest passing grade.
pub const PASSING_QUALITY: u8 = 3;

/// Schedules the next review relative to the system clock.
pub fn schedule(
    quality: u8,
    prior_easiness: f64,
    prior_interval: u32,
    prior_repetitions: u32,
) -> ReviewData {
    schedule_at(
        quality,
        prior_easiness,
        prior_interval,
        prior_repetitions,
        Utc::now(),
    )
}

/// Computes the state that follows a review graded `quality` (0-5) at `now`.
///
/// Grades above 5 are treated as 5. Intervals past `u32::MAX` days saturate,
/// and a due date beyond chrono's range saturates at the latest instant.
pub fn schedule_at(
    quality: u8,
    prior_easiness: f64,
    prior_interval: u32,
    prior_repetitions: u32,
    now: DateTime<Utc>,
) -> ReviewData {
    let quality = quality.min(5);

    let (mut easiness_factor, interval_days, repetitions) = if quality >= PASSING_QUALITY {
        // Interval steps off the repetition count before this review.
        let interval = match prior_repetitions {
            0 => 1,
            1 => 3,
            2 => 7,
            // `round` breaks ties away from zero; the cast saturates.
            // A mature card with no stored interval still waits a day.
            _ => ((prior_interval as f64 * prior_easiness).round() as u32).max(1),
        };
        let q = (5 - quality) as f64;
        let easiness = prior_easiness + (0.1 - q * (0.08 + q * 0.02));
        (easiness, interval, prior_repetitions.saturating_add(1))
    } else {
        (prior_easiness, 1, 0)
    };

    if easiness_factor < MIN_EASINESS {
        easiness_factor = MIN_EASINESS;
    }

    let next_review = now
        .checked_add_days(Days::new(interval_days as u64))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    ReviewData {
        easiness_factor,
        interval_days,
        repetitions,
        next_review,
    }
}

impl ReviewData {
    /// Feeds this state through the scheduler.
    pub fn apply(&self, quality: u8, now: DateTime<Utc>) -> ReviewData {
        schedule_at(
            quality,
            self.easiness_factor,
            self.interval_days,
            self.repetitions,
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 18, 45, 12).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_first_review() {
        let next = schedule_at(5, 2.5, 0, 0, now());
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 1);
        assert_close(next.easiness_factor, 2.6);
        assert_eq!(next.next_review, now() + Duration::days(1));
    }

    #[test]
    fn test_second_review() {
        let next = schedule_at(5, 2.6, 1, 1, now());
        assert_eq!(next.interval_days, 3);
        assert_eq!(next.repetitions, 2);
        assert_close(next.easiness_factor, 2.7);
    }

    #[test]
    fn test_third_review() {
        let next = schedule_at(4, 2.5, 3, 2, now());
        assert_eq!(next.interval_days, 7);
        assert_eq!(next.repetitions, 3);
        assert_close(next.easiness_factor, 2.5);
    }

    #[test]
    fn test_mature_card_grows_by_easiness() {
        let next = schedule_at(3, 2.5, 6, 4, now());
        assert_eq!(next.interval_days, 15);
        assert_eq!(next.repetitions, 5);
        // 2.5 + (0.1 - 2 * (0.08 + 2 * 0.02))
        assert_close(next.easiness_factor, 2.36);
    }

    #[test]
    fn test_rounding_breaks_ties_away_from_zero() {
        // 5 * 2.5 = 12.5
        let next = schedule_at(4, 2.5, 5, 3, now());
        assert_eq!(next.interval_days, 13);
    }

    #[test]
    fn test_mature_card_without_interval_waits_a_day() {
        for quality in 3..=5 {
            let next = schedule_at(quality, 2.5, 0, 3, now());
            assert_eq!(next.interval_days, 1);
            assert_eq!(next.repetitions, 4);
            assert_eq!(next.next_review, now() + Duration::days(1));
        }
    }

    #[test]
    fn test_failure_at_floor() {
        let next = schedule_at(0, 1.3, 10, 4, now());
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 0);
        assert_close(next.easiness_factor, 1.3);
    }

    #[test]
    fn test_failure_keeps_easiness() {
        let next = schedule_at(2, 2.1, 30, 6, now());
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 0);
        assert_close(next.easiness_factor, 2.1);
    }

    #[test]
    fn test_low_pass_is_floored() {
        let next = schedule_at(3, 1.4, 10, 3, now());
        assert_eq!(next.easiness_factor, MIN_EASINESS);
        assert_eq!(next.interval_days, 14);
    }

    #[test]
    fn test_quality_above_five_is_clamped() {
        assert_eq!(schedule_at(9, 2.5, 0, 0, now()), schedule_at(5, 2.5, 0, 0, now()));
    }

    #[test]
    fn test_due_date_rolls_over_month_and_keeps_time() {
        let next = schedule_at(4, 2.5, 0, 1, now());
        assert_eq!(
            next.next_review,
            Utc.with_ymd_and_hms(2024, 2, 3, 18, 45, 12).unwrap()
        );
    }

    #[test]
    fn test_huge_interval_saturates() {
        let next = schedule_at(5, 1e12, u32::MAX, 50, now());
        assert_eq!(next.interval_days, u32::MAX);
        assert_eq!(next.next_review, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_apply_matches_schedule_at() {
        let state = ReviewData {
            easiness_factor: 2.2,
            interval_days: 9,
            repetitions: 3,
            next_review: now(),
        };
        assert_eq!(state.apply(4, now()), schedule_at(4, 2.2, 9, 3, now()));
    }

    #[test]
    fn test_schedule_uses_wall_clock() {
        let before = Utc::now();
        let next = schedule(5, 2.5, 0, 0);
        let after = Utc::now();
        assert!(next.next_review >= before + Duration::days(1));
        assert!(next.next_review <= after + Duration::days(1));
    }
}
