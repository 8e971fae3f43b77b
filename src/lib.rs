pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod study;

pub use error::{Error, Result};
pub use models::flashcard::due_cards;
pub use models::quality::estimate_quality;
pub use models::sm2::{schedule, schedule_at};
pub use models::{
    Answered, CardReview, Flashcard, LearningSession, ProgressStats, ReviewData, ReviewOutcome,
    SessionSummary, StudyMode,
};
