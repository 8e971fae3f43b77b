pub mod card_review;
pub mod flashcard;
pub mod learning_session;
pub mod quality;
pub mod review_data;
pub mod sm2;
pub mod stats;

pub use card_review::CardReview;
pub use flashcard::Flashcard;
pub use learning_session::{Answered, LearningSession, StudyMode};
pub use quality::ReviewOutcome;
pub use review_data::ReviewData;
pub use stats::{ProgressStats, SessionSummary};
