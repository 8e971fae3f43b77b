//! Flashcards CLI
//!
//! Grades answers, schedules reviews and works through a JSON card file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use flashcards_srs::config::Config;
use flashcards_srs::export::{
    export_json_to_path, export_stats, import_json, import_reviews, import_stats,
};
use flashcards_srs::models::card_review::replay;
use flashcards_srs::study::run_study;
use flashcards_srs::{
    Error, Flashcard, LearningSession, ReviewData, ReviewOutcome, StudyMode, due_cards,
    estimate_quality, logging, schedule_at,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "flashcards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Spaced-repetition scheduling for French flashcards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade one answer on the 0-5 quality scale
    Grade {
        /// Response time in milliseconds
        #[arg(long)]
        latency_ms: u64,
        /// The answer was wrong
        #[arg(long)]
        incorrect: bool,
    },

    /// Compute the next schedule state from a grade and prior state
    Schedule {
        #[arg(long)]
        quality: u8,
        /// Prior easiness factor (defaults to FLASHCARDS_DEFAULT_EASINESS)
        #[arg(long)]
        easiness: Option<f64>,
        #[arg(long, default_value_t = 0)]
        interval: u32,
        #[arg(long, default_value_t = 0)]
        repetitions: u32,
        /// Reference moment (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },

    /// Add a card to the card file
    Add {
        french_text: String,
        translation: String,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        cards: Option<PathBuf>,
    },

    /// List cards that are due, most overdue first
    Due {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        cards: Option<PathBuf>,
        #[arg(long)]
        now: Option<String>,
    },

    /// Record an answer for a card and save its new schedule
    Review {
        id: i64,
        #[arg(long)]
        latency_ms: u64,
        /// The answer was wrong (ignored when --answer is given)
        #[arg(long)]
        incorrect: bool,
        /// Typed answer to check against the translation
        #[arg(long)]
        answer: Option<String>,
        #[arg(long)]
        cards: Option<PathBuf>,
        #[arg(long)]
        now: Option<String>,
    },

    /// Work through the due cards interactively and update progress stats
    Study {
        /// Type each translation instead of flipping and self-grading
        #[arg(long)]
        test: bool,
        /// Maximum cards this session (defaults to FLASHCARDS_STUDY_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        cards: Option<PathBuf>,
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Rebuild a schedule state from a JSON review log
    Replay {
        reviews: PathBuf,
        #[arg(long)]
        easiness: Option<f64>,
    },
}

fn main() -> flashcards_srs::Result<()> {
    let config = Config::from_env();
    logging::init_tracing(&config.log_level);
    tracing::debug!(?config, "loaded config");

    let cli = Cli::parse();
    match cli.command {
        Commands::Grade {
            latency_ms,
            incorrect,
        } => {
            println!("{}", estimate_quality(!incorrect, latency_ms));
        }
        Commands::Schedule {
            quality,
            easiness,
            interval,
            repetitions,
            now,
        } => {
            let now = parse_now(now)?;
            let prior = ReviewData {
                easiness_factor: easiness.unwrap_or(config.default_easiness),
                interval_days: interval,
                repetitions,
                next_review: now,
            };
            prior.validate()?;
            print_json(&schedule_at(
                quality,
                prior.easiness_factor,
                prior.interval_days,
                prior.repetitions,
                now,
            ))?;
        }
        Commands::Add {
            french_text,
            translation,
            topic,
            cards,
        } => {
            let path = cards.unwrap_or_else(|| config.cards_path.clone());
            let mut all = if path.exists() {
                import_json(&path)?
            } else {
                Vec::new()
            };
            let id = all.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let mut card = Flashcard::with_easiness(
                id,
                &french_text,
                &translation,
                config.default_easiness,
                Utc::now(),
            );
            card.topic = topic.unwrap_or_default();
            print_json(&card)?;
            all.push(card);
            export_json_to_path(&all, &path)?;
        }
        Commands::Due { limit, cards, now } => {
            let now = parse_now(now)?;
            let all = import_json(cards.unwrap_or_else(|| config.cards_path.clone()))?;
            let due = due_cards(&all, now, limit.unwrap_or(config.due_limit));
            tracing::info!(due = due.len(), total = all.len(), "due cards");
            print_json(&due)?;
        }
        Commands::Review {
            id,
            latency_ms,
            incorrect,
            answer,
            cards,
            now,
        } => {
            let now = parse_now(now)?;
            let path = cards.unwrap_or_else(|| config.cards_path.clone());
            let mut all = import_json(&path)?;
            let card = all
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(Error::CardNotFound(id))?;
            card.review.validate()?;

            let outcome = match answer {
                Some(given) => ReviewOutcome::from_typed_answer(&given, &card.translation, latency_ms),
                None => ReviewOutcome::new(!incorrect, latency_ms),
            };
            let entry = card.record_review(outcome, now);
            print_json(&entry)?;
            export_json_to_path(&all, &path)?;
        }
        Commands::Study {
            test,
            limit,
            cards,
            stats,
        } => {
            let cards_path = cards.unwrap_or_else(|| config.cards_path.clone());
            let stats_path = stats.unwrap_or_else(|| config.stats_path.clone());
            let mut all = import_json(&cards_path)?;

            let started_at = Utc::now();
            let due: Vec<Flashcard> = due_cards(&all, started_at, limit.unwrap_or(config.study_limit))
                .into_iter()
                .cloned()
                .collect();
            if due.is_empty() {
                println!("No cards due!");
                return Ok(());
            }

            let mode = if test { StudyMode::Test } else { StudyMode::Study };
            let mut session = LearningSession::new(mode, due, started_at);
            let stdin = std::io::stdin();
            let reviews = run_study(&mut session, &mut stdin.lock(), &mut std::io::stdout(), Utc::now)?;

            let summary = session.finish(Utc::now());
            for studied in session.into_cards() {
                if let Some(card) = all.iter_mut().find(|c| c.id == studied.id) {
                    *card = studied;
                }
            }
            export_json_to_path(&all, &cards_path)?;

            let mut progress = import_stats(&stats_path)?;
            if summary.cards_reviewed > 0 {
                progress.absorb(&summary, summary.ended_at.date_naive());
                export_stats(&progress, &stats_path)?;
            }
            tracing::info!(graded = reviews.len(), "study session saved");
            print_json(&summary)?;
            print_json(&progress)?;
        }
        Commands::Replay { reviews, easiness } => {
            let log = import_reviews(&reviews)?;
            let start = log.first().map(|r| r.reviewed_at).unwrap_or_else(Utc::now);
            let initial = ReviewData::new_card(easiness.unwrap_or(config.default_easiness), start);
            initial.validate()?;
            print_json(&replay(initial, &log))?;
        }
    }

    Ok(())
}

fn parse_now(raw: Option<String>) -> flashcards_srs::Result<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| Error::InvalidTimestamp(raw)),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> flashcards_srs::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
