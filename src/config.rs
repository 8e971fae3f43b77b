use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::review_data::{DEFAULT_EASINESS, MIN_EASINESS};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub cards_path: PathBuf,
    pub stats_path: PathBuf,
    pub default_easiness: f64,
    pub due_limit: usize,
    pub study_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing or bad values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: or_default(&lookup, "RUST_LOG", "info"),
            cards_path: PathBuf::from(or_default(&lookup, "FLASHCARDS_CARDS_PATH", "cards.json")),
            stats_path: PathBuf::from(or_default(&lookup, "FLASHCARDS_STATS_PATH", "stats.json")),
            default_easiness: easiness_or_default(&lookup, "FLASHCARDS_DEFAULT_EASINESS"),
            due_limit: parse_or(&lookup, "FLASHCARDS_DUE_LIMIT", 100_usize),
            study_limit: parse_or(&lookup, "FLASHCARDS_STUDY_LIMIT", 20_usize),
        }
    }
}

fn or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Only finite values at or above the floor can be written to a card file.
fn easiness_or_default<F>(lookup: &F, key: &str) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let easiness = parse_or(lookup, key, DEFAULT_EASINESS);
    if easiness.is_finite() && easiness >= MIN_EASINESS {
        easiness
    } else {
        tracing::warn!(
            key,
            easiness,
            "Easiness must be finite and at least {MIN_EASINESS}, using default"
        );
        DEFAULT_EASINESS
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Failed to parse config value, using default");
                default
            }
        },
        None => default,
    }
}
