//! JSON import/export of flashcards, review logs and progress stats.

use crate::error::Result;
use crate::models::{CardReview, Flashcard, ProgressStats};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Writes the cards to `path` as pretty-printed JSON, replacing the file.
pub fn export_json_to_path(cards: &[Flashcard], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json_string = serde_json::to_string_pretty(cards)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    tracing::info!(cards = cards.len(), path = %path.display(), "exported flashcards");
    Ok(())
}

pub fn import_json(path: impl AsRef<Path>) -> Result<Vec<Flashcard>> {
    let cards: Vec<Flashcard> = read_json(path.as_ref())?;
    tracing::info!(cards = cards.len(), path = %path.as_ref().display(), "imported flashcards");
    Ok(cards)
}

pub fn import_reviews(path: impl AsRef<Path>) -> Result<Vec<CardReview>> {
    read_json(path.as_ref())
}

/// Reads progress stats, starting fresh when the file does not exist yet.
pub fn import_stats(path: impl AsRef<Path>) -> Result<ProgressStats> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(ProgressStats::default());
    }
    read_json(path)
}

pub fn export_stats(stats: &ProgressStats, path: impl AsRef<Path>) -> Result<()> {
    let json_string = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json_string)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
