//! Line-based study loop used by the `study` command.
//!
//! Latency runs from showing the card until the answer line (test mode) or
//! the flip (study mode) is read.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Answered, CardReview, LearningSession, ReviewOutcome, StudyMode};

/// Drives `session` until it completes or `input` runs dry.
///
/// Returns the graded reviews; practice answers are not included.
pub fn run_study<R, W, C>(
    session: &mut LearningSession,
    input: &mut R,
    output: &mut W,
    mut clock: C,
) -> Result<Vec<CardReview>>
where
    R: BufRead,
    W: Write,
    C: FnMut() -> DateTime<Utc>,
{
    let mut reviews = Vec::new();
    let mut round = 0;

    while let Some(card) = session.current_card() {
        if session.round_number != round {
            round = session.round_number;
            writeln!(output, "{}", session.phase_message())?;
        }

        let expected = card.translation.clone();
        writeln!(output, "\n{}", card.french_text)?;
        if !card.context_sentence.is_empty() {
            writeln!(output, "  {}", card.context_sentence)?;
        }

        let shown_at = clock();
        let answered = match session.mode {
            StudyMode::Test => {
                write!(output, "> ")?;
                output.flush()?;
                let Some(given) = read_answer(input)? else {
                    break;
                };
                let now = clock();
                let answered = session.answer_typed(&given, latency_ms(shown_at, now), now);
                if let Some(a) = &answered {
                    if a.quality() == 0 {
                        writeln!(output, "✗ {expected}")?;
                    } else {
                        writeln!(output, "✓")?;
                    }
                }
                answered
            }
            StudyMode::Study => {
                write!(output, "(Enter to flip) ")?;
                output.flush()?;
                if read_answer(input)?.is_none() {
                    break;
                }
                let flipped_at = clock();
                write!(output, "{expected}\nCorrect? [y/n] ")?;
                output.flush()?;
                let Some(reply) = read_answer(input)? else {
                    break;
                };
                let was_correct = reply.trim().to_lowercase().starts_with('y');
                let outcome = ReviewOutcome::new(was_correct, latency_ms(shown_at, flipped_at));
                session.answer(outcome, clock())
            }
        };

        if let Some(Answered::Graded(review)) = answered {
            reviews.push(review);
        }
    }

    if session.is_completed() {
        writeln!(output, "\nSession complete.")?;
    } else {
        tracing::info!(graded = reviews.len(), "input closed before the session finished");
    }
    Ok(reviews)
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn latency_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_milliseconds().max(0) as u64
}
