//! Decoders for the JSON blobs kept in local storage.
//!
//! Each decoder is strict and returns a [`DecodeError`]; the caller owns the
//! default that replaces a bad blob.

use serde_json::Value;

use crate::events::TrackedEvent;
use crate::state::session::{HintsState, RevealedHint, StoredGameState};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("remainingGuesses must be a non-negative integer")]
    InvalidGuessCount,
}

/// Decode `{remainingGuesses, maskedWord?}`.
///
/// `remainingGuesses` must be a non-negative whole number; `3.0` counts. A
/// `maskedWord` that is not a string is dropped rather than rejected.
pub fn decode_game_state(raw: &str) -> Result<StoredGameState, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let remaining_guesses = object
        .get("remainingGuesses")
        .and_then(guess_count)
        .ok_or(DecodeError::InvalidGuessCount)?;

    let masked_word = object
        .get("maskedWord")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(StoredGameState {
        remaining_guesses,
        masked_word,
    })
}

fn guess_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let n = value.as_f64()?;
    if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}

/// Decode the category → `{hint, emoji}` mapping.
///
/// Only the top level must be an object. Records that are not
/// `{hint, emoji?}` are skipped and the rest kept.
pub fn decode_hints(raw: &str) -> Result<HintsState, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(entries) = value else {
        return Err(DecodeError::NotAnObject);
    };
    Ok(entries
        .into_iter()
        .filter_map(|(category, record)| {
            serde_json::from_value::<RevealedHint>(record).ok().map(|hint| (category, hint))
        })
        .collect())
}

/// Decode the append-only event log.
pub fn decode_events(raw: &str) -> Result<Vec<TrackedEvent>, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}
