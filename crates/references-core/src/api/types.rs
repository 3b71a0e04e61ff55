use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one daily game, read from `data-game-id` on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pseudonymous token that tells browser clients apart on the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a successful `POST /guess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResponse {
    pub correct: bool,
    #[serde(default)]
    pub masked_word: String,
    /// The answer. Sent at least when the guess is correct.
    #[serde(default)]
    pub word: Option<String>,
    /// Letter positions the server unmasked after this guess, when partial
    /// unmasking is enabled server-side.
    #[serde(default)]
    pub revealed_positions: Option<Vec<usize>>,
}

/// Body of a successful `POST /hint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Error body the server sends with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorPayload {
    /// Best-effort parse. Anything unreadable yields an empty payload.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_incorrect_guess() {
        let json = r#"{"correct":false,"word":"HELIX","maskedWord":"H_L_X"}"#;
        let resp = serde_json::from_str::<GuessResponse>(json).unwrap();
        assert!(!resp.correct);
        assert_eq!(resp.masked_word, "H_L_X");
        assert_eq!(resp.word.as_deref(), Some("HELIX"));
        assert_eq!(resp.revealed_positions, None);
    }

    #[test]
    fn parse_guess_with_revealed_positions() {
        let json = r#"{"correct":false,"maskedWord":"H___X","revealedPositions":[0,4]}"#;
        let resp = serde_json::from_str::<GuessResponse>(json).unwrap();
        assert_eq!(resp.revealed_positions, Some(vec![0, 4]));
        assert_eq!(resp.word, None);
    }

    #[test]
    fn parse_hint_without_emoji() {
        let resp = serde_json::from_str::<HintResponse>(r#"{"hint":"A spiral"}"#).unwrap();
        assert_eq!(resp.hint, "A spiral");
        assert_eq!(resp.emoji, None);
    }

    #[test]
    fn error_payload_is_lenient() {
        assert_eq!(
            ErrorPayload::from_json(r#"{"error":"Guess cannot be empty"}"#).error.as_deref(),
            Some("Guess cannot be empty")
        );
        assert_eq!(ErrorPayload::from_json("<html>").error, None);
    }
}
