use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::types::GameId;

/// One revealed hint, as persisted under `<prefix>-hints-<gameId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedHint {
    pub hint: String,
    #[serde(default)]
    pub emoji: String,
}

/// Hint category → revealed hint. Only ever grows during a game.
pub type HintsState = BTreeMap<String, RevealedHint>;

/// Guess progress, as persisted under `<prefix>-state-<gameId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGameState {
    pub remaining_guesses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_word: Option<String>,
}

/// Values shown in the `#guesses-left` and `#hints-used` counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub guesses_left: u32,
    pub hints_used: usize,
}

/// Everything the page knows about the current game.
///
/// Loaded once by [`GameStateStore::load`](crate::state::store::GameStateStore::load)
/// and passed back to every store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub game_id: GameId,
    pub remaining_guesses: u32,
    pub masked_word: Option<String>,
    pub hints: HintsState,
}

impl Session {
    pub fn new(game_id: GameId, max_guesses: u32) -> Self {
        Self {
            game_id,
            remaining_guesses: max_guesses,
            masked_word: None,
            hints: HintsState::new(),
        }
    }

    /// Always the number of distinct revealed categories.
    pub fn used_hints_count(&self) -> usize {
        self.hints.len()
    }

    pub fn has_guesses_left(&self) -> bool {
        self.remaining_guesses > 0
    }

    pub fn is_revealed(&self, category: &str) -> bool {
        self.hints.contains_key(category)
    }

    /// Record a revealed hint. Re-revealing a category overwrites it.
    pub fn reveal_hint(&mut self, category: &str, hint: RevealedHint) {
        self.hints.insert(category.to_string(), hint);
    }

    pub fn counters(&self) -> Counters {
        Counters {
            guesses_left: self.remaining_guesses,
            hints_used: self.used_hints_count(),
        }
    }
}
