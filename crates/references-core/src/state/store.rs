use crate::state::session::{HintsState, Session, StoredGameState};
use crate::storage::codec::{decode_game_state, decode_hints};
use crate::storage::{KeyValueStore, StorageKeys};

/// Persists guess progress and revealed hints for one game.
///
/// The two live under separate keys, so overwriting the guess state never
/// touches hint progress.
#[derive(Debug, Clone)]
pub struct GameStateStore<S: KeyValueStore> {
    storage: S,
    keys: StorageKeys,
    max_guesses: u32,
}

impl<S: KeyValueStore> GameStateStore<S> {
    pub fn new(storage: S, keys: StorageKeys, max_guesses: u32) -> Self {
        Self {
            storage,
            keys,
            max_guesses,
        }
    }

    /// Load the session for this game.
    ///
    /// A blob that fails to decode is removed from storage and replaced by
    /// its default: a full guess allowance, or no revealed hints.
    pub fn load(&self) -> Session {
        let mut session = Session::new(self.keys.game_id().clone(), self.max_guesses);

        let state_key = self.keys.state();
        if let Some(raw) = self.read(&state_key) {
            match decode_game_state(&raw) {
                Ok(state) => {
                    session.remaining_guesses = state.remaining_guesses;
                    session.masked_word = state.masked_word;
                }
                Err(err) => {
                    log::warn!("discarding stored game state {state_key}: {err}");
                    self.storage.remove(&state_key);
                }
            }
        }

        let hints_key = self.keys.hints();
        if let Some(raw) = self.read(&hints_key) {
            match decode_hints(&raw) {
                Ok(hints) => session.hints = hints,
                Err(err) => {
                    log::warn!("discarding stored hints {hints_key}: {err}");
                    self.storage.remove(&hints_key);
                }
            }
        }

        session
    }

    /// Overwrite the guess state with `remaining_guesses` and, when present,
    /// the latest masked word.
    pub fn save(&self, remaining_guesses: u32, masked_word: Option<&str>) {
        let state = StoredGameState {
            remaining_guesses,
            masked_word: masked_word.filter(|w| !w.is_empty()).map(str::to_string),
        };
        match serde_json::to_string(&state) {
            Ok(json) => {
                log::debug!("saving game state: {json}");
                self.storage.set(&self.keys.state(), &json);
            }
            Err(err) => log::error!("failed to encode game state: {err}"),
        }
    }

    /// Persist the session's guess state, including its masked word.
    pub fn save_session(&self, session: &Session) {
        self.save(session.remaining_guesses, session.masked_word.as_deref());
    }

    /// Overwrite the full hint mapping.
    pub fn save_hints(&self, hints: &HintsState) {
        match serde_json::to_string(hints) {
            Ok(json) => self.storage.set(&self.keys.hints(), &json),
            Err(err) => log::error!("failed to encode hints: {err}"),
        }
    }

    /// Remove both entries for this game. Nothing calls this automatically;
    /// finished games keep their state so the outcome page can be revisited.
    pub fn clear(&self) {
        self.storage.remove(&self.keys.state());
        self.storage.remove(&self.keys.hints());
        log::info!("cleared game state for game {}", self.keys.game_id());
    }

    fn read(&self, key: &str) -> Option<String> {
        self.storage.get(key).filter(|raw| !raw.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameId;
    use crate::state::session::RevealedHint;
    use crate::storage::MemoryStore;

    fn store_for(game: &str) -> (MemoryStore, GameStateStore<MemoryStore>) {
        let storage = MemoryStore::new();
        let keys = StorageKeys::new("references", GameId::new(game));
        (storage.clone(), GameStateStore::new(storage, keys, 4))
    }

    #[test]
    fn fresh_game_defaults() {
        let (_, store) = store_for("abc");
        let session = store.load();
        assert_eq!(session.remaining_guesses, 4);
        assert!(session.hints.is_empty());
        assert_eq!(session.masked_word, None);
    }

    #[test]
    fn valid_count_loads_unchanged() {
        let (storage, store) = store_for("abc");
        for n in 0..=4 {
            storage.set("references-state-abc", &format!(r#"{{"remainingGuesses":{n}}}"#));
            assert_eq!(store.load().remaining_guesses, n);
            assert!(storage.contains("references-state-abc"));
        }
    }

    #[test]
    fn malformed_count_resets_and_clears() {
        let (storage, store) = store_for("abc");
        for raw in ["{}", r#"{"remainingGuesses":-2}"#, r#"{"remainingGuesses":"x"}"#, "{{{"] {
            storage.set("references-state-abc", raw);
            assert_eq!(store.load().remaining_guesses, 4, "{raw}");
            assert!(!storage.contains("references-state-abc"), "{raw} not cleared");
        }
    }

    #[test]
    fn corrupt_hints_reset_without_touching_state() {
        let (storage, store) = store_for("abc");
        storage.set("references-state-abc", r#"{"remainingGuesses":2}"#);
        storage.set("references-hints-abc", "null");

        let session = store.load();
        assert_eq!(session.remaining_guesses, 2);
        assert!(session.hints.is_empty());
        assert!(!storage.contains("references-hints-abc"));
        assert!(storage.contains("references-state-abc"));
    }

    #[test]
    fn one_bad_hint_record_keeps_the_others() {
        let (storage, store) = store_for("abc");
        storage.set(
            "references-hints-abc",
            r#"{"film":"x","music":{"hint":"Queen","emoji":"🎸"}}"#,
        );

        let session = store.load();
        assert_eq!(session.used_hints_count(), 1);
        assert_eq!(session.hints["music"].hint, "Queen");
        assert!(storage.contains("references-hints-abc"));
    }

    #[test]
    fn save_overwrites_state_but_keeps_hints() {
        let (storage, store) = store_for("abc");
        let mut hints = HintsState::new();
        hints.insert(
            "film".to_string(),
            RevealedHint { hint: "Jaws".to_string(), emoji: "🎬".to_string() },
        );
        store.save_hints(&hints);
        store.save(3, Some("H_L_O"));
        store.save(2, None);

        assert_eq!(
            storage.get("references-state-abc").as_deref(),
            Some(r#"{"remainingGuesses":2}"#)
        );
        assert_eq!(store.load().hints, hints);
    }

    #[test]
    fn hints_round_trip() {
        let (_, store) = store_for("abc");
        let mut hints = HintsState::new();
        hints.insert(
            "film".to_string(),
            RevealedHint { hint: "Jaws".to_string(), emoji: "🎬".to_string() },
        );
        hints.insert(
            "music".to_string(),
            RevealedHint { hint: "Queen".to_string(), emoji: String::new() },
        );
        store.save_hints(&hints);

        let session = store.load();
        assert_eq!(session.hints, hints);
        assert_eq!(session.used_hints_count(), 2);
    }

    #[test]
    fn clear_removes_both_entries_only_for_this_game() {
        let (storage, store) = store_for("abc");
        let other = GameStateStore::new(
            storage.clone(),
            StorageKeys::new("references", GameId::new("xyz")),
            4,
        );
        store.save(1, None);
        store.save_hints(&HintsState::new());
        other.save(2, None);

        store.clear();
        assert!(!storage.contains("references-state-abc"));
        assert!(!storage.contains("references-hints-abc"));
        assert_eq!(other.load().remaining_guesses, 2);
    }

    #[test]
    fn empty_blob_is_treated_as_absent() {
        let (storage, store) = store_for("abc");
        storage.set("references-state-abc", "");
        assert_eq!(store.load().remaining_guesses, 4);
        assert!(storage.contains("references-state-abc"));
    }
}
