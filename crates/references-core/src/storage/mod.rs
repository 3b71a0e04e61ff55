//! Key-value persistence seam.
//!
//! The browser bridge implements [`KeyValueStore`] over `window.localStorage`;
//! [`MemoryStore`] backs tests and non-browser targets.

pub mod codec;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::types::GameId;

/// String key-value storage with `localStorage` semantics.
///
/// Failures are swallowed: a read that fails is indistinguishable from a
/// missing key, and a write that fails is dropped.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. Clones share the same map, like two handles on one origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Storage key layout, scoped by prefix and game id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
    game_id: GameId,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>, game_id: GameId) -> Self {
        Self {
            prefix: prefix.into(),
            game_id,
        }
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Global player identifier key, shared by every game.
    pub fn player_id(&self) -> String {
        format!("{}-player-id", self.prefix)
    }

    pub fn state(&self) -> String {
        format!("{}-state-{}", self.prefix, self.game_id)
    }

    pub fn hints(&self) -> String {
        format!("{}-hints-{}", self.prefix, self.game_id)
    }

    pub fn events(&self) -> String {
        format!("{}-events-{}", self.prefix, self.game_id)
    }
}
