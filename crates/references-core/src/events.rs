use serde::{Deserialize, Serialize};

use crate::storage::codec::decode_events;
use crate::storage::KeyValueStore;

/// Kind of player action recorded in the local event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Guess,
    Hint,
}

/// One entry of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub value: String,
    #[serde(default)]
    pub correct: bool,
}

/// Append-only, local-only log of guesses and hint reveals for one game.
pub struct EventTracker<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> EventTracker<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Current log. An unreadable log reads as empty.
    pub fn events(&self) -> Vec<TrackedEvent> {
        let Some(raw) = self.storage.get(&self.key).filter(|raw| !raw.is_empty()) else {
            return Vec::new();
        };
        decode_events(&raw).unwrap_or_else(|err| {
            log::warn!("resetting event log {}: {err}", self.key);
            Vec::new()
        })
    }

    /// Append one record and write the whole log back.
    pub fn track(&self, kind: EventKind, value: &str, correct: bool) {
        let mut events = self.events();
        events.push(TrackedEvent {
            kind,
            value: value.to_string(),
            correct,
        });
        match serde_json::to_string(&events) {
            Ok(json) => self.storage.set(&self.key, &json),
            Err(err) => log::error!("failed to encode event log: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn appends_in_order() {
        let storage = MemoryStore::new();
        let tracker = EventTracker::new(storage.clone(), "references-events-abc");

        tracker.track(EventKind::Guess, "HELLO", false);
        tracker.track(EventKind::Hint, "film", false);
        tracker.track(EventKind::Guess, "HELIX", true);

        let events = tracker.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::Guess);
        assert_eq!(events[1].value, "film");
        assert!(events[2].correct);
        assert_eq!(
            storage.get("references-events-abc").unwrap(),
            r#"[{"type":"guess","value":"HELLO","correct":false},{"type":"hint","value":"film","correct":false},{"type":"guess","value":"HELIX","correct":true}]"#
        );
    }

    #[test]
    fn corrupt_log_starts_over() {
        let storage = MemoryStore::new();
        storage.set("log", "{broken");
        let tracker = EventTracker::new(storage, "log");

        assert!(tracker.events().is_empty());
        tracker.track(EventKind::Hint, "music", false);
        assert_eq!(tracker.events().len(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let tracker = EventTracker::new(MemoryStore::new(), "log");
        tracker.track(EventKind::Guess, "SAME", false);
        tracker.track(EventKind::Guess, "SAME", false);
        assert_eq!(tracker.events().len(), 2);
    }
}
