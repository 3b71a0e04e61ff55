use crate::api::types::PlayerId;
use crate::rng::Rng;
use crate::storage::KeyValueStore;

/// Characters per random fragment of a generated id.
const FRAGMENT_LEN: usize = 11;

/// Hands out the browser's persistent player id.
pub struct PlayerIdentity<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> PlayerIdentity<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Return the stored id, or generate and store `player-<rand><rand>`.
    /// A stored id is never replaced.
    pub fn get_or_create(&self, rng: &mut Rng) -> PlayerId {
        if let Some(existing) = self.storage.get(&self.key).filter(|id| !id.is_empty()) {
            return PlayerId(existing);
        }
        let id = format!("player-{}{}", rng.base36(FRAGMENT_LEN), rng.base36(FRAGMENT_LEN));
        self.storage.set(&self.key, &id);
        log::info!("generated new player id");
        PlayerId(id)
    }
}
