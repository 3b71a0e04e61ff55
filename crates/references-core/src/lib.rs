pub mod api;
pub mod storage;
pub mod state;
pub mod input;
pub mod flow;
pub mod identity;
pub mod events;
pub mod help;
pub mod rng;

// Re-export key types at crate root for convenience
pub use api::config::ClientConfig;
pub use api::error::{ClientError, GuessRejected};
pub use api::form::FormBody;
pub use api::redirect::{Outcome, Redirect};
pub use api::types::{ErrorPayload, GameId, GuessResponse, HintResponse, PlayerId};
pub use storage::{KeyValueStore, MemoryStore, StorageKeys};
pub use storage::codec::{decode_events, decode_game_state, decode_hints, DecodeError};
pub use state::session::{Counters, HintsState, RevealedHint, Session, StoredGameState};
pub use state::store::GameStateStore;
pub use events::{EventKind, EventTracker, TrackedEvent};
pub use identity::PlayerIdentity;
pub use input::otp::{
    build_input_spec, word_length_from_masked, CellSpec, KeyOutcome, OtpInput, OtpKey,
};
pub use flow::controller::{GameController, GuessOutcome, Phase};
pub use flow::hints::{HintBoard, HintBoxState, HintOutcome};
pub use help::{HelpEvent, HelpModal, ModalAttrs};
pub use rng::Rng;
