use crate::api::config::ClientConfig;
use crate::api::error::{ClientError, GuessRejected};
use crate::api::form::FormBody;
use crate::api::redirect::{Outcome, Redirect};
use crate::api::types::{GameId, GuessResponse, HintResponse, PlayerId};
use crate::events::{EventKind, EventTracker};
use crate::flow::hints::{HintBoard, HintBoxState, HintOutcome};
use crate::identity::PlayerIdentity;
use crate::rng::Rng;
use crate::state::session::{Counters, RevealedHint, Session};
use crate::state::store::GameStateStore;
use crate::storage::{KeyValueStore, StorageKeys};

/// Shown while a guess is being checked.
pub const CHECKING_MESSAGE: &str = "Checking...";
/// Shown after a wrong guess when guesses remain.
pub const INCORRECT_MESSAGE: &str = "Incorrect guess.";
/// Shown in a hint box while its request is in flight.
pub const HINT_LOADING_MESSAGE: &str = "Loading...";

/// Where the guess cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A guess is in flight. Further guesses are rejected.
    Submitting,
    /// The page is navigating to an outcome page. Nothing else happens.
    Redirecting,
}

/// What the page should do once a guess request has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Navigate away. Inputs stay disabled.
    Redirect(Redirect),
    /// Show `message`. When `reset_inputs` is set, re-enable the inputs,
    /// empty them and focus the first one.
    Settled { message: String, reset_inputs: bool },
}

/// Drives guesses and hint reveals for one game.
///
/// The browser layer calls `begin_*` before sending a request and `finish_*`
/// with its result; everything between (persistence, event log, outcome
/// decisions) happens here.
pub struct GameController<S: KeyValueStore + Clone> {
    config: ClientConfig,
    session: Session,
    store: GameStateStore<S>,
    tracker: EventTracker<S>,
    identity: PlayerIdentity<S>,
    rng: Rng,
    hints: HintBoard,
    phase: Phase,
}

impl<S: KeyValueStore + Clone> GameController<S> {
    /// Load prior progress for `game_id` and make sure a player id exists.
    pub fn new(config: ClientConfig, storage: S, game_id: GameId, mut rng: Rng) -> Self {
        let keys = StorageKeys::new(config.storage_prefix.clone(), game_id);
        let identity = PlayerIdentity::new(storage.clone(), keys.player_id());
        identity.get_or_create(&mut rng);
        let tracker = EventTracker::new(storage.clone(), keys.events());
        let store = GameStateStore::new(storage, keys, config.max_guesses);
        let session = store.load();
        log::info!(
            "game {}: {} guesses left, {} hints used",
            session.game_id,
            session.remaining_guesses,
            session.used_hints_count()
        );

        Self {
            config,
            session,
            store,
            tracker,
            identity,
            rng,
            hints: HintBoard::new(),
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn counters(&self) -> Counters {
        self.session.counters()
    }

    pub fn tracker(&self) -> &EventTracker<S> {
        &self.tracker
    }

    /// The stored player id, regenerated if storage lost it.
    pub fn player_id(&mut self) -> PlayerId {
        self.identity.get_or_create(&mut self.rng)
    }

    /// Remove this game's stored progress. Never called automatically.
    pub fn clear_state(&self) {
        self.store.clear();
    }

    // -- Guesses --

    /// Validate a guess and build its request body. On success the
    /// controller is `Submitting` until [`finish_guess`](Self::finish_guess).
    pub fn begin_guess(&mut self, guess: &str) -> Result<FormBody, GuessRejected> {
        if self.phase != Phase::Idle {
            return Err(GuessRejected::Busy);
        }
        if !self.session.has_guesses_left() {
            return Err(GuessRejected::NoGuessesLeft);
        }
        if guess.is_empty() {
            return Err(GuessRejected::Empty);
        }
        self.phase = Phase::Submitting;
        let player = self.player_id();
        Ok(FormBody::guess(guess, &player))
    }

    /// Apply the server's verdict on `guess`.
    pub fn finish_guess(
        &mut self,
        guess: &str,
        result: Result<GuessResponse, ClientError>,
    ) -> GuessOutcome {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                log::error!("guess failed: {err}");
                self.phase = Phase::Idle;
                let detail = err.to_string();
                let detail = if detail.is_empty() {
                    "Could not process guess.".to_string()
                } else {
                    detail
                };
                return GuessOutcome::Settled {
                    message: format!("Error: {detail}"),
                    reset_inputs: self.session.has_guesses_left(),
                };
            }
        };

        self.tracker.track(EventKind::Guess, guess, response.correct);
        self.session.masked_word =
            Some(response.masked_word.clone()).filter(|masked| !masked.is_empty());
        self.store.save_session(&self.session);

        let word = response.word.unwrap_or_default();
        if response.correct {
            let guesses = self
                .config
                .max_guesses
                .saturating_sub(self.session.remaining_guesses)
                + 1;
            return self.redirect(Outcome::Success, word, guesses);
        }

        self.session.remaining_guesses = self.session.remaining_guesses.saturating_sub(1);
        self.store.save_session(&self.session);

        if !self.session.has_guesses_left() {
            let guesses = self.config.max_guesses;
            return self.redirect(Outcome::MaybeTomorrow, word, guesses);
        }

        self.phase = Phase::Idle;
        GuessOutcome::Settled {
            message: INCORRECT_MESSAGE.to_string(),
            reset_inputs: true,
        }
    }

    fn redirect(&mut self, outcome: Outcome, word: String, guesses: u32) -> GuessOutcome {
        let redirect = Redirect {
            outcome,
            word,
            guesses,
            hints: self.session.used_hints_count(),
            game_id: self.session.game_id.clone(),
        };
        log::info!(
            "redirecting to {:?}. Guesses: {}, Hints: {}",
            outcome,
            redirect.guesses,
            redirect.hints
        );
        self.phase = Phase::Redirecting;
        GuessOutcome::Redirect(redirect)
    }

    // -- Hints --

    /// Register a hint box found on the page and return its index. Boxes
    /// whose category was revealed in an earlier visit start revealed.
    pub fn register_hint_box(&mut self, category: &str) -> usize {
        let revealed = self.session.is_revealed(category);
        self.hints.register(category, revealed)
    }

    /// Stored hint text for `category`, if it was revealed before.
    pub fn stored_hint(&self, category: &str) -> Option<&str> {
        self.session.hints.get(category).map(|h| h.hint.as_str())
    }

    pub fn hint_state(&self, index: usize) -> HintBoxState {
        self.hints.state(index)
    }

    /// Mark box `index` loading and build its request body, or `None` when
    /// the box is unknown, already loading or revealed.
    pub fn begin_hint(&mut self, index: usize) -> Option<FormBody> {
        if !self.hints.begin(index) {
            return None;
        }
        let category = self.hints.category(index)?.to_string();
        let player = self.player_id();
        Some(FormBody::hint(&category, &player))
    }

    /// Apply the result of the request for box `index`.
    pub fn finish_hint(
        &mut self,
        index: usize,
        result: Result<HintResponse, ClientError>,
    ) -> HintOutcome {
        let category = self.hints.category(index).unwrap_or_default().to_string();
        match result {
            Ok(response) => {
                self.tracker.track(EventKind::Hint, &category, false);
                self.hints.reveal(index);
                self.session.reveal_hint(
                    &category,
                    RevealedHint {
                        hint: response.hint.clone(),
                        emoji: response.emoji.unwrap_or_default(),
                    },
                );
                self.store.save_hints(&self.session.hints);
                HintOutcome::Revealed {
                    hint: response.hint,
                }
            }
            Err(err) => {
                log::error!("hint {category} failed: {err}");
                self.hints.reset(index);
                HintOutcome::Failed {
                    message: format!("Error loading hint: {err}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn controller(storage: &MemoryStore, game: &str) -> GameController<MemoryStore> {
        GameController::new(
            ClientConfig::default(),
            storage.clone(),
            GameId::new(game),
            Rng::new(42),
        )
    }

    fn incorrect(masked: &str) -> Result<GuessResponse, ClientError> {
        Ok(GuessResponse {
            correct: false,
            masked_word: masked.to_string(),
            word: Some("HELIX".to_string()),
            revealed_positions: None,
        })
    }

    fn correct() -> Result<GuessResponse, ClientError> {
        Ok(GuessResponse {
            correct: true,
            masked_word: "HELIX".to_string(),
            word: Some("HELIX".to_string()),
            revealed_positions: None,
        })
    }

    fn guess(ctl: &mut GameController<MemoryStore>, word: &str, result: Result<GuessResponse, ClientError>) -> GuessOutcome {
        ctl.begin_guess(word).expect("guess should be accepted");
        ctl.finish_guess(word, result)
    }

    fn hint_ok(text: &str) -> Result<HintResponse, ClientError> {
        Ok(HintResponse {
            hint: text.to_string(),
            emoji: Some("🎬".to_string()),
        })
    }

    #[test]
    fn creates_player_id_on_start() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        let stored = storage.get("references-player-id").unwrap();
        assert!(stored.starts_with("player-"));
        assert_eq!(ctl.player_id().as_str(), stored);
    }

    #[test]
    fn incorrect_guess_scenario() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");

        let body = ctl.begin_guess("HELLO").unwrap();
        assert!(body.as_str().starts_with("guess=HELLO&playerID=player-"));
        assert_eq!(ctl.phase(), Phase::Submitting);

        let outcome = ctl.finish_guess("HELLO", incorrect("H_L_O"));
        assert_eq!(
            outcome,
            GuessOutcome::Settled {
                message: "Incorrect guess.".to_string(),
                reset_inputs: true,
            }
        );
        assert_eq!(ctl.session().remaining_guesses, 3);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(
            storage.get("references-state-abc").as_deref(),
            Some(r#"{"remainingGuesses":3,"maskedWord":"H_L_O"}"#)
        );

        let events = ctl.tracker().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].value, "HELLO");
        assert!(!events[0].correct);
    }

    #[test]
    fn first_try_win_counts_one_guess() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        match guess(&mut ctl, "HELIX", correct()) {
            GuessOutcome::Redirect(r) => {
                assert_eq!(r.outcome, Outcome::Success);
                assert_eq!(r.guesses, 1);
                assert_eq!(r.hints, 0);
                assert_eq!(
                    r.to_url(ctl.config()),
                    "/success?word=HELIX&guesses=1&hints=0&gameId=abc"
                );
            }
            other => panic!("expected redirect, got {other:?}"),
        }
        assert_eq!(ctl.phase(), Phase::Redirecting);
        assert_eq!(ctl.begin_guess("AGAIN"), Err(GuessRejected::Busy));
    }

    #[test]
    fn win_after_two_misses_counts_three() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        guess(&mut ctl, "AAAAA", incorrect("_____"));
        guess(&mut ctl, "BBBBB", incorrect("_____"));
        assert_eq!(ctl.session().remaining_guesses, 2);

        match guess(&mut ctl, "HELIX", correct()) {
            GuessOutcome::Redirect(r) => assert_eq!(r.guesses, 3),
            other => panic!("expected redirect, got {other:?}"),
        }
        // A correct guess does not spend a guess.
        assert_eq!(ctl.session().remaining_guesses, 2);
    }

    #[test]
    fn exhausting_guesses_redirects_to_maybe_tomorrow() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        let film = ctl.register_hint_box("film");
        ctl.begin_hint(film).unwrap();
        ctl.finish_hint(film, hint_ok("Jaws"));

        for word in ["AAAAA", "BBBBB", "CCCCC"] {
            assert!(matches!(
                guess(&mut ctl, word, incorrect("_____")),
                GuessOutcome::Settled { reset_inputs: true, .. }
            ));
        }
        match guess(&mut ctl, "DDDDD", incorrect("_____")) {
            GuessOutcome::Redirect(r) => {
                assert_eq!(r.outcome, Outcome::MaybeTomorrow);
                assert_eq!(r.guesses, 4);
                assert_eq!(r.hints, 1);
                assert_eq!(r.word, "HELIX");
            }
            other => panic!("expected redirect, got {other:?}"),
        }
        assert_eq!(ctl.session().remaining_guesses, 0);
        assert_eq!(
            storage.get("references-state-abc").as_deref(),
            Some(r#"{"remainingGuesses":0,"maskedWord":"_____"}"#)
        );
    }

    #[test]
    fn resumed_game_with_no_guesses_ignores_submissions() {
        let storage = MemoryStore::new();
        storage.set("references-state-abc", r#"{"remainingGuesses":0}"#);
        let mut ctl = controller(&storage, "abc");
        assert_eq!(ctl.begin_guess("HELLO"), Err(GuessRejected::NoGuessesLeft));
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn empty_guess_is_rejected_without_request() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        assert_eq!(ctl.begin_guess(""), Err(GuessRejected::Empty));
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.tracker().events().is_empty());
    }

    #[test]
    fn second_guess_while_submitting_is_busy() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        ctl.begin_guess("HELLO").unwrap();
        assert_eq!(ctl.begin_guess("WORLD"), Err(GuessRejected::Busy));
    }

    #[test]
    fn http_error_keeps_guess_count() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        ctl.begin_guess("HELLO").unwrap();
        let outcome = ctl.finish_guess(
            "HELLO",
            Err(ClientError::Http {
                status: 400,
                message: Some("Guess cannot be empty".to_string()),
            }),
        );
        assert_eq!(
            outcome,
            GuessOutcome::Settled {
                message: "Error: Guess cannot be empty".to_string(),
                reset_inputs: true,
            }
        );
        assert_eq!(ctl.session().remaining_guesses, 4);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.tracker().events().is_empty());
        assert!(!storage.contains("references-state-abc"));
    }

    #[test]
    fn network_error_without_detail_uses_fallback() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        ctl.begin_guess("HELLO").unwrap();
        let outcome = ctl.finish_guess("HELLO", Err(ClientError::Network(String::new())));
        assert_eq!(
            outcome,
            GuessOutcome::Settled {
                message: "Error: Could not process guess.".to_string(),
                reset_inputs: true,
            }
        );
    }

    #[test]
    fn hint_reveal_persists_and_counts() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        let film = ctl.register_hint_box("film");
        let music = ctl.register_hint_box("music");

        let body = ctl.begin_hint(film).unwrap();
        assert!(body.as_str().starts_with("category=film&playerID=player-"));
        assert_eq!(ctl.hint_state(film), HintBoxState::Loading);
        assert_eq!(ctl.hint_state(music), HintBoxState::Hidden);

        let outcome = ctl.finish_hint(film, hint_ok("Jaws"));
        assert_eq!(outcome, HintOutcome::Revealed { hint: "Jaws".to_string() });
        assert_eq!(ctl.counters().hints_used, 1);
        assert_eq!(ctl.hint_state(film), HintBoxState::Revealed);

        let reloaded = controller(&storage, "abc");
        assert_eq!(reloaded.session().hints["film"].emoji, "🎬");
        let events = reloaded.tracker().events();
        assert_eq!(events[0].kind, EventKind::Hint);
        assert_eq!(events[0].value, "film");
    }

    #[test]
    fn clicks_on_loading_or_revealed_box_do_nothing() {
        let storage = MemoryStore::new();
        storage.set("references-hints-abc", r#"{"film":{"hint":"Jaws","emoji":""}}"#);
        let mut ctl = controller(&storage, "abc");
        let film = ctl.register_hint_box("film");
        let music = ctl.register_hint_box("music");
        assert_eq!(ctl.stored_hint("film"), Some("Jaws"));
        assert_eq!(ctl.stored_hint("music"), None);
        assert_eq!(ctl.hint_state(film), HintBoxState::Revealed);

        assert!(ctl.begin_hint(film).is_none());
        assert!(ctl.begin_hint(music).is_some());
        let before = storage.get("references-hints-abc");
        assert!(ctl.begin_hint(music).is_none());
        assert_eq!(storage.get("references-hints-abc"), before);
        assert!(ctl.tracker().events().is_empty());
    }

    #[test]
    fn failed_hint_can_be_retried() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        let music = ctl.register_hint_box("music");
        ctl.begin_hint(music).unwrap();
        let outcome = ctl.finish_hint(music, Err(ClientError::Http { status: 500, message: None }));
        assert_eq!(
            outcome,
            HintOutcome::Failed { message: "Error loading hint: HTTP error 500".to_string() }
        );
        assert_eq!(ctl.counters().hints_used, 0);
        assert!(ctl.begin_hint(music).is_some());
    }

    #[test]
    fn clear_state_is_explicit() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        guess(&mut ctl, "HELLO", incorrect("H_L_O"));
        assert!(storage.contains("references-state-abc"));
        ctl.clear_state();
        assert!(!storage.contains("references-state-abc"));
        assert!(storage.contains("references-player-id"));
    }

    #[test]
    fn response_without_masked_word_drops_the_stored_one() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        guess(&mut ctl, "HELLO", incorrect("H_L_O"));
        guess(&mut ctl, "WORLD", incorrect(""));

        assert_eq!(ctl.session().masked_word, None);
        assert_eq!(
            storage.get("references-state-abc").as_deref(),
            Some(r#"{"remainingGuesses":2}"#)
        );
    }

    #[test]
    fn boxes_sharing_a_category_reveal_separately() {
        let storage = MemoryStore::new();
        let mut ctl = controller(&storage, "abc");
        let first = ctl.register_hint_box("film");
        let second = ctl.register_hint_box("film");

        ctl.begin_hint(first).unwrap();
        assert_eq!(ctl.hint_state(second), HintBoxState::Hidden);
        ctl.finish_hint(first, hint_ok("Jaws"));

        let body = ctl.begin_hint(second).unwrap();
        assert!(body.as_str().starts_with("category=film&"));
        ctl.finish_hint(second, hint_ok("Jaws"));
        assert_eq!(ctl.hint_state(second), HintBoxState::Revealed);
        assert_eq!(ctl.counters().hints_used, 1);
    }
}
