use crate::api::config::ClientConfig;
use crate::api::form::encode_component;
use crate::api::types::GameId;

/// Which outcome page a finished game navigates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The word was guessed.
    Success,
    /// All guesses were spent.
    MaybeTomorrow,
}

/// A navigation to an outcome page, with the query parameters that page reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub outcome: Outcome,
    pub word: String,
    pub guesses: u32,
    pub hints: usize,
    pub game_id: GameId,
}

impl Redirect {
    /// Build the target URL: `<path>?word=&guesses=&hints=&gameId=`.
    pub fn to_url(&self, config: &ClientConfig) -> String {
        let path = match self.outcome {
            Outcome::Success => &config.success_path,
            Outcome::MaybeTomorrow => &config.failure_path,
        };
        format!(
            "{}?word={}&guesses={}&hints={}&gameId={}",
            path,
            encode_component(&self.word),
            self.guesses,
            self.hints,
            encode_component(self.game_id.as_str()),
        )
    }
}
