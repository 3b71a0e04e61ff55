/// A failed `/guess` or `/hint` round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status. `message` is the `error`
    /// field of the response body when one could be read.
    #[error("{}", http_message(.status, .message))]
    Http { status: u16, message: Option<String> },
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),
    /// The response body was not the JSON we expected.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

fn http_message(status: &u16, message: &Option<String>) -> String {
    match message.as_deref() {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => format!("HTTP error {status}"),
    }
}

/// Why a guess was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuessRejected {
    /// No guesses remain. The page ignores the action silently.
    #[error("No guesses left")]
    NoGuessesLeft,
    #[error("Please enter a guess.")]
    Empty,
    /// OTP cells are not all filled.
    #[error("Please fill all letters")]
    Incomplete,
    /// A guess is already in flight, or the page is navigating away.
    #[error("A guess is already being checked")]
    Busy,
}

impl GuessRejected {
    /// Text to show in the results area, if any.
    pub fn user_message(&self) -> Option<String> {
        match self {
            GuessRejected::NoGuessesLeft | GuessRejected::Busy => None,
            other => Some(other.to_string()),
        }
    }
}
