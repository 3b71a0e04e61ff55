use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::api::types::PlayerId;

/// Characters left as-is by `encodeURIComponent`. Everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Content type sent with every form body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Percent-encode one URL component the way `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// An `application/x-www-form-urlencoded` body, built field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    encoded: String,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `name=value` pair.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        if !self.encoded.is_empty() {
            self.encoded.push('&');
        }
        self.encoded.push_str(&encode_component(name));
        self.encoded.push('=');
        self.encoded.push_str(&encode_component(value));
        self
    }

    /// Body for `POST /guess`.
    pub fn guess(guess: &str, player: &PlayerId) -> Self {
        Self::new().field("guess", guess).field("playerID", player.as_str())
    }

    /// Body for `POST /hint`.
    pub fn hint(category: &str, player: &PlayerId) -> Self {
        Self::new().field("category", category).field("playerID", player.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn into_string(self) -> String {
        self.encoded
    }
}
