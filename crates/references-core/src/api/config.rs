use serde::{Deserialize, Serialize};

/// Configuration for the game client.
/// Every field has a default, so a page may override only what it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Guesses a player gets per game (default: 4).
    pub max_guesses: u32,
    /// Prefix for every local-storage key (default: "references").
    pub storage_prefix: String,
    /// Endpoint that checks a guess (default: "/guess").
    pub guess_endpoint: String,
    /// Endpoint that reveals a hint (default: "/hint").
    pub hint_endpoint: String,
    /// Page shown after a correct guess (default: "/success").
    pub success_path: String,
    /// Page shown once all guesses are spent (default: "/maybe-tomorrow").
    pub failure_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_guesses: 4,
            storage_prefix: "references".to_string(),
            guess_endpoint: "/guess".to_string(),
            hint_endpoint: "/hint".to_string(),
            success_path: "/success".to_string(),
            failure_path: "/maybe-tomorrow".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
