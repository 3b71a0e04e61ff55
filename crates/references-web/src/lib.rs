//! Browser client for the daily word game: wires the page to
//! `references-core` and the game server.

use wasm_bindgen::prelude::*;

use references_core::ClientConfig;

mod app;
mod dom;
mod help;
mod http;
pub mod otp;
pub mod storage;

pub use storage::LocalStore;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Start the game with the default configuration.
#[wasm_bindgen]
pub fn init_game() -> Result<(), JsValue> {
    init_logging();
    app::boot(ClientConfig::default())
}

/// Start the game with a JSON configuration; absent fields keep defaults.
#[wasm_bindgen]
pub fn init_game_with_config(json: &str) -> Result<(), JsValue> {
    init_logging();
    let config = ClientConfig::from_json(json)
        .map_err(|err| JsValue::from_str(&format!("invalid config: {err}")))?;
    app::boot(config)
}

/// Forget this game's saved progress. Takes effect on the next page load.
#[wasm_bindgen]
pub fn clear_game_state() {
    if app::with_app(|app| app.clear_state()).is_none() {
        log::warn!("clear_game_state called before init_game");
    }
}
