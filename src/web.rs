//! Browser bindings
//!
//! Exposes one game session to JavaScript. The page owns rendering and
//! calls in on clicks.

use wasm_bindgen::prelude::*;
use web_sys::AudioContext;

use crate::app::TenziesApp;
use crate::audio::{AudioEngine, web::create_context};
use crate::game::RollOutcome;
use crate::platform::LocalStorage;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Tenzies starting...");
}

#[wasm_bindgen]
pub struct WebTenzies {
    app: TenziesApp<LocalStorage, AudioContext>,
}

#[wasm_bindgen]
impl WebTenzies {
    /// Load persisted state and deal a game. The audio context is only
    /// created on the first sound, after a user gesture.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebTenzies, JsValue> {
        let storage = match LocalStorage::from_window() {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::warn!("{e} - mute flag and best score will not persist");
                None
            }
        };
        let seed = js_sys::Date::now() as u64;
        let app = TenziesApp::new(storage, AudioEngine::new(create_context), seed)?;
        Ok(Self { app })
    }

    /// Returns true when a new game was dealt
    pub fn roll(&mut self) -> bool {
        self.app.roll() == RollOutcome::NewGame
    }

    /// Returns true when this hold won the game
    pub fn hold(&mut self, index: usize) -> Result<bool, JsValue> {
        Ok(self.app.hold(index)?)
    }

    /// Returns the new mute flag
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) -> Result<bool, JsValue> {
        Ok(self.app.toggle_mute()?)
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.app.is_muted()
    }

    #[wasm_bindgen(js_name = isWon)]
    pub fn is_won(&self) -> bool {
        self.app.game().is_won()
    }

    pub fn rolls(&self) -> u32 {
        self.app.game().rolls()
    }

    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> Option<u32> {
        self.app.best_score()
    }

    /// Dice as `[{"value":n,"isHeld":b}, ...]`
    #[wasm_bindgen(js_name = diceJson)]
    pub fn dice_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.app.game().dice()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
