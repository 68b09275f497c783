//! Client-local state store over `localStorage`
//!
//! The whole [`AppState`] is kept as one JSON blob under a fixed key, in the
//! same shape the mobile shell writes. It is loaded before every mutation and
//! written back right after. A blob that fails to decode is never written
//! over; mutations fail until the shell saves or clears the state.

use shared::AppState;
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Storage namespace of the persisted state
pub const STORAGE_KEY: &str = "agrisynch_store_v20";

fn local_storage() -> Result<web_sys::Storage, JsValue> {
    web_sys::window()
        .ok_or("No window object")?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage is unavailable"))
}

/// Decode a stored blob. Missing or unreadable blobs start a fresh state.
pub(crate) fn decode_state(raw: Option<&str>) -> Result<AppState, serde_json::Error> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw),
        _ => Ok(AppState::default()),
    }
}

/// State to mutate. Errors on an unreadable blob so it is not overwritten.
pub(crate) fn read_state() -> Result<AppState, JsValue> {
    let raw = local_storage()?.get_item(STORAGE_KEY)?;
    decode_state(raw.as_deref()).map_err(|e| {
        console::error_1(&format!("Saved state is unreadable, leaving it untouched: {}", e).into());
        JsValue::from_str(&format!("Saved state is unreadable: {}", e))
    })
}

pub(crate) fn write_state(state: &AppState) -> Result<(), JsValue> {
    let raw = serde_json::to_string(state)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode state: {}", e)))?;
    local_storage()?.set_item(STORAGE_KEY, &raw).map_err(|e| {
        console::error_1(&"Failed to persist state".into());
        e
    })
}

/// Load the persisted state as JSON. An unreadable blob yields a fresh
/// state without touching what is stored.
#[wasm_bindgen]
pub fn load_state() -> Result<String, JsValue> {
    let raw = local_storage()?.get_item(STORAGE_KEY)?;
    let state = decode_state(raw.as_deref()).unwrap_or_else(|e| {
        console::warn_1(&format!("Saved state is unreadable: {}", e).into());
        AppState::default()
    });
    serde_json::to_string(&state).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Replace the persisted state
#[wasm_bindgen]
pub fn save_state(state_json: &str) -> Result<(), JsValue> {
    let state: AppState = serde_json::from_str(state_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid state JSON: {}", e)))?;
    write_state(&state)
}

/// Forget everything stored on this device
#[wasm_bindgen]
pub fn clear_state() -> Result<(), JsValue> {
    local_storage()?.remove_item(STORAGE_KEY)
}
