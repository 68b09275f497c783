//! WebAssembly module for the AgriSynch farm assistant
//!
//! Provides client-side computation for:
//! - Growth stage resolution
//! - Offline insight generation
//! - Region lookup and crop advisories
//! - The device-local state store

use chrono::{DateTime, Utc};
use shared::{
    filter_for_settings, generate_insights, resolve_stage_lenient, soil_profiles,
    sort_by_priority, AppState, DiagnosticCase, FarmerCrop, GpsCoordinates, GrowthStage,
    NewFarmerCrop, OfflineInsight, UserProfile, UserSettings, WeatherSnapshot,
};
use wasm_bindgen::prelude::*;

mod storage;

pub use storage::{clear_state, load_state, save_state, STORAGE_KEY};

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Evaluation time: the caller's clock if given, else the browser's
fn now_or_browser(now_ms: Option<f64>) -> DateTime<Utc> {
    let ms = now_ms.unwrap_or_else(js_sys::Date::now);
    DateTime::from_timestamp_millis(ms as i64).unwrap_or_default()
}

// ============================================================================
// Pure Computations
// ============================================================================

fn stage_for(crop_type: &str, sowing_date: &str, now: DateTime<Utc>) -> GrowthStage {
    resolve_stage_lenient(crop_type, sowing_date, now)
}

fn insights_for(
    crops_json: &str,
    weather_json: &str,
    now: DateTime<Utc>,
) -> Result<Vec<OfflineInsight>, String> {
    let crops: Vec<FarmerCrop> =
        serde_json::from_str(crops_json).map_err(|e| format!("Invalid crops JSON: {}", e))?;
    let weather: WeatherSnapshot =
        serde_json::from_str(weather_json).map_err(|e| format!("Invalid weather JSON: {}", e))?;
    Ok(generate_insights(&crops, &weather, soil_profiles(), now))
}

/// Insights as the home screen shows them: opted-out ones removed, most urgent first
fn home_insights_for(state: &AppState, now: DateTime<Utc>) -> Vec<OfflineInsight> {
    let mut insights = filter_for_settings(state.insights(now), &state.settings);
    sort_by_priority(&mut insights);
    insights
}

fn region_for(latitude: f64, longitude: f64) -> Option<String> {
    let point = GpsCoordinates::from_f64(latitude, longitude)?;
    let region = shared::locate_region(&point)?;
    serde_json::to_string(region).ok()
}

// ============================================================================
// Advisory Core Bindings
// ============================================================================

/// Growth stage of a crop. Unknown crops use the vegetables table and
/// unreadable dates resolve to "sowing".
#[wasm_bindgen]
pub fn resolve_growth_stage(crop_type: &str, sowing_date: &str, now_ms: Option<f64>) -> String {
    stage_for(crop_type, sowing_date, now_or_browser(now_ms)).to_string()
}

/// Insights for a crop list and forecast, in crop and rule order
#[wasm_bindgen]
pub fn compute_insights(
    crops_json: &str,
    weather_json: &str,
    now_ms: Option<f64>,
) -> Result<String, JsValue> {
    let insights = insights_for(crops_json, weather_json, now_or_browser(now_ms))
        .map_err(|e| JsValue::from_str(&e))?;
    serde_json::to_string(&insights).map_err(|e| js_error("Failed to encode insights", e))
}

/// Home screen insights for the persisted state
#[wasm_bindgen]
pub fn home_insights(now_ms: Option<f64>) -> Result<String, JsValue> {
    let state = storage::read_state()?;
    let insights = home_insights_for(&state, now_or_browser(now_ms));
    serde_json::to_string(&insights).map_err(|e| js_error("Failed to encode insights", e))
}

/// Region containing a GPS fix, as JSON, or undefined
#[wasm_bindgen]
pub fn locate_region(latitude: f64, longitude: f64) -> Option<String> {
    region_for(latitude, longitude)
}

/// Stage advisory for a crop, as JSON
#[wasm_bindgen]
pub fn crop_advisory(crop_type: &str, stage: &str) -> Result<String, JsValue> {
    let crop_type: shared::CropType = crop_type.parse().map_err(|e| js_error("Crop", e))?;
    let stage: GrowthStage = serde_json::from_value(serde_json::Value::String(stage.to_string()))
        .map_err(|e| js_error("Stage", e))?;
    let advisory = shared::advisory_for(crop_type, stage)
        .ok_or_else(|| JsValue::from_str("No advisory for this stage"))?;
    serde_json::to_string(advisory).map_err(|e| js_error("Failed to encode advisory", e))
}

// ============================================================================
// State Mutations (load, mutate, save)
// ============================================================================

/// Register a field and persist. Returns the stored crop as JSON.
#[wasm_bindgen]
pub fn add_crop(new_crop_json: &str, now_ms: Option<f64>) -> Result<String, JsValue> {
    let input: NewFarmerCrop =
        serde_json::from_str(new_crop_json).map_err(|e| js_error("Invalid crop JSON", e))?;

    let mut state = storage::read_state()?;
    let crop = state
        .register_crop(input, now_or_browser(now_ms))
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .clone();
    storage::write_state(&state)?;

    serde_json::to_string(&crop).map_err(|e| js_error("Failed to encode crop", e))
}

/// Remove a field and persist. Returns whether it existed.
#[wasm_bindgen]
pub fn remove_crop(crop_id: &str) -> Result<bool, JsValue> {
    let mut state = storage::read_state()?;
    let removed = state.remove_crop(crop_id).is_some();
    if removed {
        storage::write_state(&state)?;
    }
    Ok(removed)
}

/// Store the signed-in farmer's profile
#[wasm_bindgen]
pub fn set_user(profile_json: &str) -> Result<(), JsValue> {
    let profile: UserProfile =
        serde_json::from_str(profile_json).map_err(|e| js_error("Invalid profile JSON", e))?;
    let mut state = storage::read_state()?;
    state
        .set_user(profile)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    storage::write_state(&state)
}

/// Replace the farmer's settings
#[wasm_bindgen]
pub fn update_settings(settings_json: &str) -> Result<(), JsValue> {
    let settings: UserSettings =
        serde_json::from_str(settings_json).map_err(|e| js_error("Invalid settings JSON", e))?;
    let mut state = storage::read_state()?;
    state
        .update_settings(settings)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    storage::write_state(&state)
}

/// Store a freshly synced forecast
#[wasm_bindgen]
pub fn apply_weather_sync(weather_json: &str, now_ms: Option<f64>) -> Result<(), JsValue> {
    let snapshot: WeatherSnapshot =
        serde_json::from_str(weather_json).map_err(|e| js_error("Invalid weather JSON", e))?;
    shared::validate_weather_snapshot(&snapshot).map_err(JsValue::from_str)?;

    let mut state = storage::read_state()?;
    state.apply_weather_sync(snapshot, now_or_browser(now_ms));
    state.is_online = true;
    storage::write_state(&state)
}

/// Add a diagnosis to the case log. Returns the case as JSON.
#[wasm_bindgen]
pub fn record_diagnosis(
    crop_nickname: &str,
    description: &str,
    diagnosis: &str,
    image_url: Option<String>,
    now_ms: Option<f64>,
) -> Result<String, JsValue> {
    let case = DiagnosticCase::new(
        crop_nickname,
        description,
        diagnosis,
        image_url,
        now_or_browser(now_ms),
    );

    let mut state = storage::read_state()?;
    state.record_diagnosis(case.clone());
    storage::write_state(&state)?;

    serde_json::to_string(&case).map_err(|e| js_error("Failed to encode case", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_stage_for_is_lenient() {
        assert_eq!(stage_for("rice", "2026-09-08", now()), GrowthStage::Vegetative);
        assert_eq!(stage_for("banana", "2026-09-03", now()), GrowthStage::Flowering);
        assert_eq!(stage_for("rice", "", now()), GrowthStage::Sowing);
    }

    #[test]
    fn test_insights_for_rejects_bad_json() {
        assert!(insights_for("not json", "[]", now()).is_err());
        assert!(insights_for("[]", "{}", now()).is_err());
        assert!(insights_for("[]", "[]", now()).unwrap().is_empty());
    }

    #[test]
    fn test_home_insights_respect_settings() {
        let state: AppState = serde_json::from_str(
            r#"{
                "crops": [{
                    "id": "k3j9x8a2b",
                    "type": "cotton",
                    "sowingDate": "2026-10-10",
                    "soilType": "black",
                    "region": "nagpur"
                }],
                "weatherSnapshot": [
                    {"date":"18/10/2026","temp":30,"condition":"sunny","precipChance":0},
                    {"date":"19/10/2026","temp":29,"condition":"cloudy","precipChance":70}
                ],
                "settings": {"pestAlerts": false}
            }"#,
        )
        .unwrap();

        let titles: Vec<_> = home_insights_for(&state, now())
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Critical: Waterlogging Risk", "Delay Fertilizer"]);
    }

    #[test]
    fn test_region_for() {
        let json = region_for(16.99, 73.31).unwrap();
        assert!(json.contains("\"ratnagiri\""));
        assert!(region_for(0.0, 0.0).is_none());
        assert!(region_for(f64::NAN, 73.0).is_none());
    }
}
