//! Farmer application state
//!
//! The whole state is owned by the client shell, which loads it once at
//! startup and saves it after every mutation. Nothing in this module performs
//! storage I/O; the advisory core only reads from it.
//!
//! Field names follow the shell's camelCase storage shape. Keys this crate
//! does not model (e.g. the shell's `cachedInsights`) are carried through
//! untouched so a save never drops them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::{
    DiagnosticCase, FarmerCrop, NewFarmerCrop, OfflineInsight, WeatherSnapshot,
};
use crate::types::{Language, RecordId};
use crate::validation;

/// Number of diagnostic cases kept in the case log
pub const MAX_DIAGNOSTIC_HISTORY: usize = 20;

/// Last sync time is a display string, e.g. "18 Oct, 09:00"
pub const SYNC_TIME_FORMAT: &str = "%d %b, %H:%M";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UsageMode {
    #[default]
    Simple,
    Advanced,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationMethod {
    Drip,
    Sprinkler,
    Flood,
    Manual,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryFrequency {
    Daily,
    Weekly,
    Urgent,
}

/// Farmer profile captured at sign-up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// May be empty, the sign-up form does not require it
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub village: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub crop_preferences: Vec<crate::models::CropType>,
    pub irrigation_method: IrrigationMethod,
    pub advisory_frequency: AdvisoryFrequency,
}

/// Personalisation and alert preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSettings {
    pub theme: Theme,
    pub usage_mode: UsageMode,
    pub high_contrast: bool,
    pub haptic_feedback: bool,
    pub critical_alerts_only: bool,
    /// "HH:MM"
    pub daily_reminder_time: String,
    pub pin_lock: Option<String>,
    pub hide_sensitive_info: bool,
    pub notification_sound: String,
    /// Base font size in px, 12-20
    pub font_size: u8,
    pub weather_alerts: bool,
    pub pest_alerts: bool,
    pub market_price_alerts: bool,
    pub govt_schemes_alerts: bool,
    pub two_factor_auth: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            usage_mode: UsageMode::Simple,
            high_contrast: false,
            haptic_feedback: true,
            critical_alerts_only: false,
            daily_reminder_time: "08:00".to_string(),
            pin_lock: None,
            hide_sensitive_info: false,
            notification_sound: "Bell".to_string(),
            font_size: 14,
            weather_alerts: true,
            pest_alerts: true,
            market_price_alerts: false,
            govt_schemes_alerts: true,
            two_factor_auth: false,
        }
    }
}

impl UserSettings {
    pub fn validate(&self) -> DomainResult<()> {
        validation::validate_font_size(self.font_size).map_err(DomainError::Validation)?;
        validation::validate_reminder_time(&self.daily_reminder_time)
            .map_err(DomainError::Validation)?;
        Ok(())
    }
}

/// Everything the client persists between sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AppState {
    pub language: Language,
    pub user: Option<UserProfile>,
    pub crops: Vec<FarmerCrop>,
    pub weather_snapshot: WeatherSnapshot,
    pub is_online: bool,
    /// Display string written at the last sync
    pub last_sync_time: Option<String>,
    pub diagnostic_history: Vec<DiagnosticCase>,
    pub settings: UserSettings,
    /// Shell-owned keys, kept as stored
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AppState {
    /// Validate and register a new field
    pub fn register_crop(
        &mut self,
        input: NewFarmerCrop,
        now: DateTime<Utc>,
    ) -> DomainResult<&FarmerCrop> {
        input.validate()?;
        validation::validate_nickname(&input.nickname).map_err(DomainError::Validation)?;
        validation::validate_sowing_date(input.sowing_date, now.date_naive())?;

        self.crops.push(FarmerCrop {
            id: RecordId::generate(),
            crop_type: input.crop_type,
            sowing_date: input.sowing_date,
            soil_type: input.soil_type,
            region: input.region.trim().to_string(),
            nickname: input.nickname.trim().to_string(),
        });

        // Just pushed, so the vector is non-empty
        Ok(&self.crops[self.crops.len() - 1])
    }

    /// Remove a field, returning it if it existed
    pub fn remove_crop(&mut self, crop_id: &str) -> Option<FarmerCrop> {
        let index = self.crops.iter().position(|c| c.id.as_str() == crop_id)?;
        Some(self.crops.remove(index))
    }

    pub fn find_crop(&self, crop_id: &str) -> Option<&FarmerCrop> {
        self.crops.iter().find(|c| c.id.as_str() == crop_id)
    }

    /// Sign a farmer in. A phone number, when given, must be a valid Indian mobile.
    pub fn set_user(&mut self, profile: UserProfile) -> DomainResult<()> {
        if profile.name.trim().is_empty() {
            return Err(DomainError::Validation("Name is required"));
        }
        if !profile.phone.trim().is_empty() {
            validation::validate_indian_phone(&profile.phone).map_err(DomainError::Validation)?;
        }
        self.user = Some(profile);
        Ok(())
    }

    /// Replace the settings after checking font size and reminder time
    pub fn update_settings(&mut self, settings: UserSettings) -> DomainResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Replace the forecast after a manual or automatic sync
    pub fn apply_weather_sync(&mut self, snapshot: WeatherSnapshot, now: DateTime<Utc>) {
        self.weather_snapshot = snapshot;
        self.last_sync_time = Some(now.format(SYNC_TIME_FORMAT).to_string());
    }

    /// Prepend a case to the log, dropping the oldest beyond the cap
    pub fn record_diagnosis(&mut self, case: DiagnosticCase) {
        self.diagnostic_history.insert(0, case);
        self.diagnostic_history.truncate(MAX_DIAGNOSTIC_HISTORY);
    }

    /// Fresh insights for the current fields and forecast
    pub fn insights(&self, now: DateTime<Utc>) -> Vec<OfflineInsight> {
        crate::insights::generate_insights(
            &self.crops,
            &self.weather_snapshot,
            crate::reference::soil_profiles(),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropType, SoilType};
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn new_crop(sowing: NaiveDate, nickname: &str) -> NewFarmerCrop {
        NewFarmerCrop {
            crop_type: CropType::Rice,
            sowing_date: sowing,
            soil_type: SoilType::Alluvial,
            region: "nashik".to_string(),
            nickname: nickname.to_string(),
        }
    }

    #[test]
    fn test_register_and_remove_crop() {
        let mut state = AppState::default();
        let sowing = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let id = state
            .register_crop(new_crop(sowing, " River Field "), now())
            .unwrap()
            .id
            .clone();

        assert_eq!(state.crops.len(), 1);
        assert_eq!(state.find_crop(id.as_str()).unwrap().nickname, "River Field");

        let removed = state.remove_crop(id.as_str()).unwrap();
        assert_eq!(removed.id, id);
        assert!(state.crops.is_empty());
        assert!(state.remove_crop(id.as_str()).is_none());
    }

    #[test]
    fn test_register_rejects_future_sowing_date() {
        let mut state = AppState::default();
        let sowing = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let result = state.register_crop(new_crop(sowing, ""), now());
        assert!(matches!(result, Err(DomainError::SowingDateInFuture(_))));
        assert!(state.crops.is_empty());
    }

    #[test]
    fn test_register_rejects_long_nickname() {
        let mut state = AppState::default();
        let sowing = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let result = state.register_crop(new_crop(sowing, &"x".repeat(41)), now());
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));

        let result = state.register_crop(new_crop(sowing, "bad\nname"), now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(state.crops.is_empty());
    }

    fn profile(phone: &str) -> UserProfile {
        UserProfile {
            name: "Farmer User".to_string(),
            phone: phone.to_string(),
            village: "Narayangaon".to_string(),
            experience: "Intermediate".to_string(),
            photo_url: None,
            crop_preferences: vec![],
            irrigation_method: IrrigationMethod::Manual,
            advisory_frequency: AdvisoryFrequency::Daily,
        }
    }

    #[test]
    fn test_set_user_checks_phone() {
        let mut state = AppState::default();
        assert!(state.set_user(profile("12345")).is_err());
        assert!(state.user.is_none());

        state.set_user(profile("")).unwrap();
        state.set_user(profile("+91 98765 43210")).unwrap();
        assert_eq!(state.user.unwrap().phone, "+91 98765 43210");
    }

    #[test]
    fn test_update_settings_checks_ranges() {
        let mut state = AppState::default();
        let too_big = UserSettings {
            font_size: 24,
            ..UserSettings::default()
        };
        assert!(matches!(
            state.update_settings(too_big),
            Err(DomainError::Validation(_))
        ));

        let bad_time = UserSettings {
            daily_reminder_time: "25:00".to_string(),
            ..UserSettings::default()
        };
        assert!(state.update_settings(bad_time).is_err());
        assert_eq!(state.settings, UserSettings::default());

        let larger = UserSettings {
            font_size: 18,
            daily_reminder_time: "06:30".to_string(),
            ..UserSettings::default()
        };
        state.update_settings(larger).unwrap();
        assert_eq!(state.settings.font_size, 18);
    }

    #[test]
    fn test_diagnostic_history_is_capped_newest_first() {
        let mut state = AppState::default();
        for i in 0..25 {
            state.record_diagnosis(DiagnosticCase::new(
                &format!("case {}", i),
                "",
                "",
                None,
                now(),
            ));
        }
        assert_eq!(state.diagnostic_history.len(), MAX_DIAGNOSTIC_HISTORY);
        assert_eq!(state.diagnostic_history[0].crop_nickname, "case 24");
        assert_eq!(state.diagnostic_history[19].crop_nickname, "case 5");
    }

    #[test]
    fn test_weather_sync_stamps_time() {
        let mut state = AppState::default();
        state.apply_weather_sync(WeatherSnapshot::default(), now());
        assert_eq!(state.last_sync_time.as_deref(), Some("18 Oct, 09:00"));
    }

    #[test]
    fn test_partial_state_deserializes_with_defaults() {
        let state: AppState = serde_json::from_str(r#"{"language":"mr"}"#).unwrap();
        assert_eq!(state.language, Language::Marathi);
        assert!(state.crops.is_empty());
        assert_eq!(state.settings.font_size, 14);
        assert!(state.settings.weather_alerts);
    }
}
