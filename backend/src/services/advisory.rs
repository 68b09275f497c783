//! Advisory service: insight generation and stage resolution over JSON

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    advisory_for, days_until_next_stage, elapsed_days, filter_for_settings, generate_insights,
    parse_sowing_date, soil_profiles, sort_by_priority, validate_weather_snapshot, CropAdvisory,
    CropType, FarmerCrop, GrowthStage, OfflineInsight, UserSettings, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};

/// Input for insight generation
#[derive(Debug, Deserialize)]
pub struct InsightsInput {
    pub crops: Vec<FarmerCrop>,
    #[serde(default)]
    pub weather: WeatherSnapshot,
    /// When present, opted-out insights are dropped
    #[serde(default)]
    pub settings: Option<UserSettings>,
    /// Order by priority instead of crop and rule order
    #[serde(default)]
    pub sort_by_priority: bool,
    /// Evaluation time, defaults to the server clock
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Input for stage resolution
#[derive(Debug, Deserialize)]
pub struct ResolveStageInput {
    pub crop_type: String,
    pub sowing_date: String,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Resolved stage with the guidance that applies to it
#[derive(Debug, Serialize)]
pub struct StageResolution {
    pub crop_type: CropType,
    pub sowing_date: NaiveDate,
    pub stage: GrowthStage,
    pub days_since_sowing: i64,
    pub days_until_next_stage: Option<i64>,
    pub advisory: Option<CropAdvisory>,
}

/// Advisory service. Holds no state; every call is a pure computation.
#[derive(Clone, Default)]
pub struct AdvisoryService;

impl AdvisoryService {
    pub fn new() -> Self {
        Self
    }

    /// Generate insights for the submitted fields and forecast
    pub fn insights(&self, input: InsightsInput) -> AppResult<Vec<OfflineInsight>> {
        validate_weather_snapshot(&input.weather).map_err(|msg| AppError::Validation {
            field: "weather".to_string(),
            message: msg.to_string(),
            message_hi: "मौसम की जानकारी अमान्य है".to_string(),
        })?;

        let now = input.now.unwrap_or_else(Utc::now);
        let mut insights = generate_insights(&input.crops, &input.weather, soil_profiles(), now);

        if let Some(settings) = &input.settings {
            insights = filter_for_settings(insights, settings);
        }
        if input.sort_by_priority {
            sort_by_priority(&mut insights);
        }

        tracing::debug!(
            "Generated {} insights for {} crops",
            insights.len(),
            input.crops.len()
        );
        Ok(insights)
    }

    /// Resolve a crop's stage, rejecting unknown crops and bad dates
    pub fn resolve_stage(&self, input: ResolveStageInput) -> AppResult<StageResolution> {
        let crop_type: CropType = input.crop_type.parse()?;
        let sowing_date = parse_sowing_date(&input.sowing_date)?;
        let now = input.now.unwrap_or_else(Utc::now);
        let stage = shared::resolve_stage(crop_type, sowing_date, now);

        Ok(StageResolution {
            crop_type,
            sowing_date,
            stage,
            days_since_sowing: elapsed_days(sowing_date, now),
            days_until_next_stage: days_until_next_stage(crop_type, sowing_date, now),
            advisory: advisory_for(crop_type, stage).cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::{InsightPriority, SoilType, WeatherCondition, WeatherDay};
    use shared::RecordId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 6, 0, 0).unwrap()
    }

    fn cotton_on_black_soil() -> FarmerCrop {
        FarmerCrop {
            id: RecordId::generate(),
            crop_type: CropType::Cotton,
            sowing_date: NaiveDate::from_ymd_opt(2026, 10, 10).unwrap(),
            soil_type: SoilType::Black,
            region: "nagpur".to_string(),
            nickname: "East Block".to_string(),
        }
    }

    fn rainy_outlook() -> WeatherSnapshot {
        let day = |date: &str, condition, chance| WeatherDay {
            date: date.to_string(),
            temperature_celsius: 29,
            condition,
            precipitation_chance: chance,
        };
        WeatherSnapshot::new(vec![
            day("18/10/2026", WeatherCondition::Sunny, 10),
            day("19/10/2026", WeatherCondition::Rainy, 75),
            day("20/10/2026", WeatherCondition::Cloudy, 40),
        ])
    }

    #[test]
    fn test_insights_sorted_and_filtered() {
        let service = AdvisoryService::new();
        let insights = service
            .insights(InsightsInput {
                crops: vec![cotton_on_black_soil()],
                weather: rainy_outlook(),
                settings: Some(UserSettings {
                    critical_alerts_only: true,
                    ..UserSettings::default()
                }),
                sort_by_priority: true,
                now: Some(now()),
            })
            .unwrap();

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Critical: Waterlogging Risk");
        assert_eq!(insights[0].priority, InsightPriority::Critical);
        assert_eq!(insights[0].crop_nickname, "East Block");
    }

    #[test]
    fn test_insights_reject_impossible_forecast() {
        let mut weather = rainy_outlook();
        weather.days[1].precipitation_chance = 180;
        let result = AdvisoryService::new().insights(InsightsInput {
            crops: vec![cotton_on_black_soil()],
            weather,
            settings: None,
            sort_by_priority: false,
            now: Some(now()),
        });
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_resolve_stage_includes_advisory() {
        let resolution = AdvisoryService::new()
            .resolve_stage(ResolveStageInput {
                crop_type: "Rice".to_string(),
                sowing_date: "2026-09-08".to_string(),
                now: Some(now()),
            })
            .unwrap();

        assert_eq!(resolution.stage, GrowthStage::Vegetative);
        assert_eq!(resolution.days_since_sowing, 40);
        assert_eq!(resolution.days_until_next_stage, Some(20));
        assert_eq!(resolution.advisory.unwrap().stage, GrowthStage::Vegetative);
    }

    #[test]
    fn test_resolve_stage_unknown_crop() {
        let result = AdvisoryService::new().resolve_stage(ResolveStageInput {
            crop_type: "banana".to_string(),
            sowing_date: "2026-09-08".to_string(),
            now: Some(now()),
        });
        assert!(matches!(result, Err(AppError::UnknownCropType(_))));
    }
}
