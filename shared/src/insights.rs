//! Forward-looking insight generation
//!
//! Combines each field's growth stage, its soil profile and the short-range
//! forecast into actionable advisories. Output order is crop order, and within
//! a crop the rule order below; callers that want urgency ordering should use
//! [`sort_by_priority`].

use chrono::{DateTime, Utc};

use crate::growth::resolve_stage;
use crate::models::{
    ActionDate, CropType, FarmerCrop, GrowthStage, InsightCategory, InsightPriority,
    OfflineInsight, SoilProfile, UserSettings, WaterRetention, WeatherCondition, WeatherDay,
    WeatherSnapshot,
};
use crate::reference::SoilProfiles;

/// Precipitation chance (percent) above which rain is expected
pub const RAIN_PROBABILITY_THRESHOLD: u8 = 50;

/// Temperature (°C) above which a day counts as hot
pub const HEAT_THRESHOLD_CELSIUS: i32 = 35;

/// The forecast days the rules look at. Any of them may be missing.
struct Outlook<'a> {
    today: Option<&'a WeatherDay>,
    tomorrow: Option<&'a WeatherDay>,
    day_after: Option<&'a WeatherDay>,
}

impl<'a> Outlook<'a> {
    fn from_snapshot(snapshot: &'a WeatherSnapshot) -> Self {
        Self {
            today: snapshot.today(),
            tomorrow: snapshot.tomorrow(),
            day_after: snapshot.day_after(),
        }
    }

    fn rain_expected(&self) -> bool {
        [self.tomorrow, self.day_after]
            .into_iter()
            .flatten()
            .any(|d| d.precipitation_chance > RAIN_PROBABILITY_THRESHOLD)
    }

    fn heat_expected(&self) -> bool {
        [self.today, self.tomorrow]
            .into_iter()
            .flatten()
            .any(|d| d.temperature_celsius > HEAT_THRESHOLD_CELSIUS)
    }

    fn today_condition(&self) -> Option<WeatherCondition> {
        self.today.map(|d| d.condition)
    }

    fn tomorrow_condition(&self) -> Option<WeatherCondition> {
        self.tomorrow.map(|d| d.condition)
    }

    /// Tomorrow's display date, or `fallback` if tomorrow is not forecast
    fn tomorrow_date_or(&self, fallback: ActionDate) -> ActionDate {
        self.tomorrow
            .map(|d| ActionDate::On(d.date.clone()))
            .unwrap_or(fallback)
    }
}

/// Insight builder bound to one field
struct CropInsights<'a> {
    crop: &'a FarmerCrop,
    out: &'a mut Vec<OfflineInsight>,
}

impl CropInsights<'_> {
    fn push(
        &mut self,
        title: &str,
        description: String,
        priority: InsightPriority,
        action_date: ActionDate,
        category: InsightCategory,
    ) {
        self.out.push(OfflineInsight {
            crop_id: self.crop.id.clone(),
            crop_nickname: self.crop.display_name().to_string(),
            title: title.to_string(),
            description,
            priority,
            action_date,
            category,
        });
    }
}

/// Generate insights for every field. Inputs are only read.
pub fn generate_insights(
    crops: &[FarmerCrop],
    weather: &WeatherSnapshot,
    soils: &SoilProfiles,
    now: DateTime<Utc>,
) -> Vec<OfflineInsight> {
    let outlook = Outlook::from_snapshot(weather);
    let mut insights = Vec::new();

    for crop in crops {
        let stage = resolve_stage(crop.crop_type, crop.sowing_date, now);
        let soil = soils.get(crop.soil_type);
        let mut emit = CropInsights {
            crop,
            out: &mut insights,
        };

        waterlogging_risk(&mut emit, &outlook, soil);
        fertilizer_leaching(&mut emit, &outlook);
        heat_irrigation(&mut emit, &outlook, stage, soil);
        pest_scouting(&mut emit, &outlook);
        harvest_opportunity(&mut emit, &outlook, stage);
    }

    insights
}

fn waterlogging_risk(emit: &mut CropInsights<'_>, outlook: &Outlook<'_>, soil: Option<&SoilProfile>) {
    let Some(soil) = soil else { return };
    if outlook.rain_expected() && soil.has_poor_drainage() {
        emit.push(
            "Critical: Waterlogging Risk",
            format!(
                "Rain coming. Your {} has poor drainage. Clear drainage channels now.",
                soil.name.en
            ),
            InsightPriority::Critical,
            ActionDate::Today,
            InsightCategory::Weather,
        );
    }
}

fn fertilizer_leaching(emit: &mut CropInsights<'_>, outlook: &Outlook<'_>) {
    if outlook.rain_expected() {
        emit.push(
            "Delay Fertilizer",
            "Rain expected. Applying fertilizer now will waste nutrients via leaching."
                .to_string(),
            InsightPriority::Warning,
            outlook.tomorrow_date_or(ActionDate::Soon),
            InsightCategory::Fertilizer,
        );
    }
}

fn heat_irrigation(
    emit: &mut CropInsights<'_>,
    outlook: &Outlook<'_>,
    stage: GrowthStage,
    soil: Option<&SoilProfile>,
) {
    if !matches!(stage, GrowthStage::Vegetative | GrowthStage::Flowering) {
        return;
    }
    if !outlook.heat_expected() {
        return;
    }

    match soil {
        Some(soil) if soil.water_retention == WaterRetention::Low => emit.push(
            "Immediate Irrigation",
            format!(
                "{} dries fast. Heatwave + low retention requires extra watering today.",
                soil.name.en
            ),
            InsightPriority::Critical,
            ActionDate::Today,
            InsightCategory::Soil,
        ),
        _ => emit.push(
            "Prepare Irrigation",
            "High temperature ahead. Plan to water early morning for moisture conservation."
                .to_string(),
            InsightPriority::Normal,
            ActionDate::Tomorrow,
            InsightCategory::Weather,
        ),
    }
}

fn pest_scouting(emit: &mut CropInsights<'_>, outlook: &Outlook<'_>) {
    if !outlook.tomorrow_condition().is_some_and(|c| c.favours_pests()) {
        return;
    }
    let title = if emit.crop.crop_type == CropType::Cotton {
        "Whitefly Watch"
    } else {
        "Pest Scouting"
    };
    emit.push(
        title,
        "Moist/Cloudy conditions favored by pests. Inspect leaf undersides.".to_string(),
        InsightPriority::Normal,
        outlook.tomorrow_date_or(ActionDate::Tomorrow),
        InsightCategory::Pest,
    );
}

fn harvest_opportunity(emit: &mut CropInsights<'_>, outlook: &Outlook<'_>, stage: GrowthStage) {
    if stage == GrowthStage::Harvest && outlook.today_condition() == Some(WeatherCondition::Sunny) {
        emit.push(
            "Harvest Opportunity",
            "Dry weather today is perfect for harvesting and drying grains.".to_string(),
            InsightPriority::Critical,
            ActionDate::Today,
            InsightCategory::Weather,
        );
    }
}

/// Stable sort, most urgent first. Crop and rule order survive within a priority.
pub fn sort_by_priority(insights: &mut [OfflineInsight]) {
    insights.sort_by_key(|i| i.priority);
}

/// Drop insights the farmer has opted out of
pub fn filter_for_settings(
    insights: Vec<OfflineInsight>,
    settings: &UserSettings,
) -> Vec<OfflineInsight> {
    insights
        .into_iter()
        .filter(|i| !settings.critical_alerts_only || i.priority == InsightPriority::Critical)
        .filter(|i| match i.category {
            InsightCategory::Weather | InsightCategory::Soil => settings.weather_alerts,
            InsightCategory::Pest => settings.pest_alerts,
            InsightCategory::Fertilizer => true,
        })
        .collect()
}
