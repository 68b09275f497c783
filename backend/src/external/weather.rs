//! Weather providers
//!
//! [`SimulatedWeather`] reproduces the offline sync feed. [`OpenWeatherMapProvider`]
//! aggregates OpenWeatherMap's 3-hourly forecast into daily entries.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, WeatherCondition, WeatherDay, WeatherSnapshot};
use std::collections::BTreeMap;

use super::WeatherProvider;
use crate::error::{AppError, AppResult};

/// Display format of forecast dates
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

// ============================================================================
// Simulated Feed
// ============================================================================

/// Random forecast used when no weather API is configured or reachable
#[derive(Clone, Default)]
pub struct SimulatedWeather;

impl SimulatedWeather {
    pub fn new() -> Self {
        Self
    }

    /// Generate `days` days starting today: 28-35 °C, any condition, 0-99 % rain
    pub fn generate<R: Rng>(rng: &mut R, days: usize, now: DateTime<Utc>) -> WeatherSnapshot {
        let today = now.date_naive();
        let days = (0..days)
            .map(|offset| WeatherDay {
                date: (today + Duration::days(offset as i64))
                    .format(DISPLAY_DATE_FORMAT)
                    .to_string(),
                temperature_celsius: 28 + rng.gen_range(0..8),
                condition: WeatherCondition::ALL[rng.gen_range(0..WeatherCondition::ALL.len())],
                precipitation_chance: rng.gen_range(0..100),
            })
            .collect();
        WeatherSnapshot::new(days)
    }
}

#[axum::async_trait]
impl WeatherProvider for SimulatedWeather {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn forecast(
        &self,
        _location: &GpsCoordinates,
        days: usize,
        now: DateTime<Utc>,
    ) -> AppResult<WeatherSnapshot> {
        Ok(Self::generate(&mut rand::thread_rng(), days, now))
    }
}

// ============================================================================
// OpenWeatherMap
// ============================================================================

/// OpenWeatherMap forecast client
#[derive(Clone)]
pub struct OpenWeatherMapProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    /// Probability of precipitation (0-1)
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
}

/// Map an OpenWeatherMap condition group to ours
fn classify_condition(group: &str) -> WeatherCondition {
    match group {
        "Thunderstorm" | "Squall" | "Tornado" => WeatherCondition::Storm,
        "Rain" | "Drizzle" => WeatherCondition::Rainy,
        "Clear" => WeatherCondition::Sunny,
        _ => WeatherCondition::Cloudy,
    }
}

fn severity(condition: WeatherCondition) -> u8 {
    match condition {
        WeatherCondition::Sunny => 0,
        WeatherCondition::Cloudy => 1,
        WeatherCondition::Rainy => 2,
        WeatherCondition::Storm => 3,
    }
}

/// Running daily aggregate: hottest slot, worst sky, highest rain chance
struct DailyAggregate {
    max_temp: f64,
    condition: WeatherCondition,
    max_pop: f64,
}

impl DailyAggregate {
    fn absorb(&mut self, item: &OWMForecastItem) {
        self.max_temp = self.max_temp.max(item.main.temp_max);
        self.max_pop = self.max_pop.max(item.pop);
        let condition = item
            .weather
            .first()
            .map(|w| classify_condition(&w.main))
            .unwrap_or(WeatherCondition::Cloudy);
        if severity(condition) > severity(self.condition) {
            self.condition = condition;
        }
    }

    fn into_day(self, date: NaiveDate) -> WeatherDay {
        WeatherDay {
            date: date.format(DISPLAY_DATE_FORMAT).to_string(),
            temperature_celsius: self.max_temp.round() as i32,
            condition: self.condition,
            precipitation_chance: (self.max_pop * 100.0).round().clamp(0.0, 100.0) as u8,
        }
    }
}

impl OpenWeatherMapProvider {
    /// Create a provider against `base_url` (e.g. `https://api.openweathermap.org/data/2.5`)
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Collapse 3-hourly slots into local calendar days from today
    fn aggregate(data: OWMForecastResponse, days: usize, now: DateTime<Utc>) -> WeatherSnapshot {
        let offset = FixedOffset::east_opt(data.city.timezone).unwrap_or_else(|| Utc.fix());
        let today = now.with_timezone(&offset).date_naive();

        let mut daily: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();
        for item in &data.list {
            let Some(at) = DateTime::from_timestamp(item.dt, 0) else {
                continue;
            };
            let date = at.with_timezone(&offset).date_naive();
            if date < today {
                continue;
            }
            daily
                .entry(date)
                .or_insert(DailyAggregate {
                    max_temp: f64::MIN,
                    condition: WeatherCondition::Sunny,
                    max_pop: 0.0,
                })
                .absorb(item);
        }

        WeatherSnapshot::new(
            daily
                .into_iter()
                .take(days)
                .map(|(date, agg)| agg.into_day(date))
                .collect(),
        )
    }
}

#[axum::async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    fn name(&self) -> &'static str {
        "openweathermap"
    }

    async fn forecast(
        &self,
        location: &GpsCoordinates,
        days: usize,
        now: DateTime<Utc>,
    ) -> AppResult<WeatherSnapshot> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, location.latitude, location.longitude, self.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::debug!("Weather API request failed: {}", e);
            AppError::WeatherServiceUnavailable
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: OWMForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse forecast response: {}", e)))?;

        Ok(Self::aggregate(data, days, now))
    }
}
