//! Weather service: forecast sync with simulated fallback

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{validate_weather_snapshot, GpsCoordinates, WeatherSnapshot};
use std::sync::Arc;

use crate::config::{WeatherConfig, WeatherProviderKind};
use crate::error::{AppError, AppResult};
use crate::external::{OpenWeatherMapProvider, SimulatedWeather, WeatherProvider};

/// Serves forecasts from the configured provider, falling back to the
/// simulated feed whenever the remote provider fails
#[derive(Clone)]
pub struct WeatherService {
    remote: Option<Arc<dyn WeatherProvider>>,
    fallback: SimulatedWeather,
    forecast_days: usize,
}

impl WeatherService {
    pub fn new(remote: Option<Arc<dyn WeatherProvider>>, forecast_days: usize) -> Self {
        Self {
            remote,
            fallback: SimulatedWeather::new(),
            forecast_days,
        }
    }

    /// Build from configuration
    pub fn from_config(config: &WeatherConfig) -> AppResult<Self> {
        if config.forecast_days == 0 {
            return Err(AppError::Configuration(
                "weather.forecast_days must be at least 1".to_string(),
            ));
        }

        let remote: Option<Arc<dyn WeatherProvider>> = match config.provider {
            WeatherProviderKind::Simulated => None,
            WeatherProviderKind::OpenWeatherMap => {
                if config.api_key.trim().is_empty() {
                    return Err(AppError::Configuration(
                        "weather.api_key is required for openweathermap".to_string(),
                    ));
                }
                Some(Arc::new(OpenWeatherMapProvider::new(
                    config.api_key.clone(),
                    config.api_endpoint.clone(),
                )))
            }
        };

        Ok(Self::new(remote, config.forecast_days))
    }

    pub fn provider_name(&self) -> &'static str {
        self.remote
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    /// Fetch a forecast starting today. Without a location, or when the
    /// remote provider fails, the simulated feed is used.
    pub async fn forecast(
        &self,
        location: Option<GpsCoordinates>,
        now: DateTime<Utc>,
    ) -> AppResult<WeatherSnapshot> {
        if let (Some(remote), Some(location)) = (&self.remote, location.as_ref()) {
            match remote.forecast(location, self.forecast_days, now).await {
                Ok(snapshot) if !snapshot.is_empty() => match validate_weather_snapshot(&snapshot) {
                    Ok(()) => return Ok(snapshot),
                    Err(msg) => {
                        tracing::warn!(
                            "{} returned an implausible forecast ({}), using simulated feed",
                            remote.name(),
                            msg
                        );
                    }
                },
                Ok(_) => {
                    tracing::warn!(
                        "{} returned an empty forecast, using simulated feed",
                        remote.name()
                    );
                }
                Err(e) => {
                    tracing::warn!("{} failed ({}), using simulated feed", remote.name(), e);
                }
            }
        }

        let anywhere = location.unwrap_or_else(|| GpsCoordinates::new(Decimal::ZERO, Decimal::ZERO));
        self.fallback
            .forecast(&anywhere, self.forecast_days, now)
            .await
    }
}
