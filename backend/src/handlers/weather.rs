//! HTTP handlers for weather forecasts

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{GpsCoordinates, WeatherSnapshot};

use crate::error::AppResult;
use crate::AppState;

/// Query parameters for a forecast
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

/// Get the forecast starting today
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<WeatherSnapshot>> {
    let location = match (query.latitude, query.longitude) {
        (Some(lat), Some(lng)) => Some(GpsCoordinates::new(lat, lng)),
        _ => None,
    };
    let snapshot = state.weather.forecast(location, Utc::now()).await?;
    Ok(Json(snapshot))
}
