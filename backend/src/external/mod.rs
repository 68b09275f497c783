//! External API integrations
//!
//! The gateway reaches two remote capabilities, each behind a trait so the
//! services never depend on a concrete vendor.

use chrono::{DateTime, Utc};
use shared::{AssistantCommand, DiagnosticRequest, GpsCoordinates, WeatherSnapshot};

use crate::error::AppResult;

pub mod gemini;
pub mod weather;

pub use gemini::GeminiClient;
pub use weather::{OpenWeatherMapProvider, SimulatedWeather};

/// Remote generative assistant used for diagnostics and voice features
#[axum::async_trait]
pub trait AiAssistant: Send + Sync {
    /// Free-text diagnosis for a symptom report
    async fn diagnose(&self, request: &DiagnosticRequest) -> AppResult<String>;

    /// Transcribe a base64 `audio/webm` voice note, translating to English
    async fn transcribe(&self, audio_base64: &str) -> AppResult<String>;

    /// Interpret a spoken command
    async fn parse_intent(&self, utterance: &str) -> AppResult<AssistantCommand>;

    /// Synthesize speech, returning base64 audio
    async fn synthesize_speech(&self, text: &str) -> AppResult<String>;
}

/// Source of short-range forecasts
#[axum::async_trait]
pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Forecast of `days` days starting with the day of `now`
    async fn forecast(
        &self,
        location: &GpsCoordinates,
        days: usize,
        now: DateTime<Utc>,
    ) -> AppResult<WeatherSnapshot>;
}
