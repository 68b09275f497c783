//! Configuration management for the AgriSynch gateway
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Remote AI assistant configuration
    pub ai: AiConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Generative language REST base URL
    pub api_endpoint: String,

    /// API key. Empty disables the assistant and every call returns its fallback.
    pub api_key: String,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    pub diagnostic_model: String,
    pub transcription_model: String,
    pub intent_model: String,
    pub speech_model: String,

    /// Prebuilt voice used for speech synthesis
    pub voice_name: String,
}

/// Source of forecast data
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherProviderKind {
    Simulated,
    OpenWeatherMap,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    pub provider: WeatherProviderKind,

    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Number of forecast days served, starting today
    pub forecast_days: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("ai.api_endpoint", DEFAULT_AI_ENDPOINT)?
            .set_default("ai.api_key", "")?
            .set_default("ai.timeout_secs", 60)?
            .set_default("ai.diagnostic_model", "gemini-3-pro-preview")?
            .set_default(
                "ai.transcription_model",
                "gemini-2.5-flash-native-audio-preview-12-2025",
            )?
            .set_default("ai.intent_model", "gemini-3-flash-preview")?
            .set_default("ai.speech_model", "gemini-2.5-flash-preview-tts")?
            .set_default("ai.voice_name", "Kore")?
            .set_default("weather.provider", "simulated")?
            .set_default("weather.api_endpoint", DEFAULT_WEATHER_ENDPOINT)?
            .set_default("weather.api_key", "")?
            .set_default("weather.forecast_days", 4)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

const DEFAULT_AI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_AI_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_secs: 60,
            diagnostic_model: "gemini-3-pro-preview".to_string(),
            transcription_model: "gemini-2.5-flash-native-audio-preview-12-2025".to_string(),
            intent_model: "gemini-3-flash-preview".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            voice_name: "Kore".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: WeatherProviderKind::Simulated,
            api_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            api_key: String::new(),
            forecast_days: 4,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            ai: AiConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl AiConfig {
    /// Whether remote calls should be attempted at all
    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
