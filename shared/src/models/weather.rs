//! Weather forecast models

use serde::{Deserialize, Serialize};

/// Sky condition reported for a forecast day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Rainy,
    Cloudy,
    Storm,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Storm,
    ];

    /// Humid, overcast conditions in which sucking pests multiply
    pub fn favours_pests(&self) -> bool {
        matches!(self, WeatherCondition::Cloudy | WeatherCondition::Rainy)
    }
}

/// A single forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherDay {
    /// Display date, e.g. "18/10/2026"
    pub date: String,
    #[serde(rename = "temp")]
    pub temperature_celsius: i32,
    pub condition: WeatherCondition,
    /// Probability of precipitation, 0-100
    #[serde(rename = "precipChance")]
    pub precipitation_chance: u8,
}

/// Ordered forecast starting today (index 0)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct WeatherSnapshot {
    pub days: Vec<WeatherDay>,
}

impl WeatherSnapshot {
    pub fn new(days: Vec<WeatherDay>) -> Self {
        Self { days }
    }

    pub fn today(&self) -> Option<&WeatherDay> {
        self.days.first()
    }

    pub fn tomorrow(&self) -> Option<&WeatherDay> {
        self.days.get(1)
    }

    pub fn day_after(&self) -> Option<&WeatherDay> {
        self.days.get(2)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_snapshot_accessors() {
        let snapshot = WeatherSnapshot::new(vec![WeatherDay {
            date: "18/10/2026".to_string(),
            temperature_celsius: 31,
            condition: WeatherCondition::Sunny,
            precipitation_chance: 10,
        }]);

        assert!(snapshot.today().is_some());
        assert!(snapshot.tomorrow().is_none());
        assert!(snapshot.day_after().is_none());
    }

    #[test]
    fn test_snapshot_is_a_plain_json_array() {
        let snapshot: WeatherSnapshot = serde_json::from_str(
            r#"[{"date":"1/1/2026","temp":30,"condition":"storm","precipChance":90}]"#,
        )
        .unwrap();
        assert_eq!(snapshot.days.len(), 1);
        assert_eq!(snapshot.days[0].condition, WeatherCondition::Storm);
    }

    #[test]
    fn test_pest_favouring_conditions() {
        assert!(WeatherCondition::Cloudy.favours_pests());
        assert!(WeatherCondition::Rainy.favours_pests());
        assert!(!WeatherCondition::Sunny.favours_pests());
        assert!(!WeatherCondition::Storm.favours_pests());
    }
}
