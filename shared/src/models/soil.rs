//! Soil reference models

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;
use crate::types::LocalizedName;

/// Soil classes found across the supported regions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    /// The device stores this as "latrite"
    #[serde(rename = "latrite", alias = "laterite")]
    Laterite,
    Sandy,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Alluvial,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
        SoilType::Sandy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Alluvial => "alluvial",
            SoilType::Black => "black",
            SoilType::Red => "red",
            SoilType::Laterite => "laterite",
            SoilType::Sandy => "sandy",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alluvial" => Ok(SoilType::Alluvial),
            "black" => Ok(SoilType::Black),
            "red" => Ok(SoilType::Red),
            "laterite" | "latrite" => Ok(SoilType::Laterite),
            "sandy" => Ok(SoilType::Sandy),
            _ => Err(DomainError::UnknownSoilType(s.to_string())),
        }
    }
}

/// How long the soil holds irrigation or rain water
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WaterRetention {
    Low,
    Medium,
    High,
}

/// How quickly excess water leaves the root zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Drainage {
    Poor,
    Moderate,
    Good,
}

impl Drainage {
    /// Classify a free-text drainage description. Anything mentioning
    /// "poor" is poor, anything mentioning "good" or "excellent" is good.
    pub fn classify(description: &str) -> Drainage {
        let text = description.to_lowercase();
        if text.contains("poor") {
            Drainage::Poor
        } else if text.contains("good") || text.contains("excellent") {
            Drainage::Good
        } else {
            Drainage::Moderate
        }
    }
}

/// Static agronomic profile of a soil class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilProfile {
    pub soil_type: SoilType,
    pub name: LocalizedName,
    pub water_retention: WaterRetention,
    pub drainage: Drainage,
    /// Human description of the drainage behaviour
    pub drainage_notes: String,
    pub fertility: String,
    pub action_tips: Vec<String>,
}

impl SoilProfile {
    pub fn has_poor_drainage(&self) -> bool {
        self.drainage == Drainage::Poor
    }
}
