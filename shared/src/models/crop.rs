//! Farmer crop (field) models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::error::DomainError;
use crate::models::SoilType;
use crate::types::RecordId;

/// Crops supported by the advisory tables
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Rice,
    Wheat,
    Maize,
    Cotton,
    Sugarcane,
    Pulses,
    Vegetables,
}

impl CropType {
    pub const ALL: [CropType; 7] = [
        CropType::Rice,
        CropType::Wheat,
        CropType::Maize,
        CropType::Cotton,
        CropType::Sugarcane,
        CropType::Pulses,
        CropType::Vegetables,
    ];

    /// Lowercase identifier, also used as the display fallback for unnamed fields
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Rice => "rice",
            CropType::Wheat => "wheat",
            CropType::Maize => "maize",
            CropType::Cotton => "cotton",
            CropType::Sugarcane => "sugarcane",
            CropType::Pulses => "pulses",
            CropType::Vegetables => "vegetables",
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CropType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        CropType::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| DomainError::UnknownCropType(s.to_string()))
    }
}

/// Phenological stage of a crop. Ordering follows the season.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Sowing,
    Vegetative,
    Flowering,
    Maturity,
    Harvest,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Sowing,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Maturity,
        GrowthStage::Harvest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Sowing => "sowing",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Maturity => "maturity",
            GrowthStage::Harvest => "harvest",
        }
    }

    /// Stage that follows this one, `None` once harvest is reached
    pub fn next(&self) -> Option<GrowthStage> {
        match self {
            GrowthStage::Sowing => Some(GrowthStage::Vegetative),
            GrowthStage::Vegetative => Some(GrowthStage::Flowering),
            GrowthStage::Flowering => Some(GrowthStage::Maturity),
            GrowthStage::Maturity => Some(GrowthStage::Harvest),
            GrowthStage::Harvest => None,
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sowing dates are stored as "YYYY-MM-DD", sometimes with a time suffix
mod sowing_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::growth::parse_sowing_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// A field registered by the farmer, in the device's storage shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmerCrop {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub crop_type: CropType,
    #[serde(with = "sowing_date_format")]
    pub sowing_date: NaiveDate,
    pub soil_type: SoilType,
    pub region: String,
    #[serde(default)]
    pub nickname: String,
}

impl FarmerCrop {
    /// Nickname if the farmer gave one, otherwise the crop type name.
    /// A whitespace-only nickname counts as none, so a blank entry still
    /// shows the crop name.
    pub fn display_name(&self) -> &str {
        let trimmed = self.nickname.trim();
        if trimmed.is_empty() {
            self.crop_type.as_str()
        } else {
            trimmed
        }
    }
}

/// Input for registering a new field
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFarmerCrop {
    #[serde(rename = "type")]
    pub crop_type: CropType,
    #[serde(with = "sowing_date_format")]
    pub sowing_date: NaiveDate,
    pub soil_type: SoilType,
    #[validate(length(min = 1, max = 80))]
    pub region: String,
    #[serde(default)]
    #[validate(length(max = 40))]
    pub nickname: String,
}
