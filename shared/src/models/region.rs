//! Agro-climatic region models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SoilType;
use crate::types::{GpsCoordinates, LocalizedName};

/// Inclusive latitude/longitude box
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionBounds {
    pub min_lat: Decimal,
    pub max_lat: Decimal,
    pub min_lng: Decimal,
    pub max_lng: Decimal,
}

impl RegionBounds {
    pub fn contains(&self, point: &GpsCoordinates) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }
}

/// A district-level farming region bundled with the app for offline lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub id: String,
    pub name: LocalizedName,
    pub state: String,
    pub default_soil: SoilType,
    pub bounds: RegionBounds,
}
