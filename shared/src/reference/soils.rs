//! Soil profile reference table

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{Drainage, SoilProfile, SoilType, WaterRetention};
use crate::types::LocalizedName;

/// Soil profiles keyed by soil type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoilProfiles {
    profiles: BTreeMap<SoilType, SoilProfile>,
}

impl SoilProfiles {
    pub fn new(profiles: impl IntoIterator<Item = SoilProfile>) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.soil_type, p)).collect(),
        }
    }

    /// A table with no profiles; soil-dependent rules stay silent
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, soil_type: SoilType) -> Option<&SoilProfile> {
        self.profiles.get(&soil_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoilProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

static SOIL_PROFILES: OnceLock<SoilProfiles> = OnceLock::new();

/// The bundled soil profiles
pub fn soil_profiles() -> &'static SoilProfiles {
    SOIL_PROFILES.get_or_init(|| SoilProfiles::new(SoilType::ALL.into_iter().map(build_profile)))
}

fn tips(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn build_profile(soil_type: SoilType) -> SoilProfile {
    let (name, water_retention, drainage_notes, fertility, action_tips) = match soil_type {
        SoilType::Alluvial => (
            LocalizedName::new("Alluvial Soil", "जलोढ़ मिट्टी", "गाळाची माती"),
            WaterRetention::Medium,
            "Good to moderate",
            "High in potash, low in nitrogen",
            tips(&[
                "Add nitrogen in split doses",
                "Suits rice, wheat and sugarcane",
            ]),
        ),
        SoilType::Black => (
            LocalizedName::new("Black Cotton Soil", "काली मिट्टी", "काळी माती"),
            WaterRetention::High,
            "Poor, heavy cracking",
            "Rich in lime, iron and magnesia",
            tips(&[
                "Keep field drains open in monsoon",
                "Avoid over-irrigation",
                "Plough when moist, not wet",
            ]),
        ),
        SoilType::Red => (
            LocalizedName::new("Red Soil", "लाल मिट्टी", "तांबडी माती"),
            WaterRetention::Low,
            "Good, porous",
            "Poor in nitrogen, phosphorus and humus",
            tips(&[
                "Add farmyard manure every season",
                "Mulch to hold moisture",
            ]),
        ),
        SoilType::Laterite => (
            LocalizedName::new("Laterite Soil", "लेटराइट मिट्टी", "जांभा माती"),
            WaterRetention::Low,
            "Good, heavily leached",
            "Low, acidic",
            tips(&[
                "Apply lime to correct acidity",
                "Use organic matter generously",
            ]),
        ),
        SoilType::Sandy => (
            LocalizedName::new("Sandy Soil", "रेतीली मिट्टी", "वालुकामय माती"),
            WaterRetention::Low,
            "Excellent, drains very fast",
            "Very low",
            tips(&[
                "Irrigate little and often",
                "Prefer drip irrigation",
                "Add compost to build structure",
            ]),
        ),
    };

    SoilProfile {
        soil_type,
        name,
        water_retention,
        drainage: Drainage::classify(drainage_notes),
        drainage_notes: drainage_notes.to_string(),
        fertility: fertility.to_string(),
        action_tips,
    }
}
