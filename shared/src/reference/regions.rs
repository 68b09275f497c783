//! Bundled region table for offline location lookup

use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::models::{Region, RegionBounds, SoilType};
use crate::types::{GpsCoordinates, LocalizedName};

static REGIONS: OnceLock<Vec<Region>> = OnceLock::new();

/// The bundled regions, in lookup order
pub fn regions() -> &'static [Region] {
    REGIONS.get_or_init(build_regions)
}

/// First region whose bounding box contains the point
pub fn locate_region(point: &GpsCoordinates) -> Option<&'static Region> {
    regions().iter().find(|r| r.bounds.contains(point))
}

pub fn find_region(id: &str) -> Option<&'static Region> {
    regions().iter().find(|r| r.id == id)
}

/// Bounds given in hundredths of a degree
fn bounds(min_lat: i64, max_lat: i64, min_lng: i64, max_lng: i64) -> RegionBounds {
    RegionBounds {
        min_lat: Decimal::new(min_lat, 2),
        max_lat: Decimal::new(max_lat, 2),
        min_lng: Decimal::new(min_lng, 2),
        max_lng: Decimal::new(max_lng, 2),
    }
}

fn region(
    id: &str,
    name: LocalizedName,
    state: &str,
    default_soil: SoilType,
    bounds: RegionBounds,
) -> Region {
    Region {
        id: id.to_string(),
        name,
        state: state.to_string(),
        default_soil,
        bounds,
    }
}

fn build_regions() -> Vec<Region> {
    vec![
        region(
            "pune",
            LocalizedName::new("Pune", "पुणे", "पुणे"),
            "Maharashtra",
            SoilType::Black,
            bounds(1790, 1945, 7330, 7520),
        ),
        region(
            "nashik",
            LocalizedName::new("Nashik", "नासिक", "नाशिक"),
            "Maharashtra",
            SoilType::Black,
            bounds(1945, 2080, 7330, 7480),
        ),
        region(
            "nagpur",
            LocalizedName::new("Nagpur", "नागपुर", "नागपूर"),
            "Maharashtra",
            SoilType::Black,
            bounds(2050, 2170, 7800, 7960),
        ),
        region(
            "ratnagiri",
            LocalizedName::new("Ratnagiri", "रत्नागिरी", "रत्नागिरी"),
            "Maharashtra",
            SoilType::Laterite,
            bounds(1620, 1790, 7290, 7370),
        ),
        region(
            "kolhapur",
            LocalizedName::new("Kolhapur", "कोल्हापुर", "कोल्हापूर"),
            "Maharashtra",
            SoilType::Red,
            bounds(1570, 1720, 7370, 7480),
        ),
        region(
            "ludhiana",
            LocalizedName::new("Ludhiana", "लुधियाना", "लुधियाना"),
            "Punjab",
            SoilType::Alluvial,
            bounds(3050, 3110, 7530, 7620),
        ),
        region(
            "jaisalmer",
            LocalizedName::new("Jaisalmer", "जैसलमेर", "जैसलमेर"),
            "Rajasthan",
            SoilType::Sandy,
            bounds(2600, 2800, 6930, 7250),
        ),
    ]
}
