//! HTTP handlers for the static reference datasets

use axum::{
    extract::{Path, Query},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    advisory_for, crop_datasets, locate_region, regions, soil_profiles, validate_coordinates,
    CropAdvisory, CropDataset, CropType, GpsCoordinates, GrowthStage, Region, SoilProfile,
};

use crate::error::{AppError, AppResult};

/// List every crop with its per-stage advisories
pub async fn list_crops() -> Json<Vec<CropDataset>> {
    Json(crop_datasets().values().cloned().collect())
}

/// Advisory for one crop at one stage
pub async fn get_crop_advisory(
    Path((crop, stage)): Path<(String, GrowthStage)>,
) -> AppResult<Json<CropAdvisory>> {
    let crop_type: CropType = crop.parse()?;
    let advisory = advisory_for(crop_type, stage)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Advisory for {} at {}", crop_type, stage)))?;
    Ok(Json(advisory))
}

/// List soil profiles
pub async fn list_soils() -> Json<Vec<SoilProfile>> {
    Json(soil_profiles().iter().cloned().collect())
}

/// List bundled regions
pub async fn list_regions() -> Json<Vec<Region>> {
    Json(regions().to_vec())
}

/// Query parameters for region lookup
#[derive(Debug, Deserialize)]
pub struct LocateQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Find the region containing a point
pub async fn locate(Query(query): Query<LocateQuery>) -> AppResult<Json<Region>> {
    let point = GpsCoordinates::new(query.latitude, query.longitude);
    validate_coordinates(&point).map_err(|msg| AppError::Validation {
        field: "latitude".to_string(),
        message: msg.to_string(),
        message_hi: "स्थान भारत के बाहर है".to_string(),
    })?;

    let region = locate_region(&point)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Region".to_string()))?;
    Ok(Json(region))
}
