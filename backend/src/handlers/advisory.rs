//! HTTP handlers for insights and growth stages

use axum::Json;
use shared::OfflineInsight;

use crate::error::AppResult;
use crate::services::advisory::{
    AdvisoryService, InsightsInput, ResolveStageInput, StageResolution,
};

/// Generate insights for the submitted fields
pub async fn generate_insights(
    Json(input): Json<InsightsInput>,
) -> AppResult<Json<Vec<OfflineInsight>>> {
    let service = AdvisoryService::new();
    let insights = service.insights(input)?;
    Ok(Json(insights))
}

/// Resolve the growth stage of a single crop
pub async fn resolve_stage(
    Json(input): Json<ResolveStageInput>,
) -> AppResult<Json<StageResolution>> {
    let service = AdvisoryService::new();
    let resolution = service.resolve_stage(input)?;
    Ok(Json(resolution))
}
