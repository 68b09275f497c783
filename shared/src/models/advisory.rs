//! Per-crop advisory reference models

use serde::{Deserialize, Serialize};

use crate::models::{CropType, GrowthStage};
use crate::types::LocalizedName;

/// Stage-specific guidance for a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropAdvisory {
    pub stage: GrowthStage,
    pub fertilizer: String,
    pub pest_alert: String,
    pub irrigation: String,
    pub tips: Vec<String>,
}

/// Reference record for one crop type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropDataset {
    pub crop_type: CropType,
    pub name: LocalizedName,
    /// One entry per growth stage, in stage order
    pub advisories: Vec<CropAdvisory>,
}

impl CropDataset {
    pub fn advisory(&self, stage: GrowthStage) -> Option<&CropAdvisory> {
        self.advisories.iter().find(|a| a.stage == stage)
    }
}
