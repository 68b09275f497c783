//! Field diagnostics and voice assistant models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::GrowthStage;
use crate::types::RecordId;

/// Crop name sent when the farmer has not registered any field yet
pub const GENERAL_CROP_NAME: &str = "General Crop";

/// Description sent when the farmer only attached a photo
pub const DEFAULT_SYMPTOM_DESCRIPTION: &str = "Visual inspection requested.";

/// Nickname stored on cases not tied to a registered field
pub const UNTARGETED_CASE_NICKNAME: &str = "Field Query";

/// Case log timestamps are display strings, e.g. "18/10/2026, 09:00:00"
pub const CASE_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A symptom report to be diagnosed remotely
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiagnosticRequest {
    /// Empty when the farmer has no field selected
    #[serde(default)]
    #[validate(length(max = 80))]
    pub crop_name: String,
    /// `None` when no field was selected
    pub stage: Option<GrowthStage>,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    /// Base64 encoded JPEG
    pub image_base64: Option<String>,
}

impl DiagnosticRequest {
    /// Crop name for the prompt, generic when no field was chosen
    pub fn crop_label(&self) -> &str {
        let trimmed = self.crop_name.trim();
        if trimmed.is_empty() {
            GENERAL_CROP_NAME
        } else {
            trimmed
        }
    }

    /// Stage label as the pathologist prompt expects it
    pub fn stage_label(&self) -> &str {
        self.stage.as_ref().map(|s| s.as_str()).unwrap_or("Unknown")
    }

    /// Symptom text, falling back to a photo-only request
    pub fn symptoms(&self) -> &str {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            DEFAULT_SYMPTOM_DESCRIPTION
        } else {
            trimmed
        }
    }

    /// A request needs either text or a photo
    pub fn has_content(&self) -> bool {
        !self.description.trim().is_empty()
            || self.image_base64.as_deref().is_some_and(|i| !i.is_empty())
    }
}

/// A completed diagnosis kept in the farmer's case log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticCase {
    pub id: RecordId,
    /// Display string, never parsed back
    pub timestamp: String,
    pub crop_nickname: String,
    #[serde(default)]
    pub description: String,
    pub diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl DiagnosticCase {
    /// New case stamped at `now`. A blank nickname files it as a field query.
    pub fn new(
        crop_nickname: &str,
        description: &str,
        diagnosis: &str,
        image_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let nickname = crop_nickname.trim();
        Self {
            id: RecordId::generate(),
            timestamp: now.format(CASE_TIMESTAMP_FORMAT).to_string(),
            crop_nickname: if nickname.is_empty() {
                UNTARGETED_CASE_NICKNAME.to_string()
            } else {
                nickname.to_string()
            },
            description: description.to_string(),
            diagnosis: diagnosis.to_string(),
            image_url: image_url.filter(|u| !u.is_empty()),
        }
    }
}

/// Screens the voice assistant can navigate to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AppView {
    Home,
    Crops,
    Diagnostics,
    Library,
    Settings,
    Add,
    CaseLog,
}

/// What the assistant decided to do with an utterance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssistantAction {
    Navigate,
    Speak,
    Query,
}

/// Structured interpretation of a voice command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantCommand {
    pub action: AssistantAction,
    #[serde(default)]
    pub target: Option<AppView>,
    #[serde(default)]
    pub message: String,
}
