//! Gemini REST client
//!
//! Implements [`AiAssistant`] over the `generateContent` endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{AssistantCommand, DiagnosticRequest};
use std::time::Duration;

use super::AiAssistant;
use crate::config::AiConfig;
use crate::error::{AppError, AppResult};

/// Reasoning budget granted to the diagnostic model
const DIAGNOSTIC_THINKING_BUDGET: u32 = 32768;

const TRANSCRIPTION_INSTRUCTION: &str = "Transcribe the following agricultural voice note exactly. If it's in a regional language like Hindi or Marathi, translate it to English.";

const SPEECH_PREFIX: &str = "AgriSynch Assistant says: ";

/// Client for the Gemini generative language API
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    config: AiConfig,
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.into(),
            }),
        }
    }
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline payload of the first candidate
    fn inline_data(&self) -> Option<&str> {
        self.first_parts()
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
    }
}

// ============================================================================
// Prompts
// ============================================================================

pub(crate) fn diagnostic_prompt(request: &DiagnosticRequest) -> String {
    format!(
        "Act as a senior PhD Agricultural Pathologist. A farmer needs a detailed diagnosis.
Field Context:
- Crop: {}
- Growth Stage: {}
- Symptoms Reported: {}

Instruction:
1. Identify the most likely disease/pest.
2. Explain the cause (biological or environmental).
3. Provide a 3-step immediate intervention (Organic/Chemical/Mechanical).
4. List 2 long-term soil/management preventions.

Keep language professional yet actionable.",
        request.crop_label(),
        request.stage_label(),
        request.symptoms()
    )
}

pub(crate) fn intent_prompt(utterance: &str) -> String {
    format!(
        "You are the AgriSynch Voice Assistant. Interpret the following user command: \"{}\".

Available views: home, crops, diagnostics, library, settings, add, caseLog.

Respond ONLY with a JSON object in this format:
{{
  \"action\": \"NAVIGATE\" | \"SPEAK\" | \"QUERY\",
  \"target\": \"view_name\",
  \"message\": \"confirmation or answer text\"
}}

If the user wants to see their crops, navigate to 'crops'.
If they want to add a field, navigate to 'add'.
If they want to ask the expert, navigate to 'diagnostics'.
If they ask a general question about crops or soil, use 'SPEAK' and provide a short, helpful answer.",
        utterance
    )
}

/// Parse the model's JSON reply, tolerating a markdown code fence
pub(crate) fn parse_command(raw: &str) -> AppResult<AssistantCommand> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim())
        .map_err(|e| AppError::AiServiceError(format!("Unparseable intent: {}", e)))
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: AiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_endpoint.trim_end_matches('/'),
            model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::AiServiceError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AiServiceError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::AiServiceError(format!("Failed to parse response: {}", e)))
    }

    fn empty_reply(model: &str) -> AppError {
        AppError::AiServiceError(format!("{} returned no content", model))
    }
}

#[axum::async_trait]
impl AiAssistant for GeminiClient {
    async fn diagnose(&self, request: &DiagnosticRequest) -> AppResult<String> {
        let mut parts = Vec::new();
        if let Some(image) = request.image_base64.as_deref().filter(|i| !i.is_empty()) {
            parts.push(Part::inline("image/jpeg", image));
        }
        parts.push(Part::text(diagnostic_prompt(request)));

        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: DIAGNOSTIC_THINKING_BUDGET,
                }),
                ..Default::default()
            }),
        };

        let model = &self.config.diagnostic_model;
        self.generate(model, &body)
            .await?
            .text()
            .ok_or_else(|| Self::empty_reply(model))
    }

    async fn transcribe(&self, audio_base64: &str) -> AppResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline("audio/webm", audio_base64),
                    Part::text(TRANSCRIPTION_INSTRUCTION),
                ],
            }],
            generation_config: None,
        };

        let model = &self.config.transcription_model;
        self.generate(model, &body)
            .await?
            .text()
            .ok_or_else(|| Self::empty_reply(model))
    }

    async fn parse_intent(&self, utterance: &str) -> AppResult<AssistantCommand> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(intent_prompt(utterance))],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                ..Default::default()
            }),
        };

        let model = &self.config.intent_model;
        let reply = self.generate(model, &body).await?.text();
        parse_command(reply.as_deref().unwrap_or("{}"))
    }

    async fn synthesize_speech(&self, text: &str) -> AppResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(format!("{}{}", SPEECH_PREFIX, text))],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: self.config.voice_name.clone(),
                        },
                    },
                }),
                ..Default::default()
            }),
        };

        let model = &self.config.speech_model;
        self.generate(model, &body)
            .await?
            .inline_data()
            .map(str::to_string)
            .ok_or_else(|| Self::empty_reply(model))
    }
}
