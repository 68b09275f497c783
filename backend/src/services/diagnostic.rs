//! Diagnostic and voice assistant service
//!
//! Wraps the remote assistant with a timeout and converts every remote
//! failure into the user-facing fallback value. Only malformed requests are
//! reported as errors.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use shared::{AssistantAction, AssistantCommand, DiagnosticRequest};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use crate::config::AiConfig;
use crate::error::{AppError, AppResult};
use crate::external::{AiAssistant, GeminiClient};

/// Shown when the remote diagnosis fails
pub const DIAGNOSIS_FALLBACK: &str =
    "The Diagnostic Engine encountered an error. Please ensure your device is synchronized and try again.";

/// Spoken when a command cannot be interpreted
pub const INTENT_FALLBACK: &str = "I'm sorry, I couldn't process that command.";

/// Outcome of a diagnosis request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosisOutcome {
    pub diagnosis: String,
    /// True when `diagnosis` is the fallback message
    pub degraded: bool,
}

#[derive(Clone)]
pub struct DiagnosticService {
    assistant: Option<Arc<dyn AiAssistant>>,
    timeout: Duration,
}

/// Strip a `data:<mime>;base64,` prefix and check the payload decodes
fn normalize_base64(field: &str, raw: &str) -> AppResult<String> {
    let payload = match raw.split_once(',') {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => raw,
    }
    .trim();

    if payload.is_empty() || STANDARD.decode(payload).is_err() {
        return Err(AppError::Validation {
            field: field.to_string(),
            message: "Payload must be base64 encoded".to_string(),
            message_hi: "डेटा base64 में होना चाहिए".to_string(),
        });
    }
    Ok(payload.to_string())
}

pub fn intent_fallback() -> AssistantCommand {
    AssistantCommand {
        action: AssistantAction::Speak,
        target: None,
        message: INTENT_FALLBACK.to_string(),
    }
}

impl DiagnosticService {
    pub fn new(assistant: Option<Arc<dyn AiAssistant>>, timeout: Duration) -> Self {
        Self { assistant, timeout }
    }

    /// Build from configuration. An empty API key disables the assistant.
    pub fn from_config(config: &AiConfig) -> AppResult<Self> {
        let assistant: Option<Arc<dyn AiAssistant>> = if config.is_enabled() {
            Some(Arc::new(GeminiClient::new(config.clone())?))
        } else {
            tracing::info!("AI API key not set, assistant calls will return fallbacks");
            None
        };
        Ok(Self::new(assistant, Duration::from_secs(config.timeout_secs)))
    }

    pub fn is_enabled(&self) -> bool {
        self.assistant.is_some()
    }

    /// Run a remote call under the timeout, logging and swallowing failures
    async fn call<'a, T, F, Fut>(&'a self, operation: &str, f: F) -> Option<T>
    where
        F: FnOnce(&'a dyn AiAssistant) -> Fut,
        Fut: Future<Output = AppResult<T>> + 'a,
    {
        let assistant = self.assistant.as_deref()?;
        match tokio::time::timeout(self.timeout, f(assistant)).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::error!("AI {} failed: {}", operation, e);
                None
            }
            Err(_) => {
                tracing::error!("AI {} timed out after {:?}", operation, self.timeout);
                None
            }
        }
    }

    /// Diagnose a symptom report
    pub async fn diagnose(&self, mut request: DiagnosticRequest) -> AppResult<DiagnosisOutcome> {
        request.validate()?;
        if !request.has_content() {
            return Err(AppError::Validation {
                field: "description".to_string(),
                message: "Describe the symptoms or attach a photo".to_string(),
                message_hi: "लक्षण लिखें या फोटो जोड़ें".to_string(),
            });
        }
        request.image_base64 = match request.image_base64.as_deref() {
            Some(image) if !image.is_empty() => Some(normalize_base64("image_base64", image)?),
            _ => None,
        };

        let diagnosis = self
            .call("diagnosis", |ai| async move { ai.diagnose(&request).await })
            .await;

        Ok(match diagnosis {
            Some(diagnosis) => DiagnosisOutcome {
                diagnosis,
                degraded: false,
            },
            None => DiagnosisOutcome {
                diagnosis: DIAGNOSIS_FALLBACK.to_string(),
                degraded: true,
            },
        })
    }

    /// Transcribe a voice note; `None` when transcription is unavailable
    pub async fn transcribe(&self, audio_base64: &str) -> AppResult<Option<String>> {
        let audio = normalize_base64("audio_base64", audio_base64)?;
        Ok(self
            .call("transcription", |ai| async move { ai.transcribe(&audio).await })
            .await)
    }

    /// Interpret a spoken command
    pub async fn parse_intent(&self, utterance: &str) -> AppResult<AssistantCommand> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(AppError::ValidationError("Command text is empty".to_string()));
        }
        Ok(self
            .call("intent parsing", |ai| async move { ai.parse_intent(utterance).await })
            .await
            .unwrap_or_else(intent_fallback))
    }

    /// Speak a text; `None` when synthesis is unavailable
    pub async fn synthesize_speech(&self, text: &str) -> AppResult<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError("Speech text is empty".to_string()));
        }
        Ok(self
            .call("speech synthesis", |ai| async move { ai.synthesize_speech(text).await })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AppView, GrowthStage};

    /// Scripted assistant: echoes input, fails, or hangs
    #[derive(Clone, Copy)]
    enum Mock {
        Echo,
        Fail,
        Hang,
    }

    impl Mock {
        async fn run<T>(self, value: T) -> AppResult<T> {
            match self {
                Mock::Echo => Ok(value),
                Mock::Fail => Err(AppError::AiServiceError("503".to_string())),
                Mock::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(value)
                }
            }
        }
    }

    #[axum::async_trait]
    impl AiAssistant for Mock {
        async fn diagnose(&self, request: &DiagnosticRequest) -> AppResult<String> {
            let image = if request.image_base64.is_some() { " +photo" } else { "" };
            self.run(format!("{} at {}{}", request.crop_label(), request.stage_label(), image))
                .await
        }

        async fn transcribe(&self, audio_base64: &str) -> AppResult<String> {
            self.run(format!("{} bytes", STANDARD.decode(audio_base64).map(|b| b.len()).unwrap_or(0)))
                .await
        }

        async fn parse_intent(&self, _utterance: &str) -> AppResult<AssistantCommand> {
            self.run(AssistantCommand {
                action: AssistantAction::Navigate,
                target: Some(AppView::Crops),
                message: "Opening your crops".to_string(),
            })
            .await
        }

        async fn synthesize_speech(&self, text: &str) -> AppResult<String> {
            self.run(STANDARD.encode(text)).await
        }
    }

    fn service(mock: Mock) -> DiagnosticService {
        DiagnosticService::new(Some(Arc::new(mock)), Duration::from_millis(50))
    }

    fn request(description: &str, image: Option<&str>) -> DiagnosticRequest {
        DiagnosticRequest {
            crop_name: "rice".to_string(),
            stage: Some(GrowthStage::Vegetative),
            description: description.to_string(),
            image_base64: image.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_diagnose_success() {
        let outcome = service(Mock::Echo)
            .diagnose(request("brown spots", None))
            .await
            .unwrap();
        assert_eq!(outcome.diagnosis, "rice at vegetative");
        assert!(!outcome.degraded);
    }

    #[tokio::test]
    async fn test_diagnose_strips_data_url() {
        let outcome = service(Mock::Echo)
            .diagnose(request("", Some("data:image/jpeg;base64,/9j/4AAQ")))
            .await
            .unwrap();
        assert_eq!(outcome.diagnosis, "rice at vegetative +photo");
    }

    #[tokio::test]
    async fn test_diagnose_failure_and_timeout_fall_back() {
        for mock in [Mock::Fail, Mock::Hang] {
            let outcome = service(mock)
                .diagnose(request("wilting", None))
                .await
                .unwrap();
            assert_eq!(outcome.diagnosis, DIAGNOSIS_FALLBACK);
            assert!(outcome.degraded);
        }
    }

    #[tokio::test]
    async fn test_disabled_assistant_falls_back() {
        let service = DiagnosticService::new(None, Duration::from_secs(1));
        assert!(!service.is_enabled());
        let outcome = service.diagnose(request("wilting", None)).await.unwrap();
        assert!(outcome.degraded);
        assert_eq!(service.parse_intent("open crops").await.unwrap(), intent_fallback());
        assert_eq!(service.synthesize_speech("hello").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_or_malformed_requests_are_rejected() {
        let service = service(Mock::Echo);
        assert!(matches!(
            service.diagnose(request("  ", None)).await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            service.diagnose(request("", Some("not base64!"))).await,
            Err(AppError::Validation { .. })
        ));
        assert!(service.transcribe("").await.is_err());
        assert!(service.parse_intent("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_voice_round() {
        let service = service(Mock::Echo);
        assert_eq!(
            service.transcribe("data:audio/webm;base64,AAAA").await.unwrap(),
            Some("3 bytes".to_string())
        );
        let command = service.parse_intent("show my crops").await.unwrap();
        assert_eq!(command.target, Some(AppView::Crops));
        assert!(service.synthesize_speech("Rain tomorrow").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_intent_failure_speaks_apology() {
        let command = service(Mock::Fail).parse_intent("fly me to the moon").await.unwrap();
        assert_eq!(command.action, AssistantAction::Speak);
        assert_eq!(command.message, INTENT_FALLBACK);
        assert_eq!(command.target, None);
    }
}
