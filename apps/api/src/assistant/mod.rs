//! Agronomy assistant — the narrow seam between BerryGuard and the remote model.
//!
//! Handlers and chat sessions only see `Arc<dyn Agronomist>`. The production
//! implementation is `GeminiAgronomist`; tests swap in a scripted double.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;

use crate::llm_client::prompts::INDONESIAN_ONLY;
use crate::llm_client::{Content, GeminiClient, GenerateRequest, GenerationConfig, InlineData, LlmError, Part};
use crate::models::chat::{ChatMessage, ChatRole};
use crate::models::diagnosis::DiagnosisResult;

pub mod chat;
pub mod diagnosis;
pub mod handlers;
pub mod prompts;

pub use chat::ChatSessions;

/// Image formats the diagnosis upload accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Detects the format from the file's magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// A plant photo ready to be sent for diagnosis.
#[derive(Debug, Clone)]
pub struct PlantImage {
    pub format: ImageFormat,
    pub bytes: Bytes,
}

impl PlantImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Capabilities the app needs from an agronomy model.
#[async_trait]
pub trait Agronomist: Send + Sync {
    /// Image in, structured assessment out. Confidence is not yet normalized.
    async fn diagnose(&self, image: &PlantImage) -> Result<DiagnosisResult, LlmError>;

    /// Answers `message` given the prior transcript.
    async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiAgronomist — production implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiAgronomist(pub GeminiClient);

#[async_trait]
impl Agronomist for GeminiAgronomist {
    async fn diagnose(&self, image: &PlantImage) -> Result<DiagnosisResult, LlmError> {
        let data = image.to_base64();
        let prompt = format!("{} {INDONESIAN_ONLY}", prompts::DIAGNOSIS_PROMPT);

        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content::new(
                ChatRole::User.as_str(),
                vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.format.mime_type(),
                            data: &data,
                        },
                    },
                    Part::Text { text: &prompt },
                ],
            )],
            generation_config: Some(GenerationConfig::json(prompts::diagnosis_schema())),
        };

        self.0.call_json(&request).await
    }

    async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, LlmError> {
        let system = format!("{} {INDONESIAN_ONLY}", prompts::CHAT_SYSTEM_INSTRUCTION);

        let request = GenerateRequest {
            system_instruction: Some(Content::text(&system)),
            contents: chat_contents(message, history),
            generation_config: None,
        };

        self.0.call_text(&request).await
    }
}

/// Builds the conversation sent to the model: prior turns then the new message.
/// Model turns before the first user turn (the greeting) are dropped, since
/// Gemini expects a conversation to open with the user.
fn chat_contents<'a>(message: &'a str, history: &'a [ChatMessage]) -> Vec<Content<'a>> {
    history
        .iter()
        .skip_while(|m| m.role == ChatRole::Model)
        .map(|m| Content::new(m.role.as_str(), vec![Part::Text { text: &m.content }]))
        .chain(std::iter::once(Content::new(
            ChatRole::User.as_str(),
            vec![Part::Text { text: message }],
        )))
        .collect()
}
