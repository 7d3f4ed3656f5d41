//! Gemini HTTP client backing both generative services

use crate::delivery::ai::{BouquetImageGenerator, GeneratedImage, MessageEnhancer};
use crate::delivery::prompt::enhance_prompt;
use crate::io::configuration::MAX_MESSAGE_CHARS;
use crate::io::error::{Result, service_error};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model used to rewrite greetings
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Model used to generate bouquet images
pub const IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const SERVICE: &str = "gemini";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GenerateResponse {
    fn first_parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .map(|candidate| candidate.content.parts.as_slice())
            .unwrap_or_default()
    }

    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    fn image(&self) -> Option<(&str, &str)> {
        self.first_parts().iter().find_map(|part| {
            let inline = part.inline_data.as_ref()?;
            let data = inline.data.as_deref().filter(|data| !data.is_empty())?;
            Some((inline.mime_type.as_deref().unwrap_or("image/png"), data))
        })
    }
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client authenticating with `api_key`
    ///
    /// # Errors
    ///
    /// Returns an external service error if the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| service_error(SERVICE, &e))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Point the client at another API base, e.g. a local mock
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<GenerateResponse> {
        let url = format!("{}/{model}:generateContent", self.base_url);
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, &e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| service_error(SERVICE, &e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            warn!(%status, model, "Gemini request failed");
            return Err(service_error(SERVICE, &format!("status {status}: {message}")));
        }

        debug!(model, bytes = text.len(), "Gemini request succeeded");
        serde_json::from_str(&text).map_err(|e| service_error(SERVICE, &e))
    }
}

#[async_trait]
impl MessageEnhancer for GeminiClient {
    async fn enhance(&self, message: &str) -> Result<String> {
        let prompt = enhance_prompt(message, MAX_MESSAGE_CHARS);
        let response = self.generate_content(TEXT_MODEL, &prompt, None).await?;
        response
            .text()
            .ok_or_else(|| service_error(SERVICE, &"response contained no text"))
    }
}

#[async_trait]
impl BouquetImageGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let config = GenerationConfig {
            response_modalities: vec!["TEXT", "IMAGE"],
        };
        let response = self
            .generate_content(IMAGE_MODEL, prompt, Some(config))
            .await?;
        let (mime, data) = response
            .image()
            .ok_or_else(|| service_error(SERVICE, &"No image was generated"))?;
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| service_error(SERVICE, &e))?;
        Ok(GeneratedImage {
            mime: mime.to_string(),
            bytes,
        })
    }
}
