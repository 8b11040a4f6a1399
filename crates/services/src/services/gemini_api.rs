//! Gemini API client for chat answers and leaf diagnosis.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::config::{Config, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Clone, Error)]
pub enum GeminiApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("json error: {0}")]
    Serde(String),
    #[error("model returned no text")]
    EmptyResponse,
}

impl GeminiApiError {
    /// Returns true if the error is transient and should be retried.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout | Self::RateLimited => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// One piece of user content: text or an inline image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn image(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: base64_data.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub parts: Vec<Part>,
}

impl GenerateRequest {
    pub fn new(system_instruction: Option<String>, parts: Vec<Part>) -> Self {
        Self {
            system_instruction,
            parts,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: &'a [Part],
}

/// Response from generateContent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Anything that can turn a request into model text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GeminiApiError>;
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiApiClient {
    http: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    max_retries: usize,
    min_retry_delay: Duration,
    deadline: Duration,
}

impl GeminiApiClient {
    /// Per-attempt limit.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
    /// Limit on a whole call, retries and backoff included.
    const DEFAULT_DEADLINE: Duration = Duration::from_secs(180);

    /// Client for the configured credential, or `None` when there is none.
    pub fn from_config(config: &Config) -> Result<Option<Self>, GeminiApiError> {
        let Some(api_key) = config.gemini_api_key.clone() else {
            return Ok(None);
        };
        let client = Self::new(api_key, Some(config.gemini_model.clone()))?
            .with_base_url(config.gemini_base_url.clone());
        Ok(Some(client))
    }

    /// Create a new client with the given API key
    pub fn new(api_key: SecretString, model: Option<String>) -> Result<Self, GeminiApiError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("flora-lenz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeminiApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            max_retries: 3,
            min_retry_delay: Duration::from_secs(1),
            deadline: Self::DEFAULT_DEADLINE,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_min_retry_delay(mut self, delay: Duration) -> Self {
        self.min_retry_delay = delay;
        self
    }

    /// Caps the total time `complete` may spend, retries included.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send a generateContent request, retrying transient failures until the deadline.
    pub async fn complete(
        &self,
        request: &GenerateRequest,
    ) -> Result<GeminiResponse, GeminiApiError> {
        let body = GeminiRequest {
            system_instruction: request.system_instruction.as_ref().map(|s| SystemInstruction {
                parts: vec![Part::text(s.clone())],
            }),
            contents: vec![Content {
                role: "user",
                parts: &request.parts,
            }],
        };

        let attempts = (|| async { self.send_request(&body).await })
            .retry(
                &ExponentialBuilder::default()
                    .with_min_delay(self.min_retry_delay)
                    .with_max_delay(Duration::from_secs(30))
                    .with_max_times(self.max_retries)
                    .with_jitter(),
            )
            .when(|e: &GeminiApiError| e.should_retry())
            .notify(|e, dur| {
                warn!(
                    "Gemini API call failed, retrying after {:.2}s: {}",
                    dur.as_secs_f64(),
                    e
                )
            });

        match tokio::time::timeout(self.deadline, attempts).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    deadline_secs = self.deadline.as_secs_f64(),
                    "Gemini API call gave up at its deadline"
                );
                Err(GeminiApiError::Timeout)
            }
        }
    }

    async fn send_request(
        &self,
        body: &GeminiRequest<'_>,
    ) -> Result<GeminiResponse, GeminiApiError> {
        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => res
                .json::<GeminiResponse>()
                .await
                .map_err(|e| GeminiApiError::Serde(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GeminiApiError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(GeminiApiError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GeminiApiError::Http { status, body })
            }
        }
    }

    /// Simple helper to send a single prompt and get the text back
    pub async fn ask(
        &self,
        prompt: &str,
        system: Option<String>,
    ) -> Result<String, GeminiApiError> {
        self.generate(GenerateRequest::new(system, vec![Part::text(prompt)]))
            .await
    }
}

#[async_trait]
impl GenerativeModel for GeminiApiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GeminiApiError> {
        self.complete(&request)
            .await?
            .text()
            .ok_or(GeminiApiError::EmptyResponse)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GeminiApiError {
    if e.is_timeout() {
        GeminiApiError::Timeout
    } else {
        GeminiApiError::Transport(e.to_string())
    }
}
