//! Plant-care assistant: chat answers and leaf diagnosis.
//!
//! With a Gemini credential every question goes to the hosted model. Without
//! one, answers come from a small keyword rule table. Model failures never
//! reach the caller: they become a fixed apology and are reported to the
//! [`AssistantObserver`].

use std::{fmt, sync::Arc};

use base64::{Engine, engine::general_purpose::STANDARD};
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, warn};

use super::{
    config::{Config, Latency},
    gemini_api::{GeminiApiClient, GeminiApiError, GenerateRequest, GenerativeModel, Part},
};

pub const CHAT_SYSTEM_INSTRUCTION: &str = "\
You are Flora, a friendly plant care assistant 🌱.

You primarily help with plant and plant-care related questions.

You MAY answer friendly or conversational questions such as:
- \"What is your name?\"
- \"How are you?\"
- \"Who are you?\"

For questions that are not about plants:
- Give a polite, friendly reply 😊
- Gently redirect the user back to plant-related topics 🌿

Occasionally remind the user that you specialize in plants 🌱.

Always keep answers short (2-3 sentences max).
Use 1-2 relevant emojis naturally in every reply.
Be warm, simple, and professional.
";

pub const IDENTIFY_PROMPT: &str = "\
You are an expert plant pathologist.
Analyze the uploaded image of a plant leaf and identify if the plant has any disease.
Respond briefly and factually using this format:

Plant: [plant name or \"Unknown\"]
Disease: [disease name or \"Healthy\"]
Reason: [short reason or symptoms found]
Treatment: [short actionable suggestion or \"None required\"]
";

pub const GENERIC_REPLY: &str =
    "I can help with plant care! Ask me about watering, lighting, pests, or leaf issues.";
pub const CHAT_FAILURE_REPLY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again.";
pub const IMAGE_FAILURE_REPLY: &str = "Sorry, I could not analyze the plant image right now.";
pub const EMPTY_IMAGE_REPLY: &str = "No response from AI.";
pub const IMAGE_UNAVAILABLE_REPLY: &str =
    "Image diagnosis needs a Gemini API key. Describe the symptoms in chat and I'll help 🌿";
pub const OFF_TOPIC_REPLY: &str =
    "I'm Flora 🌱 and I only know about plants. Ask me about watering, light, soil, or leaf problems!";

struct CannedRule {
    all: &'static [&'static str],
    any: &'static [&'static str],
    reply: &'static str,
}

impl CannedRule {
    fn matches(&self, lower: &str) -> bool {
        self.all.iter().all(|k| lower.contains(k))
            && (self.any.is_empty() || self.any.iter().any(|k| lower.contains(k)))
    }
}

// First match wins.
const CANNED_RULES: &[CannedRule] = &[
    CannedRule {
        all: &["yellow", "leave"],
        any: &[],
        reply: "Yellow leaves commonly indicate overwatering. Let top soil dry before watering.",
    },
    CannedRule {
        all: &["brown"],
        any: &["leave", "tip"],
        reply: "Brown tips often mean dry air or inconsistent watering. Increase humidity.",
    },
    CannedRule {
        all: &["how often", "water"],
        any: &[],
        reply: "Water most plants when top 2 inches of soil dry. Succulents need less frequent watering.",
    },
    CannedRule {
        all: &[],
        any: &["light", "sun"],
        reply: "Most houseplants thrive in bright indirect sunlight.",
    },
];

const PLANT_KEYWORDS: &[&str] = &[
    "plant", "leaf", "leave", "water", "soil", "light", "sun", "grow", "pot", "flower", "fertili",
    "pest", "root", "garden", "prune", "seed", "succulent", "cactus", "fern", "bloom", "humid",
    "stem", "bug", "mold", "tree",
];

/// Answer for `message` when no model is configured.
pub fn canned_response(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    CANNED_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map_or(GENERIC_REPLY, |rule| rule.reply)
}

/// Whether `message` mentions anything plant related.
pub fn is_plant_related(message: &str) -> bool {
    let lower = message.to_lowercase();
    PLANT_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InlineImageError {
    #[error("no image data")]
    Empty,
    #[error("unsupported data url: {0}")]
    UnsupportedDataUrl(String),
    #[error("image payload is not valid base64")]
    InvalidBase64,
}

/// Image bytes as base64, ready to inline in a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub const DEFAULT_MIME: &'static str = "image/jpeg";

    /// Accepts `data:image/<type>;base64,<payload>` or bare base64 (treated as JPEG).
    pub fn from_data_url(raw: &str) -> Result<Self, InlineImageError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(InlineImageError::Empty);
        }

        let (mime_type, data) = match raw.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest
                    .split_once(',')
                    .ok_or_else(|| InlineImageError::UnsupportedDataUrl(truncate(raw)))?;
                let mime = header
                    .strip_suffix(";base64")
                    .filter(|m| m.starts_with("image/"))
                    .ok_or_else(|| InlineImageError::UnsupportedDataUrl(header.to_string()))?;
                (mime.to_string(), data)
            }
            None => (Self::DEFAULT_MIME.to_string(), raw),
        };

        if data.is_empty() {
            return Err(InlineImageError::Empty);
        }
        STANDARD
            .decode(data)
            .map_err(|_| InlineImageError::InvalidBase64)?;

        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

fn truncate(raw: &str) -> String {
    raw.chars().take(40).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantInput {
    Text(String),
    Image(InlineImage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum InputKind {
    Text,
    Image,
}

impl AssistantInput {
    pub fn kind(&self) -> InputKind {
        match self {
            AssistantInput::Text(_) => InputKind::Text,
            AssistantInput::Image(_) => InputKind::Image,
        }
    }
}

/// Receives the events the assistant otherwise swallows.
pub trait AssistantObserver: Send + Sync {
    fn model_failed(&self, kind: InputKind, error: &GeminiApiError);

    fn canned_answer(&self, _kind: InputKind) {}

    fn off_topic(&self, _message: &str) {}
}

/// Default observer: writes events to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AssistantObserver for TracingObserver {
    fn model_failed(&self, kind: InputKind, error: &GeminiApiError) {
        warn!(input = %kind, error = %error, "Assistant model call failed, returning fallback");
    }

    fn canned_answer(&self, kind: InputKind) {
        debug!(input = %kind, "Assistant answered from canned rules");
    }

    fn off_topic(&self, message: &str) {
        debug!(chars = message.chars().count(), "Assistant refused off-topic question");
    }
}

#[derive(Clone)]
pub struct Assistant {
    model: Option<Arc<dyn GenerativeModel>>,
    observer: Arc<dyn AssistantObserver>,
    canned_latency: Latency,
    topic_guard: bool,
}

impl fmt::Debug for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assistant")
            .field("live", &self.is_live())
            .field("canned_latency", &self.canned_latency)
            .field("topic_guard", &self.topic_guard)
            .finish()
    }
}

impl Assistant {
    /// Live when the config carries a key, canned otherwise.
    pub fn from_config(config: &Config) -> Result<Self, GeminiApiError> {
        let assistant = match GeminiApiClient::from_config(config)? {
            Some(client) => Self::with_model(Arc::new(client)),
            None => {
                warn!("Gemini API key not found. Using canned responses for chat.");
                Self::canned(config.canned_latency)
            }
        };
        Ok(assistant.with_topic_guard(config.topic_guard))
    }

    pub fn canned(canned_latency: Latency) -> Self {
        Self {
            model: None,
            observer: Arc::new(TracingObserver),
            canned_latency,
            topic_guard: false,
        }
    }

    pub fn with_model(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model: Some(model),
            observer: Arc::new(TracingObserver),
            canned_latency: Latency::None,
            topic_guard: false,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn AssistantObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Refuse text with no plant keyword before calling the model.
    pub fn with_topic_guard(mut self, enabled: bool) -> Self {
        self.topic_guard = enabled;
        self
    }

    pub fn is_live(&self) -> bool {
        self.model.is_some()
    }

    pub async fn chat(&self, message: &str) -> String {
        self.get_response(AssistantInput::Text(message.to_string())).await
    }

    pub async fn diagnose(&self, image: InlineImage) -> String {
        self.get_response(AssistantInput::Image(image)).await
    }

    /// Always resolves to text; failures become a fixed apology.
    pub async fn get_response(&self, input: AssistantInput) -> String {
        let kind = input.kind();

        let Some(model) = &self.model else {
            self.canned_latency.wait().await;
            self.observer.canned_answer(kind);
            return match &input {
                AssistantInput::Text(message) => canned_response(message).to_string(),
                AssistantInput::Image(_) => IMAGE_UNAVAILABLE_REPLY.to_string(),
            };
        };

        let request = match input {
            AssistantInput::Text(message) => {
                if self.topic_guard && !is_plant_related(&message) {
                    self.observer.off_topic(&message);
                    return OFF_TOPIC_REPLY.to_string();
                }
                GenerateRequest::new(
                    Some(CHAT_SYSTEM_INSTRUCTION.to_string()),
                    vec![Part::text(message)],
                )
            }
            AssistantInput::Image(image) => GenerateRequest::new(
                None,
                vec![
                    Part::text(IDENTIFY_PROMPT),
                    Part::image(image.mime_type, image.data),
                ],
            ),
        };

        match model.generate(request).await {
            Ok(text) => text,
            Err(GeminiApiError::EmptyResponse) if kind == InputKind::Image => {
                EMPTY_IMAGE_REPLY.to_string()
            }
            Err(e) => {
                self.observer.model_failed(kind, &e);
                match kind {
                    InputKind::Text => CHAT_FAILURE_REPLY.to_string(),
                    InputKind::Image => IMAGE_FAILURE_REPLY.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Scripted model that records what it was asked.
    struct FakeModel {
        reply: Result<String, GeminiApiError>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl FakeModel {
        fn new(reply: Result<String, GeminiApiError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerativeModel for FakeModel {
        async fn generate(&self, request: GenerateRequest) -> Result<String, GeminiApiError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        failures: Mutex<Vec<(InputKind, String)>>,
    }

    impl AssistantObserver for RecordingObserver {
        fn model_failed(&self, kind: InputKind, error: &GeminiApiError) {
            self.failures.lock().unwrap().push((kind, error.to_string()));
        }
    }

    #[test]
    fn yellow_leaves_means_overwatering() {
        assert_eq!(
            canned_response("Why are my Monstera's YELLOW LEAVES drooping?"),
            "Yellow leaves commonly indicate overwatering. Let top soil dry before watering."
        );
    }

    #[test]
    fn canned_rules_in_order() {
        assert!(canned_response("brown tips on my fern").starts_with("Brown tips"));
        assert!(canned_response("How often should I water a cactus?").starts_with("Water most"));
        assert!(canned_response("is direct sun ok").starts_with("Most houseplants"));
        // rule 1 wins over the light rule
        assert!(canned_response("yellow leaves in low light").starts_with("Yellow leaves"));
    }

    #[test]
    fn unmatched_input_gets_generic_reply() {
        assert_eq!(canned_response("hello there"), GENERIC_REPLY);
        assert_eq!(canned_response("yellow"), GENERIC_REPLY);
    }

    #[test]
    fn data_url_is_split_into_mime_and_payload() {
        let image = InlineImage::from_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "aGVsbG8=");

        let bare = InlineImage::from_data_url("aGVsbG8=").unwrap();
        assert_eq!(bare.mime_type, InlineImage::DEFAULT_MIME);
    }

    #[test]
    fn bad_images_are_rejected() {
        assert_eq!(InlineImage::from_data_url("  "), Err(InlineImageError::Empty));
        assert_eq!(
            InlineImage::from_data_url("data:image/jpeg;base64,"),
            Err(InlineImageError::Empty)
        );
        assert_eq!(
            InlineImage::from_data_url("not base64!!"),
            Err(InlineImageError::InvalidBase64)
        );
        assert!(matches!(
            InlineImage::from_data_url("data:text/plain;base64,aGk="),
            Err(InlineImageError::UnsupportedDataUrl(_))
        ));
    }

    #[test]
    fn from_bytes_round_trips_through_data_url() {
        let image = InlineImage::from_bytes("image/jpeg", b"\xff\xd8\xff");
        let url = format!("data:{};base64,{}", image.mime_type, image.data);
        assert_eq!(InlineImage::from_data_url(&url).unwrap(), image);
    }

    #[tokio::test]
    async fn canned_mode_uses_rules() {
        let assistant = Assistant::canned(Latency::None);
        assert!(!assistant.is_live());
        assert!(assistant.chat("yellow leaves").await.starts_with("Yellow leaves"));
        assert_eq!(assistant.chat("tell me a joke").await, GENERIC_REPLY);
        let image = InlineImage::from_bytes("image/jpeg", b"img");
        assert_eq!(assistant.diagnose(image).await, IMAGE_UNAVAILABLE_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn canned_mode_waits_before_answering() {
        let assistant = Assistant::canned(Latency::from_millis(500));
        let started = tokio::time::Instant::now();
        assistant.chat("sun").await;
        assert!(started.elapsed() >= std::time::Duration::from_millis(500));
    }

    #[tokio::test]
    async fn live_chat_sends_persona_and_returns_text_verbatim() {
        let model = FakeModel::new(Ok("Bright, indirect light 🌿".to_string()));
        let assistant = Assistant::with_model(model.clone());

        let answer = assistant.chat("Where should my pothos go?").await;

        assert_eq!(answer, "Bright, indirect light 🌿");
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0].system_instruction.as_deref(), Some(CHAT_SYSTEM_INSTRUCTION));
        assert_eq!(seen[0].parts, vec![Part::text("Where should my pothos go?")]);
    }

    #[tokio::test]
    async fn live_diagnosis_sends_prompt_and_inline_image() {
        let model = FakeModel::new(Ok("Plant: Pothos\nDisease: Healthy".to_string()));
        let assistant = Assistant::with_model(model.clone());

        let image = InlineImage::from_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assistant.diagnose(image).await;

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0].system_instruction, None);
        assert_eq!(
            seen[0].parts,
            vec![Part::text(IDENTIFY_PROMPT), Part::image("image/jpeg", "aGVsbG8=")]
        );
    }

    #[tokio::test]
    async fn failures_are_swallowed_but_observed() {
        let observer = Arc::new(RecordingObserver::default());
        let assistant = Assistant::with_model(FakeModel::new(Err(GeminiApiError::Timeout)))
            .with_observer(observer.clone());

        assert_eq!(assistant.chat("water?").await, CHAT_FAILURE_REPLY);
        let image = InlineImage::from_bytes("image/jpeg", b"img");
        assert_eq!(assistant.diagnose(image).await, IMAGE_FAILURE_REPLY);

        let failures = observer.failures.lock().unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0], (InputKind::Text, "timeout".to_string()));
        assert_eq!(failures[1].0, InputKind::Image);
    }

    #[tokio::test]
    async fn empty_image_answer_has_its_own_reply() {
        let assistant =
            Assistant::with_model(FakeModel::new(Err(GeminiApiError::EmptyResponse)));
        let image = InlineImage::from_bytes("image/jpeg", b"img");
        assert_eq!(assistant.diagnose(image).await, EMPTY_IMAGE_REPLY);
    }

    #[tokio::test]
    async fn topic_guard_skips_the_model() {
        let model = FakeModel::new(Ok("should not be used".to_string()));
        let assistant = Assistant::with_model(model.clone()).with_topic_guard(true);

        assert_eq!(assistant.chat("Who won the match last night?").await, OFF_TOPIC_REPLY);
        assert!(model.seen.lock().unwrap().is_empty());

        assert_eq!(assistant.chat("My fern is drooping").await, "should not be used");
    }

    #[test]
    fn config_without_key_builds_canned_assistant() {
        let assistant = Assistant::from_config(&Config::instant()).unwrap();
        assert!(!assistant.is_live());
    }

    #[test]
    fn config_with_key_builds_live_assistant() {
        let config = Config {
            gemini_api_key: Some(secrecy::SecretString::from("k".to_string())),
            ..Config::instant()
        };
        assert!(Assistant::from_config(&config).unwrap().is_live());
    }
}
