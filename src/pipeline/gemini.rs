use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::types::ReasoningClient;
use super::PipelineError;

/// Preferred Gemini models in order of preference.
const GEMINI_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"];

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini REST client for multimodal generation.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default model with a 60-second timeout.
    pub fn with_default_model(api_key: &str) -> Self {
        Self::new(api_key, GEMINI_MODELS[0], 60)
    }
}

// Wire shapes for the v1beta generateContent API.

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Part<'a> {
    Text(&'a str),
    InlineData { mime_type: &'a str, data: String },
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl ReasoningClient for GeminiClient {
    fn generate(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, PipelineError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(prompt),
                    Part::InlineData {
                        mime_type,
                        data: base64::engine::general_purpose::STANDARD.encode(image),
                    },
                ],
            }],
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                PipelineError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                PipelineError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                PipelineError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PipelineError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| PipelineError::ResponseParsing(e.to_string()))?;

        let reply: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if reply.trim().is_empty() {
            return Err(PipelineError::MalformedResponse(
                "reply contained no text candidates".into(),
            ));
        }

        Ok(reply)
    }
}

/// Mock reasoning client for testing — returns queued responses and counts
/// outbound calls so tests can assert the missing-credential guard makes none.
pub struct MockReasoningClient {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, String>>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockReasoningClient {
    pub fn new(response: &str) -> Self {
        Self::with_responses(vec![Ok(response.to_string())])
    }

    /// Queue one result per expected call; Err values become transport errors.
    /// The last queued result repeats once the queue drains.
    pub fn with_responses(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into_iter().collect()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self::with_responses(vec![Err(error.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl ReasoningClient for MockReasoningClient {
    fn generate(
        &self,
        _prompt: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, PipelineError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let mut queue = self.responses.lock().unwrap();
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(detail)) => Err(PipelineError::HttpClient(detail)),
            None => Err(PipelineError::HttpClient("no queued response".into())),
        }
    }
}
