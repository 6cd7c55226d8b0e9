use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{build_prompt, extract_reasoning, parse_intent};
use super::{ClassifyError, IntentClassifier, IntentSignal};
use crate::scoring::domain::{LeadProfile, Offer};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` REST client.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the client at a different base URL, e.g. a local proxy in
    /// development.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiRequest {
    fn for_prompt(prompt: String) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        }
    }
}

#[async_trait]
impl IntentClassifier for GeminiClient {
    async fn classify(
        &self,
        offer: &Offer,
        profile: &LeadProfile,
    ) -> Result<IntentSignal, ClassifyError> {
        let request = GeminiRequest::for_prompt(build_prompt(offer, profile));

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.api_base, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| ClassifyError::Http(err.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&error_text)
                .map(|err| err.error.message)
                .unwrap_or(error_text);
            return Err(ClassifyError::Api { status, message });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|err| ClassifyError::MalformedResponse(err.to_string()))?;

        let answer = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ClassifyError::MalformedResponse("no candidates".to_string()))?
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        let intent = parse_intent(&answer)
            .ok_or_else(|| ClassifyError::UnrecognizedIntent(answer.trim().to_string()))?;

        Ok(IntentSignal {
            intent,
            reasoning: extract_reasoning(&answer),
        })
    }
}
