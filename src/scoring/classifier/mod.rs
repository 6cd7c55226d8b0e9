//! Intent classifier gateway.
//!
//! Isolates the remote AI call behind a narrow trait returning a structured
//! outcome, so the rest of the engine never inspects raw response text. All
//! non-determinism and failure modes of the remote service live here.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use std::time::Duration;

use super::domain::{IntentLabel, LeadProfile, Offer};

/// Structured classifier verdict: one of High/Medium/Low plus the model's
/// free-text justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentSignal {
    pub intent: IntentLabel,
    pub reasoning: String,
}

/// Failure modes of a classification attempt. None of these abort a batch;
/// the session converts them to an Unknown outcome for the affected lead.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("answer contained no intent keyword: {0}")]
    UnrecognizedIntent(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Gateway to a remote text classifier judging a lead's buying intent
/// against the active offer.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(
        &self,
        offer: &Offer,
        profile: &LeadProfile,
    ) -> Result<IntentSignal, ClassifyError>;
}

/// Natural-language prompt embedding the offer context and the lead's
/// profile fields, asking for a High/Medium/Low verdict with a short
/// justification.
pub(crate) fn build_prompt(offer: &Offer, profile: &LeadProfile) -> String {
    format!(
        "You are a B2B sales qualification expert. Analyze this lead against \
         the product offer and classify their buying intent.\n\
         \n\
         PRODUCT/OFFER:\n\
         Name: {}\n\
         Value Propositions: {}\n\
         Ideal Use Cases: {}\n\
         \n\
         LEAD PROFILE:\n\
         Name: {}\n\
         Role: {}\n\
         Company: {}\n\
         Industry: {}\n\
         Location: {}\n\
         LinkedIn Bio: {}\n\
         \n\
         Task:\n\
         1) Classify intent as High, Medium, or Low.\n\
         2) Provide a brief 1-2 sentence explanation.\n\
         \n\
         Respond exactly in this format:\n\
         Intent: <High/Medium/Low>\n\
         Reasoning: <1-2 sentences>",
        offer.name,
        offer.value_props.join(", "),
        offer.ideal_use_cases.join(", "),
        profile.name,
        profile.role,
        profile.company,
        profile.industry,
        profile.location,
        profile.linkedin_bio,
    )
}

/// Pick the intent from an answer: the first occurrence, in reading order,
/// of "high", "medium", or "low" (case-insensitive) decides. Returns None
/// when no keyword appears, which callers report as a distinguishable
/// failure rather than guessing.
pub(crate) fn parse_intent(answer: &str) -> Option<IntentLabel> {
    let lowered = answer.to_lowercase();

    [
        (IntentLabel::High, "high"),
        (IntentLabel::Medium, "medium"),
        (IntentLabel::Low, "low"),
    ]
    .into_iter()
    .filter_map(|(label, keyword)| lowered.find(keyword).map(|index| (index, label)))
    .min_by_key(|(index, _)| *index)
    .map(|(_, label)| label)
}

/// Extract the `Reasoning:` line when the model honored the requested
/// format; otherwise fall back to the whole trimmed answer.
pub(crate) fn extract_reasoning(answer: &str) -> String {
    for line in answer.lines() {
        let trimmed = line.trim();
        // get() rather than a byte slice: the 10th byte of a non-ASCII
        // line need not be a char boundary.
        let labeled = trimmed
            .get(..10)
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case("reasoning:"));
        if labeled {
            let rest = trimmed[10..].trim();
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    answer.trim().to_string()
}
