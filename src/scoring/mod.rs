//! Lead scoring engine.
//!
//! Takes an offer definition and a batch of leads and produces, per lead, a
//! deterministic rule score (0-50), an AI intent classification mapped to an
//! AI score (0-50), a combined final score (0-100), and an intent tier. The
//! batch session owns the offer and lead list and enforces the
//! `Empty -> LeadsLoaded -> Scored` lifecycle; the classifier gateway
//! isolates the remote AI call and its failure modes.

pub mod classifier;
pub mod combine;
pub mod domain;
pub mod export;
pub mod parser;
pub mod router;
pub mod rules;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use classifier::{ClassifyError, GeminiClient, IntentClassifier, IntentSignal};
pub use domain::{
    AiIntent, IntentLabel, IntentTier, LeadEvaluation, LeadProfile, LeadRecord, LeadResultView,
    Offer, RuleFactor, ScoreComponent, ScoringSummary,
};
pub use router::scoring_router;
pub use service::LeadScoringService;
pub use session::{BatchSession, ClassifySettings, SessionError, SessionStatus};
