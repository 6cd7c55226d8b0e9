use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{info, warn};

use super::classifier::{ClassifyError, IntentClassifier};
use super::combine;
use super::domain::{
    AiIntent, LeadEvaluation, LeadProfile, LeadRecord, LeadResultView, Offer, ScoringSummary,
};
use super::rules;

/// Per-run classifier dispatch knobs: how many calls may be in flight at
/// once and how long each may take before it is abandoned.
#[derive(Debug, Clone)]
pub struct ClassifySettings {
    pub timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for ClassifySettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_concurrency: 4,
        }
    }
}

/// Lifecycle of a batch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Empty,
    LeadsLoaded,
    Scored,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::Empty => "empty",
            SessionStatus::LeadsLoaded => "leads_loaded",
            SessionStatus::Scored => "scored",
        }
    }
}

/// Error raised by session operations. Validation variants reject the
/// input before any state mutation; precondition variants reject calls
/// made out of state order.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("offer name must not be empty")]
    EmptyOfferName,
    #[error("lead batch must contain at least one row")]
    EmptyBatch,
    #[error("no offer set; create an offer before scoring")]
    OfferMissing,
    #[error("no leads loaded; upload a batch before scoring")]
    LeadsMissing,
    #[error("results are not available until scoring completes")]
    NotScored,
    #[error("intent classifier credential is not configured; set GEMINI_API_KEY")]
    ClassifierUnconfigured,
}

/// Holds the active offer and lead batch and walks them through the
/// `Empty -> LeadsLoaded -> Scored` state machine. Guard checks at each
/// entry point enforce the legal transitions; re-scoring a scored batch is
/// allowed and overwrites every evaluation.
#[derive(Debug, Default)]
pub struct BatchSession {
    offer: Option<Offer>,
    leads: Vec<LeadRecord>,
    scored_at: Option<DateTime<Utc>>,
}

impl BatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        if self.scored_at.is_some() {
            SessionStatus::Scored
        } else if self.leads.is_empty() {
            SessionStatus::Empty
        } else {
            SessionStatus::LeadsLoaded
        }
    }

    pub fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    pub fn lead_count(&self) -> usize {
        self.leads.len()
    }

    pub fn scored_at(&self) -> Option<DateTime<Utc>> {
        self.scored_at
    }

    /// Install a new offer, replacing any prior one. Previously computed
    /// evaluations were scored against a different context, so they are
    /// cleared.
    pub fn set_offer(&mut self, offer: Offer) -> Result<(), SessionError> {
        if offer.name.trim().is_empty() {
            return Err(SessionError::EmptyOfferName);
        }

        self.offer = Some(offer);
        self.clear_evaluations();
        Ok(())
    }

    /// Replace the current batch with freshly uploaded profiles. Returns
    /// the number of leads accepted.
    pub fn load_leads(&mut self, profiles: Vec<LeadProfile>) -> Result<usize, SessionError> {
        if profiles.is_empty() {
            return Err(SessionError::EmptyBatch);
        }

        self.leads = profiles.into_iter().map(LeadRecord::new).collect();
        self.scored_at = None;
        Ok(self.leads.len())
    }

    /// Score every lead in the batch against the active offer.
    ///
    /// The rule scorer runs synchronously per lead; classifier calls are
    /// fanned out with bounded concurrency and a per-call timeout, and each
    /// verdict is written back to the lead's original slot. A failed
    /// classification downgrades that one lead to `Unknown` with a zero AI
    /// score; it never aborts the rest of the batch.
    pub async fn run_scoring<C>(
        &mut self,
        classifier: &C,
        settings: &ClassifySettings,
    ) -> Result<ScoringSummary, SessionError>
    where
        C: IntentClassifier + ?Sized,
    {
        let offer = self.offer.clone().ok_or(SessionError::OfferMissing)?;
        if self.leads.is_empty() {
            return Err(SessionError::LeadsMissing);
        }

        let jobs: Vec<(usize, LeadProfile)> = self
            .leads
            .iter()
            .enumerate()
            .map(|(slot, record)| (slot, record.profile.clone()))
            .collect();

        let verdicts = {
            let offer = &offer;
            stream::iter(jobs)
                .map(|(slot, profile)| async move {
                    let verdict = match tokio::time::timeout(
                        settings.timeout,
                        classifier.classify(offer, &profile),
                    )
                    .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(ClassifyError::Timeout(settings.timeout)),
                    };
                    (slot, verdict)
                })
                .buffer_unordered(settings.max_concurrency.max(1))
                .collect::<Vec<_>>()
                .await
        };

        let mut classified = 0usize;
        for (slot, verdict) in verdicts {
            let record = &mut self.leads[slot];
            let (components, rule_score) = rules::score_profile(&offer, &record.profile);

            let (ai_intent, ai_reasoning) = match verdict {
                Ok(signal) => {
                    classified += 1;
                    (AiIntent::from(signal.intent), signal.reasoning)
                }
                Err(err) => {
                    warn!(
                        lead = %record.profile.name,
                        error = %err,
                        "intent classification failed; keeping rule score only"
                    );
                    (AiIntent::Unknown, format!("classification unavailable: {err}"))
                }
            };

            let combined = combine::combine(rule_score, ai_intent);
            record.evaluation = Some(LeadEvaluation {
                rule_score,
                components,
                ai_intent,
                ai_score: combined.ai_score,
                ai_reasoning,
                final_score: combined.final_score,
                intent_tier: combined.tier,
            });
        }

        let scored_at = Utc::now();
        self.scored_at = Some(scored_at);

        let scored = self.leads.len();
        info!(scored, classified, "scoring run complete");

        Ok(ScoringSummary {
            scored,
            classified,
            unclassified: scored - classified,
            scored_at,
        })
    }

    /// The scored batch in upload order. Rejected until a scoring run has
    /// completed.
    pub fn results(&self) -> Result<&[LeadRecord], SessionError> {
        if self.status() != SessionStatus::Scored {
            return Err(SessionError::NotScored);
        }
        Ok(&self.leads)
    }

    /// Flattened rows for API responses and CSV export, in upload order.
    pub fn result_views(&self) -> Result<Vec<LeadResultView>, SessionError> {
        Ok(self
            .results()?
            .iter()
            .filter_map(LeadRecord::result_view)
            .collect())
    }

    fn clear_evaluations(&mut self) {
        for record in &mut self.leads {
            record.evaluation = None;
        }
        self.scored_at = None;
    }
}
