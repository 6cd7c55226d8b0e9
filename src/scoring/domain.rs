use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product/offer context that leads are scored against. Pure data; only one
/// offer is active per session at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub ideal_use_cases: Vec<String>,
}

/// One prospect's profile as uploaded. Every field is optional text; an
/// empty-after-trim value counts as absent for completeness scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin_bio: String,
}

impl LeadProfile {
    pub(crate) fn fields(&self) -> [&str; 6] {
        [
            &self.name,
            &self.role,
            &self.company,
            &self.industry,
            &self.location,
            &self.linkedin_bio,
        ]
    }

    pub fn populated_fields(&self) -> usize {
        self.fields()
            .iter()
            .filter(|field| !field.trim().is_empty())
            .count()
    }
}

/// Rule factors permitted in the deterministic scoring rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleFactor {
    RoleRelevance,
    IndustryMatch,
    DataCompleteness,
}

impl RuleFactor {
    pub const fn label(self) -> &'static str {
        match self {
            RuleFactor::RoleRelevance => "Role relevance",
            RuleFactor::IndustryMatch => "Industry match",
            RuleFactor::DataCompleteness => "Data completeness",
        }
    }
}

/// Discrete contribution to the rule score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RuleFactor,
    pub points: u8,
    pub notes: String,
}

/// Verdict produced by the remote intent classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentLabel {
    High,
    Medium,
    Low,
}

impl IntentLabel {
    pub const fn label(self) -> &'static str {
        match self {
            IntentLabel::High => "High",
            IntentLabel::Medium => "Medium",
            IntentLabel::Low => "Low",
        }
    }
}

/// Classifier outcome stored per lead. `Unknown` records a classification
/// failure rather than a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiIntent {
    High,
    Medium,
    Low,
    Unknown,
}

impl From<IntentLabel> for AiIntent {
    fn from(value: IntentLabel) -> Self {
        match value {
            IntentLabel::High => AiIntent::High,
            IntentLabel::Medium => AiIntent::Medium,
            IntentLabel::Low => AiIntent::Low,
        }
    }
}

impl AiIntent {
    pub const fn label(self) -> &'static str {
        match self {
            AiIntent::High => "High",
            AiIntent::Medium => "Medium",
            AiIntent::Low => "Low",
            AiIntent::Unknown => "Unknown",
        }
    }
}

/// Final bucket derived from the blended score thresholds. May disagree
/// with the raw classifier label; the tier reflects the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentTier {
    High,
    Medium,
    Low,
}

impl IntentTier {
    pub const fn label(self) -> &'static str {
        match self {
            IntentTier::High => "High",
            IntentTier::Medium => "Medium",
            IntentTier::Low => "Low",
        }
    }
}

/// Scoring output attached to a lead once a run completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadEvaluation {
    pub rule_score: u8,
    pub components: Vec<ScoreComponent>,
    pub ai_intent: AiIntent,
    pub ai_score: u8,
    pub ai_reasoning: String,
    pub final_score: u8,
    pub intent_tier: IntentTier,
}

impl LeadEvaluation {
    /// Human-readable explanation combining the positive rule components
    /// with the classifier's reasoning, for results and CSV export.
    pub fn reasoning_summary(&self) -> String {
        let mut parts: Vec<String> = self
            .components
            .iter()
            .filter(|component| component.points > 0)
            .map(|component| format!("{}: {} points", component.factor.label(), component.points))
            .collect();
        parts.push(format!("AI assessment: {}", self.ai_reasoning));
        parts.join(". ")
    }
}

/// A lead held by the batch session: the uploaded profile plus its
/// evaluation once scoring has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub profile: LeadProfile,
    pub evaluation: Option<LeadEvaluation>,
}

impl LeadRecord {
    pub fn new(profile: LeadProfile) -> Self {
        Self {
            profile,
            evaluation: None,
        }
    }
}

/// Flattened per-lead row exposed by the results endpoints and CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct LeadResultView {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub linkedin_bio: String,
    pub intent: &'static str,
    pub score: u8,
    pub reasoning: String,
    pub rule_score: u8,
    pub ai_intent: &'static str,
    pub ai_score: u8,
}

impl LeadRecord {
    /// Flatten the record for export. Callers guarantee the evaluation is
    /// present (the session refuses result access before scoring).
    pub(crate) fn result_view(&self) -> Option<LeadResultView> {
        let evaluation = self.evaluation.as_ref()?;
        Some(LeadResultView {
            name: self.profile.name.clone(),
            role: self.profile.role.clone(),
            company: self.profile.company.clone(),
            industry: self.profile.industry.clone(),
            location: self.profile.location.clone(),
            linkedin_bio: self.profile.linkedin_bio.clone(),
            intent: evaluation.intent_tier.label(),
            score: evaluation.final_score,
            reasoning: evaluation.reasoning_summary(),
            rule_score: evaluation.rule_score,
            ai_intent: evaluation.ai_intent.label(),
            ai_score: evaluation.ai_score,
        })
    }
}

/// Counters describing a completed scoring run.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringSummary {
    pub scored: usize,
    pub classified: usize,
    pub unclassified: usize,
    pub scored_at: DateTime<Utc>,
}
