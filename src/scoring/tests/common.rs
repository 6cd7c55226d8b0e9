use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::scoring::classifier::{ClassifyError, IntentClassifier, IntentSignal};
use crate::scoring::domain::{IntentLabel, LeadProfile, Offer};
use crate::scoring::router::scoring_router;
use crate::scoring::service::LeadScoringService;
use crate::scoring::session::ClassifySettings;

pub(super) fn offer() -> Offer {
    Offer {
        name: "AI Outreach".to_string(),
        value_props: vec![
            "Automates multi-channel outreach".to_string(),
            "Books more qualified meetings".to_string(),
        ],
        ideal_use_cases: vec!["SaaS".to_string()],
    }
}

pub(super) fn strong_lead() -> LeadProfile {
    LeadProfile {
        name: "Ava Patel".to_string(),
        role: "Head of Growth".to_string(),
        company: "Flowmetrics".to_string(),
        industry: "SaaS".to_string(),
        location: "Austin, TX".to_string(),
        linkedin_bio: "Scaling outbound for B2B SaaS teams".to_string(),
    }
}

pub(super) fn sparse_lead() -> LeadProfile {
    LeadProfile {
        name: "Sam Ortiz".to_string(),
        ..LeadProfile::default()
    }
}

pub(super) fn lead(name: &str, role: &str, industry: &str) -> LeadProfile {
    LeadProfile {
        name: name.to_string(),
        role: role.to_string(),
        industry: industry.to_string(),
        ..LeadProfile::default()
    }
}

pub(super) fn leads_csv() -> &'static str {
    "name,role,company,industry,location,linkedin_bio\n\
     Ava Patel,Head of Growth,Flowmetrics,SaaS,\"Austin, TX\",Scaling outbound for B2B SaaS teams\n\
     Sam Ortiz,Intern,,Retail,,\n"
}

/// Classifier returning the same verdict for every lead.
pub(super) struct FixedClassifier {
    pub(super) intent: IntentLabel,
    pub(super) reasoning: String,
}

impl FixedClassifier {
    pub(super) fn new(intent: IntentLabel) -> Self {
        Self {
            intent,
            reasoning: "scripted verdict".to_string(),
        }
    }
}

#[async_trait]
impl IntentClassifier for FixedClassifier {
    async fn classify(
        &self,
        _offer: &Offer,
        _profile: &LeadProfile,
    ) -> Result<IntentSignal, ClassifyError> {
        Ok(IntentSignal {
            intent: self.intent,
            reasoning: self.reasoning.clone(),
        })
    }
}

/// Classifier that always fails, standing in for an unreachable service.
pub(super) struct FailingClassifier;

#[async_trait]
impl IntentClassifier for FailingClassifier {
    async fn classify(
        &self,
        _offer: &Offer,
        _profile: &LeadProfile,
    ) -> Result<IntentSignal, ClassifyError> {
        Err(ClassifyError::Http("connection refused".to_string()))
    }
}

/// Per-lead script keyed by the lead's name. Unscripted leads fail, which
/// keeps tests honest about which leads they expect to classify.
pub(super) enum Script {
    Intent(IntentLabel),
    Fail,
}

pub(super) struct ScriptedClassifier {
    verdicts: HashMap<String, Script>,
}

impl ScriptedClassifier {
    pub(super) fn new(verdicts: Vec<(&str, Script)>) -> Self {
        Self {
            verdicts: verdicts
                .into_iter()
                .map(|(name, script)| (name.to_string(), script))
                .collect(),
        }
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        _offer: &Offer,
        profile: &LeadProfile,
    ) -> Result<IntentSignal, ClassifyError> {
        match self.verdicts.get(&profile.name) {
            Some(Script::Intent(intent)) => Ok(IntentSignal {
                intent: *intent,
                reasoning: format!("scripted verdict for {}", profile.name),
            }),
            Some(Script::Fail) | None => {
                Err(ClassifyError::Http("scripted failure".to_string()))
            }
        }
    }
}

pub(super) fn service_with<C>(classifier: C) -> LeadScoringService<C>
where
    C: IntentClassifier + 'static,
{
    LeadScoringService::new(Some(Arc::new(classifier)), ClassifySettings::default())
}

pub(super) fn unconfigured_service() -> LeadScoringService<FixedClassifier> {
    LeadScoringService::new(None, ClassifySettings::default())
}

pub(super) fn router_with<C>(classifier: C) -> axum::Router
where
    C: IntentClassifier + 'static,
{
    scoring_router(Arc::new(service_with(classifier)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
