use std::sync::Arc;
use tokio::sync::Mutex;

use super::classifier::IntentClassifier;
use super::domain::{LeadProfile, LeadResultView, Offer, ScoringSummary};
use super::session::{BatchSession, ClassifySettings, SessionError, SessionStatus};

/// Facade composing the batch session with the (optional) remote
/// classifier.
///
/// Every operation takes the one session lock, so a results read issued
/// while a scoring run is in flight blocks until the run completes rather
/// than observing a half-written batch. A missing classifier is reported
/// as a configuration error on the first scoring attempt, before any lead
/// is touched; it is never reported per lead.
pub struct LeadScoringService<C> {
    session: Mutex<BatchSession>,
    classifier: Option<Arc<C>>,
    settings: ClassifySettings,
}

impl<C> LeadScoringService<C>
where
    C: IntentClassifier + 'static,
{
    pub fn new(classifier: Option<Arc<C>>, settings: ClassifySettings) -> Self {
        Self {
            session: Mutex::new(BatchSession::new()),
            classifier,
            settings,
        }
    }

    pub async fn set_offer(&self, offer: Offer) -> Result<SessionStatus, SessionError> {
        let mut session = self.session.lock().await;
        session.set_offer(offer)?;
        Ok(session.status())
    }

    pub async fn load_leads(&self, profiles: Vec<LeadProfile>) -> Result<usize, SessionError> {
        let mut session = self.session.lock().await;
        session.load_leads(profiles)
    }

    pub async fn run_scoring(&self) -> Result<ScoringSummary, SessionError> {
        let classifier = self
            .classifier
            .as_deref()
            .ok_or(SessionError::ClassifierUnconfigured)?;

        let mut session = self.session.lock().await;
        session.run_scoring(classifier, &self.settings).await
    }

    pub async fn results(&self) -> Result<Vec<LeadResultView>, SessionError> {
        let session = self.session.lock().await;
        session.result_views()
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.lock().await.status()
    }
}
