//! Integration scenarios for the lead scoring workflow.
//!
//! Scenarios drive the public service facade and HTTP router end to end, so
//! the batch lifecycle, scoring rubric, and error mapping are validated
//! without reaching into private modules.

mod common {
    use std::sync::Arc;

    use async_trait::async_trait;

    use lead_qualifier::scoring::{
        scoring_router, ClassifyError, ClassifySettings, IntentClassifier, IntentLabel,
        IntentSignal, LeadProfile, LeadScoringService, Offer,
    };

    pub(super) fn offer() -> Offer {
        Offer {
            name: "AI Outreach".to_string(),
            value_props: vec!["Automates multi-channel outreach".to_string()],
            ideal_use_cases: vec!["SaaS".to_string()],
        }
    }

    pub(super) fn lead_batch() -> Vec<LeadProfile> {
        vec![
            LeadProfile {
                name: "Ava Patel".to_string(),
                role: "Head of Growth".to_string(),
                company: "Flowmetrics".to_string(),
                industry: "SaaS".to_string(),
                location: "Austin, TX".to_string(),
                linkedin_bio: "Scaling outbound for B2B SaaS teams".to_string(),
            },
            LeadProfile {
                name: "Sam Ortiz".to_string(),
                role: "Intern".to_string(),
                industry: "Retail".to_string(),
                ..LeadProfile::default()
            },
        ]
    }

    pub(super) fn lead_batch_csv() -> &'static str {
        "name,role,company,industry,location,linkedin_bio\n\
         Ava Patel,Head of Growth,Flowmetrics,SaaS,\"Austin, TX\",Scaling outbound for B2B SaaS teams\n\
         Sam Ortiz,Intern,,Retail,,\n"
    }

    /// Classifier scripted per lead name; anything unscripted fails the call.
    pub(super) struct ScriptedClassifier {
        verdicts: Vec<(&'static str, Option<IntentLabel>)>,
    }

    impl ScriptedClassifier {
        pub(super) fn new(verdicts: Vec<(&'static str, Option<IntentLabel>)>) -> Self {
            Self { verdicts }
        }
    }

    #[async_trait]
    impl IntentClassifier for ScriptedClassifier {
        async fn classify(
            &self,
            _offer: &Offer,
            profile: &LeadProfile,
        ) -> Result<IntentSignal, ClassifyError> {
            match self
                .verdicts
                .iter()
                .find(|(name, _)| *name == profile.name)
            {
                Some((_, Some(intent))) => Ok(IntentSignal {
                    intent: *intent,
                    reasoning: format!("scripted verdict for {}", profile.name),
                }),
                _ => Err(ClassifyError::Http("scripted failure".to_string())),
            }
        }
    }

    pub(super) fn scoring_service(
        classifier: ScriptedClassifier,
    ) -> Arc<LeadScoringService<ScriptedClassifier>> {
        Arc::new(LeadScoringService::new(
            Some(Arc::new(classifier)),
            ClassifySettings::default(),
        ))
    }

    pub(super) fn scoring_app(classifier: ScriptedClassifier) -> axum::Router {
        scoring_router(scoring_service(classifier))
    }
}

mod lifecycle {
    use super::common::*;

    use lead_qualifier::scoring::{IntentLabel, SessionError, SessionStatus};

    #[tokio::test]
    async fn batch_walks_empty_to_leads_loaded_to_scored() {
        let service = scoring_service(ScriptedClassifier::new(vec![
            ("Ava Patel", Some(IntentLabel::High)),
            ("Sam Ortiz", Some(IntentLabel::Low)),
        ]));

        assert_eq!(service.status().await, SessionStatus::Empty);

        service.set_offer(offer()).await.expect("offer accepted");
        service
            .load_leads(lead_batch())
            .await
            .expect("leads accepted");
        assert_eq!(service.status().await, SessionStatus::LeadsLoaded);

        let summary = service.run_scoring().await.expect("scoring succeeds");
        assert_eq!(summary.scored, 2);
        assert_eq!(summary.classified, 2);
        assert_eq!(service.status().await, SessionStatus::Scored);
    }

    #[tokio::test]
    async fn out_of_order_calls_are_refused_without_state_changes() {
        let service = scoring_service(ScriptedClassifier::new(vec![]));

        let err = service.run_scoring().await.expect_err("no offer yet");
        assert!(matches!(err, SessionError::OfferMissing));

        let err = service.results().await.expect_err("nothing scored yet");
        assert!(matches!(err, SessionError::NotScored));

        assert_eq!(service.status().await, SessionStatus::Empty);
    }

    #[tokio::test]
    async fn classifier_failures_degrade_to_rule_only_scores() {
        let service = scoring_service(ScriptedClassifier::new(vec![(
            "Ava Patel",
            Some(IntentLabel::High),
        )]));
        service.set_offer(offer()).await.expect("offer accepted");
        service
            .load_leads(lead_batch())
            .await
            .expect("leads accepted");

        let summary = service.run_scoring().await.expect("scoring succeeds");
        assert_eq!(summary.classified, 1);
        assert_eq!(summary.unclassified, 1);

        let views = service.results().await.expect("results available");
        assert_eq!(views[0].score, 100);
        assert_eq!(views[0].intent, "High");
        assert_eq!(views[1].ai_intent, "Unknown");
        assert_eq!(views[1].ai_score, 0);
        assert_eq!(views[1].score, views[1].rule_score);
        assert_eq!(views[1].intent, "Low");
    }
}

mod routing {
    use super::common::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use lead_qualifier::scoring::IntentLabel;

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn upload_score_and_export_over_http() {
        let app = scoring_app(ScriptedClassifier::new(vec![
            ("Ava Patel", Some(IntentLabel::High)),
            ("Sam Ortiz", None),
        ]));

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/v1/offer")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&offer()).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/v1/leads/upload")
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(Body::from(lead_batch_csv()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::post("/api/v1/score").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = json_body(response).await;
        assert_eq!(summary["scored"], 2);
        assert_eq!(summary["classified"], 1);

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/v1/results")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let rows = json_body(response).await;
        assert_eq!(rows[0]["intent"], "High");
        assert_eq!(rows[1]["ai_intent"], "Unknown");

        let response = app
            .oneshot(
                Request::get("/api/v1/results/csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
    }

    #[tokio::test]
    async fn scoring_before_setup_maps_to_conflict() {
        let app = scoring_app(ScriptedClassifier::new(vec![]));

        let response = app
            .oneshot(Request::post("/api/v1/score").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("no offer set"));
    }

    #[tokio::test]
    async fn malformed_upload_maps_to_bad_request() {
        let app = scoring_app(ScriptedClassifier::new(vec![]));

        let response = app
            .oneshot(
                Request::post("/api/v1/leads/upload")
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(Body::from("name,role\nAva Patel,CEO\n"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
