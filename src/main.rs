use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use lead_qualifier::config::AppConfig;
use lead_qualifier::error::AppError;
use lead_qualifier::scoring::{
    parser::parse_leads, rules, scoring_router, ClassifySettings, GeminiClient,
    LeadScoringService, Offer,
};
use lead_qualifier::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Lead Qualification Service",
    about = "Score sales leads against a product offer with rules and AI intent",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the deterministic rule scorer over an offer and a lead CSV
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Offer definition as a JSON file (name, value_props, ideal_use_cases)
    #[arg(long)]
    offer: PathBuf,
    /// Lead batch as a CSV file with the six profile columns
    #[arg(long)]
    leads: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score(args) => run_rule_scoring(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let classifier = config
        .ai
        .api_key
        .clone()
        .map(|key| Arc::new(GeminiClient::new(key, config.ai.model.clone())));
    if classifier.is_none() {
        warn!("GEMINI_API_KEY not set; scoring requests will report a configuration error");
    }

    let settings = ClassifySettings {
        timeout: config.ai.timeout,
        max_concurrency: config.ai.max_concurrency,
    };
    let service = Arc::new(LeadScoringService::new(classifier, settings));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(scoring_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead qualification service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_rule_scoring(args: ScoreArgs) -> Result<(), AppError> {
    let offer: Offer = serde_json::from_reader(File::open(&args.offer)?)?;
    if offer.name.trim().is_empty() {
        return Err(AppError::EmptyOfferName);
    }

    let profiles = parse_leads(File::open(&args.leads)?)?;

    println!("Rule scoring against offer '{}'", offer.name);
    println!("(AI intent classification runs in the HTTP service with GEMINI_API_KEY configured)");
    println!();

    for profile in &profiles {
        let (components, rule_score) = rules::score_profile(&offer, profile);
        let display_name = if profile.name.trim().is_empty() {
            "(unnamed lead)"
        } else {
            profile.name.trim()
        };

        println!("- {display_name}: {rule_score}/{}", rules::MAX_RULE_SCORE);
        for component in &components {
            println!(
                "    {}: {} ({})",
                component.factor.label(),
                component.points,
                component.notes
            );
        }
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
