use crate::config::ConfigError;
use crate::scoring::parser::LeadCsvError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Failures surfaced by the binary entry points (server startup and the
/// offline scoring command). Request-level errors are handled in the
/// scoring router instead.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    OfferFile(serde_json::Error),
    LeadCsv(LeadCsvError),
    EmptyOfferName,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::OfferFile(err) => write!(f, "offer file is not valid JSON: {}", err),
            AppError::LeadCsv(err) => write!(f, "lead CSV error: {}", err),
            AppError::EmptyOfferName => write!(f, "offer name must not be empty"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::OfferFile(err) => Some(err),
            AppError::LeadCsv(err) => Some(err),
            AppError::EmptyOfferName => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::OfferFile(value)
    }
}

impl From<LeadCsvError> for AppError {
    fn from(value: LeadCsvError) -> Self {
        Self::LeadCsv(value)
    }
}
