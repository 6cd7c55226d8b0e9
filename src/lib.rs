//! Lead qualification service.
//!
//! Scores batches of sales leads against a product/offer definition by
//! combining a deterministic rule score (role relevance, industry match,
//! data completeness) with an AI-derived buying-intent classification into
//! a single 0-100 score and intent tier.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
