//! Loan pre-screening: feature transformation, classifier inference, and
//! policy overrides behind a single decision pipeline.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
