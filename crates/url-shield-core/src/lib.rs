//! # URL Shield Core
//!
//! Core types and traits for the URL Shield offline phishing analyzer:
//! - `Assessment` / `Verdict`: the public result record
//! - `AnalysisConfig`: explicit, validated configuration value object
//! - `Analyzer`: trait implemented by every analysis engine
//! - `Error`: configuration and plumbing errors (never cross `analyze`)
//!
//! The analysis engines themselves live in `url-shield-engine`; this crate
//! holds only the shared vocabulary so alternative frontends (CLI, FFI
//! bindings) can speak it without pulling in the engine tables.

pub mod analyzer;
pub mod assessment;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use analyzer::Analyzer;
pub use assessment::{Assessment, ScoreBreakdown, Verdict};
pub use config::{
    AnalysisConfig, RuleWeights, MAX_RULE_WEIGHT, RISK_SCORER_SAFE_THRESHOLD,
    RISK_SCORER_SUSPICIOUS_THRESHOLD,
};
pub use error::{Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
