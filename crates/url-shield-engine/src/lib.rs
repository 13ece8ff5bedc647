//! # URL Shield Engine
//!
//! Offline URL phishing analysis. Given a URL (typically decoded from a
//! QR code), produces an [`Assessment`]: a 0–100 risk score, a verdict,
//! the indicators that fired and a confidence estimate. Analysis is pure
//! and deterministic: no network I/O, no shared mutable state, the same
//! input and configuration always produce byte-identical output.
//!
//! ## Quick start
//!
//! ```rust
//! use url_shield_engine::analyze;
//!
//! let assessment = analyze("http://paypa1.com/login");
//! assert_ne!(assessment.verdict, url_shield_core::Verdict::Safe);
//! ```
//!
//! ## Engines
//!
//! The pipeline is a DAG rooted at the parser: heuristics, static and
//! dynamic brand detection, TLD risk, redirect-pattern analysis and a
//! logistic-regression scorer all consume the same [`parser::ParsedUrl`],
//! and the ensemble combines them into the final verdict.

pub mod brand;
pub mod ensemble;
pub mod explain;
pub mod features;
pub mod heuristics;
pub mod model;
pub mod parser;
pub mod psl;
pub mod redirect;
pub mod tables;
pub mod tld;

pub use explain::{counterfactual_hints, enrich, EnrichedVerdict, Hint};
pub use parser::ParsedUrl;
pub use url_shield_core::{AnalysisConfig, Assessment, ScoreBreakdown, Verdict};

use brand::dynamic::DynamicBrandDetector;
use brand::BrandDetector;
use ensemble::{EnsembleInputs, ScoreCalculator, VerdictDeterminer};
use features::FeatureExtractor;
use heuristics::HeuristicsEngine;
use model::LogisticRegressionModel;
use redirect::RedirectAnalyzer;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tld::TldScorer;
use url_shield_core::{Analyzer, Result};

/// Analyze a URL with the default configuration.
pub fn analyze(url: &str) -> Assessment {
    PhishingAnalyzer::new().analyze(url)
}

/// Analyze a URL with an explicit configuration.
pub fn analyze_with_config(url: &str, config: &AnalysisConfig) -> Assessment {
    PhishingAnalyzer {
        config: config.clone(),
    }
    .analyze(url)
}

/// Main entry point: owns a validated configuration and runs the full
/// analysis pipeline.
///
/// ## Example
///
/// ```rust
/// use url_shield_engine::PhishingAnalyzer;
/// use url_shield_core::AnalysisConfig;
///
/// let analyzer = PhishingAnalyzer::with_config(AnalysisConfig::aggressive()).unwrap();
/// let assessment = analyzer.analyze("https://secure-login-verify.example.tk/");
/// assert!(assessment.score > 0);
/// ```
pub struct PhishingAnalyzer {
    config: AnalysisConfig,
}

impl PhishingAnalyzer {
    /// Analyzer with the default configuration.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Analyzer with an explicit, validated configuration.
    pub fn with_config(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline. Never panics across this boundary: any
    /// internal fault folds into the analysis-error assessment.
    pub fn analyze(&self, url: &str) -> Assessment {
        if let Some(rejection) = self.validate(url) {
            return rejection;
        }

        let Some(parsed) = parser::parse(url) else {
            return Assessment::unparseable();
        };

        match catch_unwind(AssertUnwindSafe(|| self.run_engines(&parsed))) {
            Ok(assessment) => assessment,
            Err(_) => {
                tracing::error!("analysis pipeline fault; returning anomaly assessment");
                Assessment::analysis_error()
            }
        }
    }

    /// Input validation in front of the parser. Returns the rejection
    /// assessment for inputs that must not reach the engines.
    fn validate(&self, url: &str) -> Option<Assessment> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Some(Assessment::invalid_input("URL is empty"));
        }
        if url.len() > self.config.max_url_length {
            return Some(Assessment::invalid_input("URL exceeds maximum safe length"));
        }
        if url
            .chars()
            .any(|c| (c as u32) < 0x20 && !matches!(c, '\t' | '\r' | '\n'))
        {
            return Some(Assessment::invalid_input("URL contains control characters"));
        }
        if let Some(idx) = trimmed.find("://") {
            let scheme = trimmed[..idx].to_lowercase();
            if scheme != "http" && scheme != "https" {
                return Some(Assessment::invalid_input("Unsupported URL scheme"));
            }
        }
        None
    }

    fn run_engines(&self, parsed: &ParsedUrl) -> Assessment {
        let heuristic = HeuristicsEngine::new(&self.config).analyze(parsed);
        let brand = BrandDetector::new(&self.config).analyze(parsed);
        let dynamic = DynamicBrandDetector::new().analyze(parsed);
        let tld = TldScorer::new().analyze(&parsed.host);
        let redirect = RedirectAnalyzer::new().analyze(&parsed.original);
        // Redirect intent enters the combined score through the model's
        // redirect feature; the raw score is surfaced in the breakdown.
        let features = FeatureExtractor::with_redirect_indicator(redirect.has_redirect_indicators)
            .analyze(parsed);
        let ml_probability = LogisticRegressionModel::new().analyze(&features);

        let brand_component = brand.score.max(dynamic.score);
        let inputs = EnsembleInputs {
            heuristic: &heuristic,
            ml_probability,
            brand: &brand,
            brand_component,
            tld: &tld,
        };

        let calculator = ScoreCalculator::new(&self.config);
        let combined = calculator.combined_score(&inputs);
        let confidence = calculator.confidence(&inputs);
        let verdict = VerdictDeterminer::new(&self.config).determine(&inputs, combined);

        // Flags in contract order: heuristics, then brand, then TLD.
        let mut flags = heuristic.flags.clone();
        if let Some(matched) = &brand.matched {
            flags.push(format!(
                "Possible {} impersonation ({})",
                matched.brand,
                matched.match_type.as_str()
            ));
        }
        for finding in &dynamic.findings {
            flags.push(format!("Brand-impersonation pattern: {}", finding.detail));
        }
        if tld.is_high_risk {
            flags.push(format!(
                "High-risk top-level domain: .{} ({})",
                tld.tld,
                tld.risk_category.as_str()
            ));
        }

        let details = ScoreBreakdown {
            heuristic_score: heuristic.score.round() as u8,
            ml_score_scaled: (ml_probability * 100.0).round() as u8,
            brand_score: brand_component.round() as u8,
            tld_score: tld.score.round() as u8,
            redirect_score: redirect.score.round() as u8,
            brand_match: brand.matched.as_ref().map(|m| m.brand.clone()),
            tld: (!tld.tld.is_empty()).then(|| tld.tld.clone()),
            rule_hits: heuristic.details.clone(),
        };

        tracing::debug!(
            score = combined,
            verdict = verdict.as_str(),
            flags = flags.len(),
            "analysis complete"
        );

        Assessment::new(combined, verdict, confidence)
            .with_flags(flags)
            .with_details(details)
    }
}

impl Default for PhishingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let a = analyze("");
        assert_eq!(a.verdict, Verdict::Unknown);
        assert_eq!(a.score, 0);
        assert_eq!(a.confidence, 0.0);
        assert_eq!(a.flags, vec!["URL is empty".to_string()]);
    }

    #[test]
    fn test_oversized_input() {
        let a = analyze(&"a".repeat(3000));
        assert_eq!(a.verdict, Verdict::Unknown);
        assert_eq!(a.flags, vec!["URL exceeds maximum safe length".to_string()]);
    }

    #[test]
    fn test_unsupported_scheme() {
        let a = analyze("ftp://example.com/file");
        assert_eq!(a.verdict, Verdict::Unknown);
        assert_eq!(a.flags, vec!["Unsupported URL scheme".to_string()]);
    }

    #[test]
    fn test_unparseable() {
        let a = analyze("http://:99999/");
        assert_eq!(a.verdict, Verdict::Unknown);
        assert_eq!(a.score, 0);
        assert_eq!(
            a.flags,
            vec!["Invalid or unsupported URL format".to_string()]
        );
    }

    #[test]
    fn test_with_config_validates() {
        let bad = AnalysisConfig::default().with_weights(0.9, 0.2, 0.0, 0.0);
        assert!(PhishingAnalyzer::with_config(bad).is_err());
        assert!(PhishingAnalyzer::with_config(AnalysisConfig::australia()).is_ok());
    }

    #[test]
    fn test_flag_order_heuristics_brand_tld() {
        let a = analyze("http://paypa1.com.evil-zone.tk/login");
        let brand_idx = a
            .flags
            .iter()
            .position(|f| f.contains("impersonation ("))
            .expect("brand flag expected");
        let tld_idx = a
            .flags
            .iter()
            .position(|f| f.contains("top-level domain"))
            .expect("tld flag expected");
        // every heuristic flag precedes the brand flag
        for (i, f) in a.flags.iter().enumerate() {
            if !f.contains("impersonation")
                && !f.contains("Brand-impersonation")
                && !f.contains("top-level domain")
            {
                assert!(i < brand_idx, "heuristic flag after brand flag: {f}");
            }
        }
        assert!(brand_idx < tld_idx);
    }

    #[test]
    fn test_details_breakdown_populated() {
        let a = analyze("http://paypa1.com/login");
        assert_eq!(a.details.brand_match.as_deref(), Some("paypal"));
        assert_eq!(a.details.tld.as_deref(), Some("com"));
        assert!(a.details.heuristic_score > 0);
        assert!(a.details.rule_hits.contains_key("HTTP_NOT_HTTPS"));
    }

    #[test]
    fn test_safe_url_end_to_end() {
        let a = analyze("https://www.google.com");
        assert_eq!(a.verdict, Verdict::Safe);
        assert!(a.flags.is_empty());
    }
}
