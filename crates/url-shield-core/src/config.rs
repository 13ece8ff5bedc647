//! Analysis configuration
//!
//! `AnalysisConfig` is an explicit value object: callers build one and pass
//! it to `analyze`. There is no global or thread-local configuration
//! channel, which keeps analysis deterministic and safe to call from any
//! thread.
//!
//! ## Presets
//!
//! - `default()` — balanced calibration (thresholds 30/70)
//! - `aggressive()` — lower escalation thresholds, tighter entropy bound
//! - `lenient()` — higher escalation thresholds for low-noise deployments
//! - `australia()` — brand/TLD emphasis for AU bank and government
//!   impersonation campaigns
//!
//! ## JSON overlays
//!
//! A flat camelCase JSON object can override individual fields:
//!
//! ```json
//! { "httpNotHttps": 25, "heuristicWeight": 0.5, "mlWeight": 0.25,
//!   "brandWeight": 0.15, "tldWeight": 0.10 }
//! ```
//!
//! Unknown keys are ignored; missing keys keep their defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Alternate calibration carried over from the original risk scorer.
///
/// Select it with `AnalysisConfig::default().with_thresholds(15, 50)`.
pub const RISK_SCORER_SAFE_THRESHOLD: u8 = 15;
pub const RISK_SCORER_SUSPICIOUS_THRESHOLD: u8 = 50;

/// Upper bound accepted for any per-rule weight override.
pub const MAX_RULE_WEIGHT: f64 = 60.0;

/// Per-rule heuristic weights
///
/// Field order mirrors the rule numbering of the heuristics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleWeights {
    pub http_not_https: f64,
    pub ip_address: f64,
    pub url_shortener: f64,
    pub excessive_subdomains: f64,
    pub non_standard_port: f64,
    pub long_url: f64,
    pub high_entropy: f64,
    /// Cap for the per-keyword accumulation (5 points per keyword).
    pub suspicious_keywords: f64,
    pub credential_params: f64,
    pub encoded_payload: f64,
    pub at_symbol: f64,
    pub multiple_tlds: f64,
    pub punycode: f64,
    pub numeric_subdomain: f64,
    pub risky_extension: f64,
    pub double_extension: f64,
    pub excessive_encoding: f64,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            http_not_https: 30.0,
            ip_address: 50.0,
            url_shortener: 15.0,
            excessive_subdomains: 10.0,
            non_standard_port: 15.0,
            long_url: 10.0,
            high_entropy: 20.0,
            suspicious_keywords: 20.0,
            credential_params: 40.0,
            encoded_payload: 30.0,
            at_symbol: 60.0,
            multiple_tlds: 25.0,
            punycode: 30.0,
            numeric_subdomain: 20.0,
            risky_extension: 40.0,
            double_extension: 40.0,
            excessive_encoding: 20.0,
        }
    }
}

impl RuleWeights {
    /// All weights in declaration order, paired with their JSON keys.
    pub fn entries(&self) -> [(&'static str, f64); 17] {
        [
            ("httpNotHttps", self.http_not_https),
            ("ipAddress", self.ip_address),
            ("urlShortener", self.url_shortener),
            ("excessiveSubdomains", self.excessive_subdomains),
            ("nonStandardPort", self.non_standard_port),
            ("longUrl", self.long_url),
            ("highEntropy", self.high_entropy),
            ("suspiciousKeywords", self.suspicious_keywords),
            ("credentialParams", self.credential_params),
            ("encodedPayload", self.encoded_payload),
            ("atSymbol", self.at_symbol),
            ("multipleTlds", self.multiple_tlds),
            ("punycode", self.punycode),
            ("numericSubdomain", self.numeric_subdomain),
            ("riskyExtension", self.risky_extension),
            ("doubleExtension", self.double_extension),
            ("excessiveEncoding", self.excessive_encoding),
        ]
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Ensemble weight of the heuristics engine
    pub heuristic_weight: f64,
    /// Ensemble weight of the logistic-regression score
    pub ml_weight: f64,
    /// Ensemble weight of brand impersonation
    pub brand_weight: f64,
    /// Ensemble weight of TLD risk
    pub tld_weight: f64,

    /// Combined score at or below which a component votes SAFE
    pub safe_threshold: u8,
    /// Combined score above which escalation rules promote to MALICIOUS
    pub suspicious_threshold: u8,

    pub base_confidence: f64,
    pub max_confidence: f64,
    pub min_confidence: f64,

    pub max_url_length: usize,
    pub max_host_length: usize,
    /// Subdomain depth at which the excessive-subdomain rule fires
    pub max_subdomain_count: usize,

    /// Shannon entropy above which a host is considered randomized
    pub entropy_threshold: f64,
    /// Levenshtein distance ceiling for typosquat fuzzy matching
    pub max_typosquat_distance: usize,
    /// Brands shorter than this are never fuzzy-matched
    pub min_brand_length_for_fuzzy: usize,

    pub rules: RuleWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 0.40,
            ml_weight: 0.35,
            brand_weight: 0.15,
            tld_weight: 0.10,
            safe_threshold: 30,
            suspicious_threshold: 70,
            base_confidence: 0.5,
            max_confidence: 0.99,
            min_confidence: 0.3,
            max_url_length: 2048,
            max_host_length: 253,
            max_subdomain_count: 4,
            entropy_threshold: 4.0,
            max_typosquat_distance: 2,
            min_brand_length_for_fuzzy: 4,
            rules: RuleWeights::default(),
        }
    }
}

/// Flat overlay parsed from JSON. Every field optional; unknown keys
/// ignored by serde's default behavior.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOverlay {
    heuristic_weight: Option<f64>,
    ml_weight: Option<f64>,
    brand_weight: Option<f64>,
    tld_weight: Option<f64>,
    safe_threshold: Option<u8>,
    suspicious_threshold: Option<u8>,
    entropy_threshold: Option<f64>,
    http_not_https: Option<f64>,
    ip_address: Option<f64>,
    url_shortener: Option<f64>,
    excessive_subdomains: Option<f64>,
    non_standard_port: Option<f64>,
    long_url: Option<f64>,
    high_entropy: Option<f64>,
    suspicious_keywords: Option<f64>,
    credential_params: Option<f64>,
    encoded_payload: Option<f64>,
    at_symbol: Option<f64>,
    multiple_tlds: Option<f64>,
    punycode: Option<f64>,
    numeric_subdomain: Option<f64>,
    risky_extension: Option<f64>,
    double_extension: Option<f64>,
    excessive_encoding: Option<f64>,
}

impl AnalysisConfig {
    /// Lower escalation thresholds and a tighter entropy bound.
    pub fn aggressive() -> Self {
        Self {
            heuristic_weight: 0.45,
            ml_weight: 0.30,
            brand_weight: 0.15,
            tld_weight: 0.10,
            safe_threshold: 25,
            suspicious_threshold: 60,
            entropy_threshold: 3.5,
            ..Self::default()
        }
    }

    /// Higher escalation thresholds for low-noise deployments.
    pub fn lenient() -> Self {
        Self {
            safe_threshold: 40,
            suspicious_threshold: 80,
            ..Self::default()
        }
    }

    /// Brand and TLD emphasis for AU bank/government impersonation.
    pub fn australia() -> Self {
        Self {
            heuristic_weight: 0.35,
            ml_weight: 0.30,
            brand_weight: 0.25,
            tld_weight: 0.10,
            ..Self::default()
        }
    }

    /// Override the verdict thresholds.
    pub fn with_thresholds(mut self, safe: u8, suspicious: u8) -> Self {
        self.safe_threshold = safe;
        self.suspicious_threshold = suspicious;
        self
    }

    /// Override the ensemble weights.
    pub fn with_weights(mut self, heuristic: f64, ml: f64, brand: f64, tld: f64) -> Self {
        self.heuristic_weight = heuristic;
        self.ml_weight = ml;
        self.brand_weight = brand;
        self.tld_weight = tld;
        self
    }

    /// Parse a JSON overlay and apply it over the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::default().with_json_overlay(json)
    }

    /// Apply a JSON overlay over this configuration, then validate.
    pub fn with_json_overlay(mut self, json: &str) -> Result<Self> {
        let overlay: ConfigOverlay = serde_json::from_str(json)?;

        macro_rules! apply {
            ($($field:ident => $target:expr),* $(,)?) => {
                $(if let Some(v) = overlay.$field { $target = v; })*
            };
        }

        apply! {
            heuristic_weight => self.heuristic_weight,
            ml_weight => self.ml_weight,
            brand_weight => self.brand_weight,
            tld_weight => self.tld_weight,
            safe_threshold => self.safe_threshold,
            suspicious_threshold => self.suspicious_threshold,
            entropy_threshold => self.entropy_threshold,
            http_not_https => self.rules.http_not_https,
            ip_address => self.rules.ip_address,
            url_shortener => self.rules.url_shortener,
            excessive_subdomains => self.rules.excessive_subdomains,
            non_standard_port => self.rules.non_standard_port,
            long_url => self.rules.long_url,
            high_entropy => self.rules.high_entropy,
            suspicious_keywords => self.rules.suspicious_keywords,
            credential_params => self.rules.credential_params,
            encoded_payload => self.rules.encoded_payload,
            at_symbol => self.rules.at_symbol,
            multiple_tlds => self.rules.multiple_tlds,
            punycode => self.rules.punycode,
            numeric_subdomain => self.rules.numeric_subdomain,
            risky_extension => self.rules.risky_extension,
            double_extension => self.rules.double_extension,
            excessive_encoding => self.rules.excessive_encoding,
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate internal consistency.
    ///
    /// Ensemble weights must sum to 1.0 within 1e-6, per-rule weights must
    /// lie in [0, 60], and the safe threshold must sit below the
    /// suspicious threshold.
    pub fn validate(&self) -> Result<()> {
        let sum = self.heuristic_weight + self.ml_weight + self.brand_weight + self.tld_weight;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(Error::config(format!(
                "ensemble weights must sum to 1.0 (got {sum})"
            )));
        }

        for (key, weight) in self.rules.entries() {
            if !(0.0..=MAX_RULE_WEIGHT).contains(&weight) {
                return Err(Error::config(format!(
                    "rule weight {key} must be in [0, {MAX_RULE_WEIGHT}] (got {weight})"
                )));
            }
        }

        if self.safe_threshold >= self.suspicious_threshold {
            return Err(Error::config(
                "safe threshold must be below suspicious threshold",
            ));
        }

        if !(0.0..=1.0).contains(&self.base_confidence)
            || !(0.0..=1.0).contains(&self.max_confidence)
            || !(0.0..=1.0).contains(&self.min_confidence)
        {
            return Err(Error::config("confidence bounds must be in [0, 1]"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
        assert!(AnalysisConfig::aggressive().validate().is_ok());
        assert!(AnalysisConfig::lenient().validate().is_ok());
        assert!(AnalysisConfig::australia().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let cfg = AnalysisConfig::default().with_weights(0.4, 0.35, 0.15, 0.099999);
        assert!(cfg.validate().is_err());

        // 1e-6 tolerance: barely outside is rejected, inside accepted
        let cfg = AnalysisConfig::default().with_weights(0.4, 0.35, 0.15, 0.0999999);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rule_weight_bounds() {
        let mut cfg = AnalysisConfig::default();
        cfg.rules.ip_address = 61.0;
        assert!(cfg.validate().is_err());
        cfg.rules.ip_address = -1.0;
        assert!(cfg.validate().is_err());
        cfg.rules.ip_address = 60.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let cfg = AnalysisConfig::default().with_thresholds(70, 30);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_risk_scorer_calibration_selectable() {
        let cfg = AnalysisConfig::default()
            .with_thresholds(RISK_SCORER_SAFE_THRESHOLD, RISK_SCORER_SUSPICIOUS_THRESHOLD);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.safe_threshold, 15);
        assert_eq!(cfg.suspicious_threshold, 50);
    }

    #[test]
    fn test_json_overlay() {
        let cfg = AnalysisConfig::from_json(
            r#"{"httpNotHttps": 25, "safeThreshold": 20, "unknownKey": true}"#,
        )
        .unwrap();
        assert_eq!(cfg.rules.http_not_https, 25.0);
        assert_eq!(cfg.safe_threshold, 20);
        // untouched fields keep defaults
        assert_eq!(cfg.rules.ip_address, 50.0);
    }

    #[test]
    fn test_json_overlay_rejects_bad_weights() {
        assert!(AnalysisConfig::from_json(r#"{"atSymbol": 99}"#).is_err());
        assert!(AnalysisConfig::from_json(r#"{"heuristicWeight": 0.9}"#).is_err());
    }

    #[test]
    fn test_json_overlay_weights_accepted_when_consistent() {
        let cfg = AnalysisConfig::from_json(
            r#"{"heuristicWeight": 0.25, "mlWeight": 0.25,
                "brandWeight": 0.25, "tldWeight": 0.25}"#,
        )
        .unwrap();
        assert_eq!(cfg.heuristic_weight, 0.25);
    }
}
