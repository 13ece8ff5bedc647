//! Assessment types
//!
//! Standardized output format for every analysis:
//! - `Assessment`: the complete record returned by `analyze`
//! - `Verdict`: categorical outcome
//! - `ScoreBreakdown`: per-component contribution detail
//!
//! All values are plain serializable records owned by the caller. The
//! failure taxonomy (invalid input, unparseable URL, internal anomaly) is
//! folded into `Assessment` constructors so no error type ever escapes the
//! public surface.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorical verdict of the ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// No meaningful phishing indicators
    Safe,
    /// Indicators present; user caution advised
    Suspicious,
    /// Strong impersonation or attack indicators
    Malicious,
    /// Input could not be analyzed
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Suspicious => "SUSPICIOUS",
            Self::Malicious => "MALICIOUS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Per-component score contributions backing the combined score
///
/// `rule_hits` maps heuristic rule ids to the weight each contributed.
/// A `BTreeMap` keeps serialization order deterministic, which the
/// byte-for-byte reproducibility contract depends on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Heuristics engine score, normalized to 0..=100
    pub heuristic_score: u8,

    /// ML probability scaled to 0..=100
    pub ml_score_scaled: u8,

    /// Brand impersonation score (static or dynamic, whichever is higher)
    pub brand_score: u8,

    /// TLD risk score
    pub tld_score: u8,

    /// Redirect-pattern score. Folded into the combined score through the
    /// ML redirect feature rather than as a fifth weighted component.
    pub redirect_score: u8,

    /// Canonical name of the impersonated brand, if matched
    pub brand_match: Option<String>,

    /// Effective TLD the risk score was derived from
    pub tld: Option<String>,

    /// Heuristic rule id -> weight contributed
    pub rule_hits: BTreeMap<String, f64>,
}

/// The complete record returned by `analyze`
///
/// Flags are ordered deterministically: heuristic flags in rule order,
/// then brand flags, then the TLD flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Combined risk score in 0..=100
    pub score: u8,

    /// Categorical verdict
    pub verdict: Verdict,

    /// Human-readable indicators that fired
    pub flags: Vec<String>,

    /// Per-component breakdown
    pub details: ScoreBreakdown,

    /// Confidence in 0.30..=0.99 on success, 0.0 on validation failure
    pub confidence: f32,
}

impl Assessment {
    /// Create an assessment with the given score and verdict
    pub fn new(score: u8, verdict: Verdict, confidence: f32) -> Self {
        Self {
            score: score.min(100),
            verdict,
            flags: Vec::new(),
            details: ScoreBreakdown::default(),
            confidence,
        }
    }

    /// Rejected at validation (empty, oversized, control bytes, bad scheme).
    ///
    /// The caller learns the reason through the single flag.
    pub fn invalid_input<S: Into<String>>(reason: S) -> Self {
        let mut a = Self::new(0, Verdict::Unknown, 0.0);
        a.flags.push(reason.into());
        a
    }

    /// Parser returned no result for a non-length reason.
    pub fn unparseable() -> Self {
        let mut a = Self::new(0, Verdict::Unknown, 0.0);
        a.flags.push("Invalid or unsupported URL format".to_string());
        a
    }

    /// Defensive catch-all for an unexpected internal fault.
    ///
    /// No fault detail is exposed; the URL is treated as suspicious.
    pub fn analysis_error() -> Self {
        let mut a = Self::new(50, Verdict::Unknown, 0.3);
        a.flags.push("Analysis error - treating as suspicious".to_string());
        a
    }

    /// Add a flag
    pub fn with_flag<S: Into<String>>(mut self, flag: S) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Add several flags, preserving order
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Attach the score breakdown
    pub fn with_details(mut self, details: ScoreBreakdown) -> Self {
        self.details = details;
        self
    }

    /// Whether the analysis completed (verdict is not `Unknown`)
    pub fn is_conclusive(&self) -> bool {
        self.verdict != Verdict::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_serialization() {
        assert_eq!(serde_json::to_string(&Verdict::Safe).unwrap(), "\"SAFE\"");
        assert_eq!(
            serde_json::to_string(&Verdict::Malicious).unwrap(),
            "\"MALICIOUS\""
        );
        assert_eq!(Verdict::Suspicious.as_str(), "SUSPICIOUS");
    }

    #[test]
    fn test_invalid_input() {
        let a = Assessment::invalid_input("URL is empty");
        assert_eq!(a.verdict, Verdict::Unknown);
        assert_eq!(a.score, 0);
        assert_eq!(a.confidence, 0.0);
        assert_eq!(a.flags, vec!["URL is empty".to_string()]);
        assert!(!a.is_conclusive());
    }

    #[test]
    fn test_analysis_error() {
        let a = Assessment::analysis_error();
        assert_eq!(a.score, 50);
        assert_eq!(a.confidence, 0.3);
        assert_eq!(a.flags.len(), 1);
    }

    #[test]
    fn test_score_clamped() {
        let a = Assessment::new(150, Verdict::Malicious, 0.9);
        assert_eq!(a.score, 100);
    }

    #[test]
    fn test_builder() {
        let a = Assessment::new(40, Verdict::Suspicious, 0.6)
            .with_flag("first")
            .with_flags(["second", "third"]);
        assert_eq!(a.flags, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_round_trip_json() {
        let mut details = ScoreBreakdown::default();
        details.rule_hits.insert("HTTP_NOT_HTTPS".to_string(), 30.0);
        let a = Assessment::new(40, Verdict::Suspicious, 0.6).with_details(details);

        let json = serde_json::to_string(&a).unwrap();
        let back: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
