//! TLD risk scoring
//!
//! Classifies the trailing host label against bundled risk tiers. Free
//! registration tiers score highest: they cost attackers nothing and
//! dominate observed phishing registrations. Country codes get a small
//! baseline; the unknown remainder sits in the middle.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use url_shield_core::Analyzer;

/// TLDs offered free of charge and heavily abused.
static FREE_HIGH_RISK_TLDS: &[&str] = &[
    "tk", "ml", "ga", "cf", "gq", "buzz", "top", "work", "surf", "monster", "ooo", "rest", "bar",
];

/// Paid but disproportionately abused TLDs.
static ABUSED_TLDS: &[&str] = &[
    "xyz", "icu", "club", "online", "site", "vip", "live", "click", "link", "space", "fun",
    "host", "website", "store", "cam", "quest", "sbs", "beauty", "hair", "skin", "makeup",
    "loan", "loans", "bid", "stream", "download", "racing", "win", "review", "party",
    "science", "trade", "date", "faith",
];

/// Mixed-reputation TLDs.
static MODERATE_RISK_TLDS: &[&str] = &[
    "io", "co", "me", "biz", "info", "cc", "tv", "ws", "mobi", "pro", "name", "asia", "in",
    "tech", "cloud", "digital", "media", "studio",
];

/// Established TLDs with vetting or long reputations.
static SAFE_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "app", "dev", "page", "new", "google", "amazon",
    "apple", "microsoft", "int", "coop", "museum", "aero", "jobs", "travel",
];

static FREE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| FREE_HIGH_RISK_TLDS.iter().copied().collect());
static ABUSED_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ABUSED_TLDS.iter().copied().collect());
static MODERATE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| MODERATE_RISK_TLDS.iter().copied().collect());
static SAFE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SAFE_TLDS.iter().copied().collect());

/// Risk tier of a TLD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TldRiskCategory {
    Safe,
    CountryCode,
    Moderate,
    HighRisk,
    FreeTier,
    /// No valid TLD (IP literals, malformed labels)
    Unknown,
}

impl TldRiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::CountryCode => "COUNTRY_CODE",
            Self::Moderate => "MODERATE",
            Self::HighRisk => "HIGH_RISK",
            Self::FreeTier => "FREE_TIER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// TLD classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TldResult {
    pub tld: String,
    pub score: f64,
    pub risk_category: TldRiskCategory,
    pub is_high_risk: bool,
}

impl Default for TldResult {
    fn default() -> Self {
        Self {
            tld: String::new(),
            score: 0.0,
            risk_category: TldRiskCategory::Unknown,
            is_high_risk: false,
        }
    }
}

/// TLD risk scorer
pub struct TldScorer;

impl TldScorer {
    pub fn new() -> Self {
        Self
    }

    /// Extract the trailing label from a URL or bare host.
    ///
    /// Strips protocol, userinfo, path, query, fragment and port, then
    /// takes whatever follows the last dot.
    pub fn extract_tld(input: &str) -> Option<String> {
        let s = input.trim();
        let s = match s.find("://") {
            Some(idx) => &s[idx + 3..],
            None => s,
        };
        let end = s.find(['/', '?', '#']).unwrap_or(s.len());
        let authority = &s[..end];
        let host = match authority.rfind('@') {
            Some(idx) => &authority[idx + 1..],
            None => authority,
        };
        // IPv6 literals and ports carry no scoreable TLD.
        if host.starts_with('[') {
            return None;
        }
        let host = match host.rfind(':') {
            Some(idx) if host[idx + 1..].bytes().all(|b| b.is_ascii_digit()) => &host[..idx],
            _ => host,
        };

        let label = host.rsplit('.').next()?.to_lowercase();
        if label.is_empty()
            || label.len() > 20
            || !label.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }
        Some(label)
    }

    /// Classify an already-extracted TLD.
    pub fn classify(tld: &str) -> TldResult {
        let tld_lower = tld.to_lowercase();
        let (score, risk_category, is_high_risk) = if FREE_SET.contains(tld_lower.as_str()) {
            (90.0, TldRiskCategory::FreeTier, true)
        } else if ABUSED_SET.contains(tld_lower.as_str()) {
            (75.0, TldRiskCategory::HighRisk, true)
        } else if MODERATE_SET.contains(tld_lower.as_str()) {
            (35.0, TldRiskCategory::Moderate, false)
        } else if SAFE_SET.contains(tld_lower.as_str()) {
            (0.0, TldRiskCategory::Safe, false)
        } else if tld_lower.len() == 2 {
            (15.0, TldRiskCategory::CountryCode, false)
        } else {
            (30.0, TldRiskCategory::Moderate, false)
        };

        TldResult {
            tld: tld_lower,
            score,
            risk_category,
            is_high_risk,
        }
    }
}

impl Default for TldScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for TldScorer {
    type Input = str;
    type Output = TldResult;

    fn name(&self) -> &'static str {
        "tld_scorer"
    }

    fn description(&self) -> &'static str {
        "Classifies the top-level domain into bundled risk tiers"
    }

    fn analyze(&self, input: &str) -> TldResult {
        match Self::extract_tld(input) {
            Some(tld) => Self::classify(&tld),
            None => TldResult::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(url: &str) -> TldResult {
        TldScorer::new().analyze(url)
    }

    #[test]
    fn test_free_tier() {
        let result = score("https://evil-site.tk/");
        assert_eq!(result.tld, "tk");
        assert_eq!(result.score, 90.0);
        assert_eq!(result.risk_category, TldRiskCategory::FreeTier);
        assert!(result.is_high_risk);
    }

    #[test]
    fn test_abused() {
        let result = score("http://deals.xyz");
        assert_eq!(result.score, 75.0);
        assert_eq!(result.risk_category, TldRiskCategory::HighRisk);
        assert!(result.is_high_risk);
    }

    #[test]
    fn test_moderate() {
        let result = score("https://startup.io/pitch");
        assert_eq!(result.score, 35.0);
        assert_eq!(result.risk_category, TldRiskCategory::Moderate);
        assert!(!result.is_high_risk);
    }

    #[test]
    fn test_safe() {
        let result = score("https://example.com");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.risk_category, TldRiskCategory::Safe);
    }

    #[test]
    fn test_country_code() {
        let result = score("https://shop.de/");
        assert_eq!(result.score, 15.0);
        assert_eq!(result.risk_category, TldRiskCategory::CountryCode);
    }

    #[test]
    fn test_unknown_long_tld_falls_back_to_moderate() {
        let result = score("https://example.unknownlabel/");
        assert_eq!(result.score, 30.0);
        assert_eq!(result.risk_category, TldRiskCategory::Moderate);
    }

    #[test]
    fn test_ip_host_has_no_tld() {
        let result = score("http://192.168.1.1:8080/login");
        assert_eq!(result, TldResult::default());
        assert_eq!(result.risk_category, TldRiskCategory::Unknown);
    }

    #[test]
    fn test_port_and_path_are_stripped() {
        let result = score("https://user@evil.top:8443/a?b=c#d");
        assert_eq!(result.tld, "top");
        assert_eq!(result.score, 90.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(score("https://EXAMPLE.COM").tld, "com");
    }
}
