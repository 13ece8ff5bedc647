//! Dynamic brand discovery
//!
//! Catches impersonation of brands the static database does not know by
//! scoring the *shape* of the host: trust-word padding, account-action
//! verbs, urgency vocabulary, brand-like subdomains and hyphen patterns.
//! The capped sum keeps this engine from ever outweighing a concrete
//! database match on its own.

use crate::parser::ParsedUrl;
use crate::tables::{
    ACTION_WORDS, COMMON_INFRA_SUBDOMAINS, TRUST_WORDS, URGENCY_MATCHER, URGENCY_WORDS,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url_shield_core::Analyzer;

/// Ceiling for the capped sum of all dynamic findings.
pub const MAX_BRAND_SCORE: f64 = 45.0;

const TRUST_WORD_WEIGHT: f64 = 8.0;
const TRUST_WORD_MAX_HITS: usize = 2;
const ACTION_WORD_WEIGHT: f64 = 10.0;
const URGENCY_WEIGHT: f64 = 12.0;
const BRAND_LIKE_SUBDOMAIN_WEIGHT: f64 = 6.0;
const HYPHEN_PATTERN_WEIGHT: f64 = 15.0;
const MANY_HYPHENS_WEIGHT: f64 = 8.0;
const IMPERSONATION_STRUCTURE_WEIGHT: f64 = 10.0;

// Anchored; the alternation is a fixed word set, no nested repetition.
static HYPHEN_LURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]+-(secure|login|verify|update|confirm|official|support|help)\.").unwrap()
});

/// Kind of dynamic impersonation signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    TrustWordAbuse,
    ActionWordInDomain,
    UrgencyPattern,
    BrandLikeSubdomain,
    SuspiciousHyphenPattern,
    ImpersonationStructure,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrustWordAbuse => "TRUST_WORD_ABUSE",
            Self::ActionWordInDomain => "ACTION_WORD_IN_DOMAIN",
            Self::UrgencyPattern => "URGENCY_PATTERN",
            Self::BrandLikeSubdomain => "BRAND_LIKE_SUBDOMAIN",
            Self::SuspiciousHyphenPattern => "SUSPICIOUS_HYPHEN_PATTERN",
            Self::ImpersonationStructure => "IMPERSONATION_STRUCTURE",
        }
    }
}

/// One dynamic signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub detail: String,
    pub weight: f64,
    /// Populated by [`FindingKind::BrandLikeSubdomain`]
    pub suggested_brand: Option<String>,
}

/// Dynamic discovery result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DynamicBrandResult {
    /// Capped sum of finding weights, 0..=[`MAX_BRAND_SCORE`]
    pub score: f64,
    pub findings: Vec<Finding>,
}

/// Heuristic discovery of impersonation for unknown brands
pub struct DynamicBrandDetector;

impl DynamicBrandDetector {
    pub fn new() -> Self {
        Self
    }

    fn trust_word_findings(&self, parsed: &ParsedUrl, findings: &mut Vec<Finding>) {
        let mut hits = 0;
        for label in parsed.host.split('.') {
            for word in TRUST_WORDS {
                if !label.contains(word) {
                    continue;
                }
                // A plain `<word>.com` registration is a legitimate site,
                // not an abuse of the word.
                if parsed.host == format!("{word}.com")
                    || parsed.host.ends_with(&format!(".{word}.com"))
                {
                    continue;
                }
                findings.push(Finding {
                    kind: FindingKind::TrustWordAbuse,
                    detail: format!("trust word \"{word}\" in host label \"{label}\""),
                    weight: TRUST_WORD_WEIGHT,
                    suggested_brand: None,
                });
                hits += 1;
                if hits >= TRUST_WORD_MAX_HITS {
                    return;
                }
            }
        }
    }

    fn action_word_finding(&self, parsed: &ParsedUrl) -> Option<Finding> {
        ACTION_WORDS
            .iter()
            .find(|word| parsed.host.contains(*word))
            .map(|word| Finding {
                kind: FindingKind::ActionWordInDomain,
                detail: format!("account-action word \"{word}\" in domain"),
                weight: ACTION_WORD_WEIGHT,
                suggested_brand: None,
            })
    }

    fn urgency_finding(&self, parsed: &ParsedUrl) -> Option<Finding> {
        let haystack = parsed.original.to_lowercase();
        let mut seen = [false; 16];
        for m in URGENCY_MATCHER.find_overlapping_iter(&haystack) {
            seen[m.pattern().as_usize()] = true;
        }
        let distinct = seen.iter().filter(|&&b| b).count();
        if distinct < 2 {
            return None;
        }
        let words: Vec<&str> = URGENCY_WORDS
            .iter()
            .enumerate()
            .filter(|(i, _)| seen[*i])
            .map(|(_, w)| *w)
            .collect();
        Some(Finding {
            kind: FindingKind::UrgencyPattern,
            detail: format!("urgency vocabulary in URL: {}", words.join(", ")),
            weight: URGENCY_WEIGHT,
            suggested_brand: None,
        })
    }

    fn brand_like_subdomain_finding(&self, parsed: &ParsedUrl) -> Option<Finding> {
        parsed
            .subdomains
            .iter()
            .find(|label| {
                (4..=15).contains(&label.len())
                    && label.chars().all(|c| c.is_ascii_alphabetic())
                    && !COMMON_INFRA_SUBDOMAINS.contains(&label.as_str())
            })
            .map(|label| Finding {
                kind: FindingKind::BrandLikeSubdomain,
                detail: format!("subdomain \"{label}\" resembles a brand name"),
                weight: BRAND_LIKE_SUBDOMAIN_WEIGHT,
                suggested_brand: Some(label.clone()),
            })
    }

    fn hyphen_finding(&self, parsed: &ParsedUrl) -> Option<Finding> {
        if HYPHEN_LURE_PATTERN.is_match(&parsed.host) {
            return Some(Finding {
                kind: FindingKind::SuspiciousHyphenPattern,
                detail: "host leads with a hyphenated lure word".to_string(),
                weight: HYPHEN_PATTERN_WEIGHT,
                suggested_brand: None,
            });
        }
        if parsed.host.matches('-').count() >= 3 {
            return Some(Finding {
                kind: FindingKind::SuspiciousHyphenPattern,
                detail: "host contains three or more hyphens".to_string(),
                weight: MANY_HYPHENS_WEIGHT,
                suggested_brand: None,
            });
        }
        None
    }

    fn impersonation_structure_finding(&self, parsed: &ParsedUrl) -> Option<Finding> {
        if parsed.subdomains.len() < 2 {
            return None;
        }
        let deepest = parsed.subdomains.first()?;
        if deepest.len() >= 4 && deepest.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Finding {
                kind: FindingKind::ImpersonationStructure,
                detail: format!("deep subdomain nesting led by \"{deepest}\""),
                weight: IMPERSONATION_STRUCTURE_WEIGHT,
                suggested_brand: None,
            })
        } else {
            None
        }
    }
}

impl Default for DynamicBrandDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for DynamicBrandDetector {
    type Input = ParsedUrl;
    type Output = DynamicBrandResult;

    fn name(&self) -> &'static str {
        "dynamic_brand_detector"
    }

    fn description(&self) -> &'static str {
        "Scores impersonation patterns for brands outside the database"
    }

    fn analyze(&self, parsed: &ParsedUrl) -> DynamicBrandResult {
        let mut findings = Vec::new();

        self.trust_word_findings(parsed, &mut findings);
        findings.extend(self.action_word_finding(parsed));
        findings.extend(self.urgency_finding(parsed));
        findings.extend(self.brand_like_subdomain_finding(parsed));
        findings.extend(self.hyphen_finding(parsed));
        findings.extend(self.impersonation_structure_finding(parsed));

        let score = findings
            .iter()
            .map(|f| f.weight)
            .sum::<f64>()
            .min(MAX_BRAND_SCORE);

        DynamicBrandResult { score, findings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn discover(url: &str) -> DynamicBrandResult {
        DynamicBrandDetector::new().analyze(&parse(url).expect("test url must parse"))
    }

    fn has_kind(result: &DynamicBrandResult, kind: FindingKind) -> bool {
        result.findings.iter().any(|f| f.kind == kind)
    }

    #[test]
    fn test_clean_host_scores_zero() {
        let result = discover("https://example.com/");
        assert_eq!(result.score, 0.0);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_trust_word_abuse_capped_at_two() {
        let result = discover("https://secure-login-verify.example.tk/");
        let trust_hits = result
            .findings
            .iter()
            .filter(|f| f.kind == FindingKind::TrustWordAbuse)
            .count();
        assert_eq!(trust_hits, 2);
        assert!(has_kind(&result, FindingKind::ActionWordInDomain));
        // 2 * 8 + 10
        assert_eq!(result.score, 26.0);
    }

    #[test]
    fn test_trust_word_excludes_plain_word_dot_com() {
        let result = discover("https://www.secure.com/");
        assert!(!has_kind(&result, FindingKind::TrustWordAbuse));
    }

    #[test]
    fn test_action_word_single_hit() {
        let result = discover("https://signin-helpdesk.net/");
        let action_hits = result
            .findings
            .iter()
            .filter(|f| f.kind == FindingKind::ActionWordInDomain)
            .count();
        assert_eq!(action_hits, 1);
    }

    #[test]
    fn test_urgency_needs_two_distinct_words() {
        assert!(!has_kind(
            &discover("https://example.com/urgent-news"),
            FindingKind::UrgencyPattern
        ));
        assert!(has_kind(
            &discover("https://example.com/urgent?reason=account-locked"),
            FindingKind::UrgencyPattern
        ));
    }

    #[test]
    fn test_brand_like_subdomain() {
        let result = discover("https://netbank.hosting-park.info/");
        let finding = result
            .findings
            .iter()
            .find(|f| f.kind == FindingKind::BrandLikeSubdomain)
            .unwrap();
        assert_eq!(finding.suggested_brand.as_deref(), Some("netbank"));
    }

    #[test]
    fn test_infra_subdomains_are_not_brand_like() {
        assert!(!has_kind(
            &discover("https://mail.example.com/"),
            FindingKind::BrandLikeSubdomain
        ));
    }

    #[test]
    fn test_hyphen_lure_pattern() {
        let result = discover("https://bank-secure.top/");
        let finding = result
            .findings
            .iter()
            .find(|f| f.kind == FindingKind::SuspiciousHyphenPattern)
            .unwrap();
        assert_eq!(finding.weight, 15.0);
    }

    #[test]
    fn test_many_hyphens_fallback() {
        let result = discover("https://cheap-deals-for-you.net/");
        let finding = result
            .findings
            .iter()
            .find(|f| f.kind == FindingKind::SuspiciousHyphenPattern)
            .unwrap();
        assert_eq!(finding.weight, 8.0);
    }

    #[test]
    fn test_impersonation_structure() {
        let result = discover("https://netbank.session.host-zone.biz/");
        assert!(has_kind(&result, FindingKind::ImpersonationStructure));
    }

    #[test]
    fn test_score_is_capped() {
        let result =
            discover("https://secure-verify-login-update.account.banking-alerts-now.tk/urgent?x=locked");
        assert!(result.score <= MAX_BRAND_SCORE);
        assert!(result.findings.len() >= 4);
    }
}
