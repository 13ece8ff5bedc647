//! Static redirect-pattern analysis
//!
//! Detects the *intent* to redirect from the URL string alone: shortener
//! domains, embedded URLs, forwarding parameters, tracker infrastructure
//! and double encoding. No network hop is ever followed; the final
//! destination is always reported as unknown.

use crate::tables::{REDIRECT_PARAM_KEYS, SHORTENER_DOMAINS, TRACKER_SUBSTRINGS};
use serde::{Deserialize, Serialize};
use url_shield_core::Analyzer;

/// Ceiling for the redirect score.
pub const MAX_REDIRECT_SCORE: f64 = 40.0;
/// Embedded URLs examined beyond the initial one.
const MAX_EMBEDDED_URLS: usize = 3;
/// Hop URLs are truncated to this many bytes.
const MAX_HOP_URL_LEN: usize = 80;

const SHORTENER_WEIGHT: f64 = 15.0;
const EMBEDDED_WEIGHT: f64 = 20.0;
const REDIRECT_PARAM_WEIGHT: f64 = 10.0;
const TRACKER_WEIGHT: f64 = 5.0;
const DOUBLE_ENCODING_WEIGHT: f64 = 15.0;

/// Stage of an inferred redirect chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HopKind {
    Initial,
    Shortener,
    Embedded,
    Tracker,
    Unknown,
}

/// Risk attributed to a hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HopRisk {
    Low,
    Medium,
    High,
    Critical,
}

/// One inferred hop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectHop {
    pub kind: HopKind,
    pub url: String,
    pub risk: HopRisk,
}

/// Result of static redirect-pattern analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RedirectAnalysis {
    pub has_redirect_indicators: bool,
    /// Capped sum of detector weights, 0..=[`MAX_REDIRECT_SCORE`]
    pub score: f64,
    pub chain: Vec<RedirectHop>,
    pub warnings: Vec<String>,
}

fn truncate_hop(url: &str) -> String {
    let mut end = url.len().min(MAX_HOP_URL_LEN);
    while end > 0 && !url.is_char_boundary(end) {
        end -= 1;
    }
    url[..end].to_string()
}

/// Static redirect-pattern analyzer
pub struct RedirectAnalyzer;

impl RedirectAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn query_of(url: &str) -> Option<&str> {
        let q = url.find('?')? + 1;
        let end = url[q..].find('#').map(|i| q + i).unwrap_or(url.len());
        Some(&url[q..end])
    }

    /// Full `http(s)://` substrings inside the query string. The query
    /// never contains the initial URL's own scheme, so every hit here is
    /// a smuggled destination.
    fn embedded_urls(query: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut search_from = 0usize;
        while let Some(rel) = query[search_from..].find("http") {
            let start = search_from + rel;
            let rest = &query[start..];
            let scheme_len = if rest.starts_with("https://") {
                8
            } else if rest.starts_with("http://") {
                7
            } else {
                search_from = start + 4;
                continue;
            };
            let end = rest.find(['&', '#', ' ']).unwrap_or(rest.len());
            found.push(truncate_hop(&rest[..end]));
            if found.len() >= MAX_EMBEDDED_URLS {
                break;
            }
            search_from = start + scheme_len;
        }
        found
    }
}

impl Default for RedirectAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for RedirectAnalyzer {
    type Input = str;
    type Output = RedirectAnalysis;

    fn name(&self) -> &'static str {
        "redirect_analyzer"
    }

    fn description(&self) -> &'static str {
        "Infers redirect intent from the URL string without any network hop"
    }

    fn analyze(&self, url: &str) -> RedirectAnalysis {
        let url_lower = url.to_lowercase();
        let mut score = 0.0;
        let mut chain = vec![RedirectHop {
            kind: HopKind::Initial,
            url: truncate_hop(url),
            risk: HopRisk::Low,
        }];
        let mut warnings = Vec::new();

        if let Some(domain) = SHORTENER_DOMAINS.iter().find(|d| url_lower.contains(*d)) {
            score += SHORTENER_WEIGHT;
            chain.push(RedirectHop {
                kind: HopKind::Shortener,
                url: domain.to_string(),
                risk: HopRisk::Medium,
            });
            warnings.push(format!("URL involves the link shortener {domain}"));
        }

        let embedded = Self::query_of(&url_lower)
            .map(Self::embedded_urls)
            .unwrap_or_default();
        for embedded in embedded {
            score += EMBEDDED_WEIGHT;
            warnings.push(format!("URL embeds another URL: {embedded}"));
            chain.push(RedirectHop {
                kind: HopKind::Embedded,
                url: embedded,
                risk: HopRisk::High,
            });
        }

        if let Some(query) = Self::query_of(&url_lower) {
            let has_redirect_key = query
                .split('&')
                .filter_map(|pair| pair.split('=').next())
                .any(|key| REDIRECT_PARAM_KEYS.contains(&key));
            if has_redirect_key {
                score += REDIRECT_PARAM_WEIGHT;
                warnings.push("Query carries a forwarding destination parameter".to_string());
            }
        }

        if let Some(tracker) = TRACKER_SUBSTRINGS.iter().find(|t| url_lower.contains(*t)) {
            score += TRACKER_WEIGHT;
            chain.push(RedirectHop {
                kind: HopKind::Tracker,
                url: tracker.to_string(),
                risk: HopRisk::Low,
            });
            warnings.push("URL passes through click-tracking infrastructure".to_string());
        }

        if ["%25", "%252f", "%253a"].iter().any(|p| url_lower.contains(p)) {
            score += DOUBLE_ENCODING_WEIGHT;
            warnings.push("URL uses double percent-encoding".to_string());
        }

        if chain.len() > 1 {
            chain.push(RedirectHop {
                kind: HopKind::Unknown,
                url: "unknown destination".to_string(),
                risk: HopRisk::Critical,
            });
        }

        let score = score.min(MAX_REDIRECT_SCORE);
        RedirectAnalysis {
            has_redirect_indicators: score > 0.0,
            score,
            chain,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(url: &str) -> RedirectAnalysis {
        RedirectAnalyzer::new().analyze(url)
    }

    #[test]
    fn test_clean_url() {
        let result = analyze("https://example.com/page");
        assert!(!result.has_redirect_indicators);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.chain.len(), 1);
        assert_eq!(result.chain[0].kind, HopKind::Initial);
    }

    #[test]
    fn test_shortener_hop() {
        let result = analyze("https://bit.ly/3xYz123");
        assert!(result.has_redirect_indicators);
        assert_eq!(result.score, 15.0);
        assert!(result.chain.iter().any(|h| h.kind == HopKind::Shortener));
        // final hop is the unknown destination
        assert_eq!(result.chain.last().unwrap().kind, HopKind::Unknown);
        assert_eq!(result.chain.last().unwrap().risk, HopRisk::Critical);
    }

    #[test]
    fn test_embedded_url() {
        let result = analyze("https://example.com/go?u=https://evil.net/páge&x=1");
        assert!(result.chain.iter().any(|h| h.kind == HopKind::Embedded));
        let embedded = result
            .chain
            .iter()
            .find(|h| h.kind == HopKind::Embedded)
            .unwrap();
        assert!(embedded.url.starts_with("https://evil.net"));
        assert!(embedded.url.len() <= 80);
    }

    #[test]
    fn test_embedded_url_in_path_only_is_not_flagged() {
        // the detector is scoped to the query string
        let result = analyze("https://example.com/go/https://evil.net/page");
        assert!(!result.chain.iter().any(|h| h.kind == HopKind::Embedded));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_embedded_urls_limited_to_three() {
        let url = "https://a.com/?a=http://b.com&b=http://c.com&c=http://d.com&d=http://e.com";
        let result = analyze(url);
        let embedded = result
            .chain
            .iter()
            .filter(|h| h.kind == HopKind::Embedded)
            .count();
        assert_eq!(embedded, 3);
    }

    #[test]
    fn test_redirect_param_key() {
        let result = analyze("https://example.com/out?redirect_url=/landing");
        assert!(result.has_redirect_indicators);
        assert_eq!(result.score, 10.0);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_redirect_key_must_be_a_key() {
        // "url" appearing as a value is not a forwarding parameter
        let result = analyze("https://example.com/?q=url");
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_tracker() {
        let result = analyze("https://click.mailer.example.net/c/abc");
        assert!(result.chain.iter().any(|h| h.kind == HopKind::Tracker));
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn test_double_encoding() {
        let result = analyze("https://example.com/r?u=%252Fadmin");
        assert!(result.has_redirect_indicators);
        assert!(result.warnings.iter().any(|w| w.contains("double")));
    }

    #[test]
    fn test_score_capped_at_forty() {
        let url = "https://bit.ly/r?redirect=%252F&u=https://a.tk&v=https://b.tk&w=https://c.tk";
        let result = analyze(url);
        assert_eq!(result.score, MAX_REDIRECT_SCORE);
    }
}
