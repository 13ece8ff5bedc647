//! Brand impersonation detection
//!
//! Two complementary detectors share this module:
//! - the static detector below, driven by the bundled [`database`] of
//!   known brands and their observed squatting patterns
//! - [`dynamic`], which scores impersonation *shapes* (trust words,
//!   urgency, hyphen patterns) for brands the database does not know
//!
//! Match types are checked in a fixed order per brand and the first hit
//! wins; the first matching brand is the only one reported.

pub mod database;
pub mod dynamic;
pub mod levenshtein;

use crate::parser::ParsedUrl;
use database::{Brand, BrandCategory, BRANDS};
use serde::{Deserialize, Serialize};
use url_shield_core::{AnalysisConfig, Analyzer};

/// How a brand was recognized in a hostile host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrandMatchType {
    ExactInSubdomain,
    Typosquat,
    Homograph,
    ComboSquat,
    FuzzyMatch,
}

impl BrandMatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactInSubdomain => "EXACT_IN_SUBDOMAIN",
            Self::Typosquat => "TYPOSQUAT",
            Self::Homograph => "HOMOGRAPH",
            Self::ComboSquat => "COMBO_SQUAT",
            Self::FuzzyMatch => "FUZZY_MATCH",
        }
    }

    /// Score contributed by this match type.
    pub fn score(&self) -> f64 {
        match self {
            Self::Homograph => 40.0,
            Self::Typosquat => 35.0,
            Self::ExactInSubdomain => 30.0,
            Self::ComboSquat => 25.0,
            Self::FuzzyMatch => 20.0,
        }
    }
}

/// A detected impersonation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandMatch {
    pub brand: String,
    pub match_type: BrandMatchType,
    pub matched_pattern: String,
    pub category: BrandCategory,
}

/// Static detector result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrandResult {
    pub score: f64,
    pub matched: Option<BrandMatch>,
}

/// Static brand impersonation detector
pub struct BrandDetector<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> BrandDetector<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    fn check_brand(&self, brand: &Brand, parsed: &ParsedUrl) -> Option<BrandMatch> {
        let host = parsed.host.as_str();

        // Official domains are exempt, full stop.
        if brand
            .official_domains
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{d}")))
        {
            return None;
        }

        let found = |match_type, pattern: &str| {
            Some(BrandMatch {
                brand: brand.name.to_string(),
                match_type,
                matched_pattern: pattern.to_string(),
                category: brand.category,
            })
        };

        // 1. Brand name sitting in the subdomain portion of a deeper host.
        if host.split('.').count() >= 3
            && parsed.subdomains.iter().any(|label| label.contains(brand.name))
        {
            return found(BrandMatchType::ExactInSubdomain, brand.name);
        }

        // 2. Lookalike code points.
        for pattern in brand.homographs {
            if host.contains(&pattern.to_lowercase()) {
                return found(BrandMatchType::Homograph, pattern);
            }
        }

        // 3. Known misspellings.
        for pattern in brand.typosquats {
            if host.contains(pattern) {
                return found(BrandMatchType::Typosquat, pattern);
            }
        }

        // 4. Brand + emotive keyword concatenations.
        for pattern in brand.combosquats {
            if host.contains(pattern) {
                return found(BrandMatchType::ComboSquat, pattern);
            }
        }

        // 5. Bounded edit distance against the second-level label.
        let candidate = parsed
            .registrable_domain
            .split('.')
            .next()
            .unwrap_or_default();
        let max_distance = self.config.max_typosquat_distance;
        let min_brand_len = self.config.min_brand_length_for_fuzzy;
        if brand.name.len() >= min_brand_len
            && candidate.chars().count().abs_diff(brand.name.len()) <= 2
        {
            let distance = levenshtein::bounded_distance(candidate, brand.name);
            if (1..=max_distance).contains(&distance) {
                return found(BrandMatchType::FuzzyMatch, brand.name);
            }
        }

        None
    }
}

impl Analyzer for BrandDetector<'_> {
    type Input = ParsedUrl;
    type Output = BrandResult;

    fn name(&self) -> &'static str {
        "brand_detector"
    }

    fn description(&self) -> &'static str {
        "Detects impersonation of known brands via squatting patterns"
    }

    fn analyze(&self, parsed: &ParsedUrl) -> BrandResult {
        for brand in BRANDS {
            if let Some(matched) = self.check_brand(brand, parsed) {
                tracing::debug!(
                    brand = %matched.brand,
                    match_type = matched.match_type.as_str(),
                    "brand impersonation detected"
                );
                return BrandResult {
                    score: matched.match_type.score(),
                    matched: Some(matched),
                };
            }
        }
        BrandResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn detect(url: &str) -> BrandResult {
        let config = AnalysisConfig::default();
        let parsed = parse(url).expect("test url must parse");
        BrandDetector::new(&config).analyze(&parsed)
    }

    #[test]
    fn test_official_domain_is_exempt() {
        assert!(detect("https://www.paypal.com/login").matched.is_none());
        assert!(detect("https://commbank.com.au").matched.is_none());
        assert!(detect("https://mail.google.com").matched.is_none());
    }

    #[test]
    fn test_typosquat() {
        let result = detect("http://paypa1.com/login");
        let matched = result.matched.unwrap();
        assert_eq!(matched.brand, "paypal");
        assert_eq!(matched.match_type, BrandMatchType::Typosquat);
        assert_eq!(result.score, 35.0);
    }

    #[test]
    fn test_homograph() {
        // Cyrillic "а" in place of Latin "a"
        let result = detect("https://pаypal.com/");
        let matched = result.matched.unwrap();
        assert_eq!(matched.match_type, BrandMatchType::Homograph);
        assert_eq!(result.score, 40.0);
    }

    #[test]
    fn test_exact_in_subdomain() {
        let result = detect("https://paypal.evil-host.com/");
        let matched = result.matched.unwrap();
        assert_eq!(matched.brand, "paypal");
        assert_eq!(matched.match_type, BrandMatchType::ExactInSubdomain);
        assert_eq!(result.score, 30.0);
    }

    #[test]
    fn test_combosquat() {
        let result = detect("https://paypal-secure.tk/");
        let matched = result.matched.unwrap();
        assert_eq!(matched.match_type, BrandMatchType::ComboSquat);
        assert_eq!(result.score, 25.0);
    }

    #[test]
    fn test_fuzzy_match_distance_two() {
        // "payqql" is distance 2 from "paypal" and matches nothing static
        let result = detect("https://payqql.com/");
        let matched = result.matched.unwrap();
        assert_eq!(matched.brand, "paypal");
        assert_eq!(matched.match_type, BrandMatchType::FuzzyMatch);
        assert_eq!(result.score, 20.0);
    }

    #[test]
    fn test_fuzzy_match_distance_three_is_ignored() {
        assert!(detect("https://pyyqql.com/").matched.is_none());
    }

    #[test]
    fn test_short_brands_never_fuzzy_match() {
        // "nav.com" is distance 1 from "nab" but the brand is too short
        assert!(detect("https://nav.com/").matched.is_none());
    }

    #[test]
    fn test_unrelated_host_is_clean() {
        assert!(detect("https://example.com/").matched.is_none());
        assert!(detect("https://news.ycombinator.com/").matched.is_none());
    }

    #[test]
    fn test_first_matching_brand_wins() {
        // Subdomain names two brands; only one match is reported.
        let result = detect("https://paypal.google-fake.net/");
        assert!(result.matched.is_some());
    }

    #[test]
    fn test_category_per_brand() {
        let result = detect("https://mygov-refund.top/");
        let matched = result.matched.unwrap();
        assert_eq!(matched.brand, "mygov");
        assert_eq!(matched.category, BrandCategory::Government);
    }
}
