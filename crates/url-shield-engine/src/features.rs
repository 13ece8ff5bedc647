//! Feature extraction for the ML scorer
//!
//! Turns a parsed URL into a fixed 15-element vector. Indices are part of
//! the model contract: the bundled coefficient vector in [`crate::model`]
//! is ordered by these constants, so reordering them is a breaking
//! change to the calibration artifact.
//!
//! Every feature is normalized into [0, 1]: lengths divide by their
//! declared maxima, counts divide by 10, ratios are computed over the
//! original string, booleans are 0/1.

use crate::brand::database::BRANDS;
use crate::parser::{self, ParsedUrl};
use crate::redirect::RedirectAnalyzer;
use url_shield_core::Analyzer;

pub const URL_LENGTH: usize = 0;
pub const HOST_LENGTH: usize = 1;
pub const PATH_LENGTH: usize = 2;
pub const QUERY_LENGTH: usize = 3;
pub const DOT_COUNT: usize = 4;
pub const DIGIT_RATIO: usize = 5;
pub const SPECIAL_CHAR_RATIO: usize = 6;
pub const ENTROPY: usize = 7;
pub const HAS_IP: usize = 8;
pub const HAS_AT_SYMBOL: usize = 9;
pub const HAS_REDIRECT: usize = 10;
pub const SUBDOMAIN_COUNT: usize = 11;
pub const PATH_DEPTH: usize = 12;
pub const IS_HTTPS: usize = 13;
pub const HAS_BRAND_KEYWORD: usize = 14;

/// Number of features in the vector.
pub const FEATURE_COUNT: usize = 15;

/// Fixed-size feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    data: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new() -> Self {
        Self {
            data: [0.0; FEATURE_COUNT],
        }
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.data[index] = value.clamp(0.0, 1.0);
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.data.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Dot product against a coefficient slice of the same length.
    pub fn dot(&self, weights: &[f64; FEATURE_COUNT]) -> f64 {
        self.data
            .iter()
            .zip(weights.iter())
            .map(|(x, w)| x * w)
            .sum()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the model's feature vector from a parsed URL
///
/// The `HAS_REDIRECT` feature is the redirect-pattern analyzer's verdict;
/// when the caller has already run that engine, pass its result in via
/// [`FeatureExtractor::with_redirect_indicator`] instead of paying for a
/// second pass.
pub struct FeatureExtractor {
    redirect_indicator: Option<bool>,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            redirect_indicator: None,
        }
    }

    /// Reuse an already-computed redirect analysis.
    pub fn with_redirect_indicator(has_redirect: bool) -> Self {
        Self {
            redirect_indicator: Some(has_redirect),
        }
    }

    fn has_redirect_indicator(&self, parsed: &ParsedUrl) -> bool {
        self.redirect_indicator.unwrap_or_else(|| {
            RedirectAnalyzer::new()
                .analyze(&parsed.original)
                .has_redirect_indicators
        })
    }

    /// Brand name in the host while the registrable domain is not one of
    /// that brand's official domains.
    fn has_brand_keyword(parsed: &ParsedUrl) -> bool {
        BRANDS.iter().any(|brand| {
            parsed.host.contains(brand.name)
                && !brand
                    .official_domains
                    .contains(&parsed.registrable_domain.as_str())
        })
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for FeatureExtractor {
    type Input = ParsedUrl;
    type Output = FeatureVector;

    fn name(&self) -> &'static str {
        "feature_extractor"
    }

    fn description(&self) -> &'static str {
        "Builds the normalized 15-feature vector for the ML scorer"
    }

    fn analyze(&self, parsed: &ParsedUrl) -> FeatureVector {
        let mut x = FeatureVector::new();
        let url = parsed.original.as_str();
        let url_chars = url.chars().count().max(1) as f64;

        x.set(URL_LENGTH, url.len() as f64 / parser::MAX_URL_LENGTH as f64);
        x.set(HOST_LENGTH, parsed.host.len() as f64 / 253.0);
        x.set(PATH_LENGTH, parsed.path.len() as f64 / parser::MAX_PATH_LENGTH as f64);
        x.set(
            QUERY_LENGTH,
            parsed.query.as_deref().map_or(0, str::len) as f64 / parser::MAX_QUERY_LENGTH as f64,
        );
        x.set(
            DOT_COUNT,
            parsed.host.matches('.').count() as f64 / 10.0,
        );
        x.set(
            DIGIT_RATIO,
            url.chars().filter(|c| c.is_ascii_digit()).count() as f64 / url_chars,
        );
        x.set(
            SPECIAL_CHAR_RATIO,
            url.chars().filter(|c| !c.is_alphanumeric()).count() as f64 / url_chars,
        );
        x.set(ENTROPY, parser::shannon_entropy(&parsed.host) / 8.0);
        x.set(HAS_IP, parsed.is_ip_host() as u8 as f64);
        x.set(
            HAS_AT_SYMBOL,
            parser::at_symbol_in_authority(url) as u8 as f64,
        );
        x.set(
            HAS_REDIRECT,
            self.has_redirect_indicator(parsed) as u8 as f64,
        );
        x.set(SUBDOMAIN_COUNT, parsed.subdomain_depth as f64 / 10.0);
        x.set(
            PATH_DEPTH,
            parsed.path.split('/').filter(|s| !s.is_empty()).count() as f64 / 10.0,
        );
        x.set(IS_HTTPS, parsed.is_secure() as u8 as f64);
        x.set(
            HAS_BRAND_KEYWORD,
            Self::has_brand_keyword(parsed) as u8 as f64,
        );

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn extract(url: &str) -> FeatureVector {
        FeatureExtractor::new().analyze(&parse(url).expect("test url must parse"))
    }

    #[test]
    fn test_all_features_in_unit_interval() {
        for url in [
            "https://www.google.com",
            "http://192.168.1.100:8080/paypal/login",
            "https://google.com@evil-site.tk/",
            "https://a.b.c.d.e.f.example.xyz/deep/path/here?q=1&token=x",
        ] {
            let x = extract(url);
            for i in 0..FEATURE_COUNT {
                let v = x.get(i);
                assert!((0.0..=1.0).contains(&v), "feature {i} = {v} for {url}");
            }
        }
    }

    #[test]
    fn test_boolean_features() {
        let x = extract("http://192.168.1.100:8080/paypal/login");
        assert_eq!(x.get(HAS_IP), 1.0);
        assert_eq!(x.get(IS_HTTPS), 0.0);

        let x = extract("https://google.com@evil-site.tk/");
        assert_eq!(x.get(HAS_AT_SYMBOL), 1.0);
        assert_eq!(x.get(IS_HTTPS), 1.0);
    }

    #[test]
    fn test_redirect_feature_delegates_to_redirect_analyzer() {
        assert_eq!(
            extract("https://example.com/out?redirect=https://evil.net").get(HAS_REDIRECT),
            1.0
        );
        // shortener hosts carry redirect intent even without a query
        assert_eq!(extract("https://bit.ly/3xYz123").get(HAS_REDIRECT), 1.0);
        assert_eq!(extract("https://example.com/?q=1").get(HAS_REDIRECT), 0.0);
    }

    #[test]
    fn test_redirect_indicator_override() {
        let parsed = parse("https://example.com/?q=1").unwrap();
        let x = FeatureExtractor::with_redirect_indicator(true).analyze(&parsed);
        assert_eq!(x.get(HAS_REDIRECT), 1.0);
    }

    #[test]
    fn test_brand_keyword_exempts_official_domains() {
        assert_eq!(extract("https://www.google.com").get(HAS_BRAND_KEYWORD), 0.0);
        assert_eq!(
            extract("https://google.account-check.net/").get(HAS_BRAND_KEYWORD),
            1.0
        );
    }

    #[test]
    fn test_path_depth() {
        let x = extract("https://example.com/a/b/c");
        assert_eq!(x.get(PATH_DEPTH), 0.3);
        assert_eq!(extract("https://example.com/").get(PATH_DEPTH), 0.0);
    }

    #[test]
    fn test_subdomain_count() {
        assert_eq!(extract("https://a.b.example.com/").get(SUBDOMAIN_COUNT), 0.2);
    }

    #[test]
    fn test_out_of_range_index_reads_zero() {
        let x = FeatureVector::new();
        assert_eq!(x.get(99), 0.0);
    }
}
