//! Heuristics engine
//!
//! Seventeen weighted rules over the parsed URL. Each rule that fires
//! contributes its configured weight and a human-readable flag; the score
//! is the clamped sum. Rules are evaluated in a fixed order so flag
//! output is deterministic.

use crate::parser::{self, ParsedUrl};
use crate::tables::{COMMON_TLD_SEGMENTS, CREDENTIAL_PARAMS, RISKY_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url_shield_core::{AnalysisConfig, Analyzer, RuleWeights};

/// Ports that do not trigger the non-standard-port rule.
const STANDARD_PORTS: [u16; 4] = [80, 443, 8080, 8443];
/// URL length above which the long-URL rule applies.
const LONG_URL_THRESHOLD: usize = 250;
/// Tracking-parameter URLs below this length get the discounted weight.
const LONG_URL_TRACKING_LIMIT: usize = 400;
/// Discounted weight for long URLs explained by tracking parameters.
const LONG_URL_TRACKING_WEIGHT: f64 = 2.0;
/// Points per suspicious path keyword before the cap.
const PATH_KEYWORD_STEP: f64 = 5.0;
/// Minimum query length for payload inspection.
const ENCODED_PAYLOAD_MIN_QUERY: usize = 20;
/// Value length above which an exfiltration parameter is suspicious.
const EXFIL_VALUE_THRESHOLD: usize = 30;
/// Minimum run of base64-alphabet characters treated as a blob.
const BASE64_RUN_THRESHOLD: usize = 50;
/// Percent signs required before encoding density is considered.
const MIN_PERCENT_COUNT: usize = 5;

/// Identifier of a heuristic rule, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleId {
    HttpNotHttps,
    IpAddressHost,
    UrlShortener,
    ExcessiveSubdomains,
    NonStandardPort,
    LongUrl,
    HighEntropyHost,
    SuspiciousPathKeywords,
    CredentialParams,
    EncodedPayload,
    AtSymbolInjection,
    MultipleTldSegments,
    PunycodeDomain,
    NumericSubdomain,
    RiskyExtension,
    DoubleExtension,
    ExcessiveEncoding,
}

/// All rules in evaluation order.
pub const ALL_RULES: [RuleId; 17] = [
    RuleId::HttpNotHttps,
    RuleId::IpAddressHost,
    RuleId::UrlShortener,
    RuleId::ExcessiveSubdomains,
    RuleId::NonStandardPort,
    RuleId::LongUrl,
    RuleId::HighEntropyHost,
    RuleId::SuspiciousPathKeywords,
    RuleId::CredentialParams,
    RuleId::EncodedPayload,
    RuleId::AtSymbolInjection,
    RuleId::MultipleTldSegments,
    RuleId::PunycodeDomain,
    RuleId::NumericSubdomain,
    RuleId::RiskyExtension,
    RuleId::DoubleExtension,
    RuleId::ExcessiveEncoding,
];

impl RuleId {
    /// Stable identifier used in score breakdowns and counterfactuals.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HttpNotHttps => "HTTP_NOT_HTTPS",
            Self::IpAddressHost => "IP_ADDRESS_HOST",
            Self::UrlShortener => "URL_SHORTENER",
            Self::ExcessiveSubdomains => "EXCESSIVE_SUBDOMAINS",
            Self::NonStandardPort => "NON_STANDARD_PORT",
            Self::LongUrl => "LONG_URL",
            Self::HighEntropyHost => "HIGH_ENTROPY_HOST",
            Self::SuspiciousPathKeywords => "SUSPICIOUS_PATH_KEYWORDS",
            Self::CredentialParams => "CREDENTIAL_PARAMS",
            Self::EncodedPayload => "ENCODED_PAYLOAD",
            Self::AtSymbolInjection => "AT_SYMBOL_INJECTION",
            Self::MultipleTldSegments => "MULTIPLE_TLD_SEGMENTS",
            Self::PunycodeDomain => "PUNYCODE_DOMAIN",
            Self::NumericSubdomain => "NUMERIC_SUBDOMAIN",
            Self::RiskyExtension => "RISKY_EXTENSION",
            Self::DoubleExtension => "DOUBLE_EXTENSION",
            Self::ExcessiveEncoding => "EXCESSIVE_ENCODING",
        }
    }

    /// Flag text emitted when the rule fires.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::HttpNotHttps => "Connection is not encrypted (HTTP)",
            Self::IpAddressHost => "Uses an IP address instead of a domain name",
            Self::UrlShortener => "Uses a URL shortener",
            Self::ExcessiveSubdomains => "Excessive subdomain nesting",
            Self::NonStandardPort => "Non-standard port",
            Self::LongUrl => "Unusually long URL",
            Self::HighEntropyHost => "Host name looks randomly generated",
            Self::SuspiciousPathKeywords => "Credential-related keywords in path",
            Self::CredentialParams => "Credential material in query parameters",
            Self::EncodedPayload => "Encoded payload in query",
            Self::AtSymbolInjection => "@ symbol in authority masks the real destination",
            Self::MultipleTldSegments => "Multiple TLD-like segments in host",
            Self::PunycodeDomain => "Punycode (internationalized) domain",
            Self::NumericSubdomain => "All-numeric subdomain",
            Self::RiskyExtension => "Path ends in a risky file extension",
            Self::DoubleExtension => "Double file extension in filename",
            Self::ExcessiveEncoding => "Excessive percent-encoding in path",
        }
    }

    /// Configured weight for this rule.
    pub fn weight(&self, weights: &RuleWeights) -> f64 {
        match self {
            Self::HttpNotHttps => weights.http_not_https,
            Self::IpAddressHost => weights.ip_address,
            Self::UrlShortener => weights.url_shortener,
            Self::ExcessiveSubdomains => weights.excessive_subdomains,
            Self::NonStandardPort => weights.non_standard_port,
            Self::LongUrl => weights.long_url,
            Self::HighEntropyHost => weights.high_entropy,
            Self::SuspiciousPathKeywords => weights.suspicious_keywords,
            Self::CredentialParams => weights.credential_params,
            Self::EncodedPayload => weights.encoded_payload,
            Self::AtSymbolInjection => weights.at_symbol,
            Self::MultipleTldSegments => weights.multiple_tlds,
            Self::PunycodeDomain => weights.punycode,
            Self::NumericSubdomain => weights.numeric_subdomain,
            Self::RiskyExtension => weights.risky_extension,
            Self::DoubleExtension => weights.double_extension,
            Self::ExcessiveEncoding => weights.excessive_encoding,
        }
    }
}

/// Heuristics engine result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeuristicResult {
    /// Clamped sum of contributed weights, 0..=100
    pub score: f64,
    /// Flags in rule-evaluation order
    pub flags: Vec<String>,
    /// Rule id -> weight contributed
    pub details: BTreeMap<String, f64>,
}

impl HeuristicResult {
    /// Fixed result for input the parser rejected.
    pub fn unparseable() -> Self {
        Self {
            score: 50.0,
            flags: vec!["Unable to parse URL".to_string()],
            details: BTreeMap::new(),
        }
    }

    /// Fixed result for input above the length ceiling.
    pub fn oversized() -> Self {
        Self {
            score: 60.0,
            flags: vec!["URL exceeds maximum safe length".to_string()],
            details: BTreeMap::new(),
        }
    }

    /// Rules whose contributed weight reaches the critical threshold.
    pub fn critical_indicator_count(&self) -> usize {
        self.details.values().filter(|w| **w >= 20.0).count()
    }
}

/// The 17-rule heuristics engine
pub struct HeuristicsEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> HeuristicsEngine<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Weight contributed by a rule, or `None` when it does not fire.
    fn evaluate(&self, rule: RuleId, parsed: &ParsedUrl) -> Option<f64> {
        let weights = &self.config.rules;
        let fired = match rule {
            RuleId::HttpNotHttps => !parsed.is_secure(),
            RuleId::IpAddressHost => parsed.is_ip_host(),
            RuleId::UrlShortener => parser::is_shortener(&parsed.host),
            RuleId::ExcessiveSubdomains => {
                parsed.subdomain_depth >= self.config.max_subdomain_count
            }
            RuleId::NonStandardPort => parsed
                .port
                .map(|p| !STANDARD_PORTS.contains(&p))
                .unwrap_or(false),
            RuleId::LongUrl => {
                if parsed.original.len() <= LONG_URL_THRESHOLD {
                    false
                } else if Self::is_tracking_query(parsed.query.as_deref())
                    && parsed.original.len() < LONG_URL_TRACKING_LIMIT
                {
                    return Some(LONG_URL_TRACKING_WEIGHT);
                } else {
                    true
                }
            }
            RuleId::HighEntropyHost => {
                parser::shannon_entropy(&parsed.host) > self.config.entropy_threshold
            }
            RuleId::SuspiciousPathKeywords => {
                let k = parser::count_suspicious_path_keywords(&parsed.path);
                if k == 0 {
                    false
                } else {
                    let cap = weights.suspicious_keywords;
                    return Some((k as f64 * PATH_KEYWORD_STEP).min(cap));
                }
            }
            RuleId::CredentialParams => parsed
                .query
                .as_deref()
                .map(parser::has_credential_params)
                .unwrap_or(false),
            RuleId::EncodedPayload => Self::has_encoded_payload(parsed.query.as_deref()),
            RuleId::AtSymbolInjection => parser::at_symbol_in_authority(&parsed.original),
            RuleId::MultipleTldSegments => {
                parsed
                    .host
                    .split('.')
                    .filter(|label| COMMON_TLD_SEGMENTS.contains(label))
                    .count()
                    > 1
            }
            RuleId::PunycodeDomain => parsed.host.contains("xn--"),
            RuleId::NumericSubdomain => parsed
                .subdomains
                .iter()
                .any(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())),
            RuleId::RiskyExtension => {
                let path = parsed.path.to_lowercase();
                RISKY_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
            }
            RuleId::DoubleExtension => {
                let filename = parsed.path.rsplit('/').next().unwrap_or("").to_lowercase();
                filename.matches('.').count() >= 2
                    && RISKY_EXTENSIONS.iter().any(|ext| filename.ends_with(ext))
            }
            RuleId::ExcessiveEncoding => {
                let count = parsed.path.matches('%').count();
                count >= MIN_PERCENT_COUNT
                    && (count as f64) > 0.10 * parsed.path.len() as f64
            }
        };

        fired.then(|| rule.weight(weights))
    }

    fn is_tracking_query(query: Option<&str>) -> bool {
        match query {
            Some(q) => {
                let q = q.to_lowercase();
                q.contains("utm_") || q.contains("campaign=") || q.contains("source=")
            }
            None => false,
        }
    }

    fn has_encoded_payload(query: Option<&str>) -> bool {
        let Some(query) = query else {
            return false;
        };
        if query.len() < ENCODED_PAYLOAD_MIN_QUERY {
            return false;
        }
        let lower = query.to_lowercase();
        if lower.contains("data:") {
            return true;
        }
        // Oversized values on exfiltration-prone parameter names.
        for pair in lower.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                if CREDENTIAL_PARAMS.contains(&key) && value.len() > EXFIL_VALUE_THRESHOLD {
                    return true;
                }
            }
        }
        Self::has_base64_run(query)
    }

    /// A run of >= 50 base64-alphabet bytes, allowing up to 2 trailing
    /// `=` padding bytes.
    fn has_base64_run(s: &str) -> bool {
        let mut run = 0usize;
        let mut padding = 0usize;
        for b in s.bytes() {
            let is_alphabet = b.is_ascii_alphanumeric() || b == b'+' || b == b'/';
            if is_alphabet && padding == 0 {
                run += 1;
            } else if b == b'=' && run > 0 && padding < 2 {
                run += 1;
                padding += 1;
            } else {
                if run >= BASE64_RUN_THRESHOLD {
                    return true;
                }
                run = 0;
                padding = 0;
            }
        }
        run >= BASE64_RUN_THRESHOLD
    }
}

impl Analyzer for HeuristicsEngine<'_> {
    type Input = ParsedUrl;
    type Output = HeuristicResult;

    fn name(&self) -> &'static str {
        "heuristics_engine"
    }

    fn description(&self) -> &'static str {
        "Weighted rule set over protocol, host, path and query shape"
    }

    fn analyze(&self, parsed: &ParsedUrl) -> HeuristicResult {
        let mut result = HeuristicResult::default();
        let mut total = 0.0;

        for rule in ALL_RULES {
            if let Some(contributed) = self.evaluate(rule, parsed) {
                tracing::trace!(rule = rule.as_str(), contributed, "heuristic fired");
                total += contributed;
                result.flags.push(rule.flag().to_string());
                result.details.insert(rule.as_str().to_string(), contributed);
            }
        }

        result.score = total.clamp(0.0, 100.0);
        result
    }
}
