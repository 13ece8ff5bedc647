//! Explanation layer
//!
//! Turns an [`Assessment`] into user-facing language: a summary, a
//! recommendation, a plain-language explanation per flag, and safety tips
//! for the verdict. Everything here is a deterministic mapping over the
//! assessment; no analysis is re-run.

use serde::{Deserialize, Serialize};
use url_shield_core::{Assessment, Verdict};

/// Human-readable enrichment bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedVerdict {
    pub summary: String,
    pub recommendation: String,
    pub risk_factor_explanations: Vec<String>,
    pub safety_tips: Vec<String>,
}

/// A "what would lower this score" hint for one fired heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub signal_type: String,
    pub current_value: String,
    pub suggested_change: String,
    pub score_reduction: f64,
    pub explanation: String,
}

/// Case-insensitive flag-substring to explanation mapping.
const FLAG_EXPLANATIONS: &[(&str, &str)] = &[
    (
        "not encrypted",
        "The connection is not encrypted, so anything entered on the page can be read in transit.",
    ),
    (
        "ip address",
        "The link uses a raw IP address instead of a registered domain name, which legitimate services almost never do.",
    ),
    (
        "impersonation",
        "The address imitates a well-known brand to win your trust.",
    ),
    (
        "top-level domain",
        "The site sits under a top-level domain commonly associated with malicious registrations.",
    ),
    (
        "shortener",
        "A link shortener hides the real destination until after you click.",
    ),
    (
        "subdomain",
        "Deep or unusual subdomain nesting is often used to bury a fake name inside a real-looking address.",
    ),
    (
        "credential",
        "The link references passwords, tokens or other credentials directly in the URL.",
    ),
    (
        "long url",
        "Unusually long addresses are often padded to hide their true destination.",
    ),
    (
        "@ symbol",
        "Everything before the @ is decoration; the browser actually visits what comes after it.",
    ),
    (
        "punycode",
        "Internationalized domain encoding can make a fake name render exactly like a real one.",
    ),
    (
        "encoded payload",
        "The query carries an encoded blob, a common way to smuggle data or scripts.",
    ),
    (
        "percent-encoding",
        "Heavy percent-encoding is often used to disguise what a link actually does.",
    ),
    (
        "port",
        "Legitimate public websites rarely run on non-standard ports.",
    ),
    (
        "randomly generated",
        "Machine-generated host names are typical of disposable phishing infrastructure.",
    ),
    (
        "extension",
        "The link points directly at an executable file type used to deliver malware.",
    ),
    (
        "tld-like",
        "Several TLD-looking segments in one host usually means a real domain name is being spoofed.",
    ),
    (
        "trust word",
        "Words like \"secure\" or \"verified\" in a domain name are decoration anyone can register.",
    ),
    (
        "urgency",
        "Pressure language is a social-engineering tactic to make you act before thinking.",
    ),
];

fn recommendation(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Safe => "No phishing indicators found. Standard caution applies.",
        Verdict::Suspicious => {
            "Treat this link with caution. Verify the address with the organization through a channel you already trust before entering any information."
        }
        Verdict::Malicious => {
            "Do not open this link. It shows strong signs of phishing; report it and delete the message it came from."
        }
        Verdict::Unknown => {
            "The link could not be analyzed. Do not open it unless you can verify the source independently."
        }
    }
}

fn safety_tips(verdict: Verdict) -> Vec<String> {
    let tips: &[&str] = match verdict {
        Verdict::Safe => &[
            "Check that the domain name is spelled exactly as you expect.",
            "Prefer typing known addresses over following links.",
            "Keep your browser and device up to date.",
        ],
        Verdict::Suspicious => &[
            "Never enter credentials on a page you reached from a scanned code or message.",
            "Navigate to the organization's site manually instead of using this link.",
            "Look for subtle misspellings or extra words in the domain name.",
            "If in doubt, contact the organization through an official channel.",
        ],
        Verdict::Malicious => &[
            "Do not enter any personal or banking information.",
            "Report the link to your IT or security team.",
            "If you already entered credentials, change that password immediately.",
            "Run a security scan if you downloaded anything from the page.",
        ],
        Verdict::Unknown => &[
            "Ask the sender to confirm the link through another channel.",
            "Do not open links you cannot verify.",
            "Scanned codes can encode anything; treat them like links from strangers.",
        ],
    };
    tips.iter().map(|t| t.to_string()).collect()
}

/// Build the enrichment bundle for an assessment.
pub fn enrich(assessment: &Assessment) -> EnrichedVerdict {
    let summary = format!(
        "Risk score {}/100 — verdict {}.",
        assessment.score,
        assessment.verdict.as_str()
    );

    let mut explanations = Vec::new();
    for flag in &assessment.flags {
        let flag_lower = flag.to_lowercase();
        if let Some((_, explanation)) = FLAG_EXPLANATIONS
            .iter()
            .find(|(needle, _)| flag_lower.contains(needle))
        {
            let text = explanation.to_string();
            if !explanations.contains(&text) {
                explanations.push(text);
            }
        }
    }

    EnrichedVerdict {
        summary,
        recommendation: recommendation(assessment.verdict).to_string(),
        risk_factor_explanations: explanations,
        safety_tips: safety_tips(assessment.verdict),
    }
}

fn hint_text(rule_id: &str) -> Option<(&'static str, &'static str, &'static str)> {
    // (current_value, suggested_change, explanation)
    let mapping = match rule_id {
        "HTTP_NOT_HTTPS" => (
            "plain http connection",
            "serve the page over https",
            "An encrypted connection removes the strongest single indicator.",
        ),
        "IP_ADDRESS_HOST" => (
            "raw IP address host",
            "use a registered domain name",
            "Domain-less hosting is rare outside attacks and internal tools.",
        ),
        "URL_SHORTENER" => (
            "shortened link",
            "link to the destination directly",
            "Shorteners hide the destination the user is asked to trust.",
        ),
        "EXCESSIVE_SUBDOMAINS" => (
            "deeply nested subdomains",
            "flatten the host to at most three labels",
            "Deep nesting is a common way to fake a trusted domain prefix.",
        ),
        "NON_STANDARD_PORT" => (
            "non-standard port",
            "serve on port 443",
            "Unusual ports suggest improvised or hidden infrastructure.",
        ),
        "LONG_URL" => (
            "very long URL",
            "shorten the URL below 250 characters",
            "Length is often used to push the real destination out of sight.",
        ),
        "HIGH_ENTROPY_HOST" => (
            "random-looking host name",
            "use a pronounceable, registered name",
            "High-entropy names are typical of disposable campaign domains.",
        ),
        "SUSPICIOUS_PATH_KEYWORDS" => (
            "credential keywords in path",
            "remove login/verify bait terms from the path",
            "Credential vocabulary in the path mimics sign-in flows.",
        ),
        "CREDENTIAL_PARAMS" => (
            "credential material in query",
            "never pass secrets in the URL",
            "Secrets in URLs leak through logs and shoulder surfing.",
        ),
        "ENCODED_PAYLOAD" => (
            "encoded blob in query",
            "drop the encoded payload",
            "Encoded payloads are a common smuggling channel.",
        ),
        "AT_SYMBOL_INJECTION" => (
            "@ in the authority section",
            "remove the userinfo trick",
            "The text before @ is ignored by the browser and exists to deceive.",
        ),
        "MULTIPLE_TLD_SEGMENTS" => (
            "several TLD-like labels",
            "use a single honest domain",
            "Stacked TLD segments imitate a trusted registrable domain.",
        ),
        "PUNYCODE_DOMAIN" => (
            "punycode host",
            "use the ASCII domain you actually own",
            "IDN encoding enables visually identical fake names.",
        ),
        "NUMERIC_SUBDOMAIN" => (
            "all-numeric subdomain",
            "name subdomains descriptively",
            "Numeric labels suggest generated, throwaway infrastructure.",
        ),
        "RISKY_EXTENSION" => (
            "executable file target",
            "do not link straight to executables",
            "Direct executable downloads are the classic malware vector.",
        ),
        "DOUBLE_EXTENSION" => (
            "double file extension",
            "use a single honest extension",
            "Double extensions disguise executables as documents.",
        ),
        "EXCESSIVE_ENCODING" => (
            "dense percent-encoding",
            "decode the path",
            "Dense encoding hides traversal and script payloads.",
        ),
        _ => return None,
    };
    Some(mapping)
}

/// "What would lower this score" hints, strongest reduction first.
pub fn counterfactual_hints(assessment: &Assessment) -> Vec<Hint> {
    let mut hints: Vec<Hint> = assessment
        .details
        .rule_hits
        .iter()
        .filter_map(|(rule_id, weight)| {
            hint_text(rule_id).map(|(current, change, why)| Hint {
                signal_type: rule_id.clone(),
                current_value: current.to_string(),
                suggested_change: change.to_string(),
                score_reduction: *weight,
                explanation: why.to_string(),
            })
        })
        .collect();

    hints.sort_by(|a, b| {
        b.score_reduction
            .partial_cmp(&a.score_reduction)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.signal_type.cmp(&b.signal_type))
    });
    hints
}
