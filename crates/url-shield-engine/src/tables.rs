//! Bundled pattern tables
//!
//! Process-wide immutable reference data shared by several engines. Every
//! set here ships with the library; nothing is fetched or reloaded at
//! runtime. Aho-Corasick automatons are built lazily on first use and are
//! read-only afterwards, so no locking is required.

use aho_corasick::{AhoCorasick, AhoCorasickKind, MatchKind};
use std::sync::LazyLock;

/// Known URL shortener domains. A host matches when it equals an entry or
/// is a subdomain of one.
pub static SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "t.co",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "rebrand.ly",
    "cutt.ly",
    "shorturl.at",
    "tiny.cc",
    "rb.gy",
    "t.ly",
    "v.gd",
    "s.id",
    "lnkd.in",
    "qr.ae",
    "bl.ink",
    "soo.gd",
    "short.io",
    "adf.ly",
];

/// Substrings in the path that suggest a credential-harvesting page.
pub static SUSPICIOUS_PATH_KEYWORDS: &[&str] = &[
    "login",
    "signin",
    "verify",
    "secure",
    "account",
    "update",
    "confirm",
    "banking",
    "password",
    "credential",
    "authenticate",
    "validate",
    "recover",
    "reset",
    "unlock",
    "suspend",
    "limited",
    "unusual",
    "activity",
    "verify-identity",
    "sign-in",
];

/// Query parameter names that carry credentials or session material.
pub static CREDENTIAL_PARAMS: &[&str] = &[
    "password",
    "pwd",
    "pass",
    "token",
    "session",
    "sessionid",
    "auth",
    "key",
    "secret",
    "credential",
    "api_key",
    "apikey",
    "access_token",
    "bearer",
    "jwt",
    "oauth",
    "authorization",
];

/// File extensions associated with malware delivery.
pub static RISKY_EXTENSIONS: &[&str] = &[
    ".exe", ".scr", ".bat", ".cmd", ".ps1", ".msi", ".com", ".pif", ".vbs", ".vbe", ".js",
    ".jse", ".ws", ".wsf", ".hta", ".cpl", ".msc", ".jar", ".app", ".dmg",
];

/// Labels that look like TLDs. More than one of these inside a host is a
/// strong sign of domain spoofing (`paypal.com.evil.net`).
pub static COMMON_TLD_SEGMENTS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "io", "co", "us", "uk", "app", "dev", "xyz", "info",
    "biz", "me", "tv", "cc",
];

/// Query keys used to express a forwarding destination.
pub static REDIRECT_PARAM_KEYS: &[&str] = &[
    "redirect",
    "redirect_uri",
    "redirect_url",
    "url",
    "uri",
    "link",
    "goto",
    "next",
    "target",
    "continue",
    "dest",
    "destination",
    "return",
    "return_url",
    "callback",
    "forward",
    "to",
];

/// Substrings identifying click-tracking and mailing-list infrastructure.
pub static TRACKER_SUBSTRINGS: &[&str] = &[
    "click.",
    "track.",
    "go.",
    "redirect.",
    "r.",
    "analytics.",
    "pixel.",
    "beacon.",
    "metrics.",
    "mailchi.mp",
    "sendgrid.net",
    "mailgun.org",
    "constantcontact.com",
    "aweber.com",
];

/// Words abused to lend a hostile domain an air of legitimacy.
pub static TRUST_WORDS: &[&str] = &[
    "secure",
    "security",
    "verified",
    "verify",
    "verification",
    "official",
    "authentic",
    "trusted",
    "safe",
    "protected",
    "confirm",
    "validate",
    "update",
    "login",
    "signin",
    "account",
    "banking",
    "payment",
    "wallet",
    "checkout",
];

/// Account-action verbs that rarely belong in a legitimate hostname.
pub static ACTION_WORDS: &[&str] = &[
    "login",
    "signin",
    "sign-in",
    "logon",
    "authenticate",
    "reset",
    "recover",
    "unlock",
    "suspend",
    "expire",
    "confirm",
    "verify",
    "update",
    "renew",
    "reactivate",
];

/// Pressure vocabulary typical of phishing lures.
pub static URGENCY_WORDS: &[&str] = &[
    "urgent",
    "immediately",
    "now",
    "today",
    "expire",
    "suspend",
    "locked",
    "limited",
    "alert",
    "warning",
    "critical",
    "required",
    "mandatory",
];

/// Subdomain labels that belong to ordinary site infrastructure and are
/// excluded from brand-like subdomain detection.
pub static COMMON_INFRA_SUBDOMAINS: &[&str] =
    &["www", "mail", "blog", "shop", "app", "api", "cdn", "dev", "staging"];

fn build_automaton(patterns: &[&str]) -> AhoCorasick {
    AhoCorasick::builder()
        .kind(Some(AhoCorasickKind::DFA))
        .match_kind(MatchKind::Standard)
        .build(patterns)
        .expect("static pattern table must compile")
}

/// Automaton over [`SUSPICIOUS_PATH_KEYWORDS`].
pub static PATH_KEYWORD_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| build_automaton(SUSPICIOUS_PATH_KEYWORDS));

/// Automaton over [`URGENCY_WORDS`].
pub static URGENCY_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| build_automaton(URGENCY_WORDS));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(SHORTENER_DOMAINS.len(), 21);
        assert_eq!(SUSPICIOUS_PATH_KEYWORDS.len(), 21);
        assert_eq!(CREDENTIAL_PARAMS.len(), 17);
        assert_eq!(RISKY_EXTENSIONS.len(), 20);
        assert_eq!(COMMON_TLD_SEGMENTS.len(), 17);
        assert_eq!(REDIRECT_PARAM_KEYS.len(), 17);
    }

    #[test]
    fn test_tables_are_lowercase() {
        for entry in SHORTENER_DOMAINS
            .iter()
            .chain(SUSPICIOUS_PATH_KEYWORDS)
            .chain(CREDENTIAL_PARAMS)
            .chain(TRUST_WORDS)
            .chain(ACTION_WORDS)
            .chain(URGENCY_WORDS)
        {
            assert_eq!(*entry, entry.to_lowercase(), "table entry {entry:?}");
        }
    }

    #[test]
    fn test_path_keyword_matcher_finds_hits() {
        let hits = PATH_KEYWORD_MATCHER.find_iter("/account/verify-identity").count();
        // "account", "verify", "verify-identity"
        assert!(hits >= 2);
    }
}
