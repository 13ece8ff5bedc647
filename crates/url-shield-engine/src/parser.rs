//! URL parsing and normalization
//!
//! Hand-rolled parser tuned for hostile input: every field is bounded,
//! every scan is a single pass, and any malformed input returns `None`
//! instead of an error. The parser accepts only `http` and `https` (a
//! scheme-less input is assumed `http`), which is all a QR payload can
//! usefully carry into a browser.
//!
//! No general-purpose URL crate is used on purpose: default-scheme
//! handling, byte-level truncation and the rejection rules here differ
//! from WHATWG semantics.

use crate::psl;
use crate::tables::{PATH_KEYWORD_MATCHER, SHORTENER_DOMAINS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Maximum accepted URL length in bytes.
pub const MAX_URL_LENGTH: usize = 2048;
/// Maximum accepted host length in bytes.
pub const MAX_HOST_LENGTH: usize = 255;
/// Maximum number of host labels retained.
pub const MAX_HOST_LABELS: usize = 10;
/// Byte limits for the trailing URL components.
pub const MAX_PATH_LENGTH: usize = 1024;
pub const MAX_QUERY_LENGTH: usize = 1024;
pub const MAX_FRAGMENT_LENGTH: usize = 256;

// Anchored, fixed-quantifier pattern: no backtracking blowup possible.
static IPV4_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").unwrap());

/// A validated, bounded URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUrl {
    /// Input after normalization, truncated to [`MAX_URL_LENGTH`]
    pub original: String,
    /// "http" or "https"
    pub protocol: String,
    /// Lowercased host without userinfo, brackets or port
    pub host: String,
    /// Explicit port, if any; `None` means protocol default
    pub port: Option<u16>,
    /// Always starts with `/`
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
    /// Leading labels before the registrable domain
    pub subdomains: Vec<String>,
    /// eTLD+1 per the bundled suffix set
    pub registrable_domain: String,
    /// Longest matching public suffix
    pub effective_tld: String,
    pub subdomain_depth: usize,
}

impl ParsedUrl {
    pub fn is_secure(&self) -> bool {
        self.protocol == "https"
    }

    pub fn is_ip_host(&self) -> bool {
        is_ipv4(&self.host) || is_ipv6(&self.host)
    }

    /// Effective port after applying protocol defaults.
    pub fn effective_port(&self) -> u16 {
        self.port
            .unwrap_or(if self.is_secure() { 443 } else { 80 })
    }
}

/// Clip a string to at most `max` bytes without splitting a character.
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Parse a URL. Returns `None` for anything malformed; never panics.
pub fn parse(url: &str) -> Option<ParsedUrl> {
    if url.is_empty() || url.len() > MAX_URL_LENGTH {
        return None;
    }

    // Normalize: trim, encode literal spaces, drop CR/LF/TAB.
    let mut normalized = url.trim().replace(' ', "%20");
    normalized.retain(|c| !matches!(c, '\r' | '\n' | '\t'));
    if normalized.is_empty() || normalized.chars().any(|c| (c as u32) < 0x20) {
        return None;
    }
    let normalized = clip(&normalized, MAX_URL_LENGTH).to_string();

    // Scheme.
    let (protocol, after_scheme) = match normalized.find("://") {
        Some(idx) => {
            let scheme = normalized[..idx].to_lowercase();
            if scheme != "http" && scheme != "https" {
                return None;
            }
            (scheme, &normalized[idx + 3..])
        }
        None => {
            if normalized.starts_with("//") {
                return None;
            }
            ("http".to_string(), normalized.as_str())
        }
    };

    // Authority ends at the first path/query/fragment delimiter.
    let authority_end = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let authority = &after_scheme[..authority_end];
    let rest = &after_scheme[authority_end..];

    // Userinfo is dropped; the injection itself is a heuristic signal
    // evaluated over the raw string.
    let host_port = match authority.rfind('@') {
        Some(idx) => &authority[idx + 1..],
        None => authority,
    };
    if host_port.is_empty() {
        return None;
    }

    let (raw_host, port) = split_host_port(host_port)?;
    let host = raw_host.to_lowercase();
    if host.is_empty()
        || host.len() > MAX_HOST_LENGTH
        || host.chars().any(|c| c.is_whitespace())
    {
        return None;
    }

    let is_ip = is_ipv4(&host) || is_ipv6(&host);
    if !host.contains('.') && !is_ip {
        return None;
    }

    // Path / query / fragment.
    let (before_fragment, fragment) = match rest.find('#') {
        Some(idx) => (&rest[..idx], Some(clip(&rest[idx + 1..], MAX_FRAGMENT_LENGTH))),
        None => (rest, None),
    };
    let (raw_path, query) = match before_fragment.find('?') {
        Some(idx) => (
            &before_fragment[..idx],
            Some(clip(&before_fragment[idx + 1..], MAX_QUERY_LENGTH)),
        ),
        None => (before_fragment, None),
    };
    let path = if raw_path.is_empty() {
        "/".to_string()
    } else {
        clip(raw_path, MAX_PATH_LENGTH).to_string()
    };
    let query = query.map(str::to_string);
    let fragment = fragment.map(str::to_string);

    // Domain split. IP literals carry no registrable domain.
    let (subdomains, registrable_domain, effective_tld, subdomain_depth) = if is_ip {
        (Vec::new(), host.clone(), String::new(), 0)
    } else {
        let bounded: Vec<&str> = host.split('.').take(MAX_HOST_LABELS).collect();
        let parts = psl::split_host(&bounded.join("."));
        (
            parts.subdomains,
            parts.registrable_domain,
            parts.effective_tld,
            parts.subdomain_depth,
        )
    };

    Some(ParsedUrl {
        original: normalized,
        protocol,
        host,
        port,
        path,
        query,
        fragment,
        subdomains,
        registrable_domain,
        effective_tld,
        subdomain_depth,
    })
}

/// Split an authority (without userinfo) into host and optional port.
fn split_host_port(host_port: &str) -> Option<(String, Option<u16>)> {
    if let Some(stripped) = host_port.strip_prefix('[') {
        // IPv6 literal
        let close = stripped.find(']')?;
        let host = &stripped[..close];
        let after = &stripped[close + 1..];
        let port = match after.strip_prefix(':') {
            Some(p) => Some(parse_port(p)?),
            None if after.is_empty() => None,
            None => return None,
        };
        return Some((host.to_string(), port));
    }

    match host_port.rfind(':') {
        Some(idx) => {
            let port = parse_port(&host_port[idx + 1..])?;
            Some((host_port[..idx].to_string(), Some(port)))
        }
        None => Some((host_port.to_string(), None)),
    }
}

fn parse_port(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 5 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u32>() {
        Ok(p) if (1..=65535).contains(&p) => Some(p as u16),
        _ => None,
    }
}

/// IPv4 dotted-quad check with octet range validation.
pub fn is_ipv4(host: &str) -> bool {
    if host.len() > 15 {
        return false;
    }
    match IPV4_PATTERN.captures(host) {
        Some(caps) => (1..=4).all(|i| caps[i].parse::<u32>().map(|o| o <= 255).unwrap_or(false)),
        None => false,
    }
}

/// IPv6 literal check: bracketed or bare, at most one `::`, up to 8 hex
/// segments of up to 4 digits, optional `%zone` suffix.
pub fn is_ipv6(host: &str) -> bool {
    let s = host.strip_prefix('[').unwrap_or(host);
    let s = s.strip_suffix(']').unwrap_or(s);
    let s = match s.find('%') {
        Some(idx) => &s[..idx],
        None => s,
    };

    if s.len() > 45 || !s.contains(':') {
        return false;
    }
    if s == "::" {
        return true;
    }

    let double_colons = s.matches("::").count();
    if double_colons > 1 {
        return false;
    }

    let valid_segment =
        |seg: &str| !seg.is_empty() && seg.len() <= 4 && seg.bytes().all(|b| b.is_ascii_hexdigit());

    if double_colons == 1 {
        let (left, right) = s.split_once("::").unwrap();
        let sides = [left, right];
        let mut total = 0;
        for side in sides {
            if side.is_empty() {
                continue;
            }
            for seg in side.split(':') {
                if !valid_segment(seg) {
                    return false;
                }
                total += 1;
            }
        }
        total < 8
    } else {
        let segments: Vec<&str> = s.split(':').collect();
        segments.len() == 8 && segments.iter().all(|seg| valid_segment(seg))
    }
}

/// Whether the host is a known shortener or a subdomain of one.
pub fn is_shortener(host: &str) -> bool {
    SHORTENER_DOMAINS
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

/// Whether `@` appears inside the authority section (between the scheme
/// separator and the first `/`), the classic credential-injection trick.
pub fn at_symbol_in_authority(url: &str) -> bool {
    let start = match url.find("://") {
        Some(idx) => idx + 3,
        None => 0,
    };
    let authority = &url[start..];
    let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
    authority[..end].contains('@')
}

/// Shannon entropy over the first 256 characters.
pub fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars().take(256) {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Number of distinct credential-phishing keywords in the path.
pub fn count_suspicious_path_keywords(path: &str) -> usize {
    let haystack = clip(path, 512).to_lowercase();
    let mut seen = [false; 32];
    for m in PATH_KEYWORD_MATCHER.find_overlapping_iter(&haystack) {
        seen[m.pattern().as_usize()] = true;
    }
    seen.iter().filter(|&&b| b).count()
}

/// Whether the query carries a credential or session parameter.
pub fn has_credential_params(query: &str) -> bool {
    let q = clip(query, MAX_QUERY_LENGTH).to_lowercase();
    crate::tables::CREDENTIAL_PARAMS.iter().any(|k| {
        let assigned = format!("{k}=");
        q.starts_with(&assigned) || q.contains(&format!("&{assigned}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_https() {
        let p = parse("https://www.example.com/path?q=1#frag").unwrap();
        assert_eq!(p.protocol, "https");
        assert_eq!(p.host, "www.example.com");
        assert_eq!(p.path, "/path");
        assert_eq!(p.query.as_deref(), Some("q=1"));
        assert_eq!(p.fragment.as_deref(), Some("frag"));
        assert_eq!(p.registrable_domain, "example.com");
        assert_eq!(p.subdomains, vec!["www"]);
        assert!(p.is_secure());
    }

    #[test]
    fn test_parse_schemeless_defaults_to_http() {
        let p = parse("example.com/login").unwrap();
        assert_eq!(p.protocol, "http");
        assert_eq!(p.host, "example.com");
        assert_eq!(p.path, "/login");
        assert!(!p.is_secure());
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        assert!(parse("ftp://example.com").is_none());
        assert!(parse("javascript://alert(1)").is_none());
        assert!(parse("//example.com").is_none());
    }

    #[test]
    fn test_parse_rejects_degenerate_input() {
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
        assert!(parse(&"a".repeat(2049)).is_none());
        assert!(parse("http://").is_none());
        assert!(parse("http://\u{0001}example.com").is_none());
    }

    #[test]
    fn test_parse_length_boundary() {
        // exactly 2048 accepted, 2049 rejected
        let path_fill = "a".repeat(2048 - "http://example.com/".len());
        let url = format!("http://example.com/{path_fill}");
        assert_eq!(url.len(), 2048);
        assert!(parse(&url).is_some());
        assert!(parse(&format!("{url}a")).is_none());
    }

    #[test]
    fn test_parse_host_length_boundary() {
        // 253-byte host accepted
        let label = "a".repeat(63);
        let host_253 = format!("{label}.{label}.{label}.{}", "a".repeat(61));
        assert_eq!(host_253.len(), 253);
        assert!(parse(&format!("http://{host_253}/")).is_some());

        // 256-byte host rejected
        let host_256 = format!("{label}.{label}.{label}.{}", "a".repeat(64));
        assert_eq!(host_256.len(), 256);
        assert!(parse(&format!("http://{host_256}/")).is_none());
    }

    #[test]
    fn test_parse_host_case_and_port() {
        let p = parse("HTTP://ExAmPlE.CoM:8443/x").unwrap();
        assert_eq!(p.host, "example.com");
        assert_eq!(p.port, Some(8443));
        assert_eq!(p.effective_port(), 8443);
    }

    #[test]
    fn test_parse_invalid_ports() {
        assert!(parse("http://example.com:0/").is_none());
        assert!(parse("http://example.com:65536/").is_none());
        assert!(parse("http://example.com:port/").is_none());
        assert!(parse("http://example.com:/").is_none());
    }

    #[test]
    fn test_parse_default_port_is_none() {
        let p = parse("https://example.com/").unwrap();
        assert_eq!(p.port, None);
        assert_eq!(p.effective_port(), 443);
    }

    #[test]
    fn test_parse_strips_userinfo() {
        let p = parse("https://google.com@evil-site.tk/").unwrap();
        assert_eq!(p.host, "evil-site.tk");
        assert_eq!(p.registrable_domain, "evil-site.tk");
    }

    #[test]
    fn test_parse_ipv4_host() {
        let p = parse("http://192.168.1.100:8080/admin").unwrap();
        assert_eq!(p.host, "192.168.1.100");
        assert!(p.is_ip_host());
        assert!(p.effective_tld.is_empty());
    }

    #[test]
    fn test_parse_ipv6_host() {
        let p = parse("http://[2001:db8::1]:8080/").unwrap();
        assert_eq!(p.host, "2001:db8::1");
        assert_eq!(p.port, Some(8080));
        assert!(p.is_ip_host());
    }

    #[test]
    fn test_parse_rejects_bare_word_host() {
        assert!(parse("http://localhost/").is_none());
    }

    #[test]
    fn test_parse_whitespace_normalization() {
        let p = parse("  https://example.com/a b\t").unwrap();
        assert_eq!(p.path, "/a%20b");
    }

    #[test]
    fn test_is_ipv4() {
        assert!(is_ipv4("192.168.1.1"));
        assert!(is_ipv4("0.0.0.0"));
        assert!(is_ipv4("255.255.255.255"));
        assert!(!is_ipv4("256.1.1.1"));
        assert!(!is_ipv4("1.2.3"));
        assert!(!is_ipv4("1.2.3.4.5"));
        assert!(!is_ipv4("example.com"));
    }

    #[test]
    fn test_is_ipv6() {
        assert!(is_ipv6("::1"));
        assert!(is_ipv6("::"));
        assert!(is_ipv6("2001:db8::1"));
        assert!(is_ipv6("[2001:db8::1]"));
        assert!(is_ipv6("fe80::1%eth0"));
        assert!(is_ipv6("2001:0db8:0000:0000:0000:ff00:0042:8329"));
        assert!(!is_ipv6("2001:db8::1::2"));
        assert!(!is_ipv6("example.com"));
        assert!(!is_ipv6("12345::1"));
    }

    #[test]
    fn test_is_shortener() {
        assert!(is_shortener("bit.ly"));
        assert!(is_shortener("www.bit.ly"));
        assert!(!is_shortener("notbit.ly"));
        assert!(!is_shortener("bit.ly.evil.com"));
    }

    #[test]
    fn test_shannon_entropy() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        // two symbols, uniform: exactly 1 bit
        assert!((shannon_entropy("abab") - 1.0).abs() < 1e-9);
        assert!(shannon_entropy("x7f2-qz9k.vb4w") > 3.0);
    }

    #[test]
    fn test_count_suspicious_path_keywords() {
        assert_eq!(count_suspicious_path_keywords("/images/cat.png"), 0);
        assert_eq!(count_suspicious_path_keywords("/login"), 1);
        assert!(count_suspicious_path_keywords("/secure/login/verify") >= 3);
    }

    #[test]
    fn test_has_credential_params() {
        assert!(has_credential_params("password=hunter2"));
        assert!(has_credential_params("a=1&token=xyz"));
        assert!(!has_credential_params("q=search&page=2"));
        // keyword must be a parameter name, not a value
        assert!(!has_credential_params("q=password"));
    }

    #[test]
    fn test_at_symbol_in_authority() {
        assert!(at_symbol_in_authority("https://google.com@evil.tk/"));
        assert!(at_symbol_in_authority("http://user:pw@host.com"));
        // @ in the path or query is not an injection
        assert!(!at_symbol_in_authority("https://example.com/@handle"));
        assert!(!at_symbol_in_authority("https://example.com/?mail=a@b.com"));
    }

    #[test]
    fn test_parse_deterministic() {
        let a = parse("https://www.example.com/path?q=1").unwrap();
        let b = parse("https://www.example.com/path?q=1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reparse_of_normalized_form_is_stable() {
        for url in [
            "  https://www.Example.com/path a?q=1#f ",
            "example.com/login",
            "http://user@host.co.uk:8080/x",
        ] {
            let first = parse(url).unwrap();
            let second = parse(&first.original).unwrap();
            assert_eq!(first, second, "{url}");
        }
    }
}
