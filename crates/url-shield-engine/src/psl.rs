//! Public suffix resolution
//!
//! Registrable-domain and effective-TLD extraction against a bundled,
//! closed suffix set. This is deliberately not the full Mozilla PSL: the
//! analyzer only needs enough coverage to split real-world hosts
//! correctly, and a closed table keeps lookups allocation-free and
//! deterministic.
//!
//! Three-part suffixes are checked first, then two-part, then the last
//! label alone.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Three-part public suffixes (closed set).
static THREE_PART_SUFFIXES: &[&str] = &[
    "pvt.k12.ma.us",
    "chtr.k12.ma.us",
    "paroch.k12.ma.us",
    "act.edu.au",
    "nsw.edu.au",
    "nt.edu.au",
    "qld.edu.au",
    "sa.edu.au",
    "tas.edu.au",
    "vic.edu.au",
    "wa.edu.au",
];

/// Two-part public suffixes (closed set, most common registries).
static TWO_PART_SUFFIXES: &[&str] = &[
    // United Kingdom
    "co.uk", "org.uk", "me.uk", "ac.uk", "gov.uk", "net.uk", "sch.uk", "ltd.uk", "plc.uk",
    "nhs.uk",
    // Australia
    "com.au", "net.au", "org.au", "edu.au", "gov.au", "asn.au", "id.au",
    // Brazil
    "com.br", "net.br", "org.br", "gov.br", "edu.br",
    // Japan
    "co.jp", "ne.jp", "or.jp", "ac.jp", "ad.jp", "go.jp", "ed.jp", "gr.jp",
    // New Zealand
    "co.nz", "net.nz", "org.nz", "govt.nz", "ac.nz", "school.nz", "gen.nz", "geek.nz",
    // South Africa
    "co.za", "org.za", "net.za", "gov.za", "ac.za", "web.za",
    // India
    "co.in", "net.in", "org.in", "firm.in", "gen.in", "ind.in", "ac.in", "edu.in", "res.in",
    "gov.in", "nic.in",
    // China
    "com.cn", "net.cn", "org.cn", "gov.cn", "edu.cn", "ac.cn",
    // Hong Kong
    "com.hk", "net.hk", "org.hk", "edu.hk", "gov.hk", "idv.hk",
    // Singapore
    "com.sg", "net.sg", "org.sg", "edu.sg", "gov.sg", "per.sg",
    // Malaysia
    "com.my", "net.my", "org.my", "edu.my", "gov.my",
    // Taiwan
    "com.tw", "net.tw", "org.tw", "edu.tw", "gov.tw", "idv.tw",
    // South Korea
    "co.kr", "ne.kr", "or.kr", "re.kr", "pe.kr", "go.kr", "ac.kr",
    // Mexico
    "com.mx", "net.mx", "org.mx", "edu.mx", "gob.mx",
    // Argentina
    "com.ar", "net.ar", "org.ar", "edu.ar", "gob.ar",
    // Colombia
    "com.co", "net.co", "org.co", "edu.co", "gov.co",
    // Turkey
    "com.tr", "net.tr", "org.tr", "edu.tr", "gov.tr",
    // Israel
    "co.il", "org.il", "net.il", "ac.il", "gov.il", "muni.il",
    // Indonesia
    "co.id", "or.id", "ac.id", "go.id", "web.id",
    // Philippines
    "com.ph", "net.ph", "org.ph", "edu.ph", "gov.ph",
    // Vietnam
    "com.vn", "net.vn", "org.vn", "edu.vn", "gov.vn",
    // Thailand
    "co.th", "in.th", "ac.th", "go.th", "or.th",
    // Ukraine
    "com.ua", "net.ua", "org.ua", "edu.ua", "gov.ua",
    // Kenya
    "co.ke", "or.ke", "ac.ke", "go.ke",
    // Nigeria
    "com.ng", "net.ng", "org.ng", "edu.ng", "gov.ng",
    // Pakistan
    "com.pk", "net.pk", "org.pk", "edu.pk", "gov.pk",
    // Egypt
    "com.eg", "net.eg", "org.eg", "edu.eg", "gov.eg",
    // Saudi Arabia
    "com.sa", "net.sa", "org.sa", "edu.sa", "gov.sa",
    // United Arab Emirates
    "com.ae", "net.ae", "org.ae", "ac.ae", "gov.ae",
];

static TWO_PART_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TWO_PART_SUFFIXES.iter().copied().collect());

static THREE_PART_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| THREE_PART_SUFFIXES.iter().copied().collect());

/// Host split into registrable domain, effective TLD and subdomain labels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainParts {
    pub host: String,
    pub effective_tld: String,
    pub registrable_domain: String,
    pub subdomains: Vec<String>,
    pub subdomain_depth: usize,
}

/// Split a host into its public-suffix parts.
///
/// A host equal to a bare suffix yields itself as the registrable domain
/// with no subdomains; a blank host yields a zeroed result.
pub fn split_host(host: &str) -> DomainParts {
    let host = host.trim().to_lowercase();
    if host.is_empty() {
        return DomainParts::default();
    }

    let labels: Vec<&str> = host.split('.').collect();
    let n = labels.len();

    let etld_labels = if n >= 3 && THREE_PART_SET.contains(labels[n - 3..].join(".").as_str()) {
        3
    } else if n >= 2 && TWO_PART_SET.contains(labels[n - 2..].join(".").as_str()) {
        2
    } else {
        1
    };

    let effective_tld = labels[n - etld_labels..].join(".");

    if n == etld_labels {
        // host is a bare suffix
        return DomainParts {
            registrable_domain: host.clone(),
            effective_tld,
            subdomains: Vec::new(),
            subdomain_depth: 0,
            host,
        };
    }

    let registrable_domain = labels[n - etld_labels - 1..].join(".");
    let subdomains: Vec<String> = labels[..n - etld_labels - 1]
        .iter()
        .map(|l| l.to_string())
        .collect();
    let subdomain_depth = subdomains.len();

    DomainParts {
        host,
        effective_tld,
        registrable_domain,
        subdomains,
        subdomain_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_com() {
        let parts = split_host("www.google.com");
        assert_eq!(parts.effective_tld, "com");
        assert_eq!(parts.registrable_domain, "google.com");
        assert_eq!(parts.subdomains, vec!["www"]);
        assert_eq!(parts.subdomain_depth, 1);
    }

    #[test]
    fn test_two_part_suffix() {
        let parts = split_host("commbank.com.au");
        assert_eq!(parts.effective_tld, "com.au");
        assert_eq!(parts.registrable_domain, "commbank.com.au");
        assert!(parts.subdomains.is_empty());
        assert_eq!(parts.subdomain_depth, 0);
    }

    #[test]
    fn test_two_part_suffix_with_subdomains() {
        let parts = split_host("online.banking.westpac.com.au");
        assert_eq!(parts.effective_tld, "com.au");
        assert_eq!(parts.registrable_domain, "westpac.com.au");
        assert_eq!(parts.subdomains, vec!["online", "banking"]);
        assert_eq!(parts.subdomain_depth, 2);
    }

    #[test]
    fn test_three_part_suffix() {
        let parts = split_host("school.pvt.k12.ma.us");
        assert_eq!(parts.effective_tld, "pvt.k12.ma.us");
        assert_eq!(parts.registrable_domain, "school.pvt.k12.ma.us");
        assert!(parts.subdomains.is_empty());
    }

    #[test]
    fn test_bare_suffix() {
        let parts = split_host("com.au");
        assert_eq!(parts.registrable_domain, "com.au");
        assert_eq!(parts.effective_tld, "com.au");
        assert!(parts.subdomains.is_empty());
        assert_eq!(parts.subdomain_depth, 0);
    }

    #[test]
    fn test_single_label() {
        let parts = split_host("localhost");
        assert_eq!(parts.registrable_domain, "localhost");
        assert_eq!(parts.effective_tld, "localhost");
        assert_eq!(parts.subdomain_depth, 0);
    }

    #[test]
    fn test_blank_host() {
        let parts = split_host("  ");
        assert_eq!(parts, DomainParts::default());
    }

    #[test]
    fn test_etld_is_suffix_of_host() {
        for host in ["a.b.c.co.uk", "deep.sub.example.com", "x.gov.br"] {
            let parts = split_host(host);
            assert!(parts.host.ends_with(&parts.effective_tld));
            assert!(parts.registrable_domain.ends_with(&parts.effective_tld));
        }
    }
}
