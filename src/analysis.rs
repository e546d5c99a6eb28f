// src/analysis.rs
use crate::types::{Category, PatternAnalysis, SubdomainRecord, WildcardInfo};
use std::collections::BTreeMap;

/// CNAME substrings that indicate a CDN-fronted host.
const CDN_MARKERS: &[&str] = &[
    "cloudfront",
    "cloudflare",
    "akamai",
    "edgekey",
    "edgesuite",
    "fastly",
    "azureedge",
    "incapdns",
    "cdn",
];

/// Keyword sets checked in `Category` variant order; the first matching
/// bucket wins, so a hostname is never double-counted.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Development,
        &[
            "dev", "test", "staging", "stage", "qa", "uat", "beta", "alpha", "demo", "sandbox",
        ],
    ),
    (
        Category::Mail,
        &["mail", "smtp", "imap", "pop", "webmail", "mx", "exchange"],
    ),
    (
        Category::Infrastructure,
        &[
            "ns", "dns", "vpn", "proxy", "gateway", "firewall", "db", "mysql", "backup",
            "monitor", "status", "git", "jenkins", "grafana",
        ],
    ),
    (
        Category::Application,
        &[
            "api", "app", "portal", "admin", "dashboard", "auth", "login", "sso", "shop",
            "store", "blog", "wiki", "docs",
        ],
    ),
    (Category::Production, &["www", "web", "prod"]),
];

fn categorize(subdomain: &str, base_domain: &str) -> Category {
    // classify on the labels left of the base domain only
    let prefix = subdomain
        .strip_suffix(base_domain)
        .unwrap_or(subdomain)
        .trim_end_matches('.');

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| prefix.contains(kw)) {
            return *category;
        }
    }
    Category::Other
}

fn is_cdn_cname(cname: &str) -> bool {
    CDN_MARKERS.iter().any(|marker| cname.contains(marker))
}

/// Pure pass over the fused map: unique IP set, CDN indicator, and a single
/// semantic bucket per record.
pub fn analyze(
    fused: &BTreeMap<String, SubdomainRecord>,
    base_domain: &str,
    wildcard: &WildcardInfo,
) -> PatternAnalysis {
    let mut unique_ips: Vec<String> = Vec::new();
    let mut has_cdn = false;
    let mut categories: BTreeMap<Category, Vec<SubdomainRecord>> = BTreeMap::new();

    for record in fused.values() {
        for ip in &record.ipv4 {
            if !unique_ips.contains(ip) {
                unique_ips.push(ip.clone());
            }
        }
        if record.cnames.iter().any(|c| is_cdn_cname(c)) {
            has_cdn = true;
        }

        let category = categorize(&record.subdomain, base_domain);
        categories.entry(category).or_default().push(record.clone());
    }

    unique_ips.sort();

    PatternAnalysis {
        total_found: fused.len(),
        unique_ips,
        has_cdn,
        has_wildcard: wildcard.detected,
        wildcard_ips: wildcard.wildcard_ips.clone(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subdomain: &str, ips: &[&str], cnames: &[&str]) -> SubdomainRecord {
        SubdomainRecord {
            subdomain: subdomain.to_string(),
            ipv4: ips.iter().map(|s| s.to_string()).collect(),
            cnames: cnames.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fused(records: Vec<SubdomainRecord>) -> BTreeMap<String, SubdomainRecord> {
        records
            .into_iter()
            .map(|r| (r.subdomain.clone(), r))
            .collect()
    }

    fn no_wildcard() -> WildcardInfo {
        WildcardInfo {
            detected: false,
            wildcard_ips: Vec::new(),
            message: String::new(),
        }
    }

    #[test]
    fn test_categorize_priority_order() {
        // "dev" beats "api": development outranks application
        assert_eq!(
            categorize("api-dev.example.com", "example.com"),
            Category::Development
        );
        assert_eq!(
            categorize("mail.example.com", "example.com"),
            Category::Mail
        );
        assert_eq!(
            categorize("vpn.example.com", "example.com"),
            Category::Infrastructure
        );
        assert_eq!(
            categorize("api.example.com", "example.com"),
            Category::Application
        );
        assert_eq!(
            categorize("www.example.com", "example.com"),
            Category::Production
        );
        assert_eq!(
            categorize("zeus.example.com", "example.com"),
            Category::Other
        );
    }

    #[test]
    fn test_unique_ips_deduplicated_and_sorted() {
        let analysis = analyze(
            &fused(vec![
                record("a.example.com", &["2.2.2.2", "1.1.1.1"], &[]),
                record("b.example.com", &["1.1.1.1"], &[]),
            ]),
            "example.com",
            &no_wildcard(),
        );
        assert_eq!(analysis.total_found, 2);
        assert_eq!(
            analysis.unique_ips,
            vec!["1.1.1.1".to_string(), "2.2.2.2".to_string()]
        );
    }

    #[test]
    fn test_cdn_flag_from_cname_chain() {
        let analysis = analyze(
            &fused(vec![record(
                "static.example.com",
                &[],
                &["d111111abcdef8.cloudfront.net"],
            )]),
            "example.com",
            &no_wildcard(),
        );
        assert!(analysis.has_cdn);

        let analysis = analyze(
            &fused(vec![record("www.example.com", &["1.1.1.1"], &[])]),
            "example.com",
            &no_wildcard(),
        );
        assert!(!analysis.has_cdn);
    }

    #[test]
    fn test_each_record_bucketed_once() {
        let analysis = analyze(
            &fused(vec![
                record("www.example.com", &[], &[]),
                record("mail.example.com", &[], &[]),
                record("staging.example.com", &[], &[]),
            ]),
            "example.com",
            &no_wildcard(),
        );
        let bucketed: usize = analysis.categories.values().map(|v| v.len()).sum();
        assert_eq!(bucketed, 3);
    }

    #[test]
    fn test_wildcard_flags_carried_through() {
        let wildcard = WildcardInfo {
            detected: true,
            wildcard_ips: vec!["1.2.3.4".to_string()],
            message: String::new(),
        };
        let analysis = analyze(&fused(Vec::new()), "example.com", &wildcard);
        assert!(analysis.has_wildcard);
        assert_eq!(analysis.wildcard_ips, vec!["1.2.3.4".to_string()]);
    }
}
