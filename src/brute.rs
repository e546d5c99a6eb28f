// src/brute.rs
use crate::resolver::Resolver;
use crate::types::{ResolutionResult, SubdomainRecord, WildcardInfo};
use log::{debug, info};

/// Common subdomain labels walked when passive reconnaissance under-delivers.
/// Immutable, loaded once at process start.
pub const WORDLIST: &[&str] = &[
    "www", "mail", "ftp", "smtp", "pop", "pop3", "imap", "webmail", "ns1", "ns2", "ns3", "dns",
    "mx", "mx1", "mx2", "vpn", "remote", "ssh", "portal", "admin", "administrator", "intranet",
    "extranet", "api", "api-dev", "app", "apps", "dev", "devel", "development", "test", "testing",
    "staging", "stage", "qa", "uat", "demo", "beta", "alpha", "secure", "login", "auth", "sso",
    "gateway", "proxy", "cdn", "static", "assets", "img", "media", "files", "docs", "wiki",
    "blog", "shop", "store", "db", "mysql", "backup", "monitor", "status", "git", "jenkins",
    "grafana", "cloud",
];

/// A resolved candidate survives the wildcard filter unless the zone is
/// wildcarded and every signal it carries is the catch-all answer.
pub fn passes_wildcard_filter(result: &ResolutionResult, wildcard: &WildcardInfo) -> bool {
    if !wildcard.detected {
        return true;
    }
    !result
        .ipv4
        .iter()
        .any(|ip| wildcard.wildcard_ips.contains(ip))
}

/// Walk the dictionary against the base domain. Lookups run under the
/// resolver's shared semaphore, so the outbound query burst stays bounded by
/// `max_concurrent_lookups` regardless of dictionary length. Returns the
/// surviving records and the number of labels tested.
pub async fn run(
    resolver: &Resolver,
    base_domain: &str,
    wildcard: &WildcardInfo,
) -> (Vec<SubdomainRecord>, usize) {
    let candidates: Vec<String> = WORDLIST
        .iter()
        .map(|label| format!("{}.{}", label, base_domain))
        .collect();
    let tested = candidates.len();

    info!(
        "Brute forcing {} candidate labels against {}",
        tested, base_domain
    );

    let results = resolver.resolve_many(candidates).await;

    let mut records = Vec::new();
    for result in results {
        if !result.found {
            continue;
        }
        if !passes_wildcard_filter(&result, wildcard) {
            debug!("Dropping {} (wildcard catch-all answer)", result.hostname);
            continue;
        }
        records.push(SubdomainRecord {
            subdomain: result.hostname,
            ipv4: result.ipv4,
            cnames: result.cnames,
        });
    }

    info!(
        "Brute force kept {} of {} tested labels",
        records.len(),
        tested
    );
    (records, tested)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(hostname: &str, ips: &[&str]) -> ResolutionResult {
        ResolutionResult {
            hostname: hostname.to_string(),
            ipv4: ips.iter().map(|s| s.to_string()).collect(),
            cnames: Vec::new(),
            found: true,
        }
    }

    fn wildcard(ips: &[&str]) -> WildcardInfo {
        WildcardInfo {
            detected: true,
            wildcard_ips: ips.iter().map(|s| s.to_string()).collect(),
            message: String::new(),
        }
    }

    fn no_wildcard() -> WildcardInfo {
        WildcardInfo {
            detected: false,
            wildcard_ips: Vec::new(),
            message: String::new(),
        }
    }

    #[test]
    fn test_wordlist_sized_and_unique() {
        assert!(WORDLIST.len() >= 50);
        let mut labels: Vec<&str> = WORDLIST.to_vec();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), WORDLIST.len());
    }

    #[test]
    fn test_catch_all_answer_filtered() {
        let result = resolved("foo.example.com", &["1.2.3.4"]);
        assert!(!passes_wildcard_filter(&result, &wildcard(&["1.2.3.4"])));
    }

    #[test]
    fn test_distinct_ip_survives_wildcard() {
        let result = resolved("vpn.example.com", &["9.9.9.9"]);
        assert!(passes_wildcard_filter(&result, &wildcard(&["1.2.3.4"])));
    }

    #[test]
    fn test_partial_overlap_filtered() {
        // any intersection with the wildcard set marks the record as noise
        let result = resolved("www.example.com", &["9.9.9.9", "1.2.3.4"]);
        assert!(!passes_wildcard_filter(&result, &wildcard(&["1.2.3.4"])));
    }

    #[test]
    fn test_no_wildcard_keeps_everything() {
        let result = resolved("www.example.com", &["1.2.3.4"]);
        assert!(passes_wildcard_filter(&result, &no_wildcard()));
    }
}
