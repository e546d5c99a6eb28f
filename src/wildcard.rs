// src/wildcard.rs
//
// Many zones answer every subdomain query with a catch-all record (CDN or
// domain-parking setups). Undetected, that turns brute forcing into a
// generator of false positives, so this probe runs before anything else and
// its verdict gates the brute-force filter.
use crate::resolver::Resolver;
use crate::types::{ResolutionResult, WildcardInfo};
use chrono::Utc;
use log::{debug, info};
use rand::distributions::Alphanumeric;
use rand::Rng;

pub const WILDCARD_PROBE_COUNT: usize = 3;
// A single spurious resolution (transient resolver glitch) must not flag a
// wildcard, while a true catch-all reliably answers at least two probes.
// TODO: validate both thresholds against a corpus of known-wildcard zones.
pub const WILDCARD_MIN_HITS: usize = 2;

/// Three synthetic hostnames that are virtually certain not to exist, each
/// generated differently so one correlated collision cannot skew the vote.
pub fn probe_hostnames(base_domain: &str) -> Vec<String> {
    let mut rng = rand::thread_rng();

    let token: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(|c| c.to_ascii_lowercase() as char)
        .collect();

    let stamped = format!("{:x}-{}", rng.gen::<u64>(), Utc::now().timestamp_millis());

    let left: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|c| c.to_ascii_lowercase() as char)
        .collect();
    let right: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|c| c.to_ascii_lowercase() as char)
        .collect();

    vec![
        format!("{}.{}", token, base_domain),
        format!("{}.{}", stamped, base_domain),
        format!("{}-{}.{}", left, right, base_domain),
    ]
}

/// Pure verdict over the probe resolutions: `WILDCARD_MIN_HITS` of
/// `WILDCARD_PROBE_COUNT` resolving declares the zone wildcarded, and the
/// IP union of all resolving probes becomes the filter set.
pub fn evaluate_probes(results: &[ResolutionResult]) -> WildcardInfo {
    let hits = results.iter().filter(|r| r.found).count();

    if hits >= WILDCARD_MIN_HITS {
        let mut wildcard_ips: Vec<String> = Vec::new();
        for result in results.iter().filter(|r| r.found) {
            for ip in &result.ipv4 {
                if !wildcard_ips.contains(ip) {
                    wildcard_ips.push(ip.clone());
                }
            }
        }
        wildcard_ips.sort();

        WildcardInfo {
            detected: true,
            wildcard_ips,
            message: format!(
                "Wildcard DNS detected: {} of {} random probes resolved",
                hits, WILDCARD_PROBE_COUNT
            ),
        }
    } else {
        WildcardInfo {
            detected: false,
            wildcard_ips: Vec::new(),
            message: format!(
                "No wildcard DNS detected ({} of {} random probes resolved)",
                hits, WILDCARD_PROBE_COUNT
            ),
        }
    }
}

/// Probe the zone. Must complete before brute-force work starts; its output
/// is read-only input to the brute-force filter.
pub async fn detect(resolver: &Resolver, base_domain: &str) -> WildcardInfo {
    let probes = probe_hostnames(base_domain);
    debug!("Wildcard probes for {}: {:?}", base_domain, probes);

    let results = resolver.resolve_many(probes).await;
    let info = evaluate_probes(&results);
    info!("{}", info.message);
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResolutionResult;

    fn hit(hostname: &str, ips: &[&str]) -> ResolutionResult {
        ResolutionResult {
            hostname: hostname.to_string(),
            ipv4: ips.iter().map(|s| s.to_string()).collect(),
            cnames: Vec::new(),
            found: true,
        }
    }

    #[test]
    fn test_probe_hostnames_are_distinct_and_scoped() {
        let probes = probe_hostnames("example.com");
        assert_eq!(probes.len(), WILDCARD_PROBE_COUNT);
        for probe in &probes {
            assert!(probe.ends_with(".example.com"));
        }
        assert_ne!(probes[0], probes[1]);
        assert_ne!(probes[1], probes[2]);
        assert_ne!(probes[0], probes[2]);
    }

    #[test]
    fn test_all_probes_resolving_same_ip() {
        // Scenario: every probe answers 1.2.3.4
        let results = vec![
            hit("a.example.com", &["1.2.3.4"]),
            hit("b.example.com", &["1.2.3.4"]),
            hit("c.example.com", &["1.2.3.4"]),
        ];
        let info = evaluate_probes(&results);
        assert!(info.detected);
        assert_eq!(info.wildcard_ips, vec!["1.2.3.4".to_string()]);
    }

    #[test]
    fn test_two_of_three_is_wildcard() {
        let results = vec![
            hit("a.example.com", &["1.2.3.4"]),
            ResolutionResult::miss("b.example.com"),
            hit("c.example.com", &["5.6.7.8"]),
        ];
        let info = evaluate_probes(&results);
        assert!(info.detected);
        assert_eq!(
            info.wildcard_ips,
            vec!["1.2.3.4".to_string(), "5.6.7.8".to_string()]
        );
    }

    #[test]
    fn test_single_hit_is_not_wildcard() {
        let results = vec![
            hit("a.example.com", &["1.2.3.4"]),
            ResolutionResult::miss("b.example.com"),
            ResolutionResult::miss("c.example.com"),
        ];
        let info = evaluate_probes(&results);
        assert!(!info.detected);
        assert!(info.wildcard_ips.is_empty());
    }

    #[test]
    fn test_no_hits_is_not_wildcard() {
        let results = vec![
            ResolutionResult::miss("a.example.com"),
            ResolutionResult::miss("b.example.com"),
            ResolutionResult::miss("c.example.com"),
        ];
        assert!(!evaluate_probes(&results).detected);
    }
}
