// src/axfr.rs
use crate::resolver::Resolver;
use crate::types::ZoneTransferReport;
use log::info;

/// Best-effort zone-transfer probe. Only the NS lookup is performed; an
/// actual AXFR needs a privileged TCP protocol path and is refused by
/// virtually every public nameserver, so the expected outcome is a negative
/// informational result, not an error.
pub async fn probe(resolver: &Resolver, base_domain: &str) -> ZoneTransferReport {
    let nameservers = resolver.nameservers(base_domain).await;

    info!(
        "Zone-transfer probe for {}: {} nameservers found",
        base_domain,
        nameservers.len()
    );

    summarize(base_domain, nameservers)
}

fn summarize(base_domain: &str, mut nameservers: Vec<String>) -> ZoneTransferReport {
    nameservers.sort();

    let message = if nameservers.is_empty() {
        format!("No authoritative nameservers found for {}", base_domain)
    } else {
        format!(
            "Found {} nameservers; AXFR not attempted (refused by public servers)",
            nameservers.len()
        )
    };

    ZoneTransferReport {
        attempted: true,
        success: false,
        nameservers,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ns_lookup_success_is_still_negative() {
        // Scenario: 2 nameservers answer => attempted, not successful
        let report = summarize(
            "example.com",
            vec!["ns2.example.com".to_string(), "ns1.example.com".to_string()],
        );
        assert!(report.attempted);
        assert!(!report.success);
        assert_eq!(
            report.nameservers,
            vec!["ns1.example.com".to_string(), "ns2.example.com".to_string()]
        );
        assert!(report.message.contains("AXFR not attempted"));
    }

    #[test]
    fn test_no_nameservers() {
        let report = summarize("example.com", Vec::new());
        assert!(report.attempted);
        assert!(!report.success);
        assert!(report.nameservers.is_empty());
        assert!(report.message.contains("No authoritative nameservers"));
    }
}
