// src/output.rs
use crate::types::{DiscoveryReport, OutputConfig, OutputFormat, SubScopeError};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn write_report(&self, report: &DiscoveryReport) -> Result<(), SubScopeError> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(file_path, report)
        } else {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            self.write_output(&mut handle, report)
        }
    }

    fn write_to_file(&self, file_path: &str, report: &DiscoveryReport) -> Result<(), SubScopeError> {
        if let Some(parent) = Path::new(file_path).parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SubScopeError::OutputError(format!("Failed to create directory: {}", e)))?;
        }

        let mut file = File::create(file_path)
            .map_err(|e| SubScopeError::OutputError(format!("Failed to create file: {}", e)))?;

        self.write_output(&mut file, report)?;

        println!("Results written to: {}", file_path);
        Ok(())
    }

    fn write_output<W: Write>(&self, writer: &mut W, report: &DiscoveryReport) -> Result<(), SubScopeError> {
        match self.config.format {
            OutputFormat::Text => self.write_text_output(writer, report),
            OutputFormat::Json => self.write_json_output(writer, report),
        }
    }

    fn write_text_output<W: Write>(
        &self,
        writer: &mut W,
        report: &DiscoveryReport,
    ) -> Result<(), SubScopeError> {
        let out = |e: std::io::Error| SubScopeError::OutputError(e.to_string());

        writeln!(writer, "\n[*] Domain: {} (query: {})", report.base_domain, report.query)
            .map_err(out)?;
        writeln!(
            writer,
            "[*] Found {} subdomains, {} unique IPs in {:?}",
            report.stats.total_subdomains, report.stats.unique_ips, report.stats.duration
        )
        .map_err(out)?;
        writeln!(writer, "[*] {}", report.provenance.wildcard.message).map_err(out)?;

        for source in &report.provenance.sources {
            if source.queried {
                writeln!(writer, "[*] {}: {} candidates", source.source, source.found)
                    .map_err(out)?;
            } else {
                writeln!(
                    writer,
                    "[!] {}: unavailable ({})",
                    source.source,
                    source.error.as_deref().unwrap_or("unknown")
                )
                .map_err(out)?;
            }
        }

        let brute = &report.provenance.brute_force;
        if brute.ran {
            writeln!(
                writer,
                "[*] Brute force: tested {} labels, kept {} ({})",
                brute.tested, brute.found, brute.reason
            )
            .map_err(out)?;
        } else {
            writeln!(writer, "[*] Brute force skipped: {}", brute.reason).map_err(out)?;
        }
        writeln!(writer, "[*] Verified {} passive candidates", report.provenance.verified_count)
            .map_err(out)?;
        writeln!(writer, "[*] Zone transfer: {}", report.provenance.zone_transfer.message)
            .map_err(out)?;

        writeln!(writer, "\n[*] Results:").map_err(out)?;
        for record in &report.subdomains {
            if record.ipv4.is_empty() && record.cnames.is_empty() {
                writeln!(writer, "{}", record.subdomain).map_err(out)?;
            } else if record.cnames.is_empty() {
                writeln!(writer, "{} - {}", record.subdomain, record.ipv4.join(", "))
                    .map_err(out)?;
            } else {
                writeln!(
                    writer,
                    "{} - {} (CNAME: {})",
                    record.subdomain,
                    record.ipv4.join(", "),
                    record.cnames.join(" -> ")
                )
                .map_err(out)?;
            }
        }

        if self.config.verbose {
            writeln!(writer, "\n[*] Categories:").map_err(out)?;
            for (category, records) in &report.analysis.categories {
                writeln!(writer, "  {:?}: {}", category, records.len()).map_err(out)?;
            }
        }

        Ok(())
    }

    fn write_json_output<W: Write>(
        &self,
        writer: &mut W,
        report: &DiscoveryReport,
    ) -> Result<(), SubScopeError> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| SubScopeError::OutputError(format!("Failed to serialize JSON: {}", e)))?;

        writeln!(writer, "{}", json).map_err(|e| SubScopeError::OutputError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BruteForceReport, DiscoveryStats, PatternAnalysis, Provenance, SubdomainRecord,
        WildcardInfo, ZoneTransferReport,
    };
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn sample_report() -> DiscoveryReport {
        DiscoveryReport {
            query: "https://example.com".to_string(),
            base_domain: "example.com".to_string(),
            subdomains: vec![SubdomainRecord {
                subdomain: "www.example.com".to_string(),
                ipv4: vec!["93.184.216.34".to_string()],
                cnames: Vec::new(),
            }],
            analysis: PatternAnalysis {
                total_found: 1,
                unique_ips: vec!["93.184.216.34".to_string()],
                has_cdn: false,
                has_wildcard: false,
                wildcard_ips: Vec::new(),
                categories: BTreeMap::new(),
            },
            provenance: Provenance {
                wildcard: WildcardInfo {
                    detected: false,
                    wildcard_ips: Vec::new(),
                    message: "No wildcard DNS detected (0 of 3 random probes resolved)"
                        .to_string(),
                },
                sources: Vec::new(),
                verified_count: 1,
                brute_force: BruteForceReport {
                    ran: false,
                    reason: "passive coverage sufficient (7 candidates, floor is 5)".to_string(),
                    tested: 0,
                    found: 0,
                },
                zone_transfer: ZoneTransferReport {
                    attempted: true,
                    success: false,
                    nameservers: Vec::new(),
                    message: "No authoritative nameservers found for example.com".to_string(),
                },
            },
            stats: DiscoveryStats {
                total_subdomains: 1,
                unique_ips: 1,
                duration: Duration::from_millis(1234),
            },
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_json_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let manager = OutputManager::new(OutputConfig {
            format: OutputFormat::Json,
            file: Some(path.to_str().unwrap().to_string()),
            verbose: false,
        });

        manager.write_report(&sample_report()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: DiscoveryReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.base_domain, "example.com");
        assert_eq!(parsed.subdomains.len(), 1);
    }

    #[test]
    fn test_text_report_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let manager = OutputManager::new(OutputConfig {
            format: OutputFormat::Text,
            file: Some(path.to_str().unwrap().to_string()),
            verbose: false,
        });

        manager.write_report(&sample_report()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("www.example.com - 93.184.216.34"));
        assert!(contents.contains("Brute force skipped"));
    }
}
