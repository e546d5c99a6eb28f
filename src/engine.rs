// src/engine.rs
use crate::analysis;
use crate::axfr;
use crate::brute;
use crate::fusion;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::session::Session;
use crate::sources::{self, Source};
use crate::types::{
    BruteForceReport, Config, DiscoveryReport, DiscoveryStats, PassiveSourceResult, Provenance,
    SourceProvenance, SubScopeError,
};
use crate::utils::{is_valid_domain, normalize_base_domain};
use crate::wildcard;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Below this many unique passive candidates, brute force kicks in. Brute
/// forcing is expensive and noisy, so it is reserved for zones that passive
/// reconnaissance failed to cover.
pub const BRUTE_FORCE_PASSIVE_FLOOR: usize = 5;

pub struct DiscoveryEngine {
    config: Config,
    session: Session,
    sources: Vec<Box<dyn Source>>,
    resolver: Arc<Resolver>,
}

impl DiscoveryEngine {
    pub fn new(config: Config) -> Result<Self> {
        let session = Session::new(&config)?;

        let sources = sources::get_sources(&config);
        if sources.is_empty() {
            return Err(SubScopeError::ConfigError(
                "No valid sources configured".to_string(),
            ));
        }

        let resolver = Arc::new(Resolver::new(&config.resolver)?);

        Ok(Self {
            config,
            session,
            sources,
            resolver,
        })
    }

    /// Run the full discovery pipeline for one domain or URL. The only
    /// fatal condition is failing to extract a usable base domain; every
    /// per-source and per-resolution failure degrades locally.
    pub async fn discover(&self, query: &str) -> Result<DiscoveryReport> {
        let base_domain = normalize_base_domain(query);
        if base_domain.is_empty() || !is_valid_domain(&base_domain) {
            return Err(SubScopeError::InvalidDomain(query.to_string()));
        }

        info!("Discovering subdomains of {} (query: {})", base_domain, query);
        let start_time = Instant::now();

        // Wildcard detection runs to completion first; its verdict gates the
        // brute-force filter downstream.
        let wildcard_info = wildcard::detect(&self.resolver, &base_domain).await;

        // Passive sources and the zone-transfer probe have no ordering
        // relationship and run fully concurrently.
        let (source_results, zone_transfer) = tokio::join!(
            self.query_passive_sources(&base_domain),
            axfr::probe(&self.resolver, &base_domain),
        );

        let mut passive_candidates: HashSet<String> = HashSet::new();
        for result in &source_results {
            passive_candidates.extend(result.candidates.iter().cloned());
        }
        info!(
            "Passive sources yielded {} unique candidates",
            passive_candidates.len()
        );

        let (should_run, reason) =
            brute_force_gate(self.config.brute_force, passive_candidates.len());
        let (brute_records, brute_report) = if should_run {
            let (records, tested) =
                brute::run(&self.resolver, &base_domain, &wildcard_info).await;
            let found = records.len();
            (
                records,
                BruteForceReport {
                    ran: true,
                    reason,
                    tested,
                    found,
                },
            )
        } else {
            (
                Vec::new(),
                BruteForceReport {
                    ran: false,
                    reason,
                    tested: 0,
                    found: 0,
                },
            )
        };

        let (fused, verified_count) =
            fusion::fuse(&self.resolver, brute_records, passive_candidates).await;

        let pattern_analysis = analysis::analyze(&fused, &base_domain, &wildcard_info);

        let subdomains: Vec<_> = fused.into_values().collect();
        let stats = DiscoveryStats {
            total_subdomains: subdomains.len(),
            unique_ips: pattern_analysis.unique_ips.len(),
            duration: start_time.elapsed(),
        };

        info!(
            "Discovery for {} finished: {} subdomains, {} unique IPs in {:?}",
            base_domain, stats.total_subdomains, stats.unique_ips, stats.duration
        );

        Ok(DiscoveryReport {
            query: query.to_string(),
            base_domain,
            subdomains,
            analysis: pattern_analysis,
            provenance: Provenance {
                wildcard: wildcard_info,
                sources: source_results.iter().map(SourceProvenance::from).collect(),
                verified_count,
                brute_force: brute_report,
                zone_transfer,
            },
            stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Fan out all configured passive sources and always fan back in:
    /// a failed source contributes an empty candidate set plus its recorded
    /// error, never an abort.
    async fn query_passive_sources(&self, base_domain: &str) -> Vec<PassiveSourceResult> {
        let mut futures = FuturesUnordered::new();

        for source in &self.sources {
            let source = source.clone_source();
            let source_name = source.name().to_string();
            let session = self.session.clone();
            let domain = base_domain.to_string();

            futures.push(async move {
                let start = Instant::now();
                let result = source.query(&domain, &session).await;
                let duration = start.elapsed();

                match result {
                    Ok(candidates) => {
                        info!(
                            "{}: {} candidates for {} in {:?}",
                            source_name,
                            candidates.len(),
                            domain,
                            duration
                        );
                        PassiveSourceResult {
                            source: source_name,
                            candidates,
                            queried: true,
                            error: None,
                        }
                    }
                    Err(e) => {
                        warn!("{}: query for {} failed: {}", source_name, domain, e);
                        PassiveSourceResult {
                            source: source_name,
                            candidates: HashSet::new(),
                            queried: false,
                            error: Some(e.to_string()),
                        }
                    }
                }
            });
        }

        let mut results = Vec::new();
        while let Some(result) = futures.next().await {
            results.push(result);
        }
        results.sort_by(|a, b| a.source.cmp(&b.source));
        results
    }
}

/// Gate decision for the brute-force step, with the reason that lands in
/// provenance either way.
fn brute_force_gate(enabled: bool, passive_count: usize) -> (bool, String) {
    if !enabled {
        return (false, "disabled by configuration".to_string());
    }
    if passive_count >= BRUTE_FORCE_PASSIVE_FLOOR {
        (
            false,
            format!(
                "passive coverage sufficient ({} candidates, floor is {})",
                passive_count, BRUTE_FORCE_PASSIVE_FLOOR
            ),
        )
    } else {
        (
            true,
            format!(
                "passive sources returned only {} candidates (floor is {})",
                passive_count, BRUTE_FORCE_PASSIVE_FLOOR
            ),
        )
    }
}
