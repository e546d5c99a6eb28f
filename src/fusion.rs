// src/fusion.rs
use crate::resolver::Resolver;
use crate::types::SubdomainRecord;
use log::info;
use std::collections::{BTreeMap, HashSet};

/// Merge brute-force survivors and verified passive records into the one
/// canonical map. Brute records go in first and are never overwritten by a
/// passive record for the same key; the BTreeMap keeps output order
/// lexicographic and keys unique by construction.
pub fn merge(
    brute_records: Vec<SubdomainRecord>,
    verified_records: Vec<SubdomainRecord>,
) -> BTreeMap<String, SubdomainRecord> {
    let mut fused = BTreeMap::new();

    for record in brute_records {
        fused.entry(record.subdomain.clone()).or_insert(record);
    }
    for record in verified_records {
        fused.entry(record.subdomain.clone()).or_insert(record);
    }

    fused
}

/// Confirm liveness of passive candidates that brute force did not already
/// cover, then merge. Unverified candidates are dropped, never reported.
/// Returns the fused map and the number of passive candidates that verified.
pub async fn fuse(
    resolver: &Resolver,
    brute_records: Vec<SubdomainRecord>,
    passive_candidates: HashSet<String>,
) -> (BTreeMap<String, SubdomainRecord>, usize) {
    let covered: HashSet<String> = brute_records
        .iter()
        .map(|r| r.subdomain.clone())
        .collect();

    let unverified: Vec<String> = passive_candidates
        .into_iter()
        .filter(|c| !covered.contains(c))
        .collect();

    info!("Verifying {} passive candidates", unverified.len());
    let results = resolver.resolve_many(unverified).await;

    let mut verified_records = Vec::new();
    for result in results {
        if result.found {
            verified_records.push(SubdomainRecord {
                subdomain: result.hostname,
                ipv4: result.ipv4,
                cnames: result.cnames,
            });
        }
    }
    let verified_count = verified_records.len();

    (merge(brute_records, verified_records), verified_count)
}
