// src/resolver.rs
use crate::types::{ResolutionResult, ResolverSettings, SubScopeError};
use futures::stream::{FuturesUnordered, StreamExt};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Semaphore;
use trust_dns_resolver::config::{ResolverConfig as DnsResolverConfig, ResolverOpts};
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

/// The one shared DNS leaf. Wildcard probing, brute force and passive
/// verification all go through here, so the semaphore bounds the total
/// number of in-flight lookups across the whole pipeline.
pub struct Resolver {
    resolver: TokioAsyncResolver,
    semaphore: Arc<Semaphore>,
}

impl Resolver {
    pub fn new(settings: &ResolverSettings) -> Result<Self, SubScopeError> {
        let resolver = if settings.use_system_resolver {
            TokioAsyncResolver::tokio_from_system_conf().map_err(|e| {
                SubScopeError::ResolutionError(format!("Failed to create system resolver: {}", e))
            })?
        } else {
            let mut resolver_config = DnsResolverConfig::new();

            for ns in &settings.nameservers {
                let socket_addr = SocketAddr::from_str(ns).map_err(|e| {
                    SubScopeError::ConfigError(format!("Invalid nameserver address {}: {}", ns, e))
                })?;
                resolver_config.add_name_server(trust_dns_resolver::config::NameServerConfig {
                    socket_addr,
                    protocol: trust_dns_resolver::config::Protocol::Udp,
                    tls_dns_name: None,
                    trust_negative_responses: false,
                    bind_addr: None,
                });
            }

            let mut opts = ResolverOpts::default();
            opts.timeout = settings.timeout;
            opts.attempts = 2;

            TokioAsyncResolver::tokio(resolver_config, opts)
        };

        Ok(Self {
            resolver,
            semaphore: Arc::new(Semaphore::new(settings.max_concurrent_lookups)),
        })
    }

    /// Resolve one hostname: A and CNAME looked up concurrently, each
    /// failure degrading independently to an empty record set. NXDOMAIN,
    /// SERVFAIL and timeouts are all a plain miss, never an error.
    pub async fn resolve(&self, hostname: &str) -> ResolutionResult {
        let _permit = match self.semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return ResolutionResult::miss(hostname),
        };

        let (a_lookup, cname_lookup) = tokio::join!(
            self.resolver.lookup(hostname, RecordType::A),
            self.resolver.lookup(hostname, RecordType::CNAME),
        );

        let mut ipv4: Vec<String> = Vec::new();
        if let Ok(lookup) = a_lookup {
            for rdata in lookup.iter() {
                if let Some(a) = rdata.as_a() {
                    let ip = a.0.to_string();
                    if !ipv4.contains(&ip) {
                        ipv4.push(ip);
                    }
                }
            }
        }

        let mut cnames: Vec<String> = Vec::new();
        if let Ok(lookup) = cname_lookup {
            for rdata in lookup.iter() {
                if let Some(cname) = rdata.as_cname() {
                    let name = cname.0.to_string().trim_end_matches('.').to_lowercase();
                    if !cnames.contains(&name) {
                        cnames.push(name);
                    }
                }
            }
        }

        let found = !ipv4.is_empty() || !cnames.is_empty();
        ResolutionResult {
            hostname: hostname.to_string(),
            ipv4,
            cnames,
            found,
        }
    }

    /// Resolve many hostnames concurrently. Concurrency is bounded by the
    /// shared semaphore; results come back in completion order.
    pub async fn resolve_many(&self, hostnames: Vec<String>) -> Vec<ResolutionResult> {
        let mut futures = FuturesUnordered::new();

        for hostname in hostnames {
            futures.push(async move { self.resolve(&hostname).await });
        }

        let mut results = Vec::new();
        while let Some(result) = futures.next().await {
            results.push(result);
        }
        results
    }

    /// Authoritative nameservers for a zone; an empty list on any failure.
    pub async fn nameservers(&self, domain: &str) -> Vec<String> {
        match self.resolver.ns_lookup(domain).await {
            Ok(lookup) => lookup
                .iter()
                .map(|ns| ns.0.to_string().trim_end_matches('.').to_lowercase())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
