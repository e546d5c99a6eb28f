// src/sources/mod.rs
use crate::session::Session;
use crate::types::{Config, SubScopeError};
use async_trait::async_trait;
use std::collections::HashSet;

mod crtsh;
mod hackertarget;
mod urlscan;

pub use crtsh::CrtShSource;
pub use hackertarget::HackerTargetSource;
pub use urlscan::UrlScanSource;

/// A passive reconnaissance backend. One GET per invocation, scoped to the
/// base domain; every returned candidate already satisfies the domain
/// invariant. Failures surface as `Err` here and are neutralized per-source
/// at the orchestrator fan-in, never escalated.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;
    async fn query(
        &self,
        base_domain: &str,
        session: &Session,
    ) -> Result<HashSet<String>, SubScopeError>;
    fn clone_source(&self) -> Box<dyn Source>;
}

pub fn create_source(name: &str) -> Option<Box<dyn Source>> {
    match name.to_lowercase().as_str() {
        "crtsh" => Some(Box::new(CrtShSource::new())),
        "hackertarget" => Some(Box::new(HackerTargetSource::new())),
        "urlscan" => Some(Box::new(UrlScanSource::new())),
        _ => None,
    }
}

pub fn get_sources(config: &Config) -> Vec<Box<dyn Source>> {
    config
        .sources
        .iter()
        .filter_map(|name| create_source(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;

    #[test]
    fn test_create_source() {
        assert!(create_source("crtsh").is_some());
        assert!(create_source("HackerTarget").is_some());
        assert!(create_source("urlscan").is_some());
        assert!(create_source("invalid").is_none());
    }

    #[test]
    fn test_default_config_selects_all_sources() {
        let config = Config::default();
        assert_eq!(get_sources(&config).len(), 3);
    }
}
