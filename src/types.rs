// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
    pub rate_limits: HashMap<String, Option<u32>>,
    pub resolver: ResolverSettings,
    pub output: OutputConfig,
    pub sources: Vec<String>,
    pub brute_force: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut rate_limits = HashMap::new();
        rate_limits.insert("crtsh".to_string(), Some(2));
        rate_limits.insert("hackertarget".to_string(), Some(2));
        rate_limits.insert("urlscan".to_string(), Some(2));

        Self {
            timeout: Duration::from_secs(15),
            user_agent: "SubScope/0.1".to_string(),
            proxy: None,
            rate_limits,
            resolver: ResolverSettings::default(),
            output: OutputConfig::default(),
            sources: vec![
                "crtsh".to_string(),
                "hackertarget".to_string(),
                "urlscan".to_string(),
            ],
            brute_force: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file: Option<String>,
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            file: None,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    pub max_concurrent_lookups: usize,
    pub timeout: Duration,
    pub nameservers: Vec<String>,
    pub use_system_resolver: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: 20,
            timeout: Duration::from_secs(5),
            nameservers: vec![
                "8.8.8.8:53".to_string(),
                "8.8.4.4:53".to_string(),
                "1.1.1.1:53".to_string(),
                "1.0.0.1:53".to_string(),
            ],
            use_system_resolver: false,
        }
    }
}

/// Outcome of one A+CNAME resolution attempt. Immutable once returned;
/// a failed or timed-out lookup is `found = false`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub hostname: String,
    pub ipv4: Vec<String>,
    pub cnames: Vec<String>,
    pub found: bool,
}

impl ResolutionResult {
    pub fn miss(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            ipv4: Vec::new(),
            cnames: Vec::new(),
            found: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WildcardInfo {
    pub detected: bool,
    pub wildcard_ips: Vec<String>,
    pub message: String,
}

/// Per-source fan-in result. `queried = false` means the source never got a
/// usable answer; `error` records why, so degraded coverage stays auditable.
#[derive(Debug, Clone)]
pub struct PassiveSourceResult {
    pub source: String,
    pub candidates: HashSet<String>,
    pub queried: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceProvenance {
    pub source: String,
    pub found: usize,
    pub queried: bool,
    pub error: Option<String>,
}

impl From<&PassiveSourceResult> for SourceProvenance {
    fn from(result: &PassiveSourceResult) -> Self {
        Self {
            source: result.source.clone(),
            found: result.candidates.len(),
            queried: result.queried,
            error: result.error.clone(),
        }
    }
}

/// One confirmed subdomain in the fused output. Keyed uniquely by
/// `subdomain` in the final map; never duplicated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubdomainRecord {
    pub subdomain: String,
    pub ipv4: Vec<String>,
    pub cnames: Vec<String>,
}

/// Semantic bucket for a subdomain. Variant order is the match priority:
/// a hostname hitting several keyword sets lands in the first one only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Development,
    Mail,
    Infrastructure,
    Application,
    Production,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub total_found: usize,
    pub unique_ips: Vec<String>,
    pub has_cdn: bool,
    pub has_wildcard: bool,
    pub wildcard_ips: Vec<String>,
    pub categories: BTreeMap<Category, Vec<SubdomainRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BruteForceReport {
    pub ran: bool,
    pub reason: String,
    pub tested: usize,
    pub found: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneTransferReport {
    pub attempted: bool,
    pub success: bool,
    pub nameservers: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    pub wildcard: WildcardInfo,
    pub sources: Vec<SourceProvenance>,
    pub verified_count: usize,
    pub brute_force: BruteForceReport,
    pub zone_transfer: ZoneTransferReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryStats {
    pub total_subdomains: usize,
    pub unique_ips: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub query: String,
    pub base_domain: String,
    pub subdomains: Vec<SubdomainRecord>,
    pub analysis: PatternAnalysis,
    pub provenance: Provenance,
    pub stats: DiscoveryStats,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum SubScopeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source error in {source_name}: {message}")]
    SourceError {
        source_name: String,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Resolution error: {0}")]
    ResolutionError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Rate limit error: {0}")]
    RateLimitError(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}
