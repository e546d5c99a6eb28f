// src/sources/crtsh.rs
use crate::session::Session;
use crate::sources::Source;
use crate::types::SubScopeError;
use crate::utils::clean_candidate;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;

const CRTSH_URL: &str = "https://crt.sh";

#[derive(Debug, Deserialize)]
struct CrtShEntry {
    name_value: String,
}

/// Certificate-transparency source. Each certificate covering the zone lists
/// its SANs newline-separated in `name_value`; wildcard markers are stripped
/// and out-of-scope names dropped before anything reaches the candidate set.
#[derive(Debug, Clone)]
pub struct CrtShSource {
    name: String,
    base_url: String,
}

impl Default for CrtShSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CrtShSource {
    pub fn new() -> Self {
        Self {
            name: "crtsh".to_string(),
            base_url: CRTSH_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Source for CrtShSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn clone_source(&self) -> Box<dyn Source> {
        Box::new(self.clone())
    }

    async fn query(
        &self,
        base_domain: &str,
        session: &Session,
    ) -> Result<HashSet<String>, SubScopeError> {
        session.wait_for_rate_limit(&self.name).await;

        let url = format!("{}/?q=%25.{}&output=json", self.base_url, base_domain);
        let response = session.get(&url).await?;

        if !response.status().is_success() {
            return Err(SubScopeError::SourceError {
                source_name: self.name.clone(),
                message: format!("HTTP status {}", response.status()),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| SubScopeError::NetworkError(e.to_string()))?;

        let entries: Vec<CrtShEntry> =
            serde_json::from_str(&text).map_err(|e| SubScopeError::SourceError {
                source_name: self.name.clone(),
                message: format!("Failed to parse JSON: {}", e),
            })?;

        let mut candidates = HashSet::new();
        for entry in entries {
            // one certificate may cover several names, newline-separated
            for line in entry.name_value.lines() {
                if let Some(candidate) = clean_candidate(line, base_domain) {
                    candidates.insert(candidate);
                }
            }
        }

        Ok(candidates)
    }
}
