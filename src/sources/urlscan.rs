// src/sources/urlscan.rs
use crate::session::Session;
use crate::sources::Source;
use crate::types::SubScopeError;
use crate::utils::clean_candidate;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;

const URLSCAN_URL: &str = "https://urlscan.io";
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct UrlScanResponse {
    #[serde(default)]
    results: Vec<UrlScanResult>,
}

#[derive(Debug, Deserialize)]
struct UrlScanResult {
    page: Option<UrlScanPage>,
    task: Option<UrlScanTask>,
}

#[derive(Debug, Deserialize)]
struct UrlScanPage {
    domain: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UrlScanTask {
    domain: Option<String>,
}

/// Web-scan-index source. A scan entry carries the observed page domain and
/// the domain the crawl was tasked with; either may hold the hostname of
/// interest, so both are checked independently.
#[derive(Debug, Clone)]
pub struct UrlScanSource {
    name: String,
    base_url: String,
}

impl Default for UrlScanSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlScanSource {
    pub fn new() -> Self {
        Self {
            name: "urlscan".to_string(),
            base_url: URLSCAN_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Source for UrlScanSource {
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

        let query = format!("domain:{}", base_domain);
        let url = format!(
            "{}/api/v1/search/?q={}&size={}",
            self.base_url,
            urlencoding::encode(&query),
            PAGE_SIZE
        );

        let payload: UrlScanResponse =
            session
                .get_json(&url)
                .await
                .map_err(|e| SubScopeError::SourceError {
                    source_name: self.name.clone(),
                    message: e.to_string(),
                })?;

        let mut candidates = HashSet::new();
        for result in payload.results {
            let page_domain = result.page.and_then(|p| p.domain);
            let task_domain = result.task.and_then(|t| t.domain);

            for domain in [page_domain, task_domain].into_iter().flatten() {
                if let Some(candidate) = clean_candidate(&domain, base_domain) {
                    candidates.insert(candidate);
                }
            }
        }

        Ok(candidates)
    }
}
