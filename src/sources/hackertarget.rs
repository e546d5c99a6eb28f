// src/sources/hackertarget.rs
use crate::session::Session;
use crate::sources::Source;
use crate::types::SubScopeError;
use crate::utils::clean_candidate;
use async_trait::async_trait;
use std::collections::HashSet;

const HACKERTARGET_URL: &str = "https://api.hackertarget.com";

/// Passive-DNS-history source. The endpoint answers with newline-delimited
/// `hostname,ip` records; API notices come back in-band as plain text lines
/// and have to be skipped by marker.
#[derive(Debug, Clone)]
pub struct HackerTargetSource {
    name: String,
    base_url: String,
}

impl Default for HackerTargetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HackerTargetSource {
    pub fn new() -> Self {
        Self {
            name: "hackertarget".to_string(),
            base_url: HACKERTARGET_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Source for HackerTargetSource {
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

        let url = format!("{}/hostsearch/?q={}", self.base_url, base_domain);
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

        let mut candidates = HashSet::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("error") || line.starts_with("API count") {
                continue;
            }

            if let Some(hostname) = line.split(',').next() {
                if let Some(candidate) = clean_candidate(hostname, base_domain) {
                    candidates.insert(candidate);
                }
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;

    fn session() -> Session {
        Session::new(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_hostname_ip_lines_parsed() {
        let mut server = mockito::Server::new_async().await;
        let body = "www.example.com,93.184.216.34\nmail.example.com,93.184.216.35\n";
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let source = HackerTargetSource::new().with_base_url(&server.url());
        let candidates = source.query("example.com", &session()).await.unwrap();

        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains("www.example.com"));
        assert!(candidates.contains("mail.example.com"));
    }

    #[tokio::test]
    async fn test_error_marker_lines_skipped() {
        let mut server = mockito::Server::new_async().await;
        let body = "error check your search parameter\nAPI count exceeded - Increase Quota\nvpn.example.com,10.0.0.1\n";
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let source = HackerTargetSource::new().with_base_url(&server.url());
        let candidates = source.query("example.com", &session()).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert!(candidates.contains("vpn.example.com"));
    }

    #[tokio::test]
    async fn test_apex_and_foreign_hosts_dropped() {
        let mut server = mockito::Server::new_async().await;
        let body = "example.com,93.184.216.34\nwww.unrelated.net,1.1.1.1\n";
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let source = HackerTargetSource::new().with_base_url(&server.url());
        let candidates = source.query("example.com", &session()).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let source = HackerTargetSource::new().with_base_url(&server.url());
        assert!(source.query("example.com", &session()).await.is_err());
    }
}
