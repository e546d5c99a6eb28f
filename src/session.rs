// src/session.rs
use crate::types::{Config, SubScopeError};
use governor::{Jitter, Quota};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct Session {
    pub client: Client,
    rate_limiters: Arc<HashMap<String, Arc<governor::DefaultDirectRateLimiter>>>,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, SubScopeError> {
        // Build HTTP client. Each passive source gets one GET within this
        // timeout; there is no retry, a timeout counts as an empty result.
        let mut client_builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| SubScopeError::ConfigError(format!("Invalid proxy URL: {}", e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder.build().map_err(|e| {
            SubScopeError::ConfigError(format!("Failed to build HTTP client: {}", e))
        })?;

        // One direct rate limiter per configured source
        let mut rate_limiters = HashMap::new();
        for (source, rate_limit) in &config.rate_limits {
            if let Some(limit) = rate_limit {
                if let Some(per_second) = std::num::NonZeroU32::new(*limit) {
                    let quota = Quota::per_second(per_second)
                        .allow_burst(std::num::NonZeroU32::new(1).unwrap());
                    let limiter = Arc::new(governor::RateLimiter::direct(quota));
                    rate_limiters.insert(source.clone(), limiter);
                }
            }
        }

        Ok(Session {
            client,
            rate_limiters: Arc::new(rate_limiters),
        })
    }

    pub async fn wait_for_rate_limit(&self, source: &str) {
        if let Some(limiter) = self.rate_limiters.get(source) {
            limiter
                .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
                .await;
        }
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response, SubScopeError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| SubScopeError::NetworkError(e.to_string()))
    }

    pub async fn get_json<T>(&self, url: &str) -> Result<T, SubScopeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.get(url).await?;

        if !response.status().is_success() {
            return Err(SubScopeError::NetworkError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SubScopeError::ParseError(e.to_string()))
    }
}
