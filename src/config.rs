use crate::error::{ErrorContext, Result};
use crate::types::{Config, SubScopeError};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub fn load_config(config_path_str: &str) -> Result<Config> {
    let mut config = Config::default();

    if Path::new(config_path_str).exists() {
        let contents = fs::read_to_string(config_path_str)
            .with_context(|| format!("Failed to read config file {}", config_path_str))?;

        let toml_config: toml::Value = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path_str))?;

        if let Some(table) = toml_config.as_table() {
            if let Some(timeout) = table.get("timeout_secs").and_then(|v| v.as_integer()) {
                config.timeout = Duration::from_secs(timeout.max(0) as u64);
            }
            if let Some(user_agent) = table.get("user_agent").and_then(|v| v.as_str()) {
                config.user_agent = user_agent.to_string();
            }
            if let Some(proxy) = table.get("proxy").and_then(|v| v.as_str()) {
                config.proxy = Some(proxy.to_string());
            }
            if let Some(sources) = table.get("sources").and_then(|v| v.as_array()) {
                config.sources = sources
                    .iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect();
            }
            if let Some(resolver) = table.get("resolver").and_then(|v| v.as_table()) {
                if let Some(nameservers) = resolver.get("nameservers").and_then(|v| v.as_array()) {
                    config.resolver.nameservers = nameservers
                        .iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect();
                }
                if let Some(max) = resolver
                    .get("max_concurrent_lookups")
                    .and_then(|v| v.as_integer())
                {
                    config.resolver.max_concurrent_lookups = max.max(1) as usize;
                }
                if let Some(system) = resolver
                    .get("use_system_resolver")
                    .and_then(|v| v.as_bool())
                {
                    config.resolver.use_system_resolver = system;
                }
            }
        }
    }

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(proxy) = env::var("SUBSCOPE_PROXY") {
        config.proxy = Some(proxy);
    }
    if let Ok(nameservers) = env::var("SUBSCOPE_NAMESERVERS") {
        config.resolver.nameservers = nameservers
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.timeout.as_secs() == 0 {
        return Err(SubScopeError::ConfigError(
            "Timeout must be greater than 0".to_string(),
        ));
    }
    if config.resolver.max_concurrent_lookups == 0 {
        return Err(SubScopeError::ConfigError(
            "Resolver concurrency must be greater than 0".to_string(),
        ));
    }
    if !config.resolver.use_system_resolver && config.resolver.nameservers.is_empty() {
        return Err(SubScopeError::ConfigError(
            "At least one nameserver is required".to_string(),
        ));
    }
    Ok(())
}
