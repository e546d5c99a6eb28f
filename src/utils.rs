// src/utils.rs
use url::Url;

/// Extract the registrable base domain from an arbitrary query string:
/// full URL, bare hostname, or hostname with port. Best-effort and pure;
/// malformed input falls through unchanged (lowercased) rather than failing.
pub fn normalize_base_domain(input: &str) -> String {
    let trimmed = input.trim().to_lowercase();

    let host = if trimmed.contains("://") {
        match Url::parse(&trimmed) {
            Ok(url) => url.host_str().map(|h| h.to_string()).unwrap_or(trimmed),
            Err(_) => strip_url_noise(&trimmed),
        }
    } else {
        strip_url_noise(&trimmed)
    };

    base_domain_of(&host)
}

fn strip_url_noise(input: &str) -> String {
    let mut host = input;
    if let Some((_, rest)) = host.split_once("://") {
        host = rest;
    }
    host = host
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(host);
    // host:port, but leave bare IPv6 brackets alone
    if let Some((name, port)) = host.rsplit_once(':') {
        if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) {
            host = name;
        }
    }
    host.trim_end_matches('.').to_string()
}

/// Last two dot-separated labels; inputs with fewer than two labels are
/// already as registrable as they get and pass through unchanged.
fn base_domain_of(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return host.to_string();
    }
    labels[labels.len() - 2..].join(".")
}

/// Domain invariant: a candidate counts as a subdomain of `base` only if it
/// ends with ".base" and is not base itself. Leading wildcard markers are
/// stripped before the check.
pub fn in_scope(hostname: &str, base: &str) -> bool {
    let hostname = hostname.strip_prefix("*.").unwrap_or(hostname);
    hostname != base && hostname.ends_with(&format!(".{}", base))
}

/// Normalize one raw candidate from any source against the base domain.
/// Returns `None` for anything that violates the domain invariant.
pub fn clean_candidate(raw: &str, base: &str) -> Option<String> {
    let mut candidate = raw.trim().to_lowercase();
    while candidate.ends_with('.') {
        candidate.pop();
    }
    let candidate = candidate
        .strip_prefix("*.")
        .unwrap_or(&candidate)
        .to_string();

    if in_scope(&candidate, base) {
        Some(candidate)
    } else {
        None
    }
}

/// Check if a string is a syntactically valid domain
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    for part in parts {
        if part.is_empty() || part.len() > 63 {
            return false;
        }

        if !part.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return false;
        }

        if part.starts_with('-') || part.ends_with('-') {
            return false;
        }
    }

    true
}
