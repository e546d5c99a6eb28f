// src/lib.rs
pub mod analysis;
pub mod axfr;
pub mod brute;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fusion;
pub mod output;
pub mod resolver;
pub mod session;
pub mod sources;
pub mod types;
pub mod utils;
pub mod wildcard;

pub use engine::DiscoveryEngine;
pub use types::{Config, DiscoveryReport, SubScopeError, SubdomainRecord};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
