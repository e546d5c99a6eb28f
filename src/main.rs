use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::io::{self, BufRead};
use std::process;

mod analysis;
mod axfr;
mod brute;
mod cli;
mod config;
mod engine;
mod error;
mod fusion;
mod output;
mod resolver;
mod session;
mod sources;
mod types;
mod utils;
mod wildcard;

use cli::Args;
use engine::DiscoveryEngine;
use output::OutputManager;
use types::{Config, OutputFormat};

const BANNER: &str = r#"
   _____       __   _____
  / ___/__  __/ /_ / ___/_________  ____  ___
  \__ \/ / / / __ \\__ \/ ___/ __ \/ __ \/ _ \
 ___/ / /_/ / /_/ /__/ / /__/ /_/ / /_/ /  __/
/____/\__,_/_.___/____/\___/\____/ .___/\___/
                                /_/
        Wildcard-aware Subdomain Discovery
"#;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    if !args.silent {
        println!("{}", BANNER);
    }

    let targets = get_targets_from_args(&args);
    if targets.is_empty() {
        error!("No input provided. Use -d <domain> or pipe domains to stdin");
        process::exit(1);
    }

    let mut config = if let Some(config_path) = args.config_path.as_deref() {
        config::load_config(config_path)?
    } else {
        Config::default()
    };

    if let Some(output_file) = args.output_file.clone() {
        config.output.file = Some(output_file);
    }
    if args.json {
        config.output.format = OutputFormat::Json;
    }
    if args.verbose {
        config.output.verbose = true;
    }
    if let Some(sources) = args.sources.clone() {
        config.sources = sources;
    }
    if args.no_brute_force {
        config.brute_force = false;
    }

    let engine = DiscoveryEngine::new(config.clone())?;
    let output_manager = OutputManager::new(config.output.clone());

    let mut failures = 0usize;
    for target in &targets {
        match engine.discover(target).await {
            Ok(report) => {
                output_manager.write_report(&report)?;
                if !args.silent {
                    info!(
                        "{}: {} subdomains in {:.2}s",
                        report.base_domain,
                        report.stats.total_subdomains,
                        report.stats.duration.as_secs_f64()
                    );
                }
            }
            Err(e) => {
                error!("Discovery failed for {}: {}", target, e);
                failures += 1;
            }
        }
    }

    if failures == targets.len() {
        process::exit(1);
    }
    Ok(())
}

fn get_targets_from_args(args: &Args) -> Vec<String> {
    let mut targets: Vec<String> = args
        .domain
        .iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();

    if args.use_stdin() {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(|l| l.ok()) {
            let line = line.trim().to_string();
            if !line.is_empty() {
                targets.push(line);
            }
        }
    }

    targets
}
