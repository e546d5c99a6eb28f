use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "subscope",
    about = "Subdomain discovery engine",
    long_about = "SubScope enumerates live subdomains of a target domain by fusing certificate\ntransparency, passive DNS history and web-scan indexes with a wildcard-aware\nactive DNS brute-force fallback."
)]
pub struct Args {
    /// Target domain(s) or URL(s) to discover
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN")]
    pub domain: Vec<String>,

    /// Output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<String>,

    /// Output in JSON format
    #[arg(long = "json")]
    pub json: bool,

    /// Specific passive sources to use
    #[arg(short = 's', long = "sources")]
    pub sources: Option<Vec<String>>,

    /// Silent mode (suppress banner and summary)
    #[arg(long = "silent")]
    pub silent: bool,

    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable the brute-force fallback
    #[arg(long = "no-brute-force")]
    pub no_brute_force: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

impl Args {
    /// Check if we should read targets from stdin
    pub fn use_stdin(&self) -> bool {
        self.domain.is_empty() && !atty::is(atty::Stream::Stdin)
    }
}
