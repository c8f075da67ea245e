use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gitprobe",
    version,
    about = "Git repository exposure scanner",
    long_about = "gitprobe probes a target web host for accidentally exposed .git metadata \
                  (HEAD, config, refs, logs) and reports which paths are publicly retrievable."
)]
pub struct Cli {
    /// Target URL to scan (e.g., http://example.com)
    pub url: String,

    /// Write the scan report to a JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Delay in seconds after each completed probe
    #[arg(short, long, default_value_t = 1)]
    pub delay: u64,

    /// Number of concurrent probe workers
    #[arg(short, long, default_value_t = 10)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    pub timeout: u64,

    /// CI mode: no progress bar
    #[arg(long)]
    pub ci: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
