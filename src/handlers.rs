//! Scan mode handler: CLI glue around the scan engine.

use crate::catalog::GIT_PATHS;
use crate::cli::Cli;
use crate::probe::HttpDispatcher;
use crate::reporter::json::JsonReporter;
use crate::reporter::progress::ScanProgress;
use crate::reporter::terminal::TerminalReporter;
use crate::reporter::Reporter;
use crate::scanner::{parse_target, GitScanner, ScanReport};
use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};

/// Run a normal scan: validate the target, probe every catalog path, print
/// the console report and optionally persist the JSON report.
pub async fn run_normal_mode(cli: &Cli) -> ExitCode {
    let base_url = match parse_target(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let dispatcher = match HttpDispatcher::new(Duration::from_secs(cli.timeout)) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    info!(target = %base_url, "starting scan");
    println!("Scanning {}...", cli.url);

    let scanner = GitScanner::new(dispatcher, cli.workers, Duration::from_secs(cli.delay));
    let progress = ScanProgress::new(
        GIT_PATHS.len(),
        std::io::stdout().is_terminal(),
        cli.ci,
    );

    let report = scanner.scan(&base_url, &progress).await;
    progress.finish();

    print!("{}", TerminalReporter::new(cli.verbose).report(&report));

    debug!(
        exposed = report.exposed_count(),
        paths = report.results.len(),
        "scan completed"
    );

    if let Some(ref output_path) = cli.output {
        if let Err(code) = write_report(&report, output_path) {
            return code;
        }
    }

    ExitCode::SUCCESS
}

fn write_report(report: &ScanReport, output_path: &Path) -> Result<(), ExitCode> {
    let json = match JsonReporter::new().try_report(report) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("{}", e);
            return Err(ExitCode::from(2));
        }
    };

    match fs::write(output_path, json) {
        Ok(()) => {
            println!("Results saved to {}", output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to write report to {}: {}", output_path.display(), e);
            Err(ExitCode::from(2))
        }
    }
}
