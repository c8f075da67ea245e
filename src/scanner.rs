//! Concurrent scan orchestration.
//!
//! Fans one probe per catalog path onto a bounded pool, drains completions
//! in whatever order they arrive, and aggregates them into a mapping keyed
//! by path. The drain loop is the single writer into the result map; after
//! recording each completion it pauses for the configured delay, which
//! throttles overall scan cadence rather than delaying individual requests.

use crate::catalog::GIT_PATHS;
use crate::error::{Result, ScanError};
use crate::probe::{Dispatcher, ProbeOutcome};
use crate::reporter::progress::ScanProgress;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Validate and parse a target base URL before any network activity.
pub fn parse_target(raw: &str) -> Result<Url> {
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(ScanError::InvalidUrl(raw.to_string()));
    }

    Ok(Url::parse(raw)?)
}

/// Completed scan: one outcome per catalog path, immutable after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub target: String,
    pub results: BTreeMap<String, ProbeOutcome>,
}

impl ScanReport {
    /// Count of paths that came back exposed.
    pub fn exposed_count(&self) -> usize {
        self.results
            .values()
            .filter(|outcome| matches!(outcome, ProbeOutcome::Exposed { .. }))
            .count()
    }
}

/// Scan orchestrator generic over the probe dispatcher.
pub struct GitScanner<D: Dispatcher> {
    dispatcher: D,
    workers: usize,
    delay: Duration,
}

impl<D: Dispatcher> GitScanner<D> {
    pub fn new(dispatcher: D, workers: usize, delay: Duration) -> Self {
        Self {
            dispatcher,
            // A zero bound would stall the stream forever.
            workers: workers.max(1),
            delay,
        }
    }

    /// Probe every catalog path against `base_url`.
    ///
    /// At most `workers` probes run simultaneously. Probes complete in
    /// arbitrary order; each completion is recorded under its unique path,
    /// the progress indicator advances, and the drain pauses for the
    /// configured delay before observing the next completion. No probe
    /// failure cancels its siblings, so the returned report always holds
    /// exactly one entry per catalog path.
    pub async fn scan(&self, base_url: &Url, progress: &ScanProgress) -> ScanReport {
        info!(target = %base_url, workers = self.workers, "starting scan");

        let dispatcher = &self.dispatcher;
        let mut completions = stream::iter(GIT_PATHS)
            .map(|path| async move { (path, dispatcher.probe(base_url, path).await) })
            .buffer_unordered(self.workers);

        let mut results = BTreeMap::new();
        while let Some((path, outcome)) = completions.next().await {
            debug!(path, status = outcome.status(), "probe completed");
            results.insert(path.to_string(), outcome);
            progress.inc();

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!(paths = results.len(), "scan finished");

        ScanReport {
            target: base_url.to_string(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::Rng;

    /// Dispatcher returning canned outcomes after a random pause, so
    /// completions arrive in an order unrelated to submission order.
    struct CannedDispatcher {
        outcome_for: fn(&str) -> ProbeOutcome,
        jitter: bool,
    }

    #[async_trait]
    impl Dispatcher for CannedDispatcher {
        async fn probe(&self, _base_url: &Url, path: &str) -> ProbeOutcome {
            if self.jitter {
                let millis = rand::thread_rng().gen_range(0..20);
                tokio::time::sleep(Duration::from_millis(millis)).await;
            }
            (self.outcome_for)(path)
        }
    }

    fn not_exposed(_path: &str) -> ProbeOutcome {
        ProbeOutcome::NotExposed { status_code: 404 }
    }

    fn mixed(path: &str) -> ProbeOutcome {
        match path {
            "/.git/HEAD" => ProbeOutcome::Exposed {
                content: "ref: refs/heads/main\n".to_string(),
                annotations: crate::classifier::classify(path, "ref: refs/heads/main\n"),
            },
            "/.git/index" => ProbeOutcome::Failed {
                error: "connection reset".to_string(),
            },
            _ => ProbeOutcome::NotExposed { status_code: 403 },
        }
    }

    fn target() -> Url {
        Url::parse("http://example.com").unwrap()
    }

    fn no_progress() -> ScanProgress {
        ScanProgress::new(GIT_PATHS.len(), false, true)
    }

    #[tokio::test]
    async fn test_scan_covers_every_catalog_path() {
        let scanner = GitScanner::new(
            CannedDispatcher {
                outcome_for: not_exposed,
                jitter: true,
            },
            3,
            Duration::ZERO,
        );

        let report = scanner.scan(&target(), &no_progress()).await;
        assert_eq!(report.results.len(), GIT_PATHS.len());
        for path in GIT_PATHS {
            assert!(report.results.contains_key(path), "missing {}", path);
        }
    }

    #[tokio::test]
    async fn test_scan_is_complete_for_any_worker_bound() {
        for workers in [1, 2, 5, 10, 64] {
            let scanner = GitScanner::new(
                CannedDispatcher {
                    outcome_for: not_exposed,
                    jitter: true,
                },
                workers,
                Duration::ZERO,
            );

            let report = scanner.scan(&target(), &no_progress()).await;
            assert_eq!(
                report.results.len(),
                GIT_PATHS.len(),
                "workers = {}",
                workers
            );
        }
    }

    #[tokio::test]
    async fn test_failed_probe_does_not_drop_siblings() {
        let scanner = GitScanner::new(
            CannedDispatcher {
                outcome_for: mixed,
                jitter: true,
            },
            4,
            Duration::ZERO,
        );

        let report = scanner.scan(&target(), &no_progress()).await;
        assert_eq!(report.results.len(), GIT_PATHS.len());
        assert!(matches!(
            report.results.get("/.git/index"),
            Some(ProbeOutcome::Failed { .. })
        ));
        match report.results.get("/.git/HEAD") {
            Some(ProbeOutcome::Exposed { annotations, .. }) => {
                assert_eq!(annotations.get("branch").map(String::as_str), Some("main"));
            }
            other => panic!("expected Exposed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exposed_count() {
        let scanner = GitScanner::new(
            CannedDispatcher {
                outcome_for: mixed,
                jitter: false,
            },
            10,
            Duration::ZERO,
        );

        let report = scanner.scan(&target(), &no_progress()).await;
        assert_eq!(report.exposed_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_workers_is_clamped() {
        let scanner = GitScanner::new(
            CannedDispatcher {
                outcome_for: not_exposed,
                jitter: false,
            },
            0,
            Duration::ZERO,
        );

        let report = scanner.scan(&target(), &no_progress()).await;
        assert_eq!(report.results.len(), GIT_PATHS.len());
    }

    #[test]
    fn test_parse_target_accepts_http_and_https() {
        assert!(parse_target("http://example.com").is_ok());
        assert!(parse_target("https://example.com/app/").is_ok());
    }

    #[test]
    fn test_parse_target_rejects_missing_scheme() {
        assert!(matches!(
            parse_target("example.com"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_target_rejects_other_schemes() {
        assert!(matches!(
            parse_target("ftp://example.com"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_target_rejects_malformed_url() {
        assert!(matches!(
            parse_target("http://[broken"),
            Err(ScanError::UrlParse(_))
        ));
    }
}
