//! Single-path HTTP probe dispatch.
//!
//! A dispatcher issues exactly one GET per catalog path and folds every
//! possible outcome, including transport failures, into a [`ProbeOutcome`].
//! Nothing here aborts a scan: a path that cannot be fetched reports itself
//! as `Failed` and its siblings continue.

use crate::classifier::classify;
use crate::error::{Result, ScanError};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Browser identity strings rotated per request to avoid trivial
/// fingerprinting by the target.
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (Linux; Android 10; SM-G975F) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/81.0.4044.138 Mobile Safari/537.36",
];

fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Outcome of probing one catalog path.
///
/// Serializes with a `status` tag (`exposed` / `not exposed` / `error`) and,
/// for exposed paths, the verbatim body plus any classifier annotations
/// flattened beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ProbeOutcome {
    #[serde(rename = "exposed")]
    Exposed {
        content: String,
        #[serde(flatten)]
        annotations: BTreeMap<String, String>,
    },
    #[serde(rename = "not exposed")]
    NotExposed { status_code: u16 },
    #[serde(rename = "error")]
    Failed { error: String },
}

impl ProbeOutcome {
    /// Human-readable status label, matching the serialized tag.
    pub fn status(&self) -> &'static str {
        match self {
            ProbeOutcome::Exposed { .. } => "exposed",
            ProbeOutcome::NotExposed { .. } => "not exposed",
            ProbeOutcome::Failed { .. } => "error",
        }
    }
}

/// Seam between the orchestrator and the network.
///
/// The production implementation is [`HttpDispatcher`]; tests substitute
/// canned dispatchers to control completion order and outcomes.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn probe(&self, base_url: &Url, path: &str) -> ProbeOutcome;
}

/// Dispatcher backed by a shared reqwest client with a hard per-request
/// timeout. One GET per path, no retries.
pub struct HttpDispatcher {
    client: reqwest::Client,
}

impl HttpDispatcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ScanError::ClientBuild)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn probe(&self, base_url: &Url, path: &str) -> ProbeOutcome {
        // Browser-style relative resolution; the base may or may not carry a
        // trailing slash.
        let target = match base_url.join(path) {
            Ok(url) => url,
            Err(e) => {
                return ProbeOutcome::Failed {
                    error: format!("invalid target URL: {}", e),
                };
            }
        };

        debug!(%target, "probing");

        let response = match self
            .client
            .get(target)
            .header(USER_AGENT, random_user_agent())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ProbeOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return ProbeOutcome::NotExposed {
                status_code: status.as_u16(),
            };
        }

        match response.text().await {
            Ok(body) => {
                let annotations = classify(path, &body);
                ProbeOutcome::Exposed {
                    content: body,
                    annotations,
                }
            }
            Err(e) => ProbeOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}
