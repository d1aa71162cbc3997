//! HTTP probing used by health checks and deployment listing.

use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use serde::Deserialize;

/// Default per-request timeout for provider probes.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Status line and body of a probe response.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl ProbeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `HTTP <status>: <reason>`
    pub fn status_line(&self) -> String {
        format!("HTTP {}: {}", self.status, self.reason)
    }

    /// `error.message` from a JSON error body, if any.
    pub fn error_message(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct ErrorRoot {
            error: Option<ErrorBody>,
        }
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }
        serde_json::from_str::<ErrorRoot>(&self.body)
            .ok()
            .and_then(|root| root.error)
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
    }
}

/// Issues GET requests against provider APIs.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Transport failures are errors; non-2xx statuses are not.
    async fn get(&self, url: &str, headers: &[(String, String)]) -> anyhow::Result<ProbeResponse>;
}

/// [`HttpProbe`] backed by a `reqwest` client with a fixed timeout.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: reqwest::Client,
}

impl ReqwestProbe {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> anyhow::Result<ProbeResponse> {
        let mut req = self.client.get(url);
        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("probe {} -> {}", redact_query(url), status);
        Ok(ProbeResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn redact_query(url: &str) -> &str {
    url.split_once('?').map(|(base, _)| base).unwrap_or(url)
}
