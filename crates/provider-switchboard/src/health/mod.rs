//! Provider health checks for the admin console.
//!
//! Groq and Azure are probed over HTTP; Vertex is reported from configuration
//! alone. Results are aggregated into a single [`HealthReport`].

pub mod azure_models;
pub mod probe;

use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use crate::provider::client::GROQ_BASE_URL;
use crate::provider::env::{
    AZURE_API_KEY, AZURE_RESOURCE_NAME, GOOGLE_VERTEX_LOCATION, GOOGLE_VERTEX_PROJECT,
};
use crate::provider::{AzureClient, ProviderEnv, ProviderKind};

pub use azure_models::{AzureModelList, ModelOption, list_azure_models, parse_deployments};
pub use probe::{DEFAULT_PROBE_TIMEOUT, HttpProbe, ProbeResponse, ReqwestProbe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unconfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Operational,
    Degraded,
    Offline,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderHealth {
    pub name: String,
    pub provider: ProviderKind,
    pub status: HealthStatus,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl ProviderHealth {
    fn unconfigured(provider: ProviderKind, error: String) -> Self {
        Self {
            name: provider.display_name().to_string(),
            provider,
            status: HealthStatus::Unconfigured,
            configured: false,
            error: Some(error),
            details: None,
        }
    }

    fn healthy(provider: ProviderKind, details: JsonValue) -> Self {
        Self {
            name: provider.display_name().to_string(),
            provider,
            status: HealthStatus::Healthy,
            configured: true,
            error: None,
            details: Some(details),
        }
    }

    fn unhealthy(provider: ProviderKind, error: String) -> Self {
        Self {
            name: provider.display_name().to_string(),
            provider,
            status: HealthStatus::Unhealthy,
            configured: true,
            error: Some(error),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthSummary {
    pub total: usize,
    pub healthy: usize,
    pub configured: usize,
    pub unconfigured: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub timestamp: String,
    pub status: OverallStatus,
    pub providers: Vec<ProviderHealth>,
    pub summary: HealthSummary,
}

/// Probe all three providers and aggregate the result.
pub async fn check_health(env: &ProviderEnv, probe: &dyn HttpProbe) -> HealthReport {
    let providers = vec![
        groq_health(env, probe).await,
        vertex_health(env),
        azure_health(env, probe).await,
    ];
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    summarize(providers, timestamp)
}

/// Operational when any provider is healthy, degraded when any is
/// configured, offline otherwise.
pub fn summarize(providers: Vec<ProviderHealth>, timestamp: String) -> HealthReport {
    let healthy = providers
        .iter()
        .filter(|p| p.status == HealthStatus::Healthy)
        .count();
    let configured = providers.iter().filter(|p| p.configured).count();
    let status = if healthy > 0 {
        OverallStatus::Operational
    } else if configured > 0 {
        OverallStatus::Degraded
    } else {
        OverallStatus::Offline
    };
    tracing::info!(
        "provider health: {:?} (healthy={}, configured={})",
        status,
        healthy,
        configured
    );
    HealthReport {
        timestamp,
        status,
        summary: HealthSummary {
            total: providers.len(),
            healthy,
            configured,
            unconfigured: providers.len() - configured,
        },
        providers,
    }
}

pub async fn groq_health(env: &ProviderEnv, probe: &dyn HttpProbe) -> ProviderHealth {
    let Some(key) = env.groq_api_key.as_deref() else {
        return ProviderHealth::unconfigured(
            ProviderKind::Groq,
            "GROQ_API_KEY not configured".to_string(),
        );
    };
    let endpoint = format!("{GROQ_BASE_URL}/models");
    let headers = vec![
        ("Authorization".to_string(), format!("Bearer {key}")),
        ("Content-Type".to_string(), "application/json".to_string()),
    ];
    match probe.get(&endpoint, &headers).await {
        Ok(resp) if resp.is_success() => match serde_json::from_str::<JsonValue>(&resp.body) {
            Ok(body) => ProviderHealth::healthy(
                ProviderKind::Groq,
                json!({
                    "modelsCount": data_len(&body),
                    "endpoint": endpoint,
                }),
            ),
            Err(e) => ProviderHealth::unhealthy(ProviderKind::Groq, e.to_string()),
        },
        Ok(resp) => ProviderHealth::unhealthy(ProviderKind::Groq, resp.status_line()),
        Err(e) => {
            tracing::warn!("groq health probe failed: {}", e);
            ProviderHealth::unhealthy(ProviderKind::Groq, e.to_string())
        }
    }
}

pub fn vertex_health(env: &ProviderEnv) -> ProviderHealth {
    match (env.vertex_project.as_deref(), env.vertex_location.as_deref()) {
        (Some(project), Some(location)) => ProviderHealth::healthy(
            ProviderKind::Vertex,
            json!({
                "project": project,
                "location": location,
                "hasApiKey": env.vertex_api_key.is_some(),
                "note": "Configuration valid, actual model availability depends on deployment",
            }),
        ),
        (project, location) => {
            let mut missing = Vec::new();
            if project.is_none() {
                missing.push(GOOGLE_VERTEX_PROJECT);
            }
            if location.is_none() {
                missing.push(GOOGLE_VERTEX_LOCATION);
            }
            ProviderHealth::unconfigured(
                ProviderKind::Vertex,
                format!("Missing required variables: {}", missing.join(", ")),
            )
        }
    }
}

pub async fn azure_health(env: &ProviderEnv, probe: &dyn HttpProbe) -> ProviderHealth {
    let (Some(resource), Some(key)) = (
        env.azure_resource_name.as_deref(),
        env.azure_api_key.as_deref(),
    ) else {
        let mut missing = Vec::new();
        if env.azure_resource_name.is_none() {
            missing.push(AZURE_RESOURCE_NAME);
        }
        if env.azure_api_key.is_none() {
            missing.push(AZURE_API_KEY);
        }
        return ProviderHealth::unconfigured(
            ProviderKind::Azure,
            format!("Missing required variables: {}", missing.join(", ")),
        );
    };

    let client = AzureClient::from_env(env);
    let url = deployments_url(&client);
    let headers = vec![
        ("api-key".to_string(), key.to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ];
    match probe.get(&url, &headers).await {
        Ok(resp) if resp.is_success() => match serde_json::from_str::<JsonValue>(&resp.body) {
            Ok(body) => ProviderHealth::healthy(
                ProviderKind::Azure,
                json!({
                    "resourceName": resource,
                    "apiVersion": client.api_version(),
                    "deploymentsCount": data_len(&body),
                    "endpoint": url,
                }),
            ),
            Err(e) => ProviderHealth::unhealthy(ProviderKind::Azure, e.to_string()),
        },
        Ok(resp) => ProviderHealth::unhealthy(
            ProviderKind::Azure,
            resp.error_message().unwrap_or_else(|| resp.status_line()),
        ),
        Err(e) => {
            tracing::warn!("azure health probe failed: {}", e);
            ProviderHealth::unhealthy(ProviderKind::Azure, e.to_string())
        }
    }
}

pub(crate) fn deployments_url(client: &AzureClient) -> String {
    format!(
        "{}/deployments?api-version={}",
        client.base_url(),
        client.api_version()
    )
}

fn data_len(body: &JsonValue) -> usize {
    body.get("data")
        .and_then(|d| d.as_array())
        .map(|a| a.len())
        .unwrap_or(0)
}


#[cfg(test)]
mod tests {
    use super::testing::FakeProbe;
    use super::*;

    fn full_env() -> ProviderEnv {
        ProviderEnv::from_pairs([
            ("GROQ_API_KEY", "gsk_0123456789abcdefghij"),
            ("GOOGLE_VERTEX_PROJECT", "proj"),
            ("GOOGLE_VERTEX_LOCATION", "us-central1"),
            ("AZURE_RESOURCE_NAME", "res"),
            ("AZURE_API_KEY", "az"),
        ])
    }

    #[tokio::test]
    async fn unconfigured_everything_is_offline() {
        let probe = FakeProbe::default();
        let report = check_health(&ProviderEnv::default(), &probe).await;
        assert_eq!(report.status, OverallStatus::Offline);
        assert_eq!(report.summary.unconfigured, 3);
        assert!(probe.seen.lock().unwrap().is_empty());
        assert_eq!(
            report.providers[1].error.as_deref(),
            Some("Missing required variables: GOOGLE_VERTEX_PROJECT, GOOGLE_VERTEX_LOCATION")
        );
    }

    #[tokio::test]
    async fn healthy_probes_report_counts() {
        let probe = FakeProbe::default()
            .with("https://api.groq.com", 200, r#"{"data":[{"id":"a"},{"id":"b"}]}"#)
            .with("https://res.openai.azure.com", 200, r#"{"data":[{"id":"gpt-4.1"}]}"#);
        let report = check_health(&full_env(), &probe).await;
        assert_eq!(report.status, OverallStatus::Operational);
        assert_eq!(report.summary.healthy, 3);
        let groq = &report.providers[0];
        assert_eq!(groq.details.as_ref().unwrap()["modelsCount"], json!(2));
        let azure = &report.providers[2];
        assert_eq!(azure.details.as_ref().unwrap()["deploymentsCount"], json!(1));
        assert_eq!(azure.details.as_ref().unwrap()["apiVersion"], json!("2024-02-01"));
        let seen = probe.seen.lock().unwrap();
        assert!(seen.contains(
            &"https://res.openai.azure.com/openai/deployments?api-version=2024-02-01".to_string()
        ));
    }

    #[tokio::test]
    async fn azure_error_body_message_is_surfaced() {
        let probe = FakeProbe::default()
            .failing("https://api.groq.com", "connection refused")
            .with(
                "https://res.openai.azure.com",
                401,
                r#"{"error":{"message":"Access denied due to invalid subscription key."}}"#,
            );
        let env = ProviderEnv::from_pairs([
            ("GROQ_API_KEY", "gsk_0123456789abcdefghij"),
            ("AZURE_RESOURCE_NAME", "res"),
            ("AZURE_API_KEY", "az"),
        ]);
        let report = check_health(&env, &probe).await;
        assert_eq!(report.status, OverallStatus::Degraded);
        assert_eq!(report.providers[0].status, HealthStatus::Unhealthy);
        assert_eq!(report.providers[0].error.as_deref(), Some("connection refused"));
        assert_eq!(
            report.providers[2].error.as_deref(),
            Some("Access denied due to invalid subscription key.")
        );
    }

    #[tokio::test]
    async fn groq_http_error_uses_status_line() {
        let probe = FakeProbe::default().with("https://api.groq.com", 401, "nope");
        let env = ProviderEnv::from_pairs([("GROQ_API_KEY", "gsk")]);
        let h = groq_health(&env, &probe).await;
        assert_eq!(h.error.as_deref(), Some("HTTP 401: Unauthorized"));
    }

    #[test]
    fn report_serializes_lowercase_statuses() {
        let report = summarize(vec![vertex_health(&full_env())], "t".into());
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["status"], json!("operational"));
        assert_eq!(v["providers"][0]["status"], json!("healthy"));
        assert_eq!(v["providers"][0]["details"]["hasApiKey"], json!(false));
        assert!(v["providers"][0].get("error").is_none());
    }
}
