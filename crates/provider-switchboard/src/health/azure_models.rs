//! Azure OpenAI deployment listing with a fixed fallback list.

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::deployments_url;
use super::probe::HttpProbe;
use crate::provider::{AzureClient, ProviderEnv};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AzureModelList {
    pub models: Vec<ModelOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AzureModelList {
    fn fallback(warning: &str, error: Option<String>) -> Self {
        Self {
            models: fallback_models(),
            warning: Some(warning.to_string()),
            error,
        }
    }
}

pub fn fallback_models() -> Vec<ModelOption> {
    vec![ModelOption {
        id: "gpt-4.1".to_string(),
        name: "GPT-4.1".to_string(),
    }]
}

/// Deployments offered by the configured Azure resource.
///
/// Never fails: every problem yields the fallback list plus a warning, and
/// an `error` when the API or the connection failed.
pub async fn list_azure_models(env: &ProviderEnv, probe: &dyn HttpProbe) -> AzureModelList {
    let Some(key) = env
        .azure_resource_name
        .as_ref()
        .and(env.azure_api_key.as_deref())
    else {
        return AzureModelList::fallback(
            "AZURE_RESOURCE_NAME or AZURE_API_KEY not set; using defaults",
            None,
        );
    };

    let url = deployments_url(&AzureClient::from_env(env));
    let headers = vec![
        ("api-key".to_string(), key.to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ];

    let resp = match probe.get(&url, &headers).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("azure deployment listing failed: {}", e);
            return AzureModelList::fallback(
                "Using fallback models due to connection error",
                Some(format!("Failed to query Azure OpenAI deployments: {e}")),
            );
        }
    };

    if !resp.is_success() {
        let message = resp.error_message().unwrap_or_else(|| resp.status_line());
        return AzureModelList::fallback(
            "Using fallback models due to API error",
            Some(format!("Azure API Error: {message}")),
        );
    }

    let parsed = serde_json::from_str::<JsonValue>(&resp.body)
        .ok()
        .and_then(|body| parse_deployments(&body));
    let Some(models) = parsed else {
        return AzureModelList::fallback(
            "Unexpected API response format, using fallback models",
            None,
        );
    };
    if models.is_empty() {
        return AzureModelList::fallback(
            "No deployments found in Azure OpenAI resource, using fallback models",
            None,
        );
    }

    tracing::debug!("azure deployments: {}", models.len());
    AzureModelList {
        models,
        warning: None,
        error: None,
    }
}

/// Model options from a deployments payload; `None` when `data` is not an
/// array.
///
/// The id is the first non-empty of `id`, `model`, `name`; the display name
/// the first of `model`, `id`, `name`. Entries without an id are skipped.
pub fn parse_deployments(body: &JsonValue) -> Option<Vec<ModelOption>> {
    let data = body.get("data")?.as_array()?;
    let models = data
        .iter()
        .filter_map(|deployment| {
            let field = |key: &str| {
                deployment
                    .get(key)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
            };
            let id = field("id").or_else(|| field("model")).or_else(|| field("name"))?;
            let name = field("model")
                .or_else(|| field("id"))
                .or_else(|| field("name"))
                .unwrap_or(id);
            Some(ModelOption {
                id: id.trim().to_string(),
                name: name.trim().to_string(),
            })
        })
        .collect();
    Some(models)
}
