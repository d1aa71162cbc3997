//! Vendor client wrappers and the model handle handed to callers.
//!
//! Clients are plain configuration holders: constructing one, or a model from
//! one, performs no I/O. A [`ChatModel`] carries everything the chat caller
//! needs to issue a completion request (endpoint and auth headers).

use std::fmt;

use super::env::ProviderEnv;
use super::reasoning::ReasoningOutput;
use super::ProviderKind;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// A callable model reference produced by the resolver.
pub trait LanguageModel: Send + Sync + fmt::Debug {
    fn provider(&self) -> ProviderKind;

    fn model_id(&self) -> &str;

    /// Endpoint and headers for a chat completion call.
    fn request(&self) -> ModelRequest;

    /// Post-process generated text. Plain models return it untouched.
    fn postprocess(&self, text: &str) -> ReasoningOutput {
        ReasoningOutput {
            reasoning: None,
            text: text.to_string(),
        }
    }

    /// True when reasoning extraction is applied to outputs.
    fn extracts_reasoning(&self) -> bool {
        false
    }
}

/// HTTP target for a completion call.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

// Header values are credentials; only names are printed.
impl fmt::Debug for ModelRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRequest")
            .field("url", &self.url)
            .field(
                "headers",
                &self.headers.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Concrete model handle for any of the three vendors.
#[derive(Debug, Clone)]
pub struct ChatModel {
    provider: ProviderKind,
    model_id: String,
    request: ModelRequest,
}

impl LanguageModel for ChatModel {
    fn provider(&self) -> ProviderKind {
        self.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn request(&self) -> ModelRequest {
        self.request.clone()
    }
}

#[derive(Clone, Default)]
pub struct GroqClient {
    api_key: Option<String>,
}

impl GroqClient {
    pub fn from_env(env: &ProviderEnv) -> Self {
        Self {
            api_key: env.groq_api_key.clone(),
        }
    }

    pub fn model(&self, model_id: &str) -> ChatModel {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push(("Authorization".to_string(), format!("Bearer {key}")));
        }
        ChatModel {
            provider: ProviderKind::Groq,
            model_id: model_id.to_string(),
            request: ModelRequest {
                url: format!("{GROQ_BASE_URL}/chat/completions"),
                headers,
            },
        }
    }
}

#[derive(Clone, Default)]
pub struct VertexClient {
    project: String,
    location: String,
    api_key: Option<String>,
}

impl VertexClient {
    pub fn from_env(env: &ProviderEnv) -> Self {
        Self {
            project: env.vertex_project.clone().unwrap_or_default(),
            location: env.vertex_location.clone().unwrap_or_default(),
            api_key: env.vertex_api_key.clone(),
        }
    }

    pub fn model(&self, model_id: &str) -> ChatModel {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        // Without a key the caller authenticates with Application Default Credentials.
        if let Some(key) = &self.api_key {
            headers.push(("x-goog-api-key".to_string(), key.clone()));
        }
        ChatModel {
            provider: ProviderKind::Vertex,
            model_id: model_id.to_string(),
            request: ModelRequest {
                url: format!(
                    "https://{loc}-aiplatform.googleapis.com/v1/projects/{project}/locations/{loc}/publishers/google/models/{model_id}:generateContent",
                    loc = self.location,
                    project = self.project,
                ),
                headers,
            },
        }
    }
}

#[derive(Clone, Default)]
pub struct AzureClient {
    resource_name: String,
    api_key: Option<String>,
    api_version: String,
}

impl AzureClient {
    pub fn from_env(env: &ProviderEnv) -> Self {
        Self {
            resource_name: env.azure_resource_name.clone().unwrap_or_default(),
            api_key: env.azure_api_key.clone(),
            api_version: env.effective_azure_api_version().to_string(),
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}.openai.azure.com/openai", self.resource_name)
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn model(&self, model_id: &str) -> ChatModel {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push(("api-key".to_string(), key.clone()));
        }
        ChatModel {
            provider: ProviderKind::Azure,
            model_id: model_id.to_string(),
            request: ModelRequest {
                url: format!(
                    "{}/deployments/{}/chat/completions?api-version={}",
                    self.base_url(),
                    model_id,
                    self.api_version
                ),
                headers,
            },
        }
    }
}

/// Build the plain model handle for `provider`.
pub fn model_for(provider: ProviderKind, env: &ProviderEnv, model_id: &str) -> ChatModel {
    match provider {
        ProviderKind::Groq => GroqClient::from_env(env).model(model_id),
        ProviderKind::Vertex => VertexClient::from_env(env).model(model_id),
        ProviderKind::Azure => AzureClient::from_env(env).model(model_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(req: &'a ModelRequest, name: &str) -> Option<&'a str> {
        req.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn env() -> ProviderEnv {
        ProviderEnv::from_pairs([
            ("GROQ_API_KEY", "gsk_test"),
            ("GOOGLE_VERTEX_PROJECT", "proj"),
            ("GOOGLE_VERTEX_LOCATION", "us-central1"),
            ("AZURE_RESOURCE_NAME", "my-resource-1"),
            ("AZURE_API_KEY", "az-key"),
        ])
    }

    #[test]
    fn groq_uses_bearer_auth() {
        let m = model_for(ProviderKind::Groq, &env(), "openai/gpt-oss-20b");
        let req = m.request();
        assert_eq!(req.url, "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(header(&req, "authorization"), Some("Bearer gsk_test"));
        assert_eq!(m.model_id(), "openai/gpt-oss-20b");
    }

    #[test]
    fn vertex_omits_key_header_without_key() {
        let m = model_for(ProviderKind::Vertex, &env(), "gemini-1.5-pro");
        let req = m.request();
        assert!(req.url.starts_with("https://us-central1-aiplatform.googleapis.com/v1/projects/proj/"));
        assert!(req.url.ends_with("models/gemini-1.5-pro:generateContent"));
        assert!(header(&req, "x-goog-api-key").is_none());
    }

    #[test]
    fn azure_uses_default_api_version() {
        let m = model_for(ProviderKind::Azure, &env(), "gpt-4.1");
        let req = m.request();
        assert_eq!(
            req.url,
            "https://my-resource-1.openai.azure.com/openai/deployments/gpt-4.1/chat/completions?api-version=2024-02-01"
        );
        assert_eq!(header(&req, "api-key"), Some("az-key"));
    }

    #[test]
    fn debug_output_hides_credentials() {
        let req = model_for(ProviderKind::Azure, &env(), "gpt-4.1").request();
        let dbg = format!("{req:?}");
        assert!(dbg.contains("api-key"));
        assert!(!dbg.contains("az-key"));
    }
}
