//! Explicit provider configuration captured from environment variables.
//!
//! Validation and resolution take a [`ProviderEnv`] instead of reading the
//! process environment, so callers decide when the environment is sampled.

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const GOOGLE_VERTEX_PROJECT: &str = "GOOGLE_VERTEX_PROJECT";
pub const GOOGLE_VERTEX_LOCATION: &str = "GOOGLE_VERTEX_LOCATION";
pub const GOOGLE_VERTEX_API_KEY: &str = "GOOGLE_VERTEX_API_KEY";
pub const AZURE_RESOURCE_NAME: &str = "AZURE_RESOURCE_NAME";
pub const AZURE_API_KEY: &str = "AZURE_API_KEY";
pub const AZURE_API_VERSION: &str = "AZURE_API_VERSION";

/// Snapshot of the seven provider variables. Empty values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderEnv {
    pub groq_api_key: Option<String>,
    pub vertex_project: Option<String>,
    pub vertex_location: Option<String>,
    pub vertex_api_key: Option<String>,
    pub azure_resource_name: Option<String>,
    pub azure_api_key: Option<String>,
    pub azure_api_version: Option<String>,
}

impl ProviderEnv {
    /// Read the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            groq_api_key: get(GROQ_API_KEY),
            vertex_project: get(GOOGLE_VERTEX_PROJECT),
            vertex_location: get(GOOGLE_VERTEX_LOCATION),
            vertex_api_key: get(GOOGLE_VERTEX_API_KEY),
            azure_resource_name: get(AZURE_RESOURCE_NAME),
            azure_api_key: get(AZURE_API_KEY),
            azure_api_version: get(AZURE_API_VERSION),
        }
    }

    /// Build from `(name, value)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let vars: std::collections::HashMap<&str, &str> = pairs.into_iter().collect();
        Self::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    /// `AZURE_API_VERSION`, or [`DEFAULT_AZURE_API_VERSION`] when unset.
    pub fn effective_azure_api_version(&self) -> &str {
        self.azure_api_version
            .as_deref()
            .unwrap_or(DEFAULT_AZURE_API_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_count_as_unset() {
        let env = ProviderEnv::from_pairs([(GROQ_API_KEY, ""), (AZURE_API_KEY, "k")]);
        assert!(env.groq_api_key.is_none());
        assert_eq!(env.azure_api_key.as_deref(), Some("k"));
    }

    #[test]
    fn azure_version_defaults_when_unset() {
        let env = ProviderEnv::default();
        assert_eq!(env.effective_azure_api_version(), "2024-02-01");

        let env = ProviderEnv::from_pairs([(AZURE_API_VERSION, "2024-06-01")]);
        assert_eq!(env.effective_azure_api_version(), "2024-06-01");
    }
}
