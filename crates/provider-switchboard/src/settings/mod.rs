//! Persisted provider settings: default preference and per-role overrides.
//!
//! The resolver reads settings through [`SettingsStore`] on every call; no
//! value is cached between calls.

pub mod load;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::RoleOverrides;
use crate::error::SettingsError;
use crate::provider::ProviderKind;

pub use load::{TomlSettingsStore, from_toml_str};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    #[serde(default, alias = "default_provider_preference")]
    pub default_provider_preference: Option<ProviderKind>,
    #[serde(default, alias = "model_overrides_groq")]
    pub model_overrides_groq: Option<RoleOverrides>,
    #[serde(default, alias = "model_overrides_vertex")]
    pub model_overrides_vertex: Option<RoleOverrides>,
    #[serde(default, alias = "model_overrides_azure")]
    pub model_overrides_azure: Option<RoleOverrides>,
}

impl ProviderSettings {
    /// Stored preference, `groq` when unset.
    pub fn preference(&self) -> ProviderKind {
        self.default_provider_preference.unwrap_or_default()
    }

    pub fn overrides_for(&self, provider: ProviderKind) -> Option<&RoleOverrides> {
        match provider {
            ProviderKind::Groq => self.model_overrides_groq.as_ref(),
            ProviderKind::Vertex => self.model_overrides_vertex.as_ref(),
            ProviderKind::Azure => self.model_overrides_azure.as_ref(),
        }
    }
}

/// Source of [`ProviderSettings`]. `Ok(None)` means no settings row exists.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Option<ProviderSettings>, SettingsError>;
}

/// Fixed in-memory settings.
#[derive(Debug, Clone, Default)]
pub struct StaticSettingsStore {
    settings: Option<ProviderSettings>,
}

impl StaticSettingsStore {
    pub fn new(settings: Option<ProviderSettings>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SettingsStore for StaticSettingsStore {
    async fn load(&self) -> Result<Option<ProviderSettings>, SettingsError> {
        Ok(self.settings.clone())
    }
}
