use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ProviderSettings, SettingsStore};
use crate::error::SettingsError;

pub fn from_toml_str(s: &str) -> Result<ProviderSettings, SettingsError> {
    Ok(toml::from_str(s)?)
}

/// Settings kept in a TOML file, re-read on every [`SettingsStore::load`].
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    async fn load(&self) -> Result<Option<ProviderSettings>, SettingsError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no settings file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(SettingsError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                });
            }
        };
        let settings = from_toml_str(&content)?;
        tracing::debug!(
            "loaded settings from {} (preference={})",
            self.path.display(),
            settings.preference()
        );
        Ok(Some(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;

    #[test]
    fn parse_settings_toml() {
        let toml = r#"
defaultProviderPreference = "vertex"

[modelOverridesVertex]
"chat-model" = " gemini-2.0-flash "
"#;
        let s = from_toml_str(toml).expect("parse ok");
        assert_eq!(s.preference(), ProviderKind::Vertex);
        assert_eq!(
            s.model_overrides_vertex
                .as_ref()
                .and_then(|m| m.get("chat-model"))
                .map(String::as_str),
            Some(" gemini-2.0-flash ")
        );
    }

    #[test]
    fn unknown_preference_is_parse_error() {
        let err = from_toml_str(r#"defaultProviderPreference = "openai""#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_file_means_no_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("settings.toml"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_is_reread_on_each_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "defaultProviderPreference = \"azure\"\n").unwrap();
        let store = TomlSettingsStore::new(&path);
        let first = store.load().await.unwrap().unwrap();
        assert_eq!(first.preference(), ProviderKind::Azure);

        std::fs::write(&path, "default_provider_preference = \"groq\"\n").unwrap();
        let second = store.load().await.unwrap().unwrap();
        assert_eq!(second.preference(), ProviderKind::Groq);
    }
}
