//! Error types shared across the resolver, validation and settings layers.

use thiserror::Error;

/// Failure to produce any candidate model.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No provider passed validation. `issues` holds one line per provider,
    /// e.g. `Groq: GROQ_API_KEY is required but not set`.
    #[error(
        "No AI provider properly configured. Issues found:\n{}\n\nPlease configure at least one provider with the required environment variables.",
        .issues.join("\n")
    )]
    NoProviderConfigured { issues: Vec<String> },
}

/// Failure to read persisted provider settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

/// Raised by [`crate::validation::require_valid_provider`].
#[derive(Debug, Error)]
#[error(
    "No AI provider is properly configured. Please fix the following issues:\n\n{details}\n\nRefer to the setup documentation for help."
)]
pub struct ValidationError {
    pub details: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown model role '{0}'")]
pub struct RoleParseError(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown provider '{0}' (expected groq, vertex or azure)")]
pub struct ProviderParseError(pub String);
