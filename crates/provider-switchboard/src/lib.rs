//! Model provider switchboard.
//!
//! Validates Groq, Google Vertex AI and Azure OpenAI configuration, resolves a
//! logical model role to a configured provider and model id with ordered
//! fallback and per-role overrides, and serves the result over MCP.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handler;
pub mod health;
pub mod provider;
pub mod resolver;
pub mod settings;
pub mod telemetry;
pub mod validation;

pub use catalog::ModelRole;
pub use error::{ResolveError, SettingsError, ValidationError};
pub use provider::{LanguageModel, ProviderEnv, ProviderKind};
pub use resolver::{Candidate, resolve_candidates, resolve_for_role, resolve_static_default};
pub use settings::{ProviderSettings, SettingsStore};
