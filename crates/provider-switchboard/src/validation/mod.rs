//! Environment validation for the three model providers.
//!
//! Validation is pure: it inspects a [`ProviderEnv`] and reports errors
//! (provider unusable) and warnings (usable, but probably misconfigured).

pub mod report;
pub mod rules;

use serde::Serialize;

use crate::error::ValidationError;
use crate::provider::{ProviderEnv, ProviderKind};

pub use report::render_report;
pub use rules::{validate_azure, validate_groq, validate_vertex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub provider: ProviderKind,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(provider: ProviderKind, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            provider,
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderValidation {
    pub groq: ValidationResult,
    pub vertex: ValidationResult,
    pub azure: ValidationResult,
}

impl ProviderValidation {
    pub fn get(&self, provider: ProviderKind) -> &ValidationResult {
        match provider {
            ProviderKind::Groq => &self.groq,
            ProviderKind::Vertex => &self.vertex,
            ProviderKind::Azure => &self.azure,
        }
    }

    /// Results in Groq, Vertex, Azure order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationResult> {
        [&self.groq, &self.vertex, &self.azure].into_iter()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub has_valid_provider: bool,
    pub configured_providers: Vec<ProviderKind>,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub details: ProviderValidation,
}

pub fn validate_all(env: &ProviderEnv) -> ProviderValidation {
    ProviderValidation {
        groq: validate_groq(env),
        vertex: validate_vertex(env),
        azure: validate_azure(env),
    }
}

pub fn configured_providers(env: &ProviderEnv) -> Vec<ProviderKind> {
    validate_all(env)
        .iter()
        .filter(|r| r.is_valid)
        .map(|r| r.provider)
        .collect()
}

pub fn has_valid_provider(env: &ProviderEnv) -> bool {
    !configured_providers(env).is_empty()
}

pub fn validation_summary(env: &ProviderEnv) -> ValidationSummary {
    let details = validate_all(env);
    let configured_providers: Vec<ProviderKind> = details
        .iter()
        .filter(|r| r.is_valid)
        .map(|r| r.provider)
        .collect();
    ValidationSummary {
        has_valid_provider: !configured_providers.is_empty(),
        total_errors: details.iter().map(|r| r.errors.len()).sum(),
        total_warnings: details.iter().map(|r| r.warnings.len()).sum(),
        configured_providers,
        details,
    }
}

/// Fail unless at least one provider validates.
pub fn require_valid_provider(env: &ProviderEnv) -> Result<(), ValidationError> {
    let details = validate_all(env);
    if details.iter().any(|r| r.is_valid) {
        return Ok(());
    }
    let lines: Vec<String> = details
        .iter()
        .filter(|r| !r.is_valid)
        .map(|r| format!("{}: {}", r.provider, r.errors.join(", ")))
        .collect();
    Err(ValidationError {
        details: lines.join("\n"),
    })
}
