//! Per-provider environment checks.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationResult;
use crate::provider::env::{
    AZURE_API_KEY, AZURE_API_VERSION, AZURE_RESOURCE_NAME, GOOGLE_VERTEX_API_KEY,
    GOOGLE_VERTEX_LOCATION, GOOGLE_VERTEX_PROJECT, GROQ_API_KEY,
};
use crate::provider::{DEFAULT_AZURE_API_VERSION, ProviderEnv, ProviderKind};

pub const MIN_GROQ_KEY_LEN: usize = 20;
pub const MIN_AZURE_KEY_LEN: usize = 32;

/// Regions accepted without a warning.
pub const KNOWN_VERTEX_LOCATIONS: &[&str] = &[
    "us-central1",
    "us-east1",
    "us-west1",
    "us-west4",
    "europe-west1",
    "europe-west4",
    "asia-northeast1",
    "asia-southeast1",
];

static AZURE_RESOURCE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("valid resource name pattern"));
static API_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid api version pattern"));

pub fn validate_groq(env: &ProviderEnv) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match env.groq_api_key.as_deref() {
        None => errors.push(format!("{GROQ_API_KEY} is required but not set")),
        Some(key) if key.chars().count() < MIN_GROQ_KEY_LEN => warnings.push(format!(
            "{GROQ_API_KEY} appears to be too short (should be at least {MIN_GROQ_KEY_LEN} characters)"
        )),
        Some(_) => {}
    }

    ValidationResult::new(ProviderKind::Groq, errors, warnings)
}

pub fn validate_vertex(env: &ProviderEnv) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if env.vertex_project.is_none() {
        errors.push(format!("{GOOGLE_VERTEX_PROJECT} is required but not set"));
    }

    match env.vertex_location.as_deref() {
        None => errors.push(format!("{GOOGLE_VERTEX_LOCATION} is required but not set")),
        Some(loc) if !KNOWN_VERTEX_LOCATIONS.contains(&loc) => warnings.push(format!(
            "{GOOGLE_VERTEX_LOCATION} \"{loc}\" is not a commonly used region"
        )),
        Some(_) => {}
    }

    if env.vertex_api_key.is_none() {
        warnings.push(format!(
            "{GOOGLE_VERTEX_API_KEY} not set (will use Application Default Credentials)"
        ));
    }

    ValidationResult::new(ProviderKind::Vertex, errors, warnings)
}

pub fn validate_azure(env: &ProviderEnv) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match env.azure_resource_name.as_deref() {
        None => errors.push(format!("{AZURE_RESOURCE_NAME} is required but not set")),
        Some(name) if !AZURE_RESOURCE_NAME_RE.is_match(name) => errors.push(format!(
            "{AZURE_RESOURCE_NAME} contains invalid characters (only alphanumeric and hyphens allowed)"
        )),
        Some(_) => {}
    }

    match env.azure_api_key.as_deref() {
        None => errors.push(format!("{AZURE_API_KEY} is required but not set")),
        Some(key) if key.chars().count() < MIN_AZURE_KEY_LEN => warnings.push(format!(
            "{AZURE_API_KEY} appears to be too short (should be at least {MIN_AZURE_KEY_LEN} characters)"
        )),
        Some(_) => {}
    }

    match env.azure_api_version.as_deref() {
        None => warnings.push(format!(
            "{AZURE_API_VERSION} not set (will use default: {DEFAULT_AZURE_API_VERSION})"
        )),
        Some(v) if !API_VERSION_RE.is_match(v) => warnings.push(format!(
            "{AZURE_API_VERSION} format should be YYYY-MM-DD (e.g., {DEFAULT_AZURE_API_VERSION})"
        )),
        Some(_) => {}
    }

    ValidationResult::new(ProviderKind::Azure, errors, warnings)
}
