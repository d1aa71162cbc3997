//! Provider identities, environment configuration and client handles.

pub mod client;
pub mod env;
pub mod reasoning;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderParseError;

pub use client::{
    AzureClient, ChatModel, GroqClient, LanguageModel, ModelRequest, VertexClient, model_for,
};
pub use env::{DEFAULT_AZURE_API_VERSION, ProviderEnv};
pub use reasoning::{REASONING_TAG, ReasoningModel, ReasoningOutput, extract_reasoning};

/// Supported model vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    Vertex,
    Azure,
}

impl ProviderKind {
    /// Base priority used to fill in providers after the preferred one.
    pub const FALLBACK_ORDER: [ProviderKind; 3] =
        [ProviderKind::Groq, ProviderKind::Vertex, ProviderKind::Azure];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Vertex => "vertex",
            ProviderKind::Azure => "azure",
        }
    }

    /// Short label used in aggregated error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "Groq",
            ProviderKind::Vertex => "Vertex",
            ProviderKind::Azure => "Azure",
        }
    }

    /// Vendor product name shown in health reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "Groq",
            ProviderKind::Vertex => "Google Vertex AI",
            ProviderKind::Azure => "Azure OpenAI",
        }
    }

    /// `preference` first, then the rest of [`Self::FALLBACK_ORDER`].
    pub fn preference_order(preference: ProviderKind) -> [ProviderKind; 3] {
        let mut order = [preference; 3];
        let mut slot = 1;
        for p in Self::FALLBACK_ORDER {
            if p != preference {
                order[slot] = p;
                slot += 1;
            }
        }
        order
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "vertex" | "google-vertex" => Ok(ProviderKind::Vertex),
            "azure" | "azure-openai" => Ok(ProviderKind::Azure),
            _ => Err(ProviderParseError(s.to_string())),
        }
    }
}
