use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RoleParseError;

/// Logical purpose of a model invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelRole {
    ChatModel,
    ChatModelSmall,
    ChatModelLarge,
    ChatModelReasoning,
    TitleModel,
    ArtifactModel,
}

impl ModelRole {
    pub const ALL: [ModelRole; 6] = [
        ModelRole::ChatModel,
        ModelRole::ChatModelSmall,
        ModelRole::ChatModelLarge,
        ModelRole::ChatModelReasoning,
        ModelRole::TitleModel,
        ModelRole::ArtifactModel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::ChatModel => "chat-model",
            ModelRole::ChatModelSmall => "chat-model-small",
            ModelRole::ChatModelLarge => "chat-model-large",
            ModelRole::ChatModelReasoning => "chat-model-reasoning",
            ModelRole::TitleModel => "title-model",
            ModelRole::ArtifactModel => "artifact-model",
        }
    }

    pub fn is_reasoning(&self) -> bool {
        matches!(self, ModelRole::ChatModelReasoning)
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ModelRole::ALL
            .into_iter()
            .find(|role| role.as_str() == key)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

/// Per-role model id substitutions for one provider, keyed by role string.
pub type RoleOverrides = HashMap<String, String>;

/// Static role → model id table for one provider.
#[derive(Debug, Clone, Copy)]
pub struct ModelTable {
    pub entries: &'static [(ModelRole, &'static str)],
}

impl ModelTable {
    pub fn get(&self, role: ModelRole) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, id)| *id)
    }
}
