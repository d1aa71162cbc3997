use super::types::{ModelRole, ModelTable};
use crate::provider::ProviderKind;

pub const GROQ_MODELS: ModelTable = ModelTable {
    entries: &[
        (ModelRole::ChatModel, "openai/gpt-oss-20b"),
        (ModelRole::ChatModelSmall, "openai/gpt-oss-20b"),
        (ModelRole::ChatModelLarge, "openai/gpt-oss-120b"),
        (ModelRole::ChatModelReasoning, "moonshotai/kimi-k2-instruct"),
        (ModelRole::TitleModel, "openai/gpt-oss-20b"),
        (ModelRole::ArtifactModel, "moonshotai/kimi-k2-instruct"),
    ],
};

pub const VERTEX_MODELS: ModelTable = ModelTable {
    entries: &[
        (ModelRole::ChatModel, "gemini-1.5-flash"),
        (ModelRole::ChatModelSmall, "gemini-1.5-flash"),
        (ModelRole::ChatModelLarge, "gemini-1.5-pro"),
        (ModelRole::ChatModelReasoning, "gemini-1.5-pro"),
        (ModelRole::TitleModel, "gemini-1.5-flash"),
        (ModelRole::ArtifactModel, "gemini-1.5-pro"),
    ],
};

pub const AZURE_MODELS: ModelTable = ModelTable {
    entries: &[
        (ModelRole::ChatModel, "gpt-4.1"),
        (ModelRole::ChatModelSmall, "gpt-4.1"),
        (ModelRole::ChatModelLarge, "gpt-4.1"),
        (ModelRole::ChatModelReasoning, "gpt-4.1"),
        (ModelRole::TitleModel, "gpt-4.1"),
        (ModelRole::ArtifactModel, "gpt-4.1"),
    ],
};

pub fn default_table(provider: ProviderKind) -> ModelTable {
    match provider {
        ProviderKind::Groq => GROQ_MODELS,
        ProviderKind::Vertex => VERTEX_MODELS,
        ProviderKind::Azure => AZURE_MODELS,
    }
}
