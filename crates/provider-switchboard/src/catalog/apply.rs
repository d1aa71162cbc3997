use super::default::default_table;
use super::types::{ModelRole, RoleOverrides};
use crate::provider::ProviderKind;

/// Pick the model id for `role` on `provider`.
///
/// Precedence: the trimmed override when non-empty, then the provider's static
/// entry for the role, then its `chat-model` entry.
pub fn model_id_for(
    provider: ProviderKind,
    role: ModelRole,
    overrides: Option<&RoleOverrides>,
) -> String {
    if let Some(value) = overrides.and_then(|m| m.get(role.as_str())) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            tracing::debug!(
                provider = %provider,
                role = %role,
                model = trimmed,
                "using model override"
            );
            return trimmed.to_string();
        }
    }
    let table = default_table(provider);
    table
        .get(role)
        .or_else(|| table.get(ModelRole::ChatModel))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn overrides(pairs: &[(&str, &str)]) -> RoleOverrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn static_table_when_no_override() {
        assert_eq!(
            model_id_for(ProviderKind::Groq, ModelRole::ChatModelLarge, None),
            "openai/gpt-oss-120b"
        );
        assert_eq!(
            model_id_for(ProviderKind::Vertex, ModelRole::TitleModel, None),
            "gemini-1.5-flash"
        );
        assert_eq!(
            model_id_for(ProviderKind::Azure, ModelRole::ArtifactModel, None),
            "gpt-4.1"
        );
    }

    #[test]
    fn override_is_trimmed() {
        let o = overrides(&[("chat-model", "  llama-3.3-70b  ")]);
        assert_eq!(
            model_id_for(ProviderKind::Groq, ModelRole::ChatModel, Some(&o)),
            "llama-3.3-70b"
        );
    }

    #[test]
    fn blank_override_falls_through() {
        let o = overrides(&[("title-model", "   ")]);
        assert_eq!(
            model_id_for(ProviderKind::Vertex, ModelRole::TitleModel, Some(&o)),
            "gemini-1.5-flash"
        );
    }

    #[test]
    fn override_for_other_role_is_ignored() {
        let o = overrides(&[("chat-model", "custom")]);
        assert_eq!(
            model_id_for(ProviderKind::Groq, ModelRole::ChatModelReasoning, Some(&o)),
            "moonshotai/kimi-k2-instruct"
        );
    }

    fn any_provider() -> impl Strategy<Value = ProviderKind> {
        prop::sample::select(ProviderKind::FALLBACK_ORDER.to_vec())
    }

    fn any_role() -> impl Strategy<Value = ModelRole> {
        prop::sample::select(ModelRole::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn override_wins_or_static_entry(
            provider in any_provider(),
            role in any_role(),
            value in proptest::option::of("[ \\t]{0,2}[a-z0-9./-]{0,12}[ \\t]{0,2}"),
        ) {
            let o = value
                .as_ref()
                .map(|v| overrides(&[(role.as_str(), v.as_str())]));
            let got = model_id_for(provider, role, o.as_ref());
            let expected = match value.as_deref().map(str::trim) {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => default_table(provider).get(role).unwrap().to_string(),
            };
            prop_assert_eq!(got, expected);
        }
    }
}
