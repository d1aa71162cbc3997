//! Model provider resolution.
//!
//! [`resolve_candidates`] picks the first configured provider in preference
//! order and builds its model handle for a role. [`dynamic`] layers the
//! settings store on top of it.

pub mod dynamic;

use std::sync::Arc;

use crate::catalog::{ModelRole, RoleOverrides, model_id_for};
use crate::error::ResolveError;
use crate::provider::{
    LanguageModel, ProviderEnv, ProviderKind, REASONING_TAG, ReasoningModel, model_for,
};
use crate::validation::validate_all;

pub use dynamic::{resolve_for_role, resolve_static_default};

/// A resolved provider, model id and callable model.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub provider: ProviderKind,
    pub model_id: String,
    pub model: Arc<dyn LanguageModel>,
}

/// Resolve `role` against the configured providers.
///
/// The preferred provider is tried first, then the others in Groq, Vertex,
/// Azure order. The returned list holds the first provider that validates.
/// Fails only when none of the three validate.
pub fn resolve_candidates(
    role: ModelRole,
    preference: ProviderKind,
    groq_overrides: Option<&RoleOverrides>,
    vertex_overrides: Option<&RoleOverrides>,
    azure_overrides: Option<&RoleOverrides>,
    env: &ProviderEnv,
) -> Result<Vec<Candidate>, ResolveError> {
    let validation = validate_all(env);

    for provider in ProviderKind::preference_order(preference) {
        if !validation.get(provider).is_valid {
            tracing::debug!(provider = %provider, role = %role, "provider not configured, skipping");
            continue;
        }
        if provider != preference {
            tracing::info!(
                preferred = %preference,
                provider = %provider,
                role = %role,
                "preferred provider unavailable, falling back"
            );
        }
        let overrides = match provider {
            ProviderKind::Groq => groq_overrides,
            ProviderKind::Vertex => vertex_overrides,
            ProviderKind::Azure => azure_overrides,
        };
        return Ok(vec![build_candidate(provider, role, overrides, env)]);
    }

    let issues: Vec<String> = validation
        .iter()
        .filter(|r| !r.is_valid)
        .map(|r| format!("{}: {}", r.provider.label(), r.errors.join(", ")))
        .collect();
    tracing::debug!(role = %role, "no provider configured ({} issue(s))", issues.len());
    Err(ResolveError::NoProviderConfigured { issues })
}

pub(crate) fn build_candidate(
    provider: ProviderKind,
    role: ModelRole,
    overrides: Option<&RoleOverrides>,
    env: &ProviderEnv,
) -> Candidate {
    let model_id = model_id_for(provider, role, overrides);
    let base = model_for(provider, env, &model_id);
    let model: Arc<dyn LanguageModel> = if role.is_reasoning() {
        Arc::new(ReasoningModel::new(base, REASONING_TAG))
    } else {
        Arc::new(base)
    };
    Candidate {
        provider,
        model_id,
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_table;
    use proptest::prelude::*;

    const GROQ_KEY: (&str, &str) = ("GROQ_API_KEY", "gsk_0123456789abcdefghij");
    const VERTEX: [(&str, &str); 2] = [
        ("GOOGLE_VERTEX_PROJECT", "proj"),
        ("GOOGLE_VERTEX_LOCATION", "us-central1"),
    ];
    const AZURE: [(&str, &str); 2] = [
        ("AZURE_RESOURCE_NAME", "my-resource-1"),
        ("AZURE_API_KEY", "0123456789abcdef0123456789abcdef"),
    ];

    fn all_configured() -> ProviderEnv {
        ProviderEnv::from_pairs([GROQ_KEY, VERTEX[0], VERTEX[1], AZURE[0], AZURE[1]])
    }

    fn single(
        role: ModelRole,
        preference: ProviderKind,
        env: &ProviderEnv,
    ) -> Candidate {
        let mut list = resolve_candidates(role, preference, None, None, None, env).unwrap();
        assert_eq!(list.len(), 1);
        list.remove(0)
    }

    #[test]
    fn preferred_provider_wins_when_configured() {
        let env = all_configured();
        for p in ProviderKind::FALLBACK_ORDER {
            assert_eq!(single(ModelRole::ChatModel, p, &env).provider, p);
        }
    }

    #[test]
    fn vertex_preference_falls_back_to_groq() {
        let env = ProviderEnv::from_pairs([GROQ_KEY, AZURE[0], AZURE[1]]);
        let c = single(ModelRole::ChatModel, ProviderKind::Vertex, &env);
        assert_eq!(c.provider, ProviderKind::Groq);
        assert_eq!(c.model_id, "openai/gpt-oss-20b");
    }

    #[test]
    fn azure_preference_tries_groq_before_vertex() {
        let env = ProviderEnv::from_pairs([GROQ_KEY, VERTEX[0], VERTEX[1]]);
        let c = single(ModelRole::TitleModel, ProviderKind::Azure, &env);
        assert_eq!(c.provider, ProviderKind::Groq);
    }

    #[test]
    fn groq_preference_reaches_azure_last() {
        let env = ProviderEnv::from_pairs([AZURE[0], AZURE[1]]);
        let c = single(ModelRole::ChatModelLarge, ProviderKind::Groq, &env);
        assert_eq!(c.provider, ProviderKind::Azure);
        assert_eq!(c.model_id, "gpt-4.1");
    }

    #[test]
    fn overrides_are_taken_from_the_resolved_provider() {
        let env = ProviderEnv::from_pairs([GROQ_KEY]);
        let vertex: RoleOverrides = [("chat-model".to_string(), "gemini-x".to_string())].into();
        let groq: RoleOverrides = [("chat-model".to_string(), " llama-3.3 ".to_string())].into();
        let list = resolve_candidates(
            ModelRole::ChatModel,
            ProviderKind::Vertex,
            Some(&groq),
            Some(&vertex),
            None,
            &env,
        )
        .unwrap();
        assert_eq!(list[0].provider, ProviderKind::Groq);
        assert_eq!(list[0].model_id, "llama-3.3");
        assert_eq!(list[0].model.model_id(), "llama-3.3");
    }

    #[test]
    fn invalid_azure_resource_name_is_not_a_candidate() {
        let env = ProviderEnv::from_pairs([
            GROQ_KEY,
            ("AZURE_RESOURCE_NAME", "my resource!"),
            AZURE[1],
        ]);
        let c = single(ModelRole::ChatModel, ProviderKind::Azure, &env);
        assert_eq!(c.provider, ProviderKind::Groq);
    }

    #[test]
    fn reasoning_role_is_wrapped_for_every_provider() {
        let env = all_configured();
        for p in ProviderKind::FALLBACK_ORDER {
            let c = single(ModelRole::ChatModelReasoning, p, &env);
            assert!(c.model.extracts_reasoning(), "{p} not wrapped");
            assert_eq!(c.model.provider(), p);
        }
        let plain = single(ModelRole::ChatModel, ProviderKind::Groq, &env);
        assert!(!plain.model.extracts_reasoning());
    }

    #[test]
    fn no_provider_error_names_all_three() {
        let err = resolve_candidates(
            ModelRole::ChatModel,
            ProviderKind::Groq,
            None,
            None,
            None,
            &ProviderEnv::default(),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("No AI provider properly configured."));
        assert!(msg.contains("Groq: GROQ_API_KEY is required but not set"));
        assert!(msg.contains("Vertex: "));
        assert!(msg.contains("Azure: "));
        let ResolveError::NoProviderConfigured { issues } = err;
        assert_eq!(issues.len(), 3);
    }

    fn any_provider() -> impl Strategy<Value = ProviderKind> {
        prop::sample::select(ProviderKind::FALLBACK_ORDER.to_vec())
    }

    fn any_role() -> impl Strategy<Value = ModelRole> {
        prop::sample::select(ModelRole::ALL.to_vec())
    }

    fn any_override() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[ \\t]{0,2}[a-z0-9./-]{0,12}[ \\t]{0,2}")
    }

    proptest! {
        #[test]
        fn resolved_model_is_override_or_static_entry(
            preference in any_provider(),
            role in any_role(),
            groq in any_override(),
            vertex in any_override(),
            azure in any_override(),
        ) {
            let as_map = |v: &Option<String>| {
                v.as_ref()
                    .map(|v| RoleOverrides::from([(role.as_str().to_string(), v.clone())]))
            };
            let (g, v, a) = (as_map(&groq), as_map(&vertex), as_map(&azure));
            let list = resolve_candidates(
                role,
                preference,
                g.as_ref(),
                v.as_ref(),
                a.as_ref(),
                &all_configured(),
            )
            .unwrap();
            prop_assert_eq!(list.len(), 1);
            prop_assert_eq!(list[0].provider, preference);

            let own = match preference {
                ProviderKind::Groq => &groq,
                ProviderKind::Vertex => &vertex,
                ProviderKind::Azure => &azure,
            };
            let expected = match own.as_deref().map(str::trim) {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => default_table(preference).get(role).unwrap().to_string(),
            };
            prop_assert_eq!(&list[0].model_id, &expected);
            prop_assert_eq!(list[0].model.model_id(), expected.as_str());
        }
    }
}
