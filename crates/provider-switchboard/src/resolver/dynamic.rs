//! Settings-backed resolution with a static fallback tier.

use super::{Candidate, build_candidate, resolve_candidates};
use crate::catalog::ModelRole;
use crate::error::ResolveError;
use crate::provider::{ProviderEnv, ProviderKind};
use crate::settings::SettingsStore;

/// Resolve `role` using the preference and overrides currently stored.
///
/// Missing settings resolve as `groq` with no overrides. A failed settings
/// read drops to [`resolve_static_default`]. Resolution errors propagate.
pub async fn resolve_for_role(
    role: ModelRole,
    env: &ProviderEnv,
    store: &dyn SettingsStore,
) -> Result<Candidate, ResolveError> {
    let settings = match store.load().await {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(role = %role, "settings read failed, using static default: {}", e);
            return Ok(resolve_static_default(role, env));
        }
    };

    let preference = settings.preference();
    tracing::debug!(role = %role, preference = %preference, "resolving from settings");
    let mut candidates = resolve_candidates(
        role,
        preference,
        settings.overrides_for(ProviderKind::Groq),
        settings.overrides_for(ProviderKind::Vertex),
        settings.overrides_for(ProviderKind::Azure),
        env,
    )?;
    // resolve_candidates never returns an empty list on success.
    Ok(candidates.remove(0))
}

/// Groq model for `role` from the static table, without overrides or
/// validation.
pub fn resolve_static_default(role: ModelRole, env: &ProviderEnv) -> Candidate {
    build_candidate(ProviderKind::Groq, role, None, env)
}
