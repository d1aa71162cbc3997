//! Print provider validation results; exit non-zero when no provider is usable.

use std::process::ExitCode;

use provider_switchboard::config::{load_user_config_or_report, switchboard_home};
use provider_switchboard::provider::ProviderEnv;
use provider_switchboard::telemetry::init_tracing;
use provider_switchboard::validation::{render_report, require_valid_provider, validation_summary};

fn main() -> ExitCode {
    let sb_home = switchboard_home();
    let user_cfg = load_user_config_or_report(&sb_home);
    init_tracing(&sb_home, user_cfg.as_ref());

    println!("Validating AI provider environment configuration...\n");
    let env = ProviderEnv::from_env();
    let summary = validation_summary(&env);
    println!("{}", render_report(&summary));

    match require_valid_provider(&env) {
        Ok(()) => {
            println!("Success: at least one AI provider is properly configured.");
            println!(
                "Configured providers: {}",
                summary
                    .configured_providers
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            if summary.total_warnings > 0 {
                println!(
                    "Note: there are {} warning(s) that should be addressed.",
                    summary.total_warnings
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("validation failed: {}", e);
            println!("Error: no AI provider is properly configured.");
            println!("{e}");
            println!("  - Groq: set GROQ_API_KEY");
            println!("  - Vertex AI: set GOOGLE_VERTEX_PROJECT and GOOGLE_VERTEX_LOCATION");
            println!("  - Azure OpenAI: set AZURE_RESOURCE_NAME and AZURE_API_KEY");
            ExitCode::FAILURE
        }
    }
}
