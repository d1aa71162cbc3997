use std::fmt::Write as _;

use super::ValidationSummary;

/// Multi-line, human-readable rendering of a validation summary.
pub fn render_report(summary: &ValidationSummary) -> String {
    let mut out = String::new();
    let status = |ok: bool| if ok { "valid" } else { "invalid" };
    let configured = if summary.configured_providers.is_empty() {
        "none".to_string()
    } else {
        summary
            .configured_providers
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let _ = writeln!(out, "=== AI Provider Configuration Validation ===");
    let _ = writeln!(out, "Status: {}", status(summary.has_valid_provider));
    let _ = writeln!(out, "Configured providers: {configured}");
    let _ = writeln!(out, "Total errors: {}", summary.total_errors);
    let _ = writeln!(out, "Total warnings: {}", summary.total_warnings);

    for result in summary.details.iter() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "--- {} provider ---",
            result.provider.as_str().to_ascii_uppercase()
        );
        let _ = writeln!(out, "Status: {}", status(result.is_valid));
        if !result.errors.is_empty() {
            let _ = writeln!(out, "Errors:");
            for e in &result.errors {
                let _ = writeln!(out, "  error: {e}");
            }
        }
        if !result.warnings.is_empty() {
            let _ = writeln!(out, "Warnings:");
            for w in &result.warnings {
                let _ = writeln!(out, "  warning: {w}");
            }
        }
        if result.errors.is_empty() && result.warnings.is_empty() {
            let _ = writeln!(out, "  no issues found");
        }
    }
    let _ = writeln!(out, "\n============================================");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderEnv;
    use crate::validation::validation_summary;

    #[test]
    fn report_lists_every_provider() {
        let env = ProviderEnv::from_pairs([
            ("GOOGLE_VERTEX_PROJECT", "p"),
            ("GOOGLE_VERTEX_LOCATION", "us-central1"),
            ("GOOGLE_VERTEX_API_KEY", "k"),
        ]);
        let text = render_report(&validation_summary(&env));
        assert!(text.contains("Configured providers: vertex"));
        assert!(text.contains("--- GROQ provider ---"));
        assert!(text.contains("--- VERTEX provider ---\nStatus: valid\n  no issues found"));
        assert!(text.contains("  error: AZURE_RESOURCE_NAME is required but not set"));
    }
}
