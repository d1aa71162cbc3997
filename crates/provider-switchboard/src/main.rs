use std::sync::Arc;
use std::time::Duration;

use env_flags::env_flags;
use rust_mcp_sdk::error::SdkResult;
use rust_mcp_sdk::mcp_server::{
    HyperServerOptions, ServerRuntime, hyper_server_core, server_runtime_core,
};
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, LATEST_PROTOCOL_VERSION, ServerCapabilities,
    ServerCapabilitiesTools,
};
use rust_mcp_sdk::{McpServer, StdioTransport, TransportOptions};

use provider_switchboard::config::{load_user_config_or_report, settings_path, switchboard_home};
use provider_switchboard::handler::SwitchboardHandler;
use provider_switchboard::health::{DEFAULT_PROBE_TIMEOUT, ReqwestProbe};
use provider_switchboard::provider::ProviderEnv;
use provider_switchboard::settings::TomlSettingsStore;
use provider_switchboard::telemetry::init_tracing;
use provider_switchboard::validation::configured_providers;

#[tokio::main]
async fn main() -> SdkResult<()> {
    let sb_home = switchboard_home();
    let user_cfg = load_user_config_or_report(&sb_home);
    init_tracing(&sb_home, user_cfg.as_ref());

    env_flags! {
        /// Transport: "stdio" (default) or "http"
        TRANSPORT: &str = "stdio";
        /// Host for HTTP transport
        HOST: &str = "127.0.0.1";
        /// Port for HTTP transport
        PORT: u16 = 8081;
        /// Ping interval for HTTP SSE
        PING_SECS: u64 = 5;
        /// Enable JSON response mode for HTTP
        HTTP_JSON: bool = false;
        /// Provider settings TOML. Defaults to <SWITCHBOARD_HOME>/provider-settings.toml
        PROVIDER_SETTINGS_FILE: &str = "";
        /// Per-request timeout for provider health probes
        HEALTH_TIMEOUT_MS: u64 = 10_000;
    }

    tracing::info!("starting provider-switchboard (transport={})", *TRANSPORT);
    tracing::info!("switchboard_home={}", sb_home.display());

    let settings_file = settings_path(Some(*PROVIDER_SETTINGS_FILE), user_cfg.as_ref(), &sb_home);
    tracing::info!("provider settings file={}", settings_file.display());

    let timeout = if std::env::var_os("HEALTH_TIMEOUT_MS").is_some() {
        Duration::from_millis(*HEALTH_TIMEOUT_MS)
    } else {
        user_cfg
            .as_ref()
            .and_then(|c| c.health.as_ref())
            .and_then(|h| h.timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PROBE_TIMEOUT)
    };
    let probe = match ReqwestProbe::new(timeout) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("failed to initialize HTTP probe: {:#}", e);
            std::process::exit(1);
        }
    };

    let configured = configured_providers(&ProviderEnv::from_env());
    if configured.is_empty() {
        tracing::warn!("no provider is configured; resolve_model will fail until one is");
    } else {
        tracing::info!(
            "configured providers: {}",
            configured
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let server_details = InitializeResult {
        server_info: Implementation {
            name: "provider-switchboard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some("Provider Switchboard MCP Server".to_string()),
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some(
            "Call resolve_model with { role } to pick a provider and model; validate_providers, \
             provider_health and azure_models take no arguments."
                .to_string(),
        ),
        protocol_version: LATEST_PROTOCOL_VERSION.to_string(),
    };

    let handler = SwitchboardHandler::new(
        Arc::new(TomlSettingsStore::new(settings_file)),
        Arc::new(probe),
    );

    if *TRANSPORT == "stdio" {
        let transport = StdioTransport::new(TransportOptions::default())?;
        let server: ServerRuntime =
            server_runtime_core::create_server(server_details, transport, handler);
        tracing::info!("starting stdio server");
        if let Err(e) = server.start().await {
            let msg = match e.rpc_error_message() {
                Some(m) => m.to_string(),
                None => e.to_string(),
            };
            tracing::error!("server runtime error: {}", msg);
        }
    } else {
        let host = (*HOST).to_string();
        let port = *PORT;
        let server = hyper_server_core::create_server(
            server_details,
            handler,
            HyperServerOptions {
                host: host.clone(),
                port,
                ping_interval: Duration::from_secs(*PING_SECS),
                enable_json_response: Some(*HTTP_JSON),
                ..Default::default()
            },
        );
        tracing::info!(
            "http server listening on {}:{} (json={}, ping_secs={})",
            host,
            port,
            *HTTP_JSON,
            *PING_SECS
        );
        if let Err(e) = server.start().await {
            let msg = match e.rpc_error_message() {
                Some(m) => m.to_string(),
                None => e.to_string(),
            };
            tracing::error!("hyper server error: {}", msg);
        }
    }
    tracing::info!("server stopped");
    Ok(())
}
