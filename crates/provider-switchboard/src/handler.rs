//! MCP server handler exposing provider resolution and diagnostics as tools.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::schema::{
    CallToolResult, ClientRequest, ListToolsResult, RpcError, TextContent, Tool, ToolInputSchema,
    schema_utils::{NotificationFromClient, RequestFromClient, ResultFromServer},
};
use rust_mcp_sdk::{
    McpServer,
    mcp_server::{ServerHandlerCore, enforce_compatible_protocol_version},
};
use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue, json};

use crate::catalog::ModelRole;
use crate::health::{HttpProbe, check_health, list_azure_models};
use crate::provider::ProviderEnv;
use crate::resolver::resolve_for_role;
use crate::settings::SettingsStore;
use crate::validation::{render_report, validation_summary};

pub const TOOL_RESOLVE_MODEL: &str = "resolve_model";
pub const TOOL_VALIDATE_PROVIDERS: &str = "validate_providers";
pub const TOOL_PROVIDER_HEALTH: &str = "provider_health";
pub const TOOL_AZURE_MODELS: &str = "azure_models";

pub struct SwitchboardHandler {
    store: Arc<dyn SettingsStore>,
    probe: Arc<dyn HttpProbe>,
    /// Fixed provider environment; read from the process on each call when unset.
    pinned_env: Option<ProviderEnv>,
}

impl SwitchboardHandler {
    pub fn new(store: Arc<dyn SettingsStore>, probe: Arc<dyn HttpProbe>) -> Self {
        Self {
            store,
            probe,
            pinned_env: None,
        }
    }

    pub fn with_env(mut self, env: ProviderEnv) -> Self {
        self.pinned_env = Some(env);
        self
    }

    fn env(&self) -> ProviderEnv {
        self.pinned_env.clone().unwrap_or_else(ProviderEnv::from_env)
    }

    pub fn tool_definitions(&self) -> Vec<Tool> {
        let mut role_schema = JsonMap::new();
        role_schema.insert("type".to_string(), json!("string"));
        role_schema.insert(
            "enum".to_string(),
            JsonValue::Array(ModelRole::ALL.iter().map(|r| json!(r.as_str())).collect()),
        );
        role_schema.insert(
            "description".to_string(),
            json!("Logical model role, e.g. chat-model or title-model"),
        );
        let mut resolve_props = HashMap::<String, JsonMap<String, JsonValue>>::new();
        resolve_props.insert("role".to_string(), role_schema);

        vec![
            tool(
                TOOL_RESOLVE_MODEL,
                "Resolve the provider and model id for a role using stored settings",
                vec!["role".to_string()],
                Some(resolve_props),
            ),
            tool(
                TOOL_VALIDATE_PROVIDERS,
                "Validate Groq, Vertex and Azure environment configuration",
                Vec::new(),
                None,
            ),
            tool(
                TOOL_PROVIDER_HEALTH,
                "Probe each provider and report overall status",
                Vec::new(),
                None,
            ),
            tool(
                TOOL_AZURE_MODELS,
                "List Azure OpenAI deployments, falling back to defaults",
                Vec::new(),
                None,
            ),
        ]
    }

    /// Run one tool and return its JSON payload.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<&JsonMap<String, JsonValue>>,
    ) -> Result<JsonValue, RpcError> {
        let env = self.env();
        match name {
            TOOL_RESOLVE_MODEL => {
                let raw = arguments
                    .and_then(|m| m.get("role"))
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        tracing::error!("missing required 'role' in arguments (tool={})", name);
                        RpcError::invalid_params()
                            .with_message("missing required 'role' string".to_string())
                    })?;
                let role = raw.parse::<ModelRole>().map_err(|e| {
                    tracing::warn!("rejecting role {:?}", raw);
                    RpcError::invalid_params().with_message(format!("{e}"))
                })?;
                match resolve_for_role(role, &env, self.store.as_ref()).await {
                    Ok(c) => {
                        let request = c.model.request();
                        tracing::info!(role = %role, provider = %c.provider, model = %c.model_id, "resolved");
                        Ok(json!({
                            "ok": true,
                            "role": role,
                            "provider": c.provider,
                            "modelId": c.model_id,
                            "reasoning": c.model.extracts_reasoning(),
                            "endpoint": request.url,
                        }))
                    }
                    Err(e) => {
                        tracing::warn!(role = %role, "resolution failed: {}", e);
                        Ok(json!({ "ok": false, "error": e.to_string() }))
                    }
                }
            }
            TOOL_VALIDATE_PROVIDERS => {
                let summary = validation_summary(&env);
                let mut payload = to_json(&summary)?;
                if let Some(obj) = payload.as_object_mut() {
                    obj.insert("report".to_string(), json!(render_report(&summary)));
                }
                Ok(payload)
            }
            TOOL_PROVIDER_HEALTH => to_json(&check_health(&env, self.probe.as_ref()).await),
            TOOL_AZURE_MODELS => to_json(&list_azure_models(&env, self.probe.as_ref()).await),
            _ => {
                tracing::warn!("unknown tool: {}", name);
                Err(RpcError::method_not_found().with_message(format!("Unknown tool '{name}'")))
            }
        }
    }
}

fn tool(
    name: &str,
    description: &str,
    required: Vec<String>,
    properties: Option<HashMap<String, JsonMap<String, JsonValue>>>,
) -> Tool {
    Tool {
        annotations: None,
        description: Some(description.to_string()),
        input_schema: ToolInputSchema::new(required, properties),
        meta: None,
        name: name.to_string(),
        output_schema: None,
        title: None,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, RpcError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("failed to serialize tool result: {}", e);
        RpcError::internal_error().with_message(e.to_string())
    })
}

#[async_trait]
impl ServerHandlerCore for SwitchboardHandler {
    async fn handle_request(
        &self,
        request: RequestFromClient,
        runtime: &dyn McpServer,
    ) -> std::result::Result<ResultFromServer, RpcError> {
        let method_name = request.method().to_owned();
        tracing::info!("handle_request: method={}", method_name);
        match request {
            RequestFromClient::ClientRequest(client_request) => match client_request {
                ClientRequest::InitializeRequest(initialize_request) => {
                    let mut server_info = runtime.server_info().to_owned();
                    if let Some(updated_protocol_version) = enforce_compatible_protocol_version(
                        &initialize_request.params.protocol_version,
                        &server_info.protocol_version,
                    )
                    .map_err(|err| {
                        tracing::error!(
                            "incompatible protocol version (client={}, server={})",
                            initialize_request.params.protocol_version,
                            server_info.protocol_version
                        );
                        RpcError::internal_error().with_message(err.to_string())
                    })? {
                        server_info.protocol_version = updated_protocol_version;
                    }
                    tracing::info!("initialized (protocol={})", server_info.protocol_version);
                    Ok(server_info.into())
                }

                ClientRequest::ListToolsRequest(_) => {
                    let tools = self.tool_definitions();
                    tracing::info!("list_tools (count={})", tools.len());
                    Ok(ListToolsResult {
                        meta: None,
                        next_cursor: None,
                        tools,
                    }
                    .into())
                }

                ClientRequest::CallToolRequest(request) => {
                    let tool = request.tool_name().to_string();
                    tracing::info!("call_tool request: tool={}", tool);
                    let payload = self
                        .call_tool(&tool, request.params.arguments.as_ref())
                        .await?;
                    Ok(
                        CallToolResult::text_content(vec![TextContent::from(payload.to_string())])
                            .into(),
                    )
                }

                _ => {
                    tracing::warn!("method not implemented: {}", method_name);
                    Err(RpcError::method_not_found()
                        .with_message(format!("No handler is implemented for '{method_name}'.")))
                }
            },
            RequestFromClient::CustomRequest(_) => {
                tracing::warn!("custom request not implemented");
                Err(RpcError::method_not_found()
                    .with_message("No handler is implemented for custom requests.".to_string()))
            }
        }
    }

    async fn handle_notification(
        &self,
        notification: NotificationFromClient,
        _: &dyn McpServer,
    ) -> std::result::Result<(), RpcError> {
        match &notification {
            NotificationFromClient::ClientNotification(_) => {
                tracing::debug!("handle_notification: client notification")
            }
            NotificationFromClient::CustomNotification(_) => {
                tracing::debug!("handle_notification: custom notification")
            }
        }
        Ok(())
    }

    async fn handle_error(
        &self,
        error: &RpcError,
        _: &dyn McpServer,
    ) -> std::result::Result<(), RpcError> {
        tracing::error!(
            "handle_error from client (code={:?}, message={:?})",
            error.code,
            error.message
        );
        Ok(())
    }
}
