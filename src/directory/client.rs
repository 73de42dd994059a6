//! MCP client for the remote LeanIX tool directory.
//!
//! Wraps an rmcp client session over the configured transport
//! (streamable HTTP or legacy SSE) with bearer authentication. The session
//! is established once and reused for every listing and invocation within
//! the process lifetime; rmcp multiplexes concurrent requests over it.

use async_trait::async_trait;
use rmcp::ServiceExt;
use rmcp::model::CallToolRequestParam;
use rmcp::service::{RoleClient, RunningService, ServiceError};
use rmcp::transport::sse_client::SseClientConfig;
use rmcp::transport::streamable_http_client::StreamableHttpClientTransportConfig;
use rmcp::transport::{SseClientTransport, StreamableHttpClientTransport};
use tracing::{debug, info};

use crate::config::{DirectoryConfig, TransportKind};
use crate::error::DirectoryError;

use super::{ToolDescriptor, ToolDirectory, ToolOutput};

/// Remote tool directory backed by an rmcp client session.
pub struct McpDirectory {
    service: RunningService<RoleClient, ()>,
    server_name: String,
}

impl McpDirectory {
    /// Connects to the remote MCP endpoint described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Connection`] if the transport cannot be
    /// established or the MCP initialize handshake fails (including
    /// rejected authentication).
    pub async fn connect(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let http = build_http_client(config.auth_bearer.as_deref())?;

        let service = match config.transport {
            TransportKind::StreamableHttp => {
                let transport = StreamableHttpClientTransport::with_client(
                    http,
                    StreamableHttpClientTransportConfig::with_uri(config.url.clone()),
                );
                ().serve(transport).await.map_err(connection_error)?
            }
            TransportKind::Sse => {
                let transport = SseClientTransport::start_with_client(
                    http,
                    SseClientConfig {
                        sse_endpoint: config.url.clone().into(),
                        ..Default::default()
                    },
                )
                .await
                .map_err(connection_error)?;
                ().serve(transport).await.map_err(connection_error)?
            }
        };

        info!(
            server = %config.server_name,
            transport = %config.transport,
            "connected to MCP endpoint"
        );

        Ok(Self {
            service,
            server_name: config.server_name.clone(),
        })
    }

    /// Returns the configured label for this connection.
    #[must_use]
    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}

#[async_trait]
impl ToolDirectory for McpDirectory {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, DirectoryError> {
        let tools = self
            .service
            .list_all_tools()
            .await
            .map_err(map_service_error)?;

        debug!(server = %self.server_name, count = tools.len(), "listed remote tools");

        Ok(tools.into_iter().map(descriptor_from_tool).collect())
    }

    async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolOutput, DirectoryError> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => Some(map),
            serde_json::Value::Null => None,
            other => {
                return Err(DirectoryError::Protocol {
                    message: format!("tool arguments must be a JSON object, got: {other}"),
                });
            }
        };

        let result = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments,
            })
            .await
            .map_err(map_service_error)?;

        let mut content = String::new();
        for item in &result.content {
            if let Some(text) = item.as_text() {
                content.push_str(&text.text);
            }
        }

        Ok(ToolOutput {
            content,
            is_error: result.is_error.unwrap_or(false),
        })
    }
}

/// Builds a reqwest client carrying the bearer token as a default header.
fn build_http_client(auth_bearer: Option<&str>) -> Result<reqwest::Client, DirectoryError> {
    let mut headers = reqwest::header::HeaderMap::new();
    if let Some(token) = auth_bearer {
        let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| DirectoryError::Connection {
                message: format!("invalid bearer token: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| DirectoryError::Connection {
            message: format!("HTTP client construction failed: {e}"),
        })
}

/// Converts an rmcp tool into our descriptor type.
fn descriptor_from_tool(tool: rmcp::model::Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.as_deref().unwrap_or_default().to_string(),
        parameters: serde_json::Value::Object((*tool.input_schema).clone()),
    }
}

/// Maps a handshake/transport setup failure to a connection error.
fn connection_error<E: std::fmt::Display>(e: E) -> DirectoryError {
    DirectoryError::Connection {
        message: e.to_string(),
    }
}

/// Maps an in-session rmcp failure onto the directory taxonomy.
///
/// Transport-level failures mean the endpoint went away; everything else
/// (malformed responses, MCP-level errors) is a protocol failure.
fn map_service_error(e: ServiceError) -> DirectoryError {
    match e {
        ServiceError::TransportSend(_) | ServiceError::TransportClosed => {
            DirectoryError::Connection {
                message: e.to_string(),
            }
        }
        other => DirectoryError::Protocol {
            message: other.to_string(),
        },
    }
}
