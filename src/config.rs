//! Application configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! Loaded once at startup and passed by reference into every component
//! constructor; no module-level mutable state.

use std::time::Duration;

use crate::error::ConfigError;

/// Default OpenAI model for the query agent.
const DEFAULT_MODEL: &str = "gpt-4.1-mini";
/// Default label for the remote MCP server connection.
const DEFAULT_SERVER_NAME: &str = "leanix";
/// Default listen host for service mode.
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port for service mode.
const DEFAULT_PORT: u16 = 8000;
/// Default provider request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Default maximum tool-calling loop iterations.
const DEFAULT_MAX_TOOL_ITERATIONS: usize = 10;
/// Default maximum tokens for the final answer.
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Transport used to reach the remote MCP endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// MCP streamable HTTP (the successor to the legacy SSE transport).
    StreamableHttp,
    /// Legacy SSE transport.
    Sse,
}

impl TransportKind {
    /// Parses a transport name as it appears in `LEANIX_MCP_TRANSPORT`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "streamable_http" => Ok(Self::StreamableHttp),
            "sse" => Ok(Self::Sse),
            other => Err(ConfigError::Invalid {
                name: "LEANIX_MCP_TRANSPORT",
                value: other.to_string(),
            }),
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StreamableHttp => "streamable_http",
            Self::Sse => "sse",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for the remote LeanIX MCP endpoint.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Endpoint URL.
    pub url: String,
    /// Optional bearer token sent as an `Authorization` header.
    pub auth_bearer: Option<String>,
    /// Transport kind.
    pub transport: TransportKind,
    /// Label for the connection, used in logs.
    pub server_name: String,
}

/// Configuration for the whole application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenAI API key.
    pub api_key: String,
    /// Model identifier for the query agent.
    pub model: String,
    /// Optional base URL override (for proxies or compatible APIs).
    pub base_url: Option<String>,
    /// Remote tool directory connection settings.
    pub directory: DirectoryConfig,
    /// Listen host for service mode.
    pub host: String,
    /// Listen port for service mode.
    pub port: u16,
    /// Provider request timeout.
    pub timeout: Duration,
    /// Maximum tool-calling loop iterations before aborting.
    pub max_tool_iterations: usize,
    /// Maximum tokens for the final answer.
    pub max_tokens: u32,
}

impl AppConfig {
    /// Creates a new builder for `AppConfig`.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if `OPENAI_API_KEY` or
    /// `LEANIX_MCP_URL` is not set, and [`ConfigError::Invalid`] for an
    /// unparseable transport or port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env()?.build()
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    url: Option<String>,
    auth_bearer: Option<String>,
    transport: Option<TransportKind>,
    server_name: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    timeout: Option<Duration>,
    max_tool_iterations: Option<usize>,
    max_tokens: Option<u32>,
}

impl AppConfigBuilder {
    /// Populates unset fields from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `LEANIX_MCP_TRANSPORT` or
    /// `MCP_SERVER_PORT` is set but unparseable.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("OPENAI_MODEL").ok();
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("OPENAI_BASE_URL").ok();
        }
        if self.url.is_none() {
            self.url = std::env::var("LEANIX_MCP_URL").ok();
        }
        if self.auth_bearer.is_none() {
            self.auth_bearer = std::env::var("LEANIX_MCP_AUTH_BEARER").ok();
        }
        if self.transport.is_none() {
            self.transport = std::env::var("LEANIX_MCP_TRANSPORT")
                .ok()
                .map(|v| TransportKind::parse(&v))
                .transpose()?;
        }
        if self.server_name.is_none() {
            self.server_name = std::env::var("LEANIX_MCP_SERVER_NAME").ok();
        }
        if self.host.is_none() {
            self.host = std::env::var("MCP_SERVER_HOST").ok();
        }
        if self.port.is_none() {
            self.port = std::env::var("MCP_SERVER_PORT")
                .ok()
                .map(|v| {
                    v.parse().map_err(|_| ConfigError::Invalid {
                        name: "MCP_SERVER_PORT",
                        value: v.clone(),
                    })
                })
                .transpose()?;
        }
        Ok(self)
    }

    /// Sets the OpenAI API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the remote MCP endpoint URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the bearer token for the remote endpoint.
    #[must_use]
    pub fn auth_bearer(mut self, token: impl Into<String>) -> Self {
        self.auth_bearer = Some(token.into());
        self
    }

    /// Sets the remote transport kind.
    #[must_use]
    pub const fn transport(mut self, transport: TransportKind) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the remote server label.
    #[must_use]
    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = Some(name.into());
        self
    }

    /// Sets the listen host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the listen port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the provider request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the maximum tool-calling loop iterations.
    #[must_use]
    pub const fn max_tool_iterations(mut self, n: usize) -> Self {
        self.max_tool_iterations = Some(n);
        self
    }

    /// Sets the maximum tokens for the final answer.
    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Builds the [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if the API key or endpoint URL
    /// was never set.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_key = self.api_key.ok_or(ConfigError::MissingVar {
            name: "OPENAI_API_KEY",
        })?;
        let url = self.url.ok_or(ConfigError::MissingVar {
            name: "LEANIX_MCP_URL",
        })?;

        Ok(AppConfig {
            api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: self.base_url,
            directory: DirectoryConfig {
                url,
                auth_bearer: self.auth_bearer,
                transport: self.transport.unwrap_or(TransportKind::StreamableHttp),
                server_name: self
                    .server_name
                    .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            },
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_tool_iterations: self
                .max_tool_iterations
                .unwrap_or(DEFAULT_MAX_TOOL_ITERATIONS),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }
}
