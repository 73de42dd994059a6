//! CLI command implementations.
//!
//! Each command builds its dependencies (config, directory connection,
//! provider, agent) explicitly; nothing is cached in module state.

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use tracing::info;

use crate::agent::{OpenAiProvider, QueryAgent};
use crate::cli::parser::{Cli, Commands, ServeCommands};
use crate::config::AppConfig;
use crate::directory::{DEFAULT_VOCABULARY, McpDirectory, ToolDirectory, select_relevant};
use crate::error::{Error, Result};
use crate::mcp::{DesignAgentServer, serve_http, serve_stdio};

/// Executes the CLI command.
///
/// # Returns
///
/// Result with output string on success. Serve commands run until
/// shutdown and return an empty string.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the remote endpoint
/// is unreachable, or the query fails.
pub async fn execute(cli: &Cli) -> Result<String> {
    let config = AppConfig::from_env()?;

    match &cli.command {
        Commands::Query { topic } => cmd_query(&config, topic.as_deref()).await,
        Commands::Tools => cmd_tools(&config).await,
        Commands::Serve(sub) => cmd_serve(&config, sub).await,
    }
}

/// Builds a query agent over a fresh directory connection.
async fn build_agent(config: &AppConfig) -> Result<QueryAgent> {
    let directory = McpDirectory::connect(&config.directory).await?;
    let provider = Box::new(OpenAiProvider::new(config));
    Ok(QueryAgent::new(config, provider, Arc::new(directory)))
}

/// Runs one query and returns the synthesized answer.
async fn cmd_query(config: &AppConfig, topic: Option<&str>) -> Result<String> {
    let topic = match topic {
        Some(t) => t.to_string(),
        None => prompt_for_topic()?,
    };

    let agent = build_agent(config).await?;
    let result = agent.answer(&topic).await?;

    info!(
        tools_bound = result.tools_bound,
        total_tokens = result.usage.total_tokens,
        "query finished"
    );

    Ok(result.final_text)
}

/// Reads one topic line from stdin.
fn prompt_for_topic() -> Result<String> {
    // stdout stays clean for the answer
    #[allow(clippy::print_stderr)]
    {
        eprint!("Enter topic: ");
    }
    use std::io::Write;
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Lists the remote tools with selection markers.
async fn cmd_tools(config: &AppConfig) -> Result<String> {
    let directory = McpDirectory::connect(&config.directory).await?;
    let listing = directory.list_tools().await?;
    let selected = select_relevant(&listing, DEFAULT_VOCABULARY);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} tools listed by {}, {} selected (*)",
        listing.len(),
        directory.server_name(),
        selected.len()
    );
    for tool in &listing {
        let marker = if selected.iter().any(|s| s.name == tool.name) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, "{marker} {} - {}", tool.name, tool.description);
    }

    Ok(out)
}

/// Starts the MCP service surface on the requested transport.
async fn cmd_serve(config: &AppConfig, sub: &ServeCommands) -> Result<String> {
    let directory = McpDirectory::connect(&config.directory).await?;
    let provider = Box::new(OpenAiProvider::new(config));
    let agent = Arc::new(QueryAgent::new(config, provider, Arc::new(directory)));
    let server = DesignAgentServer::new(agent);

    match sub {
        ServeCommands::Stdio => serve_stdio(server).await.map_err(Error::Server)?,
        ServeCommands::Http { host, port } => {
            let host = host.as_deref().unwrap_or(&config.host);
            let port = port.unwrap_or(config.port);
            serve_http(server, host, port).await.map_err(Error::Server)?;
        }
    }

    Ok(String::new())
}
