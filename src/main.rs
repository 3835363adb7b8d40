//! Interactive entry point.
//!
//! Starts a host or worker agent from the configuration file and runs a
//! line-oriented REPL against it, one conversation context per session.

use a2a_mesh::agent::{HostAgent, HostAgentConfig, WorkerAgent, WorkerAgentConfig};
use a2a_mesh::config::MeshConfig;
use a2a_mesh::error::AgentError;
use a2a_mesh::llm::OpenAIChatClient;
use a2a_mesh::types::ContextId;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "a2a-mesh", version, about = "Host-agent orchestration for A2A agent networks")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a worker agent with MCP plugins instead of a host agent
    #[arg(long)]
    worker: bool,

    /// API key override for the chat-completion provider
    #[arg(long, env = "A2A_MESH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

/// The agent kind selected on the command line.
enum Agent {
    Host(HostAgent),
    Worker(WorkerAgent),
}

impl Agent {
    async fn process(&self, input: &str, context: &ContextId) -> Result<String, AgentError> {
        match self {
            Self::Host(agent) => agent.process(input, context).await,
            Self::Worker(agent) => agent.process(input, context).await,
        }
    }

    fn close(&self) {
        match self {
            Self::Host(agent) => agent.close(),
            Self::Worker(agent) => agent.close(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "a2a_mesh=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => a2a_mesh::config::from_path(path)?,
        None => a2a_mesh::config::load()?,
    };

    let mut provider = config.llm.clone().ok_or_else(|| {
        AgentError::configuration("llm", "no chat-completion provider configured")
    })?;
    if let Some(api_key) = &cli.api_key {
        provider = provider.with_api_key(api_key);
    }
    let chat = Arc::new(OpenAIChatClient::new(&provider)?);

    let agent = if cli.worker {
        let worker = WorkerAgent::new(worker_config(&config), chat);
        worker.initialize().await?;
        Agent::Worker(worker)
    } else {
        let host = HostAgent::new(host_config(&config), chat)?;
        host.initialize()?;
        Agent::Host(host)
    };

    let context = ContextId::generate();
    println!("Conversation {context}. Empty line or Ctrl-D exits.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        match agent.process(&line, &context).await {
            Ok(answer) => println!("{answer}"),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    agent.close();
    Ok(())
}

fn host_config(config: &MeshConfig) -> HostAgentConfig {
    let mut host = HostAgentConfig::new(&config.agent.name, &config.agent.description);
    host.endpoints = config.endpoints.clone();
    host.system_message = config.agent.system_message.clone();
    host.proxy_timeout = Duration::from_secs(config.limits.proxy_timeout_secs);
    host.max_tool_rounds = config.limits.max_tool_rounds;
    host.max_conversations = config.limits.max_conversations;
    host
}

fn worker_config(config: &MeshConfig) -> WorkerAgentConfig {
    let mut worker = WorkerAgentConfig::new(&config.agent.name, &config.agent.description);
    worker.mcp_urls = config.mcp_urls.clone();
    worker.system_message = config.agent.system_message.clone();
    worker.max_tool_rounds = config.limits.max_tool_rounds;
    worker.max_conversations = config.limits.max_conversations;
    worker
}
