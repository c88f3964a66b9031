//! RagAlgo MCP Server - Binary Entry Point
//!
//! ## stdio transport (for desktop agents)
//! ```bash
//! ragalgo-mcp-server --stdio
//! ```
//!
//! ## HTTP transport (SSE sessions and stateless POST /mcp)
//! ```bash
//! ragalgo-mcp-server --port 8080
//! ```

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ragalgo_mcp::api::{self, AppState};
use ragalgo_mcp::config::Config;
use ragalgo_mcp::protocol::ServerInfo;
use ragalgo_mcp::server::run_stdio;
use ragalgo_mcp::tools::build_registry;
use ragalgo_mcp::types::McpResult;
use ragalgo_mcp::upstream::RagAlgoClient;

/// RagAlgo MCP Server - Korean stock & crypto market data
#[derive(Parser, Debug)]
#[command(name = "ragalgo-mcp-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serve a single session over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// HTTP port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// HTTP host to bind to
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    std::panic::set_hook(Box::new(|panic| {
        error!(%panic, "Unrecoverable panic");
        std::process::exit(1);
    }));

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}

/// Logs always go to stderr; stdout belongs to the stdio protocol
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ragalgo_mcp=debug,tower_http=debug"
    } else {
        "ragalgo_mcp=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(args: Args) -> McpResult<()> {
    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    if config.upstream.resolve_api_key().is_err() {
        warn!(
            "{} is not set; data tools will fail until it is",
            config.upstream.api_key_env
        );
    }

    let client = Arc::new(RagAlgoClient::new(config.upstream.clone())?);
    let registry = Arc::new(build_registry(client)?);
    info!(tools = registry.tool_count(), "Tool registry ready");

    if args.stdio {
        info!("Starting RagAlgo MCP Server (stdio mode)");
        run_stdio(ServerInfo::default(), registry).await
    } else {
        info!("Starting RagAlgo MCP Server (HTTP/SSE mode)");
        let state = Arc::new(AppState::new(config, registry));
        api::serve(state, shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolve when `signal` fires; a listener that failed to install never resolves
async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
