use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;

use studyaid::client::SolarClient;
use studyaid::server::{self, AppState};

#[derive(Parser)]
#[command(
    name = "studyaid-server",
    about = "HTTP relay that turns lecture text into study aids via the Upstage Solar API",
    version
)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "STUDYAID_PORT", default_value_t = 8000)]
    port: u16,

    /// Bind address (use 0.0.0.0 for LAN access)
    #[arg(long, env = "STUDYAID_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Log filter (trace, debug, info, warn, error, or a full EnvFilter directive)
    #[arg(long, env = "STUDYAID_LOG")]
    log: Option<String>,

    /// Emit logs as JSON lines instead of human-readable output
    #[arg(long, env = "STUDYAID_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = args
        .log
        .unwrap_or_else(|| "studyaid=info,tower_http=info".to_string());
    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }

    // Missing UPSTAGE_API_KEY is fatal: the process must not start.
    let client = SolarClient::from_env().context("failed to build Solar client")?;
    info!(
        base_url = %client.config().base_url,
        model = %client.config().model,
        api_key = %client.config().api_key_hint(),
        "solar client ready"
    );

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    server::serve(listener, AppState::new(client))
        .await
        .context("server error")?;

    Ok(())
}
