use anyhow::Result;
use clap::Parser;
use gradeboard_core::storage::Store;
use gradeboard_server::config::ServerConfig;
use gradeboard_server::proxy::EvaluatorClient;
use gradeboard_server::server::{self, App};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// database path (overrides DATABASE_URL)
    #[arg(long)]
    db: Option<PathBuf>,

    /// listen address (overrides GRADEBOARD_LISTEN)
    #[arg(long)]
    listen: Option<String>,
}

use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = ServerConfig::from_env();
    if let Some(db) = args.db {
        cfg.db_path = db;
    }
    if let Some(listen) = args.listen {
        cfg.listen = listen;
    }

    init_logging(&cfg.log_level);

    let store = Store::open(&cfg.db_path)?;
    store.init_schema()?;

    let app = App {
        store,
        evaluator: EvaluatorClient::new(&cfg.evaluator_url),
    };

    let listener = tokio::net::TcpListener::bind(&cfg.listen).await?;
    tracing::info!(
        event = "server_start",
        listen = %cfg.listen,
        db = %cfg.db_path.display(),
        evaluator_url = %cfg.evaluator_url
    );

    server::serve(listener, app).await
}
