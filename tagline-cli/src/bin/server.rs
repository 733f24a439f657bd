use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tagline_cli::{AppState, ChatBackend, router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// tagline chat backend
#[derive(Parser, Debug)]
#[command(name = "tagline-server")]
#[command(about = "Chat backend with mention suggestions and room channels", long_about = None)]
struct Args {
    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Port to listen on
    #[arg(short, long, default_value = "5050")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Seed suggestion labels from a file (one per line, `#` comments)
    #[arg(short, long)]
    suggestions: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Default: info level, with --verbose: debug level
    let default_filter = if args.verbose {
        "tagline_server=debug,tagline_cli=debug,tagline_composer=debug,tower_http=debug"
    } else {
        "tagline_server=info,tagline_cli=info,tagline_composer=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend = ChatBackend::new();
    if let Some(path) = &args.suggestions {
        backend
            .load_suggestions(path)
            .with_context(|| format!("loading suggestions from {}", path.display()))?;
    }

    let app = router(AppState::new(backend));

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
