//! pdf2img-web - browser front end for PDF to image conversion.

mod helpers;
mod routes;
mod state;
mod templates;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use pdf2img::ConversionConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "pdf2img-web")]
#[command(author, version, about = "PDF to Images web server", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "PDF2IMG_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(short, long, env = "PDF2IMG_PORT", default_value = "3000")]
    port: u16,

    /// Rendering DPI (72–600)
    #[arg(long, env = "PDF2IMG_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Largest accepted upload, in megabytes
    #[arg(long, env = "PDF2IMG_MAX_UPLOAD_MB", default_value_t = 200)]
    max_upload_mb: usize,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Build the application router.
fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/convert", post(routes::convert))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},tower_http=info")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // PDFium must be present before the first upload arrives.
    match tokio::task::spawn_blocking(|| pdf2img::ensure_backend(None)).await? {
        Ok(path) => info!("PDFium ready at {}", path.display()),
        Err(e) => {
            error!("Failed to install required dependency: {}", e);
            std::process::exit(1);
        }
    }

    let config = ConversionConfig::builder()
        .dpi(args.dpi)
        .build()
        .context("Invalid configuration")?;
    let state = Arc::new(AppState::new(config));
    let app = router(state, args.max_upload_mb * 1024 * 1024);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid --host/--port")?;
    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
