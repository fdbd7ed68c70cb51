use std::net::SocketAddr;
use std::sync::Arc;

use reelbook_api::config::ServerConfig;
use reelbook_api::router::build_app_router;
use reelbook_api::state::AppState;
use reelbook_textgen::{TextGenApi, TextGenConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "reelbook_api=debug,reelbook_db=info,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid server configuration");
        std::process::exit(1);
    });
    tracing::info!(
        data_dir = %config.data_dir.display(),
        upload_dir = %config.upload_dir.display(),
        assets_dir = %config.assets_dir.display(),
        "Loaded server configuration"
    );

    let store = reelbook_db::open_store(&config.data_dir).expect("Failed to open data directory");
    reelbook_db::health_check(&store).expect("Data directory is not readable");

    let textgen_config = TextGenConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid text generation configuration");
        std::process::exit(1);
    });
    if textgen_config.api_key.is_empty() {
        tracing::warn!("TEXTGEN_API_KEY is not set; summaries and questions will be rejected upstream");
    }
    let textgen = TextGenApi::new(&textgen_config).expect("Failed to build text generation client");
    tracing::info!(
        base_url = %textgen_config.base_url,
        model = %textgen_config.model,
        "Text generation client ready"
    );

    let state = AppState::new(store, config.clone(), Arc::new(textgen));
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Reelbook listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Shut down cleanly");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler failed");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}
