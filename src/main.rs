use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use jenkins_badges::config::{BadgeConfig, CliArgs};
use jenkins_badges::server;
use jenkins_badges::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Initialize tracing; keep the guard alive so the file writer flushes
    let (file_layer, _log_guard) = match &args.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "jenkins-badges.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jenkins_badges=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    info!("Starting jenkins-badges v{}", env!("CARGO_PKG_VERSION"));

    let config = match BadgeConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    info!("Jenkins: {}", config.jenkins_url);
    info!("Badge service: {}", config.shields_url);
    info!(
        "Thresholds: yellow={} red={}",
        config.thresholds.yellow, config.thresholds.red
    );
    info!("Results file: {:?}", config.results_file);
    if config.username.is_none() {
        info!("No Jenkins user configured, using anonymous access");
    }

    let addr = format!("{}:{}", config.bind, config.port);
    let state = Arc::new(AppState::new(config)?);

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
