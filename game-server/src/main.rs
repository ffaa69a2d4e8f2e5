use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_core::{GameEngine, KidsMode};
use game_persistence::{ScoreRepository, WordRepository};
use game_server::{config::Config, create_routes};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting word scramble server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Loading words from: {}", config.words_file);
    let words = match WordRepository::load(&config.words_file).await {
        Ok(words) if !words.is_empty() => Arc::new(words),
        Ok(_) => {
            tracing::error!("Word list '{}' contains no words", config.words_file);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Failed to load words from '{}': {:#}", config.words_file, e);
            tracing::error!("Set WORDS_FILE to a file of word,category,difficulty[,image_url] lines.");
            std::process::exit(1);
        }
    };
    let scores = Arc::new(ScoreRepository::new());

    let engine = Arc::new(GameEngine::new(words.clone(), scores, config.game_rules()));
    let kids = Arc::new(KidsMode::new(words));

    let routes = create_routes(engine.clone(), kids);

    // Start session pruning task
    let prune_engine = engine.clone();
    let prune_interval = Duration::from_secs(config.session_prune_interval_seconds.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(prune_interval);
        loop {
            interval.tick().await;
            prune_engine.sessions().prune_idle();
        }
    });

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(_) => {
            tracing::error!("Invalid HOST '{}'", config.host);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
