use std::future::Future;
use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use common::games::SessionRng;
use common::games::tictactoe::BotSettings;
use common::log;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::move_handler::{health_handler, move_handler};
use crate::server_config::ServerConfig;

#[derive(Clone)]
pub struct WebServerState {
    pub bot_settings: BotSettings,
    pub rng_seed: Option<u64>,
}

impl WebServerState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            bot_settings: config.bot,
            rng_seed: config.rng_seed,
        }
    }

    /// Each request gets its own generator.
    pub fn request_rng(&self) -> SessionRng {
        match self.rng_seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        }
    }
}

pub fn build_router(state: WebServerState, static_files_path: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/move", post(move_handler))
        .route("/health", get(health_handler));

    if let Some(path) = static_files_path {
        router = router.fallback_service(ServeDir::new(path));
    }

    router.layer(cors).with_state(state)
}

pub async fn run_web_server<F>(config: ServerConfig, shutdown_signal: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = WebServerState::from_config(&config);
    let app = build_router(state, config.static_files_path.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.address).await?;
    log!("Web server listening on {}", config.address);
    if let Some(path) = &config.static_files_path {
        log!("Serving static files from {}", path.display());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
