//! Dialogue Relay server binary.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dialogue_relay::adapters::action::{ActionClientConfig, HttpActionRunner};
use dialogue_relay::adapters::engine::{EngineClientConfig, HttpDialogueEngine};
use dialogue_relay::adapters::http::{routes, AppState};
use dialogue_relay::adapters::postgres::{PostgresConversationStore, PostgresModelStore};
use dialogue_relay::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.server.log_level)
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let engine = HttpDialogueEngine::new(
        EngineClientConfig::new(config.engine.url.clone()).with_timeout(config.engine.timeout()),
    )?;
    let actions = HttpActionRunner::new(
        ActionClientConfig::new(config.engine.action_url.clone())
            .with_timeout(config.engine.timeout()),
    )?;

    let state = AppState {
        engine: Arc::new(engine),
        actions: Arc::new(actions),
        conversations: Arc::new(PostgresConversationStore::new(pool.clone())),
        models: Arc::new(PostgresModelStore::new(pool)),
        engine_url: config.engine.url.clone(),
        data_dir: config.training.data_dir.clone(),
    };

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
    };

    let app = routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, engine = %config.engine.url, actions = %config.engine.action_url, "dialogue relay listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
