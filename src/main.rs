use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cost_engine::api::{AppState, create_router};
use cost_engine::config::EngineConfig;
use cost_engine::distance::RoutesClient;
use cost_engine::store::PgStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cost_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("ENGINE_CONFIG").unwrap_or_else(|_| "engine.yaml".into());
    let config = EngineConfig::load_or_default(&config_path).expect("Failed to load configuration");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let store = PgStore::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    store
        .health_check()
        .await
        .expect("Database health check failed");

    store
        .run_migrations()
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let api_key = std::env::var("ROUTES_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("ROUTES_API_KEY is not set; distance lookups will answer zero kilometers");
    }
    let distance =
        RoutesClient::new(&config.distance, api_key).expect("Failed to build distance client");

    let state = AppState::new(Arc::new(store), Arc::new(distance));
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let host = config
        .server
        .host
        .parse()
        .expect("Invalid server host in configuration");
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}
