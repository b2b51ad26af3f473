use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use boighor_backend::config::{self, StoreBackend};
use boighor_backend::relay::DocumentRelay;
use boighor_backend::store::{MemoryStore, RecordStore, SqliteStore};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boighor_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Pick the record store
    let mut sqlite: Option<Arc<SqliteStore>> = None;
    let store: Arc<dyn RecordStore> = match app_config.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory book store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Sqlite => {
            let data_dir = app_config.get_data_dir();
            if !data_dir.exists() {
                std::fs::create_dir_all(&data_dir)?;
                tracing::info!("Created data directory: {:?}", data_dir);
            }

            let db = Arc::new(
                SqliteStore::connect(
                    &app_config.get_database_url(),
                    app_config.database.max_connections,
                )
                .await?,
            );
            db.init().await?;
            sqlite = Some(db.clone());
            db
        }
    };

    let relay = DocumentRelay::new(&app_config.relay)?;
    let state = Arc::new(AppState::new(store, relay));

    let app = api::routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = sqlite {
        db.close().await;
        tracing::info!("Book database closed");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
