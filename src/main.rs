//! Project Tracker server.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use project_tracker::adapters::{
    app_router, default_fixtures, InMemoryStore, PostgresStaffReader, Repositories,
};
use project_tracker::config::AppConfig;
use project_tracker::ports::StaffReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config);

    let reader: Arc<dyn StaffReader> = match &config.database {
        Some(database) => {
            let pool = database.connect().await?;
            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("migrations applied");
            }
            if config.features.load_fixtures {
                warn!("fixtures load into the in-memory store only; skipping");
            }
            Arc::new(PostgresStaffReader::new(pool))
        }
        None => {
            let store = InMemoryStore::new();
            if config.features.load_fixtures {
                let context = default_fixtures()?
                    .load(
                        &Repositories::in_memory(&store),
                        config.features.fixture_group.as_deref(),
                    )
                    .await?;
                info!(references = context.len(), "fixtures loaded");
            }
            Arc::new(store)
        }
    };

    let app = app_router(reader)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
