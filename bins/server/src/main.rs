//! Payroll reconciliation and ledger server.

use std::sync::Arc;

use nomina_api::{AppState, create_router};
use nomina_core::payroll::EmployeeDirectory;
use nomina_db::{EmployeeRepository, connect};
use nomina_shared::AppConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nomina=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    let directory: Arc<dyn EmployeeDirectory> = Arc::new(EmployeeRepository::new(db));
    info!(
        exchange_rate = %config.ledger.default_exchange_rate,
        max_upload_bytes = config.ledger.max_upload_bytes,
        "Ledger defaults loaded"
    );

    let app = create_router(AppState::new(directory, config.ledger.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
