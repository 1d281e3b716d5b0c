mod health;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing::info;

use tripquote_catalog::{CatalogSource, RestCatalogClient};
use tripquote_core::config::{AppConfig, LoadOptions};
use tripquote_document::{is_wkhtmltopdf_available, DocumentGenerator};

fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use tripquote_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations.
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let catalog_client = Arc::new(RestCatalogClient::new(
        config.catalog_api.base_url.clone(),
        config.catalog_api.timeout_secs,
    )?);

    // All catalogs load before the quotation surface accepts requests; one
    // failed fetch aborts startup instead of serving partial catalogs.
    let snapshot = catalog_client.fetch_all().await?;
    let catalog_count = snapshot.hotels.len()
        + snapshot.transfers.len()
        + snapshot.activities.len()
        + snapshot.meal_plans.len();

    let generator = DocumentGenerator::new(config.branding.clone())?;

    let state = routes::QuotationState {
        generator: Arc::new(generator),
        catalog: catalog_client.clone() as Arc<dyn CatalogSource>,
        conversions: Arc::new(snapshot.conversions.clone()),
    };

    let app = Router::new()
        .merge(routes::router(state))
        .merge(health::router(health::HealthState {
            catalog_count,
            pdf_available: is_wkhtmltopdf_available(),
        }));

    let address = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        bind_address = %address,
        catalog_records = catalog_count,
        "tripquote-server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(config.server.graceful_shutdown_secs))
        .await?;

    info!("tripquote-server stopping");
    Ok(())
}

async fn wait_for_shutdown(drain_secs: u64) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to install shutdown signal handler");
        return;
    }
    info!(drain_secs, "shutdown signal received, draining open connections");
}
