use serde::Serialize;

use tripquote_catalog::{CatalogSource, RestCatalogClient};
use tripquote_core::config::{AppConfig, LoadOptions};

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CatalogReport {
    command: &'static str,
    status: &'static str,
    base_url: String,
    hotels: usize,
    transfers: usize,
    activities: usize,
    meal_plans: usize,
    destinations: usize,
    countries: usize,
    airports: usize,
    currency_conversions: usize,
}

/// Readiness check for the quotation builder: every catalog must fetch
/// before a session can start.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("catalogs", "config", error.to_string(), 1),
    };

    let client = match RestCatalogClient::new(
        config.catalog_api.base_url.clone(),
        config.catalog_api.timeout_secs,
    ) {
        Ok(client) => client,
        Err(error) => return CommandResult::failure("catalogs", "client", error.to_string(), 1),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("catalogs", "runtime", error.to_string(), 1),
    };

    let snapshot = match runtime.block_on(client.fetch_all()) {
        Ok(snapshot) => snapshot,
        Err(error) => return CommandResult::failure("catalogs", "fetch", error.to_string(), 1),
    };

    let report = CatalogReport {
        command: "catalogs",
        status: "ok",
        base_url: config.catalog_api.base_url,
        hotels: snapshot.hotels.len(),
        transfers: snapshot.transfers.len(),
        activities: snapshot.activities.len(),
        meal_plans: snapshot.meal_plans.len(),
        destinations: snapshot.destinations.len(),
        countries: snapshot.countries.len(),
        airports: snapshot.airports.len(),
        currency_conversions: snapshot.conversions.len(),
    };

    match serde_json::to_string_pretty(&report) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure("catalogs", "serialization", error.to_string(), 1),
    }
}
