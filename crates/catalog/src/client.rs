//! REST client for the external catalog and quotation-persistence
//! collaborators. Fetches run concurrently at builder mount; a failure in
//! any one of them fails the whole snapshot so the builder never starts
//! from partially populated catalogs.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use tripquote_core::{
    Activity, Airport, Country, CurrencyConversion, Destination, Hotel, MealPlan, Transfer,
};

use crate::submit::QuotationSubmission;
use crate::wire::{
    WireActivity, WireAirport, WireCountry, WireCurrencyConversion, WireDestination, WireHotel,
    WireMealPlan, WireTransfer,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch {catalog} catalog: {source}")]
    Fetch {
        catalog: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{catalog} catalog responded with status {status}")]
    FetchStatus { catalog: &'static str, status: reqwest::StatusCode },
    #[error("quotation submission failed: {0}")]
    Submission(#[source] reqwest::Error),
    #[error("quotation submission rejected with status {0}")]
    SubmissionStatus(reqwest::StatusCode),
    #[error("catalog client could not be constructed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("catalog collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Every catalog the quotation builder needs, fetched as one unit.
#[derive(Clone, Debug, Default)]
pub struct CatalogSnapshot {
    pub hotels: Vec<Hotel>,
    pub transfers: Vec<Transfer>,
    pub activities: Vec<Activity>,
    pub meal_plans: Vec<MealPlan>,
    pub destinations: Vec<Destination>,
    pub countries: Vec<Country>,
    pub airports: Vec<Airport>,
    pub conversions: Vec<CurrencyConversion>,
}

/// Read-only catalog collaborator plus the single quotation write. The
/// trait seam keeps the builder and server testable without HTTP.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_all(&self) -> Result<CatalogSnapshot, CatalogError>;
    async fn submit_quotation(&self, submission: &QuotationSubmission)
        -> Result<(), CatalogError>;
}

pub struct RestCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(CatalogError::Client)?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { client, base_url })
    }

    async fn fetch<W: DeserializeOwned>(
        &self,
        path: &str,
        catalog: &'static str,
    ) -> Result<Vec<W>, CatalogError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| CatalogError::Fetch { catalog, source })?;

        if !response.status().is_success() {
            return Err(CatalogError::FetchStatus { catalog, status: response.status() });
        }

        response.json().await.map_err(|source| CatalogError::Fetch { catalog, source })
    }
}

#[async_trait]
impl CatalogSource for RestCatalogClient {
    async fn fetch_all(&self) -> Result<CatalogSnapshot, CatalogError> {
        // All eight catalogs populate independent dropdowns; order among
        // them does not matter, so they are fetched concurrently and the
        // first failure wins.
        let (hotels, transfers, activities, meal_plans, destinations, countries, airports, conversions) =
            tokio::try_join!(
                self.fetch::<WireHotel>("hotels", "hotels"),
                self.fetch::<WireTransfer>("transfers", "transfers"),
                self.fetch::<WireActivity>("activities", "activities"),
                self.fetch::<WireMealPlan>("meal-plans", "meal plans"),
                self.fetch::<WireDestination>("destinations", "destinations"),
                self.fetch::<WireCountry>("countries", "countries"),
                self.fetch::<WireAirport>("airports", "airports"),
                self.fetch::<WireCurrencyConversion>("currency-conversions", "currency conversions"),
            )?;

        let snapshot = CatalogSnapshot {
            hotels: hotels.into_iter().map(Into::into).collect(),
            transfers: transfers.into_iter().map(Into::into).collect(),
            activities: activities.into_iter().map(Into::into).collect(),
            meal_plans: meal_plans.into_iter().map(Into::into).collect(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            countries: countries.into_iter().map(Into::into).collect(),
            airports: airports.into_iter().map(Into::into).collect(),
            conversions: conversions.into_iter().map(Into::into).collect(),
        };

        info!(
            hotels = snapshot.hotels.len(),
            transfers = snapshot.transfers.len(),
            activities = snapshot.activities.len(),
            meal_plans = snapshot.meal_plans.len(),
            "catalog snapshot fetched"
        );

        Ok(snapshot)
    }

    /// Fire-and-forget write of the finalized quotation. No retry: a
    /// failure is surfaced and the draft stays intact for resubmission.
    async fn submit_quotation(
        &self,
        submission: &QuotationSubmission,
    ) -> Result<(), CatalogError> {
        let url = format!("{}/quotations", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(CatalogError::Submission)?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "quotation submission rejected");
            return Err(CatalogError::SubmissionStatus(response.status()));
        }

        info!(status = ?submission.status, "quotation submitted");
        Ok(())
    }
}
