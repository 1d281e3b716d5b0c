//! Narrows the admin-managed catalogs to the subset relevant to the
//! selected country, and resolves a chosen hotel's canonical nightly rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Activity, CountryId, Hotel, MealPlan, Transfer};

/// Anything associated with a country can be filtered the same way.
pub trait CountryScoped {
    fn country_id(&self) -> &CountryId;
}

impl CountryScoped for Transfer {
    fn country_id(&self) -> &CountryId {
        &self.country_id
    }
}

impl CountryScoped for Activity {
    fn country_id(&self) -> &CountryId {
        &self.country_id
    }
}

impl CountryScoped for MealPlan {
    fn country_id(&self) -> &CountryId {
        &self.country_id
    }
}

impl CountryScoped for Hotel {
    fn country_id(&self) -> &CountryId {
        &self.country_id
    }
}

/// Returns the catalog subset for `country_id`. An unset country yields an
/// empty list, which the caller surfaces as "select a location first" rather
/// than an error.
pub fn filter_by_country<'a, T: CountryScoped>(
    catalog: &'a [T],
    country_id: Option<&CountryId>,
) -> Vec<&'a T> {
    let Some(country_id) = country_id else {
        return Vec::new();
    };
    catalog.iter().filter(|item| item.country_id() == country_id).collect()
}

/// Distinct administrative-region strings for the hotels of one country, in
/// first-seen order. Populates the location dropdown of the accommodation
/// form.
pub fn hotel_locations(hotels: &[Hotel], country_id: Option<&CountryId>) -> Vec<String> {
    let mut locations: Vec<String> = Vec::new();
    for hotel in filter_by_country(hotels, country_id) {
        if !locations.iter().any(|known| known == &hotel.state) {
            locations.push(hotel.state.clone());
        }
    }
    locations
}

/// Hotels within one administrative region, the second stage of the
/// two-stage hotel narrowing.
pub fn hotels_in_location<'a>(
    hotels: &'a [Hotel],
    country_id: Option<&CountryId>,
    state: &str,
) -> Vec<&'a Hotel> {
    filter_by_country(hotels, country_id)
        .into_iter()
        .filter(|hotel| hotel.state == state)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    pub price_per_night: Decimal,
    pub room_type: String,
}

impl Default for ResolvedRate {
    fn default() -> Self {
        Self { price_per_night: Decimal::ZERO, room_type: String::new() }
    }
}

/// Resolves the canonical nightly rate of the hotel named `hotel_name`
/// inside `state`. Rate-card pricing wins over the flat base price, with the
/// first rate-card entry as the default room; a hotel with only a base price
/// resolves to the "Standard" room type; a hotel with neither resolves to a
/// zero rate and empty room type so the employee can fill it in manually.
pub fn resolve_hotel_rate(
    hotels: &[Hotel],
    country_id: Option<&CountryId>,
    state: &str,
    hotel_name: &str,
) -> ResolvedRate {
    let Some(hotel) = hotels_in_location(hotels, country_id, state)
        .into_iter()
        .find(|hotel| hotel.name == hotel_name)
    else {
        return ResolvedRate::default();
    };

    if let Some(card) = hotel.rate_cards.first() {
        return ResolvedRate { price_per_night: card.rate, room_type: card.room_type.clone() };
    }

    match hotel.base_price_per_night {
        Some(base) => ResolvedRate { price_per_night: base, room_type: "Standard".to_owned() },
        None => ResolvedRate::default(),
    }
}
