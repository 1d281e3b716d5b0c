//! JSON shapes the external admin-catalog collaborators expose. Kept apart
//! from the domain types so the wire casing never leaks inward.

use rust_decimal::Decimal;
use serde::Deserialize;

use tripquote_core::{
    Activity, Airport, Country, CountryId, CurrencyConversion, Destination, Hotel, MealPlan,
    RateCard, Transfer,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCountry {
    pub id: String,
    pub name: String,
}

impl From<WireCountry> for Country {
    fn from(wire: WireCountry) -> Self {
        Self { id: CountryId(wire.id), name: wire.name }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDestination {
    pub id: String,
    pub name: String,
    pub state: String,
    pub country_id: String,
}

impl From<WireDestination> for Destination {
    fn from(wire: WireDestination) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            state: wire.state,
            country_id: CountryId(wire.country_id),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAirport {
    pub id: String,
    pub name: String,
    pub code: String,
    pub country_id: String,
}

impl From<WireAirport> for Airport {
    fn from(wire: WireAirport) -> Self {
        Self { id: wire.id, name: wire.name, code: wire.code, country_id: CountryId(wire.country_id) }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCurrencyConversion {
    pub country_id: String,
    pub currency_code: String,
    pub conversion_rate: Decimal,
}

impl From<WireCurrencyConversion> for CurrencyConversion {
    fn from(wire: WireCurrencyConversion) -> Self {
        Self {
            country_id: CountryId(wire.country_id),
            currency_code: wire.currency_code,
            conversion_rate: wire.conversion_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRateCard {
    pub room_type: String,
    pub rate: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireHotel {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub state: String,
    pub country_id: String,
    #[serde(default)]
    pub rate_cards: Vec<WireRateCard>,
    #[serde(default)]
    pub base_price_per_night: Option<Decimal>,
}

impl From<WireHotel> for Hotel {
    fn from(wire: WireHotel) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            destination: wire.destination,
            state: wire.state,
            country_id: CountryId(wire.country_id),
            rate_cards: wire
                .rate_cards
                .into_iter()
                .map(|card| RateCard { room_type: card.room_type, rate: card.rate })
                .collect(),
            base_price_per_night: wire.base_price_per_night,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransfer {
    pub id: String,
    #[serde(rename = "type")]
    pub transfer_type: String,
    pub vehicle_name: String,
    pub country_id: String,
    #[serde(rename = "priceInINR")]
    pub price_in_inr: Decimal,
}

impl From<WireTransfer> for Transfer {
    fn from(wire: WireTransfer) -> Self {
        Self {
            id: wire.id,
            transfer_type: wire.transfer_type,
            vehicle_name: wire.vehicle_name,
            country_id: CountryId(wire.country_id),
            price_inr: wire.price_in_inr,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireActivity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub transfer: String,
    pub country_id: String,
    pub ticket_price_adult: Decimal,
    pub ticket_price_child: Decimal,
}

impl From<WireActivity> for Activity {
    fn from(wire: WireActivity) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            transfer: wire.transfer,
            country_id: CountryId(wire.country_id),
            ticket_price_adult: wire.ticket_price_adult,
            ticket_price_child: wire.ticket_price_child,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMealPlan {
    pub id: String,
    pub name: String,
    pub country_id: String,
    pub rate_per_person: Decimal,
}

impl From<WireMealPlan> for MealPlan {
    fn from(wire: WireMealPlan) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            country_id: CountryId(wire.country_id),
            rate_per_person: wire.rate_per_person,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{WireHotel, WireTransfer};
    use tripquote_core::{Hotel, Transfer};

    #[test]
    fn hotel_deserializes_with_optional_pricing_fields() {
        let json = r#"{
            "id": "hotel-1",
            "name": "Sea View Resort",
            "destination": "Patong",
            "state": "Phuket",
            "countryId": "country-th",
            "rateCards": [{"roomType": "Deluxe", "rate": 4500}]
        }"#;
        let hotel: Hotel = serde_json::from_str::<WireHotel>(json).expect("parse hotel").into();
        assert_eq!(hotel.rate_cards[0].room_type, "Deluxe");
        assert_eq!(hotel.base_price_per_night, None);
    }

    #[test]
    fn transfer_maps_type_and_inr_price_fields() {
        let json = r#"{
            "id": "transfer-1",
            "type": "Airport pickup",
            "vehicleName": "Toyota Commuter",
            "countryId": "country-th",
            "priceInINR": 1200
        }"#;
        let transfer: Transfer =
            serde_json::from_str::<WireTransfer>(json).expect("parse transfer").into();
        assert_eq!(transfer.transfer_type, "Airport pickup");
        assert_eq!(transfer.price_inr, Decimal::from(1200));
    }
}
