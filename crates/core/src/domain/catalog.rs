use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub state: String,
    pub country_id: CountryId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub code: String,
    pub country_id: CountryId,
}

/// Conversion rate from the base currency (INR) into a country's display
/// currency, expressed as target units per 1 base unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub country_id: CountryId,
    pub currency_code: String,
    pub conversion_rate: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    pub room_type: String,
    pub rate: Decimal,
}

/// A hotel may price through room-type rate cards, a flat base price, or
/// neither (price entered manually during quotation assembly).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub state: String,
    pub country_id: CountryId,
    #[serde(default)]
    pub rate_cards: Vec<RateCard>,
    #[serde(default)]
    pub base_price_per_night: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub transfer_type: String,
    pub vehicle_name: String,
    pub country_id: CountryId,
    pub price_inr: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    /// Free-text note describing transfer arrangements bundled with the
    /// activity (for example "shared coach from pier").
    #[serde(default)]
    pub transfer: String,
    pub country_id: CountryId,
    pub ticket_price_adult: Decimal,
    pub ticket_price_child: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub name: String,
    pub country_id: CountryId,
    pub rate_per_person: Decimal,
}
