use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::CountryId;

/// Session-scoped configuration handed to the quotation builder at
/// construction time. Replaces ambient cross-page "selected country" state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub selected_country_id: Option<CountryId>,
}

/// A field that either references a catalog record or carries free text the
/// employee typed in when the catalog had no fitting entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CatalogChoice {
    Selected(String),
    Custom(String),
}

impl CatalogChoice {
    pub fn label(&self) -> &str {
        match self {
            Self::Selected(id) => id,
            Self::Custom(text) => text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    Draft,
    Sent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightLegType {
    Onward,
    Return,
    Intercity,
}

/// Illustrative flight segment. Imagery only, never priced; the priced
/// figure is the draft-level `flight_cost_per_person`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    pub leg_type: FlightLegType,
    pub route: String,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationLineItem {
    pub location: String,
    pub hotel_name: CatalogChoice,
    pub room_type: String,
    pub nights: u32,
    pub price_per_night: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLineItem {
    pub transfer_type: String,
    pub vehicle_name: CatalogChoice,
    pub price: Decimal,
}

/// Bookable activity with adult/child ticket pricing.
///
/// `total_price` is stored, not derived on read: it is recomputed from the
/// current field values on every mutation, so after each edit the stored
/// total is canonical. Changing `quantity` rescales the already-combined
/// adult+child price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLineItem {
    pub name: String,
    pub transfer_note: String,
    pub adult_price: Decimal,
    pub child_price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal,
}

impl ActivityLineItem {
    pub fn new(
        name: impl Into<String>,
        transfer_note: impl Into<String>,
        adult_price: Decimal,
        child_price: Decimal,
        quantity: u32,
    ) -> Self {
        let mut item = Self {
            name: name.into(),
            transfer_note: transfer_note.into(),
            adult_price,
            child_price,
            quantity,
            total_price: Decimal::ZERO,
        };
        item.recompute_total();
        item
    }

    pub fn set_adult_price(&mut self, price: Decimal) {
        self.adult_price = price;
        self.recompute_total();
    }

    pub fn set_child_price(&mut self, price: Decimal) {
        self.child_price = price;
        self.recompute_total();
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_price = (self.adult_price + self.child_price) * Decimal::from(self.quantity);
    }
}

/// Narrative itinerary entry. No cost contribution; rendered in insertion
/// order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day_title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDetails {
    pub country_id: Option<CountryId>,
    pub airport_id: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub group_size: u32,
    /// Nights declared by the employee, reconciled against the accommodation
    /// entries by a non-blocking warning.
    pub declared_total_nights: u32,
    #[serde(default)]
    pub local_vehicle: Option<CatalogChoice>,
}

/// Aggregate root for one quotation-building session. Transient until
/// submitted; derived costs are never stored on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationDraft {
    #[serde(default)]
    pub quotation_no: Option<String>,
    pub client: ClientInfo,
    pub travel: TravelDetails,
    pub location: String,
    #[serde(default)]
    pub flight_cost_per_person: Decimal,
    #[serde(default)]
    pub flight_legs: Vec<FlightLeg>,
    #[serde(default)]
    pub accommodations: Vec<AccommodationLineItem>,
    #[serde(default)]
    pub transfers: Vec<TransferLineItem>,
    #[serde(default)]
    pub activities: Vec<ActivityLineItem>,
    #[serde(default)]
    pub meal_plan: Option<MealPlanSelection>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub notes: String,
    pub status: QuotationStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanSelection {
    pub plan: CatalogChoice,
    pub rate_per_person: Decimal,
}

impl QuotationDraft {
    /// Fresh draft for a new session. The selected country travels with the
    /// session context rather than ambient state.
    pub fn new(session: &SessionContext) -> Self {
        Self {
            quotation_no: None,
            client: ClientInfo::default(),
            travel: TravelDetails {
                country_id: session.selected_country_id.clone(),
                airport_id: None,
                travel_date: None,
                group_size: 1,
                declared_total_nights: 0,
                local_vehicle: None,
            },
            location: String::new(),
            flight_cost_per_person: Decimal::ZERO,
            flight_legs: Vec::new(),
            accommodations: Vec::new(),
            transfers: Vec::new(),
            activities: Vec::new(),
            meal_plan: None,
            itinerary: Vec::new(),
            inclusions: Vec::new(),
            exclusions: Vec::new(),
            notes: String::new(),
            status: QuotationStatus::Draft,
        }
    }

    /// Removing a line item drops its contribution from every aggregate the
    /// next time costs are derived; nothing else references it.
    pub fn remove_accommodation(&mut self, index: usize) {
        if index < self.accommodations.len() {
            self.accommodations.remove(index);
        }
    }

    pub fn remove_transfer(&mut self, index: usize) {
        if index < self.transfers.len() {
            self.transfers.remove(index);
        }
    }

    pub fn remove_activity(&mut self, index: usize) {
        if index < self.activities.len() {
            self.activities.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{ActivityLineItem, CatalogChoice, QuotationDraft, SessionContext};
    use crate::domain::catalog::CountryId;

    #[test]
    fn activity_total_recomputes_after_each_field_edit() {
        let mut item = ActivityLineItem::new(
            "Snorkeling",
            "shared speedboat",
            Decimal::from(100),
            Decimal::from(50),
            1,
        );
        assert_eq!(item.total_price, Decimal::from(150));

        item.set_adult_price(Decimal::from(120));
        assert_eq!(item.total_price, Decimal::from(170));

        item.set_quantity(3);
        assert_eq!(item.total_price, Decimal::from(510));
    }

    #[test]
    fn new_draft_carries_session_country() {
        let session =
            SessionContext { selected_country_id: Some(CountryId("country-th".to_owned())) };
        let draft = QuotationDraft::new(&session);
        assert_eq!(draft.travel.country_id, Some(CountryId("country-th".to_owned())));
        assert_eq!(draft.travel.group_size, 1);
    }

    #[test]
    fn removing_a_line_item_out_of_range_is_a_no_op() {
        let mut draft = QuotationDraft::new(&SessionContext::default());
        draft.remove_activity(3);
        assert!(draft.activities.is_empty());
    }

    #[test]
    fn catalog_choice_serializes_as_tagged_variant() {
        let selected = CatalogChoice::Selected("Sunset Resort".to_owned());
        let json = serde_json::to_value(&selected).expect("serialize choice");
        assert_eq!(json["kind"], "selected");
        assert_eq!(json["value"], "Sunset Resort");

        let custom: CatalogChoice =
            serde_json::from_value(serde_json::json!({ "kind": "custom", "value": "Villa 9" }))
                .expect("parse choice");
        assert_eq!(custom.label(), "Villa 9");
    }
}
