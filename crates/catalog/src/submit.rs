//! Flattened quotation payload written to the quotation-creation endpoint.
//! Catalog record identifiers are stripped so the persisted quotation stands
//! on its own even if the catalogs are later edited.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use tripquote_core::{DerivedCosts, FlightLegType, QuotationDraft, QuotationStatus};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSubmission {
    pub quotation_no: Option<String>,
    pub status: QuotationStatus,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub location: String,
    pub travel_date: Option<NaiveDate>,
    pub group_size: u32,
    pub flight_cost_per_person: Decimal,
    pub flight_legs: Vec<SubmittedFlightLeg>,
    pub accommodations: Vec<SubmittedAccommodation>,
    pub transfers: Vec<SubmittedTransfer>,
    pub activities: Vec<SubmittedActivity>,
    pub meal_plan: Option<SubmittedMealPlan>,
    pub itinerary: Vec<SubmittedItineraryDay>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub notes: String,
    pub total_nights: u32,
    pub land_cost_per_head: Decimal,
    pub total_per_head: Decimal,
    pub total_group_cost: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedFlightLeg {
    pub leg_type: FlightLegType,
    pub route: String,
    pub date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAccommodation {
    pub location: String,
    pub hotel_name: String,
    pub room_type: String,
    pub nights: u32,
    pub price_per_night: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedTransfer {
    #[serde(rename = "type")]
    pub transfer_type: String,
    pub vehicle_name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedActivity {
    pub name: String,
    pub transfer_note: String,
    pub adult_price: Decimal,
    pub child_price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedMealPlan {
    pub plan: String,
    pub rate_per_person: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedItineraryDay {
    pub day_title: String,
    pub description: String,
}

impl QuotationSubmission {
    pub fn from_draft(
        draft: &QuotationDraft,
        costs: &DerivedCosts,
        status: QuotationStatus,
    ) -> Self {
        Self {
            quotation_no: draft.quotation_no.clone(),
            status,
            client_name: draft.client.name.clone(),
            client_email: draft.client.email.clone(),
            client_phone: draft.client.phone.clone(),
            location: draft.location.clone(),
            travel_date: draft.travel.travel_date,
            group_size: draft.travel.group_size,
            flight_cost_per_person: draft.flight_cost_per_person,
            flight_legs: draft
                .flight_legs
                .iter()
                .map(|leg| SubmittedFlightLeg {
                    leg_type: leg.leg_type,
                    route: leg.route.clone(),
                    date: leg.date,
                    image_url: leg.image_url.clone(),
                })
                .collect(),
            accommodations: draft
                .accommodations
                .iter()
                .map(|stay| SubmittedAccommodation {
                    location: stay.location.clone(),
                    hotel_name: stay.hotel_name.label().to_owned(),
                    room_type: stay.room_type.clone(),
                    nights: stay.nights,
                    price_per_night: stay.price_per_night,
                })
                .collect(),
            transfers: draft
                .transfers
                .iter()
                .map(|transfer| SubmittedTransfer {
                    transfer_type: transfer.transfer_type.clone(),
                    vehicle_name: transfer.vehicle_name.label().to_owned(),
                    price: transfer.price,
                })
                .collect(),
            activities: draft
                .activities
                .iter()
                .map(|activity| SubmittedActivity {
                    name: activity.name.clone(),
                    transfer_note: activity.transfer_note.clone(),
                    adult_price: activity.adult_price,
                    child_price: activity.child_price,
                    quantity: activity.quantity,
                    total_price: activity.total_price,
                })
                .collect(),
            meal_plan: draft.meal_plan.as_ref().map(|selection| SubmittedMealPlan {
                plan: selection.plan.label().to_owned(),
                rate_per_person: selection.rate_per_person,
            }),
            itinerary: draft
                .itinerary
                .iter()
                .map(|day| SubmittedItineraryDay {
                    day_title: day.day_title.clone(),
                    description: day.description.clone(),
                })
                .collect(),
            inclusions: draft.inclusions.clone(),
            exclusions: draft.exclusions.clone(),
            notes: draft.notes.clone(),
            total_nights: costs.total_nights,
            land_cost_per_head: costs.land_cost_per_head,
            total_per_head: costs.total_per_head,
            total_group_cost: costs.total_group_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::QuotationSubmission;
    use tripquote_core::{
        aggregate, AccommodationLineItem, CatalogChoice, QuotationDraft, QuotationStatus,
        SessionContext,
    };

    #[test]
    fn submission_flattens_catalog_choices_and_carries_status() {
        let mut draft = QuotationDraft::new(&SessionContext::default());
        draft.travel.group_size = 2;
        draft.accommodations.push(AccommodationLineItem {
            location: "Phuket".to_owned(),
            hotel_name: CatalogChoice::Custom("Beach hut".to_owned()),
            room_type: "Standard".to_owned(),
            nights: 2,
            price_per_night: Decimal::from(900),
        });

        let costs = aggregate(&draft);
        let submission = QuotationSubmission::from_draft(&draft, &costs, QuotationStatus::Sent);

        let json = serde_json::to_value(&submission).expect("serializes");
        assert_eq!(json["status"], "SENT");
        assert_eq!(json["accommodations"][0]["hotelName"], "Beach hut");
        assert_eq!(json["totalNights"], 2);
        // The tagged catalog-choice variant never reaches the wire.
        assert!(json["accommodations"][0]["hotelName"].is_string());
    }
}
