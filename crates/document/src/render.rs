//! Deterministic quotation document renderer.
//!
//! Pure presentation over an already-aggregated payload: no cost is ever
//! recomputed here, no timestamp or random value is embedded, so rendering
//! the same payload twice yields byte-identical output.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tera::{Context, Tera};

use tripquote_core::config::BrandingConfig;
use tripquote_core::{Conversion, DerivedCosts, FlightLegType, QuotationDraft};

use crate::DocumentError;

/// Standard template lists used when a draft carries no inclusions or
/// exclusions of its own. Drafts that do list them always win.
const DEFAULT_INCLUSIONS: &[&str] = &[
    "Accommodation as per itinerary",
    "Daily breakfast at the hotel",
    "All transfers on a private basis",
    "Sightseeing as per itinerary",
    "All applicable hotel taxes",
];

const DEFAULT_EXCLUSIONS: &[&str] = &[
    "GST and TCS as applicable",
    "Personal expenses such as tips, laundry and telephone calls",
    "Travel insurance",
    "Early check-in or late check-out",
    "Anything not mentioned under inclusions",
];

/// Register custom Tera filters used by the quotation template.
///
/// `money` renders an amount with two decimals, e.g. `amount | money`.
/// Amounts reach the template as decimal strings, so the filter accepts
/// string input as well as numbers. Parsing stays in `Decimal`: no
/// float round-trip, and a non-numeric amount fails the render instead
/// of printing a silent zero.
pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("money", tera_money_filter);
}

fn tera_money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = match value {
        tera::Value::String(s) => s.parse::<Decimal>(),
        tera::Value::Number(n) => n.to_string().parse::<Decimal>(),
        _ => return Err(tera::Error::msg("money filter expects a numeric amount")),
    }
    .map_err(|_| tera::Error::msg(format!("money filter could not parse amount `{value}`")))?;

    Ok(tera::Value::String(format!("{:.2}", amount.round_dp(2))))
}

/// Byte-stable rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedQuotation {
    pub html: String,
}

impl RenderedQuotation {
    pub fn into_bytes(self) -> Vec<u8> {
        self.html.into_bytes()
    }
}

#[derive(Serialize)]
struct LabelValue {
    label: String,
    value: String,
}

#[derive(Serialize)]
struct FlightLegView {
    label: &'static str,
    route: String,
    date: Option<String>,
    image_url: Option<String>,
}

#[derive(Serialize)]
struct AccommodationView {
    location: String,
    hotel: String,
    room_type: String,
    nights: u32,
    price_per_night: Decimal,
}

#[derive(Serialize)]
struct CostRows {
    land_cost_per_head: Decimal,
    flight_cost_per_head: Decimal,
    total_per_head: Decimal,
    total_group_cost: Decimal,
}

pub struct QuotationRenderer {
    tera: Tera,
    branding: BrandingConfig,
}

impl QuotationRenderer {
    pub fn new(branding: BrandingConfig) -> Result<Self, DocumentError> {
        let mut tera = Tera::default();
        register_template_filters(&mut tera);
        tera.add_raw_template(
            "quotation.html.tera",
            include_str!("templates/quotation.html.tera"),
        )
        .map_err(|e| DocumentError::Template(e.to_string()))?;

        Ok(Self { tera, branding })
    }

    /// Renders the fixed-section quotation document. Display amounts are
    /// recomputed from the base-currency figures through `conversion` on
    /// every render; nothing converted is cached.
    pub fn render(
        &self,
        draft: &QuotationDraft,
        costs: &DerivedCosts,
        conversion: &Conversion,
    ) -> Result<RenderedQuotation, DocumentError> {
        let context = self.build_context(draft, costs, conversion)?;
        let html = self
            .tera
            .render("quotation.html.tera", &context)
            .map_err(|e| DocumentError::Template(e.to_string()))?;

        Ok(RenderedQuotation { html })
    }

    fn build_context(
        &self,
        draft: &QuotationDraft,
        costs: &DerivedCosts,
        conversion: &Conversion,
    ) -> Result<Context, DocumentError> {
        let nights = costs.trip_duration_nights;
        let title = if draft.location.trim().is_empty() {
            format!("{} Nights / {} Days Tour Package", nights, nights + 1)
        } else {
            format!("{} — {} Nights / {} Days Tour Package", draft.location, nights, nights + 1)
        };

        let mut travel_rows = vec![LabelValue {
            label: "Group size".to_owned(),
            value: format!("{} traveller(s)", draft.travel.group_size),
        }];
        if let Some(date) = draft.travel.travel_date {
            travel_rows.insert(
                0,
                LabelValue {
                    label: "Travel date".to_owned(),
                    value: date.format("%d %b %Y").to_string(),
                },
            );
        }
        if let Some(meal_plan) = &draft.meal_plan {
            travel_rows.push(LabelValue {
                label: "Meal plan".to_owned(),
                value: meal_plan.plan.label().to_owned(),
            });
        }
        if let Some(vehicle) = &draft.travel.local_vehicle {
            travel_rows.push(LabelValue {
                label: "Local vehicle".to_owned(),
                value: vehicle.label().to_owned(),
            });
        }

        let flight_legs: Vec<FlightLegView> = draft
            .flight_legs
            .iter()
            .map(|leg| FlightLegView {
                label: match leg.leg_type {
                    FlightLegType::Onward => "Onward Flight",
                    FlightLegType::Return => "Return Flight",
                    FlightLegType::Intercity => "Intercity Flight",
                },
                route: leg.route.clone(),
                date: leg.date.map(|d| d.format("%d %b %Y").to_string()),
                image_url: leg.image_url.clone(),
            })
            .collect();

        let accommodations: Vec<AccommodationView> = draft
            .accommodations
            .iter()
            .map(|stay| AccommodationView {
                location: stay.location.clone(),
                hotel: stay.hotel_name.label().to_owned(),
                room_type: stay.room_type.clone(),
                nights: stay.nights,
                price_per_night: conversion.apply(stay.price_per_night),
            })
            .collect();

        let cost_rows = CostRows {
            land_cost_per_head: conversion.apply(costs.land_cost_per_head),
            flight_cost_per_head: conversion.apply(draft.flight_cost_per_person),
            total_per_head: conversion.apply(costs.total_per_head),
            total_group_cost: conversion.apply(costs.total_group_cost),
        };

        let inclusions: Vec<String> = if draft.inclusions.is_empty() {
            DEFAULT_INCLUSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            draft.inclusions.clone()
        };
        let exclusions: Vec<String> = if draft.exclusions.is_empty() {
            DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            draft.exclusions.clone()
        };

        let mut context = Context::new();
        context.insert("title", &title);
        context.insert("agency_name", &self.branding.agency_name);
        context.insert("contact_line", &self.branding.contact_line);
        context.insert("logo_url", &self.branding.logo_url);
        context.insert("location", &draft.location);
        context.insert("travel_rows", &travel_rows);
        context.insert("flight_images", &!flight_legs.is_empty());
        context.insert("flight_legs", &flight_legs);
        context.insert("itinerary", &draft.itinerary);
        context.insert("accommodations", &accommodations);
        context.insert("currency", &conversion.currency_code);
        context.insert("costs", &cost_rows);
        context.insert("group_size", &draft.travel.group_size);
        context.insert("inclusions", &inclusions);
        context.insert("exclusions", &exclusions);
        context.insert("notes", &draft.notes);

        Ok(context)
    }
}
