//! Line-item cost model and quotation aggregator.
//!
//! All monetary outputs are base-currency (INR) figures; display-currency
//! equivalents are recomputed on demand through [`crate::currency`] and are
//! never stored as the canonical value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quotation::QuotationDraft;

/// Every derived figure of one quotation. Always recomputed from the draft
/// by [`aggregate`], never mutated independently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedCosts {
    pub total_nights: u32,
    /// Trip-duration anchor for the document title, computed once here so
    /// the renderer never reaches into the accommodation array.
    pub trip_duration_nights: u32,
    pub total_accommodation_cost: Decimal,
    pub total_transfer_cost: Decimal,
    pub meal_plan_cost: Decimal,
    pub total_activities_cost: Decimal,
    pub activities_cost_per_person: Decimal,
    pub accommodation_and_transfer_cost_per_person: Decimal,
    pub land_cost_per_head: Decimal,
    pub total_per_head: Decimal,
    pub total_group_cost: Decimal,
}

/// Business-rule mismatches surfaced to the employee. Never blocking:
/// the system trusts the user's judgment over auto-correction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuotationWarning {
    NightsMismatch { declared: u32, accommodated: u32 },
    ChildPriceForSoloTraveler { activity: String },
}

fn per_person(total: Decimal, group_size: u32) -> Decimal {
    if group_size == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(group_size)
}

/// Combines every line-item category into the per-head and group totals.
/// Pure and cheap enough to re-run on every field mutation.
pub fn aggregate(draft: &QuotationDraft) -> DerivedCosts {
    let group_size = draft.travel.group_size;

    let total_nights: u32 = draft.accommodations.iter().map(|acc| acc.nights).sum();
    let total_accommodation_cost: Decimal = draft
        .accommodations
        .iter()
        .map(|acc| acc.price_per_night * Decimal::from(acc.nights))
        .sum();
    let total_transfer_cost: Decimal = draft.transfers.iter().map(|t| t.price).sum();
    let meal_plan_cost = draft
        .meal_plan
        .as_ref()
        .map(|selection| selection.rate_per_person)
        .unwrap_or(Decimal::ZERO);
    let total_activities_cost: Decimal = draft.activities.iter().map(|a| a.total_price).sum();

    let activities_cost_per_person = per_person(total_activities_cost, group_size);
    let accommodation_and_transfer_cost_per_person =
        per_person(total_accommodation_cost + total_transfer_cost, group_size);

    let land_cost_per_head =
        meal_plan_cost + accommodation_and_transfer_cost_per_person + activities_cost_per_person;
    let total_per_head = land_cost_per_head + draft.flight_cost_per_person;
    let total_group_cost = total_per_head * Decimal::from(group_size);

    DerivedCosts {
        total_nights,
        trip_duration_nights: total_nights,
        total_accommodation_cost,
        total_transfer_cost,
        meal_plan_cost,
        total_activities_cost,
        activities_cost_per_person,
        accommodation_and_transfer_cost_per_person,
        land_cost_per_head,
        total_per_head,
        total_group_cost,
    }
}

/// Non-blocking reconciliation checks. A mismatch is informational only;
/// neither source overrides the other.
pub fn check_warnings(draft: &QuotationDraft) -> Vec<QuotationWarning> {
    let mut warnings = Vec::new();

    let accommodated: u32 = draft.accommodations.iter().map(|acc| acc.nights).sum();
    if draft.travel.declared_total_nights != accommodated {
        warnings.push(QuotationWarning::NightsMismatch {
            declared: draft.travel.declared_total_nights,
            accommodated,
        });
    }

    if draft.travel.group_size == 1 {
        for activity in &draft.activities {
            if activity.child_price > Decimal::ZERO {
                warnings.push(QuotationWarning::ChildPriceForSoloTraveler {
                    activity: activity.name.clone(),
                });
            }
        }
    }

    warnings
}
