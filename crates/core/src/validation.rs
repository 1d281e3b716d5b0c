//! Local, blocking submission checks. Failures never leave the client: a
//! draft with validation errors is not sent to the persistence collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quotation::QuotationDraft;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    MissingClientName,
    MissingTravelDate,
    NonPositiveGroupSize,
    NegativeMoney { field: String },
    ZeroNights { index: usize },
    ZeroQuantity { activity: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingClientName => write!(f, "client name is required"),
            Self::MissingTravelDate => write!(f, "travel date is required"),
            Self::NonPositiveGroupSize => write!(f, "group size must be at least 1"),
            Self::NegativeMoney { field } => write!(f, "{field} must not be negative"),
            Self::ZeroNights { index } => {
                write!(f, "accommodation entry {} must have at least one night", index + 1)
            }
            Self::ZeroQuantity { activity } => {
                write!(f, "activity `{activity}` must have a quantity of at least 1")
            }
        }
    }
}

/// Validates a draft for submission. Collects every failure instead of
/// stopping at the first, so the builder can annotate each offending field.
pub fn validate(draft: &QuotationDraft) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if draft.client.name.trim().is_empty() {
        errors.push(ValidationError::MissingClientName);
    }
    if draft.travel.travel_date.is_none() {
        errors.push(ValidationError::MissingTravelDate);
    }
    if draft.travel.group_size == 0 {
        errors.push(ValidationError::NonPositiveGroupSize);
    }
    if draft.flight_cost_per_person < Decimal::ZERO {
        errors.push(ValidationError::NegativeMoney { field: "flight cost per person".to_owned() });
    }

    for (index, stay) in draft.accommodations.iter().enumerate() {
        if stay.nights == 0 {
            errors.push(ValidationError::ZeroNights { index });
        }
        if stay.price_per_night < Decimal::ZERO {
            errors.push(ValidationError::NegativeMoney {
                field: format!("accommodation entry {} price per night", index + 1),
            });
        }
    }

    for transfer in &draft.transfers {
        if transfer.price < Decimal::ZERO {
            errors.push(ValidationError::NegativeMoney {
                field: format!("transfer `{}` price", transfer.transfer_type),
            });
        }
    }

    for activity in &draft.activities {
        if activity.quantity == 0 {
            errors.push(ValidationError::ZeroQuantity { activity: activity.name.clone() });
        }
        if activity.adult_price < Decimal::ZERO || activity.child_price < Decimal::ZERO {
            errors.push(ValidationError::NegativeMoney {
                field: format!("activity `{}` ticket price", activity.name),
            });
        }
    }

    if let Some(selection) = &draft.meal_plan {
        if selection.rate_per_person < Decimal::ZERO {
            errors
                .push(ValidationError::NegativeMoney { field: "meal plan rate".to_owned() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{validate, ValidationError};
    use crate::domain::quotation::{ActivityLineItem, QuotationDraft, SessionContext};

    fn valid_draft() -> QuotationDraft {
        let mut draft = QuotationDraft::new(&SessionContext::default());
        draft.client.name = "A. Traveller".to_owned();
        draft.travel.travel_date = NaiveDate::from_ymd_opt(2026, 11, 20);
        draft
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate(&valid_draft()).is_ok());
    }

    #[test]
    fn missing_required_fields_are_all_collected() {
        let draft = QuotationDraft::new(&SessionContext::default());
        let errors = validate(&draft).expect_err("empty draft must fail");
        assert!(errors.contains(&ValidationError::MissingClientName));
        assert!(errors.contains(&ValidationError::MissingTravelDate));
    }

    #[test]
    fn negative_money_is_rejected() {
        let mut draft = valid_draft();
        draft.flight_cost_per_person = Decimal::from(-1);
        let errors = validate(&draft).expect_err("negative flight cost must fail");
        assert!(errors.iter().any(|e| matches!(e, ValidationError::NegativeMoney { .. })));
    }

    #[test]
    fn zero_quantity_activity_is_rejected() {
        let mut draft = valid_draft();
        let mut activity =
            ActivityLineItem::new("City tour", "", Decimal::from(100), Decimal::ZERO, 1);
        activity.set_quantity(0);
        draft.activities.push(activity);

        let errors = validate(&draft).expect_err("zero quantity must fail");
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ZeroQuantity { activity } if activity == "City tour")));
    }
}
