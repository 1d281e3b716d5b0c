use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{CountryId, CurrencyConversion};

/// Base currency every catalog price is denominated in.
pub const BASE_CURRENCY: &str = "INR";

/// Resolved display conversion for one country. Converted amounts are
/// display-only; the canonical value stays in base currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub rate: Decimal,
    pub currency_code: String,
}

impl Conversion {
    pub fn identity() -> Self {
        Self { rate: Decimal::ONE, currency_code: BASE_CURRENCY.to_owned() }
    }

    /// Converts a base-currency amount into the display currency. Callers
    /// must recompute from the base amount on every display, never cache the
    /// converted figure.
    pub fn apply(&self, base_amount: Decimal) -> Decimal {
        base_amount * self.rate
    }
}

/// Resolves the display conversion for a country. Absence of a country or of
/// a matching record is normal (the builder is usable before a country is
/// selected) and yields the identity conversion.
pub fn resolve_conversion(
    country_id: Option<&CountryId>,
    table: &[CurrencyConversion],
) -> Conversion {
    let Some(country_id) = country_id else {
        return Conversion::identity();
    };

    table
        .iter()
        .find(|record| &record.country_id == country_id)
        .map(|record| Conversion {
            rate: record.conversion_rate,
            currency_code: record.currency_code.clone(),
        })
        .unwrap_or_else(Conversion::identity)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{resolve_conversion, Conversion};
    use crate::domain::catalog::{CountryId, CurrencyConversion};

    fn table() -> Vec<CurrencyConversion> {
        vec![
            CurrencyConversion {
                country_id: CountryId("country-th".to_owned()),
                currency_code: "THB".to_owned(),
                conversion_rate: Decimal::new(42, 2),
            },
            CurrencyConversion {
                country_id: CountryId("country-ae".to_owned()),
                currency_code: "AED".to_owned(),
                conversion_rate: Decimal::new(44, 3),
            },
        ]
    }

    #[test]
    fn resolves_matching_country() {
        let conversion = resolve_conversion(Some(&CountryId("country-th".to_owned())), &table());
        assert_eq!(conversion.currency_code, "THB");
        assert_eq!(conversion.rate, Decimal::new(42, 2));
    }

    #[test]
    fn defaults_to_identity_when_country_absent() {
        let conversion = resolve_conversion(None, &table());
        assert_eq!(conversion, Conversion::identity());
    }

    #[test]
    fn defaults_to_identity_when_no_record_matches() {
        let conversion = resolve_conversion(Some(&CountryId("country-xx".to_owned())), &table());
        assert_eq!(conversion.currency_code, "INR");
        assert_eq!(conversion.rate, Decimal::ONE);
    }

    #[test]
    fn apply_scales_base_amount() {
        let conversion = resolve_conversion(Some(&CountryId("country-th".to_owned())), &table());
        assert_eq!(conversion.apply(Decimal::from(1000)), Decimal::new(420_00, 2));
    }
}
