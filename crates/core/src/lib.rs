pub mod config;
pub mod costing;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod validation;

pub use costing::{aggregate, check_warnings, DerivedCosts, QuotationWarning};
pub use currency::{resolve_conversion, Conversion, BASE_CURRENCY};
pub use domain::catalog::{
    Activity, Airport, Country, CountryId, CurrencyConversion, Destination, Hotel, MealPlan,
    RateCard, Transfer,
};
pub use domain::quotation::{
    AccommodationLineItem, ActivityLineItem, CatalogChoice, ClientInfo, FlightLeg, FlightLegType,
    ItineraryDay, MealPlanSelection, QuotationDraft, QuotationStatus, SessionContext,
    TransferLineItem, TravelDetails,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use filter::{
    filter_by_country, hotel_locations, hotels_in_location, resolve_hotel_rate, ResolvedRate,
};
pub use validation::{validate, ValidationError};
