pub mod client;
pub mod submit;
pub mod wire;

pub use client::{CatalogError, CatalogSnapshot, CatalogSource, RestCatalogClient};
pub use submit::QuotationSubmission;
