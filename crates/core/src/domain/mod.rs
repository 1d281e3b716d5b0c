pub mod catalog;
pub mod quotation;
