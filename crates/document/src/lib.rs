pub mod pdf;
pub mod render;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("template error: {0}")]
    Template(String),
    #[error("conversion error: {0}")]
    Conversion(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub use pdf::{download_filename, is_wkhtmltopdf_available, DocumentArtifact, DocumentGenerator};
pub use render::{register_template_filters, QuotationRenderer, RenderedQuotation};
