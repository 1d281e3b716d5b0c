//! PDF conversion for rendered quotations via wkhtmltopdf, falling back to
//! the HTML artifact when the tool is not installed.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{error, info, warn};

use tripquote_core::config::BrandingConfig;
use tripquote_core::{Conversion, DerivedCosts, QuotationDraft};

use crate::render::{QuotationRenderer, RenderedQuotation};
use crate::DocumentError;

/// Final document artifact handed to the preview or download surface.
pub enum DocumentArtifact {
    Pdf(Vec<u8>),
    Html(String),
}

impl DocumentArtifact {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf(_) => "application/pdf",
            Self::Html(_) => "text/html; charset=utf-8",
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Pdf(bytes) => bytes,
            Self::Html(html) => html.into_bytes(),
        }
    }
}

/// Download file name for a quotation document.
pub fn download_filename(quotation_no: Option<&str>) -> String {
    format!("Quotation-{}.pdf", quotation_no.unwrap_or("draft"))
}

pub struct DocumentGenerator {
    renderer: QuotationRenderer,
    wkhtmltopdf_path: Option<String>,
}

impl DocumentGenerator {
    pub fn new(branding: BrandingConfig) -> Result<Self, DocumentError> {
        let renderer = QuotationRenderer::new(branding)?;

        let wkhtmltopdf_path =
            which::which("wkhtmltopdf").ok().map(|p| p.to_string_lossy().to_string());
        match &wkhtmltopdf_path {
            Some(path) => info!(path = %path, "wkhtmltopdf found"),
            None => {
                warn!("wkhtmltopdf not found in PATH - documents will be delivered as HTML")
            }
        }

        Ok(Self { renderer, wkhtmltopdf_path })
    }

    /// Forces HTML delivery regardless of wkhtmltopdf availability.
    pub fn without_pdf_conversion(mut self) -> Self {
        self.wkhtmltopdf_path = None;
        self
    }

    pub fn renderer(&self) -> &QuotationRenderer {
        &self.renderer
    }

    /// Renders the quotation and, when wkhtmltopdf is available, converts it
    /// to PDF. Conversion failures fall back to the HTML artifact rather
    /// than failing the preview.
    pub async fn generate(
        &self,
        draft: &QuotationDraft,
        costs: &DerivedCosts,
        conversion: &Conversion,
    ) -> Result<DocumentArtifact, DocumentError> {
        let rendered = self.renderer.render(draft, costs, conversion)?;

        if let Some(wkhtmltopdf) = &self.wkhtmltopdf_path {
            match convert_html_to_pdf(&rendered, wkhtmltopdf).await {
                Ok(pdf_bytes) => return Ok(DocumentArtifact::Pdf(pdf_bytes)),
                Err(e) => {
                    warn!(error = %e, "PDF conversion failed, falling back to HTML");
                }
            }
        }

        Ok(DocumentArtifact::Html(rendered.html))
    }
}

async fn convert_html_to_pdf(
    rendered: &RenderedQuotation,
    wkhtmltopdf_path: &str,
) -> Result<Vec<u8>, DocumentError> {
    let temp_dir = std::env::temp_dir();
    let html_path = temp_dir.join(format!("quotation_{}.html", uuid::Uuid::new_v4()));
    let pdf_path = temp_dir.join(format!("quotation_{}.pdf", uuid::Uuid::new_v4()));

    tokio::fs::write(&html_path, &rendered.html).await?;

    let output = Command::new(wkhtmltopdf_path)
        .arg("--page-size")
        .arg("A4")
        .arg("--margin-top")
        .arg("10mm")
        .arg("--margin-bottom")
        .arg("10mm")
        .arg("--margin-left")
        .arg("10mm")
        .arg("--margin-right")
        .arg("10mm")
        .arg("--encoding")
        .arg("utf-8")
        .arg("--enable-local-file-access")
        .arg(&html_path)
        .arg(&pdf_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(stderr = %stderr, "wkhtmltopdf failed");
        return Err(DocumentError::Conversion(stderr.to_string()));
    }

    let pdf_bytes = tokio::fs::read(&pdf_path).await?;

    let _ = tokio::fs::remove_file(&html_path).await;
    let _ = tokio::fs::remove_file(&pdf_path).await;

    info!(size = pdf_bytes.len(), "PDF generated");

    Ok(pdf_bytes)
}

/// Check if wkhtmltopdf is available.
pub fn is_wkhtmltopdf_available() -> bool {
    which::which("wkhtmltopdf").is_ok()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{download_filename, DocumentArtifact, DocumentGenerator};
    use tripquote_core::config::BrandingConfig;
    use tripquote_core::{aggregate, Conversion, QuotationDraft, SessionContext};

    fn branding() -> BrandingConfig {
        BrandingConfig {
            agency_name: "Sunset Tours".to_owned(),
            contact_line: "hello@sunset.example".to_owned(),
            logo_url: None,
        }
    }

    #[test]
    fn filename_uses_quotation_number_or_draft() {
        assert_eq!(download_filename(Some("TQ-2026-014")), "Quotation-TQ-2026-014.pdf");
        assert_eq!(download_filename(None), "Quotation-draft.pdf");
    }

    #[tokio::test]
    async fn html_artifact_is_delivered_without_wkhtmltopdf() {
        let generator =
            DocumentGenerator::new(branding()).expect("generator").without_pdf_conversion();

        let mut draft = QuotationDraft::new(&SessionContext::default());
        draft.location = "Bali".to_owned();
        draft.flight_cost_per_person = Decimal::from(7000);
        let costs = aggregate(&draft);

        let artifact = generator
            .generate(&draft, &costs, &Conversion::identity())
            .await
            .expect("generate");

        match artifact {
            DocumentArtifact::Html(html) => {
                assert!(html.contains("Bali"));
                assert!(html.contains("Sunset Tours"));
            }
            DocumentArtifact::Pdf(_) => panic!("expected HTML artifact when conversion is off"),
        }
    }
}
