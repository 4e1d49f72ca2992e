use std::{collections::BTreeMap, path::PathBuf};

use derive_more::From;
use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use tera::Tera;

use super::context::RenderContext;

#[derive(Debug, From)]
pub enum Error {
    #[from]
    TemplateNotFound(tera::Error),
    PdfGeneration(String),
}

/// Merges a [`RenderContext`] into the receipt layout and converts the
/// result into a PDF byte stream. Page geometry lives in the template
/// stylesheet (80 mm wide, automatic height).
pub struct Renderer {
    templates_dir: PathBuf,
}

impl Renderer {
    pub fn new(templates_dir: PathBuf) -> Self {
        Self { templates_dir }
    }

    pub fn render_ticket(
        &self,
        context: &RenderContext,
    ) -> Result<Vec<u8>, Error> {
        let html = self.render_html(context)?;
        html_to_pdf(&html)
    }

    // Templates are loaded on every call so a missing or unreadable
    // layout stays a request-level error. Tera escapes all
    // interpolations in ".html" templates.
    fn render_html(&self, context: &RenderContext) -> Result<String, Error> {
        let glob = format!("{}/*.html", self.templates_dir.display());
        let templates = Tera::new(&glob)?;
        let context = tera::Context::from_serialize(context)?;
        Ok(templates.render("ticket.html", &context)?)
    }
}

fn html_to_pdf(html: &str) -> Result<Vec<u8>, Error> {
    let images = BTreeMap::new();
    let fonts = BTreeMap::new();
    let options = GeneratePdfOptions::default();
    let mut warnings = Vec::new();

    let document =
        PdfDocument::from_html(html, &images, &fonts, &options, &mut warnings)
            .map_err(|e| Error::PdfGeneration(e.to_string()))?;

    let mut save_warnings = Vec::new();
    Ok(document.save(&PdfSaveOptions::default(), &mut save_warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{LineItem, TicketRequest},
        render::{context::normalize, qr},
    };

    fn sample_ticket() -> TicketRequest {
        TicketRequest {
            ticket_number: Some("T-001".to_string()),
            commande_numero: Some("C-17".to_string()),
            total: Some(4500.0),
            lignes: Some(vec![LineItem {
                quantite: Some(2),
                nom_plat: Some("Poulet Mabawa".to_string()),
                prix_unitaire: Some(1500.0),
                total_ligne: Some(3000.0),
                ..LineItem::default()
            }]),
            ..TicketRequest::default()
        }
    }

    #[test]
    fn missing_template_is_a_template_error() {
        let renderer = Renderer::new(PathBuf::from("does-not-exist"));
        let context = normalize(&sample_ticket());
        match renderer.render_ticket(&context) {
            Err(Error::TemplateNotFound(_)) => {}
            other => panic!("expected a template error, got {other:?}"),
        }
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let renderer = Renderer::new(PathBuf::from("templates"));
        let context = normalize(&TicketRequest {
            lignes: Some(vec![LineItem {
                nom_plat: Some("<script>alert(1)</script>".to_string()),
                ..LineItem::default()
            }]),
            ..TicketRequest::default()
        });
        let html = renderer.render_html(&context).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn renders_ticket_to_pdf_bytes() {
        let renderer = Renderer::new(PathBuf::from("templates"));
        let ticket = sample_ticket();
        let mut context = normalize(&ticket);
        context.qr_code_data_uri = qr::data_uri(&ticket);

        let pdf = renderer.render_ticket(&context).unwrap();
        assert_eq!(&pdf[..4], b"%PDF");
    }

    #[test]
    fn renders_without_qr_code() {
        let renderer = Renderer::new(PathBuf::from("templates"));
        let context = normalize(&sample_ticket());
        assert!(context.qr_code_data_uri.is_none());

        let pdf = renderer.render_ticket(&context).unwrap();
        assert_eq!(&pdf[..4], b"%PDF");
    }
}
