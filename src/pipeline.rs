//! Pipeline – ties document kinds, their JSON data and the assemblers together
//! into a single function call.

use std::fmt;
use std::str::FromStr;

use crate::assemblers;
use crate::error::{ForgeError, Result};
use crate::format::class_slug;
use crate::model::{
    BillData, CreditNoteData, InvoiceData, PayslipData, QuoteData, RenderedDocument, StatementData,
};
use crate::payslip;
use crate::samples;
use crate::theme::Theme;

/// The document kinds the pipeline can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Invoice,
    Quote,
    Bill,
    CreditNote,
    Statement,
    Payslip,
}

impl DocumentKind {
    pub fn all() -> [DocumentKind; 6] {
        [
            DocumentKind::Invoice,
            DocumentKind::Quote,
            DocumentKind::Bill,
            DocumentKind::CreditNote,
            DocumentKind::Statement,
            DocumentKind::Payslip,
        ]
    }

    /// Identifier used on the command line and over FFI.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
            DocumentKind::Bill => "bill",
            DocumentKind::CreditNote => "credit-note",
            DocumentKind::Statement => "statement",
            DocumentKind::Payslip => "payslip",
        }
    }

    /// Human-readable name, as used in document titles.
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Quote => "Quote",
            DocumentKind::Bill => "Bill",
            DocumentKind::CreditNote => "Credit Note",
            DocumentKind::Statement => "Statement",
            DocumentKind::Payslip => "Payslip",
        }
    }

    /// Download name for a document of this kind, e.g.
    /// `"Acme Corp"` → `acme-corp-invoice.html`.
    pub fn suggested_filename(self, counterparty: &str) -> String {
        let slug = class_slug(counterparty);
        if slug.is_empty() {
            format!("{}.html", self.as_str())
        } else {
            format!("{slug}-{}.html", self.as_str())
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        let wanted = if wanted == "creditnote" { "credit-note".to_string() } else { wanted };
        DocumentKind::all()
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ForgeError::UnknownKind(s.to_string()))
    }
}

/// Rendering options shared by every kind.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Style sheet embedded into each document (default: built-in print styles).
    pub theme: Theme,
}

impl RenderConfig {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }
}

/// Typed input for any document kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentData {
    Invoice(InvoiceData),
    Quote(QuoteData),
    Bill(BillData),
    CreditNote(CreditNoteData),
    Statement(StatementData),
    Payslip(PayslipData),
}

impl DocumentData {
    /// Deserialize `value` as the data for `kind`.
    pub fn from_value(kind: DocumentKind, value: serde_json::Value) -> Result<Self> {
        Ok(match kind {
            DocumentKind::Invoice => DocumentData::Invoice(serde_json::from_value(value)?),
            DocumentKind::Quote => DocumentData::Quote(serde_json::from_value(value)?),
            DocumentKind::Bill => DocumentData::Bill(serde_json::from_value(value)?),
            DocumentKind::CreditNote => DocumentData::CreditNote(serde_json::from_value(value)?),
            DocumentKind::Statement => DocumentData::Statement(serde_json::from_value(value)?),
            DocumentKind::Payslip => DocumentData::Payslip(serde_json::from_value(value)?),
        })
    }

    /// Built-in sample data for `kind`.
    pub fn sample(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Invoice => DocumentData::Invoice(samples::invoice()),
            DocumentKind::Quote => DocumentData::Quote(samples::quote()),
            DocumentKind::Bill => DocumentData::Bill(samples::bill()),
            DocumentKind::CreditNote => DocumentData::CreditNote(samples::credit_note()),
            DocumentKind::Statement => DocumentData::Statement(samples::statement()),
            DocumentKind::Payslip => DocumentData::Payslip(samples::payslip()),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentData::Invoice(_) => DocumentKind::Invoice,
            DocumentData::Quote(_) => DocumentKind::Quote,
            DocumentData::Bill(_) => DocumentKind::Bill,
            DocumentData::CreditNote(_) => DocumentKind::CreditNote,
            DocumentData::Statement(_) => DocumentKind::Statement,
            DocumentData::Payslip(_) => DocumentKind::Payslip,
        }
    }

    /// Who the document is addressed to (or, for a bill, who sent it).
    pub fn counterparty(&self) -> &str {
        match self {
            DocumentData::Invoice(d) => &d.contact.name,
            DocumentData::Quote(d) => &d.contact.name,
            DocumentData::Bill(d) => &d.supplier.name,
            DocumentData::CreditNote(d) => &d.contact.name,
            DocumentData::Statement(d) => &d.contact.name,
            DocumentData::Payslip(d) => &d.employee_name,
        }
    }

    pub fn suggested_filename(&self) -> String {
        self.kind().suggested_filename(self.counterparty())
    }

    pub fn render(&self, config: &RenderConfig) -> RenderedDocument {
        let theme = &config.theme;
        let doc = match self {
            DocumentData::Invoice(d) => assemblers::invoice(d, theme),
            DocumentData::Quote(d) => assemblers::quote(d, theme),
            DocumentData::Bill(d) => assemblers::bill(d, theme),
            DocumentData::CreditNote(d) => assemblers::credit_note(d, theme),
            DocumentData::Statement(d) => assemblers::statement(d, theme),
            DocumentData::Payslip(d) => payslip::payslip(d, theme),
        };
        log::debug!(
            "rendered {} '{}' ({} bytes, theme '{}')",
            self.kind(),
            doc.title,
            doc.html.len(),
            theme.name
        );
        doc
    }
}

/// Render already-parsed JSON data as a document of `kind`.
pub fn render_value(
    kind: DocumentKind,
    value: serde_json::Value,
    config: &RenderConfig,
) -> Result<RenderedDocument> {
    Ok(DocumentData::from_value(kind, value)?.render(config))
}

/// Full pipeline: JSON text → rendered document.
pub fn render_json(kind: DocumentKind, json: &str, config: &RenderConfig) -> Result<RenderedDocument> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    render_value(kind, value, config)
}

/// Convenience: render the built-in sample for `kind`.
pub fn render_sample(kind: DocumentKind, config: &RenderConfig) -> RenderedDocument {
    DocumentData::sample(kind).render(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_and_display() {
        for kind in DocumentKind::all() {
            assert_eq!(kind.to_string().parse::<DocumentKind>().unwrap(), kind);
        }
        assert_eq!("Credit_Note".parse::<DocumentKind>().unwrap(), DocumentKind::CreditNote);
        assert_eq!("creditnote".parse::<DocumentKind>().unwrap(), DocumentKind::CreditNote);
        assert!(matches!(
            "receipt".parse::<DocumentKind>(),
            Err(ForgeError::UnknownKind(k)) if k == "receipt"
        ));
    }

    #[test]
    fn suggested_filenames_are_slugged() {
        assert_eq!(
            DocumentKind::Invoice.suggested_filename("Acme Corp"),
            "acme-corp-invoice.html"
        );
        assert_eq!(
            DocumentKind::CreditNote.suggested_filename("  "),
            "credit-note.html"
        );
        assert_eq!(
            DocumentData::sample(DocumentKind::Bill).suggested_filename(),
            "office-supplies-ltd-bill.html"
        );
    }

    #[test]
    fn render_json_matches_direct_assembly() {
        let json = serde_json::to_string(&samples::quote()).unwrap();
        let config = RenderConfig::default();
        let via_json = render_json(DocumentKind::Quote, &json, &config).unwrap();
        let direct = assemblers::quote(&samples::quote(), &config.theme);
        assert_eq!(via_json, direct);
    }

    #[test]
    fn render_json_rejects_mismatched_data() {
        let json = serde_json::to_string(&samples::payslip()).unwrap();
        let err = render_json(DocumentKind::Invoice, &json, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidData(_)));

        let err = render_json(DocumentKind::Invoice, "{not json", &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidData(_)));
    }

    #[test]
    fn every_sample_renders_with_its_kind_in_the_title() {
        let config = RenderConfig::default();
        for kind in DocumentKind::all() {
            let doc = render_sample(kind, &config);
            assert!(doc.title.starts_with(kind.label()), "{kind}: {}", doc.title);
            assert!(doc.html.starts_with("<!DOCTYPE html>"));
        }
    }

    #[test]
    fn config_theme_reaches_the_document() {
        let config = RenderConfig::with_theme(Theme::new("plain", "body { color: teal; }"));
        let doc = render_sample(DocumentKind::Statement, &config);
        assert_eq!(doc.styles, "body { color: teal; }");
        assert!(doc.html.contains("color: teal"));
    }
}
