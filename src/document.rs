//! Generic document model.
//!
//! Every document kind is declared as a [`DocumentModel`]: a header, an info
//! grid with two panels, an ordered list of [`Section`]s and a footer. The
//! renderer walks the model and delegates to the fragment builders, so the
//! assemblers only decide *what* goes on the page.

use crate::fragments::{
    balance_row, company_block, detail_rows_block, footer, ledger_table, line_items_table,
    party_block, section_table, title_block, totals_block, wrap_document,
};
use crate::model::{CompanyInfo, LineItem, PartyInfo, RenderedDocument, StatementEntry};
use crate::rows::{AmountRow, DetailRow, Money};
use crate::theme::Theme;

/// Company block on the left, title block on the right.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    pub company: &'a CompanyInfo,
    /// Large title text, e.g. `Invoice` or `PAYSLIP`.
    pub kind_label: &'a str,
    pub number: String,
    pub status: Option<&'a str>,
}

/// One side of the info grid.
#[derive(Debug, Clone)]
pub enum InfoPanel<'a> {
    /// Counterparty block under a caller-chosen label ("To" / "From").
    Party { label: &'a str, party: &'a PartyInfo },
    /// Label/value rows.
    Details { rows: Vec<DetailRow>, align: Align },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl Align {
    fn block_class(self) -> &'static str {
        match self {
            Align::Left => "info-block",
            Align::Right => "info-block-right",
        }
    }
}

/// A body section, rendered in declaration order.
#[derive(Debug, Clone)]
pub enum Section<'a> {
    LineItems(&'a [LineItem]),
    /// Heading plus labelled amounts; an emphasised row closes the section.
    Table {
        heading: &'a str,
        rows: Vec<AmountRow>,
        money: Money,
    },
    /// Statement ledger between opening and closing balance lines.
    Ledger {
        opening: f64,
        entries: &'a [StatementEntry],
        closing: f64,
    },
    Totals { rows: Vec<AmountRow>, money: Money },
}

#[derive(Debug, Clone)]
pub struct DocumentModel<'a> {
    pub title: String,
    pub header: Header<'a>,
    pub info: [InfoPanel<'a>; 2],
    pub sections: Vec<Section<'a>>,
    pub footer: String,
}

impl DocumentModel<'_> {
    /// Render the model into a standalone document using `theme`.
    pub fn render(&self, theme: &Theme) -> RenderedDocument {
        let body = self.body_html();
        let html = wrap_document(&self.title, &body, theme);
        log::debug!(
            "rendered '{}' ({} sections, {} bytes, theme '{}')",
            self.title,
            self.sections.len(),
            html.len(),
            theme.name
        );
        RenderedDocument {
            title: self.title.clone(),
            html,
            styles: theme.css.clone(),
        }
    }

    fn body_html(&self) -> String {
        let mut body = String::with_capacity(4096);

        body.push_str("\n    <div class=\"pdf-header\">");
        body.push_str(&company_block(self.header.company));
        body.push_str(&title_block(
            self.header.kind_label,
            &self.header.number,
            self.header.status,
        ));
        body.push_str("\n    </div>");

        body.push_str("\n    <div class=\"info-grid\">");
        for panel in &self.info {
            body.push_str(&render_panel(panel));
        }
        body.push_str("\n    </div>");

        for section in &self.sections {
            body.push_str(&render_section(section));
        }

        body.push_str(&footer(&self.footer));
        body
    }
}

fn render_panel(panel: &InfoPanel<'_>) -> String {
    match panel {
        InfoPanel::Party { label, party } => {
            party_block(label, &party.name, &party.address, &party.email)
        }
        InfoPanel::Details { rows, align } => detail_rows_block(align.block_class(), rows),
    }
}

fn render_section(section: &Section<'_>) -> String {
    match section {
        Section::LineItems(items) => line_items_table(items),
        Section::Table {
            heading,
            rows,
            money,
        } => section_table(heading, rows, *money),
        Section::Ledger {
            opening,
            entries,
            closing,
        } => {
            let mut html = balance_row("Opening Balance", *opening);
            html.push_str(&ledger_table(entries));
            html.push_str(&balance_row("Closing Balance", *closing));
            html
        }
        Section::Totals { rows, money } => totals_block(rows, *money),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{Emphasis, Rule};

    fn company() -> CompanyInfo {
        CompanyInfo {
            name: "Demo Company".into(),
            address: "1 Street".into(),
            email: "hi@demo.test".into(),
            phone: None,
        }
    }

    #[test]
    fn sections_render_in_declaration_order() {
        let company = company();
        let party = PartyInfo {
            name: "Acme".into(),
            ..PartyInfo::default()
        };
        let model = DocumentModel {
            title: "Test 1".into(),
            header: Header {
                company: &company,
                kind_label: "Test",
                number: "1".into(),
                status: None,
            },
            info: [
                InfoPanel::Party {
                    label: "To",
                    party: &party,
                },
                InfoPanel::Details {
                    rows: vec![DetailRow::new("Date", "2026-01-01")],
                    align: Align::Right,
                },
            ],
            sections: vec![
                Section::Table {
                    heading: "First",
                    rows: vec![AmountRow::new("A", 1.0)],
                    money: Money::Plain,
                },
                Section::Table {
                    heading: "Second",
                    rows: vec![
                        AmountRow::new("Skipped", 0.0).when(Rule::Positive),
                        AmountRow::new("B", 2.0).emphasized(Emphasis::SectionTotal),
                    ],
                    money: Money::Symbol("$"),
                },
            ],
            footer: "bye".into(),
        };

        let doc = model.render(&Theme::default());
        let html = &doc.html;
        assert_eq!(doc.title, "Test 1");
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
        assert!(!html.contains("Skipped"));
        assert!(html.contains(r#"<tr class="section-total-row">"#));
        assert!(html.contains("$2.00"));
        assert!(html.contains(r#"<div class="info-block-right">"#));
        assert_eq!(doc.styles, Theme::default().css);
    }

    #[test]
    fn ledger_section_brackets_table_with_balances() {
        let company = company();
        let model = DocumentModel {
            title: "Ledger".into(),
            header: Header {
                company: &company,
                kind_label: "Statement",
                number: "x".into(),
                status: None,
            },
            info: [
                InfoPanel::Details {
                    rows: vec![],
                    align: Align::Left,
                },
                InfoPanel::Details {
                    rows: vec![],
                    align: Align::Right,
                },
            ],
            sections: vec![Section::Ledger {
                opening: 10.0,
                entries: &[],
                closing: 20.0,
            }],
            footer: String::new(),
        };
        let html = model.render(&Theme::default()).html;
        let opening = html.find("Opening Balance").unwrap();
        let table = html.find(r#"<table class="statement-table">"#).unwrap();
        let closing = html.find("Closing Balance").unwrap();
        assert!(opening < table && table < closing);
        assert!(html.contains("10.00") && html.contains("20.00"));
    }
}
