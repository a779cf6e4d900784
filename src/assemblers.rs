//! Assemblers for the line-item document kinds and the customer statement.
//!
//! Each assembler declares its document as a [`DocumentModel`]: title
//! `"{Kind} {number}"`, a counterparty panel, detail rows (Reference only when
//! present), the line items and a totals block with kind-specific extras.

use crate::document::{Align, DocumentModel, Header, InfoPanel, Section};
use crate::fragments::standard_totals;
use crate::model::{
    BillData, CompanyInfo, CreditNoteData, DocumentHeader, InvoiceData, LineItem, PartyInfo,
    QuoteData, RenderedDocument, StatementData, Totals,
};
use crate::rows::{AmountRow, DetailRow, Emphasis, Money};
use crate::theme::Theme;

/// Which side of the transaction the counterparty is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    /// We are billing them: render under "To".
    Receivable,
    /// They are billing us: render under "From".
    Payable,
}

impl Orientation {
    fn label(self) -> &'static str {
        match self {
            Orientation::Receivable => "To",
            Orientation::Payable => "From",
        }
    }
}

/// Everything the four line-item kinds have in common.
struct LineItemDocument<'a> {
    kind: &'static str,
    company: &'a CompanyInfo,
    party: &'a PartyInfo,
    orientation: Orientation,
    header: &'a DocumentHeader,
    /// Label for the header's second date, if the kind has one.
    second_date: Option<&'static str>,
    show_status: bool,
    line_items: &'a [LineItem],
    totals: &'a Totals,
    /// Appended after any caller-supplied extras.
    kind_extras: Vec<AmountRow>,
    footer: String,
}

impl<'a> LineItemDocument<'a> {
    fn model(self) -> DocumentModel<'a> {
        let header = self.header;
        let title = format!("{} {}", self.kind, header.number);

        let mut detail_rows = vec![
            DetailRow::new(format!("{} Number", self.kind), header.number.as_str()),
            DetailRow::new("Date", header.date.as_str()),
        ];
        if let Some(label) = self.second_date {
            detail_rows.push(DetailRow::optional(label, header.due_date.as_deref()));
        }
        detail_rows.push(DetailRow::new("Currency", header.currency.as_str()));
        detail_rows.push(DetailRow::optional("Reference", header.reference.as_deref()));

        let totals = self.totals;
        let mut totals_rows = standard_totals(totals.sub_total, totals.total_tax, totals.total);
        totals_rows.extend(totals.extras.iter().map(|extra| {
            AmountRow::new(extra.label.as_str(), extra.amount)
                .emphasized(Emphasis::from_class(extra.emphasis.as_deref()))
        }));
        totals_rows.extend(self.kind_extras);

        DocumentModel {
            title,
            header: Header {
                company: self.company,
                kind_label: self.kind,
                number: header.number.clone(),
                status: if self.show_status {
                    header.status.as_deref()
                } else {
                    None
                },
            },
            info: [
                InfoPanel::Party {
                    label: self.orientation.label(),
                    party: self.party,
                },
                InfoPanel::Details {
                    rows: detail_rows,
                    align: Align::Right,
                },
            ],
            sections: vec![
                Section::LineItems(self.line_items),
                Section::Totals {
                    rows: totals_rows,
                    money: Money::Plain,
                },
            ],
            footer: self.footer,
        }
    }
}

/// Amount Paid followed by the emphasised Amount Due.
fn settlement_rows(amount_paid: f64, amount_due: f64) -> Vec<AmountRow> {
    vec![
        AmountRow::new("Amount Paid", amount_paid),
        AmountRow::new("Amount Due", amount_due).emphasized(Emphasis::AmountDue),
    ]
}

// ---------------------------------------------------------------------------
// Public assemblers
// ---------------------------------------------------------------------------

pub fn invoice(data: &InvoiceData, theme: &Theme) -> RenderedDocument {
    LineItemDocument {
        kind: "Invoice",
        company: &data.company,
        party: &data.contact,
        orientation: Orientation::Receivable,
        header: &data.header,
        second_date: Some("Due Date"),
        show_status: true,
        line_items: &data.line_items,
        totals: &data.totals,
        kind_extras: settlement_rows(data.amount_paid, data.amount_due),
        footer: "Thank you for your business".to_string(),
    }
    .model()
    .render(theme)
}

pub fn quote(data: &QuoteData, theme: &Theme) -> RenderedDocument {
    let footer = match data.header.due_date.as_deref() {
        Some(expiry) if !expiry.trim().is_empty() => {
            format!("This quote is valid until {expiry}")
        }
        _ => "Thank you for your business".to_string(),
    };
    LineItemDocument {
        kind: "Quote",
        company: &data.company,
        party: &data.contact,
        orientation: Orientation::Receivable,
        header: &data.header,
        second_date: Some("Expiry Date"),
        show_status: false,
        line_items: &data.line_items,
        totals: &data.totals,
        kind_extras: Vec::new(),
        footer,
    }
    .model()
    .render(theme)
}

pub fn bill(data: &BillData, theme: &Theme) -> RenderedDocument {
    LineItemDocument {
        kind: "Bill",
        company: &data.company,
        party: &data.supplier,
        orientation: Orientation::Payable,
        header: &data.header,
        second_date: Some("Due Date"),
        show_status: true,
        line_items: &data.line_items,
        totals: &data.totals,
        kind_extras: settlement_rows(data.amount_paid, data.amount_due),
        footer: format!("Bill from {}", data.supplier.name),
    }
    .model()
    .render(theme)
}

pub fn credit_note(data: &CreditNoteData, theme: &Theme) -> RenderedDocument {
    LineItemDocument {
        kind: "Credit Note",
        company: &data.company,
        party: &data.contact,
        orientation: Orientation::Receivable,
        header: &data.header,
        second_date: None,
        show_status: false,
        line_items: &data.line_items,
        totals: &data.totals,
        kind_extras: Vec::new(),
        footer: "Credit note applied to account".to_string(),
    }
    .model()
    .render(theme)
}

/// Customer statement. The period stands in for the document number.
pub fn statement(data: &StatementData, theme: &Theme) -> RenderedDocument {
    let period = data.period();
    DocumentModel {
        title: format!("Statement {period}"),
        header: Header {
            company: &data.company,
            kind_label: "Statement",
            number: period.clone(),
            status: None,
        },
        info: [
            InfoPanel::Party {
                label: Orientation::Receivable.label(),
                party: &data.contact,
            },
            InfoPanel::Details {
                rows: vec![
                    DetailRow::new("Statement Date", data.statement_date.as_str()),
                    DetailRow::new("Period", period),
                ],
                align: Align::Right,
            },
        ],
        sections: vec![Section::Ledger {
            opening: data.opening_balance,
            entries: &data.entries,
            closing: data.closing_balance,
        }],
        footer: format!("Statement for {}", data.contact.name),
    }
    .render(theme)
}
