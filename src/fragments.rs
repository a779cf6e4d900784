//! HTML fragment builders.
//!
//! Each builder takes a narrow slice of document data and returns a markup
//! string. Builders never fail and never hold on to their input. All
//! caller-supplied text is escaped here, at the point of embedding.

use crate::format::{class_slug, escape_html, format_currency, to_html_lines};
use crate::model::{CompanyInfo, LineItem, StatementEntry};
use crate::rows::{retain_included, AmountRow, DetailRow, Emphasis, Money, Rule};
use crate::theme::Theme;

/// Number of columns in the line-items table.
pub const LINE_ITEM_COLUMNS: usize = 5;

/// Number of columns in the statement ledger table.
pub const LEDGER_COLUMNS: usize = 5;

// ---------------------------------------------------------------------------
// Header fragments
// ---------------------------------------------------------------------------

/// Company name followed by address, phone and email lines.
///
/// Blank contact lines are left out rather than rendered empty.
pub fn company_block(company: &CompanyInfo) -> String {
    let lines: String = [
        Some(company.address.as_str()),
        company.phone.as_deref(),
        Some(company.email.as_str()),
    ]
    .into_iter()
    .filter_map(|line| Rule::NonEmpty.admit(line))
    .map(|line| format!(r#"<div class="company-details">{}</div>"#, to_html_lines(line)))
    .collect::<Vec<_>>()
    .join("\n      ");

    format!(
        r#"
    <div class="company-info">
      <div class="company-name">{}</div>
      {}
    </div>"#,
        escape_html(&company.name),
        lines
    )
}

/// Large document title with its number and, when given, a status chip.
pub fn title_block(kind: &str, number: &str, status: Option<&str>) -> String {
    let status_html = Rule::NonEmpty
        .admit(status)
        .map(|status| {
            format!(
                r#"
      <div class="doc-status status-{}">{}</div>"#,
                class_slug(status),
                escape_html(status)
            )
        })
        .unwrap_or_default();

    format!(
        r#"
    <div class="doc-title-block">
      <div class="doc-title">{}</div>
      <div class="doc-number">{}</div>{}
    </div>"#,
        escape_html(kind),
        escape_html(number),
        status_html
    )
}

// ---------------------------------------------------------------------------
// Info grid fragments
// ---------------------------------------------------------------------------

/// "To" / "From" block for the counterparty.
pub fn party_block(label: &str, name: &str, address: &str, email: &str) -> String {
    format!(
        r#"
    <div class="info-block">
      <div class="info-row">
        <div class="info-label">{}</div>
        <div class="info-value">{}</div>
        <div class="info-value">{}</div>
        <div class="info-value">{}</div>
      </div>
    </div>"#,
        escape_html(label),
        escape_html(name),
        to_html_lines(address),
        escape_html(email)
    )
}

/// Right-aligned label/value rows. Rows whose rule rejects their value are
/// dropped entirely.
pub fn details_block(rows: &[DetailRow]) -> String {
    detail_rows_block("info-block-right", rows)
}

/// Label/value rows inside a block with the given class.
pub fn detail_rows_block(class: &str, rows: &[DetailRow]) -> String {
    let rows_html: String = retain_included(rows)
        .into_iter()
        .map(|row| {
            format!(
                r#"
      <div class="info-row">
        <div class="info-label">{}</div>
        <div class="info-value">{}</div>
      </div>"#,
                escape_html(&row.label),
                escape_html(&row.value)
            )
        })
        .collect();

    format!(
        r#"
    <div class="{}">{}
    </div>"#,
        escape_html(class),
        rows_html
    )
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

const LINE_ITEMS_HEAD: &str = r#"
      <thead>
        <tr>
          <th>Description</th>
          <th class="text-right">Qty</th>
          <th class="text-right">Unit Price</th>
          <th class="text-right">Tax</th>
          <th class="text-right">Amount</th>
        </tr>
      </thead>"#;

/// Line items, one row each. An empty slice renders a single placeholder
/// row spanning every column.
pub fn line_items_table(items: &[LineItem]) -> String {
    let rows: String = if items.is_empty() {
        format!(
            r#"
        <tr><td colspan="{LINE_ITEM_COLUMNS}" style="text-align:center; color:#9ca3af; padding:20px;">No line items</td></tr>"#
        )
    } else {
        items
            .iter()
            .map(|item| {
                format!(
                    r#"
        <tr>
          <td>{}</td>
          <td class="text-right">{}</td>
          <td class="text-right">{}</td>
          <td class="text-right">{}</td>
          <td class="text-right">{}</td>
        </tr>"#,
                    escape_html(&item.description),
                    format_quantity(item.quantity),
                    format_currency(item.unit_price),
                    format_currency(item.tax_amount),
                    format_currency(item.line_amount)
                )
            })
            .collect()
    };

    format!(
        r#"
    <table class="items-table">{LINE_ITEMS_HEAD}
      <tbody>{rows}
      </tbody>
    </table>"#
    )
}

/// Quantities print as plain numbers: `8`, `2.5`.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{quantity}")
    }
}

/// A two-column table of labelled amounts under a heading, e.g. the
/// Deductions table on a payslip.
pub fn section_table(heading: &str, rows: &[AmountRow], money: Money) -> String {
    let rows_html: String = retain_included(rows)
        .into_iter()
        .map(|row| {
            format!(
                r#"
        <tr{}>
          <td>{}</td>
          <td class="text-right">{}</td>
        </tr>"#,
                class_attr(&row.emphasis),
                escape_html(&row.label),
                money.format(row.amount)
            )
        })
        .collect();

    format!(
        r#"
    <table class="items-table">
      <thead>
        <tr>
          <th>{}</th>
          <th class="text-right">Amount</th>
        </tr>
      </thead>
      <tbody>{}
      </tbody>
    </table>"#,
        escape_html(heading),
        rows_html
    )
}

/// Statement ledger: one row per entry with signed amount and running
/// balance.
pub fn ledger_table(entries: &[StatementEntry]) -> String {
    let rows: String = entries
        .iter()
        .map(|entry| {
            format!(
                r#"
        <tr>
          <td>{}</td>
          <td>{}</td>
          <td>{}</td>
          <td class="text-right">{}</td>
          <td class="text-right">{}</td>
        </tr>"#,
                escape_html(&entry.date),
                escape_html(&entry.description),
                escape_html(&entry.reference),
                format_currency(entry.amount),
                format_currency(entry.balance)
            )
        })
        .collect();

    format!(
        r#"
    <table class="statement-table">
      <thead>
        <tr>
          <th>Date</th>
          <th>Description</th>
          <th>Reference</th>
          <th class="text-right">Amount</th>
          <th class="text-right">Balance</th>
        </tr>
      </thead>
      <tbody>{rows}
      </tbody>
    </table>"#
    )
}

/// Opening / closing balance line around a statement ledger.
pub fn balance_row(label: &str, amount: f64) -> String {
    format!(
        r#"
    <div class="balance-row">
      <span>{}</span>
      <span>{}</span>
    </div>"#,
        escape_html(label),
        format_currency(amount)
    )
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// The three standard rows: Subtotal, Tax and an emphasised Total.
pub fn standard_totals(sub_total: f64, total_tax: f64, total: f64) -> Vec<AmountRow> {
    vec![
        AmountRow::new("Subtotal", sub_total),
        AmountRow::new("Tax", total_tax),
        AmountRow::new("Total", total).emphasized(Emphasis::Total),
    ]
}

/// Subtotal, Tax and Total, followed by `extras` in the order given.
pub fn totals_table(sub_total: f64, total_tax: f64, total: f64, extras: &[AmountRow]) -> String {
    let mut rows = standard_totals(sub_total, total_tax, total);
    rows.extend_from_slice(extras);
    totals_block(&rows, Money::Plain)
}

/// Right-aligned totals block built from arbitrary rows.
pub fn totals_block(rows: &[AmountRow], money: Money) -> String {
    let rows_html: String = retain_included(rows)
        .into_iter()
        .map(|row| {
            format!(
                r#"
        <tr{}>
          <td>{}</td>
          <td>{}</td>
        </tr>"#,
                class_attr(&row.emphasis),
                escape_html(&row.label),
                money.format(row.amount)
            )
        })
        .collect();

    format!(
        r#"
    <div class="totals-section">
      <table class="totals-table">{}
      </table>
    </div>"#,
        rows_html
    )
}

fn class_attr(emphasis: &Emphasis) -> String {
    emphasis
        .class()
        .map(|class| format!(r#" class="{}""#, escape_html(class)))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Document shell
// ---------------------------------------------------------------------------

/// Footer line at the bottom of every document.
pub fn footer(text: &str) -> String {
    format!(
        r#"
    <div class="pdf-footer">
      {}
    </div>"#,
        escape_html(text)
    )
}

/// Wrap a body fragment into a complete standalone document with the theme's
/// style sheet embedded in its head.
pub fn wrap_document(title: &str, body: &str, theme: &Theme) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{}</title>
  <style>{}</style>
</head>
<body>
  <div class="pdf-container">
    {}
  </div>
</body>
</html>"#,
        escape_html(title),
        theme.embedded_css(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str) -> LineItem {
        LineItem {
            description: description.to_string(),
            quantity: 8.0,
            unit_price: 120.0,
            tax_rate: 15.0,
            tax_amount: 144.0,
            line_amount: 960.0,
            discount: 0.0,
        }
    }

    #[test]
    fn empty_line_items_render_placeholder() {
        let html = line_items_table(&[]);
        assert!(html.contains("No line items"));
        assert!(html.contains(r#"colspan="5""#));
        assert_eq!(html.matches("<tr>").count(), 2, "header row plus placeholder");
        assert_eq!(html.matches("<td").count(), 1, "one spanning cell");
    }

    #[test]
    fn line_items_render_numbers_right_aligned() {
        let html = line_items_table(&[item("Consulting")]);
        assert!(html.contains("<td>Consulting</td>"));
        assert!(html.contains(r#"<td class="text-right">8</td>"#));
        assert!(html.contains(r#"<td class="text-right">120.00</td>"#));
        assert!(html.contains(r#"<td class="text-right">960.00</td>"#));
        assert!(!html.contains("No line items"));
    }

    #[test]
    fn fractional_quantities_keep_their_digits() {
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(10.0), "10");
    }

    #[test]
    fn title_block_omits_chip_without_status() {
        let html = title_block("Quote", "QU-0010", None);
        assert!(!html.contains("doc-status"));
        let html = title_block("Quote", "QU-0010", Some(""));
        assert!(!html.contains("doc-status"));
    }

    #[test]
    fn title_block_renders_chip_with_slugged_class() {
        let html = title_block("Invoice", "INV-0042", Some("Awaiting Payment"));
        assert!(html.contains(r#"class="doc-status status-awaiting-payment""#));
        assert!(html.contains(">Awaiting Payment<"));
    }

    #[test]
    fn company_block_skips_missing_phone() {
        let company = CompanyInfo {
            name: "Demo Company (NZ)".into(),
            address: "123 Test Street\nWellington 6011".into(),
            email: "info@demo.co.nz".into(),
            phone: None,
        };
        let html = company_block(&company);
        assert_eq!(html.matches("company-details").count(), 2);
        assert!(html.contains("123 Test Street<br>Wellington 6011"));
    }

    #[test]
    fn totals_table_appends_extras_in_order() {
        let extras = [
            AmountRow::new("Amount Paid", 100.0),
            AmountRow::new("Amount Due", 2775.0).emphasized(Emphasis::AmountDue),
        ];
        let html = totals_table(2500.0, 375.0, 2875.0, &extras);
        let sub = html.find("Subtotal").unwrap();
        let total = html.find(r#"<tr class="total-row">"#).unwrap();
        let paid = html.find("Amount Paid").unwrap();
        let due = html.find(r#"<tr class="amount-due-row">"#).unwrap();
        assert!(sub < total && total < paid && paid < due);
        assert!(html.contains("2,775.00"));
    }

    #[test]
    fn custom_emphasis_class_is_escaped() {
        let rows = [AmountRow::new("Odd", 1.0).emphasized(Emphasis::Custom("x\"onclick".into()))];
        let html = totals_block(&rows, Money::Plain);
        assert!(html.contains(r#"class="x&quot;onclick""#));
    }

    #[test]
    fn party_block_escapes_every_field() {
        let html = party_block("To", "<b>Acme</b>", "1 <Road>\nTown", "a@b.c");
        assert!(!html.contains("<b>"));
        assert!(html.contains("1 &lt;Road&gt;<br>Town"));
    }

    #[test]
    fn wrap_document_embeds_theme_and_escapes_title() {
        let theme = Theme::new("t", ".x{color:red}");
        let html = wrap_document("A & B", "<p>body</p>", &theme);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<style>.x{color:red}</style>"));
        assert!(html.contains("<p>body</p>"));
    }
}
