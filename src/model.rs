//! Input data for every document kind, plus the rendered output.
//!
//! These are caller-owned value objects. Amounts arrive fully computed; the
//! renderer never re-derives or validates them. Field names serialise in
//! camelCase so JSON produced by the web client deserialises unchanged.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

/// One line on an invoice, quote, bill or credit note.
///
/// The caller keeps `line_amount` consistent with quantity, unit price and
/// discount; it is rendered as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub tax_amount: f64,
    pub line_amount: f64,
    #[serde(default)]
    pub discount: f64,
}

/// The issuing organisation shown in the document header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    /// May span several lines.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// The counterparty: a customer contact ("To") or a supplier ("From").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyInfo {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Whether unit prices include tax. Carried for the caller's benefit only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountType {
    #[default]
    Exclusive,
    Inclusive,
    #[serde(rename = "noTax", alias = "notax", alias = "no_tax")]
    NoTax,
}

/// Identifying fields common to invoices, quotes, bills and credit notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeader {
    /// Kind-specific number, e.g. `INV-0042`.
    pub number: String,
    pub date: String,
    /// Due date (invoice, bill) or expiry date (quote).
    #[serde(default, alias = "expiryDate")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub amount_type: AmountType,
}

/// An additional totals row appended after Subtotal / Tax / Total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsExtra {
    pub label: String,
    pub amount: f64,
    /// CSS class used to emphasise the row, e.g. `amount-due-row`.
    #[serde(default)]
    pub emphasis: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub sub_total: f64,
    pub total_tax: f64,
    pub total: f64,
    /// Rendered in the order given.
    #[serde(default)]
    pub extras: Vec<TotalsExtra>,
}

/// One row of a customer statement. `balance` is the running balance after
/// this row, as computed by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementEntry {
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub reference: String,
    pub amount: f64,
    pub balance: f64,
}

// ---------------------------------------------------------------------------
// Per-kind inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub company: CompanyInfo,
    pub contact: PartyInfo,
    pub header: DocumentHeader,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
    #[serde(default)]
    pub amount_paid: f64,
    pub amount_due: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub company: CompanyInfo,
    pub contact: PartyInfo,
    pub header: DocumentHeader,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillData {
    pub company: CompanyInfo,
    pub supplier: PartyInfo,
    pub header: DocumentHeader,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
    #[serde(default)]
    pub amount_paid: f64,
    pub amount_due: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNoteData {
    pub company: CompanyInfo,
    pub contact: PartyInfo,
    pub header: DocumentHeader,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementData {
    pub company: CompanyInfo,
    pub contact: PartyInfo,
    pub statement_date: String,
    pub from_date: String,
    pub to_date: String,
    pub currency: String,
    #[serde(default)]
    pub entries: Vec<StatementEntry>,
    pub opening_balance: f64,
    pub closing_balance: f64,
}

impl StatementData {
    /// The statement period, which doubles as its identifying number.
    pub fn period(&self) -> String {
        format!("{} to {}", self.from_date, self.to_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipData {
    pub company_name: String,
    #[serde(default)]
    pub company_address: String,
    pub employee_name: String,
    #[serde(default)]
    pub employee_position: String,
    #[serde(default)]
    pub employee_tax_code: String,
    #[serde(default)]
    pub employee_ird_number: String,
    #[serde(default)]
    pub bank_account: String,
    pub pay_period: String,
    pub pay_date: String,
    pub gross_pay: f64,
    pub paye: f64,
    #[serde(default)]
    pub kiwi_saver_employee: f64,
    #[serde(default)]
    pub kiwi_saver_employer: f64,
    #[serde(default)]
    pub student_loan: f64,
    pub net_pay: f64,
}

impl PayslipData {
    pub fn total_deductions(&self) -> f64 {
        self.paye + self.kiwi_saver_employee + self.student_loan
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A complete, standalone HTML document.
///
/// `styles` repeats the style sheet embedded in `html` for previewers that
/// inject styles into their own surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub title: String,
    pub html: String,
    pub styles: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_accepts_camel_case_and_expiry_alias() {
        let json = r#"{
            "number": "QU-0010",
            "date": "2026-02-16",
            "expiryDate": "2026-03-16",
            "currency": "NZD",
            "amountType": "inclusive"
        }"#;
        let header: DocumentHeader = serde_json::from_str(json).unwrap();
        assert_eq!(header.due_date.as_deref(), Some("2026-03-16"));
        assert_eq!(header.amount_type, AmountType::Inclusive);
        assert!(header.reference.is_none());
        assert!(header.status.is_none());
    }

    #[test]
    fn line_item_optional_fields_default_to_zero() {
        let json = r#"{"description":"Consulting","quantity":8,"unitPrice":120,"lineAmount":960}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.tax_amount, 0.0);
        assert_eq!(item.discount, 0.0);
    }

    #[test]
    fn payslip_total_deductions_sums_three_components() {
        let json = r#"{
            "companyName": "Demo Company",
            "employeeName": "Jane Doe",
            "payPeriod": "2026-02-01 to 2026-02-14",
            "payDate": "2026-02-16",
            "grossPay": 3000,
            "paye": 600,
            "kiwiSaverEmployee": 90,
            "kiwiSaverEmployer": 90,
            "studentLoan": 120,
            "netPay": 2190
        }"#;
        let slip: PayslipData = serde_json::from_str(json).unwrap();
        assert_eq!(slip.total_deductions(), 810.0);
    }
}
