//! Sample document data for demonstration and testing.
//!
//! Each function returns realistic data for one document kind. The CLI's
//! `--sample` flag renders these.

use crate::model::{
    AmountType, BillData, CompanyInfo, CreditNoteData, DocumentHeader, InvoiceData, LineItem,
    PartyInfo, PayslipData, QuoteData, StatementData, StatementEntry, Totals,
};

fn demo_company() -> CompanyInfo {
    CompanyInfo {
        name: "Demo Company (NZ)".to_string(),
        address: "123 Test Street\nWellington 6011\nNew Zealand".to_string(),
        email: "info@demo.co.nz".to_string(),
        phone: Some("+64 4 123 4567".to_string()),
    }
}

fn acme() -> PartyInfo {
    PartyInfo {
        name: "Acme Corp".to_string(),
        address: "456 Client Ave\nAuckland 1010".to_string(),
        email: "billing@acme.com".to_string(),
        phone: None,
    }
}

fn line(description: &str, quantity: f64, unit_price: f64) -> LineItem {
    let line_amount = quantity * unit_price;
    LineItem {
        description: description.to_string(),
        quantity,
        unit_price,
        tax_rate: 15.0,
        tax_amount: line_amount * 0.15,
        line_amount,
        discount: 0.0,
    }
}

/// Two-line invoice: 2,500.00 + 375.00 GST = 2,875.00, nothing paid yet.
pub fn invoice() -> InvoiceData {
    InvoiceData {
        company: demo_company(),
        contact: acme(),
        header: DocumentHeader {
            number: "INV-0042".to_string(),
            date: "2026-02-16".to_string(),
            due_date: Some("2026-03-16".to_string()),
            status: Some("submitted".to_string()),
            reference: Some("PO-123".to_string()),
            currency: "NZD".to_string(),
            amount_type: AmountType::Exclusive,
        },
        line_items: vec![
            line("Web Development", 10.0, 150.0),
            line("Design Services", 5.0, 200.0),
        ],
        totals: Totals {
            sub_total: 2500.0,
            total_tax: 375.0,
            total: 2875.0,
            extras: Vec::new(),
        },
        amount_paid: 0.0,
        amount_due: 2875.0,
    }
}

/// Single consulting line: 8 × 120.00 = 960.00, total 1,104.00.
pub fn quote() -> QuoteData {
    QuoteData {
        company: demo_company(),
        contact: acme(),
        header: DocumentHeader {
            number: "QU-0010".to_string(),
            date: "2026-02-16".to_string(),
            due_date: Some("2026-03-16".to_string()),
            status: None,
            reference: Some("RFQ-99".to_string()),
            currency: "NZD".to_string(),
            amount_type: AmountType::Exclusive,
        },
        line_items: vec![line("Consulting", 8.0, 120.0)],
        totals: Totals {
            sub_total: 960.0,
            total_tax: 144.0,
            total: 1104.0,
            extras: Vec::new(),
        },
    }
}

pub fn bill() -> BillData {
    BillData {
        company: demo_company(),
        supplier: PartyInfo {
            name: "Office Supplies Ltd".to_string(),
            address: "789 Supply Rd\nChristchurch 8011".to_string(),
            email: "accounts@officesupplies.co.nz".to_string(),
            phone: None,
        },
        header: DocumentHeader {
            number: "BILL-0101".to_string(),
            date: "2026-02-10".to_string(),
            due_date: Some("2026-03-10".to_string()),
            status: Some("approved".to_string()),
            reference: None,
            currency: "NZD".to_string(),
            amount_type: AmountType::Exclusive,
        },
        line_items: vec![line("Printer paper (box)", 4.0, 45.0)],
        totals: Totals {
            sub_total: 180.0,
            total_tax: 27.0,
            total: 207.0,
            extras: Vec::new(),
        },
        amount_paid: 100.0,
        amount_due: 107.0,
    }
}

pub fn credit_note() -> CreditNoteData {
    CreditNoteData {
        company: demo_company(),
        contact: acme(),
        header: DocumentHeader {
            number: "CN-0007".to_string(),
            date: "2026-02-20".to_string(),
            due_date: None,
            status: None,
            reference: Some("INV-0042".to_string()),
            currency: "NZD".to_string(),
            amount_type: AmountType::Exclusive,
        },
        line_items: vec![line("Design Services (refund)", 1.0, 200.0)],
        totals: Totals {
            sub_total: 200.0,
            total_tax: 30.0,
            total: 230.0,
            extras: Vec::new(),
        },
    }
}

/// An invoice raised and paid within the period, leaving a zero balance.
pub fn statement() -> StatementData {
    StatementData {
        company: demo_company(),
        contact: acme(),
        statement_date: "2026-02-28".to_string(),
        from_date: "2026-01-01".to_string(),
        to_date: "2026-02-28".to_string(),
        currency: "NZD".to_string(),
        entries: vec![
            StatementEntry {
                date: "2026-01-15".to_string(),
                description: "Invoice INV-0040".to_string(),
                reference: "INV-0040".to_string(),
                amount: 1150.0,
                balance: 1150.0,
            },
            StatementEntry {
                date: "2026-02-01".to_string(),
                description: "Payment received".to_string(),
                reference: "DD-2201".to_string(),
                amount: -1150.0,
                balance: 0.0,
            },
        ],
        opening_balance: 0.0,
        closing_balance: 0.0,
    }
}

pub fn payslip() -> PayslipData {
    PayslipData {
        company_name: "Demo Company (NZ)".to_string(),
        company_address: "123 Test Street, Wellington 6011".to_string(),
        employee_name: "Jane Doe".to_string(),
        employee_position: "Software Engineer".to_string(),
        employee_tax_code: "M SL".to_string(),
        employee_ird_number: "123-456-789".to_string(),
        bank_account: "12-3456-7890123-00".to_string(),
        pay_period: "2026-02-01 to 2026-02-14".to_string(),
        pay_date: "2026-02-16".to_string(),
        gross_pay: 3500.0,
        paye: 690.5,
        kiwi_saver_employee: 105.0,
        kiwi_saver_employer: 105.0,
        student_loan: 172.8,
        net_pay: 2531.7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_round_trip_through_json() {
        let json = serde_json::to_string(&invoice()).unwrap();
        let back: InvoiceData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, invoice());

        let json = serde_json::to_string(&payslip()).unwrap();
        assert!(json.contains("\"kiwiSaverEmployee\""));
    }

    #[test]
    fn payslip_sample_nets_out() {
        let slip = payslip();
        let net = slip.gross_pay - slip.total_deductions();
        assert!((net - slip.net_pay).abs() < 0.005);
    }
}
