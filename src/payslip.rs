//! Payslip assembler.
//!
//! Declares the payslip as data on the shared document model: employee and
//! pay-run panels, Earnings / Deductions / Employer Contributions tables and a
//! single Net Pay total. Payslip amounts carry a `$` prefix.

use crate::document::{Align, DocumentModel, Header, InfoPanel, Section};
use crate::model::{CompanyInfo, PayslipData, RenderedDocument};
use crate::rows::{AmountRow, DetailRow, Emphasis, Money, Rule};
use crate::theme::Theme;

const PAYSLIP_MONEY: Money = Money::Symbol("$");

/// Label for the employee KiwiSaver row; a zero contribution is called out
/// as 0%.
fn kiwi_saver_employee_label(amount: f64) -> &'static str {
    if amount > 0.0 {
        "KiwiSaver (Employee)"
    } else {
        "KiwiSaver (Employee 0%)"
    }
}

fn deduction_rows(data: &PayslipData) -> Vec<AmountRow> {
    vec![
        AmountRow::new("PAYE", data.paye),
        AmountRow::new(
            kiwi_saver_employee_label(data.kiwi_saver_employee),
            data.kiwi_saver_employee,
        ),
        AmountRow::new("Student Loan", data.student_loan).when(Rule::Positive),
        AmountRow::new("Total Deductions", data.total_deductions())
            .emphasized(Emphasis::SectionTotal),
    ]
}

/// Employee and pay-run rows are always shown, even when blank.
fn employee_rows(fields: &[(&str, &String)]) -> Vec<DetailRow> {
    fields
        .iter()
        .map(|(label, value)| DetailRow::new(*label, value.as_str()).with_rule(Rule::Always))
        .collect()
}

pub fn payslip(data: &PayslipData, theme: &Theme) -> RenderedDocument {
    let company = CompanyInfo {
        name: data.company_name.clone(),
        address: data.company_address.clone(),
        ..CompanyInfo::default()
    };

    DocumentModel {
        title: format!("Payslip - {} - {}", data.employee_name, data.pay_period),
        header: Header {
            company: &company,
            kind_label: "PAYSLIP",
            number: data.pay_period.clone(),
            status: None,
        },
        info: [
            InfoPanel::Details {
                rows: employee_rows(&[
                    ("Employee", &data.employee_name),
                    ("Position", &data.employee_position),
                    ("IRD Number", &data.employee_ird_number),
                ]),
                align: Align::Left,
            },
            InfoPanel::Details {
                rows: employee_rows(&[
                    ("Pay Date", &data.pay_date),
                    ("Tax Code", &data.employee_tax_code),
                    ("Bank Account", &data.bank_account),
                ]),
                align: Align::Right,
            },
        ],
        sections: vec![
            Section::Table {
                heading: "Earnings",
                rows: vec![AmountRow::new("Gross Pay", data.gross_pay)],
                money: PAYSLIP_MONEY,
            },
            Section::Table {
                heading: "Deductions",
                rows: deduction_rows(data),
                money: PAYSLIP_MONEY,
            },
            Section::Table {
                heading: "Employer Contributions",
                rows: vec![AmountRow::new("KiwiSaver (Employer)", data.kiwi_saver_employer)],
                money: PAYSLIP_MONEY,
            },
            Section::Totals {
                rows: vec![AmountRow::new("Net Pay", data.net_pay).emphasized(Emphasis::Total)],
                money: PAYSLIP_MONEY,
            },
        ],
        footer: format!("This payslip is for the period {}", data.pay_period),
    }
    .render(theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    #[test]
    fn student_loan_omitted_when_zero() {
        let mut data = samples::payslip();
        data.student_loan = 0.0;
        let doc = payslip(&data, &Theme::default());
        assert!(!doc.html.contains("Student Loan"));
    }

    #[test]
    fn student_loan_included_when_positive() {
        let mut data = samples::payslip();
        data.student_loan = 1234.5;
        let doc = payslip(&data, &Theme::default());
        assert!(doc.html.contains("<td>Student Loan</td>"));
        assert!(doc.html.contains("$1,234.50"));
    }

    #[test]
    fn total_deductions_sum_all_three() {
        let mut data = samples::payslip();
        data.paye = 600.0;
        data.kiwi_saver_employee = 90.0;
        data.student_loan = 120.0;
        let html = payslip(&data, &Theme::default()).html;
        let total = html.find("Total Deductions").unwrap();
        assert!(html[total..].contains("$810.00"));
        assert!(html.contains(r#"<tr class="section-total-row">"#));
    }

    #[test]
    fn zero_kiwi_saver_is_labelled_zero_percent() {
        let mut data = samples::payslip();
        data.kiwi_saver_employee = 0.0;
        let html = payslip(&data, &Theme::default()).html;
        assert!(html.contains("KiwiSaver (Employee 0%)"));
    }

    #[test]
    fn title_names_employee_and_period() {
        let doc = payslip(&samples::payslip(), &Theme::default());
        assert_eq!(doc.title, "Payslip - Jane Doe - 2026-02-01 to 2026-02-14");
        assert!(doc.html.contains("PAYSLIP"));
        assert!(doc.html.contains(r#"<tr class="total-row">"#));
    }

    #[test]
    fn blank_employee_details_keep_their_rows() {
        let mut data = samples::payslip();
        data.employee_position = String::new();
        data.employee_ird_number = String::new();
        data.employee_tax_code = "  ".into();
        data.bank_account = String::new();
        let html = payslip(&data, &Theme::default()).html;
        for label in ["Employee", "Position", "IRD Number", "Pay Date", "Tax Code", "Bank Account"] {
            assert!(
                html.contains(&format!(r#"<div class="info-label">{label}</div>"#)),
                "missing {label}"
            );
        }
    }

    #[test]
    fn payslip_fields_are_escaped() {
        let mut data = samples::payslip();
        data.employee_name = "<script>alert(1)</script>".into();
        let html = payslip(&data, &Theme::default()).html;
        assert!(!html.contains("<script>"));
    }
}
