//! Row types and the one place conditional rows are decided.
//!
//! Every optional row in every document (a missing Reference, a zero Student
//! Loan, an absent status chip, a blank phone line) carries a [`Rule`]. The
//! fragment builders only ever render what [`retain_included`] lets through.

use crate::format::format_currency;

// ---------------------------------------------------------------------------
// Inclusion rules
// ---------------------------------------------------------------------------

/// When a row is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rule {
    /// Always rendered, even when blank or zero.
    #[default]
    Always,
    /// Text must be non-blank; amounts must be non-zero.
    NonEmpty,
    /// Text must be non-blank; amounts must be strictly positive.
    Positive,
}

impl Rule {
    pub fn admits_text(self, value: &str) -> bool {
        match self {
            Rule::Always => true,
            Rule::NonEmpty | Rule::Positive => !value.trim().is_empty(),
        }
    }

    pub fn admits_amount(self, value: f64) -> bool {
        match self {
            Rule::Always => true,
            Rule::NonEmpty => value != 0.0,
            Rule::Positive => value > 0.0,
        }
    }

    /// Apply the rule to an optional text value, yielding it only when admitted.
    pub fn admit<'a>(self, value: Option<&'a str>) -> Option<&'a str> {
        value.filter(|v| self.admits_text(v))
    }
}

/// Anything that can decide for itself whether it should be rendered.
pub trait Conditional {
    fn included(&self) -> bool;
}

/// Keep only the rows whose rule admits their value, preserving order.
pub fn retain_included<'a, T, I>(rows: I) -> Vec<&'a T>
where
    T: Conditional + 'a,
    I: IntoIterator<Item = &'a T>,
{
    rows.into_iter().filter(|row| row.included()).collect()
}

// ---------------------------------------------------------------------------
// Label / value rows
// ---------------------------------------------------------------------------

/// A label/value pair in an info block. Blank values are dropped by default.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
    pub rule: Rule,
}

impl DetailRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            rule: Rule::NonEmpty,
        }
    }

    /// A row built from an optional value; `None` behaves like a blank value.
    pub fn optional(label: impl Into<String>, value: Option<&str>) -> Self {
        Self::new(label, value.unwrap_or_default())
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }
}

impl Conditional for DetailRow {
    fn included(&self) -> bool {
        self.rule.admits_text(&self.value)
    }
}

// ---------------------------------------------------------------------------
// Amount rows
// ---------------------------------------------------------------------------

/// Visual weight of an amount row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    None,
    /// The grand total (`total-row`).
    Total,
    /// The outstanding balance (`amount-due-row`).
    AmountDue,
    /// A subtotal closing a section table (`section-total-row`).
    SectionTotal,
    /// Caller-supplied class name.
    Custom(String),
}

impl Emphasis {
    pub fn from_class(class: Option<&str>) -> Self {
        match class.map(str::trim) {
            None | Some("") => Emphasis::None,
            Some("total-row") => Emphasis::Total,
            Some("amount-due-row") => Emphasis::AmountDue,
            Some("section-total-row") => Emphasis::SectionTotal,
            Some(other) => Emphasis::Custom(other.to_string()),
        }
    }

    /// The CSS class for this emphasis, if any. Custom classes are returned
    /// raw and must be escaped by the caller.
    pub fn class(&self) -> Option<&str> {
        match self {
            Emphasis::None => None,
            Emphasis::Total => Some("total-row"),
            Emphasis::AmountDue => Some("amount-due-row"),
            Emphasis::SectionTotal => Some("section-total-row"),
            Emphasis::Custom(class) => Some(class.as_str()),
        }
    }
}

/// How amounts in a table are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Money {
    /// Grouped number only: `2,500.00`.
    #[default]
    Plain,
    /// Prefixed with a currency symbol: `$2,500.00`.
    Symbol(&'static str),
}

impl Money {
    pub fn format(self, amount: f64) -> String {
        match self {
            Money::Plain => format_currency(amount),
            Money::Symbol(symbol) => format!("{symbol}{}", format_currency(amount)),
        }
    }
}

/// A labelled amount in a totals block or a section table.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountRow {
    pub label: String,
    pub amount: f64,
    pub emphasis: Emphasis,
    pub rule: Rule,
}

impl AmountRow {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
            emphasis: Emphasis::None,
            rule: Rule::Always,
        }
    }

    pub fn emphasized(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    pub fn when(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }
}

impl Conditional for AmountRow {
    fn included(&self) -> bool {
        self.rule.admits_amount(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_rows_drop_blank_values() {
        let rows = vec![
            DetailRow::new("Invoice Number", "INV-0042"),
            DetailRow::optional("Reference", None),
            DetailRow::new("Currency", "  "),
            DetailRow::new("Date", "2026-02-16"),
        ];
        let kept: Vec<&str> = retain_included(&rows)
            .into_iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(kept, vec!["Invoice Number", "Date"]);
    }

    #[test]
    fn always_rule_keeps_blank_detail() {
        let row = DetailRow::new("Notes", "").with_rule(Rule::Always);
        assert!(row.included());
    }

    #[test]
    fn positive_rule_drops_zero_and_negative_amounts() {
        assert!(!AmountRow::new("Student Loan", 0.0).when(Rule::Positive).included());
        assert!(!AmountRow::new("Student Loan", -1.0).when(Rule::Positive).included());
        assert!(AmountRow::new("Student Loan", 45.5).when(Rule::Positive).included());
    }

    #[test]
    fn amount_rows_are_always_included_by_default() {
        assert!(AmountRow::new("Amount Paid", 0.0).included());
    }

    #[test]
    fn admit_filters_optional_text() {
        assert_eq!(Rule::NonEmpty.admit(Some("paid")), Some("paid"));
        assert_eq!(Rule::NonEmpty.admit(Some("")), None);
        assert_eq!(Rule::NonEmpty.admit(None), None);
    }

    #[test]
    fn emphasis_round_trips_known_classes() {
        assert_eq!(Emphasis::from_class(Some("amount-due-row")), Emphasis::AmountDue);
        assert_eq!(Emphasis::from_class(Some("")), Emphasis::None);
        assert_eq!(
            Emphasis::from_class(Some("highlight")).class(),
            Some("highlight")
        );
    }

    #[test]
    fn money_symbol_prefix() {
        assert_eq!(Money::Plain.format(1104.0), "1,104.00");
        assert_eq!(Money::Symbol("$").format(1104.0), "$1,104.00");
    }
}
