//! Column format rules
//!
//! A column's cell format is picked from its header alone. Rules are checked
//! top-down against the lowercased header and the first rule with a keyword
//! contained in it wins.
//!
//! | Keywords                                     | Format              |
//! |----------------------------------------------|---------------------|
//! | id, no, code, iban, account                  | Text (`@`)          |
//! | amount, charge, price, rate, cost, total     | Money (`#,##0.00`)  |
//! | anything else                                | Plain               |

/// How a column's cells are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Cells written as text so identifiers keep leading zeros
    Text,
    /// Two-decimal numeric format
    Money,
    /// Width only
    Plain,
}

/// One row of the rule table
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub keywords: &'static [&'static str],
    pub kind: FormatKind,
}

impl ColumnRule {
    /// Whether any keyword occurs in an already lowercased header
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Rule table, highest priority first
pub const COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule {
        keywords: &["id", "no", "code", "iban", "account"],
        kind: FormatKind::Text,
    },
    ColumnRule {
        keywords: &["amount", "charge", "price", "rate", "cost", "total"],
        kind: FormatKind::Money,
    },
];

/// Classify a column header using `COLUMN_RULES`
pub fn classify_column(header: &str) -> FormatKind {
    classify_with(COLUMN_RULES, header)
}

/// Classify against a custom rule table
pub fn classify_with(rules: &[ColumnRule], header: &str) -> FormatKind {
    let lowered = header.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.kind)
        .unwrap_or(FormatKind::Plain)
}
