//! Display helpers for amounts, records, and category options.

use crate::ledger::{Category, TransactionKind, TransactionRecord};

/// Formats `amount` with two decimals, putting any minus sign before the symbol.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{symbol}{:.2}", amount.abs())
    } else {
        format!("{symbol}{amount:.2}")
    }
}

/// Amount with the sign implied by the record's kind: `-₹4.50` or `+₹1000.00`.
pub fn signed_amount(symbol: &str, kind: TransactionKind, amount: f64) -> String {
    let sign = match kind {
        TransactionKind::Expense => '-',
        TransactionKind::Income => '+',
    };
    format!("{sign}{symbol}{amount:.2}")
}

pub fn record_line(symbol: &str, kind: TransactionKind, record: &TransactionRecord) -> String {
    format!(
        "{} {}  📅 {} • {}  {}  [#{}]",
        record.category.emoji(),
        record.description,
        record.date,
        record.category,
        signed_amount(symbol, kind, record.amount),
        record.id
    )
}

/// Selector entry such as `🍔 Food`.
pub fn category_option(category: Category) -> String {
    format!("{} {}", category.emoji(), category.label())
}

pub fn empty_message(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "No expenses yet",
        TransactionKind::Income => "No income yet",
    }
}

pub fn list_title(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "📉 Recent Expenses",
        TransactionKind::Income => "📈 Recent Income",
    }
}
