use super::{
    category::TransactionKind,
    transaction::{TransactionId, TransactionRecord},
};

/// Aggregate root holding the expense and income collections, newest first.
///
/// Totals are always derived from the collections and never cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    expenses: Vec<TransactionRecord>,
    income: Vec<TransactionRecord>,
}

/// Sign of the current balance, used to pick the balance styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Positive,
    Negative,
}

/// Snapshot of the derived aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl Summary {
    pub fn status(&self) -> BalanceStatus {
        if self.balance >= 0.0 {
            BalanceStatus::Positive
        } else {
            BalanceStatus::Negative
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(expenses: Vec<TransactionRecord>, income: Vec<TransactionRecord>) -> Self {
        Self { expenses, income }
    }

    pub fn records(&self, kind: TransactionKind) -> &[TransactionRecord] {
        match kind {
            TransactionKind::Expense => &self.expenses,
            TransactionKind::Income => &self.income,
        }
    }

    pub fn expenses(&self) -> &[TransactionRecord] {
        &self.expenses
    }

    pub fn income(&self) -> &[TransactionRecord] {
        &self.income
    }

    pub fn find(&self, kind: TransactionKind, id: TransactionId) -> Option<&TransactionRecord> {
        self.records(kind).iter().find(|record| record.id == id)
    }

    /// Inserts `record` at the front of `kind`'s collection.
    pub fn prepend(&mut self, kind: TransactionKind, record: TransactionRecord) -> TransactionId {
        let id = record.id;
        self.collection_mut(kind).insert(0, record);
        id
    }

    /// Removes the record with `id` from `kind`'s collection, if present.
    pub fn remove(&mut self, kind: TransactionKind, id: TransactionId) -> Option<TransactionRecord> {
        let collection = self.collection_mut(kind);
        let index = collection.iter().position(|record| record.id == id)?;
        Some(collection.remove(index))
    }

    /// Replaces one collection wholesale, as done during hydration.
    pub fn replace(&mut self, kind: TransactionKind, records: Vec<TransactionRecord>) {
        *self.collection_mut(kind) = records;
    }

    pub fn total(&self, kind: TransactionKind) -> f64 {
        self.records(kind).iter().map(|record| record.amount).sum()
    }

    pub fn total_income(&self) -> f64 {
        self.total(TransactionKind::Income)
    }

    pub fn total_expense(&self) -> f64 {
        self.total(TransactionKind::Expense)
    }

    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    pub fn summary(&self) -> Summary {
        let total_income = self.total_income();
        let total_expense = self.total_expense();
        Summary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Largest id across both collections.
    pub fn max_id(&self) -> Option<TransactionId> {
        self.expenses
            .iter()
            .chain(self.income.iter())
            .map(|record| record.id)
            .max()
    }

    pub fn len(&self) -> usize {
        self.expenses.len() + self.income.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.income.is_empty()
    }

    fn collection_mut(&mut self, kind: TransactionKind) -> &mut Vec<TransactionRecord> {
        match kind {
            TransactionKind::Expense => &mut self.expenses,
            TransactionKind::Income => &mut self.income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Category;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(id: TransactionId, amount: f64, category: Category) -> TransactionRecord {
        TransactionRecord {
            id,
            description: format!("entry {id}"),
            amount,
            category,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn prepend_keeps_newest_first() {
        let mut ledger = Ledger::new();
        ledger.prepend(TransactionKind::Expense, record(1, 2.0, Category::Food));
        ledger.prepend(TransactionKind::Expense, record(2, 3.0, Category::Bills));
        let ids: Vec<_> = ledger.expenses().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(ledger.income().is_empty());
    }

    #[test]
    fn remove_only_touches_selected_kind() {
        let mut ledger = Ledger::new();
        ledger.prepend(TransactionKind::Expense, record(5, 2.0, Category::Food));
        ledger.prepend(TransactionKind::Income, record(5, 9.0, Category::Gift));

        let removed = ledger.remove(TransactionKind::Income, 5).expect("income record");
        assert_eq!(removed.category, Category::Gift);
        assert_eq!(ledger.expenses().len(), 1);
        assert!(ledger.remove(TransactionKind::Income, 5).is_none());
    }

    #[test]
    fn summary_tracks_collections() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.summary().balance, 0.0);
        assert_eq!(ledger.summary().status(), BalanceStatus::Positive);

        ledger.prepend(TransactionKind::Expense, record(1, 40.0, Category::Shopping));
        ledger.prepend(TransactionKind::Income, record(2, 25.0, Category::Freelance));
        let summary = ledger.summary();
        assert_eq!(summary.total_expense, 40.0);
        assert_eq!(summary.total_income, 25.0);
        assert_eq!(summary.balance, -15.0);
        assert_eq!(summary.status(), BalanceStatus::Negative);
        assert_eq!(ledger.max_id(), Some(2));
        assert_eq!(ledger.len(), 2);
    }
}
