use std::fmt;

use chrono::{NaiveDate, SubsecRound};
use tracing::{debug, info, warn};

use crate::errors::LedgerError;
use crate::ledger::{
    category_emoji, Category, Ledger, Summary, TransactionDraft, TransactionId, TransactionKind,
    TransactionRecord, ValidationRejection,
};
use crate::storage::KeyValueStore;
use crate::utils::persistence::{load_collection, save_collection, LoadReport};

use super::time::{Clock, IdSequence, SystemClock};

/// A write that failed after the in-memory ledger was already updated.
#[derive(Debug)]
pub struct PersistenceWarning {
    pub key: &'static str,
    pub error: LedgerError,
}

impl fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not save `{}`: {}", self.key, self.error)
    }
}

#[derive(Debug)]
pub enum AddOutcome {
    Added {
        id: TransactionId,
        warning: Option<PersistenceWarning>,
    },
    Rejected(ValidationRejection),
}

impl AddOutcome {
    pub fn id(&self) -> Option<TransactionId> {
        match self {
            AddOutcome::Added { id, .. } => Some(*id),
            AddOutcome::Rejected(_) => None,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Removed {
        record: TransactionRecord,
        warning: Option<PersistenceWarning>,
    },
    NotFound,
}

impl DeleteOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, DeleteOutcome::Removed { .. })
    }
}

/// Owns the ledger for a session and writes every mutation through to the backend.
pub struct LedgerStore {
    ledger: Ledger,
    backend: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ids: IdSequence,
}

impl LedgerStore {
    /// Creates an empty store over `backend`; call [`LedgerStore::initialize`] to hydrate.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_clock(backend, Box::new(SystemClock))
    }

    pub fn with_clock(backend: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            ledger: Ledger::new(),
            backend,
            clock,
            ids: IdSequence::new(),
        }
    }

    /// Creates a store and hydrates it in one step.
    pub fn open(backend: Box<dyn KeyValueStore>) -> (Self, LoadReport) {
        let mut store = Self::new(backend);
        let report = store.initialize();
        (store, report)
    }

    /// Loads both collections from the backend.
    ///
    /// Each collection is loaded independently: a missing key yields an empty
    /// collection, invalid entries are repaired or dropped one by one, and a
    /// value that is not a record array resets only that collection. Values not
    /// kept verbatim are copied under their backup key first.
    pub fn initialize(&mut self) -> LoadReport {
        let (expenses, expense_load) =
            load_collection(self.backend.as_mut(), TransactionKind::Expense);
        let (income, income_load) = load_collection(self.backend.as_mut(), TransactionKind::Income);

        self.ledger = Ledger::from_parts(expenses, income);
        if let Some(max) = self.ledger.max_id() {
            self.ids.observe(max);
        }

        let report = LoadReport {
            expenses: expense_load,
            income: income_load,
        };
        for message in report.warnings() {
            warn!("{message}");
        }
        info!(
            expenses = self.ledger.expenses().len(),
            income = self.ledger.income().len(),
            "ledger initialized"
        );
        report
    }

    /// Validates and prepends a new record, then saves its collection.
    ///
    /// Invalid input leaves the ledger and the backend untouched.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        description: &str,
        amount: f64,
        category: &str,
        date: Option<NaiveDate>,
    ) -> AddOutcome {
        let draft = match TransactionDraft::parse(kind, description, amount, category, date) {
            Ok(draft) => draft,
            Err(rejection) => {
                debug!(%kind, %rejection, "add rejected");
                return AddOutcome::Rejected(rejection);
            }
        };

        let now = self.clock.now().trunc_subsecs(3);
        let id = self.ids.next(now);
        self.ledger.prepend(kind, draft.into_record(id, now));
        debug!(%kind, id, "transaction added");

        AddOutcome::Added {
            id,
            warning: self.persist(kind),
        }
    }

    /// Removes the record `id` from `kind`'s collection. Unknown ids are a no-op.
    pub fn delete_transaction(&mut self, id: TransactionId, kind: TransactionKind) -> DeleteOutcome {
        match self.ledger.remove(kind, id) {
            Some(record) => {
                debug!(%kind, id, "transaction deleted");
                DeleteOutcome::Removed {
                    record,
                    warning: self.persist(kind),
                }
            }
            None => DeleteOutcome::NotFound,
        }
    }

    pub fn total_income(&self) -> f64 {
        self.ledger.total_income()
    }

    pub fn total_expense(&self) -> f64 {
        self.ledger.total_expense()
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn summary(&self) -> Summary {
        self.ledger.summary()
    }

    pub fn category_emoji(category: &str) -> &'static str {
        category_emoji(category)
    }

    pub fn categories(kind: TransactionKind) -> &'static [Category] {
        kind.categories()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn expenses(&self) -> &[TransactionRecord] {
        self.ledger.expenses()
    }

    pub fn income(&self) -> &[TransactionRecord] {
        self.ledger.income()
    }

    pub fn records(&self, kind: TransactionKind) -> &[TransactionRecord] {
        self.ledger.records(kind)
    }

    pub fn find(&self, kind: TransactionKind, id: TransactionId) -> Option<&TransactionRecord> {
        self.ledger.find(kind, id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    pub fn into_backend(self) -> Box<dyn KeyValueStore> {
        self.backend
    }

    fn persist(&mut self, kind: TransactionKind) -> Option<PersistenceWarning> {
        let result = save_collection(self.backend.as_mut(), kind, self.ledger.records(kind));
        match result {
            Ok(()) => None,
            Err(error) => {
                let warning = PersistenceWarning {
                    key: kind.storage_key(),
                    error,
                };
                warn!("{warning}");
                Some(warning)
            }
        }
    }
}
