pub mod ledger_store;
pub mod time;
pub mod utils;

pub use ledger_store::{AddOutcome, DeleteOutcome, LedgerStore, PersistenceWarning};
pub use time::{Clock, FixedClock, IdSequence, SystemClock};
