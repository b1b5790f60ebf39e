//! Ledger domain models: categories, transaction records, and the aggregate.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{category_emoji, Category, TransactionKind, FALLBACK_EMOJI};
pub use ledger::{BalanceStatus, Ledger, Summary};
pub use transaction::{TransactionDraft, TransactionId, TransactionRecord, ValidationRejection};
