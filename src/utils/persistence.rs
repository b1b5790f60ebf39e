//! Encoding of the ledger collections for the key-value backend.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    errors::{LedgerError, Result},
    ledger::{Category, TransactionId, TransactionKind, TransactionRecord},
    storage::KeyValueStore,
};

const BACKUP_SUFFIX: &str = ".corrupt";

/// Serializes a collection as a compact JSON array of records.
pub fn encode_collection(records: &[TransactionRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Loose view of a stored record, accepting the shapes older writers produced.
#[derive(Debug, Deserialize)]
struct StoredRecord {
    id: TransactionId,
    description: String,
    amount: f64,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    timestamp: String,
}

/// A stored collection decoded one record at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedCollection {
    pub records: Vec<TransactionRecord>,
    /// Records kept after a field was normalized.
    pub repaired: Vec<String>,
    /// Entries that could not be kept.
    pub dropped: Vec<String>,
}

impl DecodedCollection {
    pub fn is_clean(&self) -> bool {
        self.repaired.is_empty() && self.dropped.is_empty()
    }
}

/// Parses a stored collection for `kind`.
///
/// Only a value that is not a JSON array fails as a whole. Inside the array a
/// foreign or unknown category becomes [`Category::Other`], a blank date is
/// taken from the timestamp (and vice versa), and entries that still break a
/// record invariant, or repeat an earlier id, are dropped.
pub fn decode_collection(kind: TransactionKind, raw: &str) -> Result<DecodedCollection> {
    let entries: Vec<Value> =
        serde_json::from_str(raw).map_err(|err| LedgerError::CorruptCollection {
            key: kind.storage_key().to_string(),
            reason: err.to_string(),
        })?;

    let mut decoded = DecodedCollection::default();
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let (record, repairs) = match decode_record(kind, entry) {
            Ok(parts) => parts,
            Err(reason) => {
                decoded.dropped.push(format!("entry {index}: {reason}"));
                continue;
            }
        };
        if !seen.insert(record.id) {
            decoded
                .dropped
                .push(format!("entry {index}: duplicate id {}", record.id));
            continue;
        }
        decoded.repaired.extend(
            repairs
                .into_iter()
                .map(|repair| format!("record {}: {repair}", record.id)),
        );
        decoded.records.push(record);
    }
    Ok(decoded)
}

fn decode_record(
    kind: TransactionKind,
    entry: Value,
) -> std::result::Result<(TransactionRecord, Vec<String>), String> {
    let stored: StoredRecord = serde_json::from_value(entry).map_err(|err| err.to_string())?;
    let mut repairs = Vec::new();

    let category = match stored.category.parse::<Category>() {
        Ok(category) if category.belongs_to(kind) => category,
        _ => {
            repairs.push(format!("category `{}` stored as `other`", stored.category));
            Category::Other
        }
    };

    let created_at = DateTime::parse_from_rfc3339(stored.timestamp.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc));
    let date = match (
        NaiveDate::parse_from_str(stored.date.trim(), "%Y-%m-%d").ok(),
        created_at,
    ) {
        (Some(date), _) => date,
        (None, Some(created_at)) => {
            repairs.push("blank date taken from timestamp".to_string());
            created_at.date_naive()
        }
        (None, None) => return Err("no usable date or timestamp".to_string()),
    };
    let created_at = match created_at {
        Some(created_at) => created_at,
        None => {
            repairs.push("blank timestamp taken from date".to_string());
            Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
        }
    };

    let record = TransactionRecord {
        id: stored.id,
        description: stored.description,
        amount: stored.amount,
        category,
        date,
        created_at,
    };
    record.check(kind).map_err(|rejection| rejection.to_string())?;
    Ok((record, repairs))
}

/// Outcome of hydrating one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionLoad {
    /// No value was stored under the key.
    Missing,
    /// The stored value decoded into this many records.
    Loaded(usize),
    /// Some entries were repaired or dropped; `backup` names the key holding the raw value.
    Recovered {
        loaded: usize,
        repaired: Vec<String>,
        dropped: Vec<String>,
        backup: Option<String>,
    },
    /// The stored value was unusable; the collection starts empty.
    Reset {
        reason: String,
        backup: Option<String>,
    },
}

impl CollectionLoad {
    pub fn is_reset(&self) -> bool {
        matches!(self, CollectionLoad::Reset { .. })
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, CollectionLoad::Recovered { .. })
    }
}

/// Per-collection results from [`crate::core::LedgerStore::initialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub expenses: CollectionLoad,
    pub income: CollectionLoad,
}

impl LoadReport {
    pub fn for_kind(&self, kind: TransactionKind) -> &CollectionLoad {
        match kind {
            TransactionKind::Expense => &self.expenses,
            TransactionKind::Income => &self.income,
        }
    }

    /// Human-readable notes for collections that were not loaded verbatim.
    pub fn warnings(&self) -> Vec<String> {
        TransactionKind::ALL
            .iter()
            .filter_map(|kind| {
                let key = kind.storage_key();
                match self.for_kind(*kind) {
                    CollectionLoad::Reset { reason, backup } => Some(format!(
                        "{key} history could not be loaded and was reset: {reason}{}",
                        backup_note(backup)
                    )),
                    CollectionLoad::Recovered {
                        loaded,
                        repaired,
                        dropped,
                        backup,
                    } => Some(format!(
                        "{key} history loaded {loaded} records with {} repaired and {} dropped{}",
                        repaired.len(),
                        dropped.len(),
                        backup_note(backup)
                    )),
                    _ => None,
                }
            })
            .collect()
    }
}

fn backup_note(backup: &Option<String>) -> String {
    match backup {
        Some(key) => format!(" (original kept under `{key}`)"),
        None => String::new(),
    }
}

/// Key that receives the raw value of a collection that did not load verbatim.
pub fn backup_key(kind: TransactionKind) -> String {
    format!("{}{BACKUP_SUFFIX}", kind.storage_key())
}

/// Reads one collection, isolating any failure to that collection.
///
/// When the stored value is not kept verbatim it is copied to
/// [`backup_key`] before the store gets a chance to overwrite it.
pub fn load_collection(
    backend: &mut dyn KeyValueStore,
    kind: TransactionKind,
) -> (Vec<TransactionRecord>, CollectionLoad) {
    let raw = match backend.get(kind.storage_key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (Vec::new(), CollectionLoad::Missing),
        Err(err) => {
            return (
                Vec::new(),
                CollectionLoad::Reset {
                    reason: err.to_string(),
                    backup: None,
                },
            )
        }
    };

    match decode_collection(kind, &raw) {
        Ok(decoded) if decoded.is_clean() => {
            let count = decoded.records.len();
            (decoded.records, CollectionLoad::Loaded(count))
        }
        Ok(decoded) => {
            for note in decoded.repaired.iter().chain(&decoded.dropped) {
                debug!(key = kind.storage_key(), "{note}");
            }
            let backup = back_up_raw(backend, kind, &raw);
            let loaded = decoded.records.len();
            (
                decoded.records,
                CollectionLoad::Recovered {
                    loaded,
                    repaired: decoded.repaired,
                    dropped: decoded.dropped,
                    backup,
                },
            )
        }
        Err(err) => {
            let backup = back_up_raw(backend, kind, &raw);
            (
                Vec::new(),
                CollectionLoad::Reset {
                    reason: err.to_string(),
                    backup,
                },
            )
        }
    }
}

fn back_up_raw(
    backend: &mut dyn KeyValueStore,
    kind: TransactionKind,
    raw: &str,
) -> Option<String> {
    let key = backup_key(kind);
    match backend.set(&key, raw) {
        Ok(()) => Some(key),
        Err(err) => {
            warn!(%key, error = %err, "could not keep the unreadable collection");
            None
        }
    }
}

/// Writes the full contents of one collection under its key.
pub fn save_collection(
    backend: &mut dyn KeyValueStore,
    kind: TransactionKind,
    records: &[TransactionRecord],
) -> Result<()> {
    let encoded = encode_collection(records)?;
    backend.set(kind.storage_key(), &encoded)
}
