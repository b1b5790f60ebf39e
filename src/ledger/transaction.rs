use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::{Category, TransactionKind};

/// Identifier assigned at insertion; unique within its collection.
pub type TransactionId = u64;

/// A single recorded income or expense event.
///
/// Field names on the wire are `id, description, amount, category, date,
/// timestamp`; `timestamp` carries [`TransactionRecord::created_at`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(rename = "timestamp", with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Checks the stored-record invariants for a member of `kind`'s collection.
    pub fn check(&self, kind: TransactionKind) -> Result<(), ValidationRejection> {
        check_description(&self.description)?;
        check_amount(self.amount)?;
        if !self.category.belongs_to(kind) {
            return Err(ValidationRejection::CategoryKindMismatch {
                category: self.category,
                kind,
            });
        }
        Ok(())
    }
}

/// Reason an attempted insert was declined.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationRejection {
    #[error("description is empty")]
    EmptyDescription,
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(f64),
    #[error("amount is not a finite number")]
    InvalidAmount,
    #[error("{0}")]
    UnknownCategory(String),
    #[error("category `{category}` is not available for {kind} entries")]
    CategoryKindMismatch {
        category: Category,
        kind: TransactionKind,
    },
}

/// Validated user input, ready to be stamped with an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    /// Validates raw input for `kind`. The description is stored trimmed.
    pub fn parse(
        kind: TransactionKind,
        description: &str,
        amount: f64,
        category: &str,
        date: Option<NaiveDate>,
    ) -> Result<Self, ValidationRejection> {
        let description = description.trim();
        check_description(description)?;
        check_amount(amount)?;
        let category: Category = category
            .parse()
            .map_err(ValidationRejection::UnknownCategory)?;
        if !category.belongs_to(kind) {
            return Err(ValidationRejection::CategoryKindMismatch { category, kind });
        }
        Ok(Self {
            description: description.to_string(),
            amount,
            category,
            date,
        })
    }

    pub fn into_record(self, id: TransactionId, created_at: DateTime<Utc>) -> TransactionRecord {
        TransactionRecord {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date.unwrap_or_else(|| created_at.date_naive()),
            created_at,
        }
    }
}

fn check_description(description: &str) -> Result<(), ValidationRejection> {
    if description.trim().is_empty() {
        Err(ValidationRejection::EmptyDescription)
    } else {
        Ok(())
    }
}

fn check_amount(amount: f64) -> Result<(), ValidationRejection> {
    if !amount.is_finite() {
        Err(ValidationRejection::InvalidAmount)
    } else if amount <= 0.0 {
        Err(ValidationRejection::NonPositiveAmount(amount))
    } else {
        Ok(())
    }
}

/// ISO-8601 instants with millisecond precision, e.g. `2024-01-01T09:30:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
