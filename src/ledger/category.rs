//! Closed category enumeration and the kind discriminator that constrains it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Glyph shown for categories that have no dedicated emoji.
pub const FALLBACK_EMOJI: &str = "📦";

/// Selects which collection a record lives in and which categories it may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Expense, TransactionKind::Income];

    /// Persistence key holding this kind's collection.
    pub fn storage_key(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expenses",
            TransactionKind::Income => "income",
        }
    }

    /// Categories a record of this kind may carry, in selector order.
    pub fn categories(self) -> &'static [Category] {
        match self {
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
            TransactionKind::Income => &INCOME_CATEGORIES,
        }
    }

    /// Category preselected for a fresh entry form.
    pub fn default_category(self) -> Category {
        match self {
            TransactionKind::Expense => Category::Food,
            TransactionKind::Income => Category::Salary,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            other => Err(format!("unknown transaction kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Salary,
    Freelance,
    Investment,
    Gift,
    Other,
}

const EXPENSE_CATEGORIES: [Category; 6] = [
    Category::Food,
    Category::Transport,
    Category::Shopping,
    Category::Bills,
    Category::Entertainment,
    Category::Other,
];

const INCOME_CATEGORIES: [Category; 5] = [
    Category::Salary,
    Category::Freelance,
    Category::Investment,
    Category::Gift,
    Category::Other,
];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Bills => "bills",
            Category::Entertainment => "entertainment",
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Gift => "gift",
            Category::Other => "other",
        }
    }

    /// Capitalized name used in selectors, e.g. `Food`.
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Shopping => "🛍️",
            Category::Bills => "📄",
            Category::Entertainment => "🎬",
            Category::Salary => "💰",
            Category::Freelance => "💼",
            Category::Investment => "📈",
            Category::Gift => "🎁",
            Category::Other => FALLBACK_EMOJI,
        }
    }

    /// Returns `true` when records of `kind` may use this category.
    pub fn belongs_to(self, kind: TransactionKind) -> bool {
        kind.categories().contains(&self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| format!("unknown category `{}`", value.trim()))
    }
}

const ALL_CATEGORIES: [Category; 10] = [
    Category::Food,
    Category::Transport,
    Category::Shopping,
    Category::Bills,
    Category::Entertainment,
    Category::Salary,
    Category::Freelance,
    Category::Investment,
    Category::Gift,
    Category::Other,
];

/// Maps a stored category name to its glyph. Only exact lowercase names match;
/// anything else gets [`FALLBACK_EMOJI`].
pub fn category_emoji(name: &str) -> &'static str {
    ALL_CATEGORIES
        .iter()
        .find(|category| category.as_str() == name)
        .map_or(FALLBACK_EMOJI, |category| category.emoji())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_belongs_to_at_least_one_kind() {
        for category in ALL_CATEGORIES {
            assert!(
                TransactionKind::ALL
                    .iter()
                    .any(|kind| category.belongs_to(*kind)),
                "{category} is orphaned"
            );
        }
    }

    #[test]
    fn other_is_shared_between_kinds() {
        assert!(Category::Other.belongs_to(TransactionKind::Expense));
        assert!(Category::Other.belongs_to(TransactionKind::Income));
        assert!(!Category::Salary.belongs_to(TransactionKind::Expense));
        assert!(!Category::Food.belongs_to(TransactionKind::Income));
    }

    #[test]
    fn emoji_lookup_falls_back_for_unknown_names() {
        assert_eq!(category_emoji("food"), "🍔");
        assert_eq!(category_emoji("salary"), "💰");
        assert_eq!(category_emoji(" Salary "), FALLBACK_EMOJI);
        assert_eq!(category_emoji("Food"), FALLBACK_EMOJI);
        assert_eq!(category_emoji("groceries"), FALLBACK_EMOJI);
        assert_eq!(category_emoji(""), FALLBACK_EMOJI);
    }

    #[test]
    fn labels_capitalize_first_letter() {
        assert_eq!(Category::Entertainment.label(), "Entertainment");
        assert_eq!(Category::Gift.label(), "Gift");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Investment).unwrap();
        assert_eq!(json, "\"investment\"");
        let parsed: Category = serde_json::from_str("\"bills\"").unwrap();
        assert_eq!(parsed, Category::Bills);
        assert!(serde_json::from_str::<Category>("\"Bills\"").is_err());
    }

    #[test]
    fn kind_keys_match_storage_layout() {
        assert_eq!(TransactionKind::Expense.storage_key(), "expenses");
        assert_eq!(TransactionKind::Income.storage_key(), "income");
        assert_eq!(TransactionKind::Income.default_category(), Category::Salary);
    }
}
