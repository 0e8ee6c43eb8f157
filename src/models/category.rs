//! Transaction category
//!
//! A ledger entry is either money coming in or money going out. Older ledger
//! files wrote the Russian labels "Доход" and "Расход", in any case; both
//! spellings are accepted on read and from user input, and the English names
//! are written. A stored label that is neither is kept as [`Category::Other`]
//! so the file still opens and the label survives the next write, but user
//! input can never produce one.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::WalletError;

/// Direction of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Money received
    Income,
    /// Money spent
    Expense,
    /// Unrecognized label read from an existing ledger file
    Other(String),
}

impl Category {
    /// Parse a category from user input (case-insensitive)
    pub fn parse(s: &str) -> Result<Self, WalletError> {
        match Self::from_label(s) {
            Self::Other(label) => Err(WalletError::Validation(format!(
                "Unknown category: '{}'. Use Income or Expense",
                label
            ))),
            known => Ok(known),
        }
    }

    fn from_label(s: &str) -> Self {
        let label = s.trim();
        match label.to_lowercase().as_str() {
            "income" | "in" | "доход" => Self::Income,
            "expense" | "out" | "расход" => Self::Expense,
            _ => Self::Other(label.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Other(label) => write!(f, "{}", label),
        }
    }
}

impl FromStr for Category {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}
