//! Transaction model
//!
//! Represents one dated ledger entry. Dates are stored and displayed in the
//! `DD-MM-YYYY` form; edits arrive as raw text and are parsed as a whole
//! before any field is touched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;
use crate::error::{WalletError, WalletResult};

/// Canonical date format used in storage and display
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a `DD-MM-YYYY` date
pub fn parse_date(s: &str) -> WalletResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        WalletError::Format(format!("Invalid date: '{}'. Use DD-MM-YYYY", s.trim()))
    })
}

/// Format a date in the canonical `DD-MM-YYYY` form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

mod canonical_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, super::DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Session identifier, never written to the ledger file
    #[serde(skip)]
    pub id: TransactionId,

    /// Transaction date
    #[serde(with = "canonical_date")]
    pub date: NaiveDate,

    /// Income or expense
    pub category: Category,

    /// Amount, non-negative by convention
    pub amount: Money,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            category,
            amount,
            description: description.into(),
        }
    }

    /// The date in canonical `DD-MM-YYYY` form
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }

    /// Amount with the sign it contributes to the balance; labels other than
    /// income and expense contribute nothing
    pub fn signed_amount(&self) -> Money {
        match self.category {
            Category::Income => self.amount,
            Category::Expense => -self.amount,
            Category::Other(_) => Money::zero(),
        }
    }

    /// Apply a parsed edit; fields left as `None` keep their value
    pub fn apply(&mut self, patch: &TransactionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

/// Two transactions are equal when their recorded fields match; the session
/// id plays no part.
impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.category == other.category
            && self.amount == other.amount
            && self.description == other.description
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date_string(),
            self.category,
            self.amount,
            self.description
        )
    }
}

/// Raw edit input as typed by the user
///
/// Empty or whitespace-only text means "keep the current value".
#[derive(Debug, Clone, Default)]
pub struct TransactionEdit {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
}

impl TransactionEdit {
    /// Create an empty edit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new date text
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the new category text
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the new amount text
    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Set the new description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse every provided field, failing on the first invalid one
    pub fn resolve(&self) -> WalletResult<TransactionPatch> {
        let date = provided(&self.date).map(parse_date).transpose()?;

        let category = provided(&self.category).map(Category::parse).transpose()?;

        let amount = provided(&self.amount)
            .map(|s| Money::parse(s).map_err(|e| WalletError::Format(e.to_string())))
            .transpose()?;

        let description = provided(&self.description).map(str::to_string);

        Ok(TransactionPatch {
            date,
            category,
            amount,
            description,
        })
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Fully parsed edit, ready to apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub amount: Option<Money>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn food() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            Category::Expense,
            Money::from(200),
            "food",
        )
    }

    #[test]
    fn test_parse_date_canonicalizes() {
        let date = parse_date("2-1-2024").unwrap();
        assert_eq!(format_date(date), "02-01-2024");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-01-02").unwrap_err().is_format());
        assert!(parse_date("31-02-2024").unwrap_err().is_format());
        assert!(parse_date("yesterday").unwrap_err().is_format());
    }

    #[test]
    fn test_signed_amount() {
        let txn = food();
        assert_eq!(txn.signed_amount(), Money::from(-200));
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(food()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "02-01-2024",
                "category": "Expense",
                "amount": 200,
                "description": "food"
            })
        );
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let json = r#"{"date": "01-01-2024", "category": "Доход", "amount": 1000, "description": "salary"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.category, Category::Income);
        assert_eq!(txn.amount, Money::from(1000));
        assert_eq!(txn.date_string(), "01-01-2024");
    }

    #[test]
    fn test_equality_ignores_id() {
        let a = food();
        let b = food();
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_edit_resolve_skips_blank_fields() {
        let patch = TransactionEdit::new()
            .date("")
            .category("   ")
            .amount("250")
            .resolve()
            .unwrap();

        assert_eq!(
            patch,
            TransactionPatch {
                amount: Some(Money::from(250)),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_edit_resolve_reports_bad_amount() {
        let err = TransactionEdit::new()
            .date("05-05-2024")
            .amount("lots")
            .resolve()
            .unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_apply_only_touches_patched_fields() {
        let mut txn = food();
        let before = txn.clone();

        txn.apply(&TransactionPatch {
            amount: Some(Money::from(dec!(250.75))),
            ..Default::default()
        });

        assert_eq!(txn.amount, Money::from(dec!(250.75)));
        assert_eq!(txn.date, before.date);
        assert_eq!(txn.category, before.category);
        assert_eq!(txn.description, before.description);
        assert_eq!(txn.id, before.id);
    }

    #[test]
    fn test_empty_edit_resolves_to_default_patch() {
        assert_eq!(
            TransactionEdit::new().resolve().unwrap(),
            TransactionPatch::default()
        );
    }

    #[test]
    fn test_other_category_is_left_out_of_balance() {
        let json = r#"{"date": "03-01-2024", "category": "Еда", "amount": 40}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.category, Category::Other("Еда".to_string()));
        assert_eq!(txn.signed_amount(), Money::zero());
        assert_eq!(txn.description, "");
    }
}
