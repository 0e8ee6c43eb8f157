//! Core data models for wallet-cli
//!
//! This module contains the data structures that make up a ledger:
//! transactions, their identifiers, categories and amounts.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::Category;
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{
    format_date, parse_date, Transaction, TransactionEdit, TransactionPatch, DATE_FORMAT,
};
