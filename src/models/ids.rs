//! Transaction identifiers
//!
//! Ledger records carry no key of their own, so every record loaded or added
//! during a session is tagged with a random id. Edits target that id instead
//! of a position that may shift between a search and the edit that follows it.

use std::fmt;
use uuid::Uuid;

/// Session-scoped identifier of a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    const DISPLAY_PREFIX: &'static str = "txn-";

    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::DISPLAY_PREFIX, &self.0.to_string()[..8])
    }
}
