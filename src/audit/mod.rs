//! Audit logging for wallet-cli
//!
//! Records every add and edit with before/after values in an append-only
//! JSON-lines log next to the ledger configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::create(&txn))?;
//! logger.log(&AuditEntry::update(&before, &after))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
