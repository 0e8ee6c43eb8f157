//! CLI command handlers
//!
//! This module bridges the clap argument parsing and the interactive menu
//! with the wallet.

pub mod shell;
pub mod transaction;

pub use shell::Shell;
pub use transaction::{handle_transaction_command, SearchArgs, TransactionCommands};
