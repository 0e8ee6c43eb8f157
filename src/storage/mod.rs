//! Storage layer for wallet-cli
//!
//! Provides the wallet (ledger owner) on top of JSON file storage with atomic
//! writes and automatic directory creation.

pub mod file_io;
pub mod wallet;

pub use file_io::{read_json, write_json_atomic};
pub use wallet::{SearchQuery, Wallet};
