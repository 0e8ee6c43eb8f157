//! wallet-cli - personal finance ledger for the terminal
//!
//! Records income and expense transactions in a JSON file and answers
//! balance and search queries over them.
//!
//! # Architecture
//!
//! - `config`: Data directory and settings management
//! - `error`: Custom error types
//! - `models`: Transactions, categories, amounts and ids
//! - `storage`: The wallet (ledger owner) and atomic JSON file I/O
//! - `audit`: Append-only log of every add and edit
//! - `display`: Text formatting for terminal output
//! - `cli`: Command handlers and the interactive menu shell
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet::models::{Category, Money, TransactionEdit};
//! use wallet::storage::Wallet;
//!
//! let mut wallet = Wallet::open("wallet_data.json")?;
//! wallet.add_transaction(Category::Expense, Money::from(200), "food")?;
//!
//! let food = &wallet.transactions_by_category(Category::Expense)[0];
//! wallet.edit_transaction(food.id, &TransactionEdit::new().amount("250"))?;
//! println!("{}", wallet.balance());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{WalletError, WalletResult};
