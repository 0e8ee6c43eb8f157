//! Display formatting for terminal output

pub mod transaction;

pub use transaction::{
    format_balance, format_numbered_list, format_transaction_details, format_transaction_table,
};
