//! Transaction CLI commands
//!
//! Implements the one-shot commands: balance, add, list and edit.

use clap::{Args, Subcommand};

use crate::display::{format_balance, format_transaction_details, format_transaction_table};
use crate::error::{WalletError, WalletResult};
use crate::models::{Category, Money, TransactionEdit};
use crate::storage::{SearchQuery, Wallet};

/// Search filters shared by `list` and `edit`; at most one may be given
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct SearchArgs {
    /// Only transactions on this date (DD-MM-YYYY, exact match)
    #[arg(long)]
    pub date: Option<String>,
    /// Only transactions of this category (income or expense)
    #[arg(long)]
    pub category: Option<String>,
    /// Only transactions with exactly this amount
    #[arg(long, allow_negative_numbers = true)]
    pub amount: Option<String>,
}

impl SearchArgs {
    /// Turn the filters into a search query
    pub fn to_query(&self) -> WalletResult<SearchQuery> {
        if let Some(date) = &self.date {
            return Ok(SearchQuery::Date(date.trim().to_string()));
        }
        if let Some(category) = &self.category {
            return Ok(SearchQuery::Category(Category::parse(category)?));
        }
        if let Some(amount) = &self.amount {
            return parse_amount(amount).map(SearchQuery::Amount);
        }
        Ok(SearchQuery::All)
    }
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Show the current balance (income minus expenses)
    Balance,

    /// Add a transaction dated today
    Add {
        /// Category: income or expense
        category: String,
        /// Amount (e.g., "12.50")
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List transactions, numbered from 1
    #[command(alias = "search")]
    List {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Edit the N-th transaction of a listing
    Edit {
        /// Number shown by `list` with the same filter
        index: usize,
        #[command(flatten)]
        search: SearchArgs,
        /// New date (DD-MM-YYYY)
        #[arg(long)]
        set_date: Option<String>,
        /// New category
        #[arg(long)]
        set_category: Option<String>,
        /// New amount
        #[arg(long, allow_negative_numbers = true)]
        set_amount: Option<String>,
        /// New description
        #[arg(long)]
        set_description: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    wallet: &mut Wallet,
    cmd: TransactionCommands,
) -> WalletResult<()> {
    match cmd {
        TransactionCommands::Balance => {
            println!("{}", format_balance(wallet.balance()));
        }

        TransactionCommands::Add {
            category,
            amount,
            description,
        } => {
            let category = Category::parse(&category)?;
            let amount = parse_amount(&amount)?;

            let txn = wallet.add_transaction(category, amount, description)?;

            println!("Added transaction:");
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::List { search } => {
            let results = wallet.search(&search.to_query()?);
            print!("{}", format_transaction_table(&results));
            println!("\nShowing {} transactions", results.len());
        }

        TransactionCommands::Edit {
            index,
            search,
            set_date,
            set_category,
            set_amount,
            set_description,
        } => {
            let results = wallet.search(&search.to_query()?);
            let target = index
                .checked_sub(1)
                .and_then(|i| results.get(i))
                .ok_or_else(|| {
                    WalletError::Validation(format!(
                        "No transaction #{} in a listing of {}",
                        index,
                        results.len()
                    ))
                })?;

            let edit = TransactionEdit {
                date: set_date,
                category: set_category,
                amount: set_amount,
                description: set_description,
            };
            let updated = wallet.edit_transaction(target.id, &edit)?;

            println!("Updated transaction:");
            print!("{}", format_transaction_details(&updated));
        }
    }

    Ok(())
}

/// Parse an amount typed by the user
pub fn parse_amount(text: &str) -> WalletResult<Money> {
    Money::parse(text).map_err(|e| WalletError::Format(e.to_string()))
}
