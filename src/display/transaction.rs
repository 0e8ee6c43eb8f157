//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display:
//! detail blocks for the interactive shell and tables for the CLI.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Money, Transaction};

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Date:        {}\n", txn.date_string()));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Description: {}\n", txn.description));

    output
}

/// Format search results as numbered detail blocks, starting at 1
pub fn format_numbered_list(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    for (i, txn) in transactions.iter().enumerate() {
        output.push_str(&format!("{})\n", i + 1));
        output.push_str(&format_transaction_details(txn));
    }
    output
}

/// Format search results as a numbered table, starting at 1
pub fn format_transaction_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().enumerate().map(|(i, txn)| TransactionRow {
        index: i + 1,
        date: txn.date_string(),
        category: txn.category.to_string(),
        amount: txn.amount.to_string(),
        description: truncate(&txn.description, DESCRIPTION_WIDTH),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format the wallet balance
pub fn format_balance(balance: Money) -> String {
    format!("Current balance: {}", balance)
}

/// Truncate a string to at most `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
