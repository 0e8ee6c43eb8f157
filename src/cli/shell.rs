//! Interactive menu shell
//!
//! A numbered text menu over a [`Wallet`]: balance, add, edit, search, exit.
//! Search results live only as long as the step that asked for them; the edit
//! step runs a search, lets the user pick a number and edits that record by
//! id. End of input ends the session.

use std::io::{BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::display::{format_balance, format_numbered_list, format_transaction_details};
use crate::error::{WalletError, WalletResult};
use crate::models::{Category, Transaction, TransactionEdit};
use crate::storage::{SearchQuery, Wallet};

use super::transaction::parse_amount;

/// What the shell does after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Text-menu front end reading from `R` and writing to `W`
pub struct Shell<'a, R, W> {
    wallet: &'a mut Wallet,
    input: R,
    output: W,
    clear_screen: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Create a shell over `wallet`; screen clearing starts disabled
    pub fn new(wallet: &'a mut Wallet, input: R, output: W) -> Self {
        Self {
            wallet,
            input,
            output,
            clear_screen: false,
        }
    }

    /// Clear the terminal between screens
    pub fn clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    /// Run the main loop until the user exits or input ends
    pub fn run(&mut self) -> WalletResult<()> {
        loop {
            self.main_menu()?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.view_balance()?,
                "2" => self.add_transaction()?,
                "3" => {
                    self.clear()?;
                    self.edit_transaction()?
                }
                "4" => {
                    self.clear()?;
                    self.search_step()?.0
                }
                "5" => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                _ => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number from the menu."
                    )?;
                    continue;
                }
            };

            if flow == Flow::Exit || self.exit_menu()? == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn main_menu(&mut self) -> WalletResult<()> {
        writeln!(self.output, "\nMain menu:")?;
        writeln!(self.output, "1. View balance")?;
        writeln!(self.output, "2. Add transaction")?;
        writeln!(self.output, "3. Edit transaction")?;
        writeln!(self.output, "4. Search transactions")?;
        writeln!(self.output, "5. Exit")?;
        Ok(())
    }

    /// Asked after every completed action
    fn exit_menu(&mut self) -> WalletResult<Flow> {
        loop {
            writeln!(self.output, "\n1. Return to menu")?;
            writeln!(self.output, "2. Exit")?;

            let Some(choice) = self.prompt("Choose an action: ")? else {
                return Ok(Flow::Exit);
            };
            match choice.as_str() {
                "1" => {
                    self.clear()?;
                    return Ok(Flow::Continue);
                }
                "2" => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(Flow::Exit);
                }
                _ => writeln!(
                    self.output,
                    "Invalid choice. Please enter a number from the menu."
                )?,
            }
        }
    }

    fn view_balance(&mut self) -> WalletResult<Flow> {
        let balance = self.wallet.balance();
        writeln!(self.output, "\n{}", format_balance(balance))?;
        Ok(Flow::Continue)
    }

    fn add_transaction(&mut self) -> WalletResult<Flow> {
        writeln!(self.output, "\nNew transaction")?;

        let Some(category) = self.prompt("Category (Income/Expense): ")? else {
            return Ok(Flow::Exit);
        };
        let category = match Category::parse(&category) {
            Ok(category) => category,
            Err(e) => return self.report(e),
        };

        let Some(amount) = self.prompt("Amount: ")? else {
            return Ok(Flow::Exit);
        };
        let amount = match parse_amount(&amount) {
            Ok(amount) => amount,
            Err(e) => return self.report(e),
        };

        let Some(description) = self.prompt("Description: ")? else {
            return Ok(Flow::Exit);
        };

        match self.wallet.add_transaction(category, amount, description) {
            Ok(_) => {
                writeln!(self.output, "Transaction added")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn edit_transaction(&mut self) -> WalletResult<Flow> {
        writeln!(self.output, "\nFind the transaction to edit")?;
        let (flow, results) = self.search_step()?;
        if flow == Flow::Exit {
            return Ok(Flow::Exit);
        }
        if results.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(choice) = self.prompt("\nNumber of the transaction to edit: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(target) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| results.get(i))
        else {
            writeln!(self.output, "No transaction with number '{}'", choice)?;
            return Ok(Flow::Continue);
        };
        write!(self.output, "{}", format_transaction_details(target))?;

        let mut edit = TransactionEdit::new();
        for field in EditField::ALL {
            let Some(value) = self.prompt(field.prompt())? else {
                return Ok(Flow::Exit);
            };
            field.set(&mut edit, value);
        }

        match self.wallet.edit_transaction(target.id, &edit) {
            Ok(updated) => {
                writeln!(self.output, "Transaction updated")?;
                write!(self.output, "{}", format_transaction_details(&updated))?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    /// Ask for a search, print and return the numbered results
    fn search_step(&mut self) -> WalletResult<(Flow, Vec<Transaction>)> {
        writeln!(self.output, "Search by:")?;
        writeln!(self.output, "1. Date")?;
        writeln!(self.output, "2. Category")?;
        writeln!(self.output, "3. Amount")?;
        writeln!(self.output, "4. All transactions")?;

        let Some(choice) = self.prompt("Choice: ")? else {
            return Ok((Flow::Exit, Vec::new()));
        };

        let query = match choice.as_str() {
            "1" => match self.prompt("Date (DD-MM-YYYY): ")? {
                Some(date) => SearchQuery::Date(date),
                None => return Ok((Flow::Exit, Vec::new())),
            },
            "2" => match self.prompt("Category: ")? {
                Some(text) => match Category::parse(&text) {
                    Ok(category) => SearchQuery::Category(category),
                    Err(e) => return Ok((self.report(e)?, Vec::new())),
                },
                None => return Ok((Flow::Exit, Vec::new())),
            },
            "3" => match self.prompt("Amount: ")? {
                Some(text) => match parse_amount(&text) {
                    Ok(amount) => SearchQuery::Amount(amount),
                    Err(e) => return Ok((self.report(e)?, Vec::new())),
                },
                None => return Ok((Flow::Exit, Vec::new())),
            },
            "4" => SearchQuery::All,
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                return Ok((Flow::Continue, Vec::new()));
            }
        };

        let results = self.wallet.search(&query);
        write!(self.output, "{}", format_numbered_list(&results))?;
        Ok((Flow::Continue, results))
    }

    fn report(&mut self, err: WalletError) -> WalletResult<Flow> {
        writeln!(self.output, "Error: {}", err)?;
        Ok(Flow::Continue)
    }

    /// Print `text`, read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> WalletResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn clear(&mut self) -> WalletResult<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

/// The four editable fields, in prompt order
#[derive(Debug, Clone, Copy)]
enum EditField {
    Date,
    Category,
    Amount,
    Description,
}

impl EditField {
    const ALL: [EditField; 4] = [
        EditField::Date,
        EditField::Category,
        EditField::Amount,
        EditField::Description,
    ];

    fn prompt(self) -> &'static str {
        match self {
            EditField::Date => "New date (DD-MM-YYYY, empty to keep): ",
            EditField::Category => "New category (Income/Expense, empty to keep): ",
            EditField::Amount => "New amount (empty to keep): ",
            EditField::Description => "New description (empty to keep): ",
        }
    }

    fn set(self, edit: &mut TransactionEdit, value: String) {
        match self {
            EditField::Date => edit.date = Some(value),
            EditField::Category => edit.category = Some(value),
            EditField::Amount => edit.amount = Some(value),
            EditField::Description => edit.description = Some(value),
        }
    }
}
