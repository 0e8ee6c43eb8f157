//! The wallet: the ledger of transactions and its JSON file
//!
//! The whole ledger is read when the wallet is opened and the whole ledger is
//! rewritten after every add or edit. Queries hand back owned snapshots in
//! storage order; a caller that wants to edit one of them passes its id back.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{WalletError, WalletResult};
use crate::models::{Category, Money, Transaction, TransactionEdit, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of the ledger file
#[derive(Debug, Default, Deserialize)]
struct LedgerData {
    transactions: Vec<Transaction>,
}

#[derive(Serialize)]
struct LedgerDataRef<'a> {
    transactions: &'a [Transaction],
}

/// A search over the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Every transaction
    All,
    /// Exact match on the `DD-MM-YYYY` date text
    Date(String),
    /// Transactions of one category
    Category(Category),
    /// Exact match on the amount
    Amount(Money),
}

/// Owns the ledger and its persistence file
#[derive(Debug)]
pub struct Wallet {
    path: PathBuf,
    transactions: Vec<Transaction>,
    audit: Option<AuditLogger>,
}

impl Wallet {
    /// Open the ledger at `path`; a missing file yields an empty ledger
    pub fn open(path: impl Into<PathBuf>) -> WalletResult<Self> {
        let path = path.into();
        let data: LedgerData = read_json(&path)?;

        Ok(Self {
            path,
            transactions: data.transactions,
            audit: None,
        })
    }

    /// Record every successful add and edit in `logger`
    pub fn with_audit_log(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole ledger file
    pub fn persist(&self) -> WalletResult<()> {
        write_json_atomic(
            &self.path,
            &LedgerDataRef {
                transactions: &self.transactions,
            },
        )
    }

    /// Append a transaction dated today and persist
    pub fn add_transaction(
        &mut self,
        category: Category,
        amount: Money,
        description: impl Into<String>,
    ) -> WalletResult<Transaction> {
        let today = Local::now().date_naive();
        self.add_transaction_on(today, category, amount, description)
    }

    /// Append a transaction with an explicit date and persist
    pub fn add_transaction_on(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount: Money,
        description: impl Into<String>,
    ) -> WalletResult<Transaction> {
        let txn = Transaction::new(date, category, amount, description);
        self.transactions.push(txn.clone());

        if let Err(e) = self.persist() {
            self.transactions.pop();
            return Err(e);
        }

        self.audit(&AuditEntry::create(&txn));
        Ok(txn)
    }

    /// Edit the transaction with the given id and persist
    ///
    /// Every non-empty field of `edit` is parsed before anything changes, so
    /// an invalid date, amount or category leaves the ledger and its file
    /// untouched.
    pub fn edit_transaction(
        &mut self,
        id: TransactionId,
        edit: &TransactionEdit,
    ) -> WalletResult<Transaction> {
        let patch = edit.resolve()?;
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| WalletError::transaction_not_found(id.to_string()))?;

        let before = self.transactions[index].clone();
        self.transactions[index].apply(&patch);

        if let Err(e) = self.persist() {
            self.transactions[index] = before;
            return Err(e);
        }

        let after = self.transactions[index].clone();
        if after != before {
            self.audit(&AuditEntry::update(&before, &after));
        }
        Ok(after)
    }

    /// Total income minus total expenses
    pub fn balance(&self) -> Money {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Every transaction in storage order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Transactions whose date text is exactly `date`
    pub fn transactions_by_date(&self, date: &str) -> Vec<Transaction> {
        self.filtered(|t| t.date_string() == date)
    }

    /// Transactions of the given category
    pub fn transactions_by_category(&self, category: Category) -> Vec<Transaction> {
        self.filtered(|t| t.category == category)
    }

    /// Transactions whose amount equals `amount` exactly
    pub fn transactions_by_amount(&self, amount: Money) -> Vec<Transaction> {
        self.filtered(|t| t.amount == amount)
    }

    /// Run a search query
    pub fn search(&self, query: &SearchQuery) -> Vec<Transaction> {
        match query {
            SearchQuery::All => self.transactions(),
            SearchQuery::Date(date) => self.transactions_by_date(date),
            SearchQuery::Category(category) => self.transactions_by_category(category.clone()),
            SearchQuery::Amount(amount) => self.transactions_by_amount(*amount),
        }
    }

    /// Look up a transaction by id
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the ledger has no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn filtered(&self, keep: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| keep(*t))
            .cloned()
            .collect()
    }

    /// The ledger is already saved by the time this runs, so a failed audit
    /// write is reported and the mutation still succeeds.
    fn audit(&self, entry: &AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(entry) {
                eprintln!("Warning: audit log not updated: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_wallet() -> (TempDir, Wallet) {
        let temp_dir = TempDir::new().unwrap();
        let wallet = Wallet::open(temp_dir.path().join("wallet_data.json")).unwrap();
        (temp_dir, wallet)
    }

    /// Salary of 1000 on 01-01-2024 and food for 200 on 02-01-2024
    fn scenario_wallet() -> (TempDir, Wallet) {
        let (temp_dir, mut wallet) = create_test_wallet();
        wallet
            .add_transaction_on(date(1, 1, 2024), Category::Income, Money::from(1000), "salary")
            .unwrap();
        wallet
            .add_transaction_on(date(2, 1, 2024), Category::Expense, Money::from(200), "food")
            .unwrap();
        (temp_dir, wallet)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (_temp_dir, wallet) = create_test_wallet();
        assert!(wallet.is_empty());
        assert_eq!(wallet.balance(), Money::zero());
        assert!(!wallet.path().exists());
    }

    #[test]
    fn test_open_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wallet_data.json");

        fs::write(&path, "not json").unwrap();
        assert!(matches!(Wallet::open(&path), Err(WalletError::Storage(_))));

        fs::write(&path, r#"{"records": []}"#).unwrap();
        assert!(Wallet::open(&path).is_err());

        fs::write(
            &path,
            r#"{"transactions": [{"date": "2024-01-01", "category": "Income", "amount": 1, "description": ""}]}"#,
        )
        .unwrap();
        assert!(Wallet::open(&path).is_err());
    }

    #[test]
    fn test_open_legacy_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wallet_data.json");
        fs::write(
            &path,
            r#"{"transactions": [
                {"date": "01-01-2024", "category": "Доход", "amount": 1000, "description": "Зарплата"},
                {"date": "02-01-2024", "category": "Расход", "amount": 200.5, "description": "Еда"}
            ]}"#,
        )
        .unwrap();

        let wallet = Wallet::open(&path).unwrap();
        assert_eq!(wallet.len(), 2);
        assert_eq!(wallet.balance(), Money::from(dec!(799.5)));
    }

    #[test]
    fn test_open_keeps_unknown_categories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wallet_data.json");
        fs::write(
            &path,
            r#"{"transactions": [
                {"date": "01-01-2024", "category": "доход", "amount": 1000, "description": "Зарплата"},
                {"date": "02-01-2024", "category": "Еда", "amount": 300, "description": "обед"},
                {"date": "03-01-2024", "category": "Расход", "amount": 200, "description": "такси"}
            ]}"#,
        )
        .unwrap();

        let mut wallet = Wallet::open(&path).unwrap();
        assert_eq!(wallet.len(), 3);
        assert_eq!(wallet.balance(), Money::from(800));
        assert_eq!(wallet.transactions_by_category(Category::Expense).len(), 1);

        wallet
            .add_transaction_on(date(4, 1, 2024), Category::Income, Money::from(1), "")
            .unwrap();
        let reopened = Wallet::open(&path).unwrap();
        assert_eq!(
            reopened.transactions()[1].category,
            Category::Other("Еда".to_string())
        );
        assert_eq!(reopened.transactions()[0].category, Category::Income);
    }

    #[test]
    fn test_round_trip() {
        let (temp_dir, wallet) = scenario_wallet();

        let reopened = Wallet::open(temp_dir.path().join("wallet_data.json")).unwrap();
        assert_eq!(reopened.transactions(), wallet.transactions());
    }

    #[test]
    fn test_round_trip_keeps_full_precision() {
        let (temp_dir, mut wallet) = create_test_wallet();
        let amount = Money::parse("1234567890.123456789").unwrap();
        wallet
            .add_transaction_on(date(1, 1, 2024), Category::Income, amount, "bonus")
            .unwrap();

        let reopened = Wallet::open(temp_dir.path().join("wallet_data.json")).unwrap();
        assert_eq!(reopened.transactions(), wallet.transactions());
        assert_eq!(reopened.balance().to_string(), "1234567890.123456789");
    }

    #[test]
    fn test_persisted_shape() {
        let (_temp_dir, wallet) = scenario_wallet();

        let raw = fs::read_to_string(wallet.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "transactions": [
                    {"date": "01-01-2024", "category": "Income", "amount": 1000, "description": "salary"},
                    {"date": "02-01-2024", "category": "Expense", "amount": 200, "description": "food"}
                ]
            })
        );
    }

    #[test]
    fn test_add_is_append_only() {
        let (_temp_dir, mut wallet) = scenario_wallet();
        let before = wallet.transactions();

        let added = wallet
            .add_transaction(Category::Expense, Money::from(dec!(12.5)), "")
            .unwrap();

        let after = wallet.transactions();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().unwrap().id, added.id);
        assert_eq!(added.date, Local::now().date_naive());
    }

    #[test]
    fn test_add_accepts_negative_amount() {
        let (_temp_dir, mut wallet) = create_test_wallet();
        wallet
            .add_transaction(Category::Income, Money::from(-5), "refund")
            .unwrap();
        assert_eq!(wallet.balance(), Money::from(-5));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let (_temp_dir, mut wallet) = create_test_wallet();
        for _ in 0..2 {
            wallet
                .add_transaction_on(date(3, 3, 2024), Category::Expense, Money::from(3), "coffee")
                .unwrap();
        }
        let all = wallet.transactions();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], all[1]);
        assert_ne!(all[0].id, all[1].id);
    }

    #[test]
    fn test_balance() {
        let (_temp_dir, wallet) = scenario_wallet();
        assert_eq!(wallet.balance(), Money::from(800));
    }

    #[test]
    fn test_scenario_edit_amount() {
        let (temp_dir, mut wallet) = scenario_wallet();

        let expenses = wallet.transactions_by_category(Category::Expense);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "food");

        let edit = TransactionEdit::new()
            .date("")
            .category("")
            .amount("250")
            .description("");
        let updated = wallet.edit_transaction(expenses[0].id, &edit).unwrap();

        assert_eq!(updated.amount, Money::from(250));
        assert_eq!(updated.date_string(), "02-01-2024");
        assert_eq!(updated.category, Category::Expense);
        assert_eq!(updated.description, "food");
        assert_eq!(wallet.balance(), Money::from(750));

        let reopened = Wallet::open(temp_dir.path().join("wallet_data.json")).unwrap();
        let all = reopened.transactions();
        assert_eq!(all[0].description, "salary");
        assert_eq!(all[0].amount, Money::from(1000));
        assert_eq!(all[1].amount, Money::from(250));
    }

    #[test]
    fn test_edit_single_field_each() {
        let (_temp_dir, mut wallet) = scenario_wallet();
        let id = wallet.transactions()[1].id;

        let updated = wallet
            .edit_transaction(id, &TransactionEdit::new().date("5-1-2024"))
            .unwrap();
        assert_eq!(updated.date_string(), "05-01-2024");
        assert_eq!(updated.amount, Money::from(200));

        let updated = wallet
            .edit_transaction(id, &TransactionEdit::new().category("income"))
            .unwrap();
        assert_eq!(updated.category, Category::Income);
        assert_eq!(updated.date_string(), "05-01-2024");

        let updated = wallet
            .edit_transaction(id, &TransactionEdit::new().description("groceries"))
            .unwrap();
        assert_eq!(updated.description, "groceries");
        assert_eq!(updated.category, Category::Income);
    }

    #[test]
    fn test_edit_invalid_input_is_atomic() {
        let (_temp_dir, mut wallet) = scenario_wallet();
        let target = wallet.transactions()[1].clone();
        let file_before = fs::read_to_string(wallet.path()).unwrap();

        let bad_date = TransactionEdit::new().date("32-13-2024").amount("999");
        assert!(wallet
            .edit_transaction(target.id, &bad_date)
            .unwrap_err()
            .is_format());

        let bad_amount = TransactionEdit::new()
            .date("10-10-2024")
            .description("changed")
            .amount("12abc");
        assert!(wallet
            .edit_transaction(target.id, &bad_amount)
            .unwrap_err()
            .is_format());

        let bad_category = TransactionEdit::new().amount("1").category("Savings");
        assert!(wallet
            .edit_transaction(target.id, &bad_category)
            .unwrap_err()
            .is_validation());

        let current = wallet.get(target.id).unwrap();
        assert_eq!(current, &target);
        assert_eq!(fs::read_to_string(wallet.path()).unwrap(), file_before);
    }

    #[test]
    fn test_edit_unknown_id() {
        let (_temp_dir, mut wallet) = scenario_wallet();
        let err = wallet
            .edit_transaction(TransactionId::new(), &TransactionEdit::new().amount("1"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_targets_id_after_ledger_grows() {
        let (_temp_dir, mut wallet) = scenario_wallet();
        let food = wallet.transactions_by_category(Category::Expense)[0].clone();

        wallet
            .add_transaction_on(date(3, 1, 2024), Category::Expense, Money::from(50), "taxi")
            .unwrap();
        wallet
            .edit_transaction(food.id, &TransactionEdit::new().amount("210"))
            .unwrap();

        let all = wallet.transactions();
        assert_eq!(all[1].amount, Money::from(210));
        assert_eq!(all[2].amount, Money::from(50));
    }

    #[test]
    fn test_search_by_date_is_exact_text() {
        let (_temp_dir, wallet) = scenario_wallet();

        assert_eq!(wallet.transactions_by_date("01-01-2024").len(), 1);
        assert!(wallet.transactions_by_date("1-1-2024").is_empty());
        assert!(wallet.transactions_by_date("2024-01-01").is_empty());
    }

    #[test]
    fn test_search_by_amount_is_exact() {
        let (_temp_dir, mut wallet) = create_test_wallet();
        let d = date(1, 2, 2024);
        wallet
            .add_transaction_on(d, Category::Expense, Money::from(dec!(5.0)), "a")
            .unwrap();
        wallet
            .add_transaction_on(d, Category::Expense, Money::from(dec!(5.01)), "b")
            .unwrap();
        wallet
            .add_transaction_on(d, Category::Income, Money::from(5), "c")
            .unwrap();

        let found = wallet.transactions_by_amount(Money::from(dec!(5.0)));
        let names: Vec<&str> = found.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_search_dispatch_preserves_order() {
        let (_temp_dir, wallet) = scenario_wallet();

        assert_eq!(wallet.search(&SearchQuery::All).len(), 2);
        assert_eq!(
            wallet.search(&SearchQuery::Category(Category::Income))[0].description,
            "salary"
        );
        assert_eq!(
            wallet.search(&SearchQuery::Date("02-01-2024".into()))[0].description,
            "food"
        );
        assert!(wallet
            .search(&SearchQuery::Amount(Money::from(999)))
            .is_empty());
    }

    #[test]
    fn test_queries_return_snapshots() {
        let (_temp_dir, mut wallet) = scenario_wallet();
        let mut snapshot = wallet.transactions();
        snapshot[0].description = "tampered".into();

        assert_eq!(wallet.transactions()[0].description, "salary");

        let id = snapshot[0].id;
        wallet
            .edit_transaction(id, &TransactionEdit::new().description("bonus"))
            .unwrap();
        assert_eq!(snapshot[0].description, "tampered");
    }

    #[test]
    fn test_persist_failure_rolls_back_add() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        // Parent of the ledger path is a regular file, so the write fails
        let mut wallet = Wallet::open(blocker.join("wallet_data.json")).unwrap();
        let result = wallet.add_transaction(Category::Income, Money::from(1), "");

        assert!(result.is_err());
        assert!(wallet.is_empty());
    }

    #[test]
    fn test_persist_failure_rolls_back_edit() {
        let (_temp_dir, mut wallet) = scenario_wallet();
        let target = wallet.transactions()[1].clone();
        let file_before = fs::read_to_string(wallet.path()).unwrap();

        // A directory where the temp file should go makes the write fail
        let blocker = wallet.path().with_file_name("wallet_data.json.tmp");
        fs::create_dir(&blocker).unwrap();

        let edit = TransactionEdit::new().amount("250").description("dinner");
        assert!(wallet.edit_transaction(target.id, &edit).is_err());

        assert_eq!(wallet.get(target.id).unwrap(), &target);
        assert_eq!(wallet.balance(), Money::from(800));
        assert_eq!(fs::read_to_string(wallet.path()).unwrap(), file_before);
    }

    #[test]
    fn test_audit_failure_does_not_fail_mutation() {
        let temp_dir = TempDir::new().unwrap();
        // The audit log path is a directory, so appending to it fails
        let audit_path = temp_dir.path().join("audit.log");
        fs::create_dir(&audit_path).unwrap();

        let path = temp_dir.path().join("wallet_data.json");
        let mut wallet = Wallet::open(&path)
            .unwrap()
            .with_audit_log(AuditLogger::new(audit_path));

        let txn = wallet
            .add_transaction(Category::Income, Money::from(10), "gift")
            .unwrap();
        let updated = wallet
            .edit_transaction(txn.id, &TransactionEdit::new().amount("12"))
            .unwrap();
        assert_eq!(updated.amount, Money::from(12));

        assert_eq!(wallet.len(), 1);
        assert_eq!(Wallet::open(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_audit_log_records_mutations() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut wallet = Wallet::open(temp_dir.path().join("wallet_data.json"))
            .unwrap()
            .with_audit_log(logger.clone());

        let txn = wallet
            .add_transaction(Category::Expense, Money::from(20), "books")
            .unwrap();
        wallet
            .edit_transaction(txn.id, &TransactionEdit::new().amount("25"))
            .unwrap();
        // No-op edit is persisted but not audited
        wallet
            .edit_transaction(txn.id, &TransactionEdit::new())
            .unwrap();
        let _ = wallet.edit_transaction(txn.id, &TransactionEdit::new().amount("x"));

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("amount: 20 -> 25"));
    }
}
