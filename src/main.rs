use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use wallet::audit::AuditLogger;
use wallet::cli::{handle_transaction_command, Shell, TransactionCommands};
use wallet::config::{paths::WalletPaths, settings::Settings};
use wallet::storage::Wallet;

#[derive(Parser)]
#[command(
    name = "wallet",
    version,
    about = "Personal finance ledger for the terminal",
    long_about = "wallet records income and expense transactions in a JSON file, \
                  shows the balance, and lets you search and edit past entries. \
                  Run without a command to open the interactive menu."
)]
struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(short, long, global = true, env = "WALLET_CLI_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Launch the interactive menu
    #[command(alias = "ui")]
    Menu,

    /// Show recent audit log entries
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths, or change settings
    Config {
        /// Turn the audit log on or off
        #[arg(long, value_name = "BOOL")]
        audit: Option<bool>,
        /// Turn screen clearing in the interactive menu on or off
        #[arg(long, value_name = "BOOL")]
        clear_screen: Option<bool>,
        /// Ledger file to use by default
        #[arg(long, value_name = "PATH")]
        data_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = WalletPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    if let Some(Commands::Config {
        audit,
        clear_screen,
        data_file,
    }) = &cli.command
    {
        if audit.is_some() || clear_screen.is_some() || data_file.is_some() {
            if let Some(enabled) = audit {
                settings.audit_enabled = *enabled;
            }
            if let Some(enabled) = clear_screen {
                settings.clear_screen = *enabled;
            }
            if let Some(path) = data_file {
                settings.data_file = Some(path.clone());
            }
            settings.save(&paths)?;
            println!("Settings saved to {}", paths.settings_file().display());
        }
    }

    let data_file = settings.resolve_data_file(&paths, cli.file);

    match cli.command {
        Some(Commands::Log { count }) => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(count)?;
            if entries.is_empty() {
                println!("Audit log is empty.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config { .. }) => {
            println!("wallet configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", data_file.display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit log enabled: {}", settings.audit_enabled);
            println!("  Clear screen:      {}", settings.clear_screen);
        }
        command => {
            let mut wallet = Wallet::open(&data_file)?;
            if settings.audit_enabled {
                wallet = wallet.with_audit_log(AuditLogger::new(paths.audit_log()));
            }

            match command {
                Some(Commands::Transaction(cmd)) => handle_transaction_command(&mut wallet, cmd)?,
                _ => {
                    let stdin = io::stdin();
                    let stdout = io::stdout();
                    let clear = settings.clear_screen && stdout.is_terminal();
                    Shell::new(&mut wallet, stdin.lock(), stdout.lock())
                        .clear_screen(clear)
                        .run()?;
                }
            }
        }
    }

    Ok(())
}
