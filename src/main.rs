use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use wallet_ledger::application::ledger::Ledger;
use wallet_ledger::config::{DEFAULT_PROGRESS_CHUNK_SIZE, LedgerConfig};
use wallet_ledger::domain::account::{AccountId, Money};
use wallet_ledger::error::LedgerError;
use wallet_ledger::infrastructure::history::FileHistorySink;
use wallet_ledger::infrastructure::snapshot_file::FileSnapshotStore;
use wallet_ledger::interfaces::csv::account_writer::AccountWriter;
use wallet_ledger::interfaces::csv::command_reader::CommandReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payments per worker when streaming progress
    #[arg(
        long,
        global = true,
        env = "LEDGER_PROGRESS_CHUNK_SIZE",
        default_value_t = DEFAULT_PROGRESS_CHUNK_SIZE
    )]
    progress_chunk_size: usize,

    /// Payments per worker for sums (0 or 1 runs a single worker)
    #[arg(long, global = true, env = "LEDGER_WORKERS", default_value_t = 0)]
    workers: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a CSV command script and print the resulting account balances
    Apply {
        /// Command script (type, phone, account, amount, category, reference, name)
        script: PathBuf,

        /// Snapshot directory to import before and export after the run
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
    /// Sum every payment of a snapshot
    Sum {
        #[arg(long)]
        snapshot_dir: PathBuf,

        /// Print one JSON line per worker before the total
        #[arg(long)]
        progress: bool,
    },
    /// Export the payment history of one account, rotating files
    History {
        #[arg(long)]
        snapshot_dir: PathBuf,

        #[arg(long)]
        account: i64,

        /// Directory the history files are written to
        #[arg(long)]
        out: PathBuf,

        /// Maximum number of records per file
        #[arg(long, default_value_t = 100)]
        records: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = LedgerConfig::default()
        .with_progress_chunk_size(cli.progress_chunk_size)
        .with_workers(cli.workers);
    let ledger = Ledger::with_config(config);

    match cli.command {
        Commands::Apply {
            script,
            snapshot_dir,
        } => {
            let store = snapshot_dir.map(FileSnapshotStore::new);
            if let Some(store) = &store {
                ledger.import(store).await.into_diagnostic()?;
            }

            let file = File::open(script).into_diagnostic()?;
            let reader = CommandReader::new(file);
            for command in reader.commands() {
                match command {
                    Ok(command) => match ledger.execute(command).await {
                        Ok(outcome) => debug!(?outcome, "command applied"),
                        Err(e) => warn!("Error processing command: {e}"),
                    },
                    Err(e) => warn!("Error reading command: {e}"),
                }
            }

            if let Some(store) = &store {
                ledger.export(store).await.into_diagnostic()?;
            }

            let stdout = io::stdout();
            let mut writer = AccountWriter::new(stdout.lock());
            writer
                .write_accounts(ledger.accounts().await)
                .into_diagnostic()?;
        }
        Commands::Sum {
            snapshot_dir,
            progress,
        } => {
            ledger
                .import(&FileSnapshotStore::new(snapshot_dir))
                .await
                .into_diagnostic()?;
            let payments = ledger.payments().await.len();

            let total = if progress {
                let mut stream = ledger.sum_payments_with_progress().await;
                let mut total = Some(Money::ZERO);
                while let Some(partial) = stream.recv().await {
                    println!("{}", serde_json::to_string(&partial).into_diagnostic()?);
                    total = total
                        .zip(partial.result)
                        .and_then(|(total, result)| total.checked_add(result).ok());
                }
                total.ok_or(LedgerError::AmountOverflow).into_diagnostic()?
            } else {
                ledger
                    .sum_payments(ledger.config().workers)
                    .await
                    .into_diagnostic()?
            };

            println!(
                "{}",
                serde_json::json!({ "payments": payments, "total": total })
            );
        }
        Commands::History {
            snapshot_dir,
            account,
            out,
            records,
        } => {
            ledger
                .import(&FileSnapshotStore::new(snapshot_dir))
                .await
                .into_diagnostic()?;
            let sink = FileHistorySink::new(out, records);
            let files = ledger
                .write_account_history(AccountId(account), &sink)
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::json!({ "files": files }));
        }
    }

    Ok(())
}
