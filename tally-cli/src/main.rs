use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use tally_core::{Summary, TransactionRecord, top_spending};
use tally_ingest::{BatchStatus, Extractor, PageSource, extract_batch, open_document};
use tally_ledger::LedgerStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Bank statements in, one CSV ledger out")]
struct Cli {
    /// Ledger CSV to use instead of the configured one
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug); TALLY_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from statements (PDF or text) and append them
    Import {
        /// Bank name recorded as the source of every extracted row
        #[arg(long)]
        source: String,

        /// Statement files, processed in the order given
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Append one manually entered transaction
    Add {
        /// Transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        #[arg(long, default_value = "")]
        description: String,

        /// Negative for spending, positive for income
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
    },

    /// Print every transaction in ledger order
    List,

    /// Income, spending, and the descriptions with the most spending
    Summary {
        /// Number of top spending descriptions (default from config: 5)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Write the ledger as CSV to stdout or a file
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a default ~/.tally/config.toml
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = config::load_config(cli.ledger.is_some())?;
    let store = LedgerStore::new(cfg.ledger_path(cli.ledger)?);
    info!(ledger = %store.path().display(), "using ledger");

    match cli.command {
        Command::Import { source, files } => import(&store, &source, &files)?,

        Command::Add {
            date,
            description,
            amount,
        } => {
            let record = manual_record(date, &description, amount)?;
            let ledger = store
                .commit(vec![record])
                .with_context(|| format!("saving {}", store.path().display()))?;
            println!("Transaction added ({} in ledger)", ledger.len());
        }

        Command::List => {
            let ledger = load(&store)?;
            if ledger.is_empty() {
                println!("No transactions yet. Import a statement or add one manually.");
            } else {
                print!("{}", report::render_table(&ledger));
            }
        }

        Command::Summary { top } => {
            let ledger = load(&store)?;
            if ledger.is_empty() {
                println!("No transactions yet. Import a statement or add one manually.");
            } else {
                let limit = top.unwrap_or(cfg.summary.top_categories);
                print!(
                    "{}",
                    report::render_summary(&Summary::of(&ledger), &top_spending(&ledger, limit))
                );
            }
        }

        Command::Export { output } => {
            let ledger = load(&store)?;
            match output {
                Some(path) => {
                    tally_ledger::export_file(&ledger, &path)
                        .with_context(|| format!("exporting to {}", path.display()))?;
                    eprintln!("Exported {} transactions to {}", ledger.len(), path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut out = stdout.lock();
                    tally_ledger::export(&ledger, &mut out).context("writing CSV to stdout")?;
                    out.flush()?;
                }
            }
        }

        Command::Init => config::init_config()?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

fn load(store: &LedgerStore) -> Result<tally_core::Ledger> {
    store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))
}

fn manual_record(date: NaiveDate, description: &str, mut amount: Decimal) -> Result<TransactionRecord> {
    if amount.scale() > 2 {
        bail!("amount {amount} has more than two decimal places");
    }
    amount.rescale(2);
    Ok(TransactionRecord::manual(date, description, amount))
}

fn import(store: &LedgerStore, source: &str, files: &[PathBuf]) -> Result<()> {
    let source = source.trim();
    if source.is_empty() {
        bail!("--source must not be empty");
    }

    let extractor = Extractor::new().context("compiling transaction pattern")?;
    let documents: Vec<Box<dyn PageSource>> = files.iter().map(open_document).collect();
    let outcome = extract_batch(&extractor, documents.iter().map(|d| (&**d, source)));

    for failure in &outcome.failures {
        eprintln!("Could not read {}: {}", failure.document, failure.error);
    }

    match outcome.status() {
        BatchStatus::Extracted(n) => {
            store
                .commit(outcome.records)
                .with_context(|| format!("saving {}", store.path().display()))?;
            println!("{n} transactions extracted and saved to {}", store.path().display());
        }
        BatchStatus::NothingFound => {
            println!("No transactions found in the given documents.");
        }
        BatchStatus::Failed => {
            bail!("none of the {} documents could be read", files.len());
        }
    }

    Ok(())
}
