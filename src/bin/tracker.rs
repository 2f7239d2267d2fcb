use std::{
    error::Error,
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use afripay_tracker::{
    ExportFormat, ExportOptions, FilterType, SqliteStorage, SystemClock, TrackerConfig,
    TransactionStore, TransactionType, demo::seed_demo_transactions, format_currency,
    format_signed_amount,
    pagination::{PaginationConfig, PaginationIndicator, paginate},
    transaction::TransactionForm,
};

/// A command line front end for the afripay transaction tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database the transactions are stored in.
    #[arg(long, default_value = "transactions.db")]
    db_path: PathBuf,

    /// The canonical timezone used for today's date, e.g. "Africa/Lagos".
    ///
    /// Defaults to the operating system's local offset.
    #[arg(long)]
    timezone: Option<String>,

    /// The number of transactions per page when listing.
    #[arg(long, default_value_t = PaginationConfig::default().page_size)]
    page_size: usize,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction dated today.
    Add {
        /// What the transaction was for.
        description: String,
        /// The amount, grouping separators are allowed (e.g. "1,200.50").
        amount: String,
        /// Either "credit" or "debit".
        #[arg(long = "type", short, default_value_t = TransactionType::Debit)]
        transaction_type: TransactionType,
    },
    /// Delete the transaction with the given ID.
    Delete {
        /// The ID of the transaction.
        id: String,
    },
    /// Delete every transaction.
    Clear,
    /// List transactions one page at a time.
    List {
        /// Either "all", "credit" or "debit".
        #[arg(long, short, default_value_t = FilterType::All)]
        filter: FilterType,
        /// Only show transactions whose description, ID or date contains this.
        #[arg(long, short, default_value = "")]
        search: String,
        /// The 1-based page to show.
        #[arg(long, short, default_value_t = PaginationConfig::default().default_page)]
        page: usize,
    },
    /// Show total inflow, outflow and net balance.
    Summary,
    /// Write the transactions to a CSV or XLSX file.
    Export {
        /// Either "csv" or "xlsx".
        #[arg(long, short, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Only export transactions of this type.
        #[arg(long, default_value_t = FilterType::All)]
        filter: FilterType,
        /// Export every transaction, ignoring `--filter`.
        #[arg(long)]
        all: bool,
        /// The directory to write the file to.
        #[arg(long, short, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Add demo transactions, skipping any that were added before.
    Seed {
        /// The number of demo transactions.
        #[arg(long, short, default_value_t = 25)]
        count: usize,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(&args.log_path)?;

    let config = TrackerConfig {
        timezone: args.timezone,
        pagination: PaginationConfig {
            page_size: args.page_size,
            ..Default::default()
        },
        ..Default::default()
    };
    let clock = config.clock()?;
    let storage = SqliteStorage::open(&args.db_path)?;
    let mut store = TransactionStore::new(storage, clock).with_storage_key(&config.storage_key);
    store.load();

    match args.command {
        Command::Add {
            description,
            amount,
            transaction_type,
        } => {
            let form = match TransactionForm::new(&description, &amount, transaction_type)
                .validate()
            {
                Ok(form) => form,
                Err(errors) => {
                    for error in errors {
                        eprintln!("{error}");
                    }
                    std::process::exit(1);
                }
            };

            let transaction = store.add_from_form(&form)?;
            println!(
                "Added {} {} ({})",
                transaction.description,
                format_signed_amount(&transaction),
                transaction.id
            );
        }
        Command::Delete { id } => {
            if store.delete(&id)? {
                println!("Deleted transaction {id}");
            } else {
                println!("No transaction with ID {id}");
            }
        }
        Command::Clear => {
            store.clear_all()?;
            println!("Deleted all transactions");
        }
        Command::List {
            filter,
            search,
            page,
        } => list(&store, &config, filter, &search, page),
        Command::Summary => {
            let summary = store.summary();
            let counts = store.counts();
            println!(
                "Inflow:  {} ({} credits)",
                format_currency(summary.total_inflow),
                counts.credit
            );
            println!(
                "Outflow: {} ({} debits)",
                format_currency(summary.total_outflow),
                counts.debit
            );
            println!("Balance: {}", format_currency(summary.net_balance));
        }
        Command::Export {
            format,
            filter,
            all,
            output_dir,
        } => {
            let options = ExportOptions {
                format,
                include_filters: !all,
            };
            let file = store.export(&options, filter)?;
            let path = output_dir.join(&file.filename);
            std::fs::write(&path, &file.bytes)?;
            println!("Wrote {} ({})", path.display(), file.mime_type);
        }
        Command::Seed { count } => {
            let added = seed_demo_transactions(&mut store, count)?;
            println!("Added {added} demo transactions");
        }
    }

    Ok(())
}

fn list(
    store: &TransactionStore<SqliteStorage, SystemClock>,
    config: &TrackerConfig,
    filter: FilterType,
    search: &str,
    page: usize,
) {
    let counts = store.counts();
    println!(
        "all ({})  credit ({})  debit ({})",
        counts.all, counts.credit, counts.debit
    );

    let transactions = store.filtered(filter, search);
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    let page = paginate(&transactions, config.pagination.page_size, page);
    for transaction in page.items {
        println!(
            "{}  {:<32} {:>14}  {}",
            transaction.date,
            transaction.description,
            format_signed_amount(transaction),
            transaction.id
        );
    }

    if page.shows_controls() {
        let indicators: Vec<String> = page
            .indicators()
            .into_iter()
            .map(|indicator| match indicator {
                PaginationIndicator::Page(page) => page.to_string(),
                PaginationIndicator::CurrPage(page) => format!("[{page}]"),
                PaginationIndicator::Ellipsis => "...".to_owned(),
            })
            .collect();
        println!("Page {}", indicators.join(" "));
    }
}

fn setup_logging(log_path: &Path) -> Result<(), Box<dyn Error>> {
    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter::LevelFilter::WARN.to_string()));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}
