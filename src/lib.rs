//! Afripay tracker is the data engine behind a personal-finance transaction
//! tracker.
//!
//! Users record credit and debit entries, view running totals, filter, search
//! and paginate the list, and export it as CSV or an XLSX spreadsheet. The
//! presentation layer lives elsewhere and drives this crate through
//! [TransactionStore], the pure functions in [filter], [pagination] and
//! [export], and a [StorageAdapter] for persistence.

#![warn(missing_docs)]

mod clock;
mod config;
pub mod demo;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod storage;
mod store;
mod summary;
pub mod transaction;

pub use clock::{Clock, FixedClock, SystemClock, get_local_offset};
pub use config::TrackerConfig;
pub use export::{ExportFile, ExportFormat, ExportOptions};
pub use filter::{FilterType, TransactionCounts};
pub use storage::{MemoryStorage, STORAGE_KEY, SqliteStorage, StorageAdapter, StorageError};
pub use store::{StoreState, TransactionStore};
pub use summary::{TransactionSummary, format_currency, format_signed_amount};
pub use transaction::{Transaction, TransactionId, TransactionType};

/// The errors that may occur in the tracker.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A mutating operation was called before the store finished loading.
    ///
    /// Callers should use [TransactionStore::open] or call
    /// [TransactionStore::load] before mutating the store.
    #[error("the transaction store has not finished loading")]
    StoreNotLoaded,

    /// The amount text could not be parsed as a finite number.
    ///
    /// Callers are expected to strip grouping separators (see
    /// [transaction::unformat_amount]) before passing the amount in.
    #[error("could not parse \"{0}\" as an amount")]
    InvalidAmount(String),

    /// The text did not name a transaction type.
    #[error("\"{0}\" is not a transaction type, expected \"credit\" or \"debit\"")]
    InvalidTransactionType(String),

    /// The text did not name a filter.
    #[error("\"{0}\" is not a filter, expected \"all\", \"credit\" or \"debit\"")]
    InvalidFilter(String),

    /// The text did not name an export format.
    #[error("\"{0}\" is not an export format, expected \"csv\" or \"xlsx\"")]
    InvalidExportFormat(String),

    /// The spreadsheet writer failed to build the workbook.
    ///
    /// The error string comes from the underlying XLSX library and should
    /// only be logged.
    #[error("could not create the spreadsheet: {0}")]
    SpreadsheetError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        tracing::error!("an unexpected spreadsheet error occurred: {}", value);
        Error::SpreadsheetError(value.to_string())
    }
}
