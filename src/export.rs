//! Serializes transaction lists to CSV and XLSX files.
//!
//! [export] is the entry point for callers: it applies the export options,
//! picks the filename and delegates to [to_csv] or [to_spreadsheet]. The
//! caller is responsible for saving the returned bytes.

use std::{fmt::Display, str::FromStr};

use rust_xlsxwriter::Workbook;
use time::Date;

use crate::{
    Error,
    filter::{FilterType, filter_by_type},
    transaction::Transaction,
};

/// The column headers, in order, for both export formats.
pub const EXPORT_HEADERS: [&str; 5] = ["ID", "Description", "Amount", "Type", "Date"];

/// The name of the single worksheet in an XLSX export.
pub const WORKSHEET_NAME: &str = "Transactions";

/// The file format to export to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma separated values.
    #[default]
    Csv,
    /// An Office Open XML spreadsheet.
    Xlsx,
}

impl ExportFormat {
    /// The file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// The MIME type to save the file with.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(Error::InvalidExportFormat(s.to_owned())),
        }
    }
}

/// How to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// The file format.
    pub format: ExportFormat,
    /// Whether to apply the caller's current type filter.
    pub include_filters: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_filters: true,
        }
    }
}

/// An exported file, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// The suggested filename, e.g. "transactions-2023-01-01.csv".
    pub filename: String,
    /// The MIME type of `bytes`.
    pub mime_type: &'static str,
    /// The file contents.
    pub bytes: Vec<u8>,
}

/// Keep the transactions to export for `filter`.
///
/// Only the type filter applies; search queries never affect exports.
pub fn filter_for_export(transactions: &[Transaction], filter: FilterType) -> Vec<Transaction> {
    filter_by_type(transactions, filter)
}

/// The filename for an export in `format` made on `today`.
pub fn export_filename(format: ExportFormat, today: Date) -> String {
    format!("transactions-{}.{}", today, format.extension())
}

/// Serialize `transactions` as UTF-8 CSV.
///
/// The first line is the header row and each transaction follows in list
/// order, one per line, joined with `\n`. Descriptions are always wrapped in
/// double quotes, with embedded double quotes doubled. Amounts are written as
/// raw numbers without currency symbols or separators.
pub fn to_csv(transactions: &[Transaction]) -> Vec<u8> {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(EXPORT_HEADERS.join(","));

    for transaction in transactions {
        lines.push(format!(
            "{},{},{},{},{}",
            transaction.id,
            quote_csv_field(&transaction.description),
            transaction.amount,
            transaction.transaction_type,
            transaction.date
        ));
    }

    lines.join("\n").into_bytes()
}

fn quote_csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Serialize `transactions` as an XLSX workbook.
///
/// The workbook has a single worksheet named [WORKSHEET_NAME] with a header
/// row followed by one row per transaction. Amounts are number cells.
///
/// # Errors
/// Returns [Error::SpreadsheetError] if the workbook cannot be built, e.g.
/// when there are more rows than a worksheet can hold.
pub fn to_spreadsheet(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for (column, header) in (0u16..).zip(EXPORT_HEADERS) {
        worksheet.write_string(0, column, header)?;
    }

    for (index, transaction) in transactions.iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| {
            Error::SpreadsheetError(format!("row {} does not fit in a worksheet", index + 1))
        })?;

        worksheet.write_string(row, 0, transaction.id.as_str())?;
        worksheet.write_string(row, 1, transaction.description.as_str())?;
        worksheet.write_number(row, 2, transaction.amount)?;
        worksheet.write_string(row, 3, transaction.transaction_type.as_str())?;
        worksheet.write_string(row, 4, transaction.date.to_string())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Export `transactions` according to `options`.
///
/// If `options.include_filters` is set, `current_filter` is applied first.
/// `today` dates the filename.
///
/// # Errors
/// Returns [Error::SpreadsheetError] if an XLSX export cannot be built.
pub fn export(
    transactions: &[Transaction],
    options: &ExportOptions,
    current_filter: FilterType,
    today: Date,
) -> Result<ExportFile, Error> {
    let selected = if options.include_filters {
        filter_for_export(transactions, current_filter)
    } else {
        transactions.to_vec()
    };

    let bytes = match options.format {
        ExportFormat::Csv => to_csv(&selected),
        ExportFormat::Xlsx => to_spreadsheet(&selected)?,
    };
    let filename = export_filename(options.format, today);

    tracing::info!(
        "Exported {} of {} transactions to {filename}",
        selected.len(),
        transactions.len()
    );

    Ok(ExportFile {
        filename,
        mime_type: options.format.mime_type(),
        bytes,
    })
}
