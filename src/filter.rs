//! Type filtering and free-text search over a transaction list.
//!
//! The type filter is applied first and search only narrows within the active
//! type. Neither step reorders transactions.

use std::{fmt::Display, str::FromStr};

use serde::Serialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

/// Which transaction types to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Show every transaction.
    #[default]
    All,
    /// Show only credits.
    Credit,
    /// Show only debits.
    Debit,
}

impl FilterType {
    /// Whether a transaction of `transaction_type` passes this filter.
    pub fn matches(self, transaction_type: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Credit => transaction_type == TransactionType::Credit,
            Self::Debit => transaction_type == TransactionType::Debit,
        }
    }

    /// The lowercase name of the filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(Error::InvalidFilter(s.to_owned())),
        }
    }
}

impl From<TransactionType> for FilterType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Credit => Self::Credit,
            TransactionType::Debit => Self::Debit,
        }
    }
}

/// Keep the transactions that pass `filter`, in their original order.
pub fn filter_by_type(transactions: &[Transaction], filter: FilterType) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction.transaction_type))
        .cloned()
        .collect()
}

/// Whether `transaction` matches a free-text `query`.
///
/// A query that is empty or only whitespace matches everything. Otherwise the
/// lowercased query must be a substring of the lowercased description, ID or
/// ISO date.
pub fn matches_search(transaction: &Transaction, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let query = query.to_lowercase();

    transaction.description.to_lowercase().contains(&query)
        || transaction.id.to_lowercase().contains(&query)
        || transaction.date.to_string().contains(&query)
}

/// Apply the type filter and then the search query.
pub fn apply_filters(
    transactions: &[Transaction],
    filter: FilterType,
    search_query: &str,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction.transaction_type))
        .filter(|transaction| matches_search(transaction, search_query))
        .cloned()
        .collect()
}

/// The number of transactions behind each filter tab.
///
/// Counts are taken over the full list and ignore any search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransactionCounts {
    /// Every transaction.
    pub all: usize,
    /// Credits only.
    pub credit: usize,
    /// Debits only.
    pub debit: usize,
}

impl TransactionCounts {
    /// Count the transactions of each type.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let credit = transactions
            .iter()
            .filter(|transaction| transaction.transaction_type == TransactionType::Credit)
            .count();

        Self {
            all: transactions.len(),
            credit,
            debit: transactions.len() - credit,
        }
    }

    /// The count shown for `filter`.
    pub fn get(&self, filter: FilterType) -> usize {
        match filter {
            FilterType::All => self.all,
            FilterType::Credit => self.credit,
            FilterType::Debit => self.debit,
        }
    }
}
