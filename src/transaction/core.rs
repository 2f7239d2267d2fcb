//! Defines the core data model for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The opaque, generated identifier of a transaction.
pub type TransactionId = String;

/// The number of random characters appended to the timestamp in a generated ID.
pub const ID_SUFFIX_LENGTH: usize = 9;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// An inflow of funds, increases the balance.
    Credit,
    /// An outflow of funds, decreases the balance.
    Debit,
}

impl TransactionType {
    /// The lowercase name used in storage and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    /// The sign shown in front of an amount of this type.
    pub fn sign(self) -> char {
        match self {
            Self::Credit => '+',
            Self::Debit => '-',
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(Error::InvalidTransactionType(s.to_owned())),
        }
    }
}

/// A single recorded credit or debit entry.
///
/// Transactions are immutable once created. To create a new `Transaction`,
/// use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, unique within a store.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money moved, always positive.
    ///
    /// The direction of the money is given by `transaction_type`.
    pub amount: f64,
    /// Whether the transaction is a credit or a debit.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction was recorded.
    pub date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        description: &str,
        amount: f64,
        transaction_type: TransactionType,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: None,
            description: description.to_owned(),
            amount,
            transaction_type,
            date: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The ID and date are optional: when they are not set, `finalise` generates
/// a fresh ID and uses the calendar date of the supplied instant.
///
/// # Examples
///
/// ```
/// use afripay_tracker::{Transaction, TransactionType};
/// use time::macros::{date, datetime};
///
/// let transaction = Transaction::build("Salary", 2500.0, TransactionType::Credit)
///     .id("1")
///     .date(date!(2023 - 01 - 01))
///     .finalise(datetime!(2023-01-01 9:00 UTC));
///
/// assert_eq!(transaction.id, "1");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: Option<TransactionId>,
    description: String,
    amount: f64,
    transaction_type: TransactionType,
    date: Option<Date>,
}

impl TransactionBuilder {
    /// Use `id` instead of a generated ID.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Use `date` instead of the date of the instant passed to `finalise`.
    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Create the transaction, filling in the ID and date from `now` if they
    /// were not set.
    pub fn finalise(self, now: OffsetDateTime) -> Transaction {
        Transaction {
            id: self.id.unwrap_or_else(|| generate_id(now)),
            description: self.description,
            amount: self.amount,
            transaction_type: self.transaction_type,
            date: self.date.unwrap_or_else(|| now.date()),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Generate a collision-resistant opaque ID.
///
/// The ID is the Unix timestamp of `now` in milliseconds followed by
/// [ID_SUFFIX_LENGTH] random lowercase hex digits (36 random bits) taken from a
/// v4 UUID.
pub fn generate_id(now: OffsetDateTime) -> TransactionId {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(ID_SUFFIX_LENGTH)
        .collect();

    format!("{millis}{suffix}")
}

/// Parse an amount that has already had its grouping separators removed.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a finite number.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        Error,
        transaction::{ID_SUFFIX_LENGTH, Transaction, TransactionType, generate_id, parse_amount},
    };

    #[test]
    fn finalise_fills_id_and_date_from_now() {
        let now = datetime!(2025-10-05 14:30 UTC);

        let transaction = Transaction::build("Coffee", 4.5, TransactionType::Debit).finalise(now);

        assert!(!transaction.id.is_empty());
        assert_eq!(transaction.date, date!(2025 - 10 - 05));
        assert_eq!(transaction.description, "Coffee");
        assert_eq!(transaction.amount, 4.5);
        assert_eq!(transaction.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn finalise_keeps_explicit_id_and_date() {
        let transaction = Transaction::build("Rent", 1200.0, TransactionType::Debit)
            .id("abc")
            .date(date!(2023 - 01 - 01))
            .finalise(datetime!(2025-10-05 14:30 UTC));

        assert_eq!(transaction.id, "abc");
        assert_eq!(transaction.date, date!(2023 - 01 - 01));
    }

    #[test]
    fn generated_id_starts_with_millisecond_timestamp() {
        let now = datetime!(2023-11-14 22:13:20 UTC);

        let id = generate_id(now);

        assert!(id.starts_with("1700000000000"), "got id {id}");
        assert_eq!(id.len(), "1700000000000".len() + ID_SUFFIX_LENGTH);
        assert!(
            id["1700000000000".len()..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
            "want a lowercase hex suffix, got id {id}"
        );
    }

    #[test]
    fn generated_ids_differ_for_same_instant() {
        let now = datetime!(2025-10-05 14:30 UTC);

        assert_ne!(generate_id(now), generate_id(now));
    }

    #[test]
    fn parse_amount_accepts_decimal_text() {
        assert_eq!(parse_amount("100.50"), Ok(100.5));
        assert_eq!(parse_amount(" 42 "), Ok(42.0));
    }

    #[test]
    fn parse_amount_rejects_non_numbers() {
        for text in ["", "abc", "1,000", "NaN", "inf"] {
            assert_eq!(
                parse_amount(text),
                Err(Error::InvalidAmount(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn transaction_type_parses_case_insensitively() {
        assert_eq!("Credit".parse::<TransactionType>(), Ok(TransactionType::Credit));
        assert_eq!(" debit ".parse::<TransactionType>(), Ok(TransactionType::Debit));
        assert_eq!(
            "income".parse::<TransactionType>(),
            Err(Error::InvalidTransactionType("income".to_owned()))
        );
    }

    #[test]
    fn serializes_with_reference_field_names() {
        let transaction = Transaction::build("Test", 100.0, TransactionType::Credit)
            .id("1")
            .date(date!(2023 - 01 - 01))
            .finalise(datetime!(2023-01-01 0:00 UTC));

        let json = serde_json::to_string(&transaction).unwrap();

        assert_eq!(
            json,
            r#"{"id":"1","description":"Test","amount":100.0,"type":"credit","date":"2023-01-01"}"#
        );
    }

    #[test]
    fn deserializes_integer_amounts() {
        let json = r#"{"id":"1","description":"Test","amount":100,"type":"debit","date":"2023-01-02"}"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.amount, 100.0);
        assert_eq!(transaction.transaction_type, TransactionType::Debit);
        assert_eq!(transaction.date, date!(2023 - 01 - 02));
    }
}
