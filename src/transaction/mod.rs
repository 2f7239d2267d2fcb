//! Transaction records and the producer-side form that creates them.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionForm` validation and amount formatting helpers used
//!   before a transaction reaches the store

mod core;
mod form;

pub use core::{
    ID_SUFFIX_LENGTH, Transaction, TransactionBuilder, TransactionId, TransactionType, generate_id,
    parse_amount,
};
pub(crate) use form::group_thousands;
pub use form::{
    FieldError, TransactionForm, TransactionFormData, format_amount_input, unformat_amount,
};
