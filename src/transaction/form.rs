//! Producer-side validation for new transactions.
//!
//! The store trusts its caller, so everything that reaches
//! [crate::TransactionStore::add] should first pass through
//! [TransactionForm::validate].

use crate::transaction::TransactionType;

/// The raw values a user entered for a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    /// The description as typed.
    pub description: String,
    /// The amount as typed, possibly with thousands separators.
    pub amount: String,
    /// The selected transaction type.
    pub transaction_type: TransactionType,
}

/// A form that passed validation.
///
/// `description` is trimmed and `amount` has its separators stripped, so the
/// fields can be passed straight to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFormData {
    /// The trimmed, non-empty description.
    pub description: String,
    /// The amount text with separators removed. Parses to a positive number.
    pub amount: String,
    /// The selected transaction type.
    pub transaction_type: TransactionType,
}

/// A reason a form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The description was empty or only whitespace.
    #[error("Description is required")]
    MissingDescription,
    /// The amount was empty or only whitespace.
    #[error("Amount is required")]
    MissingAmount,
    /// The amount was not a number greater than zero.
    #[error("Amount must be a positive number")]
    NonPositiveAmount,
}

impl TransactionForm {
    /// Create a form from the entered values.
    pub fn new(description: &str, amount: &str, transaction_type: TransactionType) -> Self {
        Self {
            description: description.to_owned(),
            amount: amount.to_owned(),
            transaction_type,
        }
    }

    /// Check the form and clean up its values.
    ///
    /// # Errors
    /// Returns every [FieldError] found, description errors first.
    pub fn validate(&self) -> Result<TransactionFormData, Vec<FieldError>> {
        let mut errors = Vec::new();

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(FieldError::MissingDescription);
        }

        let amount = unformat_amount(self.amount.trim());
        if amount.is_empty() {
            errors.push(FieldError::MissingAmount);
        } else {
            match amount.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => {}
                _ => errors.push(FieldError::NonPositiveAmount),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TransactionFormData {
            description: description.to_owned(),
            amount,
            transaction_type: self.transaction_type,
        })
    }
}

/// Remove thousands separators from an amount.
pub fn unformat_amount(value: &str) -> String {
    value.replace(',', "")
}

/// Format an amount while it is being typed.
///
/// Keeps digits and the first decimal point, trims leading zeros, groups the
/// integer part in thousands and keeps at most two decimal places. A lone
/// `"."` is left as is so the user can keep typing.
pub fn format_amount_input(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned == "." {
        return cleaned;
    }

    let (integer_part, decimal_part) = match cleaned.split_once('.') {
        Some((integer, decimal)) => (integer, Some(decimal.replace('.', ""))),
        None => (cleaned.as_str(), None),
    };

    let mut integer = integer_part;
    if integer.len() > 1 {
        integer = integer.trim_start_matches('0');
    }
    if integer.is_empty() {
        integer = "0";
    }

    let mut formatted = group_thousands(integer);

    if let Some(decimal) = decimal_part {
        formatted.push('.');
        formatted.extend(decimal.chars().take(2));
    }

    formatted
}

/// Insert `,` between every group of three digits, counting from the right.
pub(crate) fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use crate::transaction::{
        FieldError, TransactionForm, TransactionFormData, TransactionType, format_amount_input,
        unformat_amount,
    };

    #[test]
    fn valid_form_is_cleaned() {
        let form = TransactionForm::new("  Groceries ", "1,234.50", TransactionType::Debit);

        let got = form.validate();

        assert_eq!(
            got,
            Ok(TransactionFormData {
                description: "Groceries".to_owned(),
                amount: "1234.50".to_owned(),
                transaction_type: TransactionType::Debit,
            })
        );
    }

    #[test]
    fn empty_form_reports_both_fields() {
        let form = TransactionForm::new("   ", "", TransactionType::Credit);

        let got = form.validate();

        assert_eq!(
            got,
            Err(vec![FieldError::MissingDescription, FieldError::MissingAmount])
        );
    }

    #[test]
    fn rejects_zero_negative_and_garbage_amounts() {
        for amount in ["0", "0.00", "-5", "abc", "."] {
            let form = TransactionForm::new("Test", amount, TransactionType::Credit);

            assert_eq!(
                form.validate(),
                Err(vec![FieldError::NonPositiveAmount]),
                "want amount {amount:?} to be rejected"
            );
        }
    }

    #[test]
    fn field_errors_have_user_facing_messages() {
        assert_eq!(
            FieldError::NonPositiveAmount.to_string(),
            "Amount must be a positive number"
        );
        assert_eq!(
            FieldError::MissingDescription.to_string(),
            "Description is required"
        );
    }

    #[test]
    fn unformat_strips_separators() {
        assert_eq!(unformat_amount("1,234,567.89"), "1234567.89");
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_amount_input("1234567"), "1,234,567");
        assert_eq!(format_amount_input("1,234"), "1,234");
        assert_eq!(format_amount_input("999"), "999");
    }

    #[test]
    fn format_limits_decimals_and_points() {
        assert_eq!(format_amount_input("12.345"), "12.34");
        assert_eq!(format_amount_input("1.2.3"), "1.23");
        assert_eq!(format_amount_input("5."), "5.");
    }

    #[test]
    fn format_handles_leading_zeros_and_partial_input() {
        assert_eq!(format_amount_input("007"), "7");
        assert_eq!(format_amount_input("000"), "0");
        assert_eq!(format_amount_input(".5"), "0.5");
        assert_eq!(format_amount_input("."), ".");
        assert_eq!(format_amount_input(""), "");
        assert_eq!(format_amount_input("$12a"), "12");
    }
}
