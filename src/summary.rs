//! Totals derived from the transaction list and the currency formatting used
//! to display them.

use serde::Serialize;

use crate::transaction::{Transaction, TransactionType, group_thousands};

/// The inflow, outflow and net balance over a list of transactions.
///
/// A summary is always computed from the full list and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TransactionSummary {
    /// The sum of all credit amounts.
    pub total_inflow: f64,
    /// The sum of all debit amounts.
    pub total_outflow: f64,
    /// `total_inflow - total_outflow`.
    pub net_balance: f64,
}

impl TransactionSummary {
    /// Compute the summary in a single pass over `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut total_inflow = 0.0;
        let mut total_outflow = 0.0;

        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Credit => total_inflow += transaction.amount,
                TransactionType::Debit => total_outflow += transaction.amount,
            }
        }

        Self {
            total_inflow,
            total_outflow,
            net_balance: total_inflow - total_outflow,
        }
    }
}

/// Format `number` as dollars rounded to two decimal places, e.g. "$1,234.50"
/// or "-$12.30".
///
/// Amounts that round to zero, including float noise such as `5.55e-17`, are
/// "$0.00". Non-finite values are written as is after the sign.
pub fn format_currency(number: f64) -> String {
    let cents = (number * 100.0).round();

    if cents == 0.0 {
        return "$0.00".to_owned();
    }

    let sign = if cents < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", cents.abs() / 100.0);

    match fixed.split_once('.') {
        Some((integer, decimals)) => format!("{sign}${}.{decimals}", group_thousands(integer)),
        None => format!("{sign}${fixed}"),
    }
}

/// Format a transaction's amount with the sign of its type, e.g. "+$100.00".
pub fn format_signed_amount(transaction: &Transaction) -> String {
    format!(
        "{}{}",
        transaction.transaction_type.sign(),
        format_currency(transaction.amount)
    )
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        summary::{TransactionSummary, format_currency, format_signed_amount},
        transaction::{Transaction, TransactionType},
    };

    fn transaction(id: &str, amount: f64, transaction_type: TransactionType) -> Transaction {
        Transaction::build(&format!("Tx {id}"), amount, transaction_type)
            .id(id)
            .date(date!(2025 - 10 - 05))
            .finalise(datetime!(2025-10-05 0:00 UTC))
    }

    #[test]
    fn summary_of_empty_list_is_zero() {
        let got = TransactionSummary::from_transactions(&[]);

        assert_eq!(got, TransactionSummary::default());
    }

    #[test]
    fn totals_are_split_by_type() {
        let transactions = [
            transaction("1", 100.0, TransactionType::Credit),
            transaction("2", 50.0, TransactionType::Debit),
            transaction("3", 25.5, TransactionType::Credit),
            transaction("4", 10.25, TransactionType::Debit),
        ];

        let got = TransactionSummary::from_transactions(&transactions);

        assert_eq!(
            got,
            TransactionSummary {
                total_inflow: 125.5,
                total_outflow: 60.25,
                net_balance: 65.25,
            }
        );
    }

    #[test]
    fn net_balance_is_inflow_minus_outflow_for_every_ordering() {
        let base = [
            transaction("1", 0.25, TransactionType::Credit),
            transaction("2", 1000.5, TransactionType::Debit),
            transaction("3", 75.75, TransactionType::Credit),
            transaction("4", 3.0, TransactionType::Debit),
        ];
        let want = TransactionSummary::from_transactions(&base);

        for rotation in 0..base.len() {
            let mut transactions = base.to_vec();
            transactions.rotate_left(rotation);
            let reversed: Vec<_> = transactions.iter().rev().cloned().collect();

            for ordering in [transactions, reversed] {
                let got = TransactionSummary::from_transactions(&ordering);

                assert_eq!(got, want);
                assert_eq!(got.net_balance, got.total_inflow - got.total_outflow);
            }
        }

        assert_eq!(want.total_inflow, 76.0);
        assert_eq!(want.total_outflow, 1003.5);
    }

    #[test]
    fn net_balance_can_be_negative() {
        let transactions = [transaction("1", 40.0, TransactionType::Debit)];

        let got = TransactionSummary::from_transactions(&transactions);

        assert_eq!(got.net_balance, -40.0);
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn formats_two_decimal_places() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(-12.3), "-$12.30");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_234_567.89), "$1,234,567.89");
        assert_eq!(format_currency(-98_765.4), "-$98,765.40");
        assert_eq!(format_currency(100.0), "$100.00");
    }

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(19.999), "$20.00");
        assert_eq!(format_currency(0.125), "$0.13");
        assert_eq!(format_currency(-0.016), "-$0.02");
    }

    #[test]
    fn sub_cent_values_are_zero() {
        assert_eq!(format_currency(0.004), "$0.00");
        assert_eq!(format_currency(-0.004), "$0.00");
        assert_eq!(format_currency(0.1 + 0.2 - 0.3), "$0.00");
    }

    #[test]
    fn large_values_stay_in_plain_notation() {
        assert_eq!(format_currency(1e15), "$1,000,000,000,000,000.00");
    }

    #[test]
    fn float_noise_in_net_balance_formats_as_zero() {
        let transactions = [
            transaction("1", 0.1, TransactionType::Credit),
            transaction("2", 0.2, TransactionType::Credit),
            transaction("3", 0.3, TransactionType::Debit),
        ];

        let summary = TransactionSummary::from_transactions(&transactions);

        assert_eq!(format_currency(summary.net_balance), "$0.00");
    }

    #[test]
    fn signed_amount_uses_type_sign() {
        let credit = transaction("1", 12.3, TransactionType::Credit);
        let debit = transaction("2", 12.3, TransactionType::Debit);

        assert_eq!(format_signed_amount(&credit), "+$12.30");
        assert_eq!(format_signed_amount(&debit), "-$12.30");
    }
}
