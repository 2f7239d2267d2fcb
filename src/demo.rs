//! Synthetic transactions for trying out the tracker on an empty store.

use time::{Date, Duration, Time};

use crate::{
    Error,
    clock::Clock,
    storage::StorageAdapter,
    store::TransactionStore,
    transaction::{Transaction, TransactionType},
};

const DEMO_ENTRIES: [(&str, f64, TransactionType); 8] = [
    ("Salary", 2500.0, TransactionType::Credit),
    ("Rent", 1200.0, TransactionType::Debit),
    ("Groceries", 86.45, TransactionType::Debit),
    ("Freelance design work", 640.0, TransactionType::Credit),
    ("Electricity bill", 112.3, TransactionType::Debit),
    ("Mobile data bundle", 25.0, TransactionType::Debit),
    ("Refund from store", 39.99, TransactionType::Credit),
    ("Dinner with friends", 54.2, TransactionType::Debit),
];

/// Build `count` demo transactions, newest first.
///
/// The first transaction is dated `today` and each one after it is a day
/// older. IDs are `demo-<n>`, where `n` counts up from the oldest, so the
/// same `count` always produces the same IDs.
pub fn demo_transactions(count: usize, today: Date) -> Vec<Transaction> {
    (0..count)
        .map(|index| {
            let (description, amount, transaction_type) = DEMO_ENTRIES[index % DEMO_ENTRIES.len()];
            let date = today
                .checked_sub(Duration::days(index as i64))
                .unwrap_or(Date::MIN);

            Transaction::build(description, amount, transaction_type)
                .id(&format!("demo-{}", count - index))
                .date(date)
                .finalise(date.with_time(Time::MIDNIGHT).assume_utc())
        })
        .collect()
}

/// Add `count` demo transactions to `store`, the newest dated today by the
/// store's clock.
///
/// Demo transactions already in the store are not added twice. Returns the
/// number of transactions added.
///
/// # Errors
/// Returns [Error::StoreNotLoaded] if the store has not been loaded.
pub fn seed_demo_transactions<S: StorageAdapter, C: Clock>(
    store: &mut TransactionStore<S, C>,
    count: usize,
) -> Result<usize, Error> {
    let today = store.clock().today();
    let added = store.import(demo_transactions(count, today))?;
    tracing::info!("Seeded {added} demo transactions");

    Ok(added)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error, FilterType, MemoryStorage,
        clock::FixedClock,
        demo::{demo_transactions, seed_demo_transactions},
        store::TransactionStore,
    };

    #[test]
    fn demo_transactions_are_deterministic() {
        let today = date!(2025 - 10 - 05);

        assert_eq!(demo_transactions(12, today), demo_transactions(12, today));
    }

    #[test]
    fn demo_transactions_are_newest_first() {
        let got = demo_transactions(3, date!(2025 - 10 - 05));

        let dates: Vec<_> = got.iter().map(|transaction| transaction.date).collect();
        let ids: Vec<_> = got.iter().map(|transaction| transaction.id.as_str()).collect();
        assert_eq!(
            dates,
            [date!(2025 - 10 - 05), date!(2025 - 10 - 04), date!(2025 - 10 - 03)]
        );
        assert_eq!(ids, ["demo-3", "demo-2", "demo-1"]);
    }

    #[test]
    fn demo_transactions_include_both_types() {
        let got = demo_transactions(8, date!(2025 - 10 - 05));

        assert!(got.iter().any(|t| FilterType::Credit.matches(t.transaction_type)));
        assert!(got.iter().any(|t| FilterType::Debit.matches(t.transaction_type)));
    }

    #[test]
    fn seeding_twice_does_not_duplicate() {
        let today = date!(2025 - 10 - 05);
        let mut store = TransactionStore::open(MemoryStorage::new(), FixedClock::at_date(today));

        let first = seed_demo_transactions(&mut store, 15).unwrap();
        let second = seed_demo_transactions(&mut store, 15).unwrap();

        assert_eq!(first, 15);
        assert_eq!(second, 0);
        assert_eq!(store.transactions().len(), 15);
        assert_eq!(store.transactions()[0].date, today);
    }

    #[test]
    fn seeding_requires_loaded_store() {
        let today = date!(2025 - 10 - 05);
        let mut store = TransactionStore::new(MemoryStorage::new(), FixedClock::at_date(today));

        assert_eq!(
            seed_demo_transactions(&mut store, 3),
            Err(Error::StoreNotLoaded)
        );
    }
}
