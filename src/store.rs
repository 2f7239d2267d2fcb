//! The transaction store: the single owner of the transaction list.

use std::collections::HashSet;

use crate::{
    Error,
    clock::Clock,
    export::{self, ExportFile, ExportOptions},
    filter::{self, FilterType, TransactionCounts},
    storage::{STORAGE_KEY, StorageAdapter, load_transactions, save_transactions},
    summary::TransactionSummary,
    transaction::{Transaction, TransactionFormData, TransactionType, parse_amount},
};

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Constructed, nothing read from storage yet.
    Uninitialized,
    /// Reading from storage.
    Loading,
    /// Hydrated and accepting mutations.
    Ready,
}

/// Owns the ordered transaction list (newest first) and persists it after
/// every mutation.
///
/// The store is generic over its [StorageAdapter] and [Clock], so tests can
/// hand it an in-memory adapter and a fixed clock.
#[derive(Debug)]
pub struct TransactionStore<S, C> {
    storage: S,
    clock: C,
    storage_key: String,
    transactions: Vec<Transaction>,
    state: StoreState,
}

impl<S: StorageAdapter, C: Clock> TransactionStore<S, C> {
    /// Create an empty, unloaded store.
    ///
    /// Call [TransactionStore::load] before mutating it, or use
    /// [TransactionStore::open] instead.
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            storage_key: STORAGE_KEY.to_owned(),
            transactions: Vec::new(),
            state: StoreState::Uninitialized,
        }
    }

    /// Create a store and load it from `storage`.
    pub fn open(storage: S, clock: C) -> Self {
        let mut store = Self::new(storage, clock);
        store.load();
        store
    }

    /// Persist under `storage_key` instead of [STORAGE_KEY].
    ///
    /// Must be called before loading.
    pub fn with_storage_key(mut self, storage_key: &str) -> Self {
        self.storage_key = storage_key.to_owned();
        self
    }

    /// The lifecycle state of the store.
    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Read the persisted list, replacing the in-memory list.
    ///
    /// Never fails: if the stored data cannot be read or decoded the error is
    /// logged and the store starts empty.
    pub fn load(&mut self) -> &[Transaction] {
        self.state = StoreState::Loading;

        self.transactions = match load_transactions(&self.storage, &self.storage_key) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("Failed to load transactions from storage: {error}");
                Vec::new()
            }
        };

        self.state = StoreState::Ready;
        tracing::debug!(
            "Loaded {} transactions from \"{}\"",
            self.transactions.len(),
            self.storage_key
        );

        &self.transactions
    }

    /// Record a new transaction dated today and put it at the top of the list.
    ///
    /// `description` is trimmed. `amount_text` must already have its grouping
    /// separators removed; the store does not check that the amount is
    /// positive.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StoreNotLoaded] if the store has not been loaded,
    /// - or [Error::InvalidAmount] if `amount_text` is not a number.
    pub fn add(
        &mut self,
        description: &str,
        amount_text: &str,
        transaction_type: TransactionType,
    ) -> Result<Transaction, Error> {
        self.ensure_ready()?;
        let amount = parse_amount(amount_text)?;

        let transaction = Transaction::build(description.trim(), amount, transaction_type)
            .finalise(self.clock.now());

        self.transactions.insert(0, transaction.clone());
        self.persist();

        Ok(transaction)
    }

    /// Record a transaction from a validated form.
    ///
    /// # Errors
    /// See [TransactionStore::add].
    pub fn add_from_form(&mut self, form: &TransactionFormData) -> Result<Transaction, Error> {
        self.add(&form.description, &form.amount, form.transaction_type)
    }

    /// Put already-built transactions at the top of the list, keeping their
    /// order.
    ///
    /// Transactions whose ID is already in the store are skipped. Returns the
    /// number of transactions added.
    ///
    /// # Errors
    /// Returns [Error::StoreNotLoaded] if the store has not been loaded.
    pub fn import(&mut self, transactions: Vec<Transaction>) -> Result<usize, Error> {
        self.ensure_ready()?;

        let mut seen: HashSet<String> = self
            .transactions
            .iter()
            .map(|transaction| transaction.id.clone())
            .collect();

        let mut fresh: Vec<Transaction> = transactions
            .into_iter()
            .filter(|transaction| seen.insert(transaction.id.clone()))
            .collect();
        let added = fresh.len();

        fresh.append(&mut self.transactions);
        self.transactions = fresh;
        self.persist();

        Ok(added)
    }

    /// Remove the transaction with `id`.
    ///
    /// Deleting an ID that is not in the store is not an error. Returns
    /// whether a transaction was removed.
    ///
    /// # Errors
    /// Returns [Error::StoreNotLoaded] if the store has not been loaded.
    pub fn delete(&mut self, id: &str) -> Result<bool, Error> {
        self.ensure_ready()?;

        let before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);
        let removed = self.transactions.len() != before;

        if !removed {
            tracing::debug!("Tried to delete missing transaction {id}");
        }

        self.persist();

        Ok(removed)
    }

    /// Remove every transaction.
    ///
    /// # Errors
    /// Returns [Error::StoreNotLoaded] if the store has not been loaded.
    pub fn clear_all(&mut self) -> Result<(), Error> {
        self.ensure_ready()?;

        self.transactions.clear();
        self.persist();

        Ok(())
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The transaction with `id`, if any.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// Totals over the full list, recomputed on every call.
    pub fn summary(&self) -> TransactionSummary {
        TransactionSummary::from_transactions(&self.transactions)
    }

    /// Per-type counts over the full list.
    pub fn counts(&self) -> TransactionCounts {
        TransactionCounts::from_transactions(&self.transactions)
    }

    /// The transactions shown for `filter` and `search_query`.
    pub fn filtered(&self, filter: FilterType, search_query: &str) -> Vec<Transaction> {
        filter::apply_filters(&self.transactions, filter, search_query)
    }

    /// Export the full list, dated with the store's clock.
    ///
    /// # Errors
    /// Returns [Error::SpreadsheetError] if the spreadsheet cannot be built.
    pub fn export(
        &self,
        options: &ExportOptions,
        current_filter: FilterType,
    ) -> Result<ExportFile, Error> {
        export::export(
            &self.transactions,
            options,
            current_filter,
            self.clock.today(),
        )
    }

    /// The underlying storage adapter.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The clock new transactions are dated with.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn ensure_ready(&self) -> Result<(), Error> {
        if self.state == StoreState::Ready {
            Ok(())
        } else {
            tracing::warn!("Rejected a mutation while the store is {:?}", self.state);
            Err(Error::StoreNotLoaded)
        }
    }

    fn persist(&mut self) {
        match save_transactions(&mut self.storage, &self.storage_key, &self.transactions) {
            Ok(()) => tracing::debug!("Saved {} transactions", self.transactions.len()),
            Err(error) => tracing::error!("Failed to save transactions to storage: {error}"),
        }
    }
}
