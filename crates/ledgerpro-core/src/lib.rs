//! Core ledger engine and business logic
//!
//! The rules with real invariants live here: the canonical newest-first
//! transaction order, the running-balance derivation over that order, the
//! activity ranking of the account list, and the closed-account write
//! guard. The [`Ledger`] facade composes them into the operations the web
//! layer calls.

pub mod error;

use chrono::NaiveDate;
use ledgerpro_store::{FlagStoreRef, StoreRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub use error::{ErrorCode, ErrorDetails, ErrorSeverity, LedgerError, LedgerResult};

// Re-export the record types the engine is built over
pub use ledgerpro_store::{AccountRecord, Transaction, TransactionFields};

// ==================== Domain Types ====================

/// An account as the engine sees it: the stored record plus the
/// client-local closed flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub closed: bool,
}

/// One row of a balanced transaction listing
///
/// `balance` is derived, never stored: it is the cumulative
/// (credit - debit) total up to and including this transaction in
/// chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub balance: Decimal,
}

/// Form-level transaction input, validated before it reaches the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(default)]
    pub date_of_entry: Option<NaiveDate>,
    #[serde(default)]
    pub due_on: Option<NaiveDate>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub debit: Option<Decimal>,
    #[serde(default)]
    pub credit: Option<Decimal>,
}

impl TransactionDraft {
    /// Validate form input into concrete field values
    ///
    /// The entry date is the one required field; absent amounts become
    /// zero and blank text fields become `None`.
    pub fn validate(self) -> LedgerResult<TransactionFields> {
        let Some(date_of_entry) = self.date_of_entry else {
            return Err(LedgerError::Validation {
                message: "Date of entry is required.".to_string(),
            });
        };
        let debit = self.debit.unwrap_or(Decimal::ZERO);
        let credit = self.credit.unwrap_or(Decimal::ZERO);
        if debit < Decimal::ZERO {
            return Err(LedgerError::Validation {
                message: "Debit cannot be negative.".to_string(),
            });
        }
        if credit < Decimal::ZERO {
            return Err(LedgerError::Validation {
                message: "Credit cannot be negative.".to_string(),
            });
        }
        Ok(TransactionFields {
            date_of_entry,
            due_on: self.due_on,
            reference: blank_to_none(self.reference),
            description: blank_to_none(self.description),
            remarks: blank_to_none(self.remarks),
            debit,
            credit,
        })
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// A guarded transaction mutation
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionOp {
    Create(TransactionDraft),
    Update {
        transaction_id: String,
        draft: TransactionDraft,
    },
    Delete {
        transaction_id: String,
    },
}

/// What a successful mutation produced
///
/// After any of these, callers must reload both the transaction list and
/// the account list before rendering again; a mutation can change the
/// rows and the activity ranking at the same time.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Created(Transaction),
    Updated(Transaction),
    Deleted,
}

/// Result of a selection-scoped transaction fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Balanced rows for the account that is still selected
    Loaded(Vec<LedgerEntry>),
    /// The selection changed while the fetch was in flight; discard
    Stale,
}

// ==================== Transaction Ordering ====================

/// Order transactions newest-first: entry date descending, then ID
/// descending as the tie-break
///
/// The input is left untouched; the store may hand records back in any
/// order, so this is the only ordering callers may rely on. IDs are
/// unique, which makes the result a strict total order.
pub fn order_newest_first(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut ordered = transactions.to_vec();
    ordered.sort_by(|a, b| match b.date_of_entry.cmp(&a.date_of_entry) {
        std::cmp::Ordering::Equal => b.id.cmp(&a.id),
        other => other,
    });
    ordered
}

// ==================== Balance Derivation ====================

/// Attach a running balance to every transaction of a newest-first
/// sequence
///
/// Balances accumulate in chronological order, so the walk runs from the
/// tail (oldest) to the head (newest). The head entry's balance is the
/// account's current balance.
pub fn derive_balances(ordered: Vec<Transaction>) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = ordered
        .into_iter()
        .map(|transaction| LedgerEntry {
            transaction,
            balance: Decimal::ZERO,
        })
        .collect();

    let mut running = Decimal::ZERO;
    for entry in entries.iter_mut().rev() {
        running += entry.transaction.credit - entry.transaction.debit;
        entry.balance = running;
    }
    entries
}

// ==================== Account Activity Ranking ====================

/// Rank accounts for display: open before closed, then by most recent
/// transaction date, accounts without transactions last
///
/// Per-account transaction lookups fan out in parallel. A failed lookup
/// only affects its own account, which falls back to the
/// no-transactions branch; the rest of the list still ranks. The sort is
/// stable, so accounts without transactions keep their relative input
/// order.
pub async fn rank_accounts(store: StoreRef, accounts: Vec<Account>) -> Vec<Account> {
    let mut lookups = Vec::with_capacity(accounts.len());
    for account in &accounts {
        let store = Arc::clone(&store);
        let account_id = account.id.clone();
        lookups.push(tokio::spawn(async move {
            match store.fetch_transactions(&account_id).await {
                Ok(transactions) => order_newest_first(&transactions)
                    .first()
                    .map(|t| t.date_of_entry),
                Err(e) => {
                    log::warn!(
                        target: "ledgerpro::rank",
                        "activity lookup failed for account {}: {}",
                        account_id,
                        e
                    );
                    None
                }
            }
        }));
    }

    let mut ranked: Vec<(Account, Option<NaiveDate>)> = Vec::with_capacity(accounts.len());
    for (account, lookup) in accounts.into_iter().zip(lookups) {
        let latest = lookup.await.unwrap_or(None);
        ranked.push((account, latest));
    }

    ranked.sort_by(|a, b| {
        a.0.closed.cmp(&b.0.closed).then_with(|| match (a.1, b.1) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        })
    });

    ranked.into_iter().map(|(account, _)| account).collect()
}

// ==================== Closed-Account Guard ====================

/// Verdict of the closed-account guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The account is open; the mutation may proceed
    Allowed,
    /// The account is closed; the mutation must not reach the store
    Blocked,
}

/// Decide whether a transaction mutation may proceed against an account
///
/// Applies to create, update, and delete. Toggling the closed flag
/// itself is never routed through this check.
pub fn guard_mutation(flags: &HashMap<String, bool>, account_id: &str) -> Verdict {
    if flags.get(account_id).copied().unwrap_or(false) {
        Verdict::Blocked
    } else {
        Verdict::Allowed
    }
}

// ==================== Ledger Facade ====================

/// The ledger facade the web layer talks to
///
/// Holds the record store, the closed-flag registry with its in-memory
/// working copy, and the current account selection. The flag map is
/// loaded once by [`Ledger::load`] and written only by
/// [`Ledger::set_closed`], which also flushes it back to the registry.
pub struct Ledger {
    store: StoreRef,
    flags: FlagStoreRef,
    closed: RwLock<HashMap<String, bool>>,
    selected: RwLock<Option<String>>,
}

impl Ledger {
    /// Create a new ledger over a record store and a flag registry
    pub fn new(store: StoreRef, flags: FlagStoreRef) -> Self {
        Self {
            store,
            flags,
            closed: RwLock::new(HashMap::new()),
            selected: RwLock::new(None),
        }
    }

    /// Load the closed-flag map from the registry
    pub async fn load(&mut self) -> LedgerResult<()> {
        let flags = self.flags.load().await?;
        log::info!("loaded {} closed-account flags", flags.len());
        *self.closed.write().unwrap() = flags;
        Ok(())
    }

    /// List accounts ranked for display
    ///
    /// Each stored record gets its closed flag attached before ranking.
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        let records = self.store.fetch_accounts().await?;
        let accounts: Vec<Account> = {
            let flags = self.closed.read().unwrap();
            records
                .into_iter()
                .map(|record| Account {
                    closed: flags.get(&record.id).copied().unwrap_or(false),
                    id: record.id,
                    name: record.name,
                })
                .collect()
        };
        Ok(rank_accounts(Arc::clone(&self.store), accounts).await)
    }

    /// List one account's transactions, ordered newest-first with running
    /// balances attached
    ///
    /// An empty account ID means nothing is selected: the result is empty
    /// and the store is not queried.
    pub async fn list_transactions(&self, account_id: &str) -> LedgerResult<Vec<LedgerEntry>> {
        if account_id.is_empty() {
            return Ok(Vec::new());
        }
        let transactions = self.store.fetch_transactions(account_id).await?;
        Ok(derive_balances(order_newest_first(&transactions)))
    }

    /// Fetch the selected account's rows, discarding the result if the
    /// selection moved while the fetch was in flight
    pub async fn selected_transactions(&self) -> LedgerResult<FetchOutcome> {
        let requested = self.selected_account();
        let account_id = match requested {
            Some(id) => id,
            None => return Ok(FetchOutcome::Loaded(Vec::new())),
        };
        let rows = self.list_transactions(&account_id).await?;
        if self.selected_account().as_deref() != Some(account_id.as_str()) {
            return Ok(FetchOutcome::Stale);
        }
        Ok(FetchOutcome::Loaded(rows))
    }

    /// Apply a guarded transaction mutation against an account
    ///
    /// Validation runs first, then the closed-account guard; both happen
    /// before any store call. After a successful mutation the caller must
    /// reload the affected views.
    pub async fn mutate_transaction(
        &self,
        account_id: &str,
        op: TransactionOp,
    ) -> LedgerResult<MutationOutcome> {
        if account_id.is_empty() {
            return Err(LedgerError::Validation {
                message: "No account selected.".to_string(),
            });
        }
        match op {
            TransactionOp::Create(draft) => {
                let fields = draft.validate()?;
                self.ensure_open(account_id)?;
                let txn = self.store.create_transaction(account_id, fields).await?;
                Ok(MutationOutcome::Created(txn))
            }
            TransactionOp::Update {
                transaction_id,
                draft,
            } => {
                let fields = draft.validate()?;
                self.ensure_open(account_id)?;
                let txn = self
                    .store
                    .update_transaction(&transaction_id, fields)
                    .await?;
                Ok(MutationOutcome::Updated(txn))
            }
            TransactionOp::Delete { transaction_id } => {
                self.ensure_open(account_id)?;
                self.store.delete_transaction(&transaction_id).await?;
                Ok(MutationOutcome::Deleted)
            }
        }
    }

    /// Create an account with the given display name
    pub async fn create_account(&self, name: &str) -> LedgerResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation {
                message: "Account name is required.".to_string(),
            });
        }
        let record = self.store.create_account(name).await?;
        Ok(Account {
            id: record.id,
            name: record.name,
            closed: false,
        })
    }

    /// Toggle an account's closed flag and flush the registry
    ///
    /// Never guarded: reopening a closed account must always be possible.
    /// Closing the currently selected account clears the selection.
    pub async fn set_closed(&self, account_id: &str, closed: bool) -> LedgerResult<()> {
        let mut next = self.closed.read().unwrap().clone();
        next.insert(account_id.to_string(), closed);
        self.flags.save(&next).await?;
        *self.closed.write().unwrap() = next;

        if closed {
            let mut selected = self.selected.write().unwrap();
            if selected.as_deref() == Some(account_id) {
                *selected = None;
            }
        }
        Ok(())
    }

    /// Check an account's closed flag
    pub fn is_closed(&self, account_id: &str) -> bool {
        self.closed
            .read()
            .unwrap()
            .get(account_id)
            .copied()
            .unwrap_or(false)
    }

    /// Change the current account selection; empty IDs clear it
    pub fn select_account(&self, account_id: Option<String>) {
        *self.selected.write().unwrap() = account_id.filter(|id| !id.is_empty());
    }

    /// Get the currently selected account ID
    pub fn selected_account(&self) -> Option<String> {
        self.selected.read().unwrap().clone()
    }

    fn ensure_open(&self, account_id: &str) -> LedgerResult<()> {
        let flags = self.closed.read().unwrap();
        match guard_mutation(&flags, account_id) {
            Verdict::Blocked => Err(LedgerError::AccountClosed {
                id: account_id.to_string(),
            }),
            Verdict::Allowed => Ok(()),
        }
    }
}

// ==================== Tests ====================
