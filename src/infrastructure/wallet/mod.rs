//! # Company Wallet
//!
//! Prepaid balance ledger for booking charges.
//!
//! Every balance movement carries a caller-supplied reference and is
//! idempotent per reference: replaying a debit or reversal is a no-op,
//! so a crashed booking walk can safely retry its wallet calls. The
//! booking orchestrator debits before calling the carrier and reverses
//! under `{key}:reversal` when the attempt fails recoverably.

use crate::domain::value_objects::{CompanyId, Money, Timestamp};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error type for wallet operations.
#[derive(Debug, Clone, Error)]
pub enum WalletError {
    /// The company has no wallet.
    #[error("no wallet for company {0}")]
    UnknownCompany(CompanyId),

    /// The balance cannot cover the debit.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// The amount the debit needed.
        required: Money,
        /// The balance at the time of the debit.
        available: Money,
    },

    /// A reversal referenced a debit that was never recorded.
    #[error("no ledger entry for reference {0}")]
    ReferenceNotFound(String),

    /// Ledger arithmetic failed.
    #[error("wallet arithmetic failed: {0}")]
    Arithmetic(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Direction of a ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerKind {
    /// Balance top-up.
    Credit,
    /// Booking charge.
    Debit,
    /// Compensation of an earlier debit.
    Reversal,
}

/// One recorded balance movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Caller-supplied idempotency reference.
    pub reference: String,
    /// Movement direction.
    pub kind: LedgerKind,
    /// Amount moved.
    pub amount: Money,
    /// When the movement was recorded.
    pub recorded_at: Timestamp,
}

/// Port for company wallet operations.
#[async_trait]
pub trait WalletService: Send + Sync + std::fmt::Debug {
    /// Returns the current balance.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::UnknownCompany` if no wallet exists.
    async fn balance(&self, company: &CompanyId) -> WalletResult<Money>;

    /// Credits the balance under the given reference. Idempotent per
    /// reference.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::UnknownCompany` if no wallet exists.
    async fn credit(&self, company: &CompanyId, amount: Money, reference: &str)
        -> WalletResult<()>;

    /// Debits the balance under the given reference. Idempotent per
    /// reference: a replayed debit is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::InsufficientBalance` if the balance cannot
    /// cover the amount, `WalletError::UnknownCompany` if no wallet
    /// exists.
    async fn debit(&self, company: &CompanyId, amount: Money, reference: &str) -> WalletResult<()>;

    /// Reverses an earlier debit, crediting its amount back under
    /// `reversal_reference`. Idempotent per reversal reference.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::ReferenceNotFound` if the original debit was
    /// never recorded.
    async fn reverse(
        &self,
        company: &CompanyId,
        debit_reference: &str,
        reversal_reference: &str,
    ) -> WalletResult<()>;
}

#[derive(Debug, Default)]
struct Account {
    balance: Money,
    ledger: Vec<LedgerEntry>,
    by_reference: HashMap<String, usize>,
}

impl Account {
    fn record(&mut self, reference: &str, kind: LedgerKind, amount: Money) {
        self.by_reference
            .insert(reference.to_string(), self.ledger.len());
        self.ledger.push(LedgerEntry {
            reference: reference.to_string(),
            kind,
            amount,
            recorded_at: Timestamp::now(),
        });
    }
}

/// In-memory wallet backed by a concurrent map.
///
/// Each operation locks only the company's own account shard, so walks
/// for different companies never contend.
#[derive(Debug, Default)]
pub struct InMemoryWallet {
    accounts: DashMap<CompanyId, Account>,
}

impl InMemoryWallet {
    /// Creates an empty wallet store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a wallet with an initial balance.
    pub fn open_account(&self, company: CompanyId, opening_balance: Money) {
        self.accounts.insert(
            company,
            Account {
                balance: opening_balance,
                ledger: Vec::new(),
                by_reference: HashMap::new(),
            },
        );
    }

    /// Returns the ledger for a company, newest last.
    #[must_use]
    pub fn ledger(&self, company: &CompanyId) -> Vec<LedgerEntry> {
        self.accounts
            .get(company)
            .map(|account| account.ledger.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WalletService for InMemoryWallet {
    async fn balance(&self, company: &CompanyId) -> WalletResult<Money> {
        self.accounts
            .get(company)
            .map(|account| account.balance)
            .ok_or_else(|| WalletError::UnknownCompany(company.clone()))
    }

    async fn credit(
        &self,
        company: &CompanyId,
        amount: Money,
        reference: &str,
    ) -> WalletResult<()> {
        let mut account = self
            .accounts
            .get_mut(company)
            .ok_or_else(|| WalletError::UnknownCompany(company.clone()))?;
        if account.by_reference.contains_key(reference) {
            return Ok(());
        }
        account.balance = account
            .balance
            .safe_add(amount)
            .map_err(|e| WalletError::Arithmetic(e.to_string()))?;
        account.record(reference, LedgerKind::Credit, amount);
        Ok(())
    }

    async fn debit(&self, company: &CompanyId, amount: Money, reference: &str) -> WalletResult<()> {
        let mut account = self
            .accounts
            .get_mut(company)
            .ok_or_else(|| WalletError::UnknownCompany(company.clone()))?;
        if account.by_reference.contains_key(reference) {
            return Ok(());
        }
        if account.balance < amount {
            return Err(WalletError::InsufficientBalance {
                required: amount,
                available: account.balance,
            });
        }
        account.balance = account
            .balance
            .safe_sub(amount)
            .map_err(|e| WalletError::Arithmetic(e.to_string()))?;
        account.record(reference, LedgerKind::Debit, amount);
        Ok(())
    }

    async fn reverse(
        &self,
        company: &CompanyId,
        debit_reference: &str,
        reversal_reference: &str,
    ) -> WalletResult<()> {
        let mut account = self
            .accounts
            .get_mut(company)
            .ok_or_else(|| WalletError::UnknownCompany(company.clone()))?;
        if account.by_reference.contains_key(reversal_reference) {
            return Ok(());
        }
        let amount = account
            .by_reference
            .get(debit_reference)
            .and_then(|idx| account.ledger.get(*idx))
            .filter(|entry| entry.kind == LedgerKind::Debit)
            .map(|entry| entry.amount)
            .ok_or_else(|| WalletError::ReferenceNotFound(debit_reference.to_string()))?;
        account.balance = account
            .balance
            .safe_add(amount)
            .map_err(|e| WalletError::Arithmetic(e.to_string()))?;
        account.record(reversal_reference, LedgerKind::Reversal, amount);
        Ok(())
    }
}
