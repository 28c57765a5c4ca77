//! TriPact Custody - Value-custody substrate
//!
//! The vault holds value pending resolution of an agreement. It is:
//! - Account-keyed by AccountId
//! - Append-only (every movement produces a journal entry)
//! - Atomic (a transfer debits and credits under one lock, or not at all)
//!
//! # Invariants
//!
//! 1. No negative balances
//! 2. No zero-amount movements
//! 3. Overflow-checked arithmetic only
//!
//! The agreement core consumes this crate through the [`Vault`] trait; it
//! never assumes a particular implementation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use tripact_types::{AccountId, Amount, EntryId};

/// Errors that can occur in vault operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Insufficient balance: have {available}, need {required}")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("Balance overflow")]
    AmountOverflow,

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Vault backend error: {message}")]
    Backend { message: String },
}

pub type Result<T> = std::result::Result<T, VaultError>;

/// Direction of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    /// Credit (increase) to an account
    Credit,
    /// Debit (decrease) from an account
    Debit,
}

/// A single journal entry (one side of a movement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    pub entry_id: EntryId,
    pub account: AccountId,
    pub entry_type: EntryType,
    pub amount: Amount,
    pub balance_after: Amount,
    pub at: DateTime<Utc>,
}

/// The custody capability consumed by the agreement core
///
/// Implementations must apply each call atomically: either the whole
/// movement lands, or no state changes.
pub trait Vault: Send + Sync {
    /// Deposit inbound value into an account
    fn deposit(&self, to: &AccountId, amount: Amount) -> Result<EntryId>;

    /// Move custodied value from one account to another
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<EntryId>;

    /// Current balance of an account
    fn balance(&self, of: &AccountId) -> Amount;
}

/// In-memory vault with an append-only journal
#[derive(Clone, Default)]
pub struct InMemoryVault {
    inner: Arc<RwLock<VaultState>>,
}

#[derive(Default)]
struct VaultState {
    balances: HashMap<AccountId, Amount>,
    entries: Vec<VaultEntry>,
}

impl VaultState {
    fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn record(&mut self, account: &AccountId, entry_type: EntryType, amount: Amount) -> EntryId {
        let balance_after = self.balance(account);
        let entry = VaultEntry {
            entry_id: EntryId::new(),
            account: account.clone(),
            entry_type,
            amount,
            balance_after,
            at: Utc::now(),
        };
        let entry_id = entry.entry_id.clone();
        self.entries.push(entry);
        entry_id
    }

    fn credit(&mut self, account: &AccountId, amount: Amount) -> Result<EntryId> {
        let new_balance = self
            .balance(account)
            .checked_add(amount)
            .ok_or(VaultError::AmountOverflow)?;
        self.balances.insert(account.clone(), new_balance);
        Ok(self.record(account, EntryType::Credit, amount))
    }

    fn debit(&mut self, account: &AccountId, amount: Amount) -> Result<EntryId> {
        let current = self.balance(account);
        let new_balance = current
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientBalance {
                available: current.0,
                required: amount.0,
            })?;
        self.balances.insert(account.clone(), new_balance);
        Ok(self.record(account, EntryType::Debit, amount))
    }
}

impl InMemoryVault {
    /// Create a new empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove value from an account outside any agreement operation
    ///
    /// Not part of the [`Vault`] trait: agreements never withdraw. This
    /// models out-of-band manipulation of custodied funds, the situation
    /// the agreement's balance invariant guards against.
    pub fn withdraw(&self, from: &AccountId, amount: Amount) -> Result<EntryId> {
        if amount.is_zero() {
            return Err(VaultError::ZeroAmount);
        }
        let mut state = self.inner.write();
        let entry_id = state.debit(from, amount)?;
        debug!("Vault withdraw: {} from {}", amount, from);
        Ok(entry_id)
    }

    /// All journal entries, oldest first
    pub fn entries(&self) -> Vec<VaultEntry> {
        self.inner.read().entries.clone()
    }

    /// Journal entries for one account, oldest first
    pub fn account_entries(&self, account: &AccountId) -> Vec<VaultEntry> {
        self.inner
            .read()
            .entries
            .iter()
            .filter(|e| &e.account == account)
            .cloned()
            .collect()
    }

    /// Total number of journal entries
    pub fn entry_count(&self) -> usize {
        self.inner.read().entries.len()
    }
}

impl Vault for InMemoryVault {
    fn deposit(&self, to: &AccountId, amount: Amount) -> Result<EntryId> {
        if amount.is_zero() {
            return Err(VaultError::ZeroAmount);
        }
        let mut state = self.inner.write();
        let entry_id = state.credit(to, amount)?;
        debug!("Vault deposit: {} to {}", amount, to);
        Ok(entry_id)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<EntryId> {
        if amount.is_zero() {
            return Err(VaultError::ZeroAmount);
        }
        let mut state = self.inner.write();
        // Reject before mutating either side, so a credit-side overflow
        // cannot strand a half-applied movement.
        state
            .balance(to)
            .checked_add(amount)
            .ok_or(VaultError::AmountOverflow)?;
        state.debit(from, amount)?;
        let entry_id = state.credit(to, amount)?;
        info!("Vault transfer: {} from {} to {}", amount, from, to);
        Ok(entry_id)
    }

    fn balance(&self, of: &AccountId) -> Amount {
        self.inner.read().balance(of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_and_balance() {
        let vault = InMemoryVault::new();
        let account = AccountId::new();

        assert_eq!(vault.balance(&account), Amount::zero());

        vault.deposit(&account, Amount::new(1000)).unwrap();
        assert_eq!(vault.balance(&account), Amount::new(1000));
    }

    #[test]
    fn test_no_negative_balance() {
        let vault = InMemoryVault::new();
        let account = AccountId::new();

        vault.deposit(&account, Amount::new(100)).unwrap();

        let result = vault.withdraw(&account, Amount::new(200));
        assert!(matches!(
            result,
            Err(VaultError::InsufficientBalance {
                available: 100,
                required: 200
            })
        ));
        assert_eq!(vault.balance(&account), Amount::new(100));
    }

    #[test]
    fn test_transfer() {
        let vault = InMemoryVault::new();
        let from = AccountId::new();
        let to = AccountId::new();

        vault.deposit(&from, Amount::new(1000)).unwrap();
        vault.transfer(&from, &to, Amount::new(400)).unwrap();

        assert_eq!(vault.balance(&from), Amount::new(600));
        assert_eq!(vault.balance(&to), Amount::new(400));
    }

    #[test]
    fn test_transfer_insufficient_leaves_state_unchanged() {
        let vault = InMemoryVault::new();
        let from = AccountId::new();
        let to = AccountId::new();

        vault.deposit(&from, Amount::new(100)).unwrap();
        let before = vault.entry_count();

        let result = vault.transfer(&from, &to, Amount::new(500));
        assert!(matches!(
            result,
            Err(VaultError::InsufficientBalance { .. })
        ));
        assert_eq!(vault.balance(&from), Amount::new(100));
        assert_eq!(vault.balance(&to), Amount::zero());
        assert_eq!(vault.entry_count(), before);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let vault = InMemoryVault::new();
        let account = AccountId::new();

        assert!(matches!(
            vault.deposit(&account, Amount::zero()),
            Err(VaultError::ZeroAmount)
        ));
        assert!(matches!(
            vault.transfer(&account, &AccountId::new(), Amount::zero()),
            Err(VaultError::ZeroAmount)
        ));
    }

    #[test]
    fn test_journal_entries() {
        let vault = InMemoryVault::new();
        let from = AccountId::new();
        let to = AccountId::new();

        vault.deposit(&from, Amount::new(500)).unwrap();
        vault.transfer(&from, &to, Amount::new(200)).unwrap();

        // deposit + debit side + credit side
        assert_eq!(vault.entry_count(), 3);

        let from_entries = vault.account_entries(&from);
        assert_eq!(from_entries.len(), 2);
        assert_eq!(from_entries[0].entry_type, EntryType::Credit);
        assert_eq!(from_entries[0].balance_after, Amount::new(500));
        assert_eq!(from_entries[1].entry_type, EntryType::Debit);
        assert_eq!(from_entries[1].balance_after, Amount::new(300));
    }

    #[test]
    fn test_overflow_checked() {
        let vault = InMemoryVault::new();
        let account = AccountId::new();

        vault.deposit(&account, Amount::new(u64::MAX)).unwrap();
        let result = vault.deposit(&account, Amount::new(1));
        assert!(matches!(result, Err(VaultError::AmountOverflow)));
        assert_eq!(vault.balance(&account), Amount::new(u64::MAX));
    }
}
