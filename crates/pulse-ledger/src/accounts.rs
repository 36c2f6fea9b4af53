//! Cash accounts.

use pulse_core::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// A user's cash account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: Uuid,
    /// Available cash, never negative
    pub cash: Decimal,
}

/// Per-user cash balances.
///
/// Debits are check-and-debit under the store lock, so two buys cannot
/// both spend the same cash.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

impl AccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an account with starting cash. An existing account is
    /// returned untouched.
    pub fn open(&self, user_id: Uuid, starting_cash: Decimal) -> Account {
        let mut accounts = self.accounts.lock().unwrap();
        accounts
            .entry(user_id)
            .or_insert_with(|| Account {
                user_id,
                cash: starting_cash,
            })
            .clone()
    }

    /// Current balance.
    ///
    /// # Errors
    /// `LedgerError::UnknownAccount` when no account exists for the user.
    pub fn balance(&self, user_id: Uuid) -> Result<Decimal, LedgerError> {
        let accounts = self.accounts.lock().unwrap();
        accounts
            .get(&user_id)
            .map(|account| account.cash)
            .ok_or(LedgerError::UnknownAccount(user_id))
    }

    /// Withdraw `amount`, failing without effect if the balance cannot
    /// cover it. Returns the new balance.
    pub fn debit(&self, user_id: Uuid, amount: Decimal) -> Result<Decimal, LedgerError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&user_id)
            .ok_or(LedgerError::UnknownAccount(user_id))?;

        if amount > account.cash {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available: account.cash,
            });
        }
        account.cash -= amount;
        Ok(account.cash)
    }

    /// Deposit `amount`. Returns the new balance.
    pub fn credit(&self, user_id: Uuid, amount: Decimal) -> Result<Decimal, LedgerError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&user_id)
            .ok_or(LedgerError::UnknownAccount(user_id))?;

        account.cash += amount;
        Ok(account.cash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_open_is_idempotent() {
        let store = AccountStore::new();
        let user = Uuid::new_v4();

        store.open(user, dec!(1000));
        store.debit(user, dec!(400)).unwrap();
        // Re-opening must not reset the balance.
        let account = store.open(user, dec!(1000));
        assert_eq!(account.cash, dec!(600));
    }

    #[test]
    fn test_debit_and_credit() {
        let store = AccountStore::new();
        let user = Uuid::new_v4();
        store.open(user, dec!(1000));

        assert_eq!(store.debit(user, dec!(250)).unwrap(), dec!(750));
        assert_eq!(store.credit(user, dec!(100)).unwrap(), dec!(850));
        assert_eq!(store.balance(user).unwrap(), dec!(850));
    }

    #[test]
    fn test_insufficient_funds_leaves_balance() {
        let store = AccountStore::new();
        let user = Uuid::new_v4();
        store.open(user, dec!(100));

        let err = store.debit(user, dec!(100.01));
        assert!(matches!(
            err,
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(store.balance(user).unwrap(), dec!(100));
    }

    #[test]
    fn test_unknown_account() {
        let store = AccountStore::new();
        let user = Uuid::new_v4();

        assert!(matches!(
            store.balance(user),
            Err(LedgerError::UnknownAccount(_))
        ));
        assert!(matches!(
            store.debit(user, dec!(1)),
            Err(LedgerError::UnknownAccount(_))
        ));
    }
}
