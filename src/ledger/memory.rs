//! In-memory asset ledger.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{AssetLedger, LedgerError};
use crate::domain::{AccountId, Amount, AssetId};

/// A process-local [`AssetLedger`] keeping balances in a map.
///
/// Intended for tests, simulations, and embedding the engine without an
/// external token backend.  Balances are created by [`mint`](Self::mint);
/// transfers check only the payer's balance (there is no allowance
/// model, so [`LedgerError::Unauthorized`] is never produced here).
///
/// # Examples
///
/// ```
/// use pairpool::domain::{AccountId, Amount, AssetId};
/// use pairpool::ledger::{AssetLedger, MemoryLedger};
///
/// let ledger = MemoryLedger::new();
/// let gold = AssetId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([10u8; 32]);
///
/// ledger.mint(gold, alice, Amount::new(500));
/// assert_eq!(ledger.balance_of(gold, alice), Amount::new(500));
/// ```
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: Mutex<HashMap<(AssetId, AccountId), u128>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `account` out of thin air.
    pub fn mint(&self, asset: AssetId, account: AccountId, amount: Amount) {
        let mut balances = self.balances.lock();
        let entry = balances.entry((asset, account)).or_insert(0);
        *entry = entry.saturating_add(amount.get());
    }

    fn transfer(
        &self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        let mut balances = self.balances.lock();
        let from_balance = balances.get(&(asset, from)).copied().unwrap_or(0);
        let Some(remaining) = from_balance.checked_sub(amount.get()) else {
            return Err(LedgerError::InsufficientBalance {
                asset,
                holder: from,
            });
        };
        if remaining == 0 {
            balances.remove(&(asset, from));
        } else {
            balances.insert((asset, from), remaining);
        }
        let entry = balances.entry((asset, to)).or_insert(0);
        *entry = entry.saturating_add(amount.get());
        Ok(())
    }
}

impl AssetLedger for MemoryLedger {
    fn transfer_in(
        &self,
        asset: AssetId,
        payer: AccountId,
        pool: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.transfer(asset, payer, pool, amount)
    }

    fn transfer_out(
        &self,
        asset: AssetId,
        pool: AccountId,
        payee: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.transfer(asset, pool, payee, amount)
    }

    fn balance_of(&self, asset: AssetId, holder: AccountId) -> Amount {
        let balances = self.balances.lock();
        Amount::new(balances.get(&(asset, holder)).copied().unwrap_or(0))
    }
}
