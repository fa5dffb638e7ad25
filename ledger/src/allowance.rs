//! # Allowance Book
//!
//! The (owner, spender) → amount mapping behind the simple-transfer
//! interface. Exclusively owned and mutated here; the transfer engine emits
//! the Approval events. Absence of an entry is equivalent to zero, and
//! entries are never deleted — zero is a valid steady state, not absence.
//!
//! Notified sends, mints, and burns never touch this book. That asymmetry
//! is the point: the allowance is the simple-transfer interface's own
//! authorization mechanism, the operator relation is the notified one's.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::address::Address;
use crate::error::{LedgerError, Result};
use crate::Amount;

/// Owner → spender → granted amount.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowanceStore {
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

impl AllowanceStore {
    /// Creates an empty allowance book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current allowance, zero when none was ever granted.
    pub fn get(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Sets the allowance unconditionally (last-write-wins) and returns the
    /// new value.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ZeroAddress`] if owner or spender is the null address.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) -> Result<Amount> {
        if owner.is_null() {
            return Err(LedgerError::ZeroAddress { role: "owner" });
        }
        if spender.is_null() {
            return Err(LedgerError::ZeroAddress { role: "spender" });
        }

        self.allowances
            .entry(owner.clone())
            .or_default()
            .insert(spender.clone(), amount);

        Ok(amount)
    }

    /// Adds `delta` to the current allowance and returns the new value.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AmountOverflow`] if the sum exceeds the amount range,
    /// plus the null-address checks of [`approve`](Self::approve).
    pub fn increase(&mut self, owner: &Address, spender: &Address, delta: Amount) -> Result<Amount> {
        let current = self.get(owner, spender);
        let next = current.checked_add(delta).ok_or(LedgerError::AmountOverflow)?;
        self.approve(owner, spender, next)
    }

    /// Subtracts `delta` from the current allowance and returns the new value.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AllowanceUnderflow`] if `delta` exceeds the current
    /// allowance, plus the null-address checks of [`approve`](Self::approve).
    pub fn decrease(&mut self, owner: &Address, spender: &Address, delta: Amount) -> Result<Amount> {
        let current = self.get(owner, spender);
        let next = current
            .checked_sub(delta)
            .ok_or_else(|| LedgerError::AllowanceUnderflow {
                owner: owner.clone(),
                spender: spender.clone(),
                current,
                requested: delta,
            })?;
        self.approve(owner, spender, next)
    }

    /// Decrements the allowance by a spent amount and returns the new value.
    ///
    /// Used by the transfer engine on the simple-transfer path only. Never
    /// invoked for self-transfers (owner == spender) or for notified
    /// sends/mints/burns.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientAllowance`] if `amount` exceeds the
    /// current allowance.
    pub fn consume(&mut self, owner: &Address, spender: &Address, amount: Amount) -> Result<Amount> {
        let current = self.get(owner, spender);
        if amount > current {
            return Err(LedgerError::InsufficientAllowance {
                owner: owner.clone(),
                spender: spender.clone(),
                allowed: current,
                requested: amount,
            });
        }
        self.approve(owner, spender, current - amount)
    }
}
