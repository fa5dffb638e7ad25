//! # The Ledger — Transfer Engine & Public Surface
//!
//! Orchestrates every balance-changing operation over one shared state:
//! simple transfers (allowance-based, never hooked), notified sends and
//! burns (operator-authorized, hook-dispatching), host-gated minting and
//! batch operations, and the deliberately inert upgrade/wrapping surface.
//!
//! ## State transitions
//!
//! A simple transfer `spender: from -> to` for amount `A`:
//!
//! 1. Verify `from`/`to` are non-null.
//! 2. Verify `available(from) >= A` and move the static balance.
//! 3. Emit `Transfer`.
//! 4. If `spender != from`, consume `A` of the (from, spender) allowance
//!    and emit `Approval` with the reduced value.
//!
//! A notified send additionally brackets step 2-3 with the pre-send and
//! post-receive hooks — pre-send strictly before any mutation, post-receive
//! strictly after commit — and never touches the allowance book.
//!
//! ## Atomicity
//!
//! Every public mutating entry point runs under a state snapshot that is
//! restored on error. An operation that fails — including one failed by a
//! hook after the move committed — leaves balances, allowances, operator
//! relations, and the event log exactly as it found them. Reentrant calls
//! made by hooks nest their own snapshots; reverting the outer operation
//! reverts the inner effects with it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::access::AccessControl;
use crate::address::Address;
use crate::allowance::AllowanceStore;
use crate::config::{DECIMALS, GRANULARITY, LEDGER_INTERFACES};
use crate::error::{LedgerError, Result};
use crate::event::{EventRecord, LedgerEvent};
use crate::flow::FlowSource;
use crate::hooks::{HookContext, HookDispatcher};
use crate::operators::OperatorRegistry;
use crate::registry::InterfaceRegistry;
use crate::token::TokenMetadata;
use crate::{Amount, SignedAmount};

/// One-time construction parameters for a ledger instance.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Informational reference to the underlying token.
    pub underlying: Address,
    /// The underlying token's own display decimals.
    pub underlying_decimals: u8,
    /// The sole collaborator allowed through the host gate.
    pub host: Address,
    /// The ledger contract's own identity (the self gate).
    pub ledger_identity: Address,
    /// Process-wide default operators, verbatim.
    pub default_operators: Vec<Address>,
}

/// Restores the mutable state on failed operations.
struct Snapshot {
    balances: HashMap<Address, SignedAmount>,
    total_supply: Amount,
    allowances: AllowanceStore,
    operators: OperatorRegistry,
    code_address: Address,
    events_len: usize,
}

/// The account-balance ledger.
pub struct Ledger {
    metadata: TokenMetadata,
    access: AccessControl,
    allowances: AllowanceStore,
    operators: OperatorRegistry,
    hooks: HookDispatcher,
    flow: Arc<dyn FlowSource>,
    /// Signed static balance term per account. Lazily created on first
    /// mutation; may go negative when the flow term compensates.
    balances: HashMap<Address, SignedAmount>,
    /// Sum of all static balances at all times.
    total_supply: Amount,
    /// Current logic code reference, swappable only through the host gate.
    code_address: Address,
    events: Vec<EventRecord>,
}

impl Ledger {
    /// Constructs and initializes a ledger: fixes the metadata, registers
    /// the ledger's token interfaces with the registry collaborator, and
    /// emits the zero-amount Transfer discovery signal for indexers.
    pub fn new(
        config: LedgerConfig,
        registry: Arc<dyn InterfaceRegistry>,
        flow: Arc<dyn FlowSource>,
    ) -> Self {
        for tag in LEDGER_INTERFACES {
            registry.register(&config.ledger_identity, tag);
        }

        let mut ledger = Self {
            metadata: TokenMetadata::new(
                config.name,
                config.symbol,
                config.underlying,
                config.underlying_decimals,
            ),
            access: AccessControl::new(config.host, config.ledger_identity.clone()),
            allowances: AllowanceStore::new(),
            operators: OperatorRegistry::new(config.default_operators),
            hooks: HookDispatcher::new(registry),
            flow,
            balances: HashMap::new(),
            total_supply: 0,
            code_address: config.ledger_identity,
            events: Vec::new(),
        };

        ledger.record(LedgerEvent::Transfer {
            from: Address::null(),
            to: Address::null(),
            amount: 0,
        });

        tracing::debug!(name = ledger.metadata.name(), "ledger initialized");
        ledger
    }

    // -----------------------------------------------------------------------
    // Metadata reads
    // -----------------------------------------------------------------------

    /// Token metadata (name, symbol, underlying reference).
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Human-readable token name.
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        self.metadata.symbol()
    }

    /// Display decimals, fixed at 18.
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Transfer granularity, fixed at 1.
    pub fn granularity(&self) -> Amount {
        GRANULARITY
    }

    /// Current total supply: the sum of all static balances.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Informational reference to the underlying token.
    pub fn underlying_token(&self) -> &Address {
        self.metadata.underlying()
    }

    /// The externally visible balance: static term plus the collaborator's
    /// flow term, clamped to zero.
    pub fn balance_of(&self, account: &Address) -> Amount {
        let composed = self
            .static_balance_of(account)
            .saturating_add(self.flow.flow_term(account));
        if composed <= 0 {
            0
        } else {
            composed as Amount
        }
    }

    /// The raw static balance term. Negative values are possible while the
    /// flow term compensates; only [`balance_of`](Self::balance_of) is
    /// guaranteed non-negative.
    pub fn static_balance_of(&self, account: &Address) -> SignedAmount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Number of accounts with a materialized balance entry.
    pub fn tracked_accounts(&self) -> usize {
        self.balances.len()
    }

    /// The designated host collaborator.
    pub fn host(&self) -> &Address {
        self.access.host()
    }

    /// The ledger contract's own identity.
    pub fn ledger_identity(&self) -> &Address {
        self.access.ledger_identity()
    }

    /// The current logic code reference.
    pub fn code_address(&self) -> &Address {
        &self.code_address
    }

    /// The full event log, oldest first.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Event records appended after sequence `seq` (exclusive).
    pub fn events_since(&self, seq: u64) -> &[EventRecord] {
        let start = self
            .events
            .iter()
            .position(|rec| rec.seq > seq)
            .unwrap_or(self.events.len());
        &self.events[start..]
    }

    // -----------------------------------------------------------------------
    // Simple transfer interface
    // -----------------------------------------------------------------------

    /// Transfers the caller's own tokens. Never invokes any hook and never
    /// touches the allowance book (a self-spend needs no grant).
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<()> {
        self.guarded(|ledger| ledger.simple_transfer(caller, caller, to, amount))
    }

    /// Spends `from`'s tokens against the caller's allowance. The allowance
    /// is consumed after the move; self-transfers (caller == from) skip the
    /// allowance entirely.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        self.guarded(|ledger| ledger.simple_transfer(caller, from, to, amount))
    }

    /// Transfers the caller's entire visible balance and returns the amount
    /// moved.
    pub fn transfer_all(&mut self, caller: &Address, to: &Address) -> Result<Amount> {
        let amount = self.balance_of(caller);
        self.guarded(|ledger| {
            ledger.simple_transfer(caller, caller, to, amount)?;
            Ok(amount)
        })
    }

    /// Sets the caller's allowance for `spender` (last-write-wins).
    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: Amount) -> Result<()> {
        self.guarded(|ledger| {
            let value = ledger.allowances.approve(caller, spender, amount)?;
            ledger.record(LedgerEvent::Approval {
                owner: caller.clone(),
                spender: spender.clone(),
                amount: value,
            });
            Ok(())
        })
    }

    /// Current allowance granted by `owner` to `spender`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get(owner, spender)
    }

    /// Raises the caller's allowance for `spender` by `delta`.
    pub fn increase_allowance(
        &mut self,
        caller: &Address,
        spender: &Address,
        delta: Amount,
    ) -> Result<()> {
        self.guarded(|ledger| {
            let value = ledger.allowances.increase(caller, spender, delta)?;
            ledger.record(LedgerEvent::Approval {
                owner: caller.clone(),
                spender: spender.clone(),
                amount: value,
            });
            Ok(())
        })
    }

    /// Lowers the caller's allowance for `spender` by `delta`. Fails
    /// without side effects when `delta` exceeds the current allowance.
    pub fn decrease_allowance(
        &mut self,
        caller: &Address,
        spender: &Address,
        delta: Amount,
    ) -> Result<()> {
        self.guarded(|ledger| {
            let value = ledger.allowances.decrease(caller, spender, delta)?;
            ledger.record(LedgerEvent::Approval {
                owner: caller.clone(),
                spender: spender.clone(),
                amount: value,
            });
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Notified transfer interface
    // -----------------------------------------------------------------------

    /// Sends the caller's own tokens with hook notification. Contract-like
    /// recipients must have a registered receiver hook.
    pub fn send(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
        user_data: Vec<u8>,
    ) -> Result<()> {
        self.guarded(|ledger| {
            ledger.notified_send(caller, caller, to, amount, user_data, Vec::new(), true)
        })
    }

    /// Sends `from`'s tokens as an authorized operator.
    pub fn operator_send(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    ) -> Result<()> {
        self.guarded(|ledger| {
            ledger.require_operator(caller, from)?;
            ledger.notified_send(caller, from, to, amount, user_data, operator_data, true)
        })
    }

    /// Burns the caller's own tokens.
    pub fn burn(&mut self, caller: &Address, amount: Amount, user_data: Vec<u8>) -> Result<()> {
        self.guarded(|ledger| ledger.do_burn(caller, caller, amount, user_data, Vec::new()))
    }

    /// Burns `account`'s tokens as an authorized operator.
    pub fn operator_burn(
        &mut self,
        caller: &Address,
        account: &Address,
        amount: Amount,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    ) -> Result<()> {
        self.guarded(|ledger| {
            ledger.require_operator(caller, account)?;
            ledger.do_burn(caller, account, amount, user_data, operator_data)
        })
    }

    /// Whether `operator` may send/burn on behalf of `holder`.
    pub fn is_operator_for(&self, operator: &Address, holder: &Address) -> bool {
        self.operators.is_operator_for(operator, holder)
    }

    /// Grants `operator` rights over the caller's tokens. Authorizing
    /// yourself is a harmless no-op — a holder is always its own operator.
    pub fn authorize_operator(&mut self, caller: &Address, operator: &Address) -> Result<()> {
        if operator.is_null() {
            return Err(LedgerError::ZeroAddress { role: "operator" });
        }
        if operator == caller {
            return Ok(());
        }
        self.operators.authorize(caller, operator);
        self.record(LedgerEvent::AuthorizedOperator {
            operator: operator.clone(),
            holder: caller.clone(),
        });
        Ok(())
    }

    /// Revokes `operator`'s rights over the caller's tokens. For a default
    /// operator the revocation applies to this caller only. Revoking
    /// yourself is a no-op — self-operation cannot be renounced.
    pub fn revoke_operator(&mut self, caller: &Address, operator: &Address) -> Result<()> {
        if operator.is_null() {
            return Err(LedgerError::ZeroAddress { role: "operator" });
        }
        if operator == caller {
            return Ok(());
        }
        self.operators.revoke(caller, operator);
        self.record(LedgerEvent::RevokedOperator {
            operator: operator.clone(),
            holder: caller.clone(),
        });
        Ok(())
    }

    /// The configured default-operator list, verbatim.
    pub fn default_operators(&self) -> &[Address] {
        self.operators.default_operators()
    }

    // -----------------------------------------------------------------------
    // Host-gated operations
    // -----------------------------------------------------------------------

    /// Host-submitted approve on behalf of `account`.
    pub fn operation_approve(
        &mut self,
        caller: &Address,
        account: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<()> {
        self.guarded(|ledger| {
            ledger.access.require_host(caller)?;
            let value = ledger.allowances.approve(account, spender, amount)?;
            ledger.record(LedgerEvent::Approval {
                owner: account.clone(),
                spender: spender.clone(),
                amount: value,
            });
            Ok(())
        })
    }

    /// Host-submitted transferFrom: `spender` spends `account`'s allowance.
    pub fn operation_transfer_from(
        &mut self,
        caller: &Address,
        account: &Address,
        spender: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        self.guarded(|ledger| {
            ledger.access.require_host(caller)?;
            ledger.simple_transfer(spender, account, to, amount)
        })
    }

    /// Host-gated mint. The host is recorded as the operator; contract-like
    /// recipients must acknowledge when `ack_required` is set.
    pub fn operation_mint(
        &mut self,
        caller: &Address,
        account: &Address,
        amount: Amount,
        ack_required: bool,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    ) -> Result<()> {
        self.guarded(|ledger| {
            ledger.access.require_host(caller)?;
            ledger.do_mint(caller, account, amount, ack_required, user_data, operator_data)
        })
    }

    /// Host-gated logic code swap — the single modeled entry point of the
    /// proxy mechanism.
    pub fn update_code(&mut self, caller: &Address, code: Address) -> Result<()> {
        self.access.require_host(caller)?;
        if code.is_null() {
            return Err(LedgerError::ZeroAddress { role: "code" });
        }
        self.code_address = code.clone();
        self.record(LedgerEvent::CodeUpdated { code });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Self-gated operations
    // -----------------------------------------------------------------------

    /// Approve on behalf of `account`, callable only by the ledger's own
    /// identity. Consumed by the external permit extension.
    pub fn self_approve_for(
        &mut self,
        caller: &Address,
        account: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<()> {
        self.guarded(|ledger| {
            ledger.access.require_self(caller)?;
            let value = ledger.allowances.approve(account, spender, amount)?;
            ledger.record(LedgerEvent::Approval {
                owner: account.clone(),
                spender: spender.clone(),
                amount: value,
            });
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Disabled surface
    // -----------------------------------------------------------------------
    //
    // This ledger variant is not backed 1:1 by a wrapped underlying asset,
    // so the whole wrapping/upgrade family is inert. The entry points stay
    // on the surface for interface compatibility and fail deterministically
    // instead of vanishing into missing-method errors.

    /// Disabled: wrap underlying tokens into settlement tokens.
    pub fn upgrade(&mut self, _caller: &Address, _amount: Amount) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    /// Disabled: wrap underlying tokens to a third party.
    pub fn upgrade_to(&mut self, _caller: &Address, _to: &Address, _amount: Amount) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    /// Disabled: unwrap settlement tokens back to the underlying.
    pub fn downgrade(&mut self, _caller: &Address, _amount: Amount) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    /// Disabled: host-submitted wrap.
    pub fn operation_upgrade(
        &mut self,
        _caller: &Address,
        _account: &Address,
        _amount: Amount,
    ) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    /// Disabled: host-submitted unwrap.
    pub fn operation_downgrade(
        &mut self,
        _caller: &Address,
        _account: &Address,
        _amount: Amount,
    ) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    /// Disabled: self-gated mint placeholder.
    pub fn self_mint(
        &mut self,
        _caller: &Address,
        _account: &Address,
        _amount: Amount,
        _user_data: Vec<u8>,
    ) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    /// Disabled: self-gated burn placeholder.
    pub fn self_burn(
        &mut self,
        _caller: &Address,
        _account: &Address,
        _amount: Amount,
        _user_data: Vec<u8>,
    ) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    /// Disabled: self-gated transferFrom placeholder.
    pub fn self_transfer_from(
        &mut self,
        _caller: &Address,
        _holder: &Address,
        _spender: &Address,
        _to: &Address,
        _amount: Amount,
    ) -> Result<()> {
        Err(LedgerError::OperationDisabled)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Runs `op` under a snapshot of the mutable state, restoring it if the
    /// operation fails. This is what makes every entry point all-or-nothing
    /// even when a hook aborts after the move committed.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.snapshot();
        let result = op(self);
        if result.is_err() {
            self.restore(snapshot);
        }
        result
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            balances: self.balances.clone(),
            total_supply: self.total_supply,
            allowances: self.allowances.clone(),
            operators: self.operators.clone(),
            code_address: self.code_address.clone(),
            events_len: self.events.len(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.balances = snapshot.balances;
        self.total_supply = snapshot.total_supply;
        self.allowances = snapshot.allowances;
        self.operators = snapshot.operators;
        self.code_address = snapshot.code_address;
        self.events.truncate(snapshot.events_len);
    }

    fn record(&mut self, event: LedgerEvent) {
        let seq = self.events.len() as u64;
        self.events.push(EventRecord::new(seq, event));
    }

    fn require_operator(&self, operator: &Address, holder: &Address) -> Result<()> {
        if self.operators.is_operator_for(operator, holder) {
            Ok(())
        } else {
            Err(LedgerError::OperatorNotAuthorized {
                operator: operator.clone(),
                holder: holder.clone(),
            })
        }
    }

    fn to_signed(amount: Amount) -> Result<SignedAmount> {
        SignedAmount::try_from(amount).map_err(|_| LedgerError::AmountOverflow)
    }

    /// The debit/credit primitive. Checks the debited account's *composed*
    /// available balance, then applies signed arithmetic to both static
    /// terms — the static term itself may go negative when the flow term
    /// covers the difference.
    fn move_tokens(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        let signed = Self::to_signed(amount)?;

        let available = self.balance_of(from);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                account: from.clone(),
                available,
                requested: amount,
            });
        }

        let debited = self.balances.entry(from.clone()).or_insert(0);
        *debited = debited.checked_sub(signed).ok_or(LedgerError::AmountOverflow)?;
        let credited = self.balances.entry(to.clone()).or_insert(0);
        *credited = credited.checked_add(signed).ok_or(LedgerError::AmountOverflow)?;

        Ok(())
    }

    fn simple_transfer(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        if from.is_null() {
            return Err(LedgerError::ZeroAddress { role: "from" });
        }
        if to.is_null() {
            return Err(LedgerError::ZeroAddress { role: "to" });
        }

        self.move_tokens(from, to, amount)?;
        self.record(LedgerEvent::Transfer {
            from: from.clone(),
            to: to.clone(),
            amount,
        });

        if spender != from {
            let remaining = self.allowances.consume(from, spender, amount)?;
            self.record(LedgerEvent::Approval {
                owner: from.clone(),
                spender: spender.clone(),
                amount: remaining,
            });
        }

        tracing::debug!(%from, %to, amount, "simple transfer");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn notified_send(
        &mut self,
        operator: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
        ack_required: bool,
    ) -> Result<()> {
        if from.is_null() {
            return Err(LedgerError::ZeroAddress { role: "from" });
        }
        if to.is_null() {
            return Err(LedgerError::ZeroAddress { role: "to" });
        }

        let ctx = HookContext {
            operator: operator.clone(),
            from: from.clone(),
            to: to.clone(),
            amount,
            user_data: user_data.clone(),
            operator_data: operator_data.clone(),
        };
        let hooks = self.hooks.clone();

        // Pre-send runs on pre-mutation state; nothing may mutate between
        // the notification and the move.
        hooks.notify_pre_send(self, &ctx)?;

        self.move_tokens(from, to, amount)?;
        self.record(LedgerEvent::Sent {
            operator: operator.clone(),
            from: from.clone(),
            to: to.clone(),
            amount,
            user_data,
            operator_data,
        });
        self.record(LedgerEvent::Transfer {
            from: from.clone(),
            to: to.clone(),
            amount,
        });

        // Post-receive observes the committed state; a failure here reverts
        // the whole operation through the caller's snapshot.
        hooks.notify_post_receive(self, &ctx, ack_required)?;

        tracing::debug!(
            %operator, %from, %to, amount,
            user_data = %hex::encode(&ctx.user_data),
            "notified send"
        );
        Ok(())
    }

    fn do_mint(
        &mut self,
        operator: &Address,
        account: &Address,
        amount: Amount,
        ack_required: bool,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    ) -> Result<()> {
        if account.is_null() {
            return Err(LedgerError::ZeroAddress { role: "account" });
        }

        let signed = Self::to_signed(amount)?;
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        let credited = self.balances.entry(account.clone()).or_insert(0);
        *credited = credited.checked_add(signed).ok_or(LedgerError::AmountOverflow)?;

        self.record(LedgerEvent::Minted {
            operator: operator.clone(),
            account: account.clone(),
            amount,
            user_data: user_data.clone(),
            operator_data: operator_data.clone(),
        });
        self.record(LedgerEvent::Transfer {
            from: Address::null(),
            to: account.clone(),
            amount,
        });

        let ctx = HookContext {
            operator: operator.clone(),
            from: Address::null(),
            to: account.clone(),
            amount,
            user_data,
            operator_data,
        };
        let hooks = self.hooks.clone();
        hooks.notify_post_receive(self, &ctx, ack_required)?;

        tracing::debug!(%operator, %account, amount, "minted");
        Ok(())
    }

    fn do_burn(
        &mut self,
        operator: &Address,
        account: &Address,
        amount: Amount,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    ) -> Result<()> {
        if account.is_null() {
            return Err(LedgerError::ZeroAddress { role: "account" });
        }

        let ctx = HookContext {
            operator: operator.clone(),
            from: account.clone(),
            to: Address::null(),
            amount,
            user_data: user_data.clone(),
            operator_data: operator_data.clone(),
        };
        let hooks = self.hooks.clone();

        hooks.notify_pre_send(self, &ctx)?;

        let signed = Self::to_signed(amount)?;
        let available = self.balance_of(account);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                account: account.clone(),
                available,
                requested: amount,
            });
        }
        let debited = self.balances.entry(account.clone()).or_insert(0);
        *debited = debited.checked_sub(signed).ok_or(LedgerError::AmountOverflow)?;
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        self.record(LedgerEvent::Burned {
            operator: operator.clone(),
            account: account.clone(),
            amount,
            user_data,
            operator_data,
        });
        self.record(LedgerEvent::Transfer {
            from: account.clone(),
            to: Address::null(),
            amount,
        });

        // Burn has no receiver side; no acknowledgement is ever required.
        tracing::debug!(%operator, %account, amount, "burned");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::flow::NoFlows;

    /// A ledger with throwaway identities over the given registry.
    pub(crate) fn minimal_ledger(registry: Arc<dyn InterfaceRegistry>) -> Ledger {
        Ledger::new(
            LedgerConfig {
                name: "Test Settlement Token".into(),
                symbol: "TSTx".into(),
                underlying: Address::new("erc:test"),
                underlying_decimals: 6,
                host: Address::new("nova1host"),
                ledger_identity: Address::new("nova1ledger"),
                default_operators: Vec::new(),
            },
            registry,
            Arc::new(NoFlows),
        )
    }
}
