//! # Notification Hooks & Dispatcher
//!
//! The notified-transfer protocol around the transfer engine's debit/credit
//! step. Holders may register a pre-send hook, recipients a post-receive
//! hook; both are resolved through the [`InterfaceRegistry`] collaborator
//! and invoked synchronously with the full transfer context.
//!
//! Ordering is the load-bearing safety property of the whole notified path:
//!
//! 1. `notify_pre_send` runs on *stale* (pre-mutation) state, so a hostile
//!    sender hook cannot observe its own updated balance early.
//! 2. The balance move and event emission commit.
//! 3. `notify_post_receive` runs on the *committed* state; any reentrant
//!    call it makes into the ledger observes fully updated balances.
//!
//! Hook implementers are untrusted. They receive `&mut Ledger` and may call
//! back into any entry point; the snapshot discipline in [`crate::ledger`]
//! keeps an aborted outer operation from leaking partial state regardless
//! of what the hook did in between.

use std::sync::Arc;

use crate::address::Address;
use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::registry::InterfaceRegistry;
use crate::Amount;

/// The full context handed to hook implementers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    /// The address that initiated the operation.
    pub operator: Address,
    /// Debited account. Null for mint.
    pub from: Address,
    /// Credited account. Null for burn.
    pub to: Address,
    /// Amount moved.
    pub amount: Amount,
    /// Opaque data supplied by the holder.
    pub user_data: Vec<u8>,
    /// Opaque data supplied by the operator.
    pub operator_data: Vec<u8>,
}

/// Pre-send notification target registered by a holder.
pub trait SenderHook: Send + Sync {
    /// Invoked before any balance mutation of a notified send or burn.
    /// Returning an error aborts the whole operation.
    fn on_send(&self, ledger: &mut Ledger, ctx: &HookContext) -> Result<()>;
}

/// Post-receive notification target registered by a recipient.
pub trait ReceiverHook: Send + Sync {
    /// Invoked after the balance move and event emission of a notified send
    /// or mint. Returning an error aborts (reverts) the whole operation.
    fn on_receive(&self, ledger: &mut Ledger, ctx: &HookContext) -> Result<()>;
}

/// Resolves and invokes notification targets around the transfer engine.
///
/// Cheap to clone (the registry is behind `Arc`); the engine clones it
/// before dispatching so the hook can borrow the ledger mutably.
#[derive(Clone)]
pub struct HookDispatcher {
    registry: Arc<dyn InterfaceRegistry>,
}

impl HookDispatcher {
    /// Wraps the registry collaborator.
    pub fn new(registry: Arc<dyn InterfaceRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying registry collaborator.
    pub fn registry(&self) -> &Arc<dyn InterfaceRegistry> {
        &self.registry
    }

    /// Notifies `ctx.from`'s registered sender hook, if any. Absence of a
    /// sender hook is success, not an error — the pre-send notification is
    /// optional by contract. Must be called before any balance mutation.
    pub fn notify_pre_send(&self, ledger: &mut Ledger, ctx: &HookContext) -> Result<()> {
        if let Some(hook) = self.registry.sender_hook(&ctx.from) {
            tracing::debug!(from = %ctx.from, amount = ctx.amount, "invoking sender hook");
            hook.on_send(ledger, ctx)?;
        }
        Ok(())
    }

    /// Notifies `ctx.to`'s registered receiver hook, if any. When no hook is
    /// registered, `ack_required` is set, and the recipient is contract-like,
    /// fails with [`LedgerError::RecipientNotAckCapable`]. Must be called
    /// after the balance move and event emission.
    pub fn notify_post_receive(
        &self,
        ledger: &mut Ledger,
        ctx: &HookContext,
        ack_required: bool,
    ) -> Result<()> {
        match self.registry.receiver_hook(&ctx.to) {
            Some(hook) => {
                tracing::debug!(to = %ctx.to, amount = ctx.amount, "invoking receiver hook");
                hook.on_receive(ledger, ctx)
            }
            None if ack_required && self.registry.has_code(&ctx.to) => {
                Err(LedgerError::RecipientNotAckCapable {
                    recipient: ctx.to.clone(),
                })
            }
            None => Ok(()),
        }
    }
}
