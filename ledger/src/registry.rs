//! # Interface Registry Collaborator
//!
//! The ledger discovers notification targets through an external registry,
//! modeled here as the [`InterfaceRegistry`] capability. The registry is a
//! trust boundary: whatever it hands back is attacker-influenced code, and
//! the transfer engine treats it accordingly (see [`crate::hooks`]).
//!
//! Lookup is capability-shaped rather than stringly-typed at the call site:
//! the two hook kinds have dedicated accessors returning either nothing
//! (no implementer registered) or an invocable handle. The interface tags
//! in [`crate::config`] are the registration vocabulary.
//!
//! [`MemoryRegistry`] is the in-process reference implementation used by
//! the node binary and the test suites.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::address::Address;
use crate::config::{RECEIVER_HOOK_INTERFACE, SENDER_HOOK_INTERFACE};
use crate::hooks::{ReceiverHook, SenderHook};

/// External lookup service mapping (address, interface tag) to an optional
/// implementer.
pub trait InterfaceRegistry: Send + Sync {
    /// Records that `account` implements `interface_tag`. The ledger calls
    /// this once at construction for its own token interfaces.
    fn register(&self, account: &Address, interface_tag: &str);

    /// Returns whether `account` has registered `interface_tag`.
    fn implements(&self, account: &Address, interface_tag: &str) -> bool;

    /// The pre-send hook registered by `holder`, if any.
    fn sender_hook(&self, holder: &Address) -> Option<Arc<dyn SenderHook>>;

    /// The post-receive hook registered by `recipient`, if any.
    fn receiver_hook(&self, recipient: &Address) -> Option<Arc<dyn ReceiverHook>>;

    /// Whether `address` identifies a contract-like (code-bearing) entity.
    /// Drives the acknowledgement-required policy for notified transfers.
    fn has_code(&self, address: &Address) -> bool;
}

/// In-memory registry for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryRegistry {
    interfaces: RwLock<HashMap<Address, HashSet<String>>>,
    sender_hooks: RwLock<HashMap<Address, Arc<dyn SenderHook>>>,
    receiver_hooks: RwLock<HashMap<Address, Arc<dyn ReceiverHook>>>,
    contracts: RwLock<HashSet<Address>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a pre-send hook for `holder` and registers the sender tag.
    pub fn set_sender_hook(&self, holder: &Address, hook: Arc<dyn SenderHook>) {
        self.sender_hooks.write().insert(holder.clone(), hook);
        self.register(holder, SENDER_HOOK_INTERFACE);
    }

    /// Installs a post-receive hook for `recipient` and registers the
    /// receiver tag.
    pub fn set_receiver_hook(&self, recipient: &Address, hook: Arc<dyn ReceiverHook>) {
        self.receiver_hooks.write().insert(recipient.clone(), hook);
        self.register(recipient, RECEIVER_HOOK_INTERFACE);
    }

    /// Removes `recipient`'s post-receive hook, if any.
    pub fn clear_receiver_hook(&self, recipient: &Address) {
        self.receiver_hooks.write().remove(recipient);
        self.interfaces
            .write()
            .entry(recipient.clone())
            .or_default()
            .remove(RECEIVER_HOOK_INTERFACE);
    }

    /// Marks `address` as contract-like.
    pub fn mark_contract(&self, address: &Address) {
        self.contracts.write().insert(address.clone());
    }
}

impl InterfaceRegistry for MemoryRegistry {
    fn register(&self, account: &Address, interface_tag: &str) {
        self.interfaces
            .write()
            .entry(account.clone())
            .or_default()
            .insert(interface_tag.to_string());
    }

    fn implements(&self, account: &Address, interface_tag: &str) -> bool {
        self.interfaces
            .read()
            .get(account)
            .is_some_and(|tags| tags.contains(interface_tag))
    }

    fn sender_hook(&self, holder: &Address) -> Option<Arc<dyn SenderHook>> {
        self.sender_hooks.read().get(holder).cloned()
    }

    fn receiver_hook(&self, recipient: &Address) -> Option<Arc<dyn ReceiverHook>> {
        self.receiver_hooks.read().get(recipient).cloned()
    }

    fn has_code(&self, address: &Address) -> bool {
        self.contracts.read().contains(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookContext;
    use crate::ledger::Ledger;
    use crate::Result;

    struct Inert;

    impl SenderHook for Inert {
        fn on_send(&self, _ledger: &mut Ledger, _ctx: &HookContext) -> Result<()> {
            Ok(())
        }
    }

    impl ReceiverHook for Inert {
        fn on_receive(&self, _ledger: &mut Ledger, _ctx: &HookContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let reg = MemoryRegistry::new();
        let addr = Address::new("nova1alice");
        assert!(reg.sender_hook(&addr).is_none());
        assert!(reg.receiver_hook(&addr).is_none());
        assert!(!reg.has_code(&addr));
        assert!(!reg.implements(&addr, SENDER_HOOK_INTERFACE));
    }

    #[test]
    fn installing_hooks_registers_their_tags() {
        let reg = MemoryRegistry::new();
        let addr = Address::new("nova1alice");

        reg.set_sender_hook(&addr, Arc::new(Inert));
        reg.set_receiver_hook(&addr, Arc::new(Inert));

        assert!(reg.sender_hook(&addr).is_some());
        assert!(reg.receiver_hook(&addr).is_some());
        assert!(reg.implements(&addr, SENDER_HOOK_INTERFACE));
        assert!(reg.implements(&addr, RECEIVER_HOOK_INTERFACE));
    }

    #[test]
    fn clearing_receiver_hook_unregisters_tag() {
        let reg = MemoryRegistry::new();
        let addr = Address::new("nova1vault");

        reg.set_receiver_hook(&addr, Arc::new(Inert));
        reg.clear_receiver_hook(&addr);

        assert!(reg.receiver_hook(&addr).is_none());
        assert!(!reg.implements(&addr, RECEIVER_HOOK_INTERFACE));
    }

    #[test]
    fn contract_flag_is_per_address() {
        let reg = MemoryRegistry::new();
        reg.mark_contract(&Address::new("nova1vault"));
        assert!(reg.has_code(&Address::new("nova1vault")));
        assert!(!reg.has_code(&Address::new("nova1alice")));
    }
}
