//! # Operator Delegation
//!
//! The holder → operator authorization relation behind the notified-send
//! interface, plus the process-wide default-operator list shared by all
//! holders.
//!
//! The default list is immutable after construction. Per-holder state is
//! two disjoint sets: explicit grants, and explicit revocations of default
//! operators. An operator is authorized for a holder when any of these
//! holds:
//!
//! 1. operator == holder (a holder is always its own operator),
//! 2. the holder explicitly granted the operator,
//! 3. the operator is a default operator the holder has not revoked.
//!
//! Authorization is strictly pairwise — a grant confers nothing transitive.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::address::Address;

/// Holder → operator delegation state over a fixed default-operator list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorRegistry {
    /// The configured default operators, verbatim: order-preserving,
    /// duplicates kept. Returned as-is by [`default_operators`](Self::default_operators).
    default_operators: Vec<Address>,
    /// Membership view of `default_operators` for O(1) checks.
    default_set: HashSet<Address>,
    /// Explicit per-holder grants.
    grants: HashMap<Address, HashSet<Address>>,
    /// Per-holder revocations of default operators.
    revoked_defaults: HashMap<Address, HashSet<Address>>,
}

impl OperatorRegistry {
    /// Establishes the process-wide default-operator list. Construction-phase
    /// only — there is no way to change the defaults afterwards.
    pub fn new(default_operators: Vec<Address>) -> Self {
        let default_set = default_operators.iter().cloned().collect();
        Self {
            default_operators,
            default_set,
            grants: HashMap::new(),
            revoked_defaults: HashMap::new(),
        }
    }

    /// Returns whether `operator` may operate on `holder`'s tokens.
    pub fn is_operator_for(&self, operator: &Address, holder: &Address) -> bool {
        if operator == holder {
            return true;
        }
        if self
            .grants
            .get(holder)
            .is_some_and(|granted| granted.contains(operator))
        {
            return true;
        }
        self.default_set.contains(operator)
            && !self
                .revoked_defaults
                .get(holder)
                .is_some_and(|revoked| revoked.contains(operator))
    }

    /// Grants `operator` rights over `holder`'s tokens. For a default
    /// operator this also clears any earlier revocation — re-authorization
    /// overrides a previous revoke.
    pub fn authorize(&mut self, holder: &Address, operator: &Address) {
        if self.default_set.contains(operator) {
            if let Some(revoked) = self.revoked_defaults.get_mut(holder) {
                revoked.remove(operator);
            }
        }
        self.grants
            .entry(holder.clone())
            .or_default()
            .insert(operator.clone());
    }

    /// Removes `operator`'s rights over `holder`'s tokens. For a default
    /// operator the revocation is recorded per holder so the default no
    /// longer applies to that holder.
    pub fn revoke(&mut self, holder: &Address, operator: &Address) {
        if let Some(granted) = self.grants.get_mut(holder) {
            granted.remove(operator);
        }
        if self.default_set.contains(operator) {
            self.revoked_defaults
                .entry(holder.clone())
                .or_default()
                .insert(operator.clone());
        }
    }

    /// The configured default-operator list, verbatim.
    pub fn default_operators(&self) -> &[Address] {
        &self.default_operators
    }

    /// Whether `operator` is in the default-operator set.
    pub fn is_default_operator(&self, operator: &Address) -> bool {
        self.default_set.contains(operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder() -> Address {
        Address::new("nova1alice")
    }

    fn operator() -> Address {
        Address::new("nova1op")
    }

    #[test]
    fn holder_is_always_its_own_operator() {
        let reg = OperatorRegistry::new(vec![]);
        assert!(reg.is_operator_for(&holder(), &holder()));
    }

    #[test]
    fn unknown_operator_is_not_authorized() {
        let reg = OperatorRegistry::new(vec![]);
        assert!(!reg.is_operator_for(&operator(), &holder()));
    }

    #[test]
    fn authorize_then_revoke_roundtrip() {
        let mut reg = OperatorRegistry::new(vec![]);
        reg.authorize(&holder(), &operator());
        assert!(reg.is_operator_for(&operator(), &holder()));

        reg.revoke(&holder(), &operator());
        assert!(!reg.is_operator_for(&operator(), &holder()));
    }

    #[test]
    fn default_operator_applies_to_every_holder() {
        let reg = OperatorRegistry::new(vec![operator()]);
        assert!(reg.is_operator_for(&operator(), &holder()));
        assert!(reg.is_operator_for(&operator(), &Address::new("nova1bob")));
    }

    #[test]
    fn default_revocation_is_per_holder() {
        let mut reg = OperatorRegistry::new(vec![operator()]);
        reg.revoke(&holder(), &operator());

        assert!(!reg.is_operator_for(&operator(), &holder()));
        // Other holders are untouched.
        assert!(reg.is_operator_for(&operator(), &Address::new("nova1bob")));
    }

    #[test]
    fn reauthorization_overrides_default_revocation() {
        let mut reg = OperatorRegistry::new(vec![operator()]);
        reg.revoke(&holder(), &operator());
        reg.authorize(&holder(), &operator());
        assert!(reg.is_operator_for(&operator(), &holder()));

        // And a second revoke disables it again.
        reg.revoke(&holder(), &operator());
        assert!(!reg.is_operator_for(&operator(), &holder()));
    }

    #[test]
    fn no_transitive_authorization() {
        let mut reg = OperatorRegistry::new(vec![]);
        let middle = Address::new("nova1middle");
        reg.authorize(&holder(), &middle);
        reg.authorize(&middle, &operator());

        // operator may act for middle, but not for holder through middle.
        assert!(reg.is_operator_for(&operator(), &middle));
        assert!(!reg.is_operator_for(&operator(), &holder()));
    }

    #[test]
    fn default_list_returned_verbatim() {
        let a = Address::new("nova1a");
        let b = Address::new("nova1b");
        // Duplicates and order come back exactly as configured.
        let reg = OperatorRegistry::new(vec![b.clone(), a.clone(), b.clone()]);
        assert_eq!(reg.default_operators(), &[b.clone(), a, b]);
    }

    #[test]
    fn revocations_and_grants_persist_at_false_rather_than_vanishing() {
        let mut reg = OperatorRegistry::new(vec![]);
        reg.authorize(&holder(), &operator());
        reg.revoke(&holder(), &operator());
        // Revoked state is stable under repeated revokes.
        reg.revoke(&holder(), &operator());
        assert!(!reg.is_operator_for(&operator(), &holder()));
    }
}
