//! # Error Taxonomy
//!
//! Every failure the ledger can produce, as one typed enum. All errors are
//! fail-fast with all-or-nothing semantics: an operation that returns `Err`
//! has left no state change behind (see the snapshot discipline in
//! [`crate::ledger`]). There is no local recovery anywhere in this crate —
//! the caller observes the failure and may resubmit.

use crate::address::Address;
use crate::Amount;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A required address parameter was the null address. `role` names the
    /// parameter ("from", "to", "owner", "spender", "operator", "account").
    #[error("the {role} address is the null address")]
    ZeroAddress {
        /// Which parameter was null.
        role: &'static str,
    },

    /// A spender tried to consume more allowance than the owner granted.
    #[error("insufficient allowance: {spender} may spend {allowed} of {owner}'s tokens, requested {requested}")]
    InsufficientAllowance {
        /// The allowance owner.
        owner: Address,
        /// The spender whose allowance was consulted.
        spender: Address,
        /// The currently granted amount.
        allowed: Amount,
        /// The amount the transfer required.
        requested: Amount,
    },

    /// A decrease-allowance delta exceeded the current allowance.
    #[error("allowance decreased below zero")]
    AllowanceUnderflow {
        /// The allowance owner.
        owner: Address,
        /// The spender whose allowance was being decreased.
        spender: Address,
        /// The allowance before the failed decrease.
        current: Amount,
        /// The delta that was requested.
        requested: Amount,
    },

    /// The debited account's available (flow-composed) balance cannot cover
    /// the requested amount.
    #[error("insufficient balance: {account} has {available} available, requested {requested}")]
    InsufficientBalance {
        /// The account being debited.
        account: Address,
        /// The composed available balance at the time of the check.
        available: Amount,
        /// The amount requested.
        requested: Amount,
    },

    /// Arithmetic on an amount or balance overflowed its representation.
    #[error("amount overflow")]
    AmountOverflow,

    /// An operator-initiated send/burn without a valid operator relation.
    #[error("operator {operator} is not authorized for holder {holder}")]
    OperatorNotAuthorized {
        /// The would-be operator.
        operator: Address,
        /// The holder the operation targeted.
        holder: Address,
    },

    /// A notified transfer targeted a contract-like recipient that has no
    /// registered receiver hook while acknowledgement was required.
    #[error("recipient {recipient} is contract-like but has no registered receiver hook")]
    RecipientNotAckCapable {
        /// The recipient that failed the acknowledgement check.
        recipient: Address,
    },

    /// A host-only entry point was invoked by a caller other than the host.
    #[error("caller {caller} is not the host")]
    NotHost {
        /// The offending caller.
        caller: Address,
    },

    /// A self-only entry point was invoked by a caller other than the
    /// ledger's own identity.
    #[error("caller {caller} is not the ledger itself")]
    NotSelf {
        /// The offending caller.
        caller: Address,
    },

    /// A deliberately inert entry point (the upgrade/wrapping family and the
    /// self-mint/burn/transfer placeholders) was invoked. These fail
    /// unconditionally in this ledger variant.
    #[error("operation is disabled in this ledger variant")]
    OperationDisabled,

    /// A registered hook implementer rejected the operation.
    #[error("hook rejected the operation: {reason}")]
    HookRejected {
        /// The implementer's stated reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowance_underflow_message_is_stable() {
        // Indexers match on this string; keep it verbatim.
        let err = LedgerError::AllowanceUnderflow {
            owner: Address::new("a"),
            spender: Address::new("b"),
            current: 70,
            requested: 100,
        };
        assert_eq!(err.to_string(), "allowance decreased below zero");
    }

    #[test]
    fn errors_carry_structured_context() {
        let err = LedgerError::InsufficientBalance {
            account: Address::new("nova1alice"),
            available: 100,
            requested: 200,
        };
        let msg = err.to_string();
        assert!(msg.contains("nova1alice"));
        assert!(msg.contains("100"));
        assert!(msg.contains("200"));
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(LedgerError::OperationDisabled, LedgerError::OperationDisabled);
        assert_ne!(
            LedgerError::OperationDisabled,
            LedgerError::AmountOverflow
        );
    }
}
