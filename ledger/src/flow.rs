//! # Flow-Balance Collaborator
//!
//! The streaming balance engine is an external collaborator. The ledger
//! only ever asks it one question: what signed flow term does it currently
//! contribute to an account's balance? The visible balance is the static
//! term plus this flow term, clamped to zero at the read boundary.
//!
//! [`NoFlows`] is the default implementation for deployments without a
//! streaming engine — every flow term is zero and the visible balance
//! degenerates to the clamped static balance.

use crate::address::Address;
use crate::SignedAmount;

/// Supplies the collaborator-computed flow term per account.
pub trait FlowSource: Send + Sync {
    /// Signed contribution of active flows to `account`'s balance. Positive
    /// when inbound streams outpace outbound ones.
    fn flow_term(&self, account: &Address) -> SignedAmount;
}

/// The zero-flow engine: no streams, flow term is always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFlows;

impl FlowSource for NoFlows {
    fn flow_term(&self, _account: &Address) -> SignedAmount {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flows_is_always_zero() {
        let flows = NoFlows;
        assert_eq!(flows.flow_term(&Address::new("nova1alice")), 0);
        assert_eq!(flows.flow_term(&Address::null()), 0);
    }
}
