//! # Privileged Caller Gates
//!
//! Two pure predicates over immutable configuration: is the caller the
//! designated host collaborator, and is the caller the ledger's own
//! identity. Both addresses are fixed at construction. There is no role
//! hierarchy, no grant/revoke, no state — privileged entry points are gated
//! to exactly one caller each.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{LedgerError, Result};

/// Caller gates for the ledger's privileged entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    host: Address,
    ledger_identity: Address,
}

impl AccessControl {
    /// Fixes the host collaborator and the ledger's own identity.
    pub fn new(host: Address, ledger_identity: Address) -> Self {
        Self {
            host,
            ledger_identity,
        }
    }

    /// Fails with [`LedgerError::NotHost`] unless `caller` is the host.
    pub fn require_host(&self, caller: &Address) -> Result<()> {
        if caller == &self.host {
            Ok(())
        } else {
            Err(LedgerError::NotHost {
                caller: caller.clone(),
            })
        }
    }

    /// Fails with [`LedgerError::NotSelf`] unless `caller` is the ledger's
    /// own identity. Gates the internal-only approve entry point consumed
    /// by the external permit extension.
    pub fn require_self(&self, caller: &Address) -> Result<()> {
        if caller == &self.ledger_identity {
            Ok(())
        } else {
            Err(LedgerError::NotSelf {
                caller: caller.clone(),
            })
        }
    }

    /// The designated host collaborator.
    pub fn host(&self) -> &Address {
        &self.host
    }

    /// The ledger contract's own identity.
    pub fn ledger_identity(&self) -> &Address {
        &self.ledger_identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gates() -> AccessControl {
        AccessControl::new(Address::new("nova1host"), Address::new("nova1ledger"))
    }

    #[test]
    fn host_passes_host_gate() {
        assert!(gates().require_host(&Address::new("nova1host")).is_ok());
    }

    #[test]
    fn non_host_fails_host_gate() {
        let err = gates().require_host(&Address::new("nova1mallory")).unwrap_err();
        assert!(matches!(err, LedgerError::NotHost { .. }));
    }

    #[test]
    fn ledger_identity_passes_self_gate() {
        assert!(gates().require_self(&Address::new("nova1ledger")).is_ok());
    }

    #[test]
    fn host_does_not_pass_self_gate() {
        // The gates are disjoint: host privileges do not imply self privileges.
        let err = gates().require_self(&Address::new("nova1host")).unwrap_err();
        assert!(matches!(err, LedgerError::NotSelf { .. }));
    }

    #[test]
    fn self_does_not_pass_host_gate() {
        let err = gates().require_host(&Address::new("nova1ledger")).unwrap_err();
        assert!(matches!(err, LedgerError::NotHost { .. }));
    }
}
