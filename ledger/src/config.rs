//! # Ledger Constants & Interface Tags
//!
//! Every magic number and well-known string of the settlement ledger lives
//! here. These values are part of the ledger's public contract — external
//! hook implementers and indexers key off the interface tags, so changing
//! them after launch breaks every registered participant.

use crate::Amount;

// ---------------------------------------------------------------------------
// Token Parameters
// ---------------------------------------------------------------------------

/// Display decimals for every settlement token, regardless of what the
/// underlying token uses. 18 keeps amounts interchangeable across the
/// network; the underlying token's own precision is retained only as
/// informational metadata.
pub const DECIMALS: u8 = 18;

/// Transfer granularity: the unit every amount must be a multiple of.
/// Fixed at 1, meaning any positive integer amount is valid.
pub const GRANULARITY: Amount = 1;

/// Ledger implementation version string.
pub const LEDGER_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Interface Tags
// ---------------------------------------------------------------------------
//
// Interface tags are the keys used against the external interface registry.
// The ledger registers its own token interfaces at construction; holders
// register hook implementers under the sender/receiver tags.

/// Registry tag for the notified-transfer token interface.
pub const NOTIFIED_TOKEN_INTERFACE: &str = "NovaNotifiedToken";

/// Registry tag for the simple-transfer token interface.
pub const SIMPLE_TOKEN_INTERFACE: &str = "NovaSimpleToken";

/// Registry tag under which a holder registers its pre-send hook.
pub const SENDER_HOOK_INTERFACE: &str = "NovaTokensSender";

/// Registry tag under which a recipient registers its post-receive hook.
pub const RECEIVER_HOOK_INTERFACE: &str = "NovaTokensRecipient";

/// The interface tags the ledger itself registers at construction, in
/// registration order.
pub const LEDGER_INTERFACES: [&str; 2] = [NOTIFIED_TOKEN_INTERFACE, SIMPLE_TOKEN_INTERFACE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_is_one() {
        // The whole point of granularity 1: every positive amount is valid.
        assert_eq!(GRANULARITY, 1);
    }

    #[test]
    fn decimals_fixed_at_eighteen() {
        assert_eq!(DECIMALS, 18);
    }

    #[test]
    fn interface_tags_are_distinct() {
        let tags = [
            NOTIFIED_TOKEN_INTERFACE,
            SIMPLE_TOKEN_INTERFACE,
            SENDER_HOOK_INTERFACE,
            RECEIVER_HOOK_INTERFACE,
        ];
        for (i, a) in tags.iter().enumerate() {
            for b in tags.iter().skip(i + 1) {
                assert_ne!(a, b, "interface tags must be unique");
            }
        }
    }

    #[test]
    fn ledger_registers_both_token_interfaces() {
        assert!(LEDGER_INTERFACES.contains(&NOTIFIED_TOKEN_INTERFACE));
        assert!(LEDGER_INTERFACES.contains(&SIMPLE_TOKEN_INTERFACE));
    }
}
