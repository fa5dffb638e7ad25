//! # Ledger Events
//!
//! The canonical event vocabulary emitted by the transfer engine, plus the
//! append-only in-memory log the ledger keeps. Every balance-changing
//! operation emits the canonical [`LedgerEvent::Transfer`] (with the null
//! address standing in for the minted-from / burned-to side) alongside its
//! kind-specific event, so simple-transfer indexers and notified-transfer
//! indexers both see a complete history.
//!
//! Event records roll back together with the rest of the ledger state when
//! an operation fails — a reverted operation leaves no events behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;
use crate::Amount;

/// An event emitted by a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Canonical transfer-style event. Emitted by every balance-changing
    /// operation; `from` is null for mint, `to` is null for burn.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// An allowance was set to a new value (approve, increase, decrease,
    /// or consumption on the simple-transfer path). Reports the final value.
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },

    /// A notified send completed, including the full hook context.
    Sent {
        operator: Address,
        from: Address,
        to: Address,
        amount: Amount,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    },

    /// Tokens were minted into an account.
    Minted {
        operator: Address,
        account: Address,
        amount: Amount,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    },

    /// Tokens were burned from an account.
    Burned {
        operator: Address,
        account: Address,
        amount: Amount,
        user_data: Vec<u8>,
        operator_data: Vec<u8>,
    },

    /// A holder granted operator rights.
    AuthorizedOperator { operator: Address, holder: Address },

    /// A holder revoked operator rights (explicit or default).
    RevokedOperator { operator: Address, holder: Address },

    /// The host swapped the ledger's logic code reference.
    CodeUpdated { code: Address },
}

/// A logged event with its recording metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Position in the log, starting at 0. Dense and monotonic.
    pub seq: u64,
    /// When the record was appended (UTC).
    pub recorded_at: DateTime<Utc>,
    /// The event itself.
    pub event: LedgerEvent,
}

impl EventRecord {
    /// Wraps an event with fresh recording metadata at the given sequence.
    pub fn new(seq: u64, event: LedgerEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            seq,
            recorded_at: Utc::now(),
            event,
        }
    }
}
