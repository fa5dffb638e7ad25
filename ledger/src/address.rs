//! # Account Addresses
//!
//! An [`Address`] is the opaque identifier for every participant the ledger
//! knows about: holders, operators, spenders, the host collaborator, the
//! ledger's own identity, and hook implementers. The ledger never inspects
//! an address beyond equality and the null check — whether an address is
//! contract-like is the registry collaborator's business, not ours.
//!
//! The null address is reserved: it is never a valid holder, and it appears
//! in the canonical Transfer event as the synthetic counterparty of mint
//! (from) and burn (to).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, address-like account identifier.
///
/// Internally a string so that any upstream address scheme (bech32, hex,
/// human-readable test labels) round-trips unchanged. The empty string is
/// the null address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates an address from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The null address — never a valid holder, used as the synthetic
    /// counterparty in mint/burn Transfer events.
    pub fn null() -> Self {
        Self(String::new())
    }

    /// Returns `true` if this is the null address.
    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "<null>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
