//! # Token Metadata
//!
//! Write-once descriptive metadata for a settlement token: name, symbol,
//! and the informational reference to the underlying token it represents.
//! Display decimals are *not* stored here — every settlement token exposes
//! [`crate::config::DECIMALS`] regardless of the underlying token's own
//! precision, which is retained only for inspection.
//!
//! Immutability is structural: the fields are private, there are no
//! setters, and the only constructor runs inside [`crate::Ledger`]'s
//! one-time construction.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::DECIMALS;

/// Immutable-after-construction token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    name: String,
    symbol: String,
    underlying: Address,
    underlying_decimals: u8,
}

impl TokenMetadata {
    /// Creates the metadata record. Called exactly once, by the ledger
    /// constructor.
    pub(crate) fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        underlying: Address,
        underlying_decimals: u8,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            underlying,
            underlying_decimals,
        }
    }

    /// Human-readable token name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display decimals. Always [`DECIMALS`], never the underlying's.
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Reference to the underlying token this settlement token represents.
    /// Informational only — no wrapping logic consumes it in this variant.
    pub fn underlying(&self) -> &Address {
        &self.underlying
    }

    /// The underlying token's own display decimals, kept for inspection.
    pub fn underlying_decimals(&self) -> u8 {
        self.underlying_decimals
    }
}
