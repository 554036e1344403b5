//! # Chain Identifiers
//!
//! The closed set of supported networks. Adding a chain is a compile-time
//! change: every exhaustive `match` on [`ChainId`] must be revisited.

use crate::errors::ReferenceError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Supported blockchain identifiers.
///
/// Serialized as the canonical lowercase name (`"ethereum"`). Parsing is
/// case-insensitive.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub enum ChainId {
    /// Ethereum mainnet.
    Ethereum,
    /// Algorand mainnet.
    Algorand,
    /// Solana mainnet-beta.
    Solana,
    /// Arbitrum One.
    Arbitrum,
    /// Avalanche C-Chain.
    Avalanche,
    /// BNB Smart Chain.
    Binance,
}

impl ChainId {
    /// Every supported chain, in declaration order.
    pub const ALL: [ChainId; 6] = [
        ChainId::Ethereum,
        ChainId::Algorand,
        ChainId::Solana,
        ChainId::Arbitrum,
        ChainId::Avalanche,
        ChainId::Binance,
    ];

    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::Algorand => "algorand",
            ChainId::Solana => "solana",
            ChainId::Arbitrum => "arbitrum",
            ChainId::Avalanche => "avalanche",
            ChainId::Binance => "binance",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|chain| chain.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ReferenceError::UnknownChain(s.to_string()))
    }
}
