//! # Asset Identifiers
//!
//! Logical assets, independent of the chain they live on.

use crate::errors::ReferenceError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Supported logical assets.
///
/// Declaration order is the fixed enumeration order used when reporting the
/// first missing registry entry.
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
pub enum AssetId {
    /// Algorand.
    Algo,
    /// Avalanche.
    Avax,
    /// Bitcoin.
    Btc,
    /// Ether.
    Eth,
    /// USD Coin.
    Usdc,
    /// Arbitrum governance token.
    Arb,
    /// BNB.
    Bnb,
    /// Solana.
    Sol,
    /// Pyth Network.
    Pyth,
    /// Wormhole.
    W,
}

impl AssetId {
    /// Every supported asset, in enumeration order.
    pub const ALL: [AssetId; 10] = [
        AssetId::Algo,
        AssetId::Avax,
        AssetId::Btc,
        AssetId::Eth,
        AssetId::Usdc,
        AssetId::Arb,
        AssetId::Bnb,
        AssetId::Sol,
        AssetId::Pyth,
        AssetId::W,
    ];

    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetId::Algo => "algo",
            AssetId::Avax => "avax",
            AssetId::Btc => "btc",
            AssetId::Eth => "eth",
            AssetId::Usdc => "usdc",
            AssetId::Arb => "arb",
            AssetId::Bnb => "bnb",
            AssetId::Sol => "sol",
            AssetId::Pyth => "pyth",
            AssetId::W => "w",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|asset| asset.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetId {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ReferenceError::UnknownAsset(s.to_string()))
    }
}
