//! # Raw Asset Map
//!
//! Unvalidated input as it arrives from configuration: string keys in any
//! case and decimals as written. [`crate::build_registry`] turns it into an
//! [`crate::AssetRegistry`].

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

/// Asset name → raw asset data.
pub type PartialAssetMap = BTreeMap<String, RawAssetData>;

/// Per-asset raw data.
///
/// ```toml
/// [assets.eth.chains.ethereum.""]
/// decimals = 18
/// native_id = "0x0000000000000000000000000000000000000000"
///
/// [assets.eth.chains.ethereum.wrapped]
/// decimals = 18
/// id = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAssetData {
    /// Chain name → instance label → instance data.
    #[serde(default)]
    pub chains: BTreeMap<String, BTreeMap<String, RawInstanceData>>,
}

impl RawAssetData {
    /// Add an instance, returning `self` for chaining.
    pub fn with_instance(
        mut self,
        chain: impl Into<String>,
        instance: impl Into<String>,
        data: RawInstanceData,
    ) -> Self {
        self.chains
            .entry(chain.into())
            .or_default()
            .insert(instance.into(), data);
        self
    }
}

/// Raw instance data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawInstanceData {
    /// Decimal precision as written; validated on build.
    pub decimals: Number,
    /// Chain-native identifier (contract address, ASA id, mint, ...).
    #[serde(alias = "id")]
    pub native_id: String,
}

impl RawInstanceData {
    /// Well-formed instance data.
    pub fn new(decimals: u32, native_id: impl Into<String>) -> Self {
        Self {
            decimals: Number::from(decimals),
            native_id: native_id.into(),
        }
    }
}
