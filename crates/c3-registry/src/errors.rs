//! # Registry Errors
//!
//! Build-time errors make a registry unusable. Lookup errors are
//! caller-correctable and name asset, chain and instance.

use c3_references::{display_instance, AssetId, ChainId};
use thiserror::Error;

/// Asset registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Asset key does not name a supported asset.
    #[error("Unknown asset in asset map: {0}")]
    UnknownAsset(String),

    /// Chain key under an asset does not name a supported chain.
    #[error("Unknown chain {chain} under asset {asset}")]
    UnknownChain {
        /// Asset the chain key was found under
        asset: AssetId,
        /// The unrecognized chain key
        chain: String,
    },

    /// Decimals is negative, fractional or out of range.
    #[error(
        "Invalid decimals {value} for asset {asset} instance {} on {chain}: expected a non-negative integer",
        display_instance(.instance)
    )]
    InvalidDecimals {
        /// Asset being built
        asset: AssetId,
        /// Chain being built
        chain: ChainId,
        /// Instance label
        instance: String,
        /// The rejected value as written
        value: String,
    },

    /// A supported asset has no entry; the registry must be complete.
    #[error("Asset map is missing an entry for asset {0}")]
    MissingAssetEntry(AssetId),

    /// Two input keys normalize to the same asset or chain.
    #[error("Duplicate asset map entry after normalization: {key}")]
    DuplicateEntry {
        /// The second key seen
        key: String,
    },

    /// Asset has no registry entry.
    #[error("Asset {asset} not found")]
    AssetNotFound {
        /// Requested asset
        asset: AssetId,
    },

    /// Asset exists but has no instances on the chain.
    #[error("Asset {asset} not found on chain {chain}")]
    AssetNotOnChain {
        /// Requested asset
        asset: AssetId,
        /// Requested chain
        chain: ChainId,
    },

    /// Asset exists on the chain but not with the requested instance label.
    #[error("Instance {} of asset {asset} not found on chain {chain}", display_instance(.instance))]
    InstanceNotFound {
        /// Requested asset
        asset: AssetId,
        /// Requested chain
        chain: ChainId,
        /// Requested instance label
        instance: String,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
