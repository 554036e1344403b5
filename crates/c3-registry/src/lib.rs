//! # C3 Asset Registry
//!
//! Maps each logical asset to its per-chain, per-instance chain-native
//! identifier and decimal precision.
//!
//! ## Purpose
//!
//! The transfer contract needs two facts to turn `"1.5" ETH` into a
//! chain-native instruction: the instance's `native_id` (contract address,
//! ASA id, mint, zero address for the gas token) and its `decimals`. This
//! crate validates those facts once, at construction.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use c3_registry::{build_registry, PartialAssetMap};
//!
//! let map: PartialAssetMap = toml::from_str(&text)?;
//! let registry = build_registry(map)?;
//! let eth = registry.instance(AssetId::Eth, ChainId::Ethereum, "")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod raw;
pub mod registry;

pub use errors::{RegistryError, RegistryResult};
pub use raw::{PartialAssetMap, RawAssetData, RawInstanceData};
pub use registry::{build_registry, AssetData, AssetInstanceData, AssetRegistry, MAX_DECIMALS};
