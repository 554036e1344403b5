//! # Asset Registry
//!
//! Built once from a [`PartialAssetMap`], then shared read-only (behind an
//! `Arc`) by every per-chain transfer contract.
//!
//! ## Build Rules
//!
//! 1. Asset keys are matched case-insensitively against [`AssetId`].
//! 2. Chain keys are matched case-insensitively against [`ChainId`].
//! 3. `decimals` must be an integer in `0..=`[`MAX_DECIMALS`].
//! 4. Every [`AssetId`] must have an entry, even one with no chains.

use crate::errors::{RegistryError, RegistryResult};
use crate::raw::{PartialAssetMap, RawInstanceData};
use c3_references::{AssetId, AssetInstanceRef, ChainId};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

/// Largest accepted `decimals`. Token standards store decimals in a byte.
pub const MAX_DECIMALS: u32 = u8::MAX as u32;

/// Validated instance data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInstanceData {
    /// Number of decimal places of the smallest on-chain unit.
    pub decimals: u32,
    /// Chain-native identifier.
    pub native_id: String,
}

/// Validated per-asset data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetData {
    /// Chain → instance label → instance data.
    pub chains: BTreeMap<ChainId, BTreeMap<String, AssetInstanceData>>,
}

/// Complete, normalized asset registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetRegistry {
    assets: BTreeMap<AssetId, AssetData>,
}

/// Build a registry from a raw asset map.
///
/// # Errors
///
/// - [`RegistryError::UnknownAsset`] / [`RegistryError::UnknownChain`] for
///   unrecognized keys
/// - [`RegistryError::DuplicateEntry`] when two keys normalize to the same name
/// - [`RegistryError::InvalidDecimals`] for negative, fractional or oversized
///   decimals
/// - [`RegistryError::MissingAssetEntry`] naming the first absent asset in
///   [`AssetId::ALL`] order
pub fn build_registry(map: PartialAssetMap) -> RegistryResult<AssetRegistry> {
    let mut assets: BTreeMap<AssetId, AssetData> = BTreeMap::new();

    for (asset_key, raw) in map {
        let asset = AssetId::from_name(&asset_key)
            .ok_or_else(|| RegistryError::UnknownAsset(asset_key.clone()))?;

        let mut data = AssetData::default();
        for (chain_key, instances) in raw.chains {
            let chain = ChainId::from_name(&chain_key).ok_or_else(|| {
                RegistryError::UnknownChain {
                    asset,
                    chain: chain_key.clone(),
                }
            })?;

            let mut validated = BTreeMap::new();
            for (instance, raw_instance) in instances {
                let instance_data = validate_instance(asset, chain, &instance, raw_instance)?;
                validated.insert(instance, instance_data);
            }

            match data.chains.entry(chain) {
                Entry::Vacant(slot) => {
                    slot.insert(validated);
                }
                Entry::Occupied(_) => {
                    return Err(RegistryError::DuplicateEntry {
                        key: format!("{}.chains.{}", asset, chain_key),
                    })
                }
            }
        }

        match assets.entry(asset) {
            Entry::Vacant(slot) => {
                slot.insert(data);
            }
            Entry::Occupied(_) => return Err(RegistryError::DuplicateEntry { key: asset_key }),
        }
    }

    if let Some(missing) = AssetId::ALL.iter().find(|asset| !assets.contains_key(*asset)) {
        return Err(RegistryError::MissingAssetEntry(*missing));
    }

    let registry = AssetRegistry { assets };
    debug!(
        "[c3-registry] Built asset registry: {} assets, {} instances",
        registry.assets.len(),
        registry.instance_count()
    );
    Ok(registry)
}

fn validate_instance(
    asset: AssetId,
    chain: ChainId,
    instance: &str,
    raw: RawInstanceData,
) -> RegistryResult<AssetInstanceData> {
    let decimals = raw
        .decimals
        .as_u64()
        .and_then(|value| u32::try_from(value).ok())
        .filter(|&decimals| decimals <= MAX_DECIMALS)
        .ok_or_else(|| RegistryError::InvalidDecimals {
            asset,
            chain,
            instance: instance.to_string(),
            value: raw.decimals.to_string(),
        })?;

    Ok(AssetInstanceData {
        decimals,
        native_id: raw.native_id,
    })
}

impl AssetRegistry {
    /// Same as [`build_registry`].
    pub fn build(map: PartialAssetMap) -> RegistryResult<Self> {
        build_registry(map)
    }

    /// Per-asset data.
    pub fn asset(&self, asset: AssetId) -> RegistryResult<&AssetData> {
        self.assets
            .get(&asset)
            .ok_or(RegistryError::AssetNotFound { asset })
    }

    /// Resolve asset → chain → instance, failing at the first missing level.
    pub fn instance(
        &self,
        asset: AssetId,
        chain: ChainId,
        instance: &str,
    ) -> RegistryResult<&AssetInstanceData> {
        let asset_data = self.asset(asset)?;
        let chain_data = asset_data
            .chains
            .get(&chain)
            .ok_or(RegistryError::AssetNotOnChain { asset, chain })?;
        chain_data
            .get(instance)
            .ok_or_else(|| RegistryError::InstanceNotFound {
                asset,
                chain,
                instance: instance.to_string(),
            })
    }

    /// Resolve a parsed asset instance reference.
    pub fn resolve(&self, reference: &AssetInstanceRef) -> RegistryResult<&AssetInstanceData> {
        self.instance(reference.asset, reference.chain, &reference.instance)
    }

    /// Every asset instance registered on `chain`.
    pub fn assets_on_chain(&self, chain: ChainId) -> Vec<(AssetInstanceRef, &AssetInstanceData)> {
        self.assets
            .iter()
            .filter_map(|(asset, data)| data.chains.get(&chain).map(|instances| (asset, instances)))
            .flat_map(|(asset, instances)| {
                instances.iter().map(move |(label, data)| {
                    (AssetInstanceRef::with_instance(chain, *asset, label.clone()), data)
                })
            })
            .collect()
    }

    /// Chains on which `asset` has at least one instance.
    pub fn chains_for(&self, asset: AssetId) -> Vec<ChainId> {
        self.assets
            .get(&asset)
            .map(|data| data.chains.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Iterate assets in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &AssetData)> {
        self.assets.iter()
    }

    /// Total number of registered instances across all assets and chains.
    pub fn instance_count(&self) -> usize {
        self.assets
            .values()
            .flat_map(|data| data.chains.values())
            .map(BTreeMap::len)
            .sum()
    }
}
