//! # Setup
//!
//! Builds a [`MultiChain`] from configuration: validate the asset map once,
//! then create one adapter per configured chain.

use crate::blockchain::Blockchain;
use crate::config::MultiChainConfig;
use crate::domain::{MultiChainError, MultiChainResult};
use crate::ports::AdapterFactory;
use crate::service::MultiChain;
use c3_registry::build_registry;
use std::sync::Arc;
use tracing::info;

/// Build the registry and connect every configured chain.
///
/// # Errors
///
/// Registry validation errors, adapter construction errors, and
/// [`MultiChainError::CrossChainMismatch`] when the factory returns an
/// adapter for a different chain than requested.
pub fn setup_multichain(
    config: &MultiChainConfig,
    factory: &dyn AdapterFactory,
) -> MultiChainResult<MultiChain> {
    let registry = Arc::new(build_registry(config.assets.clone())?);

    let mut chains = Vec::with_capacity(config.chains.len());
    for (&chain, connection) in &config.chains {
        let adapter = factory
            .create(chain, connection, registry.clone())
            .map_err(|e| MultiChainError::adapter(chain, e))?;
        if adapter.chain() != chain {
            return Err(MultiChainError::CrossChainMismatch {
                expected: chain,
                actual: adapter.chain(),
                field: "adapter",
            });
        }

        let mut blockchain = Blockchain::new(registry.clone(), adapter);
        if let Some(timeout) = connection.status_timeout() {
            blockchain = blockchain.with_status_timeout(timeout);
        }
        chains.push(blockchain);
    }

    info!(
        "[c3-multichain] Configured {} chains with {} asset instances",
        chains.len(),
        registry.instance_count()
    );

    Ok(MultiChain::new(registry, chains).with_poll_options(config.poller.options()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAdapterFactory;
    use crate::config::ChainConnectionConfig;
    use crate::domain::AdapterError;
    use crate::ports::ChainAdapter;
    use c3_references::{AssetId, ChainId};
    use c3_registry::{AssetRegistry, RegistryError};

    #[test]
    fn test_setup_connects_configured_chains() {
        let config = MultiChainConfig::mainnet()
            .unwrap()
            .with_chains(&[ChainId::Ethereum, ChainId::Solana]);
        let factory = InMemoryAdapterFactory::new();
        let multichain = setup_multichain(&config, &factory).unwrap();

        assert_eq!(multichain.chains(), vec![ChainId::Ethereum, ChainId::Solana]);
        assert!(factory.adapter(ChainId::Solana).is_some());
        assert!(matches!(
            multichain.blockchain(ChainId::Algorand),
            Err(MultiChainError::ChainNotConfigured { chain: ChainId::Algorand })
        ));
    }

    #[test]
    fn test_incomplete_asset_map_rejected() {
        let mut config = MultiChainConfig::mainnet().unwrap();
        config.assets.remove("pyth");
        let err = setup_multichain(&config, &InMemoryAdapterFactory::new()).unwrap_err();
        assert_eq!(
            err,
            MultiChainError::Registry(RegistryError::MissingAssetEntry(AssetId::Pyth))
        );
    }

    struct BrokenFactory;

    impl AdapterFactory for BrokenFactory {
        fn create(
            &self,
            chain: ChainId,
            _config: &ChainConnectionConfig,
            _registry: Arc<AssetRegistry>,
        ) -> Result<Arc<dyn ChainAdapter>, AdapterError> {
            match chain {
                ChainId::Solana => Err(AdapterError::Transport("no route to host".to_string())),
                _ => Ok(Arc::new(crate::adapters::InMemoryChainAdapter::new(ChainId::Binance))),
            }
        }
    }

    #[test]
    fn test_factory_errors_surface() {
        let config = MultiChainConfig::mainnet().unwrap().with_chains(&[ChainId::Solana]);
        assert!(matches!(
            setup_multichain(&config, &BrokenFactory),
            Err(MultiChainError::Adapter { chain: ChainId::Solana, .. })
        ));
    }

    #[test]
    fn test_factory_chain_mismatch() {
        let config = MultiChainConfig::mainnet().unwrap().with_chains(&[ChainId::Ethereum]);
        assert!(matches!(
            setup_multichain(&config, &BrokenFactory),
            Err(MultiChainError::CrossChainMismatch { field: "adapter", .. })
        ));
    }
}
