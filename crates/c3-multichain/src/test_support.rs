//! Shared fixtures for unit tests.

use crate::config::MultiChainConfig;
use crate::domain::{AdapterError, Block, InternalTransferRequest, TransactionStatus};
use crate::ports::ChainAdapter;
use async_trait::async_trait;
use c3_references::{BlockRef, ChainId, TransactionRef};
use c3_registry::{build_registry, AssetRegistry};
use std::time::Duration;

/// Registry built from the bundled mainnet asset map.
pub(crate) fn test_registry() -> AssetRegistry {
    build_registry(MultiChainConfig::mainnet().unwrap().assets).unwrap()
}

/// Adapter that breaks the result-count contract.
pub(crate) struct ScriptedAdapter {
    chain: ChainId,
    refs: usize,
}

impl ScriptedAdapter {
    pub(crate) fn new(chain: ChainId) -> Self {
        Self { chain, refs: 0 }
    }

    /// Answer every send with exactly `count` references.
    pub(crate) fn returning_refs(mut self, count: usize) -> Self {
        self.refs = count;
        self
    }
}

#[async_trait]
impl ChainAdapter for ScriptedAdapter {
    fn chain(&self) -> ChainId {
        self.chain
    }

    async fn get_current_block(&self) -> Result<Block, AdapterError> {
        Ok(Block {
            id: BlockRef::new(self.chain, "0"),
            round: 0,
        })
    }

    async fn get_transactions_status(
        &self,
        _transactions: &[TransactionRef],
        _timeout: Option<Duration>,
    ) -> Result<Vec<TransactionStatus>, AdapterError> {
        Ok(Vec::new())
    }

    async fn send_transfer_transactions(
        &self,
        _requests: Vec<InternalTransferRequest>,
    ) -> Result<Vec<TransactionRef>, AdapterError> {
        Ok((0..self.refs)
            .map(|i| TransactionRef::new(self.chain, format!("tx{i}")))
            .collect())
    }
}
