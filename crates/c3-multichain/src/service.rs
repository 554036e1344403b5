//! # Multi-Chain Orchestrator
//!
//! Accepts mixed-chain batches, partitions them by chain, runs one call per
//! chain concurrently on the caller's task and writes results back into the
//! caller's order.

use crate::algorithms::{partition_by_chain, route_transfer, Partition, Reassembly};
use crate::blockchain::Blockchain;
use crate::domain::{
    Block, InternalTransferRequest, MultiChainError, MultiChainResult, TransactionRequest,
    TransactionStatus,
};
use crate::poller::{wait_for_transactions, PollOptions};
use crate::ports::MultiChainApi;
use async_trait::async_trait;
use c3_references::{ChainId, TransactionRef};
use c3_registry::AssetRegistry;
use c3_telemetry::{HistogramTimer, PARTITION_DISPATCHES, STATUS_QUERIES, TRANSFERS_SUBMITTED};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Operation labels for metrics.
const OP_SEND: &str = "send";
const OP_STATUS: &str = "status";
const OP_BLOCK: &str = "block";

fn record_dispatch<T>(chain: ChainId, operation: &str, result: &MultiChainResult<T>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    PARTITION_DISPATCHES
        .with_label_values(&[chain.as_str(), operation, outcome])
        .inc();
}

/// First error in partition order, once every partition has finished.
///
/// Partitions are joined with `join_all` so a failing chain never drops a
/// sibling call that is still in flight.
fn all_or_nothing<T>(results: Vec<MultiChainResult<T>>) -> MultiChainResult<Vec<T>> {
    results.into_iter().collect()
}

/// Multi-chain orchestrator.
#[derive(Debug, Clone)]
pub struct MultiChain {
    registry: Arc<AssetRegistry>,
    chains: BTreeMap<ChainId, Blockchain>,
    poll_options: PollOptions,
}

impl MultiChain {
    /// Create an orchestrator over the given per-chain contracts.
    ///
    /// A later contract for the same chain replaces an earlier one.
    pub fn new(
        registry: Arc<AssetRegistry>,
        chains: impl IntoIterator<Item = Blockchain>,
    ) -> Self {
        Self {
            registry,
            chains: chains
                .into_iter()
                .map(|blockchain| (blockchain.chain(), blockchain))
                .collect(),
            poll_options: PollOptions::default(),
        }
    }

    /// Default options for [`MultiChain::wait_for_transactions`].
    pub fn with_poll_options(mut self, options: PollOptions) -> Self {
        self.poll_options = options;
        self
    }

    /// Shared asset registry.
    pub fn registry(&self) -> &Arc<AssetRegistry> {
        &self.registry
    }

    /// Configured contract for `chain`.
    pub fn blockchain(&self, chain: ChainId) -> MultiChainResult<&Blockchain> {
        self.chains
            .get(&chain)
            .ok_or(MultiChainError::ChainNotConfigured { chain })
    }

    /// Configured chains, ordered.
    pub fn chains(&self) -> Vec<ChainId> {
        self.chains.keys().copied().collect()
    }

    /// Poll until every transaction leaves `Pending`, using the configured
    /// poll options.
    pub async fn wait_for_transactions(
        &self,
        transactions: &[TransactionRef],
    ) -> MultiChainResult<Vec<TransactionStatus>> {
        wait_for_transactions(self, transactions, &self.poll_options).await
    }

    /// Validate the whole batch and prepare one partition per chain.
    ///
    /// Nothing has been sent when this returns.
    fn prepare_batch(
        &self,
        requests: &[TransactionRequest],
    ) -> MultiChainResult<Vec<Partition<InternalTransferRequest>>> {
        let mut routed = Vec::with_capacity(requests.len());
        for (index, request) in requests.iter().enumerate() {
            let TransactionRequest::Transfer(transfer) = request else {
                return Err(MultiChainError::UnknownTransactionType { index });
            };
            let route = route_transfer(transfer)?;
            self.blockchain(route.chain())?;
            routed.push((route.chain(), transfer));
        }

        partition_by_chain(routed)
            .into_iter()
            .map(|partition| {
                let blockchain = self.blockchain(partition.chain)?;
                Ok(Partition {
                    chain: partition.chain,
                    indices: partition.indices,
                    items: blockchain.prepare_transfers(&partition.items)?,
                })
            })
            .collect()
    }

    async fn submit_partition(
        &self,
        partition: Partition<InternalTransferRequest>,
    ) -> (Vec<usize>, MultiChainResult<Vec<TransactionRef>>) {
        let chain = partition.chain;
        let count = partition.len();
        let result = match self.blockchain(chain) {
            Ok(blockchain) => blockchain.submit(partition.items).await,
            Err(e) => Err(e),
        };

        record_dispatch(chain, OP_SEND, &result);
        match &result {
            Ok(_) => TRANSFERS_SUBMITTED
                .with_label_values(&[chain.as_str()])
                .inc_by(count as u64),
            Err(e) => warn!("[c3-multichain] Send partition on {} failed: {}", chain, e),
        }
        (partition.indices, result)
    }
}

#[async_trait]
impl MultiChainApi for MultiChain {
    async fn send_transactions(
        &self,
        requests: &[TransactionRequest],
    ) -> MultiChainResult<Vec<TransactionRef>> {
        let _timer = HistogramTimer::dispatch(OP_SEND);
        let partitions = self.prepare_batch(requests)?;

        info!(
            "[c3-multichain] Dispatching {} transactions across {} chains",
            requests.len(),
            partitions.len()
        );

        let dispatches = partitions.into_iter().map(|partition| async move {
            let (indices, result) = self.submit_partition(partition).await;
            result.map(|refs| (indices, refs))
        });
        let results = all_or_nothing(join_all(dispatches).await)?;

        let mut out = Reassembly::new(requests.len());
        for (indices, refs) in results {
            out.fill(&indices, refs);
        }
        Ok(out.finish())
    }

    async fn send_transactions_settled(
        &self,
        requests: &[TransactionRequest],
    ) -> MultiChainResult<Vec<MultiChainResult<TransactionRef>>> {
        let _timer = HistogramTimer::dispatch(OP_SEND);
        let partitions = self.prepare_batch(requests)?;

        let dispatches = partitions
            .into_iter()
            .map(|partition| self.submit_partition(partition));
        let results = join_all(dispatches).await;

        let mut out = Reassembly::new(requests.len());
        for (indices, result) in results {
            match result {
                Ok(refs) => out.fill(&indices, refs.into_iter().map(Ok)),
                Err(e) => out.fill(&indices, indices.iter().map(|_| Err(e.clone()))),
            }
        }
        Ok(out.finish())
    }

    async fn get_transactions_statuses(
        &self,
        transactions: &[TransactionRef],
    ) -> MultiChainResult<Vec<TransactionStatus>> {
        if transactions.is_empty() {
            return Ok(Vec::new());
        }
        let _timer = HistogramTimer::dispatch(OP_STATUS);

        let partitions = partition_by_chain(
            transactions
                .iter()
                .map(|transaction| (transaction.chain, transaction.clone())),
        );
        for partition in &partitions {
            self.blockchain(partition.chain)?;
        }

        debug!(
            "[c3-multichain] Querying {} transactions across {} chains",
            transactions.len(),
            partitions.len()
        );

        let dispatches = partitions.into_iter().map(|partition| async move {
            let blockchain = self.blockchain(partition.chain)?;
            STATUS_QUERIES
                .with_label_values(&[partition.chain.as_str()])
                .inc_by(partition.len() as u64);
            let result = blockchain.get_transactions_status(&partition.items).await;
            record_dispatch(partition.chain, OP_STATUS, &result);
            result.map(|statuses| (partition.indices, statuses))
        });
        let results = all_or_nothing(join_all(dispatches).await)?;

        let mut out = Reassembly::new(transactions.len());
        for (indices, statuses) in results {
            out.fill(&indices, statuses);
        }
        Ok(out.finish())
    }

    async fn get_current_blocks(&self) -> MultiChainResult<BTreeMap<ChainId, Block>> {
        let _timer = HistogramTimer::dispatch(OP_BLOCK);

        let dispatches = self.chains.values().map(|blockchain| async move {
            let result = blockchain.get_current_block().await;
            record_dispatch(blockchain.chain(), OP_BLOCK, &result);
            result.map(|block| (blockchain.chain(), block))
        });

        Ok(all_or_nothing(join_all(dispatches).await)?
            .into_iter()
            .collect())
    }
}
