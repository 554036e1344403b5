//! # Transfer Contract
//!
//! [`Blockchain`] runs the fixed, chain-agnostic algorithm around one
//! [`ChainAdapter`]: validate, resolve, scale, augment, delegate, and check
//! what the adapter hands back.

use crate::algorithms::{prepare_transfer, validate_transfer};
use crate::domain::{
    Block, InternalTransferRequest, MultiChainError, MultiChainResult, TransactionRequest,
    TransactionStatus, TransferRequest,
};
use crate::ports::ChainAdapter;
use c3_references::{ChainId, ChainRef, TransactionRef};
use c3_registry::AssetRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-chain transfer contract.
#[derive(Clone)]
pub struct Blockchain {
    chain: ChainId,
    registry: Arc<AssetRegistry>,
    adapter: Arc<dyn ChainAdapter>,
    status_timeout: Option<Duration>,
}

impl std::fmt::Debug for Blockchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blockchain")
            .field("chain", &self.chain)
            .field("status_timeout", &self.status_timeout)
            .finish_non_exhaustive()
    }
}

impl Blockchain {
    /// Wrap `adapter`; the contract's chain is the adapter's.
    pub fn new(registry: Arc<AssetRegistry>, adapter: Arc<dyn ChainAdapter>) -> Self {
        Self {
            chain: adapter.chain(),
            registry,
            adapter,
            status_timeout: None,
        }
    }

    /// Pass a timeout to every status lookup.
    pub fn with_status_timeout(mut self, timeout: Duration) -> Self {
        self.status_timeout = Some(timeout);
        self
    }

    /// The chain this contract serves.
    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// `c3:chains:<chain>`
    pub fn id(&self) -> ChainRef {
        ChainRef::new(self.chain)
    }

    /// Shared asset registry.
    pub fn registry(&self) -> &Arc<AssetRegistry> {
        &self.registry
    }

    /// Latest block.
    pub async fn get_current_block(&self) -> MultiChainResult<Block> {
        let block = self
            .adapter
            .get_current_block()
            .await
            .map_err(|e| MultiChainError::adapter(self.chain, e))?;
        self.ensure_own(block.id.chain, "block")?;
        Ok(block)
    }

    /// Status of each transaction, same order and length.
    ///
    /// Every reference must be on this chain.
    pub async fn get_transactions_status(
        &self,
        transactions: &[TransactionRef],
    ) -> MultiChainResult<Vec<TransactionStatus>> {
        for transaction in transactions {
            self.ensure_own(transaction.chain, "transaction")?;
        }
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        let statuses = self
            .adapter
            .get_transactions_status(transactions, self.status_timeout)
            .await
            .map_err(|e| MultiChainError::adapter(self.chain, e))?;
        self.ensure_len(transactions.len(), statuses.len())?;
        Ok(statuses)
    }

    /// Validate and submit a batch of requests for this chain.
    ///
    /// Nothing is sent unless every request is valid.
    pub async fn send_transactions(
        &self,
        requests: &[TransactionRequest],
    ) -> MultiChainResult<Vec<TransactionRef>> {
        let transfers = requests
            .iter()
            .enumerate()
            .map(|(index, request)| match request {
                TransactionRequest::Transfer(transfer) => Ok(transfer),
                TransactionRequest::Unknown => {
                    Err(MultiChainError::UnknownTransactionType { index })
                }
            })
            .collect::<MultiChainResult<Vec<_>>>()?;

        let prepared = self.prepare_transfers(&transfers)?;
        self.submit(prepared).await
    }

    /// Validate, resolve, scale and augment each transfer.
    pub fn prepare_transfers(
        &self,
        transfers: &[&TransferRequest],
    ) -> MultiChainResult<Vec<InternalTransferRequest>> {
        transfers
            .iter()
            .map(|request| {
                let route = validate_transfer(self.chain, request)?;
                let mut internal = prepare_transfer(&self.registry, &route, request)?;
                self.adapter
                    .augment(&mut internal, request)
                    .map_err(|e| MultiChainError::adapter(self.chain, e))?;
                Ok(internal)
            })
            .collect()
    }

    /// Hand prepared requests to the adapter and check its answer.
    pub async fn submit(
        &self,
        prepared: Vec<InternalTransferRequest>,
    ) -> MultiChainResult<Vec<TransactionRef>> {
        if prepared.is_empty() {
            return Ok(Vec::new());
        }

        let expected = prepared.len();
        debug!("[c3-multichain] Sending {} transfers on {}", expected, self.chain);

        let refs = self
            .adapter
            .send_transfer_transactions(prepared)
            .await
            .map_err(|e| MultiChainError::adapter(self.chain, e))?;
        self.ensure_len(expected, refs.len())?;
        for transaction in &refs {
            self.ensure_own(transaction.chain, "transaction")?;
        }
        Ok(refs)
    }

    fn ensure_own(&self, actual: ChainId, field: &'static str) -> MultiChainResult<()> {
        if actual == self.chain {
            Ok(())
        } else {
            Err(MultiChainError::CrossChainMismatch {
                expected: self.chain,
                actual,
                field,
            })
        }
    }

    fn ensure_len(&self, expected: usize, actual: usize) -> MultiChainResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(MultiChainError::AdapterContract {
                chain: self.chain,
                expected,
                actual,
            })
        }
    }
}
