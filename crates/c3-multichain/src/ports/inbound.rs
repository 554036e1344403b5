//! # Inbound Ports
//!
//! API exposed to callers.

use crate::domain::{Block, MultiChainResult, TransactionRequest, TransactionStatus};
use async_trait::async_trait;
use c3_references::{ChainId, TransactionRef};
use std::collections::BTreeMap;

/// Multi-chain API - inbound port.
///
/// Batches may mix chains freely. Results always come back in the caller's
/// order.
#[async_trait]
pub trait MultiChainApi: Send + Sync {
    /// Validate and submit a batch. Any validation error aborts the whole
    /// batch before anything is sent; any adapter failure fails the call.
    async fn send_transactions(
        &self,
        requests: &[TransactionRequest],
    ) -> MultiChainResult<Vec<TransactionRef>>;

    /// Like [`MultiChainApi::send_transactions`], but an adapter failure
    /// only fails the positions routed to that chain.
    async fn send_transactions_settled(
        &self,
        requests: &[TransactionRequest],
    ) -> MultiChainResult<Vec<MultiChainResult<TransactionRef>>>;

    /// Status of each transaction, in input order.
    async fn get_transactions_statuses(
        &self,
        transactions: &[TransactionRef],
    ) -> MultiChainResult<Vec<TransactionStatus>>;

    /// Latest block of every configured chain.
    async fn get_current_blocks(&self) -> MultiChainResult<BTreeMap<ChainId, Block>>;
}
