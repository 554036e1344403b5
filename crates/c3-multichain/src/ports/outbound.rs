//! # Outbound Ports
//!
//! The capability contract every per-chain adapter implements, and the
//! factory that builds adapters from configuration.

use crate::config::ChainConnectionConfig;
use crate::domain::{
    AdapterError, Block, InternalTransferRequest, TransactionStatus, TransferRequest,
};
use async_trait::async_trait;
use c3_references::{ChainId, TransactionRef};
use c3_registry::AssetRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Per-chain adapter - outbound port.
///
/// Adapters talk to one chain's native RPC endpoint, build and sign
/// chain-native transactions. They receive requests that were already
/// validated and scaled by [`crate::Blockchain`].
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// The chain this adapter serves.
    fn chain(&self) -> ChainId;

    /// Latest block.
    async fn get_current_block(&self) -> Result<Block, AdapterError>;

    /// Status of each transaction, same order and length as `transactions`.
    async fn get_transactions_status(
        &self,
        transactions: &[TransactionRef],
        timeout: Option<Duration>,
    ) -> Result<Vec<TransactionStatus>, AdapterError>;

    /// Sign and submit transfers. Returns one reference per input, in order.
    async fn send_transfer_transactions(
        &self,
        requests: Vec<InternalTransferRequest>,
    ) -> Result<Vec<TransactionRef>, AdapterError>;

    /// Fill chain-specific fields of `internal` from the caller's request.
    ///
    /// Called once per request, after validation and before sending.
    fn augment(
        &self,
        _internal: &mut InternalTransferRequest,
        _request: &TransferRequest,
    ) -> Result<(), AdapterError> {
        Ok(())
    }
}

/// Builds adapters from configuration.
pub trait AdapterFactory: Send + Sync {
    /// Create the adapter for `chain`.
    fn create(
        &self,
        chain: ChainId,
        config: &ChainConnectionConfig,
        registry: Arc<AssetRegistry>,
    ) -> Result<Arc<dyn ChainAdapter>, AdapterError>;
}
