//! In-Memory Chain Adapter
//!
//! Implements `ChainAdapter` against a simulated chain: submitted transfers
//! wait in a recently-submitted cache until the next block includes them,
//! and become final `rounds_to_finalize` blocks later.

use crate::algorithms::solana_fields;
use crate::config::ChainConnectionConfig;
use crate::domain::{
    AdapterError, Block, InternalTransferRequest, TransactionStatus, TransferRequest,
};
use crate::ports::outbound::{AdapterFactory, ChainAdapter};
use async_trait::async_trait;
use c3_references::{BlockRef, ChainId, TransactionRef};
use c3_registry::AssetRegistry;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct IncludedTransaction {
    round: u64,
    failure: Option<String>,
}

#[derive(Debug, Default)]
struct ChainState {
    round: u64,
    nonce: u64,
    /// Submitted, not yet in a block.
    sent_pending: HashSet<String>,
    included: HashMap<String, IncludedTransaction>,
    /// Failure reasons applied when a transaction is included.
    doomed: HashMap<String, String>,
    submitted: Vec<InternalTransferRequest>,
}

/// Simulated chain.
pub struct InMemoryChainAdapter {
    chain: ChainId,
    rounds_to_finalize: u64,
    advance_on_status: bool,
    send_delay: Option<Duration>,
    status_delay: Option<Duration>,
    state: RwLock<ChainState>,
    failure: RwLock<Option<AdapterError>>,
    send_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl InMemoryChainAdapter {
    /// Create an adapter whose transactions are final as soon as they are
    /// included.
    pub fn new(chain: ChainId) -> Self {
        Self {
            chain,
            rounds_to_finalize: 0,
            advance_on_status: false,
            send_delay: None,
            status_delay: None,
            state: RwLock::new(ChainState::default()),
            failure: RwLock::new(None),
            send_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    /// Blocks after inclusion before a transaction is final.
    pub fn with_rounds_to_finalize(mut self, rounds: u64) -> Self {
        self.rounds_to_finalize = rounds;
        self
    }

    /// Produce a block at the start of every status query.
    pub fn with_advance_on_status(mut self) -> Self {
        self.advance_on_status = true;
        self
    }

    /// Simulated latency of each send call.
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    /// Simulated latency of each status call.
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = Some(delay);
        self
    }

    /// Produce one block, including every recently submitted transaction.
    pub fn advance(&self) -> u64 {
        let mut state = self.state.write();
        state.round += 1;
        let round = state.round;

        let pending: Vec<String> = state.sent_pending.drain().collect();
        for id in pending {
            let failure = state.doomed.remove(&id);
            state.included.insert(id, IncludedTransaction { round, failure });
        }

        debug!("[c3-multichain] {} advanced to round {}", self.chain, round);
        round
    }

    /// Produce `blocks` blocks.
    pub fn advance_by(&self, blocks: u64) -> u64 {
        (0..blocks).fold(self.current_round(), |_, _| self.advance())
    }

    /// Current block number.
    pub fn current_round(&self) -> u64 {
        self.state.read().round
    }

    /// Make `transaction` end up failed once it is included.
    pub fn fail_transaction(&self, transaction: &TransactionRef, reason: impl Into<String>) {
        let mut state = self.state.write();
        let reason = reason.into();
        match state.included.get_mut(&transaction.transaction) {
            Some(included) => included.failure = Some(reason),
            None => {
                state.doomed.insert(transaction.transaction.clone(), reason);
            }
        }
    }

    /// Fail every call with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<AdapterError>) {
        *self.failure.write() = error;
    }

    /// Every request accepted so far, in submission order.
    pub fn submitted(&self) -> Vec<InternalTransferRequest> {
        self.state.read().submitted.clone()
    }

    /// Number of send calls received.
    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    /// Number of status calls received.
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), AdapterError> {
        match self.failure.read().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn transaction_id(&self, request: &InternalTransferRequest, nonce: u64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.chain.as_str().as_bytes());
        hasher.update(request.from.as_bytes());
        hasher.update(request.to.as_bytes());
        hasher.update(request.asset.as_bytes());
        hasher.update(request.amount.to_bytes_be());
        hasher.update(nonce.to_be_bytes());
        hex::encode(hasher.finalize())
    }

    fn status_of(&self, state: &ChainState, id: &str) -> TransactionStatus {
        match state.included.get(id) {
            Some(included) if state.round >= included.round + self.rounds_to_finalize => {
                match &included.failure {
                    Some(reason) => TransactionStatus::failed(reason.clone()),
                    None => TransactionStatus::Confirmed,
                }
            }
            Some(_) => TransactionStatus::Pending,
            None if state.sent_pending.contains(id) => TransactionStatus::Pending,
            None => TransactionStatus::failed("transaction not found"),
        }
    }
}

impl std::fmt::Debug for InMemoryChainAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryChainAdapter")
            .field("chain", &self.chain)
            .field("round", &self.current_round())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChainAdapter for InMemoryChainAdapter {
    fn chain(&self) -> ChainId {
        self.chain
    }

    async fn get_current_block(&self) -> Result<Block, AdapterError> {
        self.check_failure()?;
        let round = self.current_round();
        Ok(Block {
            id: BlockRef::new(self.chain, round.to_string()),
            round,
        })
    }

    async fn get_transactions_status(
        &self,
        transactions: &[TransactionRef],
        timeout: Option<Duration>,
    ) -> Result<Vec<TransactionStatus>, AdapterError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.status_delay {
            match timeout {
                Some(limit) if delay > limit => {
                    tokio::time::sleep(limit).await;
                    return Err(AdapterError::Timeout(limit));
                }
                _ => tokio::time::sleep(delay).await,
            }
        }
        self.check_failure()?;

        if self.advance_on_status {
            self.advance();
        }

        let state = self.state.read();
        Ok(transactions
            .iter()
            .map(|transaction| self.status_of(&state, &transaction.transaction))
            .collect())
    }

    async fn send_transfer_transactions(
        &self,
        requests: Vec<InternalTransferRequest>,
    ) -> Result<Vec<TransactionRef>, AdapterError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }
        self.check_failure()?;

        let mut state = self.state.write();
        let mut refs = Vec::with_capacity(requests.len());
        for request in requests {
            state.nonce += 1;
            let id = self.transaction_id(&request, state.nonce);
            state.sent_pending.insert(id.clone());
            state.submitted.push(request);
            refs.push(TransactionRef::new(self.chain, id));
        }

        info!(
            "[c3-multichain] {} accepted {} transfers at round {}",
            self.chain,
            refs.len(),
            state.round
        );
        Ok(refs)
    }

    fn augment(
        &self,
        internal: &mut InternalTransferRequest,
        request: &TransferRequest,
    ) -> Result<(), AdapterError> {
        match self.chain {
            ChainId::Solana => solana_fields(internal, request),
            _ => Ok(()),
        }
    }
}

/// Builds [`InMemoryChainAdapter`]s and keeps a handle to each.
#[derive(Debug, Default)]
pub struct InMemoryAdapterFactory {
    adapters: RwLock<BTreeMap<ChainId, Arc<InMemoryChainAdapter>>>,
    advance_on_status: bool,
}

impl InMemoryAdapterFactory {
    /// Create a factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapters produce a block on every status query.
    pub fn with_advance_on_status(mut self) -> Self {
        self.advance_on_status = true;
        self
    }

    /// The adapter built for `chain`, if any.
    pub fn adapter(&self, chain: ChainId) -> Option<Arc<InMemoryChainAdapter>> {
        self.adapters.read().get(&chain).cloned()
    }
}

impl AdapterFactory for InMemoryAdapterFactory {
    fn create(
        &self,
        chain: ChainId,
        config: &ChainConnectionConfig,
        _registry: Arc<AssetRegistry>,
    ) -> Result<Arc<dyn ChainAdapter>, AdapterError> {
        let mut adapter = InMemoryChainAdapter::new(chain)
            .with_rounds_to_finalize(config.rounds_to_finalize.unwrap_or(0));
        if self.advance_on_status {
            adapter = adapter.with_advance_on_status();
        }
        let adapter = Arc::new(adapter);
        self.adapters.write().insert(chain, adapter.clone());
        Ok(adapter)
    }
}
