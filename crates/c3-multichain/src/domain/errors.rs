//! # Domain Errors
//!
//! Error types for the multi-chain layer.
//!
//! Validation errors abort a batch before any adapter call. Adapter errors
//! are opaque transport failures and are wrapped with the chain they came
//! from.

use c3_references::{ChainId, ReferenceError};
use c3_registry::RegistryError;
use std::time::Duration;
use thiserror::Error;

/// Result type for multi-chain operations.
pub type MultiChainResult<T> = Result<T, MultiChainError>;

/// Errors raised by a chain adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// Connection or HTTP-level failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with an error.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Node error code
        code: i64,
        /// Node error message
        message: String,
    },

    /// Key material could not be used to sign.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The call did not complete in time.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// A chain-specific request field is invalid.
    #[error("Invalid field {field}: {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Multi-chain error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultiChainError {
    /// A reference string failed to parse.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Registry lookup or construction failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A request field names a different chain than the one handling it.
    #[error("Cross-chain mismatch in {field}: expected {expected}, got {actual}")]
    CrossChainMismatch {
        /// Chain handling the request
        expected: ChainId,
        /// Chain named by the field
        actual: ChainId,
        /// Which field disagreed
        field: &'static str,
    },

    /// Sender and recipient are the same account.
    #[error("Transfer from {account} to itself")]
    SelfTransfer {
        /// The account on both sides
        account: String,
    },

    /// Amount string is negative, empty or not a decimal number.
    #[error("Invalid amount {amount:?}: {reason}")]
    InvalidAmount {
        /// Amount as supplied
        amount: String,
        /// What is wrong with it
        reason: String,
    },

    /// No adapter is configured for the chain.
    #[error("Chain {chain} is not configured")]
    ChainNotConfigured {
        /// The unconfigured chain
        chain: ChainId,
    },

    /// Request at `index` is not a recognized transaction type.
    #[error("Unknown transaction type at index {index}")]
    UnknownTransactionType {
        /// Position in the caller's batch
        index: usize,
    },

    /// Adapter returned the wrong number of results.
    #[error("Adapter for {chain} returned {actual} results for {expected} inputs")]
    AdapterContract {
        /// Offending adapter's chain
        chain: ChainId,
        /// Results expected
        expected: usize,
        /// Results returned
        actual: usize,
    },

    /// Adapter call failed.
    #[error("Adapter for {chain} failed: {source}")]
    Adapter {
        /// Chain whose adapter failed
        chain: ChainId,
        /// Underlying adapter error
        #[source]
        source: AdapterError,
    },

    /// Poller gave up with transactions still pending.
    #[error("Gave up after {rounds} poll rounds with {outstanding} transactions pending")]
    PollTimeout {
        /// Status rounds executed
        rounds: u32,
        /// Transactions still pending
        outstanding: usize,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MultiChainError {
    /// Wrap an adapter error with its chain.
    pub fn adapter(chain: ChainId, source: AdapterError) -> Self {
        MultiChainError::Adapter { chain, source }
    }

    /// Whether this error was raised before any adapter was called.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MultiChainError::Reference(_)
                | MultiChainError::Registry(_)
                | MultiChainError::CrossChainMismatch { .. }
                | MultiChainError::SelfTransfer { .. }
                | MultiChainError::InvalidAmount { .. }
                | MultiChainError::ChainNotConfigured { .. }
                | MultiChainError::UnknownTransactionType { .. }
        )
    }
}
