//! # C3 Multi-Chain
//!
//! One chain-agnostic vocabulary for transfers, transaction status and
//! blocks across Ethereum, Algorand, Solana, Arbitrum, Avalanche and
//! Binance Smart Chain.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Flow
//!
//! ```text
//! caller ──► MultiChain ──partition by chain──► Blockchain (per chain)
//!                │                                 │ validate, resolve,
//!                │                                 │ scale, augment
//!                ◄──reassemble in caller order──── ChainAdapter ──► chain
//! ```
//!
//! ## Guarantees
//!
//! | Guarantee | Where |
//! |-----------|-------|
//! | `results[i]` answers `requests[i]` | [`MultiChain`] |
//! | Invalid batches send nothing | [`MultiChain`], [`Blockchain`] |
//! | Exact decimal scaling, round half up | [`scale_amount`] |
//! | Bounded polling | [`wait_for_transactions`] |
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = MultiChainConfig::load("c3.toml")?;
//! let multichain = setup_multichain(&config, &MyAdapterFactory)?;
//! let refs = multichain.send_transactions(&requests).await?;
//! let statuses = multichain.wait_for_transactions(&refs).await?;
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! c3-multichain/
//! ├── domain/          # Requests, statuses, amounts, errors
//! ├── algorithms/      # Transfer validation, augmentation, partitioning
//! ├── ports/           # MultiChainApi, ChainAdapter, AdapterFactory
//! ├── adapters/        # InMemoryChainAdapter
//! ├── blockchain.rs    # Per-chain transfer contract
//! ├── service.rs       # Orchestrator
//! ├── poller.rs        # Confirmation poller
//! ├── config.rs        # TOML configuration
//! └── setup.rs         # Config → MultiChain
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod blockchain;
pub mod config;
pub mod domain;
pub mod poller;
pub mod ports;
pub mod service;
pub mod setup;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use adapters::{InMemoryAdapterFactory, InMemoryChainAdapter};
pub use algorithms::{partition_by_chain, solana_fields, Partition, Reassembly, TransferRoute};
pub use blockchain::Blockchain;
pub use config::{ChainConnectionConfig, MultiChainConfig, PollerConfig};
pub use domain::{
    scale_amount, Account, AdapterError, Block, ChainAssetAmount, ChainOptions, ConfigError,
    InternalChainFields, InternalTransferRequest, MultiChainError, MultiChainResult, PrivateKey,
    SolanaInternalFields, SolanaTransferOptions, TransactionRequest, TransactionStatus,
    TransferRequest,
};
pub use poller::{wait_for_transactions, PollOptions};
pub use ports::{AdapterFactory, ChainAdapter, MultiChainApi};
pub use service::MultiChain;
pub use setup::setup_multichain;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
