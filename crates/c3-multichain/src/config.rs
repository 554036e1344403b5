//! # Multi-Chain Configuration
//!
//! TOML-loadable configuration: the raw asset map, per-chain connection
//! parameters and poller defaults.
//!
//! ## Example
//!
//! ```toml
//! [poller]
//! interval_ms = 1000
//! max_rounds = 600
//!
//! [chains.ethereum]
//! api_url = "https://ethereum-rpc.publicnode.com"
//! rounds_to_finalize = 12
//!
//! [assets.eth.chains.ethereum.""]
//! id = "0x0000000000000000000000000000000000000000"
//! decimals = 18
//! ```
//!
//! Only chains listed under `[chains]` get an adapter. When the section is
//! omitted entirely, every supported chain is configured with its public
//! mainnet endpoint.

use crate::domain::ConfigError;
use crate::poller::PollOptions;
use c3_references::ChainId;
use c3_registry::PartialAssetMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

const MAINNET_TOML: &str = include_str!("../config/mainnet.toml");

/// Connection parameters for one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConnectionConfig {
    /// Node RPC endpoint.
    pub api_url: String,

    /// Indexer endpoint (Algorand).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer_url: Option<String>,

    /// Confirmations before a transaction counts as final (EVM chains).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds_to_finalize: Option<u64>,

    /// Per-call timeout for status lookups, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_timeout_ms: Option<u64>,
}

impl ChainConnectionConfig {
    /// Public mainnet endpoint for `chain`.
    pub fn default_for(chain: ChainId) -> Self {
        let (api_url, indexer_url, rounds_to_finalize) = match chain {
            ChainId::Algorand => (
                "https://mainnet-api.algonode.cloud",
                Some("https://mainnet-idx.algonode.cloud"),
                None,
            ),
            ChainId::Arbitrum => ("https://arbitrum-one.publicnode.com", None, Some(12)),
            ChainId::Avalanche => ("https://avalanche-c-chain-rpc.publicnode.com", None, Some(12)),
            ChainId::Binance => ("https://bsc-rpc.publicnode.com", None, Some(12)),
            ChainId::Ethereum => ("https://ethereum-rpc.publicnode.com", None, Some(12)),
            ChainId::Solana => ("https://solana-rpc.publicnode.com", None, None),
        };
        Self {
            api_url: api_url.to_string(),
            indexer_url: indexer_url.map(str::to_string),
            rounds_to_finalize,
            status_timeout_ms: None,
        }
    }

    /// Status lookup timeout, if configured.
    pub fn status_timeout(&self) -> Option<Duration> {
        self.status_timeout_ms.map(Duration::from_millis)
    }
}

/// Confirmation poller defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Sleep between status rounds, in milliseconds.
    pub interval_ms: u64,
    /// Rounds before giving up.
    pub max_rounds: u32,
    /// Overall time budget, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        let options = PollOptions::default();
        Self {
            interval_ms: options.interval.as_millis() as u64,
            max_rounds: options.max_rounds,
            deadline_ms: None,
        }
    }
}

impl PollerConfig {
    /// Poll options for [`crate::wait_for_transactions`].
    pub fn options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_millis(self.interval_ms),
            max_rounds: self.max_rounds,
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiChainConfig {
    /// Raw asset map, validated when the registry is built.
    pub assets: PartialAssetMap,

    /// Chains to connect, with their endpoints.
    #[serde(default = "default_chains")]
    pub chains: BTreeMap<ChainId, ChainConnectionConfig>,

    /// Poller defaults.
    #[serde(default)]
    pub poller: PollerConfig,
}

fn default_chains() -> BTreeMap<ChainId, ChainConnectionConfig> {
    ChainId::ALL
        .iter()
        .map(|chain| (*chain, ChainConnectionConfig::default_for(*chain)))
        .collect()
}

impl MultiChainConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Bundled mainnet configuration: every chain and the full asset map.
    pub fn mainnet() -> Result<Self, ConfigError> {
        Self::parse(MAINNET_TOML)
    }

    /// Keep only the listed chains.
    pub fn with_chains(mut self, chains: &[ChainId]) -> Self {
        self.chains.retain(|chain, _| chains.contains(chain));
        self
    }
}
