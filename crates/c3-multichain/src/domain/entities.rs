//! # Domain Entities
//!
//! Requests, statuses and blocks exchanged with callers and adapters.
//!
//! Caller-facing requests carry references as strings; they are parsed and
//! checked by the transfer contract, so a malformed reference surfaces as a
//! validation error instead of a deserialization failure.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use c3_references::BlockRef;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Base64 encoded private key, passed through to adapters untouched.
///
/// Zeroized on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    encoded: String,
}

impl PrivateKey {
    /// Wrap an already base64 encoded key.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    /// Encode raw key bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(STANDARD.encode(bytes))
    }

    /// The base64 form (use carefully!).
    pub fn expose(&self) -> &str {
        &self.encoded
    }

    /// Decode to raw bytes. The buffer is zeroized on drop.
    pub fn decode(&self) -> Result<Zeroizing<Vec<u8>>, base64::DecodeError> {
        STANDARD.decode(&self.encoded).map(Zeroizing::new)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(***)")
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// An account able to sign: reference string plus key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// `c3:chains:<chain>:accounts:<account>`
    pub id: String,
    /// Signing key
    pub private_key: PrivateKey,
}

impl Account {
    /// Create an account.
    pub fn new(id: impl Into<String>, private_key: PrivateKey) -> Self {
        Self {
            id: id.into(),
            private_key,
        }
    }
}

/// A decimal amount of one asset instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAssetAmount {
    /// `c3:chains:<chain>:assets:<asset>[:<instance>]`
    pub id: String,
    /// Human decimal string, e.g. `"1.5"`
    pub amount: String,
}

/// Solana transfer options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolanaTransferOptions {
    /// Pays rent when the recipient token account has to be created.
    #[serde(default)]
    pub account_creation_payer: Option<Account>,
    /// Source token account, when not the associated one.
    #[serde(default)]
    pub from_token_account: Option<String>,
    /// Destination token account, when not the associated one.
    #[serde(default)]
    pub to_token_account: Option<String>,
    /// Compute unit price in micro-lamports.
    #[serde(default)]
    pub priority_rate: Option<u64>,
}

/// Per-chain transfer augmentation, keyed by chain name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainOptions {
    /// Solana-only options.
    Solana(SolanaTransferOptions),
}

/// Chain-agnostic transfer request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Sender
    pub from: Account,
    /// Recipient account reference string
    pub to: String,
    /// What and how much
    pub amount: ChainAssetAmount,
    /// Chain-specific extras
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_options: Option<ChainOptions>,
}

impl TransferRequest {
    /// Create a transfer without chain options.
    pub fn new(
        from: Account,
        to: impl Into<String>,
        asset: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to: to.into(),
            amount: ChainAssetAmount {
                id: asset.into(),
                amount: amount.into(),
            },
            chain_options: None,
        }
    }

    /// Attach chain options.
    pub fn with_chain_options(mut self, options: ChainOptions) -> Self {
        self.chain_options = Some(options);
        self
    }
}

/// A request in a batch, tagged by `type`.
///
/// Unrecognized tags deserialize to [`TransactionRequest::Unknown`] and are
/// rejected when the batch is validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionRequest {
    /// Move an amount of one asset between two accounts.
    Transfer(TransferRequest),
    /// Any other `type`.
    #[serde(other)]
    Unknown,
}

impl From<TransferRequest> for TransactionRequest {
    fn from(request: TransferRequest) -> Self {
        TransactionRequest::Transfer(request)
    }
}

/// Solana fields handed to the Solana adapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolanaInternalFields {
    /// Key of the account paying for token account creation.
    pub creation_payer_private_key: Option<PrivateKey>,
    /// Source token account (chain-native).
    pub from_token_account: Option<String>,
    /// Destination token account (chain-native).
    pub to_token_account: Option<String>,
    /// Compute unit price in micro-lamports.
    pub priority_rate: Option<u64>,
}

/// Chain-specific fields on an internal request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InternalChainFields {
    /// Solana
    Solana(SolanaInternalFields),
}

/// Validated, chain-native transfer instruction. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalTransferRequest {
    /// Chain-native sender address
    pub from: String,
    /// Sender key
    pub from_private_key: PrivateKey,
    /// Chain-native recipient address
    pub to: String,
    /// Amount in the asset's smallest unit
    pub amount: BigUint,
    /// Chain-native asset identifier
    pub asset: String,
    /// Per-chain extras filled in by the adapter's augmentation hook
    pub chain_fields: Option<InternalChainFields>,
}

/// Lifecycle of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Not yet final.
    Pending,
    /// Final and successful.
    Confirmed,
    /// Final and failed.
    Failed {
        /// Chain-reported reason
        reason: String,
    },
}

impl TransactionStatus {
    /// Failed with a reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        TransactionStatus::Failed {
            reason: reason.into(),
        }
    }

    /// Whether the status can still change.
    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }
}

/// A chain's current block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block reference
    pub id: BlockRef,
    /// Height / slot / round number
    pub round: u64,
}
