//! # Reference Types
//!
//! Every reference is rooted at the literal `c3:` and round-trips through
//! its string form: `r.to_string().parse() == Ok(r)`.
//!
//! ```text
//! c3:chains:<chain>
//! c3:chains:<chain>:accounts:<account>
//! c3:chains:<chain>:blocks:<block>
//! c3:chains:<chain>:transactions:<transaction>
//! c3:assets:<asset>
//! c3:chains:<chain>:assets:<asset>[:<instance>]
//! ```
//!
//! Chain and asset segments are lowercased while parsing. Account, block,
//! transaction and instance segments are opaque and kept verbatim.

use crate::asset::AssetId;
use crate::chain::ChainId;
use crate::errors::{RefKind, ReferenceError};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Display name for the empty (chain default) instance label.
pub const DEFAULT_INSTANCE_LABEL: &str = "<default>";

/// Render an instance label for humans; the empty label becomes
/// [`DEFAULT_INSTANCE_LABEL`].
pub fn display_instance(instance: &str) -> &str {
    if instance.is_empty() {
        DEFAULT_INSTANCE_LABEL
    } else {
        instance
    }
}

fn segments(value: &str) -> Vec<&str> {
    value.split(':').collect()
}

/// Reference to a chain: `c3:chains:<chain>`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct ChainRef {
    /// The referenced chain.
    pub chain: ChainId,
}

impl ChainRef {
    /// Create a chain reference.
    pub fn new(chain: ChainId) -> Self {
        Self { chain }
    }
}

impl fmt::Display for ChainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c3:chains:{}", self.chain)
    }
}

impl FromStr for ChainRef {
    type Err = ReferenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match segments(value).as_slice() {
            ["c3", "chains", chain] => Ok(Self::new(chain.parse()?)),
            _ => Err(ReferenceError::malformed(RefKind::Chain, value)),
        }
    }
}

impl From<ChainId> for ChainRef {
    fn from(chain: ChainId) -> Self {
        Self::new(chain)
    }
}

/// Defines a `c3:chains:<chain>:<literal>:<value>` reference type.
macro_rules! chain_scoped_ref {
    (
        $(#[$meta:meta])*
        $name:ident, $field:ident, $literal:literal, $kind:expr
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            SerializeDisplay,
            DeserializeFromStr,
        )]
        pub struct $name {
            /// Chain the value lives on.
            pub chain: ChainId,
            /// Chain-native value, opaque to this crate.
            pub $field: String,
        }

        impl $name {
            /// Create a reference without checking the value.
            ///
            /// The caller must pass a non-empty value without `:`; anything
            /// else formats to a string that does not parse back.
            pub fn new(chain: ChainId, $field: impl Into<String>) -> Self {
                Self {
                    chain,
                    $field: $field.into(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "c3:chains:{}:{}:{}", self.chain, $literal, self.$field)
            }
        }

        impl FromStr for $name {
            type Err = ReferenceError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match segments(value).as_slice() {
                    ["c3", "chains", chain, $literal, item] if !item.is_empty() => {
                        Ok(Self::new(chain.parse()?, *item))
                    }
                    _ => Err(ReferenceError::malformed($kind, value)),
                }
            }
        }
    };
}

chain_scoped_ref!(
    /// Reference to an account: `c3:chains:<chain>:accounts:<account>`.
    AccountRef,
    account,
    "accounts",
    RefKind::Account
);

chain_scoped_ref!(
    /// Reference to a block: `c3:chains:<chain>:blocks:<block>`.
    BlockRef,
    block,
    "blocks",
    RefKind::Block
);

chain_scoped_ref!(
    /// Reference to a transaction: `c3:chains:<chain>:transactions:<transaction>`.
    ///
    /// Value-comparable; the orchestrator keys maps by it.
    TransactionRef,
    transaction,
    "transactions",
    RefKind::Transaction
);

/// Reference to a logical asset: `c3:assets:<asset>`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct AssetRef {
    /// The referenced asset.
    pub asset: AssetId,
}

impl AssetRef {
    /// Create an asset reference.
    pub fn new(asset: AssetId) -> Self {
        Self { asset }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c3:assets:{}", self.asset)
    }
}

impl FromStr for AssetRef {
    type Err = ReferenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match segments(value).as_slice() {
            ["c3", "assets", asset] => Ok(Self::new(asset.parse()?)),
            _ => Err(ReferenceError::malformed(RefKind::Asset, value)),
        }
    }
}

/// Reference to one representation of an asset on a chain:
/// `c3:chains:<chain>:assets:<asset>[:<instance>]`.
///
/// The empty instance is the chain's default representation (native ETH on
/// Ethereum, as opposed to the `wrapped` ERC-20 instance).
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct AssetInstanceRef {
    /// Chain the instance lives on.
    pub chain: ChainId,
    /// Logical asset.
    pub asset: AssetId,
    /// Instance label, empty for the default instance.
    pub instance: String,
}

impl AssetInstanceRef {
    /// Reference the default instance of `asset` on `chain`.
    pub fn new(chain: ChainId, asset: AssetId) -> Self {
        Self::with_instance(chain, asset, "")
    }

    /// Reference a labelled instance.
    pub fn with_instance(chain: ChainId, asset: AssetId, instance: impl Into<String>) -> Self {
        Self {
            chain,
            asset,
            instance: instance.into(),
        }
    }

    /// Whether this is the chain default instance.
    pub fn is_default_instance(&self) -> bool {
        self.instance.is_empty()
    }
}

impl fmt::Display for AssetInstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c3:chains:{}:assets:{}", self.chain, self.asset)?;
        if !self.instance.is_empty() {
            write!(f, ":{}", self.instance)?;
        }
        Ok(())
    }
}

impl FromStr for AssetInstanceRef {
    type Err = ReferenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match segments(value).as_slice() {
            ["c3", "chains", chain, "assets", asset] => {
                Ok(Self::new(chain.parse()?, asset.parse()?))
            }
            ["c3", "chains", chain, "assets", asset, instance] if !instance.is_empty() => Ok(
                Self::with_instance(chain.parse()?, asset.parse()?, *instance),
            ),
            _ => Err(ReferenceError::malformed(RefKind::AssetInstance, value)),
        }
    }
}
