//! # Reference Errors
//!
//! Failures raised while parsing `c3:` reference strings.

use std::fmt;
use thiserror::Error;

/// The reference grammar a string was parsed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefKind {
    /// `c3:chains:<chain>`
    Chain,
    /// `c3:chains:<chain>:accounts:<account>`
    Account,
    /// `c3:chains:<chain>:blocks:<block>`
    Block,
    /// `c3:chains:<chain>:transactions:<transaction>`
    Transaction,
    /// `c3:assets:<asset>`
    Asset,
    /// `c3:chains:<chain>:assets:<asset>[:<instance>]`
    AssetInstance,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefKind::Chain => "chain",
            RefKind::Account => "account",
            RefKind::Block => "block",
            RefKind::Transaction => "transaction",
            RefKind::Asset => "asset",
            RefKind::AssetInstance => "asset instance",
        };
        f.write_str(name)
    }
}

/// Reference parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Segment count, literal separator or an empty value segment did not
    /// match the grammar of `kind`.
    #[error("Malformed {kind} reference: {value}")]
    Malformed {
        /// Grammar the value was checked against
        kind: RefKind,
        /// The offending input
        value: String,
    },

    /// Chain segment is not one of the supported chains.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    /// Asset segment is not one of the supported assets.
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),
}

impl ReferenceError {
    pub(crate) fn malformed(kind: RefKind, value: &str) -> Self {
        ReferenceError::Malformed {
            kind,
            value: value.to_string(),
        }
    }
}
