//! # C3 References
//!
//! Typed identifiers for everything the multi-chain layer talks about.
//!
//! ## Grammar
//!
//! | Type | String form |
//! |------|-------------|
//! | [`ChainRef`] | `c3:chains:<chain>` |
//! | [`AccountRef`] | `c3:chains:<chain>:accounts:<account>` |
//! | [`BlockRef`] | `c3:chains:<chain>:blocks:<block>` |
//! | [`TransactionRef`] | `c3:chains:<chain>:transactions:<transaction>` |
//! | [`AssetRef`] | `c3:assets:<asset>` |
//! | [`AssetInstanceRef`] | `c3:chains:<chain>:assets:<asset>[:<instance>]` |
//!
//! The formats are stable and must be preserved byte-for-byte.
//!
//! ## Module Structure
//!
//! ```text
//! c3-references/
//! ├── chain.rs     # ChainId (closed set)
//! ├── asset.rs     # AssetId (closed set)
//! ├── refs.rs      # Reference types, parse/format
//! └── errors.rs    # ReferenceError
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod asset;
pub mod chain;
pub mod errors;
pub mod refs;

pub use asset::AssetId;
pub use chain::ChainId;
pub use errors::{RefKind, ReferenceError};
pub use refs::{
    display_instance, AccountRef, AssetInstanceRef, AssetRef, BlockRef, ChainRef,
    TransactionRef, DEFAULT_INSTANCE_LABEL,
};
