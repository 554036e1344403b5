//! # Algorithms Module
//!
//! Transfer validation, per-chain augmentation and batch partitioning.

pub mod augment;
pub mod partition;
pub mod transfer;

pub use augment::solana_fields;
pub use partition::{partition_by_chain, Partition, Reassembly};
pub use transfer::{prepare_transfer, route_transfer, validate_transfer, TransferRoute};
