//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound `ChainAdapter` port.

mod in_memory;

pub use in_memory::{InMemoryAdapterFactory, InMemoryChainAdapter};
