//! # Domain Module
//!
//! Core domain types for the multi-chain layer.

pub mod amount;
pub mod entities;
pub mod errors;

pub use amount::{scale_amount, MAX_EXPONENT};
pub use entities::*;
pub use errors::*;
