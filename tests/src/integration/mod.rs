//! # Integration Flows
//!
//! - [`flows`]: configuration to confirmed transfers, batch ordering and
//!   rejection paths
//! - [`requests`]: JSON request batches as callers submit them

pub mod flows;
pub mod requests;
