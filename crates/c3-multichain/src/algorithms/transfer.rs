//! # Transfer Validation and Preparation
//!
//! The chain-agnostic part of sending a transfer: parse the references,
//! check that everything names the same chain, resolve the asset instance
//! and scale the amount.

use crate::domain::{
    scale_amount, InternalTransferRequest, MultiChainError, MultiChainResult, TransferRequest,
};
use c3_references::{AccountRef, AssetInstanceRef, ChainId};
use c3_registry::AssetRegistry;

/// Parsed references of a transfer, all on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRoute {
    /// Sender
    pub from: AccountRef,
    /// Recipient
    pub to: AccountRef,
    /// Asset instance moved
    pub asset: AssetInstanceRef,
}

impl TransferRoute {
    /// The chain every reference is on.
    pub fn chain(&self) -> ChainId {
        self.from.chain
    }
}

fn ensure_chain(expected: ChainId, actual: ChainId, field: &'static str) -> MultiChainResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(MultiChainError::CrossChainMismatch {
            expected,
            actual,
            field,
        })
    }
}

/// Check a transfer against `chain`.
///
/// In order: sender and recipient parse and are on `chain`, sender differs
/// from recipient, asset instance parses and is on `chain`.
pub fn validate_transfer(
    chain: ChainId,
    request: &TransferRequest,
) -> MultiChainResult<TransferRoute> {
    let from: AccountRef = request.from.id.parse()?;
    let to: AccountRef = request.to.parse()?;
    ensure_chain(chain, from.chain, "from")?;
    ensure_chain(chain, to.chain, "to")?;

    if from.account == to.account {
        return Err(MultiChainError::SelfTransfer {
            account: from.to_string(),
        });
    }

    let asset: AssetInstanceRef = request.amount.id.parse()?;
    ensure_chain(chain, asset.chain, "amount.id")?;

    Ok(TransferRoute { from, to, asset })
}

/// Validate a transfer against the chain its sender is on.
pub fn route_transfer(request: &TransferRequest) -> MultiChainResult<TransferRoute> {
    let from: AccountRef = request.from.id.parse()?;
    validate_transfer(from.chain, request)
}

/// Resolve the asset instance and scale the amount.
///
/// Chain-specific fields are left empty for the adapter to fill.
pub fn prepare_transfer(
    registry: &AssetRegistry,
    route: &TransferRoute,
    request: &TransferRequest,
) -> MultiChainResult<InternalTransferRequest> {
    let instance = registry.resolve(&route.asset)?;
    let amount = scale_amount(&request.amount.amount, instance.decimals)?;

    Ok(InternalTransferRequest {
        from: route.from.account.clone(),
        from_private_key: request.from.private_key.clone(),
        to: route.to.account.clone(),
        amount,
        asset: instance.native_id.clone(),
        chain_fields: None,
    })
}
