//! # Per-Chain Augmentation
//!
//! Helpers adapters call from [`crate::ChainAdapter::augment`] to copy
//! chain-specific options onto an internal request.

use crate::domain::{
    AdapterError, ChainOptions, InternalChainFields, InternalTransferRequest,
    SolanaInternalFields, TransferRequest,
};
use c3_references::{AccountRef, ChainId};

fn invalid(field: &str, reason: impl Into<String>) -> AdapterError {
    AdapterError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Parse an optional account reference that must be on Solana, returning
/// the chain-native address.
fn solana_account(field: &str, value: Option<&str>) -> Result<Option<String>, AdapterError> {
    value
        .map(|value| {
            let account: AccountRef = value.parse().map_err(|e| invalid(field, format!("{e}")))?;
            if account.chain != ChainId::Solana {
                return Err(invalid(
                    field,
                    format!("expected a solana account, got {}", account.chain),
                ));
            }
            Ok(account.account)
        })
        .transpose()
}

/// Copy Solana options from `request` onto `internal`.
///
/// Token accounts and the creation payer must be Solana account
/// references. Requests without Solana options are left untouched.
pub fn solana_fields(
    internal: &mut InternalTransferRequest,
    request: &TransferRequest,
) -> Result<(), AdapterError> {
    let Some(ChainOptions::Solana(options)) = &request.chain_options else {
        return Ok(());
    };

    let payer = &options.account_creation_payer;
    solana_account(
        "account_creation_payer",
        payer.as_ref().map(|account| account.id.as_str()),
    )?;

    internal.chain_fields = Some(InternalChainFields::Solana(SolanaInternalFields {
        creation_payer_private_key: payer.as_ref().map(|account| account.private_key.clone()),
        from_token_account: solana_account(
            "from_token_account",
            options.from_token_account.as_deref(),
        )?,
        to_token_account: solana_account("to_token_account", options.to_token_account.as_deref())?,
        priority_rate: options.priority_rate,
    }));

    Ok(())
}
