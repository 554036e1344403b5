//! # Request Batches
//!
//! Batches arrive as JSON; configuration arrives as TOML. These flows start
//! from the wire forms.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use c3_references::ChainId;
    use c3_multichain::{
        setup_multichain, AdapterError, InMemoryAdapterFactory, InternalChainFields,
        MultiChainApi, MultiChainConfig, MultiChainError, TransactionRequest,
    };

    fn mainnet(chains: &[ChainId]) -> (c3_multichain::MultiChain, InMemoryAdapterFactory) {
        let config = MultiChainConfig::mainnet().unwrap().with_chains(chains);
        let factory = InMemoryAdapterFactory::new();
        let multichain = setup_multichain(&config, &factory).unwrap();
        (multichain, factory)
    }

    fn parse_batch(json: &str) -> anyhow::Result<Vec<TransactionRequest>> {
        Ok(serde_json::from_str(json)?)
    }

    const SOLANA_BATCH: &str = r#"[
        {
            "type": "transfer",
            "from": {
                "id": "c3:chains:solana:accounts:SENDER",
                "private_key": "AQIDBAUGBwg="
            },
            "to": "c3:chains:solana:accounts:RECIPIENT",
            "amount": { "id": "c3:chains:solana:assets:w", "amount": "42.5" },
            "chain_options": {
                "solana": {
                    "account_creation_payer": {
                        "id": "c3:chains:solana:accounts:PAYER",
                        "private_key": "CQoLDA=="
                    },
                    "to_token_account": "c3:chains:solana:accounts:RECIPIENT_ATA",
                    "priority_rate": 5000
                }
            }
        },
        {
            "type": "transfer",
            "from": {
                "id": "c3:chains:solana:accounts:SENDER",
                "private_key": "AQIDBAUGBwg="
            },
            "to": "c3:chains:solana:accounts:RECIPIENT",
            "amount": { "id": "c3:chains:solana:assets:sol", "amount": "0.000000001" }
        }
    ]"#;

    #[tokio::test]
    async fn test_solana_batch_from_json() {
        let (multichain, factory) = mainnet(&[ChainId::Solana]);
        let batch = parse_batch(SOLANA_BATCH).unwrap();

        let refs = multichain.send_transactions(&batch).await.unwrap();
        assert_eq!(refs.len(), 2);

        let submitted = factory.adapter(ChainId::Solana).unwrap().submitted();
        assert_eq!(submitted[0].from, "SENDER");
        let key = submitted[0].from_private_key.decode().unwrap();
        assert_eq!(key.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        let Some(InternalChainFields::Solana(fields)) = &submitted[0].chain_fields else {
            panic!("solana fields missing");
        };
        assert_eq!(fields.to_token_account.as_deref(), Some("RECIPIENT_ATA"));
        assert_eq!(fields.from_token_account, None);
        assert_eq!(fields.priority_rate, Some(5000));
        assert!(fields.creation_payer_private_key.is_some());

        assert_eq!(submitted[1].asset, "11111111111111111111111111111111");
        assert_eq!(submitted[1].amount.to_string(), "1");
        assert_eq!(submitted[1].chain_fields, None);
    }

    #[tokio::test]
    async fn test_solana_options_must_name_solana_accounts() {
        let (multichain, factory) = mainnet(&[ChainId::Solana]);
        let json = SOLANA_BATCH.replace(
            "c3:chains:solana:accounts:RECIPIENT_ATA",
            "c3:chains:ethereum:accounts:0xATA",
        );
        let batch = parse_batch(&json).unwrap();

        let err = multichain.send_transactions(&batch).await.unwrap_err();

        assert!(matches!(
            err,
            MultiChainError::Adapter {
                chain: ChainId::Solana,
                source: AdapterError::InvalidField { .. },
            }
        ));
        assert_eq!(factory.adapter(ChainId::Solana).unwrap().send_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_request_type_reports_its_index() {
        let (multichain, factory) = mainnet(&[ChainId::Algorand]);
        let batch = parse_batch(
            r#"[
                {
                    "type": "transfer",
                    "from": { "id": "c3:chains:algorand:accounts:A", "private_key": "AA==" },
                    "to": "c3:chains:algorand:accounts:B",
                    "amount": { "id": "c3:chains:algorand:assets:algo", "amount": "1" }
                },
                { "type": "stake", "validator": "V" }
            ]"#,
        )
        .unwrap();

        assert_eq!(batch[1], TransactionRequest::Unknown);
        let err = multichain.send_transactions(&batch).await.unwrap_err();

        assert_eq!(err, MultiChainError::UnknownTransactionType { index: 1 });
        assert_eq!(factory.adapter(ChainId::Algorand).unwrap().send_calls(), 0);
    }

    #[tokio::test]
    async fn test_settled_batch_isolates_failing_chain() {
        let (multichain, factory) = mainnet(&[ChainId::Algorand, ChainId::Ethereum]);
        factory
            .adapter(ChainId::Ethereum)
            .unwrap()
            .set_failure(Some(AdapterError::Rpc {
                code: -32000,
                message: "nonce too low".to_string(),
            }));
        let batch = parse_batch(
            r#"[
                {
                    "type": "transfer",
                    "from": { "id": "c3:chains:ethereum:accounts:0xA", "private_key": "AA==" },
                    "to": "c3:chains:ethereum:accounts:0xB",
                    "amount": { "id": "c3:chains:ethereum:assets:eth:wrapped", "amount": "1" }
                },
                {
                    "type": "transfer",
                    "from": { "id": "c3:chains:algorand:accounts:A", "private_key": "AA==" },
                    "to": "c3:chains:algorand:accounts:B",
                    "amount": { "id": "c3:chains:algorand:assets:algo", "amount": "1" }
                }
            ]"#,
        )
        .unwrap();

        let results = multichain.send_transactions_settled(&batch).await.unwrap();

        assert!(matches!(
            &results[0],
            Err(MultiChainError::Adapter {
                chain: ChainId::Ethereum,
                source: AdapterError::Rpc { code: -32000, .. },
            })
        ));
        assert_eq!(results[1].as_ref().unwrap().chain, ChainId::Algorand);
    }

    #[tokio::test]
    async fn test_setup_from_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mainnet = include_str!("../../../crates/c3-multichain/config/mainnet.toml");
        let assets = &mainnet[mainnet.find("[assets.").unwrap()..];
        write!(
            file,
            "[poller]\ninterval_ms = 250\nmax_rounds = 10\n\n\
             [chains.algorand]\napi_url = \"http://localhost:4001\"\nrounds_to_finalize = 1\n\n{assets}"
        )
        .unwrap();

        let config = MultiChainConfig::load(file.path()).unwrap();
        assert_eq!(config.chains.len(), 1);
        assert_eq!(config.poller.max_rounds, 10);

        let factory = InMemoryAdapterFactory::new();
        let multichain = setup_multichain(&config, &factory).unwrap();
        assert_eq!(multichain.chains(), vec![ChainId::Algorand]);

        let blocks = multichain.get_current_blocks().await.unwrap();
        assert_eq!(blocks[&ChainId::Algorand].round, 0);
    }
}
