//! # Multi-Chain Flows
//!
//! Configuration through setup, dispatch and confirmation, with every
//! chain backed by an in-memory adapter.
//!
//! ## Flows Tested:
//!
//! 1. **Setup**: bundled mainnet config → registry → one adapter per chain
//! 2. **Ordering**: a mixed `{Algorand, Ethereum, Algorand}` batch answers in
//!    caller order even when the chains finish out of order
//! 3. **Rejection**: cross-chain and self transfers fail before any adapter
//!    sees a request
//! 4. **Confirmation**: the poller waits out each chain's finality depth
//! 5. **Telemetry**: dispatches show up in the Prometheus exposition

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    use c3_references::{ChainId, ReferenceError};
    use c3_multichain::{
        setup_multichain, Account, InMemoryAdapterFactory, InMemoryChainAdapter, MultiChain,
        MultiChainApi, MultiChainConfig, MultiChainError, PollOptions, PrivateKey,
        TransactionRequest, TransactionStatus, TransferRequest,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Network {
        multichain: MultiChain,
        factory: InMemoryAdapterFactory,
    }

    impl Network {
        fn mainnet(chains: &[ChainId]) -> Self {
            let config = MultiChainConfig::mainnet()
                .expect("bundled config parses")
                .with_chains(chains);
            let factory = InMemoryAdapterFactory::new().with_advance_on_status();
            let multichain = setup_multichain(&config, &factory).expect("setup");
            Self {
                multichain,
                factory,
            }
        }

        fn adapter(&self, chain: ChainId) -> Arc<InMemoryChainAdapter> {
            self.factory.adapter(chain).expect("adapter for configured chain")
        }
    }

    fn sender(chain: ChainId) -> Account {
        Account::new(
            format!("c3:chains:{chain}:accounts:SENDER"),
            PrivateKey::from_bytes(&[7u8; 32]),
        )
    }

    fn transfer(chain: ChainId, to: &str, asset: &str, amount: &str) -> TransactionRequest {
        TransferRequest::new(
            sender(chain),
            format!("c3:chains:{chain}:accounts:{to}"),
            format!("c3:chains:{chain}:assets:{asset}"),
            amount,
        )
        .into()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_setup_connects_every_mainnet_chain() {
        let network = Network::mainnet(&ChainId::ALL);

        assert_eq!(network.multichain.chains().len(), ChainId::ALL.len());
        for chain in ChainId::ALL {
            assert_eq!(network.adapter(chain).current_round(), 0);
        }
        assert!(network.multichain.registry().instance_count() > ChainId::ALL.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_batch_answers_in_caller_order() {
        let network = Network::mainnet(&[ChainId::Algorand, ChainId::Ethereum]);
        let batch = vec![
            transfer(ChainId::Algorand, "ALICE", "algo", "1.5"),
            transfer(ChainId::Ethereum, "0xB0B", "eth", "0.000000000000000001"),
            transfer(ChainId::Algorand, "CAROL", "usdc:wormhole", "12.34"),
        ];

        let refs = network.multichain.send_transactions(&batch).await.unwrap();

        assert_eq!(
            refs.iter().map(|r| r.chain).collect::<Vec<_>>(),
            vec![ChainId::Algorand, ChainId::Ethereum, ChainId::Algorand]
        );

        let algorand = network.adapter(ChainId::Algorand).submitted();
        assert_eq!(algorand.len(), 2);
        assert_eq!(algorand[0].to, "ALICE");
        assert_eq!(algorand[0].asset, "0");
        assert_eq!(algorand[0].amount.to_string(), "1500000");
        assert_eq!(algorand[1].to, "CAROL");

        let ethereum = network.adapter(ChainId::Ethereum).submitted();
        assert_eq!(ethereum.len(), 1);
        assert_eq!(ethereum[0].amount.to_string(), "1");
        assert_eq!(network.adapter(ChainId::Ethereum).send_calls(), 1);
    }

    #[tokio::test]
    async fn test_cross_chain_transfer_sends_nothing() {
        let network = Network::mainnet(&[ChainId::Ethereum, ChainId::Arbitrum]);
        let cross: TransactionRequest = TransferRequest::new(
            sender(ChainId::Ethereum),
            "c3:chains:arbitrum:accounts:0xB0B",
            "c3:chains:ethereum:assets:eth",
            "1",
        )
        .into();
        let batch = vec![transfer(ChainId::Arbitrum, "0xA", "eth", "1"), cross];

        let err = network.multichain.send_transactions(&batch).await.unwrap_err();

        assert_eq!(
            err,
            MultiChainError::CrossChainMismatch {
                expected: ChainId::Ethereum,
                actual: ChainId::Arbitrum,
                field: "to",
            }
        );
        assert_eq!(network.adapter(ChainId::Ethereum).send_calls(), 0);
        assert_eq!(network.adapter(ChainId::Arbitrum).send_calls(), 0);
    }

    #[tokio::test]
    async fn test_self_transfer_rejected() {
        let network = Network::mainnet(&[ChainId::Solana]);
        let batch = vec![transfer(ChainId::Solana, "SENDER", "sol", "1")];

        let err = network.multichain.send_transactions(&batch).await.unwrap_err();

        assert!(matches!(err, MultiChainError::SelfTransfer { .. }));
        assert!(err.is_validation());
        assert_eq!(network.adapter(ChainId::Solana).send_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_reference_rejected() {
        let network = Network::mainnet(&[ChainId::Algorand]);
        let bad: TransactionRequest = TransferRequest::new(
            sender(ChainId::Algorand),
            "c3:chain:algorand:accounts:BOB",
            "c3:chains:algorand:assets:algo",
            "1",
        )
        .into();

        let err = network.multichain.send_transactions(&[bad]).await.unwrap_err();

        assert!(matches!(
            err,
            MultiChainError::Reference(ReferenceError::Malformed { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_confirms_after_finality_depth() {
        let mut config = MultiChainConfig::mainnet()
            .unwrap()
            .with_chains(&[ChainId::Algorand, ChainId::Ethereum]);
        if let Some(ethereum) = config.chains.get_mut(&ChainId::Ethereum) {
            ethereum.rounds_to_finalize = Some(2);
        }
        let factory = InMemoryAdapterFactory::new().with_advance_on_status();
        let multichain = setup_multichain(&config, &factory).unwrap();

        let refs = multichain
            .send_transactions(&[
                transfer(ChainId::Ethereum, "0xB0B", "eth", "2"),
                transfer(ChainId::Algorand, "ALICE", "algo", "3"),
            ])
            .await
            .unwrap();

        let started = Instant::now();
        let statuses = multichain.wait_for_transactions(&refs).await.unwrap();

        assert_eq!(statuses, vec![TransactionStatus::Confirmed; 2]);
        // Ethereum: included on the first query, final two blocks later
        assert_eq!(factory.adapter(ChainId::Ethereum).unwrap().status_calls(), 3);
        // Algorand finalizes at inclusion and is not queried again
        assert_eq!(factory.adapter(ChainId::Algorand).unwrap().status_calls(), 1);
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_reports_failed_transactions() {
        let network = Network::mainnet(&[ChainId::Binance]);
        let multichain = network
            .multichain
            .clone()
            .with_poll_options(PollOptions::with_interval(Duration::from_millis(100)));

        let refs = multichain
            .send_transactions(&[
                transfer(ChainId::Binance, "0x1", "bnb", "1"),
                transfer(ChainId::Binance, "0x2", "bnb", "1"),
            ])
            .await
            .unwrap();
        network
            .adapter(ChainId::Binance)
            .fail_transaction(&refs[1], "insufficient funds");

        let statuses = multichain.wait_for_transactions(&refs).await.unwrap();

        assert_eq!(statuses[0], TransactionStatus::Confirmed);
        assert_eq!(statuses[1], TransactionStatus::failed("insufficient funds"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_gives_up_after_round_cap() {
        let network = Network::mainnet(&[ChainId::Avalanche]);
        let multichain = network.multichain.clone().with_poll_options(PollOptions {
            interval: Duration::from_secs(1),
            max_rounds: 4,
            deadline: None,
        });

        let refs = multichain
            .send_transactions(&[transfer(ChainId::Avalanche, "0xC", "avax", "0.5")])
            .await
            .unwrap();
        let err = multichain.wait_for_transactions(&refs).await.unwrap_err();

        assert_eq!(
            err,
            MultiChainError::PollTimeout {
                rounds: 4,
                outstanding: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_current_blocks_cover_configured_chains() {
        let network = Network::mainnet(&[ChainId::Algorand, ChainId::Solana]);
        network.adapter(ChainId::Solana).advance_by(5);

        let blocks = network.multichain.get_current_blocks().await.unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[&ChainId::Solana].round, 5);
        assert_eq!(blocks[&ChainId::Solana].id.chain, ChainId::Solana);
        assert_eq!(blocks[&ChainId::Algorand].round, 0);
    }

    #[tokio::test]
    async fn test_dispatches_are_exported_as_metrics() {
        c3_telemetry::register_metrics().unwrap();
        let network = Network::mainnet(&[ChainId::Algorand]);
        let refs = network
            .multichain
            .send_transactions(&[transfer(ChainId::Algorand, "ALICE", "algo", "1")])
            .await
            .unwrap();
        network.multichain.get_transactions_statuses(&refs).await.unwrap();

        let text = c3_telemetry::encode_metrics().unwrap();

        assert!(text.contains("c3_multichain_transfers_submitted_total"));
        assert!(text.contains("c3_multichain_status_queries_total"));
        assert!(text.contains("c3_multichain_dispatch_duration_seconds"));
    }
}
