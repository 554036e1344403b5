//! # C3 Multi-Chain Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Amounts | Decimal string → smallest unit |
//! | References | Parse account and asset references |
//! | Orchestrator | Partition a mixed batch by chain |
//! | Orchestrator | Validate, dispatch and reassemble a batch |

use c3_multichain::{
    partition_by_chain, scale_amount, setup_multichain, Account, InMemoryAdapterFactory,
    MultiChainApi, MultiChainConfig, PrivateKey, TransactionRequest, TransferRequest,
};
use c3_references::{AccountRef, AssetInstanceRef, ChainId};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn mixed_batch(size: usize) -> Vec<TransactionRequest> {
    const CHAINS: [(ChainId, &str); 3] = [
        (ChainId::Algorand, "algo"),
        (ChainId::Ethereum, "eth"),
        (ChainId::Solana, "sol"),
    ];
    (0..size)
        .map(|i| {
            let (chain, asset) = CHAINS[i % CHAINS.len()];
            TransferRequest::new(
                Account::new(
                    format!("c3:chains:{chain}:accounts:SENDER"),
                    PrivateKey::from_bytes(&[3u8; 32]),
                ),
                format!("c3:chains:{chain}:accounts:R{i}"),
                format!("c3:chains:{chain}:assets:{asset}"),
                format!("{i}.125"),
            )
            .into()
        })
        .collect()
}

// ============================================================================
// Amounts
// ============================================================================

fn bench_scale_amount(c: &mut Criterion) {
    let mut group = c.benchmark_group("amounts");

    for (name, amount, decimals) in [
        ("integer", "1500", 6),
        ("fraction", "1.123456789", 18),
        ("exponent", "2.5e-3", 9),
        ("rounded", "0.0000005", 6),
    ] {
        group.bench_with_input(BenchmarkId::new("scale_amount", name), &amount, |b, amount| {
            b.iter(|| black_box(scale_amount(amount, decimals)))
        });
    }

    group.finish();
}

// ============================================================================
// References
// ============================================================================

fn bench_reference_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("references");

    group.bench_function("parse_account", |b| {
        b.iter(|| black_box("c3:chains:ethereum:accounts:0xB0B".parse::<AccountRef>()))
    });
    group.bench_function("parse_asset_instance", |b| {
        b.iter(|| black_box("c3:chains:algorand:assets:usdc:wormhole".parse::<AssetInstanceRef>()))
    });

    group.finish();
}

// ============================================================================
// Orchestrator
// ============================================================================

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("orchestrator");

    for size in [10usize, 100, 1000] {
        let items: Vec<(ChainId, usize)> = (0..size)
            .map(|i| (ChainId::ALL[i % ChainId::ALL.len()], i))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("partition_by_chain", size), &items, |b, items| {
            b.iter(|| black_box(partition_by_chain(items.iter().copied())))
        });
    }

    group.finish();
}

fn bench_send_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("orchestrator");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");
    let config = MultiChainConfig::mainnet().expect("bundled config");
    let multichain =
        setup_multichain(&config, &InMemoryAdapterFactory::new()).expect("multichain setup");

    for size in [10usize, 100] {
        let batch = mixed_batch(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("send_transactions", size), &batch, |b, batch| {
            b.iter(|| {
                runtime.block_on(async {
                    black_box(multichain.send_transactions(batch).await.expect("send"))
                })
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scale_amount,
    bench_reference_parsing,
    bench_partition,
    bench_send_batch,
);

criterion_main!(benches);
