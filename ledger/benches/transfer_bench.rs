//! Benchmarks for the hot transfer paths.
//!
//! Run with `cargo bench -p nova-ledger`.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nova_ledger::{Address, Ledger, LedgerConfig, MemoryRegistry, NoFlows};

fn seeded_ledger() -> Ledger {
    let host = Address::new("nova1host");
    let mut ledger = Ledger::new(
        LedgerConfig {
            name: "NOVA Dollar".into(),
            symbol: "nUSDx".into(),
            underlying: Address::new("erc:usd"),
            underlying_decimals: 6,
            host: host.clone(),
            ledger_identity: Address::new("nova1ledger"),
            default_operators: vec![],
        },
        Arc::new(MemoryRegistry::new()),
        Arc::new(NoFlows),
    );
    ledger
        .operation_mint(&host, &Address::new("nova1alice"), u64::MAX as u128, false, vec![], vec![])
        .expect("mint");
    ledger
}

fn bench_simple_transfer(c: &mut Criterion) {
    let mut ledger = seeded_ledger();
    let alice = Address::new("nova1alice");
    let bob = Address::new("nova1bob");

    c.bench_function("simple_transfer", |b| {
        b.iter(|| {
            ledger
                .transfer(black_box(&alice), black_box(&bob), black_box(1))
                .expect("transfer");
        })
    });
}

fn bench_notified_send(c: &mut Criterion) {
    let mut ledger = seeded_ledger();
    let alice = Address::new("nova1alice");
    let bob = Address::new("nova1bob");

    c.bench_function("notified_send_no_hooks", |b| {
        b.iter(|| {
            ledger
                .send(black_box(&alice), black_box(&bob), black_box(1), vec![])
                .expect("send");
        })
    });
}

criterion_group!(benches, bench_simple_transfer, bench_notified_send);
criterion_main!(benches);
