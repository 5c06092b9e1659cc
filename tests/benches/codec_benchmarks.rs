//! # MOI SDK Codec Benchmarks
//!
//! | Area | Measured |
//! |------|----------|
//! | Operations | payload validation, transform and encoding per kind |
//! | Interactions | full interaction encoding by operation count |
//! | Storage keys | derivation by accessor chain depth |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use moi_interactions::{InteractionAssembler, InteractionRequest, Operation, OperationCodec, Sender};
use moi_state::{derive, Accessor, StorageKey};
use moi_types::ParticipantId;
use serde_json::json;
use std::time::Duration;

const SENDER: &str = "0x28027ab68bd59c6cf54c83b32e02126859809436cd141b341d5fcb02bf7f6d64";
const ASSET: &str = "0x00000000a9f5e8463babc197252de33a265eefc71c3497440c06faa233bda94125dbc668";
const BENEFICIARY: &str = "0x94c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8757";

fn operation(value: serde_json::Value) -> Operation {
    serde_json::from_value(value).expect("benchmark operation")
}

// ============================================================================
// OPERATIONS
// ============================================================================

fn bench_operation_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("operation-encoding");
    group.measurement_time(Duration::from_secs(5));

    let cases = [
        (
            "asset_create",
            operation(json!({"type": 5, "payload": {
                "symbol": "MOI", "supply": 500, "standard": 0
            }})),
        ),
        (
            "asset_transfer",
            operation(json!({"type": 3, "payload": {
                "beneficiary": BENEFICIARY, "asset_id": ASSET, "amount": 100
            }})),
        ),
        (
            "logic_invoke",
            operation(json!({"type": 13, "payload": {
                "logic_id": "0x2000000002b41f96f85d57cbee6f6f57ab0d65352dd1d03ad156aa2e00000000",
                "callsite": "Transfer",
                "calldata": "0x0d6f0665b6019502737570706c790305f5e10073796d626f6c064d4f49"
            }})),
        ),
    ];

    for (name, op) in &cases {
        group.bench_function(*name, |b| b.iter(|| black_box(OperationCodec::encode(op))));
    }

    group.finish();
}

// ============================================================================
// INTERACTIONS
// ============================================================================

fn bench_interaction_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction-encoding");

    for count in [1usize, 8, 32] {
        let operations = (0..count)
            .map(|i| {
                operation(json!({"type": 8, "payload": {"asset_id": ASSET, "amount": i + 1}}))
            })
            .collect();
        let request = InteractionRequest {
            sender: Some(Sender::new(SENDER)),
            fuel_price: Some(1),
            fuel_limit: Some(10_000),
            operations,
            ..Default::default()
        };

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("encode", count), &request, |b, request| {
            b.iter(|| black_box(InteractionAssembler::encode(request)))
        });
    }

    group.finish();
}

// ============================================================================
// STORAGE KEYS
// ============================================================================

fn bench_storage_key_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage-key-derivation");
    let owner = ParticipantId::new([7; 32]);

    for depth in [1usize, 4, 16] {
        let accessors: Vec<Accessor> = (0..depth)
            .map(|i| match i % 3 {
                0 => Accessor::property(owner),
                1 => Accessor::ArrayIndex(i as u64),
                _ => Accessor::ClassField(1),
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("derive", depth), &accessors, |b, accessors| {
            b.iter(|| black_box(derive(StorageKey::from_u64(2), accessors)))
        });
    }

    group.bench_function("property_accessor", |b| {
        b.iter(|| black_box(Accessor::property(black_box(owner))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_operation_encoding,
    bench_interaction_encoding,
    bench_storage_key_derivation,
);
criterion_main!(benches);
