//! # Train Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | train-signatures | `verify` per scheme |
//! | train-memo | payload decode, script extraction |
//! | train-htlc | lock + redeem transition |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use shared_types::{Address, Hashlock, HtlcId};
use train_htlc::{new_secret_pair, Asset, HtlcApi, LockRequest, Routing};
use train_memo::{build_op_return_script, decode_event, decode_script, encode_event, MemoEvent};
use train_signatures::{
    AddLockMessage, SchemeDomains, SignatureVerificationApi, SignatureVerificationService,
};
use train_tests::fixtures::{Chain, TestSigner, ALL_SCHEMES, GENESIS};

// ============================================================================
// Signature verification
// ============================================================================

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("train-signatures");
    group.measurement_time(Duration::from_secs(5));

    let domains = SchemeDomains::default();
    let verifier = SignatureVerificationService::new(domains.clone());
    let message = AddLockMessage::new(
        HtlcId::new([0x42u8; 32]),
        Hashlock::from_secret(&[0x24u8; 32]),
        GENESIS + 3_600,
    );

    for scheme in ALL_SCHEMES {
        let signer = TestSigner::random(scheme);
        let signature = signer.sign(&domains, &message);
        group.bench_with_input(
            BenchmarkId::new("verify", scheme),
            &signature,
            |b, signature| {
                b.iter(|| black_box(verifier.verify(scheme, &message, signature).is_ok()))
            },
        );
    }

    group.finish();
}

// ============================================================================
// Memo codec
// ============================================================================

fn bench_memo(c: &mut Criterion) {
    let mut group = c.benchmark_group("train-memo");

    let event = MemoEvent::CommitLog {
        commit_id: HtlcId::new([0x01u8; 32]),
        timelock: GENESIS,
        dst_chain: "ETH".into(),
        dst_address: [0xAAu8; 20],
        dst_asset: "USDC".into(),
        src_receiver: "tb1qreceiver".into(),
    };
    let payload = encode_event(&event).expect("encodable");
    let script = build_op_return_script(&payload).expect("fits one push");

    group.bench_function("decode_payload_78", |b| {
        b.iter(|| black_box(decode_event(black_box(&payload))))
    });
    group.bench_function("decode_script", |b| {
        b.iter(|| black_box(decode_script(black_box(&script)).is_ok()))
    });
    group.bench_function("decode_unknown", |b| {
        let junk = vec![0x5Au8; 64];
        b.iter(|| black_box(decode_event(black_box(&junk))))
    });

    group.finish();
}

// ============================================================================
// HTLC transitions
// ============================================================================

fn bench_lock_redeem(c: &mut Criterion) {
    let mut group = c.benchmark_group("train-htlc");
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

    group.bench_function("lock_then_redeem", |b| {
        let chain = Chain::new(SchemeDomains::default());
        let sender = Address::new([0x0Au8; 32]);
        chain
            .escrow
            .credit(sender, Asset::Native, u128::MAX / 2)
            .expect("credit");
        let mut counter = 0u64;

        b.iter(|| {
            counter += 1;
            let mut id = [0u8; 32];
            id[24..].copy_from_slice(&counter.to_be_bytes());
            let (secret, hashlock) = new_secret_pair();

            runtime.block_on(async {
                chain
                    .service
                    .lock(
                        sender,
                        LockRequest {
                            id: HtlcId::new(id),
                            hashlock,
                            src_receiver: Address::new([0x0Bu8; 32]),
                            amount: 1,
                            asset: Asset::Native,
                            timelock: GENESIS + 3_600,
                            reward: 0,
                            reward_timelock: 0,
                            routing: Routing::default(),
                        },
                    )
                    .await
                    .expect("lock");
                black_box(chain.service.redeem(HtlcId::new(id), secret).await.is_ok())
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_verify, bench_memo, bench_lock_redeem);
criterion_main!(benches);
