//! # ChainSign Encoder Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | `send_document` calldata, 10 signers | < 50µs |
//! | selector hashing | < 5µs |
//! | signer sequence reorder, 50 entries | < 10µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cs_02_transaction_encoder::{encode_submission, EncoderConfig};
use cs_05_signer_sequence::{SignerSequence, SignerUser};
use shared_types::{get_selector_from_name, DocumentSubmission};

fn submission(signers: usize) -> DocumentSubmission {
    DocumentSubmission::new(
        "Quarterly Procurement Report",
        "purchase_order",
        (0..signers).map(|i| format!("0x{:064x}", i + 1)).collect(),
        "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
    )
}

fn bench_encode_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("cs-02-encode-submission");
    let config = EncoderConfig::default();

    for signers in [1usize, 10, 100] {
        let input = submission(signers);
        group.throughput(Throughput::Elements(signers as u64));
        group.bench_with_input(BenchmarkId::from_parameter(signers), &input, |b, input| {
            b.iter(|| black_box(encode_submission(input, &config)))
        });
    }
    group.finish();
}

fn bench_selector(c: &mut Criterion) {
    c.bench_function("shared-types-selector", |b| {
        b.iter(|| black_box(get_selector_from_name(black_box("send_document"))))
    });
}

fn bench_sequence_reorder(c: &mut Criterion) {
    let mut sequence = SignerSequence::new();
    for i in 0..50 {
        let id = format!("u{}", i);
        sequence
            .add(SignerUser::new(id.clone(), id, "x@corp.com", "HR"))
            .unwrap();
    }

    c.bench_function("cs-05-reorder-50", |b| {
        b.iter(|| {
            sequence.reorder(black_box(0), black_box(49)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_encode_submission,
    bench_selector,
    bench_sequence_reorder
);
criterion_main!(benches);
