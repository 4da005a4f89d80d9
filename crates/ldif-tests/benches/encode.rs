use ldif_encoder::LdifEncoder;
use ldif_tests::{people, person};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_encode_single(c: &mut Criterion) {
    let entry = person(1);

    c.bench_function("encode_single", |b| {
        b.iter(|| {
            LdifEncoder::new()
                .add_entry(entry.clone())
                .encode()
                .unwrap()
        });
    });
}

fn bench_encode_options(c: &mut Criterion) {
    let entries = people(100);

    let mut group = c.benchmark_group("encode_options");

    group.bench_function("plain", |b| {
        b.iter(|| {
            LdifEncoder::new()
                .add_entries(entries.iter().cloned())
                .encode()
                .unwrap()
        });
    });

    group.bench_function("folded_76", |b| {
        b.iter(|| {
            LdifEncoder::new()
                .add_entries(entries.iter().cloned())
                .fold_at(76)
                .encode()
                .unwrap()
        });
    });

    group.bench_function("utf16", |b| {
        b.iter(|| {
            LdifEncoder::new()
                .add_entries(entries.iter().cloned())
                .utf16()
                .encode()
                .unwrap()
        });
    });

    group.finish();
}

fn bench_encode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_throughput");

    for count in [100, 1_000, 10_000] {
        let entries = people(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("entries", count), &entries, |b, e| {
            b.iter(|| {
                LdifEncoder::new()
                    .add_entries(e.iter().cloned())
                    .encode()
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_single,
    bench_encode_options,
    bench_encode_throughput
);
criterion_main!(benches);
