use ldif_decoder::{DecoderConfig, LdifDecoder};
use ldif_encoder::LdifEncoder;
use ldif_tests::{people, read_fixture};
use ldif_types::SchemaMap;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn encoded(count: usize) -> String {
    LdifEncoder::new()
        .add_entries(people(count))
        .encode_to_string()
        .unwrap()
}

fn bench_decode_fixture(c: &mut Criterion) {
    let text = read_fixture("people.ldif");

    c.bench_function("decode_fixture", |b| {
        b.iter(|| LdifDecoder::decode(&text).unwrap());
    });
}

fn bench_decode_base64(c: &mut Criterion) {
    let text = "dn:: Y249Wm/DqyxkYz1leGFtcGxl\ndescription:: SGVsbG8sIHdvcmxk\njpegPhoto:: /9j/4AAQSkZJRg==\n\n"
        .repeat(200);
    let map: SchemaMap = [("description", "2.5.5.12")].into_iter().collect();

    let mut group = c.benchmark_group("decode_base64");

    group.bench_function("no_schema_map", |b| {
        b.iter(|| LdifDecoder::decode(&text).unwrap());
    });

    group.bench_function("schema_map", |b| {
        b.iter(|| {
            LdifDecoder::decode_with(&text, DecoderConfig::default().with_schema_map(map.clone()))
                .unwrap()
        });
    });

    group.finish();
}

fn bench_decode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_throughput");

    for count in [100, 1_000, 10_000] {
        let text = encoded(count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("entries", count), &text, |b, t| {
            b.iter(|| LdifDecoder::decode(t).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_fixture,
    bench_decode_base64,
    bench_decode_throughput
);
criterion_main!(benches);
