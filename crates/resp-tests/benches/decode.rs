use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use resp_decoder::{Parser, ParserConfig};
use resp_encoder::CommandEncoder;
use resp_tests::ChunkedReader;

fn drain(payload: &[u8]) -> usize {
    Parser::new(payload).commands().map(Result::unwrap).count()
}

fn bench_decode_single(c: &mut Criterion) {
    let payload = CommandEncoder::new()
        .add_multi(&["SET", "key", "value"])
        .encode()
        .unwrap();

    c.bench_function("decode_single_set", |b| {
        b.iter(|| drain(&payload));
    });
}

fn bench_decode_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_pipeline");

    for depth in [1usize, 16, 128, 1024] {
        let mut enc = CommandEncoder::new();
        for i in 0..depth {
            enc.add_multi(&["SET".to_string(), format!("key:{i}"), "v".repeat(32)]);
        }
        let payload = enc.encode().unwrap();

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &payload, |b, p| {
            b.iter(|| drain(p));
        });
    }
    group.finish();
}

fn bench_decode_large_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_large_bulk");
    let config = ParserConfig {
        max_bulk_size: 1 << 24,
        ..ParserConfig::default()
    };

    for size in [1usize << 10, 1 << 16, 1 << 20] {
        let body = vec![b'x'; size];
        let payload = CommandEncoder::new()
            .add_multi(&[b"SET".to_vec(), b"blob".to_vec(), body])
            .encode()
            .unwrap();

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, p| {
            b.iter(|| {
                let mut parser = Parser::with_config(p.as_slice(), config.clone()).unwrap();
                parser.read_command().unwrap()
            });
        });
    }
    group.finish();
}

fn bench_decode_chunked(c: &mut Criterion) {
    let mut enc = CommandEncoder::new();
    for i in 0..64 {
        enc.add_multi(&["GET".to_string(), format!("key:{i}")]);
    }
    let payload = enc.encode().unwrap();

    let mut group = c.benchmark_group("decode_chunked");
    for chunk in [1usize, 16, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let source = ChunkedReader::new(payload.clone(), chunk);
                Parser::new(source).commands().map(Result::unwrap).count()
            });
        });
    }
    group.finish();
}

fn bench_decode_inline(c: &mut Criterion) {
    let payload = b"SET key value\r\n".to_vec();

    c.bench_function("decode_inline", |b| {
        b.iter(|| drain(&payload));
    });
}

criterion_group!(
    benches,
    bench_decode_single,
    bench_decode_pipeline,
    bench_decode_large_bulk,
    bench_decode_chunked,
    bench_decode_inline,
);
criterion_main!(benches);
