use bytes::Bytes;
use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use protowire_codec::{Decoder, Encoder};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Number of varints encoded per iteration.
const VALUES: usize = 10_000;

fn bench_varint(c: &mut Criterion) {
    let mut group = c.benchmark_group(module_path!());
    group.throughput(Throughput::Elements(VALUES as u64));

    // Values are drawn below 2^bits, so `bits` controls the encoded width.
    for bits in [7u32, 21, 35, 64] {
        let mut rng = StdRng::seed_from_u64(0);
        let values: Vec<u64> = (0..VALUES)
            .map(|_| rng.gen::<u64>() >> (64 - bits))
            .collect();

        group.bench_with_input(BenchmarkId::new("write", bits), &values, |b, values| {
            b.iter(|| {
                let mut encoder = Encoder::new();
                for value in values {
                    encoder.write_varint(*value);
                }
                encoder.finish()
            });
        });

        let mut encoder = Encoder::new();
        for value in &values {
            encoder.write_varint(*value);
        }
        let encoded: Bytes = encoder.finish();
        group.bench_with_input(BenchmarkId::new("read", bits), &encoded, |b, encoded| {
            b.iter(|| {
                let mut decoder = Decoder::new(encoded.clone());
                while !decoder.is_eof() {
                    decoder.read_varint().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_varint);
