use criterion::criterion_main;

mod varint;

criterion_main!(varint::benches, message::benches);
