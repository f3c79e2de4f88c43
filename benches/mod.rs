use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    table::bench_init,
    table::bench_execute_hit,
    table::bench_execute_miss
);
criterion_main!(benches);
