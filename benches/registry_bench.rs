//! Benchmarks for FDB registry operations

use criterion::{criterion_group, criterion_main, Criterion};
use fdb::{Config, Root};
use tempfile::TempDir;

const RECORD_SIZE: usize = 4096;

fn registry_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .root_env("FDB_BENCH_UNSET_ROOT")
        .fallback_root(temp_dir.path().join("fdb"))
        .build();
    let root = Root::init(&config).unwrap();

    let mut registry = root.create_registry("bench").unwrap().created().unwrap();
    registry.open(RECORD_SIZE).unwrap();

    let payload = vec![0xA5u8; RECORD_SIZE];
    c.bench_function("registry_write_4k", |b| {
        b.iter(|| registry.write(&payload).unwrap())
    });

    let mut buf = vec![0u8; RECORD_SIZE];
    c.bench_function("registry_read_4k", |b| {
        b.iter(|| registry.read(&mut buf).unwrap())
    });

    c.bench_function("bank_create_lookup", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let name = format!("bank_{i}");
            i += 1;
            let bank = root.create_bank(&name).unwrap().created().unwrap();
            root.bank(&name).unwrap();
            bank.remove().unwrap();
        })
    });
}

criterion_group!(benches, registry_benchmarks);
criterion_main!(benches);
