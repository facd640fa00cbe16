//! Benchmarks for corkboard store operations

use criterion::{criterion_group, criterion_main, Criterion};

use corkboard::model::Board;
use corkboard::store::RecordStore;
use tempfile::TempDir;

fn store_benchmarks(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let store: RecordStore<Board> = RecordStore::open(temp.path(), "board").unwrap();

    c.bench_function("store_save", |b| {
        b.iter(|| {
            let mut board = Board::new("bench", "bench");
            store.save(&mut board).unwrap();
        })
    });

    // List cost scales with last_id, so bench a store of fixed size
    let temp = TempDir::new().unwrap();
    let store: RecordStore<Board> = RecordStore::open(temp.path(), "board").unwrap();
    for n in 0..100 {
        let mut board = Board::new(format!("board {}", n), format!("code{}", n));
        store.save(&mut board).unwrap();
    }

    c.bench_function("store_list_100", |b| b.iter(|| store.list().unwrap()));
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
