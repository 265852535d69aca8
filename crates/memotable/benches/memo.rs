use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memotable::{hash_table, memoize, HashTable, Memo};

thread_local! {
    static FIB: Memo<fn(&u64) -> u64, HashTable<u64, u64>> =
        memoize(hash_table).wrap(fib as fn(&u64) -> u64);
}

fn fib(n: &u64) -> u64 {
    if *n <= 1 {
        1
    } else {
        FIB.with(|memo| memo.call(n - 1) + memo.call(n - 2))
    }
}

fn bench_memo_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("memo_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("call_warm_key", |b| {
        let memo = memoize(hash_table).wrap(|n: &u64| n.wrapping_mul(2_654_435_761));

        // Warm every key the loop will touch
        for n in 0..100 {
            memo.call(n);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(memo.call(counter % 100));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_memo_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("memo_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("call_fresh_key", |b| {
        let memo = memoize(hash_table).wrap(|n: &u64| n.wrapping_mul(2_654_435_761));

        let mut counter = 0u64;
        b.iter(|| {
            // Advancing key guarantees a miss on every call
            black_box(memo.call(counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_memo_fib(c: &mut Criterion) {
    let mut group = c.benchmark_group("memo_fib");
    group.sample_size(50);

    group.bench_function("fib_20_cold_table", |b| {
        b.iter(|| {
            FIB.with(|memo| {
                memo.table_mut().clear();
                black_box(memo.call(20))
            });
        });
    });

    group.bench_function("fib_20_warm_table", |b| {
        FIB.with(|memo| memo.call(20));

        b.iter(|| {
            FIB.with(|memo| black_box(memo.call(20)));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_memo_hit,
    bench_memo_miss,
    bench_memo_fib
);
criterion_main!(benches);
