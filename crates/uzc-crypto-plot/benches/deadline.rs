// Plot generation and deadline benchmarks.
//
// One deadline costs a full plot nonce (8192 Shabal-256 calls); the parallel
// search is measured over a small nonce range.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use uzc_crypto_core::AccountId;
use uzc_crypto_plot::{
    DeadlineSearch, GenerationSignature, MiningPlot, PocVersion, Scoop, SearchConfig,
};

const ACCOUNT: AccountId = AccountId(7009665667967103287);

fn search() -> DeadlineSearch {
    DeadlineSearch::new(
        ACCOUNT,
        GenerationSignature([0x5a; 32]),
        Scoop::wrapping(769),
        18325193796,
        PocVersion::V2,
    )
    .unwrap()
}

fn bench_plot_generation(c: &mut Criterion) {
    c.bench_function("plot/generate", |b| {
        b.iter(|| MiningPlot::new(ACCOUNT, 1234));
    });
}

fn bench_deadline_search(c: &mut Criterion) {
    let search = search();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("deadline/search");
    group.sample_size(10);
    group.throughput(Throughput::Elements(32));

    group.bench_function("sequential", |b| {
        b.iter(|| search.best_in_range(0..32));
    });

    for workers in [2usize, 4, 8] {
        let config = SearchConfig { workers, chunk_size: 4 };
        group.bench_with_input(BenchmarkId::new("parallel", workers), &config, |b, config| {
            b.iter(|| runtime.block_on(search.search_parallel(0..32, config)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plot_generation, bench_deadline_search);
criterion_main!(benches);
