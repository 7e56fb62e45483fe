use arbor::nim::{Pile, Referee};
use arbor::search::{Engine, Limits, Memoized, Options, Ordered, Parallel, Sequential, Strategy};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use std::hint::black_box;

const DEPTH: u32 = 12;

fn bench<S: Strategy<Pile, Referee>>(c: &mut Criterion, name: &str, strategy: S) {
    let options = Options::new(Limits::depth(DEPTH)).with_seed(0);
    let mut engine = Engine::new(strategy, Referee::default(), options).unwrap();

    let mut group = c.benchmark_group("search");
    for counters in [8, 16, 24] {
        group.bench_with_input(BenchmarkId::new(name, counters), &counters, |b, &n| {
            b.iter(|| black_box(block_on(engine.search(Pile::new(n)))))
        });
    }

    group.finish();
}

fn strategies(c: &mut Criterion) {
    bench(c, "sequential", Sequential);
    bench(c, "parallel", Parallel::new(4).unwrap());
    bench(c, "memoized", Memoized::new());
    bench(c, "ordered", Ordered);
}

criterion_group!(benches, strategies);
criterion_main!(benches);
