use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use slirc_state::{Config, RecordingSink, Tracker};
use std::hint::black_box;
use std::sync::Arc;

// Join/part churn on a busy channel, the hot path for any connected client.

fn populated(members: usize) -> Tracker {
    let mut t = Tracker::with_sink(&Config::for_nick("me"), Arc::new(RecordingSink::new()));
    let me = t.me();
    let chan = t.create_channel("#busy");
    t.join_channel(chan, me).unwrap();
    for i in 0..members {
        let n = t.create_nick(&format!("user{i}"), "u", "", "host");
        t.join_channel(chan, n).unwrap();
    }
    t
}

fn churn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    group.throughput(Throughput::Elements(1));

    group.bench_function("join_part", |b| {
        let mut t = populated(500);
        let chan = t.find_channel("#busy").unwrap();
        b.iter(|| {
            let n = t.create_nick("visitor", "v", "", "host");
            t.join_channel(chan, n).unwrap();
            t.leave_channel(chan, black_box(n)).unwrap();
        })
    });

    group.bench_function("rename", |b| {
        let mut t = populated(500);
        let id = t.find_nick("user42").unwrap();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            t.rename_nick(id, if flip { "renamed" } else { "user42" }).unwrap();
        })
    });

    group.finish();
}

fn teardown_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("teardown");
    group.throughput(Throughput::Elements(500));

    group.bench_function("self_part_500", |b| {
        b.iter_batched(
            || populated(500),
            |mut t| {
                let chan = t.find_channel("#busy").unwrap();
                let me = t.me();
                t.leave_channel(chan, me).unwrap();
                t
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, churn_benchmark, teardown_benchmark);
criterion_main!(benches);
