#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::load_series;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use quantedge_engine::{
    IndicatorConfig, PriceSource, StdDev, bollinger, cci, compute, ema, rsi, sma, stochastic,
};
use std::{hint::black_box, num::NonZero, time::Duration};

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).expect("non zero value")
}

fn engine_benchmarks(c: &mut Criterion) {
    let series = load_series();
    let mut group = c.benchmark_group("compute");
    group.throughput(Throughput::Elements(series.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    let defaults = IndicatorConfig::default();
    group.bench_function("defaults", |b| {
        b.iter(|| black_box(compute(black_box(&series), &defaults)));
    });

    let dashboard = IndicatorConfig::from_toml_str(
        "sma_overlays = [5, 10, 50, 100, 200]\nema_overlays = [26, 50]",
    )
    .expect("valid config");
    group.bench_function("dashboard_overlays", |b| {
        b.iter(|| black_box(compute(black_box(&series), &dashboard)));
    });

    group.finish();
}

fn indicator_benchmarks(c: &mut Criterion) {
    let series = load_series();
    let mut group = c.benchmark_group("indicator");
    group.throughput(Throughput::Elements(series.len() as u64));
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(5));

    macro_rules! indicator_bench {
        ($name:expr, $call:expr) => {
            group.bench_function($name, |b| {
                b.iter(|| black_box($call));
            });
        };
    }

    indicator_bench!("sma20", sma(&series, PriceSource::Close, nz(20)));
    indicator_bench!("sma200", sma(&series, PriceSource::Close, nz(200)));
    indicator_bench!("ema20", ema(&series, PriceSource::Close, nz(20)));
    indicator_bench!("rsi14", rsi(&series, nz(14)));
    indicator_bench!("bb20", bollinger(&series, nz(20), StdDev::default()));
    indicator_bench!("stoch14", stochastic(&series, nz(14), nz(3)));
    indicator_bench!("cci20", cci(&series, nz(20)));

    group.finish();
}

criterion_group!(benches, engine_benchmarks, indicator_benchmarks);
criterion_main!(benches);
