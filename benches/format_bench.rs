//! Benchmarks for page formatting and chart spec building
//!
//! Run with: cargo bench

use bankdash::charts::*;
use bankdash::config::DashboardConfig;
use bankdash::format::{format_currency, format_currency_text};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_test_dataset(count: usize) -> ChartDataset {
    ChartDataset::from_pairs((0..count).map(|i| (format!("{:06}", i), i as f64 * 1234.56)))
}

fn bench_currency(c: &mut Criterion) {
    let mut group = c.benchmark_group("currency");

    group.bench_function("format_small", |b| {
        b.iter(|| format_currency(black_box(12.5)))
    });

    group.bench_function("format_large", |b| {
        b.iter(|| format_currency(black_box(1_234_567_890.12)))
    });

    let texts: Vec<String> = (0..1000).map(|i| format!("{}.{}", i * 997, i % 100)).collect();
    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("page_of_displays", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(format_currency_text(black_box(text), "£"));
            }
        })
    });

    group.finish();
}

fn bench_spec(c: &mut Criterion) {
    let mut group = c.benchmark_group("spec");
    let config = DashboardConfig::default();
    let style = ChartStyle {
        palette: &config.palette,
        currency_symbol: &config.currency_symbol,
    };

    for size in [8, 100, 1000] {
        let dataset = create_test_dataset(size);

        group.throughput(Throughput::Elements(size as u64));

        for slot in [ChartSlot::Owner, ChartSlot::Institution] {
            group.bench_function(format!("build_{}_{}", slot, size), |b| {
                b.iter(|| ChartSpec::build(slot, black_box(&dataset), style, &OwnerCodeMap))
            });
        }

        let spec = ChartSpec::build(ChartSlot::AccountType, &dataset, style, &OwnerCodeMap);
        group.bench_function(format!("to_json_{}", size), |b| {
            b.iter(|| black_box(&spec).to_json().unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_currency, bench_spec);
criterion_main!(benches);
