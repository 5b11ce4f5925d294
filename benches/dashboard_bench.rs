//! Benchmarks for the chicken sales dashboard
//!
//! Run with: cargo bench

use chicken_sales::chart::{ChartKind, RendererKind};
use chicken_sales::dashboard::{html::render_page, Dashboard};
use chicken_sales::locale::Locale;
use chicken_sales::sales::{chicken_sales_2024, from_csv_reader, growth_rates, summarize};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const CSV: &str = "month,units_sold
1,450
2,520
3,480
4,650
5,720
6,800
7,950
8,890
9,720
10,580
11,650
12,850
";

fn bench_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculations");
    let series = chicken_sales_2024();

    group.throughput(Throughput::Elements(series.len() as u64));

    group.bench_function("summarize", |b| {
        b.iter(|| summarize(black_box(series.records())).unwrap())
    });

    group.bench_function("growth_rates", |b| {
        b.iter(|| growth_rates(black_box(series.records())))
    });

    group.bench_function("parse_csv", |b| {
        b.iter(|| from_csv_reader(black_box(CSV.as_bytes())).unwrap())
    });

    group.finish();
}

fn bench_charts(c: &mut Criterion) {
    let mut group = c.benchmark_group("charts");
    let series = chicken_sales_2024();

    for renderer in [RendererKind::Svg, RendererKind::Plotly] {
        let dashboard = Dashboard::new(renderer.build(), Locale::Ko);

        for kind in ChartKind::all() {
            group.bench_function(format!("{}_{}", renderer, kind), |b| {
                b.iter(|| dashboard.chart(black_box(&series), *kind).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");
    let series = chicken_sales_2024();

    for renderer in [RendererKind::Svg, RendererKind::Plotly] {
        let dashboard = Dashboard::new(renderer.build(), Locale::Ko);

        group.bench_function(format!("render_view_{}", renderer), |b| {
            b.iter(|| dashboard.render(black_box(&series), ChartKind::Combo).unwrap())
        });

        let view = dashboard.render(&series, ChartKind::Combo).unwrap();

        group.bench_function(format!("render_page_{}", renderer), |b| {
            b.iter(|| render_page(black_box(&view)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calculations, bench_charts, bench_dashboard);
criterion_main!(benches);
