use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use scorevision::charts::{momentum_series, stat_comparison};
use scorevision::dataset::{BUNDLED_MATCHES, parse_matches_json};
use scorevision::matches::{TimeFilter, filter_by_category, top_scorers};
use scorevision::state::Match;

// Bundled list repeated so filters have something to chew on.
fn large_list(copies: usize) -> Vec<Match> {
    let base = parse_matches_json(BUNDLED_MATCHES).unwrap();
    let mut out = Vec::with_capacity(base.len() * copies);
    for i in 0..copies {
        for m in &base {
            let mut m = m.clone();
            m.id = format!("{}-{i}", m.id);
            out.push(m);
        }
    }
    out
}

fn bench_parse_bundled(c: &mut Criterion) {
    c.bench_function("bundled_parse", |b| {
        b.iter(|| {
            let rows = parse_matches_json(black_box(BUNDLED_MATCHES)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_filters(c: &mut Criterion) {
    let matches = large_list(250);
    c.bench_function("filter_by_category", |b| {
        b.iter(|| {
            for filter in TimeFilter::ALL {
                let rows = filter_by_category(black_box(&matches), filter, "15 Oct");
                black_box(rows.len());
            }
        })
    });
}

fn bench_top_scorers(c: &mut Criterion) {
    let matches = large_list(250);
    c.bench_function("top_scorers", |b| {
        b.iter(|| {
            let top = top_scorers(black_box(&matches), "15 Junio", 5);
            black_box(top.len());
        })
    });
}

fn bench_charts(c: &mut Criterion) {
    c.bench_function("momentum_and_stats", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(momentum_series(black_box(seed)));
            black_box(stat_comparison(black_box(seed)));
        })
    });
}

criterion_group!(
    perf,
    bench_parse_bundled,
    bench_filters,
    bench_top_scorers,
    bench_charts
);
criterion_main!(perf);
