//! Criterion benchmarks for the search hot paths.
//!
//! - ranking: scoring, filtering and ordering merged candidates
//! - match_kind: per-class prefix/fuzzy classification
//! - local_search: end-to-end lookup against an on-disk index

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use classfinder::search::{
    ClassMatch, IndexBuilder, LocalIndex, LocalSearcher, MatchKind, RankingPolicy, UsageCatalog,
    match_kind,
};
use classfinder::test_utils::fixtures::{UnitTestFixture, artifact};

fn candidates(size: usize) -> (Vec<ClassMatch>, UsageCatalog) {
    let matches = (0..size)
        .map(|i| {
            let kind = if i % 3 == 0 { MatchKind::Fuzzy } else { MatchKind::Prefix };
            ClassMatch::new("g", format!("lib{i}"), "1", format!("p{}.Foo{i}", i % 17), kind)
        })
        .collect();
    let usage = (0..size)
        .map(|i| (format!("g:lib{i}"), (i as u64 * 7919) % 20_000))
        .collect();
    (matches, usage)
}

// =============================================================================
// Ranking Benchmarks
// =============================================================================

fn ranking_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let policy = RankingPolicy::default();

    for size in [10, 100, 1000].iter() {
        let (matches, usage) = candidates(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("candidates", size), &matches, |b, matches| {
            b.iter(|| policy.rank(black_box(matches.clone()), &usage))
        });
    }

    group.finish();
}

// =============================================================================
// Match Classification Benchmarks
// =============================================================================

fn match_kind_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_kind");

    group.bench_function("prefix", |b| {
        b.iter(|| match_kind(black_box("java.util.concurrent.ConcurrentHashMap"), black_box("concurrenth")))
    });
    group.bench_function("fuzzy", |b| {
        b.iter(|| match_kind(black_box("java.util.concurrent.ConcurrentHashMap"), black_box("concurentHashMap")))
    });
    group.bench_function("miss", |b| {
        b.iter(|| match_kind(black_box("org.apache.commons.lang3.StringUtils"), black_box("ArrayList")))
    });

    group.finish();
}

// =============================================================================
// Local Search Benchmarks
// =============================================================================

fn local_search_benchmarks(c: &mut Criterion) {
    let fixture = UnitTestFixture::new();
    let path = fixture.data_path.join("index");
    let mut builder = IndexBuilder::create(&path).unwrap();
    for i in 0..2000 {
        let classes: Vec<String> = (0..20).map(|j| format!("p{i}.Type{i}x{j}")).collect();
        let classes: Vec<&str> = classes.iter().map(String::as_str).collect();
        builder.add(&artifact("g", &format!("lib{i}"), "1", &classes)).unwrap();
    }
    builder
        .add(&artifact("java", "rt", "8", &["java.util.ArrayList", "java.util.HashMap"]))
        .unwrap();
    builder.finish().unwrap();

    let index = Arc::new(LocalIndex::new(&path));
    assert!(index.open());
    let searcher = LocalSearcher::new(index, 1000);

    let mut group = c.benchmark_group("local_search");
    group.bench_function("exact", |b| b.iter(|| searcher.search_local(black_box("arraylist"))));
    group.bench_function("broad_prefix", |b| b.iter(|| searcher.search_local(black_box("type1"))));
    group.finish();
}

criterion_group!(
    benches,
    ranking_benchmarks,
    match_kind_benchmarks,
    local_search_benchmarks,
);

criterion_main!(benches);
