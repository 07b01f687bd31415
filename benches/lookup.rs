use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gazetteer::{
    build, LookupService, MatchConfig, Matcher, NormalizeConfig, Record, Snapshot,
};
use serde_json::Value as JsonValue;

const ADJECTIVES: &[&str] = &[
    "crysteel", "carbide", "bronze", "folded", "vibro", "flawless", "rusted", "chrome",
];
const NOUNS: &[&str] = &[
    "longsword", "dagger", "battle axe", "pyramid", "waterskin", "injector", "carbine", "idol",
];

fn synthetic_snapshot(count: usize) -> Snapshot {
    let records = (0..count)
        .map(|i| {
            let adjective = ADJECTIVES[i % ADJECTIVES.len()];
            let noun = NOUNS[(i / ADJECTIVES.len()) % NOUNS.len()];
            Record {
                id: format!("obj-{i}"),
                name: format!("{adjective} {noun} mk{i}"),
                aliases: vec![format!("{adjective} {noun}")],
                payload: JsonValue::Null,
            }
        })
        .collect();
    Snapshot::new(records)
}

fn bench_resolve(c: &mut Criterion) {
    let snapshot = synthetic_snapshot(512);
    let index = build(&snapshot, &NormalizeConfig::default()).unwrap();
    let matcher = Matcher::new(MatchConfig::default()).unwrap();

    c.bench_function("resolve_fuzzy_512", |b| {
        b.iter(|| matcher.resolve(black_box("crystee longsord"), &index))
    });

    c.bench_function("resolve_exact_512", |b| {
        b.iter(|| matcher.resolve(black_box("crysteel longsword mk0"), &index))
    });
}

fn bench_cached_query(c: &mut Criterion) {
    let service = LookupService::with_snapshot(synthetic_snapshot(512)).unwrap();
    // Warm the cache so the loop measures the hit path.
    service.query("crystee longsord").unwrap();

    c.bench_function("service_query_cached_512", |b| {
        b.iter(|| service.query(black_box("crystee longsord")).unwrap())
    });
}

fn bench_build(c: &mut Criterion) {
    let snapshot = synthetic_snapshot(512);
    let cfg = NormalizeConfig::default();

    c.bench_function("index_build_512", |b| {
        b.iter(|| build(black_box(&snapshot), &cfg).unwrap())
    });
}

criterion_group!(benches, bench_resolve, bench_cached_query, bench_build);
criterion_main!(benches);
