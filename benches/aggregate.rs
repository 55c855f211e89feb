//! Benchmarks for chatstats loading and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench aggregate -- aggregate`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatstats::core::aggregate::{aggregate, phrase_frequencies, top_words};
use chatstats::core::filter::ViewFilter;
use chatstats::core::output::to_csv;
use chatstats::config::StatsConfig;
use chatstats::parser::ChatCsvParser;
use chatstats::parsing::date;

const WEEKDAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_csv(count: usize) -> String {
    let mut out = String::from("datetime,date,time,hour,weekday,sender,message\n");
    for i in 0..count {
        let sender = if i % 3 == 0 { "Alice" } else { "Bob" };
        let day = (i / 200) % 28 + 1;
        let month = (i / 5600) % 12 + 1;
        let hour = i % 24;
        let minute = i % 60;
        out.push_str(&format!(
            "x,{day}/{month}/2023,{hour:02}:{minute:02},{hour},{},{sender},\"see you at the station, message number {i}\"\n",
            WEEKDAYS[i % 7]
        ));
    }
    out
}

// =============================================================================
// Loading Benchmarks
// =============================================================================

fn bench_date_resolve(c: &mut Criterion) {
    c.bench_function("date_resolve", |b| {
        b.iter(|| {
            black_box(date::resolve(black_box("20/05/2023"), black_box("14:30")));
            black_box(date::resolve(black_box("1-1-23"), black_box("")));
        });
    });
}

fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");
    let parser = ChatCsvParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let csv = generate_csv(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &csv, |b, csv| {
            b.iter(|| {
                let messages = parser.parse_str(black_box(csv)).unwrap();
                black_box(messages)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Aggregation Benchmarks
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let parser = ChatCsvParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let messages = parser.parse_str(&generate_csv(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(aggregate(black_box(messages))));
        });
    }
    group.finish();
}

fn bench_word_and_phrase_frequency(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency");
    let config = StatsConfig::default();
    let messages = ChatCsvParser::new().parse_str(&generate_csv(10_000)).unwrap();

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("top_words", |b| {
        b.iter(|| black_box(top_words(black_box(&messages), &config)));
    });
    group.bench_function("phrase_frequencies", |b| {
        b.iter(|| black_box(phrase_frequencies(black_box(&messages), &config)));
    });
    group.finish();
}

// =============================================================================
// View Benchmarks
// =============================================================================

fn bench_search_and_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");
    let messages = ChatCsvParser::new().parse_str(&generate_csv(10_000)).unwrap();
    let filter = ViewFilter::new().with_search("NUMBER 99");

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("search", |b| {
        b.iter(|| black_box(filter.apply(black_box(&messages))));
    });
    group.bench_function("to_csv", |b| {
        let view: Vec<_> = messages.iter().collect();
        b.iter(|| black_box(to_csv(black_box(&view)).unwrap()));
    });
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_date_resolve,
    bench_parse_csv,
    bench_aggregate,
    bench_word_and_phrase_frequency,
    bench_search_and_export,
);

criterion_main!(benches);
