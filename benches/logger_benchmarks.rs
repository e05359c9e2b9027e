//! Criterion benchmarks for rust_decorated_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decorated_logger::prelude::*;
use std::sync::Arc;
use std::thread;

/// Sink that discards everything, so benchmarks measure the logger
struct NullSink;

impl Sink for NullSink {
    fn write_block(&mut self, block: &str) -> Result<()> {
        black_box(block);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn null_logger() -> Logger {
    Logger::builder()
        .output(NullSink)
        .error_output(NullSink)
        .build()
}

fn decorated_logger() -> Logger {
    Logger::builder()
        .decorator(DateTimeDecoration::new())
        .decorator(TagDecoration::plain("[BENCH] "))
        .output(NullSink)
        .error_output(NullSink)
        .build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("builder", |b| {
        b.iter(|| black_box(decorated_logger()));
    });

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let plain = null_logger();
    group.bench_function("undecorated", |b| {
        b.iter(|| plain.log(black_box("Benchmark message")).unwrap());
    });

    let decorated = decorated_logger();
    group.bench_function("decorated", |b| {
        b.iter(|| decorated.log(black_box("Benchmark message")).unwrap());
    });

    let formatted = null_logger();
    group.bench_function("runtime_template", |b| {
        b.iter(|| {
            formatted
                .log_fmt("user {} did {}", &[&42, &"login"])
                .unwrap()
        });
    });

    group.finish();
}

fn bench_multiline(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiline");
    let logger = decorated_logger();

    for lines in [1usize, 4, 16] {
        let message = vec!["line of output"; lines].join("\n");
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &message, |b, message| {
            b.iter(|| logger.log(black_box(message)).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Caller Annotation Benchmarks
// ============================================================================

fn bench_caller_annotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("caller_annotation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("resolve", |b| {
        b.iter(|| black_box(CallerLocation::resolve(0).unwrap()));
    });

    let full = null_logger();
    full.debug(true);
    group.bench_function("log_full", |b| {
        b.iter(|| full.log(black_box("located")).unwrap());
    });

    let short = null_logger();
    short.debug(true).debug_short(true);
    group.bench_function("log_short", |b| {
        b.iter(|| short.log(black_box("located")).unwrap());
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = decorated_logger();
    logger.debug(true).set_min_level(LogLevel::Error);

    group.bench_function("filtered_out", |b| {
        b.iter(|| logger.log(black_box("never written")).unwrap());
    });

    group.finish();
}

// ============================================================================
// Concurrency Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let logger = Arc::new(decorated_logger());
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for _ in 0..100 {
                                logger.log("concurrent\nmessage").unwrap();
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_emission,
    bench_multiline,
    bench_caller_annotation,
    bench_level_filtering,
    bench_concurrent_logging,
);
criterion_main!(benches);
