//! Stress tests for concurrent emission
//!
//! These tests verify:
//! - Multi-line messages from many threads never interleave
//! - Decorator toggles racing with emission never corrupt output
//! - Metrics stay consistent under concurrent load

use rust_decorated_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 200;

fn shared_logger(output: &MemorySink) -> Arc<Logger> {
    Arc::new(
        Logger::builder()
            .decorator(TagDecoration::plain("| "))
            .output(output.clone())
            .error_output(MemorySink::new())
            .build(),
    )
}

#[test]
fn test_concurrent_multiline_blocks_stay_contiguous() {
    let output = MemorySink::new();
    let logger = shared_logger(&output);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger
                        .log(format!("t{} m{} first\nt{} m{} second", t, i, t, i))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let lines = output.lines();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD * 2);
    for pair in lines.chunks(2) {
        let head = pair[0]
            .strip_suffix(" first")
            .expect("block must start with its first line");
        assert_eq!(pair[1], format!("{} second", head));
    }

    assert_eq!(
        logger.metrics().emissions(),
        (THREADS * MESSAGES_PER_THREAD) as u64
    );
    assert_eq!(output.block_count(), THREADS * MESSAGES_PER_THREAD);
}

#[test]
fn test_toggles_during_emission() {
    let output = MemorySink::new();
    let logger = shared_logger(&output);

    let writers: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.log(format!("{}-{}", t, i)).unwrap();
                }
            })
        })
        .collect();

    let toggler = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..MESSAGES_PER_THREAD {
                if i % 2 == 0 {
                    logger.disable(0).unwrap();
                } else {
                    logger.enable(0).unwrap();
                }
            }
        })
    };

    for handle in writers {
        handle.join().expect("Thread panicked");
    }
    toggler.join().expect("Toggler panicked");

    let lines = output.lines();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);
    for line in &lines {
        let body = line.strip_prefix("| ").unwrap_or(line);
        let (t, i) = body.split_once('-').expect("malformed line");
        assert!(t.parse::<usize>().is_ok(), "bad line: {}", line);
        assert!(i.parse::<usize>().is_ok(), "bad line: {}", line);
    }
}

#[test]
fn test_concurrent_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let logger = Arc::new(
        Logger::builder()
            .decorator(DateTimeDecoration::with_style("", "[", "] ").with_format(TimestampFormat::UnixMillis))
            .output(FileSink::new(&log_file).expect("Failed to create sink"))
            .error_output(MemorySink::new())
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.warn(format!("thread {} message {}", t, i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);
    assert!(lines.iter().all(|line| line.starts_with('[') && line.contains("[WARN] ")));
}
