//! Concurrent counter behavior.
//!
//! Counters are single atomic cells, so increments from any number of
//! threads must sum exactly and reads must never observe a regression.
//! Each test uses its own names; tests in this binary run in parallel.

use std::thread;
use std::time::Duration;

use minprof::{Counter, counter, event, timed, timer};

#[test]
fn test_concurrent_events_sum_exactly() {
    const THREADS: usize = 8;
    const INCREMENTS_PER_THREAD: u64 = 1_000_000;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..INCREMENTS_PER_THREAD {
                    event!("hot");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("incrementer thread panicked");
    }

    assert_eq!(
        counter!("hot").value(),
        THREADS as u64 * INCREMENTS_PER_THREAD
    );
}

#[test]
fn test_concurrent_adds_sum_exactly() {
    const THREADS: usize = 4;
    const ADDS_PER_THREAD: u64 = 100_000;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..ADDS_PER_THREAD {
                    counter!("bulk").add(3);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("adder thread panicked");
    }

    assert_eq!(
        counter!("bulk").value(),
        THREADS as u64 * ADDS_PER_THREAD * 3
    );
}

#[test]
fn test_reads_never_regress_under_writes() {
    const TARGET: u64 = 200_000;

    let writer = thread::spawn(|| {
        for _ in 0..TARGET {
            counter!("mono").increment();
        }
    });

    let mut prev = 0;
    while prev < TARGET {
        let now = counter!("mono").value();
        assert!(now >= prev, "counter regressed from {prev} to {now}");
        prev = now;
        std::hint::spin_loop();
    }
    writer.join().expect("writer thread panicked");

    assert_eq!(counter!("mono").value(), TARGET);
}

#[test]
fn test_name_resolves_to_one_cell_across_threads() {
    // Two distinct call sites, resolved on two different threads, still
    // canonicalize onto one cell.
    let first = thread::spawn(|| counter!("same-cell") as *const Counter as usize)
        .join()
        .expect("resolver thread panicked");
    let second = thread::spawn(|| counter!("same-cell") as *const Counter as usize)
        .join()
        .expect("resolver thread panicked");

    assert_eq!(first, second);
}

#[test]
fn test_threads_share_one_named_timer() {
    const THREADS: usize = 4;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            thread::spawn(|| {
                timed!("busy", {
                    thread::sleep(Duration::from_millis(2));
                });
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("timed thread panicked");
    }

    // Four guard instances, one shared cell: the totals accumulate.
    assert!(timer!("busy").elapsed() >= Duration::from_millis(8));
}
