use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use taskpool::Semaphore;

#[test]
fn wait_returns_immediately_with_positive_count() {
    let sem = Semaphore::new(2);
    sem.wait();
    sem.wait();
}

#[test]
fn notify_before_wait_is_not_lost() {
    let sem = Semaphore::new(0);
    sem.notify();
    // The count was incremented with no waiter; this must not block.
    sem.wait();
}

#[test]
fn wait_blocks_until_notified() {
    let sem = Arc::new(Semaphore::new(0));
    let woke = Arc::new(AtomicBool::new(false));

    let handle = thread::spawn({
        let sem = Arc::clone(&sem);
        let woke = Arc::clone(&woke);
        move || {
            sem.wait();
            woke.store(true, Ordering::SeqCst);
        }
    });

    // The waiter must still be blocked, not spinning through `wait`.
    thread::sleep(Duration::from_millis(100));
    assert!(!woke.load(Ordering::SeqCst));

    sem.notify();
    handle.join().unwrap();
    assert!(woke.load(Ordering::SeqCst));
}

#[test]
fn concurrent_notify_and_wait_all_complete() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 1000;

    let sem = Semaphore::new(0);
    let completed = AtomicUsize::new(0);

    crossbeam_utils::thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|_| {
                for _ in 0..ROUNDS {
                    sem.notify();
                }
            });
            s.spawn(|_| {
                for _ in 0..ROUNDS {
                    sem.wait();
                    completed.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    })
    .unwrap();

    // Every wait was matched by a notify; none deadlocked, none was lost.
    assert_eq!(completed.load(Ordering::SeqCst), THREADS * ROUNDS);

    // Equal notify/wait counts leave the count at zero, so one more
    // notify/wait pair must pass straight through.
    sem.notify();
    sem.wait();
}
