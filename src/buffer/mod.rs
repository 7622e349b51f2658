//! # Shared Buffer Module
//!
//! This module provides the circular (ring) buffer shared between
//! producer and consumer threads.
//!
//! ## Plain English Explanation
//!
//! Imagine a circular conveyor belt with a fixed number of spots.
//! Producers put items on the belt, consumers take them off in the order
//! they were put on. When the belt is full a producer can either:
//! 1. Knock the oldest item off the belt and put theirs on (`put_overwrite`)
//! 2. Wait until a consumer takes something (`put_blocking`)
//!
//! When the belt is empty a consumer can either:
//! 1. Walk away empty-handed with an error (`get_or_fail`)
//! 2. Wait until a producer puts something on (`get_blocking`)

mod ring_buffer;

pub use ring_buffer::RingBuffer;

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};
use parking_lot::{Condvar, Mutex};

use crate::config::{BufferConfig, WakePolicy, DEFAULT_CAPACITY};
use crate::error::{RingBufferError, RingBufferResult};

// ============================================
// SHARED RING BUFFER
// Thread-safe wrapper for our ring buffer
// ============================================

/// A thread-safe ring buffer that can be shared across threads.
///
/// Share it by wrapping it in an `Arc` and handing a clone to each worker.
///
/// ## Locking
///
/// One mutex guards the slot array and its indices as a unit. Two
/// condition variables carry the wakeups:
/// - `not_empty`: an element became available
/// - `not_full`: a slot became free
///
/// Waits re-check their condition in a loop, and notifications are sent
/// after the lock is released.
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use bounded_ring::SharedRingBuffer;
///
/// let buffer = Arc::new(SharedRingBuffer::new(4));
/// let producer = {
///     let buffer = Arc::clone(&buffer);
///     thread::spawn(move || {
///         for i in 0..10 {
///             buffer.put_blocking(i);
///         }
///     })
/// };
///
/// let received: Vec<i32> = (0..10).map(|_| buffer.get_blocking()).collect();
/// producer.join().unwrap();
/// assert_eq!(received, (0..10).collect::<Vec<_>>());
/// ```
pub struct SharedRingBuffer<T> {
    /// The slot array, front/back indices and full flag
    state: Mutex<RingBuffer<T>>,

    /// Signaled when an element becomes available
    not_empty: Condvar,

    /// Signaled when a slot becomes free
    not_full: Condvar,

    /// Whether non-blocking operations notify waiters too
    wake_policy: WakePolicy,

    /// Fixed at construction, readable without the lock
    capacity: usize,

    counters: Counters,
}

/// Operation counters for a [`SharedRingBuffer`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferStats {
    /// Elements written by either put operation
    pub writes: u64,
    /// Elements handed out by either get operation
    pub reads: u64,
    /// Unread elements discarded by `put_overwrite`
    pub overwritten: u64,
    /// `get_or_fail` calls that found the buffer empty
    pub empty_reads: u64,
}

#[derive(Default)]
struct Counters {
    writes: AtomicU64,
    reads: AtomicU64,
    overwritten: AtomicU64,
    empty_reads: AtomicU64,
}

impl<T> SharedRingBuffer<T> {
    /// Creates a buffer with `capacity` slots and the default wake policy.
    ///
    /// ## Panics
    /// Panics if `capacity` is zero. Use [`SharedRingBuffer::with_config`]
    /// to get an error instead.
    pub fn new(capacity: usize) -> Self {
        Self::build(RingBuffer::new(capacity), WakePolicy::default())
    }

    /// Creates a buffer from validated settings.
    ///
    /// ## Returns
    /// The buffer, or the first problem [`BufferConfig::validate`] reports
    pub fn with_config(config: BufferConfig) -> RingBufferResult<Self> {
        if let Some(err) = config.validate().into_iter().next() {
            return Err(RingBufferError::Config(err));
        }

        Ok(Self::build(RingBuffer::new(config.capacity), config.wake_policy))
    }

    fn build(slots: RingBuffer<T>, wake_policy: WakePolicy) -> Self {
        let capacity = slots.capacity();
        debug!(
            "Creating ring buffer: {} slots, wake policy {:?}",
            capacity, wake_policy
        );

        Self {
            state: Mutex::new(slots),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            wake_policy,
            capacity,
            counters: Counters::default(),
        }
    }

    /// Writes an element, discarding the oldest unread one if the buffer
    /// is full.
    ///
    /// ## What Happens (Plain English)
    ///
    /// 1. Lock the buffer
    /// 2. Put the item in the next slot, even if that slot still holds
    ///    something nobody has read
    /// 3. Unlock
    ///
    /// Never blocks and never fails. Losing the oldest element is not
    /// reported to the caller. Under [`WakePolicy::BlockingOnly`] this does
    /// not wake threads parked in [`get_blocking`](Self::get_blocking).
    pub fn put_overwrite(&self, item: T) {
        let discarded = {
            let mut state = self.state.lock();
            state.push_overwrite(item)
        };

        self.counters.writes.fetch_add(1, Ordering::Relaxed);
        if discarded.is_some() {
            self.counters.overwritten.fetch_add(1, Ordering::Relaxed);
            trace!("put_overwrite discarded the oldest unread element");
        } else {
            trace!("put_overwrite");
        }

        if self.wake_policy.wakes_on_non_blocking() {
            self.not_empty.notify_one();
        }
    }

    /// Writes an element, waiting while the buffer is full.
    ///
    /// Never overwrites unread data. Wakes one thread parked in
    /// [`get_blocking`](Self::get_blocking).
    pub fn put_blocking(&self, item: T) {
        let mut state = self.state.lock();
        while state.is_full() {
            self.not_full.wait(&mut state);
        }

        let discarded = state.push_overwrite(item);
        debug_assert!(discarded.is_none());
        drop(state);

        self.counters.writes.fetch_add(1, Ordering::Relaxed);
        trace!("put_blocking");
        self.not_empty.notify_one();
    }

    /// Reads the oldest unread element without waiting.
    ///
    /// ## Returns
    /// The element, or [`RingBufferError::EmptyBuffer`] if there is none
    ///
    /// Under [`WakePolicy::BlockingOnly`] this does not wake threads parked
    /// in [`put_blocking`](Self::put_blocking).
    pub fn get_or_fail(&self) -> RingBufferResult<T> {
        let item = self.state.lock().pop();

        match item {
            Some(item) => {
                self.counters.reads.fetch_add(1, Ordering::Relaxed);
                trace!("get_or_fail");
                if self.wake_policy.wakes_on_non_blocking() {
                    self.not_full.notify_one();
                }
                Ok(item)
            }
            None => {
                self.counters.empty_reads.fetch_add(1, Ordering::Relaxed);
                trace!("get_or_fail on empty buffer");
                Err(RingBufferError::EmptyBuffer)
            }
        }
    }

    /// Reads the oldest unread element, waiting while the buffer is empty.
    ///
    /// There is no timeout. Wakes one thread parked in
    /// [`put_blocking`](Self::put_blocking).
    pub fn get_blocking(&self) -> T {
        let mut state = self.state.lock();
        let item = loop {
            if let Some(item) = state.pop() {
                break item;
            }
            self.not_empty.wait(&mut state);
        };
        drop(state);

        self.counters.reads.fetch_add(1, Ordering::Relaxed);
        trace!("get_blocking");
        self.not_full.notify_one();
        item
    }

    /// Returns the fixed number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of unread elements right now.
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    /// Returns true if there is nothing to read right now.
    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Returns true if every slot holds an unread element right now.
    pub fn is_full(&self) -> bool {
        self.state.lock().is_full()
    }

    /// Returns the wake policy chosen at construction.
    pub fn wake_policy(&self) -> WakePolicy {
        self.wake_policy
    }

    /// Returns a copy of the operation counters.
    pub fn stats(&self) -> BufferStats {
        BufferStats {
            writes: self.counters.writes.load(Ordering::Relaxed),
            reads: self.counters.reads.load(Ordering::Relaxed),
            overwritten: self.counters.overwritten.load(Ordering::Relaxed),
            empty_reads: self.counters.empty_reads.load(Ordering::Relaxed),
        }
    }
}

impl<T: Clone> SharedRingBuffer<T> {
    /// Copies out all unread elements, oldest first.
    ///
    /// The buffer is NOT modified.
    pub fn snapshot(&self) -> Vec<T> {
        self.state.lock().iter().cloned().collect()
    }
}

impl<T> Default for SharedRingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    const WAKE_TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_buffer_creation() {
        let buffer: SharedRingBuffer<u32> = SharedRingBuffer::default();
        assert_eq!(buffer.capacity(), 10);
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.wake_policy(), WakePolicy::BlockingOnly);
    }

    #[test]
    fn test_with_config_rejects_zero_capacity() {
        let result = SharedRingBuffer::<u8>::with_config(BufferConfig::with_capacity(0));
        assert!(matches!(
            result,
            Err(RingBufferError::Config(crate::config::ConfigError::ZeroCapacity))
        ));
    }

    #[test]
    fn test_empty_read_fails() {
        for capacity in [1, 2, 10] {
            let buffer = SharedRingBuffer::<i32>::new(capacity);
            assert!(buffer.get_or_fail().unwrap_err().is_empty_buffer());
        }
    }

    #[test]
    fn test_overwrite_keeps_newest() {
        let buffer = SharedRingBuffer::new(3);
        for i in 0..5 {
            buffer.put_overwrite(i);
        }

        assert!(buffer.is_full());
        assert_eq!(buffer.snapshot(), vec![2, 3, 4]);
        assert_eq!(buffer.get_or_fail().unwrap(), 2);
        assert_eq!(buffer.get_or_fail().unwrap(), 3);
        assert_eq!(buffer.get_or_fail().unwrap(), 4);
        assert!(matches!(
            buffer.get_or_fail(),
            Err(RingBufferError::EmptyBuffer)
        ));

        let stats = buffer.stats();
        assert_eq!(stats.writes, 5);
        assert_eq!(stats.reads, 3);
        assert_eq!(stats.overwritten, 2);
        assert_eq!(stats.empty_reads, 1);
    }

    #[test]
    fn test_mixed_modes_stay_fifo() {
        let buffer = SharedRingBuffer::new(4);

        buffer.put_blocking(1);
        buffer.put_overwrite(2);
        buffer.put_blocking(3);
        assert_eq!(buffer.get_blocking(), 1);
        assert_eq!(buffer.get_or_fail().unwrap(), 2);

        buffer.put_overwrite(4);
        buffer.put_blocking(5);
        buffer.put_overwrite(6);
        assert!(buffer.is_full());

        let drained: Vec<_> = std::iter::from_fn(|| buffer.get_or_fail().ok()).collect();
        assert_eq!(drained, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_capacity_bound_blocks_writer() {
        let buffer = Arc::new(SharedRingBuffer::new(2));
        buffer.put_blocking(1);
        buffer.put_blocking(2);
        assert!(buffer.is_full());

        let done = Arc::new(AtomicBool::new(false));
        let writer = {
            let buffer = Arc::clone(&buffer);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                buffer.put_blocking(3);
                done.store(true, Ordering::SeqCst);
            })
        };

        // Give the writer time to park on the full buffer
        thread::sleep(Duration::from_millis(50));
        assert!(!done.load(Ordering::SeqCst));
        assert_eq!(buffer.len(), 2);

        assert_eq!(buffer.get_blocking(), 1);
        writer.join().unwrap();
        assert!(done.load(Ordering::SeqCst));

        assert_eq!(buffer.get_blocking(), 2);
        assert_eq!(buffer.get_blocking(), 3);
    }

    #[test]
    fn test_blocking_read_wakes_on_blocking_write() {
        let buffer = Arc::new(SharedRingBuffer::new(3));
        let (tx, rx) = mpsc::channel();

        let reader = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || tx.send(buffer.get_blocking()).unwrap())
        };

        thread::sleep(Duration::from_millis(20));
        buffer.put_blocking(42);

        assert_eq!(rx.recv_timeout(WAKE_TIMEOUT).unwrap(), 42);
        reader.join().unwrap();
    }

    #[test]
    fn test_blocking_only_ignores_overwrite_for_wakeups() {
        let buffer = Arc::new(SharedRingBuffer::new(3));
        let (started_tx, started_rx) = mpsc::channel();
        let (tx, rx) = mpsc::channel();

        let reader = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                started_tx.send(()).unwrap();
                tx.send(buffer.get_blocking()).unwrap();
            })
        };

        // Wait for the reader to start, then give it time to park
        started_rx.recv_timeout(WAKE_TIMEOUT).unwrap();
        thread::sleep(Duration::from_millis(100));
        buffer.put_overwrite(7);

        // The parked reader is not told about the overwrite write
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(buffer.len(), 1);

        // A blocking write wakes it and it reads the oldest element
        buffer.put_blocking(8);
        assert_eq!(rx.recv_timeout(WAKE_TIMEOUT).unwrap(), 7);
        reader.join().unwrap();
        assert_eq!(buffer.get_or_fail().unwrap(), 8);
    }

    #[test]
    fn test_blocking_only_ignores_failing_read_for_wakeups() {
        let buffer = Arc::new(SharedRingBuffer::new(1));
        buffer.put_blocking(1);

        let (started_tx, started_rx) = mpsc::channel();
        let (tx, rx) = mpsc::channel();
        let writer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                started_tx.send(()).unwrap();
                buffer.put_blocking(2);
                tx.send(()).unwrap();
            })
        };

        // Wait for the writer to start, then give it time to park
        started_rx.recv_timeout(WAKE_TIMEOUT).unwrap();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(buffer.get_or_fail().unwrap(), 1);

        // The parked writer is not told about the freed slot
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert!(buffer.is_empty());

        // Refill the slot, then a blocking read frees it and wakes the writer
        buffer.put_blocking(3);
        assert_eq!(buffer.get_blocking(), 3);
        rx.recv_timeout(WAKE_TIMEOUT).unwrap();
        writer.join().unwrap();
        assert_eq!(buffer.get_or_fail().unwrap(), 2);
    }

    #[test]
    fn test_always_policy_wakes_reader_on_overwrite() {
        let config = BufferConfig::with_capacity(3).wake_policy(WakePolicy::Always);
        let buffer = Arc::new(SharedRingBuffer::with_config(config).unwrap());
        let (tx, rx) = mpsc::channel();

        let reader = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || tx.send(buffer.get_blocking()).unwrap())
        };

        thread::sleep(Duration::from_millis(20));
        buffer.put_overwrite(9);

        assert_eq!(rx.recv_timeout(WAKE_TIMEOUT).unwrap(), 9);
        reader.join().unwrap();
    }

    #[test]
    fn test_always_policy_wakes_writer_on_failing_read() {
        let config = BufferConfig {
            capacity: 1,
            wake_policy: WakePolicy::Always,
        };
        let buffer = Arc::new(SharedRingBuffer::with_config(config).unwrap());
        buffer.put_blocking(1);

        let (tx, rx) = mpsc::channel();
        let writer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                buffer.put_blocking(2);
                tx.send(()).unwrap();
            })
        };

        thread::sleep(Duration::from_millis(20));
        assert_eq!(buffer.get_or_fail().unwrap(), 1);

        rx.recv_timeout(WAKE_TIMEOUT).unwrap();
        writer.join().unwrap();
        assert_eq!(buffer.get_or_fail().unwrap(), 2);
    }

    #[test]
    fn test_buffer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedRingBuffer<i32>>();
        assert_send_sync::<SharedRingBuffer<String>>();
    }
}
