//! # Bounded Ring
//!
//! A fixed-capacity ring buffer shared between concurrent producer and
//! consumer threads.
//!
//! ## Architecture Overview
//!
//! The crate is structured into small modules:
//!
//! - `buffer`: The slot array and its thread-safe wrapper
//! - `config`: Construction settings (capacity, wake policy)
//! - `error`: Error types
//!
//! ## Access Modes
//!
//! | Operation       | When full / empty             | Fails?              |
//! |-----------------|-------------------------------|---------------------|
//! | `put_overwrite` | discards the oldest element   | never               |
//! | `put_blocking`  | waits for a free slot         | never               |
//! | `get_or_fail`   | returns immediately           | `EmptyBuffer`       |
//! | `get_blocking`  | waits for an element          | never               |
//!
//! ```
//! use bounded_ring::{RingBufferError, SharedRingBuffer};
//!
//! let buffer = SharedRingBuffer::new(3);
//! for i in 0..5 {
//!     buffer.put_overwrite(i);
//! }
//! assert_eq!(buffer.get_or_fail().unwrap(), 2);
//! assert_eq!(buffer.get_or_fail().unwrap(), 3);
//! assert_eq!(buffer.get_or_fail().unwrap(), 4);
//! assert!(matches!(buffer.get_or_fail(), Err(RingBufferError::EmptyBuffer)));
//! ```

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod buffer;
pub mod config;
pub mod error;

// ============================================
// RE-EXPORTS
// ============================================

pub use buffer::{BufferStats, RingBuffer, SharedRingBuffer};
pub use config::{BufferConfig, ConfigError, WakePolicy, DEFAULT_CAPACITY};
pub use error::{RingBufferError, RingBufferResult};

// ============================================
// LOGGING
// ============================================

/// Initialize logging for the process.
///
/// Installs `env_logger` at `Info`, overridable through `RUST_LOG`.
/// Calling it more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

// ============================================
// TESTS
// ============================================
