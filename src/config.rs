//! # Configuration Module
//!
//! Construction settings for the shared ring buffer.
//!
//! ## Plain English Explanation
//!
//! A ring buffer only has two knobs:
//! - How many slots it has (its capacity)
//! - Who gets woken up when something changes (its wake policy)
//!
//! This module defines those settings, their defaults, and the checks
//! that keep them sensible.

use thiserror::Error;

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 10;

/// Largest capacity accepted by [`BufferConfig::validate`].
pub const MAX_CAPACITY: usize = 1 << 24;

// ============================================
// WAKE POLICY
// ============================================

/// Which operations notify waiters blocked on the opposite condition.
///
/// ## Plain English
///
/// Blocked threads sleep until somebody taps them on the shoulder.
/// By default only the blocking operations tap: a `put_blocking` wakes
/// one blocked reader and a `get_blocking` wakes one blocked writer.
/// The non-blocking `put_overwrite` and `get_or_fail` stay quiet, so a
/// reader parked in `get_blocking` does not notice data that arrived
/// through `put_overwrite` until a blocking write comes along.
///
/// `Always` makes every successful write and read tap as well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WakePolicy {
    /// Only `put_blocking` and `get_blocking` notify.
    #[default]
    BlockingOnly,

    /// Every successful write notifies "not-empty" and every successful
    /// read notifies "not-full".
    Always,
}

impl WakePolicy {
    /// Returns true if non-blocking operations should notify too.
    pub fn wakes_on_non_blocking(self) -> bool {
        matches!(self, Self::Always)
    }
}

// ============================================
// MAIN CONFIGURATION
// ============================================

/// All configuration options for a [`SharedRingBuffer`](crate::SharedRingBuffer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Number of slots. Fixed for the buffer's whole life.
    ///
    /// ## Limits
    /// - Minimum: 1
    /// - Maximum: [`MAX_CAPACITY`]
    /// - Default: [`DEFAULT_CAPACITY`]
    pub capacity: usize,

    /// Who gets notified after a write or read.
    pub wake_policy: WakePolicy,
}

impl BufferConfig {
    /// Default settings with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Default capacity, but non-blocking operations wake blocked
    /// threads as well.
    ///
    /// ## When to Use
    /// When producers use `put_overwrite` while consumers park in
    /// `get_blocking` (or the reverse).
    pub fn eager_wakeups() -> Self {
        Self {
            wake_policy: WakePolicy::Always,
            ..Self::default()
        }
    }

    /// Sets the wake policy.
    pub fn wake_policy(mut self, wake_policy: WakePolicy) -> Self {
        self.wake_policy = wake_policy;
        self
    }

    /// Validates the configuration and returns every problem found.
    ///
    /// An empty list means the settings are usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.capacity == 0 {
            errors.push(ConfigError::ZeroCapacity);
        }
        if self.capacity > MAX_CAPACITY {
            errors.push(ConfigError::CapacityTooLarge(self.capacity));
        }

        errors
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            wake_policy: WakePolicy::default(),
        }
    }
}

// ============================================
// CONFIGURATION ERRORS
// ============================================

/// Errors that can occur with configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A ring buffer needs at least one slot
    #[error("capacity must be greater than 0")]
    ZeroCapacity,

    /// Capacity above [`MAX_CAPACITY`]
    #[error("capacity {0} is too large (maximum {max})", max = MAX_CAPACITY)]
    CapacityTooLarge(usize),
}

// ============================================
// TESTS
// ============================================
