//! # Error Types Module
//!
//! This module defines the error types returned by the ring buffer.
//!
//! ## Plain English Explanation
//!
//! Very little can go wrong with a ring buffer. Writes either succeed or
//! wait, and blocking reads wait until there is something to read. The
//! one thing that can "fail" is asking for data right now when there is
//! none:
//!
//! - "EmptyBuffer: nothing to read yet, try again later"
//!
//! Bad construction settings (like a capacity of zero) are reported as
//! configuration errors.

use thiserror::Error;

use crate::config::ConfigError;

// ============================================
// MAIN BUFFER ERROR
// ============================================

/// The error type for ring buffer operations.
#[derive(Debug, Error)]
pub enum RingBufferError {
    /// A non-blocking read found no unread element.
    ///
    /// ## What This Means
    /// The consumer is faster than the producers. The caller decides
    /// whether to retry, switch to a blocking read, or skip.
    #[error("buffer is empty")]
    EmptyBuffer,

    /// An unread element was overwritten.
    ///
    /// Part of the vocabulary only. `put_overwrite` discards the oldest
    /// element silently and never returns this.
    #[error("data override detected")]
    DataOverride,

    /// The buffer could not be built from the given settings.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RingBufferError {
    /// Returns true for the recoverable "nothing to read" condition.
    pub fn is_empty_buffer(&self) -> bool {
        matches!(self, Self::EmptyBuffer)
    }
}

// ============================================
// RESULT TYPE ALIAS
// ============================================

/// A Result type that uses [`RingBufferError`].
pub type RingBufferResult<T> = Result<T, RingBufferError>;

// ============================================
// TESTS
// ============================================
