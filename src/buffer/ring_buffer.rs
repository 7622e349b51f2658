//! # Ring Buffer Implementation
//!
//! A fixed-size circular slot array with explicit front/back indices.
//!
//! ## Plain English
//!
//! Picture a circular track with numbered parking spots.
//! `front` points at the spot the next car parks in, `back` points at
//! the car that leaves next. When both point at the same spot the track
//! is either completely empty or completely full, and the `is_full`
//! flag tells the two apart.
//!
//! This type does no locking. [`SharedRingBuffer`](super::SharedRingBuffer)
//! puts it behind a mutex.

/// A fixed-capacity ring buffer.
///
/// ## Properties
/// - Fixed capacity (doesn't grow)
/// - O(1) push and pop
/// - Overwriting push discards the oldest unread element when full
/// - Maintains insertion order
///
/// ## Invariants
/// - `front < capacity` and `back < capacity`
/// - `front == back` means empty when `!is_full`, full when `is_full`
/// - Slots from `back` up to `front` (circularly) hold the unread
///   elements oldest-first; every other slot is `None`
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    front: usize,
    back: usize,
    is_full: bool,
}

impl<T> RingBuffer<T> {
    /// Creates a new ring buffer with the given capacity.
    ///
    /// ## Panics
    /// Panics if `capacity` is zero.
    ///
    /// ## Example
    /// ```
    /// # use bounded_ring::buffer::RingBuffer;
    /// let buffer: RingBuffer<i32> = RingBuffer::new(100);
    /// assert_eq!(buffer.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            slots,
            front: 0,
            back: 0,
            is_full: false,
        }
    }

    #[inline]
    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.slots.len()
    }

    /// Writes `item` at the front, whether or not the buffer is full.
    ///
    /// If the buffer was full, the oldest unread element is discarded and
    /// returned so the caller can account for it. The buffer stays full.
    pub fn push_overwrite(&mut self, item: T) -> Option<T> {
        let discarded = if self.is_full {
            // front == back here, so the slot being written is the oldest
            self.back = self.advance(self.back);
            self.slots[self.front].take()
        } else {
            None
        };

        self.slots[self.front] = Some(item);
        self.front = self.advance(self.front);
        self.is_full = self.front == self.back;

        discarded
    }

    /// Removes and returns the oldest unread element.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.slots[self.back].take();
        self.back = self.advance(self.back);
        self.is_full = false;

        item
    }

    /// Returns the number of unread elements.
    pub fn len(&self) -> usize {
        if self.is_full {
            self.slots.len()
        } else {
            (self.front + self.slots.len() - self.back) % self.slots.len()
        }
    }

    /// Returns true if there is nothing to read.
    pub fn is_empty(&self) -> bool {
        self.front == self.back && !self.is_full
    }

    /// Returns true if every slot holds an unread element.
    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// Returns the fixed number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index where the next element will be written.
    pub fn front(&self) -> usize {
        self.front
    }

    /// Index of the next element to be read.
    pub fn back(&self) -> usize {
        self.back
    }

    /// Drops every unread element and rewinds both indices.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.front = 0;
        self.back = 0;
        self.is_full = false;
    }

    /// Returns an iterator over unread elements (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.slots.len();
        (0..self.len()).filter_map(move |i| self.slots[(self.back + i) % capacity].as_ref())
    }
}

// ============================================
// TESTS
// ============================================
