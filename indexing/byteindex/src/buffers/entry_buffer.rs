use crate::error::{IndexError, Result};
use crate::width::IndexEntry;
use std::io;
use tracing::debug;
use zerocopy::IntoBytes;

/// Fixed-capacity batch of encoded entries, written out as whole entries only.
pub struct EntryBuffer<T: IndexEntry> {
    entries: Vec<T>,
    capacity: usize,
    flushes: u64,
}

impl<T: IndexEntry> EntryBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            flushes: 0,
        }
    }

    /// Appends an entry, returning true once the buffer is full and must be flushed.
    #[inline(always)]
    pub fn push(&mut self, value: T) -> bool {
        debug_assert!(self.entries.len() < self.capacity);
        self.entries.push(value);
        self.is_full()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of non-empty flushes performed so far.
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Writes every buffered entry in host byte order and empties the buffer.
    pub fn flush_to<W: io::Write + ?Sized>(&mut self, writer: &mut W) -> Result<usize> {
        if self.entries.is_empty() {
            return Ok(0);
        }
        writer
            .write_all(self.entries.as_slice().as_bytes())
            .map_err(IndexError::Write)?;
        let count = self.entries.len();
        self.entries.clear();
        self.flushes += 1;
        let width = T::WIDTH;
        debug!(entries = count, width = %width, "flushed index entries");
        Ok(count)
    }
}
