// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::borrow::Cow;

use crate::buffer::lib::{BufferError, BufferResult, BufferState};
use crate::memory::lib::allocate_region;

/// A fixed-capacity circular byte buffer over one contiguous region.
///
/// Valid data lives between `read_offset` and `write_offset`, both taken
/// modulo `capacity`: when `write_offset > read_offset` the data is the
/// contiguous range `[read_offset, write_offset)`; when
/// `write_offset <= read_offset` and the chunk is not empty, the data wraps
/// around the end of storage. An empty chunk always has both offsets at 0,
/// so a freshly drained chunk accepts writes as if new.
///
/// Chunks are the unit of growth for [`ChunkRing`](crate::buffer::ChunkRing)
/// and link into its cycle through slab indices, but a `Chunk` on its own is
/// a complete single-region ring buffer.
#[derive(Debug)]
pub struct Chunk {
    storage: Box<[u8]>,       // Fixed heap region, allocated once at construction
    capacity: usize,          // Length of storage, constant for the chunk's lifetime
    size: usize,              // Valid bytes currently held
    read_offset: usize,       // Next byte to serve, in [0, capacity)
    write_offset: usize,      // Next byte to fill, in [0, capacity)
    pub(crate) id: u64,       // Insertion sequence number, diagnostic only
    pub(crate) next: usize,   // Slab index of the following chunk in the cycle
    pub(crate) prev: usize,   // Slab index of the preceding chunk in the cycle
}

impl Chunk {
    /// Creates an empty chunk backed by a zeroed region of `capacity` bytes.
    /// Cycle links start at slab index 0; the owning ring rewires them when
    /// the chunk is spliced in.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: allocate_region(capacity),
            capacity,
            size: 0,
            read_offset: 0,
            write_offset: 0,
            id: 0,
            next: 0,
            prev: 0,
        }
    }

    /// Copies as many bytes of `data` as fit, starting at the write offset
    /// and wrapping past the end of storage when the tail segment is too
    /// small. Never consumes more than the `capacity - size` free bytes; a
    /// full chunk accepts zero bytes and reports success so the caller can
    /// advance to the next chunk.
    ///
    /// # Errors
    /// `BufferError::Uninitialized` if the backing storage does not match
    /// the declared capacity. Unreachable through normal construction.
    pub fn write(&mut self, data: &[u8]) -> BufferResult<usize> {
        if self.storage.len() != self.capacity {
            return Err(BufferError::Uninitialized);
        }
        if self.is_full() || data.is_empty() {
            return Ok(0);
        }

        let free = self.capacity - self.size;
        let count = data.len().min(free);

        // Tail segment first, then wrap to the front for the remainder.
        let tail = (self.capacity - self.write_offset).min(count);
        self.storage[self.write_offset..self.write_offset + tail].copy_from_slice(&data[..tail]);
        if count > tail {
            self.storage[..count - tail].copy_from_slice(&data[tail..count]);
        }

        self.write_offset = (self.write_offset + count) % self.capacity;
        self.size += count;
        Ok(count)
    }

    /// Copies up to `dest.len()` bytes into `dest`, starting at the read
    /// offset and wrapping at the end of storage. Advances the read offset
    /// and shrinks `size`; once the chunk empties, both offsets reset to 0.
    /// Reading from an empty chunk returns zero bytes with no error.
    ///
    /// # Errors
    /// `BufferError::Uninitialized` if the backing storage does not match
    /// the declared capacity. Unreachable through normal construction.
    pub fn read(&mut self, dest: &mut [u8]) -> BufferResult<usize> {
        if self.storage.len() != self.capacity {
            return Err(BufferError::Uninitialized);
        }
        if self.size == 0 || dest.is_empty() {
            return Ok(0);
        }

        let count = dest.len().min(self.size);
        let tail = (self.capacity - self.read_offset).min(count);
        dest[..tail].copy_from_slice(&self.storage[self.read_offset..self.read_offset + tail]);
        if count > tail {
            dest[tail..count].copy_from_slice(&self.storage[..count - tail]);
        }

        self.size -= count;
        if self.size == 0 {
            self.clear();
        } else {
            self.read_offset = (self.read_offset + count) % self.capacity;
        }
        Ok(count)
    }

    /// Returns the valid bytes without mutating any offset. Contiguous data
    /// is borrowed straight from storage; wrapped data is assembled into a
    /// fresh contiguous copy, tail segment then head segment.
    pub fn peek(&self) -> Cow<'_, [u8]> {
        if self.size == 0 {
            return Cow::Borrowed(&[]);
        }
        if self.read_offset < self.write_offset {
            Cow::Borrowed(&self.storage[self.read_offset..self.write_offset])
        } else {
            let mut assembled = Vec::with_capacity(self.size);
            assembled.extend_from_slice(&self.storage[self.read_offset..]);
            assembled.extend_from_slice(&self.storage[..self.write_offset]);
            Cow::Owned(assembled)
        }
    }

    /// Destructive variant of [`peek`](Self::peek): returns every valid byte
    /// as one contiguous sequence and leaves the chunk empty. Growth uses
    /// this to relocate a chunk's contents in a single call.
    pub fn drain(&mut self) -> Vec<u8> {
        let bytes = self.peek().into_owned();
        self.clear();
        bytes
    }

    /// Resets the chunk to empty with both offsets at 0
    pub fn clear(&mut self) {
        self.size = 0;
        self.read_offset = 0;
        self.write_offset = 0;
    }

    pub fn is_full(&self) -> bool {
        self.size == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Valid bytes currently held
    pub fn len(&self) -> usize {
        self.size
    }

    /// Fixed byte capacity of the backing region
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insertion sequence number assigned by the owning ring
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current fill state
    pub fn state(&self) -> BufferState {
        BufferState::derive(self.size, self.capacity)
    }
}
