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

use tracing::debug;

use crate::buffer::chunk::Chunk;
use crate::buffer::lib::{BufferError, BufferResult, BufferState, BufferStats, DEFAULT_CHUNK_CAPACITY};
use crate::memory::lib::next_power_of_two;

/// A growable FIFO byte buffer built from a circular chain of fixed-capacity
/// chunks.
///
/// Writes stream into the chunk under the write cursor and spill into the
/// following chunk whenever the current one fills; reads drain the chunk
/// under the read cursor and follow it forward. When a write would exceed
/// the free space, the ring grows by splicing fresh chunks into the cycle
/// immediately before the read cursor, so already-buffered bytes stay where
/// they are and the advancing write cursor reaches the new capacity before
/// it reaches the chunk the read cursor occupies. The total chunk count is
/// rounded up to a power of two on every growth, which keeps growth
/// amortized O(1) per byte. Capacity never shrinks.
///
/// All chunks live in a slab (`Vec<Chunk>`) and the cycle is expressed with
/// slab indices, so splicing never invalidates a reference to another chunk.
/// Chunks are never removed, which keeps every index stable for the ring's
/// lifetime.
///
/// The ring performs no internal synchronization: exactly one caller may
/// drive it at a time, and sharing it across threads requires external
/// mutual exclusion.
#[derive(Debug)]
pub struct ChunkRing {
    chunks: Vec<Chunk>,    // Slab of all chunks; indices are stable, the set only grows
    chunk_capacity: usize, // Fixed capacity per chunk
    capacity: usize,       // Aggregate: chunks.len() * chunk_capacity
    size: usize,           // Total valid bytes across all chunks
    write_at: usize,       // Slab index of the chunk receiving writes
    read_at: usize,        // Slab index of the chunk serving reads
    stats: BufferStats,
}

impl ChunkRing {
    /// Creates a ring of `initial_nodes` chunks with the default chunk
    /// capacity of 64 KiB. A requested count of zero is clamped to one, so
    /// the cycle always has an anchor chunk.
    pub fn new(initial_nodes: usize) -> Self {
        Self::build(initial_nodes, DEFAULT_CHUNK_CAPACITY)
    }

    /// Creates a ring with an explicit per-chunk capacity.
    ///
    /// # Errors
    /// `BufferError::InvalidConfiguration` if `chunk_capacity` is zero.
    pub fn with_chunk_capacity(initial_nodes: usize, chunk_capacity: usize) -> BufferResult<Self> {
        if chunk_capacity == 0 {
            return Err(BufferError::InvalidConfiguration("chunk capacity must be greater than zero".to_string()));
        }
        Ok(Self::build(initial_nodes, chunk_capacity))
    }

    fn build(initial_nodes: usize, chunk_capacity: usize) -> Self {
        let node_count = initial_nodes.max(1);
        let mut ring = Self {
            chunks: Vec::with_capacity(node_count),
            chunk_capacity,
            capacity: chunk_capacity,
            size: 0,
            write_at: 0,
            read_at: 0,
            stats: BufferStats::default(),
        };

        // Anchor chunk: id 0, linked to itself.
        ring.chunks.push(Chunk::new(chunk_capacity));
        for _ in 1..node_count {
            ring.splice_before(ring.read_at);
        }
        ring
    }

    /// Aggregate capacity in bytes across all chunks
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total valid bytes currently buffered
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of chunks in the cycle
    pub fn node_count(&self) -> usize {
        self.chunks.len()
    }

    /// Fixed capacity of each chunk
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Current fill state of the ring as a whole
    pub fn state(&self) -> BufferState {
        BufferState::derive(self.size, self.capacity)
    }

    /// Returns a snapshot of lifetime activity counters
    pub fn stats(&self) -> BufferStats {
        self.stats.clone()
    }

    /// Appends every byte of `data` to the buffer, growing the ring first
    /// when the free space is insufficient. The write streams through the
    /// write cursor, hopping to the next chunk each time the current one
    /// fills. Returns the number of bytes written, which is always
    /// `data.len()` on success. A zero-length write is a no-op returning
    /// `Ok(0)`.
    ///
    /// # Errors
    /// `BufferError::CapacityInvariantViolation` if bytes cannot be placed
    /// even though growth guaranteed room — an internal invariant failure,
    /// not a normal runtime condition.
    pub fn write(&mut self, data: &[u8]) -> BufferResult<usize> {
        if data.is_empty() {
            return Ok(0);
        }

        let free = self.capacity - self.size;
        if free < data.len() {
            self.ensure_capacity(data.len() - free)?;
        }

        let mut written = 0;
        while written < data.len() {
            if self.chunks[self.write_at].is_full() {
                self.advance_write_cursor(data.len() - written)?;
                continue;
            }

            let n = self.chunks[self.write_at].write(&data[written..])?;
            if n == 0 {
                return Err(BufferError::CapacityInvariantViolation(format!(
                    "write cursor stalled with {} of {} bytes unplaced",
                    data.len() - written,
                    data.len()
                )));
            }
            written += n;
            self.size += n;
        }

        self.stats.record_write(written, self.size);
        Ok(written)
    }

    /// Fills `dest` with buffered bytes in FIFO order, following the read
    /// cursor forward and stopping when `dest` is full or every buffered
    /// byte has been served. Empty chunks between the read cursor and the
    /// data are hopped over; chunks past the write frontier are never
    /// visited because the byte count runs out first. Returns the number of
    /// bytes actually read. A zero-length destination is a no-op returning
    /// `Ok(0)`, as is any read on an empty ring.
    pub fn read(&mut self, dest: &mut [u8]) -> BufferResult<usize> {
        let mut filled = 0;
        while filled < dest.len() && self.size > 0 {
            let n = self.chunks[self.read_at].read(&mut dest[filled..])?;
            filled += n;
            self.size -= n;

            // Leave an emptied chunk behind while data remains ahead, or to
            // rejoin the write cursor; once empty and colocated, stay put.
            if self.chunks[self.read_at].is_empty() && (self.size > 0 || self.read_at != self.write_at) {
                self.read_at = self.chunks[self.read_at].next;
            }
        }

        self.stats.record_read(filled);
        Ok(filled)
    }

    /// Assembles a contiguous copy of every buffered byte in FIFO order
    /// without touching cursors or offsets. Walks the cycle from the read
    /// cursor, accumulating each chunk's view until the running total equals
    /// `len()`.
    pub fn peek_all(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size);
        let mut at = self.read_at;
        while out.len() < self.size {
            out.extend_from_slice(&self.chunks[at].peek());
            at = self.chunks[at].next;
        }
        out
    }

    /// Moves the write cursor off a filled chunk. Almost always this is a
    /// plain hop to the next chunk, which is empty. The exception is when
    /// the next chunk holds the read cursor while bytes remain buffered:
    /// writing there would put the newest bytes in front of older ones on
    /// the read path, so the ring grows first and the cursor steps into the
    /// freshly spliced chunk instead.
    fn advance_write_cursor(&mut self, remaining: usize) -> BufferResult<()> {
        if self.chunks[self.write_at].next == self.read_at {
            self.ensure_capacity(remaining)?;
        }
        self.write_at = self.chunks[self.write_at].next;
        Ok(())
    }

    /// Grows the ring so at least `extra` more bytes fit beyond the current
    /// free space. Rounds the total chunk count up to the next power of two
    /// and splices each fresh chunk into the cycle immediately before the
    /// read cursor, where the advancing write cursor reaches it last. When
    /// both cursors share a chunk that still holds bytes at the moment the
    /// first new chunk lands, that chunk is split so its bytes are not
    /// stranded behind the insertion point.
    fn ensure_capacity(&mut self, extra: usize) -> BufferResult<()> {
        let needed = extra.div_ceil(self.chunk_capacity);
        let target = next_power_of_two(self.chunks.len() + needed);
        let add = target - self.chunks.len();

        debug!("growing ring from {} to {} chunks ({} byte shortfall)", self.chunks.len(), target, extra);

        for i in 0..add {
            let index = self.splice_before(self.read_at);
            if i == 0 && self.write_at == self.read_at && !self.chunks[self.write_at].is_empty() {
                self.split_shared_chunk(index)?;
            }
        }

        self.stats.record_growth(add);
        Ok(())
    }

    /// Splices a fresh empty chunk into the cycle between `before`'s
    /// predecessor and `before`, assigning it the next diagnostic id, and
    /// returns its slab index.
    fn splice_before(&mut self, before: usize) -> usize {
        let index = self.chunks.len();
        let mut chunk = Chunk::new(self.chunk_capacity);
        chunk.id = index as u64;

        let prev = self.chunks[before].prev;
        chunk.prev = prev;
        chunk.next = before;
        self.chunks.push(chunk);
        self.chunks[prev].next = index;
        self.chunks[before].prev = index;

        self.capacity += self.chunk_capacity;
        index
    }

    /// Splits the chunk shared by both cursors during growth: its buffered
    /// bytes are drained into the freshly spliced chunk at `into` and the
    /// write cursor moves there, while the drained chunk stays in the cycle
    /// (now empty) holding the read cursor. Reads then hop forward to the
    /// relocated bytes, and new writes no longer collide with the position
    /// the read cursor still occupies.
    fn split_shared_chunk(&mut self, into: usize) -> BufferResult<()> {
        let relocated = self.chunks[self.write_at].drain();
        if !relocated.is_empty() {
            let moved = self.chunks[into].write(&relocated)?;
            if moved != relocated.len() {
                return Err(BufferError::CapacityInvariantViolation(format!(
                    "split relocated only {} of {} bytes",
                    moved,
                    relocated.len()
                )));
            }
        }
        self.write_at = into;
        Ok(())
    }
}
