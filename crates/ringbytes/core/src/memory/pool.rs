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

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::memory::lib::MemoryStats;

/// Default initial capacity for each pooled buffer (256 KiB)
/// Large enough that most callers never reallocate before releasing
pub const DEFAULT_POOL_BUFFER_CAPACITY: usize = 256 * 1024;

/// Errors that can occur during pool construction
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("invalid pool configuration: {0}")]
    InvalidConfiguration(String),
}

pub type PoolResult<T> = Result<T, PoolError>;

/// Statistics about pool usage
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolStats {
    pub acquires: u64,              // Total acquire calls
    pub releases: u64,              // Total release calls
    pub hits: u64,                  // Acquires served from the free list
    pub misses: u64,                // Acquires that allocated a fresh buffer
    pub memory_stats: MemoryStats,  // Byte accounting for fresh allocations
}

/// A free-list pool of resizable byte buffers.
///
/// Callers that repeatedly need large scratch buffers acquire one, fill and
/// consume it, then release it back so the allocation is reused at the next
/// call site. Buffers keep whatever capacity they grew to while out of the
/// pool, so steady-state operation allocates nothing. The pool holds no
/// reference to buffers currently out; a buffer that is never released is
/// simply dropped by its holder.
///
/// The free list is unbounded: every released buffer is retained. The pool
/// is safe to share across threads; each operation takes a short internal
/// lock.
pub struct ByteBufferPool {
    free_list: Mutex<Vec<Vec<u8>>>, // Released buffers awaiting reuse
    initial_capacity: usize,        // Capacity of freshly allocated buffers
    stats: Mutex<PoolStats>,
}

impl ByteBufferPool {
    /// Creates a pool whose fresh buffers start at the default 256 KiB capacity
    pub fn new() -> Self {
        Self {
            free_list: Mutex::new(Vec::new()),
            initial_capacity: DEFAULT_POOL_BUFFER_CAPACITY,
            stats: Mutex::new(PoolStats::default()),
        }
    }

    /// Creates a pool with an explicit initial capacity for fresh buffers
    ///
    /// # Errors
    /// Returns `PoolError::InvalidConfiguration` if `capacity` is zero.
    pub fn with_initial_capacity(capacity: usize) -> PoolResult<Self> {
        if capacity == 0 {
            return Err(PoolError::InvalidConfiguration("initial buffer capacity must be greater than zero".to_string()));
        }

        Ok(Self {
            free_list: Mutex::new(Vec::new()),
            initial_capacity: capacity,
            stats: Mutex::new(PoolStats::default()),
        })
    }

    /// Takes a buffer from the pool, allocating a fresh one if the free list
    /// is empty. The returned buffer always has length zero; its capacity is
    /// at least the pool's initial capacity, and may be larger if a previous
    /// holder grew it.
    pub fn acquire(&self) -> Vec<u8> {
        let recycled = self.free_list.lock().pop();

        let mut stats = self.stats.lock();
        stats.acquires += 1;

        match recycled {
            Some(buf) => {
                stats.hits += 1;
                buf
            }
            None => {
                stats.misses += 1;
                stats.memory_stats.record_allocation(self.initial_capacity);
                drop(stats);
                debug!("byte buffer pool empty, allocating fresh {} byte buffer", self.initial_capacity);
                Vec::with_capacity(self.initial_capacity)
            }
        }
    }

    /// Returns a buffer to the pool for reuse.
    ///
    /// The buffer's contents are cleared but its capacity is retained, which
    /// is the entire point: a buffer that grew to hold a large payload keeps
    /// that allocation for the next acquirer.
    pub fn release(&self, mut buf: Vec<u8>) {
        buf.clear();
        self.free_list.lock().push(buf);
        self.stats.lock().releases += 1;
    }

    /// Number of buffers currently waiting in the free list
    pub fn free_buffers(&self) -> usize {
        self.free_list.lock().len()
    }

    /// Capacity given to freshly allocated buffers
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns a snapshot of pool usage statistics
    pub fn stats(&self) -> PoolStats {
        self.stats.lock().clone()
    }
}

impl Default for ByteBufferPool {
    fn default() -> Self {
        Self::new()
    }
}
