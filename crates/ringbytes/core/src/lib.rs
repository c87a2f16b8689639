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

//! Ringbytes Core Library
//!
//! This crate provides a growable FIFO byte buffer built as a circular chain
//! of fixed-capacity chunks, together with the memory utilities it relies on:
//! region allocation, power-of-two sizing, and a free-list pool for reusing
//! large byte buffers.

pub mod buffer;
pub mod memory;

// Re-export main components for easy access
pub use buffer::{BufferError, BufferResult, BufferState, BufferStats, Chunk, ChunkRing, DEFAULT_CHUNK_CAPACITY};
pub use memory::{ByteBufferPool, DEFAULT_POOL_BUFFER_CAPACITY, MemoryStats, PoolError, PoolResult, PoolStats};
