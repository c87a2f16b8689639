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

/// Chunked ring buffer
///
/// This module provides a growable FIFO byte buffer assembled from
/// fixed-capacity chunks linked into a cycle:
/// - Chunk: one fixed-capacity circular byte store
/// - ChunkRing: the chain of chunks with write/read cursors and growth
/// - Shared error, state, and statistics types
pub mod chunk; // Fixed-capacity circular chunk
pub mod lib; // Shared types and utilities
pub mod ring; // The growable chunk cycle

// Re-export main components for easier access
pub use chunk::Chunk;
pub use lib::{BufferError, BufferResult, BufferState, BufferStats, DEFAULT_CHUNK_CAPACITY};
pub use ring::ChunkRing;
