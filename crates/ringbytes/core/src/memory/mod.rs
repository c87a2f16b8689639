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

/// Memory collaborators for the chunked ring buffer
///
/// This module provides the memory-facing pieces the buffer builds on:
/// - Region allocation for fixed-capacity chunk storage
/// - Power-of-two arithmetic used by ring growth
/// - A free-list pool for reusing large resizable byte buffers
/// - Usage statistics for monitoring allocations
pub mod lib; // Shared utilities and helper functions
pub mod pool; // Byte buffer pooling

// Re-export main components for easier access
pub use lib::{MemoryStats, allocate_region, is_power_of_two, next_power_of_two};
pub use pool::{ByteBufferPool, DEFAULT_POOL_BUFFER_CAPACITY, PoolError, PoolResult, PoolStats};
