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

// Common types and utilities for the chunked ring buffer

use serde::Serialize;

/// Default capacity of a single chunk in bytes (64 KiB)
pub const DEFAULT_CHUNK_CAPACITY: usize = 64 * 1024;

/// Error types for buffer operations
///
/// Normal operation never produces these: writes grow the ring instead of
/// failing, and reads simply stop at the write frontier. Each variant marks
/// a broken internal invariant that must surface immediately rather than be
/// retried.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("chunk storage is not initialized")]
    Uninitialized,

    #[error("capacity invariant violated: {0}")]
    CapacityInvariantViolation(String),

    #[error("invalid buffer configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for buffer operations
pub type BufferResult<T> = std::result::Result<T, BufferError>;

/// Fill state of a chunk or of the ring as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// No valid bytes
    Empty,
    /// Some valid bytes, free space remains
    Partial,
    /// Every byte of capacity holds valid data
    Full,
}

impl BufferState {
    /// Derives the state from a size/capacity pair
    pub fn derive(size: usize, capacity: usize) -> Self {
        if size == 0 {
            BufferState::Empty
        } else if size == capacity {
            BufferState::Full
        } else {
            BufferState::Partial
        }
    }
}

/// Counters describing the lifetime activity of a ring
#[derive(Debug, Clone, Default, Serialize)]
pub struct BufferStats {
    pub bytes_written: u64, // Total bytes accepted by write
    pub bytes_read: u64,    // Total bytes handed out by read
    pub grow_events: u64,   // Number of times growth ran
    pub nodes_added: u64,   // Chunks spliced in by growth
    pub peak_size: usize,   // Largest buffered byte count observed
}

impl BufferStats {
    /// Records a completed write and the buffered size it produced
    pub fn record_write(&mut self, bytes: usize, buffered: usize) {
        self.bytes_written += bytes as u64;
        if buffered > self.peak_size {
            self.peak_size = buffered;
        }
    }

    /// Records a completed read
    pub fn record_read(&mut self, bytes: usize) {
        self.bytes_read += bytes as u64;
    }

    /// Records a growth event that spliced `added` chunks into the ring
    pub fn record_growth(&mut self, added: usize) {
        self.grow_events += 1;
        self.nodes_added += added as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_derivation() {
        assert_eq!(BufferState::derive(0, 1024), BufferState::Empty);
        assert_eq!(BufferState::derive(1, 1024), BufferState::Partial);
        assert_eq!(BufferState::derive(1024, 1024), BufferState::Full);
    }

    #[test]
    fn test_stats_peak_tracking() {
        let mut stats = BufferStats::default();
        stats.record_write(100, 100);
        stats.record_write(50, 150);
        stats.record_read(150);
        stats.record_write(10, 10);

        assert_eq!(stats.bytes_written, 160);
        assert_eq!(stats.bytes_read, 150);
        assert_eq!(stats.peak_size, 150);
    }

    #[test]
    fn test_stats_growth_accounting() {
        let mut stats = BufferStats::default();
        stats.record_growth(8);
        stats.record_growth(16);

        assert_eq!(stats.grow_events, 2);
        assert_eq!(stats.nodes_added, 24);
    }

    #[test]
    fn test_error_display() {
        let err = BufferError::CapacityInvariantViolation("write stalled".to_string());
        assert_eq!(err.to_string(), "capacity invariant violated: write stalled");
        assert_eq!(BufferError::Uninitialized.to_string(), "chunk storage is not initialized");
    }
}
