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

use serde::Serialize;

/// Allocates a zeroed contiguous byte region of the given length
/// Chunk storage is fixed for the chunk's lifetime, so a boxed slice is used
/// instead of a growable vector
pub fn allocate_region(len: usize) -> Box<[u8]> {
    vec![0u8; len].into_boxed_slice()
}

/// Checks if a number is a power of two
/// Powers of two have only one bit set to 1, which this function efficiently tests
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Gets the next power of two for a given number
/// Ring growth rounds the total chunk count up to a power of two, and the
/// rounding must stay exact at large counts, so this uses integer shifts only
pub fn next_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 1;
    }

    let mut power = 1;
    while power < n {
        power <<= 1;
    }
    power
}

/// A struct to track memory usage statistics
/// Useful for monitoring how much buffer memory a pool has handed out
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryStats {
    pub allocated: usize,        // Total bytes allocated
    pub deallocated: usize,      // Total bytes deallocated
    pub current_usage: usize,    // Current memory in use (allocated - deallocated)
    pub peak_usage: usize,       // Maximum memory usage recorded
    pub allocation_count: u64,   // Number of allocation operations
    pub deallocation_count: u64, // Number of deallocation operations
}

impl MemoryStats {
    /// Records a memory allocation and updates statistics
    pub fn record_allocation(&mut self, size: usize) {
        self.allocated += size;
        self.current_usage += size;
        self.allocation_count += 1;

        if self.current_usage > self.peak_usage {
            self.peak_usage = self.current_usage;
        }
    }

    /// Records a memory deallocation and updates statistics
    pub fn record_deallocation(&mut self, size: usize) {
        self.deallocated += size;
        self.current_usage = self.current_usage.saturating_sub(size);
        self.deallocation_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_region_zeroed() {
        let region = allocate_region(64);
        assert_eq!(region.len(), 64);
        assert!(region.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocate_region_empty() {
        let region = allocate_region(0);
        assert!(region.is_empty());
    }

    #[test]
    fn test_is_power_of_two() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(2));
        assert!(!is_power_of_two(3));
        assert!(is_power_of_two(8));
        assert!(is_power_of_two(65536));
        assert!(!is_power_of_two(65537));
    }

    #[test]
    fn test_next_power_of_two() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(8), 8);
        assert_eq!(next_power_of_two(9), 16);
        assert_eq!(next_power_of_two(65535), 65536);
        assert_eq!(next_power_of_two((1 << 20) + 1), 1 << 21);
    }

    #[test]
    fn test_memory_stats_tracking() {
        let mut stats = MemoryStats::default();
        stats.record_allocation(1024);
        stats.record_allocation(2048);
        assert_eq!(stats.allocated, 3072);
        assert_eq!(stats.current_usage, 3072);
        assert_eq!(stats.peak_usage, 3072);
        assert_eq!(stats.allocation_count, 2);

        stats.record_deallocation(1024);
        assert_eq!(stats.current_usage, 2048);
        assert_eq!(stats.peak_usage, 3072);
        assert_eq!(stats.deallocation_count, 1);
    }
}
