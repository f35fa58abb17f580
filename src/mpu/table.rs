// Copyright (c) 2026 MCU-Debug Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Legal MPU region sizes and the alignment arithmetic built on them.

pub const KB: u64 = 1024;
pub const MB: u64 = 1024 * KB;
pub const GB: u64 = 1024 * MB;

/// Number of hardware protection regions on an ARMv7-M MPU.
pub const MPU_REGIONS: usize = 8;

/// Every region is split into this many equal subregions.
pub const SUBREGIONS: u64 = 8;

/// ARMv7-M region sizes, largest first. The fitters walk this in order, so the
/// first match is always the biggest one.
const ARMV7M_SIZES: [u64; 28] = [
    4 * GB,
    2 * GB,
    GB,
    512 * MB,
    256 * MB,
    128 * MB,
    64 * MB,
    32 * MB,
    16 * MB,
    8 * MB,
    4 * MB,
    2 * MB,
    MB,
    512 * KB,
    256 * KB,
    128 * KB,
    64 * KB,
    32 * KB,
    16 * KB,
    8 * KB,
    4 * KB,
    2 * KB,
    KB,
    512,
    256,
    128,
    64,
    32,
];

/// Ordered set of legal region sizes for one MPU architecture.
///
/// Entries must be powers of two in strictly descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentTable {
    sizes: &'static [u64],
}

pub static ARMV7M: AlignmentTable = AlignmentTable {
    sizes: &ARMV7M_SIZES,
};

impl Default for AlignmentTable {
    fn default() -> Self {
        ARMV7M
    }
}

impl AlignmentTable {
    /// Build a table for another architecture. Panics if `sizes` is empty, not
    /// descending, or holds something that isn't a power of two.
    pub const fn new(sizes: &'static [u64]) -> Self {
        assert!(!sizes.is_empty(), "alignment table must not be empty");
        let mut i = 0;
        while i < sizes.len() {
            assert!(sizes[i].is_power_of_two(), "region sizes must be powers of two");
            if i > 0 {
                assert!(sizes[i] < sizes[i - 1], "region sizes must be descending");
            }
            i += 1;
        }
        Self { sizes }
    }

    /// Sizes from largest to smallest.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.sizes.iter().copied()
    }

    pub fn smallest(&self) -> u64 {
        self.sizes[self.sizes.len() - 1]
    }

    pub fn is_legal(&self, size: u64) -> bool {
        self.sizes.contains(&size)
    }
}

/// Round `x` up to a multiple of `align`. `align` must be a power of two.
pub fn align_up(x: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (x + (align - 1)) & !(align - 1)
}

/// Round `x` down to a multiple of `align`. `align` must be a power of two.
pub fn align_down(x: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    x - (x & (align - 1))
}

pub fn is_aligned(x: u64, align: u64) -> bool {
    if x == 0 {
        return true;
    }
    if align == 0 {
        return false;
    }
    x % align == 0
}

/// Membership test against the ARMv7-M table.
pub fn is_legal(size: u64) -> bool {
    ARMV7M.is_legal(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_descending_from_4g_to_32b() {
        let sizes: Vec<u64> = ARMV7M.iter().collect();
        assert_eq!(sizes.len(), 28);
        assert_eq!(sizes[0], 4 * GB);
        assert_eq!(ARMV7M.smallest(), 32);
        assert!(sizes.windows(2).all(|w| w[0] == w[1] * 2));
    }

    #[test]
    fn rounding() {
        assert_eq!(align_up(0, 32), 0);
        assert_eq!(align_up(1, 32), 32);
        assert_eq!(align_up(32, 32), 32);
        assert_eq!(align_up(32, 4 * KB), 4 * KB);
        assert_eq!(align_down(0x2000_0020, 0x100), 0x2000_0000);
        assert_eq!(align_down(0x3000, 32 * KB), 0);
        assert_eq!(align_down(0x1000, 0x1000), 0x1000);
    }

    #[test]
    fn alignment_predicate() {
        assert!(is_aligned(0, 0));
        assert!(is_aligned(0, 64));
        assert!(!is_aligned(5, 0));
        assert!(is_aligned(0x2000_0000, 512 * MB));
        assert!(!is_aligned(0x6000_0000, GB));
    }

    #[test]
    fn legality() {
        assert!(is_legal(32));
        assert!(is_legal(256 * KB));
        assert!(is_legal(4 * GB));
        assert!(!is_legal(0));
        assert!(!is_legal(16));
        assert!(!is_legal(384 * KB));
        assert!(!is_legal(8 * GB));
    }

    #[test]
    fn custom_table() {
        static SMALL: [u64; 3] = [1024, 256, 64];
        let table = AlignmentTable::new(&SMALL);
        assert_eq!(table.smallest(), 64);
        assert!(table.is_legal(256));
        assert!(!table.is_legal(32));
    }
}
