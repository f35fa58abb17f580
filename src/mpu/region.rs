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

use std::fmt;

use super::table::SUBREGIONS;

/// One hardware protection-region descriptor.
///
/// `subregion_disable` bit k set excludes the k-th eighth of the region. The
/// planner only ever disables a leading run of subregions, so the effective
/// coverage is `[effective_base(), end())`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub base_addr: u64,
    pub size: u64,
    pub subregion_disable: u8,
}

impl Region {
    /// "No region found".
    pub const SENTINEL: Region = Region {
        base_addr: 0,
        size: 0,
        subregion_disable: 0xff,
    };

    pub fn new(base_addr: u64, size: u64, subregion_disable: u8) -> Self {
        Self {
            base_addr,
            size,
            subregion_disable,
        }
    }

    pub fn end(&self) -> u64 {
        self.base_addr + self.size
    }

    pub fn subregion_size(&self) -> u64 {
        self.size / SUBREGIONS
    }

    /// Length of the run of disabled subregions starting at bit 0.
    pub fn disabled_subregions(&self) -> u32 {
        self.subregion_disable.trailing_ones()
    }

    /// True when the mask is empty or a contiguous run from bit 0.
    pub fn has_leading_mask(&self) -> bool {
        u32::from(self.subregion_disable) >> self.disabled_subregions() == 0
    }

    /// First byte actually covered once disabled subregions are skipped.
    pub fn effective_base(&self) -> u64 {
        self.base_addr + self.subregion_size() * u64::from(self.disabled_subregions())
    }

    pub fn effective_size(&self) -> u64 {
        self.end() - self.effective_base()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[0x{:08x}--0x{:08x}, 0x{:02x}]",
            self.base_addr, self.size, self.subregion_disable
        )
    }
}
