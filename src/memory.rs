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

/// A named memory range that needs MPU coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlock {
    pub name: String,
    pub base: u64,
    pub size: u64,
}

impl MemoryBlock {
    pub fn new(name: impl Into<String>, base: u64, size: u64) -> Self {
        Self {
            name: name.into(),
            base,
            size,
        }
    }

    /// One past the last byte, or `None` if that doesn't fit in 64 bits.
    pub fn end(&self) -> Option<u64> {
        self.base.checked_add(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let sram = MemoryBlock::new("sram", 0x2000_0000, 0x6_0000);
        assert_eq!(sram.end(), Some(0x2006_0000));
        assert_eq!(MemoryBlock::new("x", u64::MAX, 1).end(), None);
    }
}
