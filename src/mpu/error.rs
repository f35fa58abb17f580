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

use thiserror::Error;

/// Why a subregion-disable mask could not be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SrdViolation {
    #[error("address 0 never needs a subregion mask")]
    ZeroAddress,
    #[error("region base is not a multiple of the region size")]
    UnalignedBase,
    #[error("address lies below the region base")]
    AddressBelowBase,
    #[error("{0} leading subregions would be disabled (limit is 3)")]
    TooManyLeading(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no legal region starts at 0x{addr:08x} below 0x{limit:08x}")]
    Unfittable { addr: u64, limit: u64 },

    #[error("region budget exhausted at 0x{covered_to:08x}, block ends at 0x{end:08x}")]
    BudgetExhausted { covered_to: u64, end: u64 },

    #[error(
        "subregion mask for 0x{addr:08x} in region [0x{base:08x}++0x{size:08x}] is invalid: {reason}"
    )]
    SubregionInvariant {
        addr: u64,
        base: u64,
        size: u64,
        reason: SrdViolation,
    },

    #[error("block 0x{base:08x}++0x{size:x} overflows the address space")]
    AddressOverflow { base: u64, size: u64 },
}
