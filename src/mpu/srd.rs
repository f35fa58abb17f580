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

use super::error::{PlanError, SrdViolation};
use super::table::SUBREGIONS;

/// At most this many leading subregions may be disabled.
pub const MAX_LEADING: u64 = SUBREGIONS / 2;

/// Subregion-disable mask that makes a region based at `region_base` start
/// covering at `addr`.
///
/// The mask disables every whole subregion below `addr`. Asking for four or
/// more means the fitter picked a region too large for the offset, which is
/// reported rather than truncated.
pub fn calc_srd(addr: u64, region_base: u64, region_size: u64) -> Result<u8, PlanError> {
    let violation = |reason| PlanError::SubregionInvariant {
        addr,
        base: region_base,
        size: region_size,
        reason,
    };

    if addr == 0 {
        return Err(violation(SrdViolation::ZeroAddress));
    }
    if region_size < SUBREGIONS || region_base % region_size != 0 {
        return Err(violation(SrdViolation::UnalignedBase));
    }
    if addr < region_base {
        return Err(violation(SrdViolation::AddressBelowBase));
    }

    let srs = region_size / SUBREGIONS;
    let leading = (addr - region_base) / srs;
    if leading >= MAX_LEADING {
        return Err(violation(SrdViolation::TooManyLeading(leading)));
    }

    Ok(((1u16 << leading) - 1) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_leading_subregion() {
        assert_eq!(calc_srd(0x2000_0020, 0x2000_0000, 0x100), Ok(0b0000_0001));
    }

    #[test]
    fn partial_subregion_rounds_down() {
        // 0x50 is 2.5 subregions of 0x20
        assert_eq!(calc_srd(0x1050, 0x1000, 0x100), Ok(0b0000_0011));
        assert_eq!(calc_srd(0x1010, 0x1000, 0x100), Ok(0));
    }

    #[test]
    fn three_is_the_limit() {
        assert_eq!(calc_srd(0x1060, 0x1000, 0x100), Ok(0b0000_0111));
        assert_eq!(
            calc_srd(0x1080, 0x1000, 0x100),
            Err(PlanError::SubregionInvariant {
                addr: 0x1080,
                base: 0x1000,
                size: 0x100,
                reason: SrdViolation::TooManyLeading(4),
            })
        );
    }

    #[test]
    fn preconditions() {
        assert!(matches!(
            calc_srd(0, 0, 0x100),
            Err(PlanError::SubregionInvariant {
                reason: SrdViolation::ZeroAddress,
                ..
            })
        ));
        assert!(matches!(
            calc_srd(0x3000, 0x2000, 0x8000),
            Err(PlanError::SubregionInvariant {
                reason: SrdViolation::UnalignedBase,
                ..
            })
        ));
        assert!(matches!(
            calc_srd(0x0800, 0x1000, 0x100),
            Err(PlanError::SubregionInvariant {
                reason: SrdViolation::AddressBelowBase,
                ..
            })
        ));
    }
}
