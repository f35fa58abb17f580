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

//! The two single-region strategies. Both see `limit` as the absolute end of
//! the block, and both try table entries largest first.

use super::error::PlanError;
use super::region::Region;
use super::srd::calc_srd;
use super::table::{align_down, align_up, AlignmentTable, SUBREGIONS};

fn fits_below(base: u64, size: u64, limit: u64) -> bool {
    base.checked_add(size).is_some_and(|end| end <= limit)
}

/// Region at address 0: the largest entry that does not run past `limit`.
fn fit_at_zero(table: &AlignmentTable, limit: u64) -> Option<Region> {
    table
        .iter()
        .find(|&align| align <= limit)
        .map(|align| Region::new(0, align_up(table.smallest(), align), 0))
}

/// Largest naturally aligned region starting exactly at `addr`.
pub fn std_fit(table: &AlignmentTable, addr: u64, limit: u64) -> Option<Region> {
    if addr == 0 {
        return fit_at_zero(table, limit);
    }

    table
        .iter()
        .filter(|&align| addr >= align)
        .find(|&align| addr % align == 0 && fits_below(addr, align, limit))
        .map(|align| Region::new(addr, align, 0))
}

/// Region whose effective coverage starts exactly at `addr` by disabling
/// leading subregions.
///
/// For each table entry `A` below `addr`, the distance from the last
/// `A`-boundary to `addr` is taken as the subregion size. The first entry that
/// turns this into a legal region fitting under `limit` wins, which is not
/// necessarily the largest region overall.
pub fn srd_fit(
    table: &AlignmentTable,
    addr: u64,
    limit: u64,
) -> Result<Option<Region>, PlanError> {
    if addr == 0 {
        return Ok(fit_at_zero(table, limit));
    }

    for align in table.iter().filter(|&align| addr > align) {
        let quotient = addr / align;
        let srs = addr - quotient * align;
        let size = srs * SUBREGIONS;

        if table.is_legal(size) && fits_below(align_down(addr, size), size, limit) {
            let base_addr = quotient * align;
            let srd = calc_srd(addr, base_addr, size)?;
            return Ok(Some(Region::new(base_addr, size, srd)));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpu::error::SrdViolation;
    use crate::mpu::table::{ARMV7M, KB, MB};

    #[test]
    fn zero_address_takes_largest_entry_within_limit() {
        let expected = Some(Region::new(0, MB, 0));
        assert_eq!(std_fit(&ARMV7M, 0, MB), expected);
        assert_eq!(srd_fit(&ARMV7M, 0, MB), Ok(expected));
        assert_eq!(std_fit(&ARMV7M, 0, MB + 100), Some(Region::new(0, MB, 0)));
        assert_eq!(std_fit(&ARMV7M, 0, 32), Some(Region::new(0, 32, 0)));
        assert_eq!(std_fit(&ARMV7M, 0, 31), None);
    }

    #[test]
    fn std_fit_prefers_biggest_aligned_region() {
        assert_eq!(
            std_fit(&ARMV7M, 0x2000_0000, 0x2006_0000),
            Some(Region::new(0x2000_0000, 256 * KB, 0))
        );
        assert_eq!(
            std_fit(&ARMV7M, 0x2004_0000, 0x2006_0000),
            Some(Region::new(0x2004_0000, 128 * KB, 0))
        );
    }

    #[test]
    fn std_fit_needs_room_for_smallest_region() {
        assert_eq!(std_fit(&ARMV7M, 0x1000, 0x1010), None);
        assert_eq!(std_fit(&ARMV7M, 0x1010, 0x2000), None);
    }

    #[test]
    fn srd_fit_masks_first_subregion() {
        let region = srd_fit(&ARMV7M, 0x2000_0020, 0xffff_0000).unwrap();
        assert_eq!(region, Some(Region::new(0x2000_0000, 0x100, 0b0000_0001)));
        let region = region.unwrap();
        assert_eq!(region.effective_base(), 0x2000_0020);
        assert_eq!(region.subregion_size(), 0x20);
    }

    #[test]
    fn srd_fit_fails_on_aligned_addresses() {
        assert_eq!(srd_fit(&ARMV7M, 0x2000_0000, 0x2006_0000), Ok(None));
        assert_eq!(srd_fit(&ARMV7M, 0x6000_0000, 0x600f_a000), Ok(None));
    }

    #[test]
    fn srd_fit_respects_limit() {
        // a 0x100 region from 0x2000_0000 would end past the limit
        assert_eq!(srd_fit(&ARMV7M, 0x2000_0020, 0x2000_00f0), Ok(None));
    }

    #[test]
    fn srd_fit_reports_misaligned_candidate() {
        // 8K boundary at 0x2000 leaves 0x1000 -> a 32K region based at 0x2000
        let err = srd_fit(&ARMV7M, 0x3000, 0x3000 + MB).unwrap_err();
        assert_eq!(
            err,
            PlanError::SubregionInvariant {
                addr: 0x3000,
                base: 0x2000,
                size: 32 * KB,
                reason: SrdViolation::UnalignedBase,
            }
        );
    }
}
