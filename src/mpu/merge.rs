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

//! Post-planning hook that may fold neighbouring regions together. A merge
//! must never change the effective address coverage of a plan.

use super::planner::RegionPlan;
use super::region::Region;
use super::table::{AlignmentTable, ARMV7M};

pub trait RegionMerge {
    fn merge(&self, plan: RegionPlan) -> RegionPlan;
}

/// Leaves the plan as it is.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl RegionMerge for Passthrough {
    fn merge(&self, plan: RegionPlan) -> RegionPlan {
        plan
    }
}

/// Joins pairs of equal, unmasked, adjacent regions into one region of twice
/// the size, when the doubled region is legal and naturally aligned.
#[derive(Debug, Clone, Copy)]
pub struct Coalesce<'t> {
    table: &'t AlignmentTable,
}

impl Default for Coalesce<'static> {
    fn default() -> Self {
        Self { table: &ARMV7M }
    }
}

impl<'t> Coalesce<'t> {
    pub fn new(table: &'t AlignmentTable) -> Self {
        Self { table }
    }

    fn join(&self, a: &Region, b: &Region) -> Option<Region> {
        if a.subregion_disable != 0 || b.subregion_disable != 0 || a.size != b.size {
            return None;
        }
        if a.end() != b.base_addr {
            return None;
        }
        let size = a.size.checked_mul(2)?;
        if !self.table.is_legal(size) || a.base_addr % size != 0 {
            return None;
        }
        Some(Region::new(a.base_addr, size, 0))
    }
}

impl RegionMerge for Coalesce<'_> {
    fn merge(&self, plan: RegionPlan) -> RegionPlan {
        let mut regions = plan.into_regions();

        // a join can enable another one further left, so run to a fixpoint
        loop {
            let hit = regions
                .windows(2)
                .enumerate()
                .find_map(|(i, pair)| self.join(&pair[0], &pair[1]).map(|r| (i, r)));
            match hit {
                Some((i, joined)) => {
                    log::debug!(
                        "coalesced {} and {} into {}",
                        regions[i],
                        regions[i + 1],
                        joined
                    );
                    regions[i] = joined;
                    regions.remove(i + 1);
                }
                None => break,
            }
        }

        RegionPlan::from_regions(regions)
    }
}
