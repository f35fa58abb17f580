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

//! Greedy multi-region planner. Walks a memory block from its base, asking
//! both fitters for the next region and keeping whichever reaches further.

use std::ops::Range;

use super::error::PlanError;
use super::fit::{srd_fit, std_fit};
use super::region::Region;
use super::table::{AlignmentTable, ARMV7M, MPU_REGIONS};
use crate::memory::MemoryBlock;
use crate::utils::format_size;

/// Regions chosen for one block, in address order. Capacity is the hardware
/// region count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionPlan {
    regions: heapless::Vec<Region, MPU_REGIONS>,
}

impl RegionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region; gives it back if all slots are taken.
    pub fn push(&mut self, region: Region) -> Result<(), Region> {
        self.regions.push(region)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub(super) fn from_regions(regions: heapless::Vec<Region, MPU_REGIONS>) -> Self {
        Self { regions }
    }

    pub(super) fn into_regions(self) -> heapless::Vec<Region, MPU_REGIONS> {
        self.regions
    }

    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Effective address range covered by the plan, if it holds anything.
    pub fn covered_range(&self) -> Option<Range<u64>> {
        let first = self.regions.first()?;
        let last = self.regions.last()?;
        Some(first.effective_base()..last.end())
    }
}

impl<'a> IntoIterator for &'a RegionPlan {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Standard,
    Subregion,
}

/// One slot decision, handed to a [`PlanObserver`].
#[derive(Debug, Clone, Copy)]
pub struct PlanStep {
    pub slot: usize,
    pub addr: u64,
    pub limit: u64,
    pub subregion: Region,
    pub standard: Region,
    pub chosen: Strategy,
}

impl PlanStep {
    pub fn region(&self) -> Region {
        match self.chosen {
            Strategy::Standard => self.standard,
            Strategy::Subregion => self.subregion,
        }
    }
}

/// Step-by-step view into the planner's choices.
pub trait PlanObserver {
    fn on_step(&mut self, step: &PlanStep);
}

pub struct NoopObserver;

impl PlanObserver for NoopObserver {
    fn on_step(&mut self, _step: &PlanStep) {}
}

/// Traces each choice through `log::debug!`.
pub struct LogObserver;

impl PlanObserver for LogObserver {
    fn on_step(&mut self, step: &PlanStep) {
        let region = step.region();
        log::debug!(
            "[0x{:08x}++0x{:08x}] slot {} chose {:?} {}: {}",
            step.addr,
            step.limit,
            step.slot,
            step.chosen,
            format_size(region.size),
            region
        );
    }
}

/// Collects every step, mostly useful in tests.
#[derive(Debug, Default)]
pub struct StepRecorder {
    pub steps: Vec<PlanStep>,
}

impl PlanObserver for StepRecorder {
    fn on_step(&mut self, step: &PlanStep) {
        self.steps.push(*step);
    }
}

pub struct RegionPlanner<'t> {
    table: &'t AlignmentTable,
}

impl Default for RegionPlanner<'static> {
    fn default() -> Self {
        Self { table: &ARMV7M }
    }
}

impl<'t> RegionPlanner<'t> {
    pub fn new(table: &'t AlignmentTable) -> Self {
        Self { table }
    }

    pub fn plan(&self, block: &MemoryBlock) -> Result<RegionPlan, PlanError> {
        self.plan_with(block, &mut NoopObserver)
    }

    /// Cover `block` with at most [`MPU_REGIONS`] regions.
    ///
    /// Both fitters always get the block end as their limit. On equal reach
    /// the standard region wins.
    pub fn plan_with(
        &self,
        block: &MemoryBlock,
        observer: &mut dyn PlanObserver,
    ) -> Result<RegionPlan, PlanError> {
        let end = block.end().ok_or(PlanError::AddressOverflow {
            base: block.base,
            size: block.size,
        })?;
        let mut plan = RegionPlan::new();
        if block.size == 0 {
            return Ok(plan);
        }

        let mut addr = block.base;
        for slot in 0..MPU_REGIONS {
            let srd = srd_fit(self.table, addr, end)?;
            let std = std_fit(self.table, addr, end);
            if srd.is_none() && std.is_none() {
                return Err(PlanError::Unfittable { addr, limit: end });
            }

            let step = PlanStep {
                slot,
                addr,
                limit: end,
                subregion: srd.unwrap_or(Region::SENTINEL),
                standard: std.unwrap_or(Region::SENTINEL),
                chosen: if srd.map_or(0, |r| r.end()) > std.map_or(0, |r| r.end()) {
                    Strategy::Subregion
                } else {
                    Strategy::Standard
                },
            };
            observer.on_step(&step);

            let region = step.region();
            plan.push(region)
                .map_err(|_| PlanError::BudgetExhausted { covered_to: addr, end })?;

            let next = region.end();
            if next >= end {
                return Ok(plan);
            }
            addr = next;
        }

        Err(PlanError::BudgetExhausted {
            covered_to: addr,
            end,
        })
    }
}

/// Plan `block` against the ARMv7-M table.
pub fn try_fit(block: &MemoryBlock) -> Result<RegionPlan, PlanError> {
    RegionPlanner::default().plan(block)
}

pub fn try_fit_with(
    block: &MemoryBlock,
    observer: &mut dyn PlanObserver,
) -> Result<RegionPlan, PlanError> {
    RegionPlanner::default().plan_with(block, observer)
}
