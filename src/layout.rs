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

//! Runs the planner over a whole memory map, one block at a time.

use crate::config::MemoryMap;
use crate::debug::is_debug;
use crate::memory::MemoryBlock;
use crate::mpu::{
    LogObserver, NoopObserver, PlanError, PlanObserver, RegionMerge, RegionPlan, RegionPlanner,
};

/// Result of planning and merging one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub block: MemoryBlock,
    pub result: Result<RegionPlan, PlanError>,
}

impl BlockOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-step tracing only runs in debug mode.
fn observer() -> Box<dyn PlanObserver> {
    if is_debug() {
        Box::new(LogObserver)
    } else {
        Box::new(NoopObserver)
    }
}

/// Plan a single block and hand a successful plan to `merge`. Failures are
/// returned as-is; there is no partial plan.
pub fn plan_block(
    planner: &RegionPlanner<'_>,
    merge: &dyn RegionMerge,
    block: &MemoryBlock,
) -> BlockOutcome {
    let result = planner
        .plan_with(block, observer().as_mut())
        .map(|plan| merge.merge(plan));

    match &result {
        Ok(plan) => log::debug!("{}: {} regions", block.name, plan.len()),
        Err(e) => log::warn!("{}: {}", block.name, e),
    }

    BlockOutcome {
        block: block.clone(),
        result,
    }
}

/// Each block is planned independently, in map order.
pub fn plan_map(
    planner: &RegionPlanner<'_>,
    merge: &dyn RegionMerge,
    map: &MemoryMap,
) -> Vec<BlockOutcome> {
    map.blocks()
        .iter()
        .map(|block| plan_block(planner, merge, block))
        .collect()
}
