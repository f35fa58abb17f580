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

//! Text and JSON rendering of planned layouts.

use std::fmt::Write as _;

use crate::layout::BlockOutcome;
use crate::layout_requests::{BlockLayout, BlockStatus, LayoutReport, RegionDescriptor};
use crate::mpu::{PlanError, RegionPlan, MPU_REGIONS};

fn hex(v: u64) -> String {
    format!("0x{:x}", v)
}

/// One line per region, a blank line after each planned block:
///
/// ```text
/// [0x20000000--0x00060000] sram[0]: [0x20000000--0x00040000, 0x00]
/// ```
pub fn render_text(outcomes: &[BlockOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let block = &outcome.block;
        match &outcome.result {
            Ok(plan) => {
                for (i, region) in plan.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "[0x{:08x}--0x{:08x}] {}[{}]: {}",
                        block.base, block.size, block.name, i, region
                    );
                }
                if !plan.is_empty() {
                    out.push('\n');
                }
            }
            Err(e) => {
                let _ = writeln!(
                    out,
                    "[0x{:08x}--0x{:08x}] {}: failed to generate mpu layout!! ({})",
                    block.base, block.size, block.name, e
                );
            }
        }
    }
    out
}

fn descriptors(plan: &RegionPlan) -> Vec<RegionDescriptor> {
    plan.iter()
        .enumerate()
        .map(|(slot, r)| RegionDescriptor {
            slot: slot as u32,
            base_addr: hex(r.base_addr),
            size: hex(r.size),
            srd: r.subregion_disable,
            effective_base: hex(r.effective_base()),
        })
        .collect()
}

fn status(result: &Result<RegionPlan, PlanError>) -> BlockStatus {
    match result {
        Ok(plan) => BlockStatus::Ok {
            regions: descriptors(plan),
        },
        Err(e @ PlanError::Unfittable { addr, .. }) => BlockStatus::Unfittable {
            addr: hex(*addr),
            message: e.to_string(),
        },
        Err(e @ PlanError::BudgetExhausted { covered_to, .. }) => BlockStatus::BudgetExhausted {
            covered_to: hex(*covered_to),
            message: e.to_string(),
        },
        Err(e @ PlanError::SubregionInvariant { .. }) => BlockStatus::InvariantViolation {
            message: e.to_string(),
        },
        Err(e @ PlanError::AddressOverflow { .. }) => BlockStatus::AddressOverflow {
            message: e.to_string(),
        },
    }
}

pub fn build_report(outcomes: &[BlockOutcome]) -> LayoutReport {
    LayoutReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        mpu_regions: MPU_REGIONS as u32,
        blocks: outcomes
            .iter()
            .map(|o| BlockLayout {
                name: o.block.name.clone(),
                base: hex(o.block.base),
                size: hex(o.block.size),
                result: status(&o.result),
            })
            .collect(),
    }
}

pub fn render_json(outcomes: &[BlockOutcome]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&build_report(outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryMap;
    use crate::layout::plan_map;
    use crate::memory::MemoryBlock;
    use crate::mpu::{Passthrough, RegionPlanner};

    fn sample_outcomes() -> Vec<BlockOutcome> {
        plan_map(&RegionPlanner::default(), &Passthrough, &MemoryMap::sample())
    }

    #[test]
    fn text_matches_reference_format() {
        let text = render_text(&sample_outcomes());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[0x00000000--0x00100000] rom[0]: [0x00000000--0x00100000, 0x00]");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "[0x20000000--0x00060000] sram[0]: [0x20000000--0x00040000, 0x00]");
        assert_eq!(lines[3], "[0x20000000--0x00060000] sram[1]: [0x20040000--0x00020000, 0x00]");
        assert_eq!(lines[5], "[0x60000000--0x000fa000] dram[0]: [0x60000000--0x00080000, 0x00]");
        assert_eq!(lines[10], "[0x60000000--0x000fa000] dram[5]: [0x600f8000--0x00002000, 0x00]");
    }

    #[test]
    fn text_reports_failures() {
        let outcome = BlockOutcome {
            block: MemoryBlock::new("tiny", 0x1000, 0x10),
            result: Err(PlanError::Unfittable {
                addr: 0x1000,
                limit: 0x1010,
            }),
        };
        let text = render_text(&[outcome]);
        assert!(text.starts_with("[0x00001000--0x00000010] tiny: failed to generate mpu layout!!"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn json_report_shape() {
        let report = build_report(&sample_outcomes());
        assert_eq!(report.mpu_regions, 8);
        assert_eq!(report.blocks.len(), 3);
        match &report.blocks[1].result {
            BlockStatus::Ok { regions } => {
                assert_eq!(regions.len(), 2);
                assert_eq!(regions[1].base_addr, "0x20040000");
                assert_eq!(regions[1].size, "0x20000");
                assert_eq!(regions[1].srd, 0);
            }
            other => panic!("unexpected {:?}", other),
        }

        let v: serde_json::Value =
            serde_json::from_str(&render_json(&sample_outcomes()).unwrap()).unwrap();
        assert_eq!(v["blocks"][0]["result"]["status"], "ok");
        assert_eq!(v["blocks"][0]["result"]["regions"][0]["size"], "0x100000");
    }
}
