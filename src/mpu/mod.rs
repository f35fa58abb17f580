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

//! ARMv7-M MPU region fitting.
//!
//! Regions are power-of-two sized (32 bytes to 4 GB) and aligned to their own
//! size. A region is split into 8 subregions, and disabling the leading ones
//! lets coverage start part way into it. The planner covers a memory block
//! with at most 8 such regions.

pub mod error;
pub mod fit;
pub mod merge;
pub mod planner;
pub mod region;
pub mod srd;
pub mod table;

pub use error::{PlanError, SrdViolation};
pub use fit::{srd_fit, std_fit};
pub use merge::{Coalesce, Passthrough, RegionMerge};
pub use planner::{
    try_fit, try_fit_with, LogObserver, NoopObserver, PlanObserver, PlanStep, RegionPlan,
    RegionPlanner, StepRecorder, Strategy,
};
pub use region::Region;
pub use srd::calc_srd;
pub use table::{align_down, align_up, is_aligned, is_legal, AlignmentTable, ARMV7M, MPU_REGIONS};
